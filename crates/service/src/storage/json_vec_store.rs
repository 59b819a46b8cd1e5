use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
    sync::Arc,
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::{fs, sync::Mutex};
use tracing::debug;

use crate::errors::ServiceError;

/// Generic JSON file-backed ordered collection.
///
/// Holds no data in memory: `load` reads the whole file and `save` rewrites it.
/// An async mutex serializes load/mutate/save spans issued through one store
/// instance; writers in other processes are not coordinated.
pub struct JsonVecStore<T> {
    file_path: PathBuf,
    lock: Mutex<()>,
    _items: PhantomData<fn() -> T>,
}

impl<T> JsonVecStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open the store at `path`, creating the parent directory and seeding the file
    /// with an empty array if it is missing. An existing file is left untouched.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| ServiceError::storage("create data directory", e))?;
        }

        if fs::metadata(&file_path).await.is_err() {
            fs::write(&file_path, b"[]")
                .await
                .map_err(|e| ServiceError::storage("seed data file", e))?;
            debug!(path = %file_path.display(), "seeded empty collection");
        }

        Ok(Arc::new(Self { file_path, lock: Mutex::new(()), _items: PhantomData }))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    /// Read the full collection. Missing or malformed files are errors.
    pub async fn load(&self) -> Result<Vec<T>, ServiceError> {
        let _guard = self.lock.lock().await;
        self.read_file().await
    }

    /// Overwrite the file with `items`.
    pub async fn save(&self, items: &[T]) -> Result<(), ServiceError> {
        let _guard = self.lock.lock().await;
        self.write_file(items).await
    }

    /// Load, apply `f`, and persist only if `f` succeeds. The lock is held for the whole span.
    pub async fn update<F, R>(&self, f: F) -> Result<R, ServiceError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, ServiceError>,
    {
        let _guard = self.lock.lock().await;
        let mut items = self.read_file().await?;
        let out = f(&mut items)?;
        self.write_file(&items).await?;
        Ok(out)
    }

    async fn read_file(&self) -> Result<Vec<T>, ServiceError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| ServiceError::storage("read data file", e))?;
        let items: Vec<T> =
            serde_json::from_slice(&bytes).map_err(|e| ServiceError::storage("parse data file", e))?;
        debug!(path = %self.file_path.display(), count = items.len(), "loaded collection");
        Ok(items)
    }

    // Write a sibling temp file and rename it over the target so readers never see a partial file.
    async fn write_file(&self, items: &[T]) -> Result<(), ServiceError> {
        let data = serde_json::to_vec_pretty(items)
            .map_err(|e| ServiceError::storage("serialize collection", e))?;

        let mut tmp = self.file_path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, data)
            .await
            .map_err(|e| ServiceError::storage("write data file", e))?;
        fs::rename(&tmp, &self.file_path)
            .await
            .map_err(|e| ServiceError::storage("replace data file", e))?;
        debug!(path = %self.file_path.display(), count = items.len(), "saved collection");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path(tag: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("json_vec_store_{}", uuid::Uuid::new_v4()))
            .join(format!("{tag}.json"))
    }

    #[tokio::test]
    async fn seeds_missing_file_and_persists_order() -> Result<(), anyhow::Error> {
        let path = temp_path("order");
        let store = JsonVecStore::<String>::new(&path).await?;

        // initially empty
        assert!(store.load().await?.is_empty());
        assert_eq!(tokio::fs::read_to_string(&path).await?, "[]");

        store.save(&["a".to_string(), "b".to_string()]).await?;
        store
            .update(|items| {
                items.push("c".into());
                Ok(())
            })
            .await?;

        // reopen to ensure nothing was cached
        let reopened = JsonVecStore::<String>::new(&path).await?;
        assert_eq!(reopened.load().await?, vec!["a", "b", "c"]);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_update_does_not_persist() -> Result<(), anyhow::Error> {
        let path = temp_path("rollback");
        let store = JsonVecStore::<u32>::new(&path).await?;
        store.save(&[1, 2, 3]).await?;

        let res: Result<(), ServiceError> = store
            .update(|items| {
                items.clear();
                Err(ServiceError::NotFound)
            })
            .await;
        assert!(matches!(res, Err(ServiceError::NotFound)));
        assert_eq!(store.load().await?, vec![1, 2, 3]);

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn existing_file_is_not_rewritten_on_open() -> Result<(), anyhow::Error> {
        let path = temp_path("corrupt");
        tokio::fs::create_dir_all(path.parent().unwrap()).await?;
        tokio::fs::write(&path, b"{not json").await?;

        let store = JsonVecStore::<u32>::new(&path).await?;
        assert_eq!(tokio::fs::read(&path).await?, b"{not json");
        assert!(matches!(store.load().await, Err(ServiceError::Storage(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn deleted_file_surfaces_as_storage_error() -> Result<(), anyhow::Error> {
        let path = temp_path("vanished");
        let store = JsonVecStore::<u32>::new(&path).await?;
        tokio::fs::remove_file(&path).await?;

        assert!(matches!(store.load().await, Err(ServiceError::Storage(_))));
        let res = store.update(|items| { items.push(1); Ok(()) }).await;
        assert!(matches!(res, Err(ServiceError::Storage(_))));

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_updates_through_one_store_are_serialized() -> Result<(), anyhow::Error> {
        let path = temp_path("concurrent");
        let store = JsonVecStore::<u32>::new(&path).await?;

        let mut handles = Vec::new();
        for i in 0..16u32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.update(|items| { items.push(i); Ok(()) }).await
            }));
        }
        for h in handles {
            h.await??;
        }

        let mut items = store.load().await?;
        items.sort_unstable();
        assert_eq!(items, (0..16).collect::<Vec<_>>());

        let _ = tokio::fs::remove_dir_all(path.parent().unwrap()).await;
        Ok(())
    }
}
