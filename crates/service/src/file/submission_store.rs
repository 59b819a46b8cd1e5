use std::{path::PathBuf, sync::Arc};

use models::Submission;

use crate::errors::ServiceError;
use crate::storage::json_vec_store::JsonVecStore;
use crate::submissions::repository::{Mutation, SubmissionRepository};

/// File-backed submission collection, persisted as a JSON array.
#[derive(Clone)]
pub struct SubmissionFileStore {
    store: Arc<JsonVecStore<Submission>>,
}

impl SubmissionFileStore {
    /// Open the store at `path`. Creates an empty collection if the file is missing.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Arc<Self>, ServiceError> {
        let store = JsonVecStore::<Submission>::new(path).await?;
        Ok(Arc::new(Self { store }))
    }

    pub fn path(&self) -> &std::path::Path {
        self.store.path()
    }
}

#[async_trait::async_trait]
impl SubmissionRepository for SubmissionFileStore {
    async fn load_all(&self) -> Result<Vec<Submission>, ServiceError> {
        self.store.load().await
    }

    async fn save_all(&self, submissions: &[Submission]) -> Result<(), ServiceError> {
        self.store.save(submissions).await
    }

    async fn mutate(&self, mutation: Mutation) -> Result<Submission, ServiceError> {
        self.store.update(mutation).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use models::SubmissionFields;
    use uuid::Uuid;

    fn sample(name: &str) -> Submission {
        let fields = SubmissionFields {
            name: name.into(),
            email: format!("{}@example.com", name.to_lowercase()),
            phone: "1234567890".into(),
            github_link: format!("https://github.com/{}", name.to_lowercase()),
            stopwatch_time: "42".into(),
        };
        Submission::create(Uuid::new_v4(), fields, Utc::now())
    }

    #[tokio::test]
    async fn file_store_round_trips_through_disk() -> Result<(), anyhow::Error> {
        let tmp = std::env::temp_dir().join(format!("svc_submissions_{}.json", Uuid::new_v4()));
        let store = SubmissionFileStore::new(&tmp).await?;
        assert!(store.load_all().await?.is_empty());

        let alice = sample("Alice");
        store.save_all(std::slice::from_ref(&alice)).await?;

        let bob = sample("Bob");
        let pushed = bob.clone();
        let returned = store
            .mutate(Box::new(move |all: &mut Vec<Submission>| -> Result<Submission, ServiceError> {
                all.push(pushed.clone());
                Ok(pushed)
            }))
            .await?;
        assert_eq!(returned, bob);

        // reload store from disk to ensure persistence
        let reopened = SubmissionFileStore::new(&tmp).await?;
        assert_eq!(reopened.load_all().await?, vec![alice, bob]);

        // the file is a plain pretty-printed JSON array
        let raw = tokio::fs::read_to_string(reopened.path()).await?;
        assert!(raw.starts_with("[\n  {"));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
