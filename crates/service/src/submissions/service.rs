use std::sync::Arc;

use chrono::Utc;
use models::{Submission, SubmissionInput};
use tracing::info;
use uuid::Uuid;

use crate::errors::ServiceError;
use crate::submissions::repository::SubmissionRepository;

/// Submission operations over a position-addressed collection.
///
/// Positions are offsets into the stored sequence at the moment of the call; a
/// delete shifts every later submission down by one, so callers must re-read
/// positions after any delete.
#[derive(Clone)]
pub struct SubmissionService {
    repo: Arc<dyn SubmissionRepository>,
}

impl SubmissionService {
    pub fn new(repo: Arc<dyn SubmissionRepository>) -> Self {
        Self { repo }
    }

    /// Validate and append a new submission.
    pub async fn submit(&self, input: SubmissionInput) -> Result<Submission, ServiceError> {
        let fields = input.validate()?;
        let submission = Submission::create(Uuid::new_v4(), fields, Utc::now());
        let created = self
            .repo
            .mutate(Box::new(move |all: &mut Vec<Submission>| -> Result<Submission, ServiceError> {
                all.push(submission.clone());
                Ok(submission)
            }))
            .await?;
        info!(id = %created.id, "submission created");
        Ok(created)
    }

    pub async fn read(&self, position: Option<usize>) -> Result<Submission, ServiceError> {
        let all = self.repo.load_all().await?;
        position
            .and_then(|i| all.into_iter().nth(i))
            .ok_or(ServiceError::NotFound)
    }

    /// Remove the submission at `position`; later submissions move down by one.
    pub async fn delete(&self, position: Option<usize>) -> Result<Submission, ServiceError> {
        let removed = self
            .repo
            .mutate(Box::new(move |all: &mut Vec<Submission>| -> Result<Submission, ServiceError> {
                match position {
                    Some(i) if i < all.len() => Ok(all.remove(i)),
                    _ => Err(ServiceError::NotFound),
                }
            }))
            .await?;
        info!(id = %removed.id, "submission deleted");
        Ok(removed)
    }

    /// Replace the mutable fields of the submission at `position`.
    /// Validation runs before the collection is touched.
    pub async fn edit(
        &self,
        position: Option<usize>,
        input: SubmissionInput,
    ) -> Result<Submission, ServiceError> {
        let fields = input.validate()?;
        let now = Utc::now();
        let updated = self
            .repo
            .mutate(Box::new(move |all: &mut Vec<Submission>| -> Result<Submission, ServiceError> {
                let target = position
                    .and_then(|i| all.get_mut(i))
                    .ok_or(ServiceError::NotFound)?;
                target.apply(fields, now);
                Ok(target.clone())
            }))
            .await?;
        info!(id = %updated.id, "submission updated");
        Ok(updated)
    }

    /// Exact, case-sensitive match on `email`. No query matches nothing.
    pub async fn search_by_email(&self, email: Option<&str>) -> Result<Vec<Submission>, ServiceError> {
        let all = self.repo.load_all().await?;
        let Some(email) = email else {
            return Ok(Vec::new());
        };
        Ok(all.into_iter().filter(|s| s.email == email).collect())
    }
}
