use async_trait::async_trait;
use models::Submission;

use crate::errors::ServiceError;

/// A change applied to the whole collection under the repository's write span.
/// Returning `Err` aborts the write.
pub type Mutation =
    Box<dyn FnOnce(&mut Vec<Submission>) -> Result<Submission, ServiceError> + Send>;

/// Trait abstraction for submission persistence.
/// The collection is always loaded and saved as a whole; positions are offsets into it.
#[async_trait]
pub trait SubmissionRepository: Send + Sync {
    async fn load_all(&self) -> Result<Vec<Submission>, ServiceError>;
    async fn save_all(&self, submissions: &[Submission]) -> Result<(), ServiceError>;
    /// Load, apply `mutation`, and persist if it succeeded; returns the submission it yielded.
    async fn mutate(&self, mutation: Mutation) -> Result<Submission, ServiceError>;
}
