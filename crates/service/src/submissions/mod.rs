pub mod repository;
pub mod service;

pub use repository::{Mutation, SubmissionRepository};
pub use service::SubmissionService;
