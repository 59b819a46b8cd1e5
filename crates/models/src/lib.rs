//! Domain types for form submissions and the validation rules every stored
//! submission satisfies.

pub mod errors;
pub mod submission;
pub mod validation;

pub use submission::{Submission, SubmissionFields, SubmissionInput};
