use thiserror::Error;

/// Field validation failures. `Display` is the client-facing message.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ModelError {
    #[error("All fields are required")]
    MissingFields,
    #[error("Invalid email format")]
    InvalidEmail,
    #[error("Phone number must be 10 digits long")]
    InvalidPhone,
    #[error("Invalid GitHub link")]
    InvalidGithubLink,
}
