//! Service layer for form submissions.
//! - `storage`: whole-file JSON persistence for ordered collections.
//! - `file`: the file-backed submission repository.
//! - `submissions`: submit/read/delete/edit/search over the repository.

pub mod errors;
pub mod file;
pub mod position;
pub mod storage;
pub mod submissions;
