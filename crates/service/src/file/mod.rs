pub mod submission_store;
