//! Waste submission aggregate

pub mod model;
pub mod repository;

pub use model::WasteSubmission;
pub use repository::{Committed, NewSubmission, SubmissionRepository};
