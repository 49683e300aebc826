//! Collector role request aggregate

pub mod model;
pub mod repository;

pub use model::{CollectorRequest, PendingRequest, RequestStatus};
pub use repository::CollectorRequestRepository;
