pub mod shutdown;
pub mod types;

pub use shutdown::ShutdownSignal;
pub use types::{DomainError, DomainResult, PaginatedResult};
