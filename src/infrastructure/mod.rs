//! Infrastructure layer: persistence, detection backends, alternative storage

pub mod classifier;
pub mod database;
pub mod storage;

pub use classifier::{DetectionBackend, RawDetection, RemoteDetector};
pub use database::repositories::SeaOrmRepositoryProvider;
pub use database::{init_database, DatabaseConfig};
pub use storage::MemoryStore;
