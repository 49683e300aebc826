//! Object-detection backends

pub mod remote;

pub use remote::{DetectionBackend, RawDetection, RemoteDetector};
