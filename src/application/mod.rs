//! Application layer: services orchestrating domain and infrastructure

pub mod classifier;
pub mod collector;
pub mod identity;
pub mod ledger;
pub mod locks;
pub mod rewards;

pub use classifier::ClassifierService;
pub use collector::CollectorService;
pub use identity::{AuthenticatedSession, IdentityService};
pub use ledger::{LedgerService, SubmitCommand};
pub use locks::UserLocks;
pub use rewards::RewardService;
