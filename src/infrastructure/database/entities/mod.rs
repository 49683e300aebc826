//! Database entities module

pub mod collector_request;
pub mod redemption;
pub mod reward;
pub mod submission;
pub mod user;

pub use collector_request::Entity as CollectorRequest;
pub use redemption::Entity as Redemption;
pub use reward::Entity as Reward;
pub use submission::Entity as Submission;
pub use user::Entity as User;
