//! Database migrations module

pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_users;
mod m20250301_000002_create_waste_submissions;
mod m20250301_000003_create_collector_requests;
mod m20250301_000004_create_rewards;
mod m20250301_000005_create_reward_redemptions;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_users::Migration),
            Box::new(m20250301_000002_create_waste_submissions::Migration),
            Box::new(m20250301_000003_create_collector_requests::Migration),
            Box::new(m20250301_000004_create_rewards::Migration),
            Box::new(m20250301_000005_create_reward_redemptions::Migration),
        ]
    }
}
