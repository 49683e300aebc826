//! REST API handlers

pub mod auth;
pub mod classify;
pub mod collector_requests;
pub mod health;
pub mod rewards;
pub mod submissions;
pub mod users;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::application::{
    ClassifierService, CollectorService, IdentityService, LedgerService, RewardService,
};
use crate::auth::JwtConfig;

/// Shared state for all REST handlers
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<IdentityService>,
    pub classifier: Arc<ClassifierService>,
    pub ledger: Arc<LedgerService>,
    pub collector: Arc<CollectorService>,
    pub rewards: Arc<RewardService>,
    pub jwt: JwtConfig,
    pub metrics: PrometheusHandle,
}
