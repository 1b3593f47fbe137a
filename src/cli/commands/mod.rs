//! CLI command implementations.

mod ask;
mod chat;
mod config;
mod list;
mod register;
mod route;
mod serve;
mod stats;

pub use ask::run_ask;
pub use chat::run_chat;
pub use config::run_config;
pub use list::{run_doctors, run_patients};
pub use register::run_add_doctor;
pub use route::run_route;
pub use serve::run_serve;
pub use stats::run_stats;

use crate::config::Settings;
use crate::store::{HospitalStore, MemoryStore};
use std::sync::Arc;

/// Build the in-memory store per configuration.
///
/// Each invocation gets its own store; there is no persistence across runs.
fn build_store(settings: &Settings) -> Arc<dyn HospitalStore> {
    if settings.store.seed {
        Arc::new(MemoryStore::seeded())
    } else {
        Arc::new(MemoryStore::new())
    }
}
