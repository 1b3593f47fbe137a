//! Configuration module for Medika.

mod settings;

pub use settings::{AgentSettings, GeneralSettings, ServerSettings, Settings, StoreSettings};
