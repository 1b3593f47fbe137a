//! Medika - Hospital Operations Assistant
//!
//! A CLI assistant that routes free-text operator requests to one of four
//! specialized capability handlers (patient records, scheduling, medical
//! information, administration) and executes them against an in-memory
//! hospital data store.
//!
//! # Overview
//!
//! Medika lets you:
//! - Chat with a central agent that delegates to capability "sub-agents"
//! - Register patients and doctors, check care status and schedules
//! - Fall back to a deterministic keyword router when no model is reachable
//! - Inspect the store and dashboard statistics from the command line
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `store` - Hospital data model and in-memory store
//! - `agent` - Tool schemas, executor, fallback router, session manager
//! - `cli` - Command-line interface and HTTP API
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use medika::agent::{AgentSession, ToolExecutor};
//! use medika::config::Settings;
//! use medika::store::MemoryStore;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::load()?;
//!     let store = Arc::new(MemoryStore::seeded());
//!     let executor = ToolExecutor::new(store);
//!     let mut session = AgentSession::new(executor, &settings.agent);
//!
//!     let turn = session.submit("Siapa dokter yang praktek hari ini?").await?;
//!     println!("{}", turn.text);
//!
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod openai;
pub mod store;

pub use error::{MedikaError, Result};
