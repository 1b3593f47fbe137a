//! CLI module for Medika.

pub mod commands;
mod output;

pub use output::Output;

use clap::{Parser, Subcommand};

/// Medika - Hospital Operations Assistant
///
/// Routes free-text requests to specialized sub-agents for patient data,
/// scheduling, medical information, and administration.
#[derive(Parser, Debug)]
#[command(name = "medika")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start an interactive chat session with the central agent
    Chat {
        /// LLM model to use for routing
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Submit a single request and print the agent's response
    Ask {
        /// The request text
        text: String,

        /// LLM model to use for routing
        #[arg(short, long)]
        model: Option<String>,
    },

    /// Run the deterministic fallback router only and show the routed call
    Route {
        /// The request text to classify
        text: String,
    },

    /// List registered patients
    Patients,

    /// List doctors on staff
    Doctors,

    /// Add a doctor directly, bypassing free-text classification
    AddDoctor {
        /// Full name including credentials (e.g. "Dr. X, Sp.PD")
        name: String,

        /// Medical specialty
        specialty: String,

        /// Free-text schedule description (e.g. "Mon-Fri 09:00-14:00")
        schedule: String,
    },

    /// Show dashboard statistics
    Stats,

    /// Start the HTTP API server for the dashboard UI
    Serve {
        /// Host to bind to (overrides config)
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to (overrides config)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Set a configuration value
    Set {
        /// Configuration key (e.g. "agent.model")
        key: String,
        /// Configuration value
        value: String,
    },

    /// Open configuration file in editor
    Edit,

    /// Show configuration file path
    Path,
}
