//! Route command: inspect the deterministic fallback classification.

use crate::agent::classify;
use crate::cli::Output;
use anyhow::Result;

/// Run the route command. Classification only; nothing is executed.
pub fn run_route(text: &str) -> Result<()> {
    match classify(text) {
        Some(route) => {
            Output::header("Routed");
            Output::kv("Capability", route.call.name());
            Output::kv(
                "Arguments",
                &serde_json::to_string_pretty(&route.call.arguments())?,
            );
            Output::kv("Lead-in", &route.lead_in);
        }
        None => {
            Output::info("No rule matched; the agent would ask for clarification.");
        }
    }

    Ok(())
}
