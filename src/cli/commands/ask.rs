//! Single-turn ask command.

use super::build_store;
use crate::agent::{AgentSession, ToolExecutor};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;

/// Run the ask command: one request, one response.
pub async fn run_ask(text: &str, model: Option<String>, settings: Settings) -> Result<()> {
    let store = build_store(&settings);
    let executor = ToolExecutor::new(store);

    let mut agent_settings = settings.agent.clone();
    if let Some(m) = model {
        agent_settings.model = m;
    }
    let mut session = AgentSession::new(executor, &agent_settings);

    let spinner = Output::spinner("Routing request...");
    let turn = session.submit(text).await?;
    spinner.finish_and_clear();

    println!("{}", turn.text);

    if let Some(invocation) = &turn.tool_call {
        Output::header("Tool call");
        Output::kv("Capability", &invocation.name);
        Output::kv("Arguments", &invocation.arguments.to_string());
        Output::kv(
            "Result",
            &serde_json::to_string_pretty(&invocation.result)?,
        );
    }

    Ok(())
}
