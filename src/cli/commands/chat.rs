//! Interactive chat command.

use super::build_store;
use crate::agent::{AgentSession, ToolExecutor};
use crate::cli::Output;
use crate::config::Settings;
use anyhow::Result;
use console::style;
use std::io::{self, BufRead, Write};

/// Run the interactive chat command.
pub async fn run_chat(model: Option<String>, settings: Settings) -> Result<()> {
    let store = build_store(&settings);
    let executor = ToolExecutor::new(store);

    let mut agent_settings = settings.agent.clone();
    if let Some(m) = model {
        agent_settings.model = m;
    }
    let mut session = AgentSession::new(executor, &agent_settings);

    println!("\n{}", style("Medika Chat").bold().cyan());
    println!(
        "{}\n",
        style("Describe what you need, or 'exit' to quit. Use 'clear' to reset the conversation.")
            .dim()
    );

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{} ", style("You:").green().bold());
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let input = input.trim();

        if input.is_empty() {
            continue;
        }

        if input.eq_ignore_ascii_case("exit") || input.eq_ignore_ascii_case("quit") {
            Output::info("Goodbye!");
            break;
        }

        if input.eq_ignore_ascii_case("clear") {
            session.reset()?;
            Output::info("Conversation history cleared.");
            continue;
        }

        let spinner = Output::spinner("Routing request...");
        let turn = session.submit(input).await;
        spinner.finish_and_clear();

        match turn {
            Ok(turn) => {
                println!("\n{} {}\n", style("Medika:").cyan().bold(), turn.text);
                if let Some(invocation) = &turn.tool_call {
                    Output::tool_trace(&invocation.name, &invocation.arguments);
                    println!();
                }
            }
            Err(e) => {
                Output::error(&format!("Error: {}", e));
            }
        }
    }

    Ok(())
}
