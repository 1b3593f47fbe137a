//! Agent session manager.
//!
//! Owns the conversation with the external model: submits user text, honors
//! a requested tool call, feeds the result back for a final narration, and
//! on any provider failure routes the same turn through the deterministic
//! fallback classifier so callers always get the same response shape.

use super::executor::ToolExecutor;
use super::fallback::classify;
use super::tools::tool_definitions;
use crate::config::AgentSettings;
use crate::error::{MedikaError, Result};
use crate::openai::create_client;
use async_openai::types::{
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

/// System directive fixing the router persona.
const SYSTEM_PROMPT: &str = r#"Role: You are the Hospital Management System, the central agent acting as an intelligent router.
Task: Analyze the user's request and delegate it to the most relevant sub-agent (tool).

Critical instructions:
1. Always pick exactly ONE most relevant function.
2. Extract the function-call parameters from the user's text.
3. If the request is ambiguous, ASK FOR CLARIFICATION; do not guess a function.
4. You are polite, professional, and deterministic."#;

/// Fixed reply when no capability matches on the fallback path.
const CLARIFICATION_TEXT: &str = "Sorry, I could not match that request to a hospital capability. \
    I can help with patient registration, care status, doctor schedules, appointments, \
    medical information, billing, and financial reports.";

/// Fixed reply when the model produces neither text nor a tool call.
const EMPTY_RESPONSE_TEXT: &str = "Sorry, I could not process that request.";

/// Record of a tool executed during a turn, attached for transparency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: Value,
    pub result: Value,
}

/// Outcome of one user turn.
///
/// `tool_call` is present exactly when a tool executed this turn, on either
/// routing path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentTurnResult {
    pub text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool_call: Option<ToolInvocation>,
}

/// Conversation session with the external model, with deterministic fallback.
pub struct AgentSession {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    temperature: f32,
    max_history: usize,
    executor: ToolExecutor,
    messages: Vec<ChatCompletionRequestMessage>,
}

impl AgentSession {
    /// Create a session. The conversation context is established lazily on
    /// the first `submit`, or eagerly via `initialize`.
    pub fn new(executor: ToolExecutor, settings: &AgentSettings) -> Self {
        Self {
            client: create_client(),
            model: settings.model.clone(),
            temperature: settings.temperature,
            max_history: settings.max_history,
            executor,
            messages: Vec::new(),
        }
    }

    /// Establish a fresh conversation context. Idempotent; safe to call
    /// repeatedly to reset the conversation.
    pub fn initialize(&mut self) -> Result<()> {
        let system_message = ChatCompletionRequestSystemMessageArgs::default()
            .content(SYSTEM_PROMPT)
            .build()
            .map_err(|e| MedikaError::Agent(e.to_string()))?;
        self.messages = vec![system_message.into()];
        Ok(())
    }

    /// Clear conversation history and reinitialize. Does not touch the store.
    pub fn reset(&mut self) -> Result<()> {
        self.initialize()
    }

    /// Process one user turn.
    ///
    /// The model path is tried first; any provider failure is logged and the
    /// turn is re-routed through the fallback classifier. Only store
    /// invariant violations propagate as errors.
    pub async fn submit(&mut self, user_text: &str) -> Result<AgentTurnResult> {
        if self.messages.is_empty() {
            self.initialize()?;
        }

        let checkpoint = self.messages.len();
        match self.try_model_turn(user_text).await {
            Ok(turn) => Ok(turn),
            Err(e) => {
                warn!("Provider failure, falling back to keyword router: {}", e);
                // Discard whatever this turn appended before failing.
                self.messages.truncate(checkpoint);
                self.fallback_turn(user_text).await
            }
        }
    }

    /// One turn over the external model path.
    async fn try_model_turn(&mut self, user_text: &str) -> Result<AgentTurnResult> {
        let user_message = ChatCompletionRequestUserMessageArgs::default()
            .content(user_text)
            .build()
            .map_err(|e| MedikaError::Agent(e.to_string()))?;
        self.messages.push(user_message.into());

        let response = self.request_completion().await?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| MedikaError::Agent("No response from model".to_string()))?;

        let mut invocation = None;

        let message = choice.message;
        // At most one tool call is honored per turn; the assistant message
        // is rebuilt with just the first so the transcript and the executed
        // work agree.
        if let Some(call) = message.tool_calls.as_ref().and_then(|calls| calls.first()).cloned() {
            let name = call.function.name.clone();
            let arguments = call.function.arguments.clone();

            info!("Routing to tool: {} with args: {}", name, arguments);
            let result = self.executor.execute_raw(&name, &arguments).await;

            let assistant_message = ChatCompletionRequestAssistantMessageArgs::default()
                .tool_calls(vec![call.clone()])
                .build()
                .map_err(|e| MedikaError::Agent(e.to_string()))?;
            self.messages.push(assistant_message.into());

            let tool_message = ChatCompletionRequestToolMessageArgs::default()
                .tool_call_id(&call.id)
                .content(result.to_string())
                .build()
                .map_err(|e| MedikaError::Agent(e.to_string()))?;
            self.messages.push(tool_message.into());

            invocation = Some(ToolInvocation {
                name,
                arguments: serde_json::from_str(&arguments)
                    .unwrap_or(Value::String(arguments)),
                result,
            });
        }

        let text = match &invocation {
            Some(_) => {
                // Final narration over the tool result.
                let response = self.request_completion().await?;
                let choice = response
                    .choices
                    .into_iter()
                    .next()
                    .ok_or_else(|| MedikaError::Agent("No response from model".to_string()))?;
                choice.message.content.unwrap_or_default()
            }
            None => message.content.unwrap_or_default(),
        };

        let text = if text.is_empty() {
            EMPTY_RESPONSE_TEXT.to_string()
        } else {
            text
        };

        let assistant_message = ChatCompletionRequestAssistantMessageArgs::default()
            .content(text.as_str())
            .build()
            .map_err(|e| MedikaError::Agent(e.to_string()))?;
        self.messages.push(assistant_message.into());
        self.trim_history();

        Ok(AgentTurnResult {
            text,
            tool_call: invocation,
        })
    }

    /// One completion request over the current history.
    async fn request_completion(
        &self,
    ) -> Result<async_openai::types::CreateChatCompletionResponse> {
        debug!("Requesting completion, {} messages", self.messages.len());
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(self.messages.clone())
            .tools(tool_definitions())
            .build()
            .map_err(|e| MedikaError::Agent(e.to_string()))?;

        self.client
            .chat()
            .create(request)
            .await
            .map_err(|e| MedikaError::OpenAI(format!("Routing API error: {}", e)))
    }

    /// One turn over the deterministic fallback path.
    ///
    /// A classification miss is a normal outcome, answered with the fixed
    /// clarification text and no tool call.
    async fn fallback_turn(&mut self, user_text: &str) -> Result<AgentTurnResult> {
        let Some(route) = classify(user_text) else {
            return Ok(AgentTurnResult {
                text: CLARIFICATION_TEXT.to_string(),
                tool_call: None,
            });
        };

        info!("Fallback routed to tool: {}", route.call.name());
        let result = self.executor.execute(&route.call).await?;
        let text = format!("{}\n\n{}", route.lead_in, summarize_result(&result));

        Ok(AgentTurnResult {
            text,
            tool_call: Some(ToolInvocation {
                name: route.call.name().to_string(),
                arguments: route.call.arguments(),
                result,
            }),
        })
    }

    /// Trim conversation history to keep it manageable.
    ///
    /// Limits below 2 leave no room for anything beyond the system message,
    /// so trimming is skipped rather than underflowing.
    fn trim_history(&mut self) {
        if self.max_history < 2 || self.messages.len() <= self.max_history {
            return;
        }
        // Keep system message (index 0) and last N-1 messages.
        let mut start = self.messages.len() - (self.max_history - 1);
        // A tool result is only valid directly after the assistant message
        // that requested it; if the cut would strand one at the front of
        // the window, drop it with its pair.
        while matches!(
            self.messages.get(start),
            Some(ChatCompletionRequestMessage::Tool(_))
        ) {
            start += 1;
        }
        let mut trimmed = vec![self.messages[0].clone()];
        trimmed.extend(self.messages[start..].iter().cloned());
        self.messages = trimmed;
    }
}

/// Pick the most relevant field of an execution result for narration:
/// an explicit message, then informational content, then a summary, then the
/// billing composite, then a compact JSON rendering.
fn summarize_result(result: &Value) -> String {
    if let Some(message) = result["message"].as_str() {
        return message.to_string();
    }
    if let Some(content) = result["content"].as_str() {
        return content.to_string();
    }
    if let Some(summary) = result["summary"].as_str() {
        return summary.to_string();
    }
    if let (Some(total), Some(status)) = (result["total"].as_str(), result["status"].as_str()) {
        return format!("Total: {}. Status: {}", total, status);
    }
    result.to_string()
}
