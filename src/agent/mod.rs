//! Agent system: capability routing and dispatch.
//!
//! A central session routes each operator request to one of four capability
//! "sub-agents" (patient data, scheduling, medical information,
//! administration), primarily by delegating classification to an external
//! model via function calling, with a deterministic keyword router standing
//! in whenever the model path fails.

pub mod executor;
pub mod extract;
pub mod fallback;
mod session;
mod tools;

pub use executor::ToolExecutor;
pub use fallback::{classify, FallbackRoute};
pub use session::{AgentSession, AgentTurnResult, ToolInvocation};
pub use tools::{
    parse_tool_call, tool_definitions, AdminCategory, PatientAction, SchedulingService, ToolCall,
};
