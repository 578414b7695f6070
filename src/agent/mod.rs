//! The agent seam: a persona with its tools, and the runtime that drives it.
//!
//! Deciding whether and which tools to call is the runtime's job. This crate
//! only describes the agent and binds an OpenAI-compatible endpoint to it.

pub mod openai;
pub mod persona;

use async_trait::async_trait;

use crate::tools::ToolSet;

pub use openai::OpenAiRuntime;

/// Name of the limerick persona
pub const LIMERICK_BOT: &str = "LimerickBot";

/// A persona together with the tools it may call
pub struct Agent {
    pub name: String,
    pub instructions: String,
    pub tools: ToolSet,
}

impl Agent {
    pub fn new<S: Into<String>>(name: S, instructions: S, tools: ToolSet) -> Self {
        Self {
            name: name.into(),
            instructions: instructions.into(),
            tools,
        }
    }

    /// The limerick persona, with instructions rendered from its tools
    #[must_use]
    pub fn limerick_bot(tools: ToolSet) -> Self {
        let instructions = persona::limerick_instructions(&tools.descriptors());
        Self {
            name: LIMERICK_BOT.to_string(),
            instructions,
            tools,
        }
    }
}

/// Runs one user turn against an agent, including any nested tool calls.
#[async_trait]
pub trait AgentRuntime: Send + Sync {
    /// Returns the agent's final text, or `None` when it produced nothing.
    async fn run(&self, agent: &Agent, input: &str) -> anyhow::Result<Option<String>>;
}
