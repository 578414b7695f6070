//! Conversational loop
//!
//! Reads a line, runs one agent turn, prints the reply, repeats until the user
//! types `exit` or `quit`. Failures during a turn never end the loop: they are
//! turned into an in-persona apology.

use std::io::{BufRead, Write};

use tracing::{error, info};

use crate::agent::{Agent, AgentRuntime};
use crate::logging::theme;

/// Reply used when the runtime finishes without any text
pub const EMPTY_REPLY: &str = "There once was a bot who would try,\n\
To craft you a verse on the fly,\n\
But something went wrong,\n\
And it failed at its song,\n\
Leaving nothing but this sad reply.";

/// Apology limerick embedding the error message verbatim
#[must_use]
pub fn apology(message: &str) -> String {
    format!(
        "A limerick bot with some flaws,\n\
         Tried running but hit some roadblocks,\n\
         The error it met,\n\
         Made the system upset,\n\
         With this message: \"{message}\"."
    )
}

/// `exit` or `quit`, ignoring case and surrounding whitespace
#[must_use]
pub fn is_exit_command(input: &str) -> bool {
    let command = input.trim();
    command.eq_ignore_ascii_case("exit") || command.eq_ignore_ascii_case("quit")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopState {
    AwaitingInput,
    Processing,
}

/// One agent bound to a runtime, driven turn by turn
pub struct ChatSession<R: AgentRuntime> {
    agent: Agent,
    runtime: R,
    state: LoopState,
}

impl<R: AgentRuntime> ChatSession<R> {
    pub fn new(agent: Agent, runtime: R) -> Self {
        Self {
            agent,
            runtime,
            state: LoopState::AwaitingInput,
        }
    }

    #[must_use]
    pub fn state(&self) -> LoopState {
        self.state
    }

    #[must_use]
    pub fn agent(&self) -> &Agent {
        &self.agent
    }

    /// Runs exactly one agent turn and returns the text to show the user.
    pub async fn process_input(&self, input: &str) -> String {
        info!("Processing input...");
        match self.runtime.run(&self.agent, input).await {
            Ok(Some(reply)) if !reply.trim().is_empty() => reply,
            Ok(_) => EMPTY_REPLY.to_string(),
            Err(e) => {
                let message = format!("{e:#}");
                error!("Error: {}", message);
                apology(&message)
            }
        }
    }

    /// Runs the read-eval-print loop until an exit command or end of input.
    ///
    /// Only console failures end the loop early, as [`LimerickError::Io`].
    ///
    /// [`LimerickError::Io`]: crate::LimerickError::Io
    pub async fn run<I: BufRead, O: Write>(&mut self, mut input: I, mut output: O) -> crate::Result<()> {
        writeln!(
            output,
            "\n🎭 {}",
            theme::banner(&format!("Welcome to {}!", self.agent.name))
        )?;
        writeln!(
            output,
            "   {}",
            theme::info("Ask about weather, request interesting facts, or just chat!")
        )?;
        writeln!(output, "   {}\n", theme::info("Type 'exit' to quit."))?;

        loop {
            self.state = LoopState::AwaitingInput;
            write!(output, "🗨️  You: ")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                return Ok(());
            }

            if is_exit_command(&line) {
                writeln!(output, "👋 {}", theme::bold("Goodbye!"))?;
                return Ok(());
            }

            self.state = LoopState::Processing;
            let reply = self.process_input(line.trim_end_matches(['\r', '\n'])).await;
            writeln!(
                output,
                "\n🤖 {}\n{}\n",
                theme::success(&format!("{}:", self.agent.name)),
                reply
            )?;
        }
    }
}
