//! Agent runtime backed by an OpenAI-compatible chat-completions endpoint.
//!
//! Non-streaming. Tool calls requested by the model are executed one after the
//! other and their results sent back, until the model answers without tool
//! calls or the turn limit is reached.

use anyhow::{Context, Result, anyhow, bail};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{Agent, AgentRuntime};
use crate::config::ModelConfig;

/// Runtime that talks to an OpenAI-compatible server (OpenAI, LM Studio, Ollama, ...)
#[derive(Debug, Clone)]
pub struct OpenAiRuntime {
    client: Client,
    config: ModelConfig,
}

impl OpenAiRuntime {
    pub fn new(config: ModelConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }

    async fn complete(
        &self,
        request: &proto::ChatCompletionRequest<'_>,
    ) -> Result<proto::ResponseMessage> {
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(request)
            .send()
            .await
            .with_context(|| "Model request failed")?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            bail!("Model endpoint returned {status}: {body}");
        }

        let completion: proto::ChatCompletionResponse = response
            .json()
            .await
            .with_context(|| "Failed to parse model response")?;

        completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message)
            .ok_or_else(|| anyhow!("Model returned no choices"))
    }
}

#[async_trait]
impl AgentRuntime for OpenAiRuntime {
    #[instrument(skip_all, fields(agent = %agent.name))]
    async fn run(&self, agent: &Agent, input: &str) -> Result<Option<String>> {
        let tools: Vec<proto::Tool> = agent
            .tools
            .descriptors()
            .into_iter()
            .map(proto::Tool::from)
            .collect();
        let mut messages = vec![
            proto::Message::System {
                content: agent.instructions.clone(),
            },
            proto::Message::User {
                content: input.to_string(),
            },
        ];

        for turn in 1..=self.config.max_turns {
            debug!("Model call {} of at most {}", turn, self.config.max_turns);
            let request = proto::ChatCompletionRequest {
                model: &self.config.name,
                messages: &messages,
                tools: &tools,
            };
            let reply = self.complete(&request).await?;

            let tool_calls = reply.tool_calls.unwrap_or_default();
            if tool_calls.is_empty() {
                return Ok(reply.content.filter(|text| !text.trim().is_empty()));
            }

            messages.push(proto::Message::Assistant {
                content: reply.content,
                tool_calls: Some(tool_calls.clone()),
            });

            for call in tool_calls {
                info!("Calling tool {}", call.function.name);
                let arguments = parse_arguments(&call.function.arguments).with_context(|| {
                    format!("Invalid arguments for tool {}", call.function.name)
                })?;
                // Tool errors end the turn; the chat loop reports them.
                let result = agent.tools.call(&call.function.name, arguments).await?;
                messages.push(proto::Message::Tool {
                    tool_call_id: call.id,
                    content: result.to_string(),
                });
            }
        }

        bail!("Max turns ({}) exceeded", self.config.max_turns)
    }
}

fn parse_arguments(raw: &str) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }
    Ok(serde_json::from_str(raw)?)
}

/// Wire types of the chat-completions API
mod proto {
    use serde::{Deserialize, Serialize};
    use serde_json::Value;

    use crate::tools::ToolDescriptor;

    // ------------------------
    // Types sent to the server
    // ------------------------

    #[derive(Debug, Serialize)]
    pub struct ChatCompletionRequest<'a> {
        pub model: &'a str,
        pub messages: &'a [Message],
        #[serde(skip_serializing_if = "no_tools")]
        pub tools: &'a [Tool],
    }

    fn no_tools(tools: &&[Tool]) -> bool {
        tools.is_empty()
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    #[serde(tag = "role", rename_all = "lowercase")]
    pub enum Message {
        System {
            content: String,
        },
        User {
            content: String,
        },
        Assistant {
            content: Option<String>,
            #[serde(skip_serializing_if = "Option::is_none")]
            tool_calls: Option<Vec<ToolCall>>,
        },
        Tool {
            tool_call_id: String,
            content: String,
        },
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct FunctionTool {
        pub name: String,
        pub description: String,
        pub parameters: Value,
    }

    #[derive(Clone, Debug, PartialEq, Serialize)]
    pub struct Tool {
        pub r#type: &'static str,
        pub function: FunctionTool,
    }

    impl From<ToolDescriptor> for Tool {
        fn from(descriptor: ToolDescriptor) -> Self {
            Tool {
                r#type: "function",
                function: FunctionTool {
                    name: descriptor.name,
                    description: descriptor.description,
                    parameters: descriptor.parameters,
                },
            }
        }
    }

    // ------------------------------
    // Types received from the server
    // ------------------------------

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct FunctionCall {
        pub name: String,
        #[serde(default)]
        pub arguments: String,
    }

    #[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
    pub struct ToolCall {
        pub id: String,
        #[serde(default = "function_type")]
        pub r#type: String,
        pub function: FunctionCall,
    }

    fn function_type() -> String {
        "function".to_string()
    }

    #[derive(Debug, Deserialize)]
    pub struct ChatCompletionResponse {
        pub choices: Vec<Choice>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Choice {
        pub message: ResponseMessage,
    }

    #[derive(Debug, Deserialize)]
    pub struct ResponseMessage {
        pub content: Option<String>,
        pub tool_calls: Option<Vec<ToolCall>>,
    }
}
