//! Ollama provider — talks to a local Ollama daemon's native chat API.
//!
//! Sends the conversation plus the available-tools manifest to
//! `POST {base}/api/chat` (non-streaming) and classifies the reply as a
//! final answer or a batch of tool calls. The health probe hits
//! `GET {base}/api/tags` and checks whether the configured model family
//! is pulled.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use wayfarer_core::error::ProviderError;
use wayfarer_core::message::{Message, Role};
use wayfarer_core::provider::{HealthReport, ModelReply, Provider, ProviderRequest};
use wayfarer_core::tool::ToolCall;

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// A provider backed by Ollama's native HTTP API.
pub struct OllamaProvider {
    base_url: String,
    /// Model checked by the health probe (the chat path takes the model
    /// from each request).
    model: String,
    client: reqwest::Client,
}

impl OllamaProvider {
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Convert our Message types to Ollama chat format.
    fn to_api_messages(messages: &[Message]) -> Vec<ApiMessage> {
        messages
            .iter()
            .map(|m| ApiMessage {
                role: match m.role {
                    Role::System => "system".into(),
                    Role::User => "user".into(),
                    Role::Assistant => "assistant".into(),
                    Role::Tool => "tool".into(),
                },
                content: m.content.clone(),
                tool_calls: if m.tool_calls.is_empty() {
                    None
                } else {
                    Some(
                        m.tool_calls
                            .iter()
                            .map(|tc| ApiToolCall {
                                id: Some(tc.id.clone()),
                                function: ApiFunction {
                                    name: tc.name.clone(),
                                    arguments: tc.arguments.clone(),
                                },
                            })
                            .collect(),
                    )
                },
                tool_call_id: m.tool_call_id.clone(),
            })
            .collect()
    }

    /// Classify a parsed backend reply into answer vs tool calls.
    fn classify(response: ApiChatResponse) -> Result<ModelReply, ProviderError> {
        let message = response.message.ok_or_else(|| ProviderError::Protocol {
            status_code: 200,
            message: "Response is missing the message field".into(),
        })?;

        let tool_calls = message.tool_calls.unwrap_or_default();
        if tool_calls.is_empty() {
            return Ok(ModelReply::Answer {
                text: message.content.unwrap_or_default(),
                eval_count: response.eval_count,
                eval_duration: response.eval_duration,
            });
        }

        let calls = tool_calls
            .into_iter()
            .map(|tc| ToolCall {
                // Ollama usually omits call ids; mint one so correlation
                // to the tool-result message always works
                id: tc
                    .id
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| format!("call_{}", uuid::Uuid::new_v4())),
                name: tc.function.name,
                arguments: tc.function.arguments,
            })
            .collect();

        Ok(ModelReply::ToolCalls {
            content: message.content.unwrap_or_default(),
            calls,
        })
    }
}

#[async_trait]
impl Provider for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    async fn chat(&self, request: ProviderRequest) -> Result<ModelReply, ProviderError> {
        let url = format!("{}/api/chat", self.base_url);

        let body = ApiChatRequest {
            model: request.model.clone(),
            messages: Self::to_api_messages(&request.messages),
            tools: request
                .tools
                .iter()
                .map(|t| ApiToolDefinition {
                    r#type: "function".into(),
                    function: ApiToolSpec {
                        name: t.name.clone(),
                        description: t.description.clone(),
                        parameters: t.parameters.clone(),
                    },
                })
                .collect(),
            stream: false,
        };

        debug!(
            model = %request.model,
            messages = body.messages.len(),
            tools = body.tools.len(),
            "Sending chat request"
        );

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProviderError::Unavailable(e.to_string()))?;

        let status = response.status().as_u16();
        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Ollama returned error");
            return Err(ProviderError::Protocol {
                status_code: status,
                message: error_body,
            });
        }

        let api_response: ApiChatResponse =
            response.json().await.map_err(|e| ProviderError::Protocol {
                status_code: 200,
                message: format!("Failed to parse response: {e}"),
            })?;

        Self::classify(api_response)
    }

    async fn health_check(&self) -> Result<HealthReport, ProviderError> {
        let url = format!("{}/api/tags", self.base_url);

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                return Ok(HealthReport {
                    healthy: false,
                    model_available: false,
                    detail: Some(e.to_string()),
                });
            }
        };

        if !response.status().is_success() {
            return Ok(HealthReport {
                healthy: false,
                model_available: false,
                detail: Some(format!("Ollama responded with {}", response.status())),
            });
        }

        let tags: ApiTagsResponse = response.json().await.map_err(|e| ProviderError::Protocol {
            status_code: 200,
            message: format!("Failed to parse tags response: {e}"),
        })?;

        // Match on the model family, ignoring the size tag
        let family = self.model.split(':').next().unwrap_or(&self.model);
        let names: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        let model_available = names.iter().any(|n| n.contains(family));

        Ok(HealthReport {
            healthy: true,
            model_available,
            detail: Some(names.join(", ")),
        })
    }
}

// --- Ollama API types (internal) ---

#[derive(Debug, Serialize)]
struct ApiChatRequest {
    model: String,
    messages: Vec<ApiMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<ApiToolDefinition>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiMessage {
    role: String,
    content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<ApiToolCall>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiToolCall {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    function: ApiFunction,
}

#[derive(Debug, Serialize, Deserialize)]
struct ApiFunction {
    name: String,
    /// Ollama sends arguments as a JSON object, not a string
    arguments: Value,
}

#[derive(Debug, Serialize)]
struct ApiToolDefinition {
    r#type: String,
    function: ApiToolSpec,
}

#[derive(Debug, Serialize)]
struct ApiToolSpec {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct ApiChatResponse {
    #[serde(default)]
    message: Option<ApiResponseMessage>,
    #[serde(default)]
    eval_count: Option<u64>,
    #[serde(default)]
    eval_duration: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ApiResponseMessage {
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    tool_calls: Option<Vec<ApiToolCall>>,
}

#[derive(Debug, Deserialize)]
struct ApiTagsResponse {
    #[serde(default)]
    models: Vec<ApiModelTag>,
}

#[derive(Debug, Deserialize)]
struct ApiModelTag {
    name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_trailing_slash() {
        let provider = OllamaProvider::new("http://localhost:11434/", "qwen3:8b");
        assert_eq!(provider.base_url(), "http://localhost:11434");
    }

    #[test]
    fn message_conversion_roles() {
        let messages = vec![
            Message::system("Be a travel concierge"),
            Message::user("Find me a flight"),
            Message::tool_result("call_1", r#"{"success":true}"#),
        ];
        let api = OllamaProvider::to_api_messages(&messages);
        assert_eq!(api[0].role, "system");
        assert_eq!(api[1].role, "user");
        assert_eq!(api[2].role, "tool");
        assert_eq!(api[2].tool_call_id.as_deref(), Some("call_1"));
    }

    #[test]
    fn message_conversion_with_tool_calls() {
        let msg = Message::assistant_with_tool_calls(
            "",
            vec![ToolCall {
                id: "call_1".into(),
                name: "search_flights".into(),
                arguments: serde_json::json!({"origin": "NYC"}),
            }],
        );
        let api = OllamaProvider::to_api_messages(&[msg]);
        let tc = api[0].tool_calls.as_ref().unwrap();
        assert_eq!(tc[0].function.name, "search_flights");
        assert_eq!(tc[0].function.arguments["origin"], "NYC");
    }

    #[test]
    fn classify_plain_answer() {
        let data = r#"{"message":{"content":"Enjoy your trip!"},"eval_count":42,"eval_duration":123456}"#;
        let parsed: ApiChatResponse = serde_json::from_str(data).unwrap();
        match OllamaProvider::classify(parsed).unwrap() {
            ModelReply::Answer {
                text, eval_count, ..
            } => {
                assert_eq!(text, "Enjoy your trip!");
                assert_eq!(eval_count, Some(42));
            }
            other => panic!("expected answer, got {other:?}"),
        }
    }

    #[test]
    fn classify_tool_calls_and_mints_missing_ids() {
        let data = r#"{"message":{"content":"","tool_calls":[
            {"function":{"name":"search_flights","arguments":{"origin":"NYC","destination":"DXB"}}},
            {"id":"call_x","function":{"name":"search_hotels","arguments":{"city":"Dubai"}}}
        ]}}"#;
        let parsed: ApiChatResponse = serde_json::from_str(data).unwrap();
        match OllamaProvider::classify(parsed).unwrap() {
            ModelReply::ToolCalls { calls, .. } => {
                assert_eq!(calls.len(), 2);
                assert!(calls[0].id.starts_with("call_"));
                assert_eq!(calls[1].id, "call_x");
                assert_eq!(calls[0].arguments["destination"], "DXB");
            }
            other => panic!("expected tool calls, got {other:?}"),
        }
    }

    #[test]
    fn classify_missing_message_is_protocol_error() {
        let parsed: ApiChatResponse = serde_json::from_str("{}").unwrap();
        let err = OllamaProvider::classify(parsed).unwrap_err();
        assert!(matches!(err, ProviderError::Protocol { .. }));
    }

    #[test]
    fn tool_definitions_serialize_in_function_wrapper() {
        let def = ApiToolDefinition {
            r#type: "function".into(),
            function: ApiToolSpec {
                name: "currency_exchange".into(),
                description: "Convert currency".into(),
                parameters: serde_json::json!({"type": "object"}),
            },
        };
        let json = serde_json::to_value(&def).unwrap();
        assert_eq!(json["type"], "function");
        assert_eq!(json["function"]["name"], "currency_exchange");
    }
}
