//! The chat orchestration loop.
//!
//! Drives the model backend until it produces a final answer, executing
//! requested tools between round-trips. Every significant action becomes
//! a trace entry; tool failures are reported back to the model instead of
//! aborting; the iteration budget bounds the number of round-trips.

use std::sync::Arc;
use std::time::Instant;

use serde_json::json;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use wayfarer_core::error::Error;
use wayfarer_core::event::{EventSink, NullSink, TraceEntry, TraceKind};
use wayfarer_core::message::Message;
use wayfarer_core::provider::{ModelReply, Provider, ProviderRequest};
use wayfarer_core::tool::ToolRegistry;
use wayfarer_protocol::{tool_call_error, tool_call_request, tool_call_response};

use crate::stats::SessionStats;
use crate::trace::TraceRecorder;

/// Default cap on model round-trips per chat request.
pub const DEFAULT_MAX_ITERATIONS: u32 = 8;

const BUDGET_EXHAUSTED_MESSAGE: &str = "I apologize, but I reached the maximum number of tool iterations. Please try a simpler request.";

/// How a chat request ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Termination {
    /// The model produced a final answer.
    Done,
    /// The backend failed; the message carries an apology with the reason.
    Failed,
    /// The iteration budget ran out before the model answered.
    BudgetExhausted,
}

/// The result of one chat request through the loop.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The final assistant message shown to the user
    pub message: Message,

    pub termination: Termination,

    /// Model round-trips consumed (always <= the configured cap)
    pub iterations_used: u32,

    /// Tool dispatches across all iterations
    pub tool_call_count: u32,

    /// Summed tool wall time
    pub total_tool_duration_ms: u64,

    /// Backend eval metadata from the final answer, when reported
    pub eval_count: Option<u64>,
    pub eval_duration: Option<u64>,

    /// The full event log, in chronological order
    pub trace: Vec<TraceEntry>,
}

impl ChatOutcome {
    pub fn failed(&self) -> bool {
        self.termination != Termination::Done
    }
}

/// The orchestration loop: model calls and tool execution for one
/// concierge conversation turn.
pub struct ChatLoop {
    provider: Arc<dyn Provider>,
    model: String,
    system_prompt: String,
    tools: Arc<ToolRegistry>,
    max_iterations: u32,
    sink: Arc<dyn EventSink>,
    stats: Arc<SessionStats>,
}

impl ChatLoop {
    pub fn new(
        provider: Arc<dyn Provider>,
        model: impl Into<String>,
        system_prompt: impl Into<String>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            model: model.into(),
            system_prompt: system_prompt.into(),
            tools,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            sink: Arc::new(NullSink),
            stats: Arc::new(SessionStats::new()),
        }
    }

    /// Set the maximum number of model round-trips per request.
    pub fn with_max_iterations(mut self, max: u32) -> Self {
        self.max_iterations = max;
        self
    }

    /// Mirror trace entries to a live sink as they are produced.
    pub fn with_sink(mut self, sink: Arc<dyn EventSink>) -> Self {
        self.sink = sink;
        self
    }

    /// Share a session stats aggregator across requests.
    pub fn with_stats(mut self, stats: Arc<SessionStats>) -> Self {
        self.stats = stats;
        self
    }

    /// Process a chat request to completion.
    pub async fn process(&self, history: Vec<Message>) -> Result<ChatOutcome, Error> {
        self.process_with_cancel(history, CancellationToken::new())
            .await
    }

    /// Process a chat request, aborting at the next suspension point if
    /// the token fires. On cancellation an in-flight tool dispatch is
    /// left to finish on its own task; nothing further is emitted.
    pub async fn process_with_cancel(
        &self,
        history: Vec<Message>,
        token: CancellationToken,
    ) -> Result<ChatOutcome, Error> {
        info!(messages = history.len(), model = %self.model, "Processing chat request");

        let mut conversation = Vec::with_capacity(history.len() + 1);
        conversation.push(Message::system(&self.system_prompt));
        conversation.extend(history);

        let mut recorder = TraceRecorder::new(self.sink.clone());
        let definitions = self.tools.definitions();
        let manifest: Vec<&str> = definitions.iter().map(|d| d.name.as_str()).collect();

        recorder.record(
            TraceKind::System,
            "Session initialized",
            json!({
                "model": self.model,
                "tools": manifest,
                "maxIterations": self.max_iterations,
            }),
        );

        let mut iterations = 0u32;
        let mut tool_call_count = 0u32;
        let mut total_tool_duration_ms = 0u64;

        while iterations < self.max_iterations {
            iterations += 1;
            debug!(iteration = iterations, "Chat loop iteration");

            recorder.record(
                TraceKind::Request,
                format!("Ollama API call (iteration {iterations})"),
                json!({
                    "model": self.model,
                    "iteration": iterations,
                    "messages": conversation
                        .iter()
                        .map(|m| json!({"role": m.role, "contentLength": m.content.len()}))
                        .collect::<Vec<_>>(),
                    "tools": manifest,
                }),
            );

            let request = ProviderRequest {
                model: self.model.clone(),
                messages: conversation.clone(),
                tools: definitions.clone(),
            };

            let started = Instant::now();
            let reply = tokio::select! {
                biased;
                _ = token.cancelled() => return Err(Error::Cancelled),
                reply = self.provider.chat(request) => reply,
            };
            let elapsed_ms = started.elapsed().as_millis() as u64;

            let reply = match reply {
                Ok(reply) => {
                    self.stats.record_api_call(elapsed_ms);
                    reply
                }
                Err(e) => {
                    warn!(iteration = iterations, error = %e, "Model backend call failed");
                    recorder.record(
                        TraceKind::Error,
                        format!("Error: {e}"),
                        json!({"iteration": iterations, "error": e.to_string()}),
                    );

                    let message = Message::assistant(format!(
                        "I apologize, but I encountered an error: {e}. Please try again or check if Ollama is running with the {} model.",
                        self.model
                    ));
                    conversation.push(message.clone());
                    return Ok(ChatOutcome {
                        message,
                        termination: Termination::Failed,
                        iterations_used: iterations,
                        tool_call_count,
                        total_tool_duration_ms,
                        eval_count: None,
                        eval_duration: None,
                        trace: recorder.into_entries(),
                    });
                }
            };

            match reply {
                ModelReply::Answer {
                    text,
                    eval_count,
                    eval_duration,
                } => {
                    self.stats.add_estimated_tokens(text.len());
                    recorder.record(
                        TraceKind::Response,
                        "Final response generated",
                        json!({
                            "iteration": iterations,
                            "contentLength": text.len(),
                            "eval_count": eval_count,
                            "eval_duration": eval_duration,
                        }),
                    );

                    let message = Message::assistant(text);
                    conversation.push(message.clone());
                    return Ok(ChatOutcome {
                        message,
                        termination: Termination::Done,
                        iterations_used: iterations,
                        tool_call_count,
                        total_tool_duration_ms,
                        eval_count,
                        eval_duration,
                        trace: recorder.into_entries(),
                    });
                }

                ModelReply::ToolCalls { content, calls } => {
                    debug!(tool_count = calls.len(), "Model requested tools");
                    conversation.push(Message::assistant_with_tool_calls(content, calls.clone()));

                    for call in calls {
                        let envelope = tool_call_request(&call.name, &call.arguments);
                        let envelope_id = envelope.id.clone().unwrap_or_default();
                        // Backend call id when present, envelope id otherwise
                        let correlation_id = if call.id.is_empty() {
                            envelope_id.clone()
                        } else {
                            call.id.clone()
                        };

                        recorder.record(
                            TraceKind::ToolCall,
                            format!("→ {} invoked", call.name),
                            json!({
                                "toolName": call.name,
                                "arguments": call.arguments,
                                "mcpRequest": envelope,
                            }),
                        );
                        tool_call_count += 1;

                        let registry = Arc::clone(&self.tools);
                        let name = call.name.clone();
                        let arguments = call.arguments.clone();
                        let dispatch =
                            tokio::spawn(async move { registry.invoke(&name, arguments).await });

                        let dispatch_started = Instant::now();
                        let result = tokio::select! {
                            biased;
                            _ = token.cancelled() => return Err(Error::Cancelled),
                            joined = dispatch => joined
                                .map_err(|e| Error::Internal(format!("tool task failed: {e}")))?,
                        };
                        let duration_ms = dispatch_started.elapsed().as_millis() as u64;
                        total_tool_duration_ms += duration_ms;
                        self.stats.record_tool_invocation(duration_ms);

                        match result {
                            Ok(value) => {
                                let response = tool_call_response(&envelope_id, &value);
                                recorder.record(
                                    TraceKind::ToolResult,
                                    format!("✓ {} completed in {duration_ms}ms", call.name),
                                    json!({
                                        "toolName": call.name,
                                        "durationMs": duration_ms,
                                        "mcpResponse": response,
                                    }),
                                );
                                conversation.push(Message::tool_result(
                                    &correlation_id,
                                    serde_json::to_string(&value).unwrap_or_default(),
                                ));
                            }
                            Err(e) => {
                                warn!(tool = %call.name, error = %e, "Tool dispatch failed");
                                let response = tool_call_error(&envelope_id, &e.to_string());
                                recorder.record(
                                    TraceKind::Error,
                                    format!("Error: {e}"),
                                    json!({
                                        "toolName": call.name,
                                        "durationMs": duration_ms,
                                        "mcpResponse": response,
                                    }),
                                );
                                conversation.push(Message::tool_result(
                                    &correlation_id,
                                    json!({"error": e.to_string()}).to_string(),
                                ));
                            }
                        }
                    }
                    // Loop back so the model sees the tool results
                }
            }
        }

        warn!(
            iterations = iterations,
            "Iteration budget exhausted without a final answer"
        );
        let message = Message::assistant(BUDGET_EXHAUSTED_MESSAGE);
        conversation.push(message.clone());
        Ok(ChatOutcome {
            message,
            termination: Termination::BudgetExhausted,
            iterations_used: iterations,
            tool_call_count,
            total_tool_duration_ms,
            eval_count: None,
            eval_duration: None,
            trace: recorder.into_entries(),
        })
    }
}
