//! `wayfarer chat` — Interactive or single-message concierge mode.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use wayfarer_agent::{ChatLoop, SessionStats};
use wayfarer_config::AppConfig;
use wayfarer_core::event::{BroadcastSink, TraceKind};
use wayfarer_core::message::Message;
use wayfarer_core::tool::ToolRegistry;
use wayfarer_providers::OllamaProvider;

pub async fn run(message: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load().map_err(|e| format!("Failed to load config: {e}"))?;

    let provider = Arc::new(OllamaProvider::new(
        &config.ollama.base_url,
        &config.ollama.model,
    ));
    let tools = Arc::new(wayfarer_tools::default_registry()?);
    let stats = Arc::new(SessionStats::new());

    // Mirror tool activity to the terminal as it happens
    let sink = Arc::new(BroadcastSink::default());
    let mut activity = sink.subscribe();
    tokio::spawn(async move {
        while let Ok(entry) = activity.recv().await {
            match entry.kind {
                TraceKind::ToolCall | TraceKind::ToolResult => eprintln!("    {}", entry.label),
                _ => {}
            }
        }
    });

    let chat = ChatLoop::new(
        provider,
        &config.ollama.model,
        config.system_prompt(),
        tools.clone(),
    )
    .with_max_iterations(config.agent.max_iterations)
    .with_sink(sink)
    .with_stats(stats.clone());

    if let Some(msg) = message {
        // Single message mode
        let outcome = chat.process(vec![Message::user(&msg)]).await?;
        println!("{}", outcome.message.content);
        if outcome.failed() {
            std::process::exit(1);
        }
        return Ok(());
    }

    // Interactive mode
    println!();
    println!("  Wayfarer — Travel Concierge");
    println!("  Model:  {} @ {}", config.ollama.model, config.ollama.base_url);
    println!("  Tools:  {}", tools.names().join(", "));
    println!();
    println!("  Type a message and press Enter.");
    println!("  Commands: /stats, /reset, /quit");
    println!();

    let mut history: Vec<Message> = Vec::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    prompt();
    while let Some(line) = lines.next_line().await? {
        let input = line.trim();
        match input {
            "" => {}
            "/quit" | "exit" => break,
            "/stats" => {
                print_stats(&stats, &tools);
            }
            "/reset" => {
                stats.reset();
                tools.reset_usage();
                history.clear();
                println!("  Session reset.");
            }
            _ => {
                history.push(Message::user(input));
                match chat.process(history.clone()).await {
                    Ok(outcome) => {
                        println!();
                        for line in outcome.message.content.lines() {
                            println!("  Concierge > {line}");
                        }
                        println!();
                        history.push(outcome.message);
                    }
                    Err(e) => {
                        eprintln!("  [Error] {e}");
                    }
                }
            }
        }
        prompt();
    }

    println!();
    println!("  Safe travels!");
    Ok(())
}

fn prompt() {
    use std::io::Write;
    print!("  You > ");
    let _ = std::io::stdout().flush();
}

fn print_stats(stats: &SessionStats, tools: &ToolRegistry) {
    let snap = stats.snapshot();
    println!();
    println!("  Session stats");
    println!("    Uptime:           {}s", snap.uptime_seconds);
    println!("    API calls:        {}", snap.total_api_calls);
    println!("    Tool invocations: {}", snap.total_tool_invocations);
    println!("    Tool time:        {}ms", snap.total_tool_duration_ms);
    println!("    Est. tokens:      {}", snap.estimated_tokens);
    println!("    Avg response:     {}ms", snap.avg_response_time_ms);
    println!("  Tool usage");
    for usage in tools.usage() {
        println!("    {:<24} {}", usage.name, usage.count);
    }
    println!();
}
