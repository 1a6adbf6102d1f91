//! `wayfarer handshake` — Dump the simulated MCP handshake sequence.

use wayfarer_protocol::simulate_handshake;

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let registry = wayfarer_tools::default_registry()?;
    let steps = simulate_handshake(&registry.definitions());

    println!();
    for (i, step) in steps.iter().enumerate() {
        println!("  [{}] {} ({})", i + 1, step.label, step.direction);
        let pretty = serde_json::to_string_pretty(&step.message)?;
        for line in pretty.lines() {
            println!("      {line}");
        }
        println!();
    }

    Ok(())
}
