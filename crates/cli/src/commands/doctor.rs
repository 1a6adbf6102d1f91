//! `wayfarer doctor` — Check the Ollama backend and configuration.

use wayfarer_config::AppConfig;
use wayfarer_core::provider::Provider;
use wayfarer_providers::OllamaProvider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("Wayfarer Doctor — System Diagnostics");
    println!("====================================\n");

    let mut issues = 0;

    let config = match AppConfig::load() {
        Ok(config) => {
            println!("  ✅ Config valid");
            config
        }
        Err(e) => {
            println!("  ❌ Config invalid: {e}");
            println!();
            println!("  1 issue found. See above for details.");
            return Ok(());
        }
    };

    println!("     Backend: {}", config.ollama.base_url);
    println!("     Model:   {}", config.ollama.model);

    let provider = OllamaProvider::new(&config.ollama.base_url, &config.ollama.model);
    match provider.health_check().await {
        Ok(report) if report.healthy => {
            println!("  ✅ Ollama reachable");
            if report.model_available {
                println!("  ✅ Model {} available", config.ollama.model);
            } else {
                println!(
                    "  ⚠️  Model {} not pulled — run `ollama pull {}`",
                    config.ollama.model, config.ollama.model
                );
                issues += 1;
            }
            if let Some(detail) = report.detail {
                println!("     Models: {detail}");
            }
        }
        Ok(report) => {
            println!(
                "  ❌ Ollama not reachable: {}",
                report.detail.unwrap_or_default()
            );
            issues += 1;
        }
        Err(e) => {
            println!("  ❌ Health probe failed: {e}");
            issues += 1;
        }
    }

    match wayfarer_tools::default_registry() {
        Ok(registry) => println!("  ✅ {} tools registered", registry.len()),
        Err(e) => {
            println!("  ❌ Tool registry failed: {e}");
            issues += 1;
        }
    }

    println!();
    if issues == 0 {
        println!("  All checks passed!");
    } else {
        println!("  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
