//! `wayfarer tools` — List the registered travel tools.

pub fn run(schemas: bool) -> Result<(), Box<dyn std::error::Error>> {
    let registry = wayfarer_tools::default_registry()?;

    println!();
    println!("  {} tools registered", registry.len());
    println!();

    for def in registry.definitions() {
        println!("  {}", def.name);
        println!("    {}", def.description);
        if schemas {
            let pretty = serde_json::to_string_pretty(&def.parameters)?;
            for line in pretty.lines() {
                println!("    {line}");
            }
        }
        println!();
    }

    Ok(())
}
