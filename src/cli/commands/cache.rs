//! Provider listing and cache inspection commands.

use tokio::runtime::Runtime;

use crate::engine::Engine;

/// List registered providers with their ranking priority
pub fn cmd_providers(engine: &Engine, json: bool) -> anyhow::Result<()> {
    let registry = engine.registry();
    let providers: Vec<(&str, f64)> = registry
        .names()
        .into_iter()
        .filter_map(|name| registry.lookup(name).map(|p| (name, p.priority())))
        .collect();

    if json {
        let entries: Vec<_> = providers
            .iter()
            .map(|(name, priority)| serde_json::json!({ "name": name, "priority": priority }))
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if providers.is_empty() {
        println!("No providers registered. Add [[catalogs]] entries to the config file.");
        return Ok(());
    }
    for (name, priority) in providers {
        println!("{:<20} priority {:.2}", name, priority);
    }
    Ok(())
}

/// List cached movie records
pub fn cmd_cached(
    rt: &Runtime,
    engine: &Engine,
    provider: Option<&str>,
    json: bool,
) -> anyhow::Result<()> {
    let records = rt.block_on(engine.store().list(provider))?;

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    println!("{} cached record(s)", records.len());
    for info in &records {
        println!("  [{}] {:<16} {:<20} {}", info.provider, info.number, info.id, info.title);
    }
    Ok(())
}
