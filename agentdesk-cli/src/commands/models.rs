//! Models command implementation.

use serde_json::json;

use super::Settings;

/// List every model that can be assigned to an agent.
pub fn execute(settings: &Settings, json_output: bool) -> anyhow::Result<()> {
    let models = settings.agents().available_models();

    if json_output {
        let entries: Vec<_> = models
            .iter()
            .map(|m| {
                json!({
                    "value": m.selection().composite(),
                    "provider": m.provider,
                    "provider_name": m.provider_name,
                    "model": m.model,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if models.is_empty() {
        println!("No models available. Add a provider first.");
        return Ok(());
    }
    for model in models {
        println!("{:<40} {}", model.selection().composite(), model.label());
    }
    Ok(())
}
