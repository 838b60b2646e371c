//! Providers command implementation.
//!
//! Drafts only live for the duration of one invocation, so `add` creates,
//! fills in and saves a provider in a single step.

use agentdesk_core::{PrimaryAction, ProviderPatch, ProviderState, ProviderType};
use anyhow::Context;
use serde_json::json;

use super::{ProviderFields, ProvidersCommand, Settings};

/// Execute the providers command.
pub fn execute(command: ProvidersCommand, settings: &mut Settings) -> anyhow::Result<()> {
    match command {
        ProvidersCommand::List { json } => list_providers(settings, json),
        ProvidersCommand::Types => {
            for provider_type in settings.providers().addable_types() {
                println!("{:<15} {}", provider_type.as_str(), provider_type.display_name());
            }
            Ok(())
        }
        ProvidersCommand::Add {
            provider_type,
            fields,
        } => add_provider(settings, provider_type, fields),
        ProvidersCommand::Set { id, fields } => {
            ensure_persisted(settings, &id)?;
            apply_fields(settings, &id, fields)?;
            save(settings, &id)
        }
        ProvidersCommand::AddModel { id, model } => {
            ensure_persisted(settings, &id)?;
            settings.providers_mut().add_model(&id, &model)?;
            save(settings, &id)
        }
        ProvidersCommand::RemoveModel { id, model } => {
            ensure_persisted(settings, &id)?;
            settings.providers_mut().remove_model(&id, &model)?;
            save(settings, &id)
        }
        ProvidersCommand::Save { id } => {
            ensure_persisted(settings, &id)?;
            save(settings, &id)
        }
        ProvidersCommand::Delete { id } => {
            settings.delete_provider(&id)?;
            println!("Deleted provider {id}");
            Ok(())
        }
    }
}

fn list_providers(settings: &Settings, json_output: bool) -> anyhow::Result<()> {
    let providers = settings.providers();
    let sorted = providers.sorted();

    if json_output {
        let entries: Vec<_> = sorted
            .iter()
            .map(|(id, config)| {
                json!({
                    "id": id,
                    "config": config,
                    "models": config.effective_model_names(id),
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if sorted.is_empty() {
        println!("No providers configured.");
        println!("Add one with: agentdesk providers add <type> --api-key <key>");
        return Ok(());
    }

    for (id, config) in sorted {
        let action = match providers.primary_action(id) {
            PrimaryAction::Delete => "",
            PrimaryAction::Save { .. } => " (unsaved)",
        };
        println!("{} [{}] {}{}", config.display_name(id), id, config.provider_type, action);
        if !config.base_url.is_empty() {
            println!("  base url: {}", config.base_url);
        }
        if !config.api_key.is_empty() {
            println!("  api key:  {}", mask(&config.api_key));
        }
        if config.provider_type == ProviderType::AzureOpenAI {
            println!("  api version: {}", config.azure_api_version);
        }
        let models = config.effective_model_names(id);
        if !models.is_empty() {
            println!("  models:   {}", models.join(", "));
        }
    }
    Ok(())
}

fn add_provider(
    settings: &mut Settings,
    provider_type: ProviderType,
    fields: ProviderFields,
) -> anyhow::Result<()> {
    let id = settings
        .start_draft(provider_type)
        .with_context(|| format!("Cannot add {}", provider_type.display_name()))?;
    tracing::debug!(provider = %id, "Filling in provider draft");

    if let Err(e) = apply_fields(settings, &id, fields).and_then(|()| save(settings, &id)) {
        settings.cancel_provider(&id);
        return Err(e);
    }
    Ok(())
}

fn apply_fields(settings: &mut Settings, id: &str, fields: ProviderFields) -> anyhow::Result<()> {
    let patch = ProviderPatch {
        name: fields.name,
        api_key: fields.api_key,
        base_url: fields.base_url,
        model_names: (!fields.models.is_empty()).then_some(fields.models),
        azure_deployment_names: deployment_list(fields.deployments),
        azure_api_version: fields.api_version,
    };
    if !patch.is_empty() {
        settings.edit_provider(id, patch)?;
    }
    Ok(())
}

/// Trimmed, de-duplicated deployment names, or `None` when none were given.
fn deployment_list(names: Vec<String>) -> Option<Vec<String>> {
    let mut list: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let name = name.trim();
        if !name.is_empty() && !list.iter().any(|d| d == name) {
            list.push(name.to_string());
        }
    }
    (!list.is_empty()).then_some(list)
}

fn save(settings: &mut Settings, id: &str) -> anyhow::Result<()> {
    let result = settings.save_provider(id);
    if let Err(e) = result {
        if let Some(validation) = e.validation() {
            anyhow::bail!("Cannot save {id}: {validation}");
        }
        return Err(e.into());
    }
    println!("Saved provider {id}");
    Ok(())
}

fn ensure_persisted(settings: &Settings, id: &str) -> anyhow::Result<()> {
    match settings.providers().state(id) {
        Some(ProviderState::Persisted) | Some(ProviderState::Modified) => Ok(()),
        _ => anyhow::bail!("Provider not found: {id}"),
    }
}

fn mask(secret: &str) -> String {
    let visible: String = secret.chars().rev().take(4).collect::<Vec<_>>().into_iter().rev().collect();
    if secret.chars().count() <= 4 {
        "*".repeat(secret.chars().count())
    } else {
        format!("****{visible}")
    }
}
