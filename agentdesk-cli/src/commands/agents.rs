//! Agents command implementation.

use agentdesk_core::{AgentRole, ModelSelection, ParameterKind};

use super::{AgentsCommand, ParameterArg, Settings};

/// Execute the agents command.
pub fn execute(command: AgentsCommand, settings: &mut Settings) -> anyhow::Result<()> {
    match command {
        AgentsCommand::Show => {
            for &role in AgentRole::all() {
                show_role(settings, role);
            }
            Ok(())
        }
        AgentsCommand::Set { role, model } => {
            let selection = ModelSelection::parse(&model)
                .ok_or_else(|| anyhow::anyhow!("Expected <provider>><model>, got '{model}'"))?;
            if !settings
                .agents()
                .available_models()
                .iter()
                .any(|m| m.selection() == selection)
            {
                tracing::warn!(model = %selection, "Model is not offered by any configured provider");
            }
            settings.select_model(role, Some(selection))?;
            show_role(settings, role);
            Ok(())
        }
        AgentsCommand::Reset { role } => {
            settings.select_model(role, None)?;
            println!("Cleared {role} model");
            Ok(())
        }
        AgentsCommand::Param {
            role,
            parameter,
            value,
        } => {
            let kind = match parameter {
                ParameterArg::Temperature => ParameterKind::Temperature,
                ParameterArg::TopP => ParameterKind::TopP,
            };
            settings.set_parameter(role, kind, value)?;
            show_role(settings, role);
            Ok(())
        }
        AgentsCommand::Effort { role, effort } => {
            settings.set_reasoning_effort(role, effort)?;
            let reasoning = settings
                .agents()
                .selected_capability(role)
                .is_some_and(|p| p.uses_discrete_reasoning_effort);
            if !reasoning {
                println!("Note: the {role} model does not take a reasoning effort; it will apply to the next reasoning model.");
            }
            show_role(settings, role);
            Ok(())
        }
    }
}

fn show_role(settings: &Settings, role: AgentRole) {
    let agents = settings.agents();
    let Some(selection) = agents.selected(role) else {
        println!("{role}: (none)");
        return;
    };
    println!("{role}: {selection}");

    let Some(profile) = agents.selected_capability(role) else {
        return;
    };
    let parameters = agents.parameters(role);
    if profile.supports_temperature {
        println!("  temperature: {:.2}", parameters.temperature);
    }
    if profile.supports_nucleus_sampling {
        println!("  top_p:       {:.3}", parameters.top_p);
    }
    if profile.uses_discrete_reasoning_effort {
        println!("  reasoning:   {}", agents.effective_reasoning_effort(role));
    }
}
