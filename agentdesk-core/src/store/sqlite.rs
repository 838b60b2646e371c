//! SQLite implementation of the settings store.

use std::collections::HashMap;

use rusqlite::{params, OptionalExtension};
use tracing::{debug, warn};

use crate::agents::types::{AgentModelAssignment, AgentRole, ReasoningEffort, StoredParameters};
use crate::db::Database;
use crate::providers::config::ProviderConfig;
use crate::providers::types::ProviderType;

use super::{SettingsStore, StoreError, StoreEvent, StoreEventReceiver};

/// Raw provider row before JSON columns are decoded.
struct ProviderRow {
    id: String,
    provider_type: String,
    name: String,
    api_key: String,
    base_url: String,
    model_names: Option<String>,
    azure_deployment_names: String,
    azure_api_version: String,
    created_at: Option<i64>,
}

impl ProviderRow {
    fn decode(self) -> Result<Option<(String, ProviderConfig)>, StoreError> {
        let Some(provider_type) = ProviderType::parse(&self.provider_type) else {
            warn!(
                provider = %self.id,
                provider_type = %self.provider_type,
                "Skipping provider with unknown type"
            );
            return Ok(None);
        };

        let model_names = self
            .model_names
            .as_deref()
            .map(serde_json::from_str::<Vec<String>>)
            .transpose()?;

        let config = ProviderConfig {
            provider_type,
            name: self.name,
            api_key: self.api_key,
            base_url: self.base_url,
            model_names,
            azure_deployment_names: serde_json::from_str(&self.azure_deployment_names)?,
            azure_api_version: self.azure_api_version,
            created_at: self.created_at,
        };

        Ok(Some((self.id, config)))
    }
}

impl SettingsStore for Database {
    fn get_all_providers(&self) -> Result<HashMap<String, ProviderConfig>, StoreError> {
        let mut stmt = self.conn().prepare(
            "SELECT id, provider_type, name, api_key, base_url, model_names,
                    azure_deployment_names, azure_api_version, created_at
             FROM providers ORDER BY id",
        )?;

        let rows = stmt.query_map([], |row| {
            Ok(ProviderRow {
                id: row.get(0)?,
                provider_type: row.get(1)?,
                name: row.get(2)?,
                api_key: row.get(3)?,
                base_url: row.get(4)?,
                model_names: row.get(5)?,
                azure_deployment_names: row.get(6)?,
                azure_api_version: row.get(7)?,
                created_at: row.get(8)?,
            })
        })?;

        let mut providers = HashMap::new();
        for row in rows {
            if let Some((id, config)) = row?.decode()? {
                providers.insert(id, config);
            }
        }

        debug!(total_providers = providers.len(), "Providers loaded from database");
        Ok(providers)
    }

    fn set_provider(&self, provider_id: &str, config: &ProviderConfig) -> Result<(), StoreError> {
        let model_names = config
            .model_names
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;
        let deployments = serde_json::to_string(&config.azure_deployment_names)?;

        debug!(
            provider = %provider_id,
            provider_type = %config.provider_type,
            "Saving provider to database"
        );

        self.conn().execute(
            "INSERT OR REPLACE INTO providers (id, provider_type, name, api_key, base_url,
                model_names, azure_deployment_names, azure_api_version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, unixepoch())",
            params![
                provider_id,
                config.provider_type.as_str(),
                &config.name,
                &config.api_key,
                &config.base_url,
                model_names,
                deployments,
                &config.azure_api_version,
                config.created_at,
            ],
        )?;

        self.notify(StoreEvent::ProvidersChanged);
        Ok(())
    }

    fn remove_provider(&self, provider_id: &str) -> Result<(), StoreError> {
        let removed = self
            .conn()
            .execute("DELETE FROM providers WHERE id = ?", params![provider_id])?;
        debug!(provider = %provider_id, removed, "Removed provider from database");

        self.notify(StoreEvent::ProvidersChanged);
        Ok(())
    }

    fn get_agent_model(&self, role: AgentRole) -> Result<Option<AgentModelAssignment>, StoreError> {
        let row = self
            .conn()
            .query_row(
                "SELECT provider, model_name, temperature, top_p, reasoning_effort
                 FROM agent_models WHERE agent = ?",
                params![role.as_str()],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, Option<f64>>(2)?,
                        row.get::<_, Option<f64>>(3)?,
                        row.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?;

        Ok(row.map(|(provider, model_name, temperature, top_p, effort)| {
            AgentModelAssignment {
                provider,
                model_name,
                parameters: StoredParameters { temperature, top_p },
                reasoning_effort: effort.as_deref().and_then(ReasoningEffort::parse),
            }
        }))
    }

    fn set_agent_model(
        &self,
        role: AgentRole,
        assignment: &AgentModelAssignment,
    ) -> Result<(), StoreError> {
        debug!(
            agent = %role,
            provider = %assignment.provider,
            model = %assignment.model_name,
            reasoning_effort = ?assignment.reasoning_effort,
            "Saving agent model to database"
        );

        self.conn().execute(
            "INSERT OR REPLACE INTO agent_models (agent, provider, model_name, temperature,
                top_p, reasoning_effort, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, unixepoch())",
            params![
                role.as_str(),
                &assignment.provider,
                &assignment.model_name,
                assignment.parameters.temperature,
                assignment.parameters.top_p,
                assignment.reasoning_effort.map(|e| e.as_str()),
            ],
        )?;

        self.notify(StoreEvent::AgentModelsChanged);
        Ok(())
    }

    fn reset_agent_model(&self, role: AgentRole) -> Result<(), StoreError> {
        self.conn()
            .execute("DELETE FROM agent_models WHERE agent = ?", params![role.as_str()])?;
        debug!(agent = %role, "Reset agent model");

        self.notify(StoreEvent::AgentModelsChanged);
        Ok(())
    }

    fn subscribe(&self) -> StoreEventReceiver {
        self.add_subscriber()
    }
}
