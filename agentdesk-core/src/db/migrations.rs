//! Database migrations for Agentdesk.
//!
//! Simple migration system that tracks applied migrations and runs each only once.

use rusqlite::Connection;

/// SQL for the providers table.
const MIGRATION_001_PROVIDERS: &str = r#"
-- Provider configurations (one row per provider id)
CREATE TABLE IF NOT EXISTS providers (
    id TEXT PRIMARY KEY,
    provider_type TEXT NOT NULL,
    name TEXT NOT NULL,
    api_key TEXT NOT NULL DEFAULT '',
    base_url TEXT NOT NULL DEFAULT '',
    model_names TEXT,                  -- JSON array, NULL = built-in list
    azure_deployment_names TEXT NOT NULL DEFAULT '[]',  -- JSON array
    azure_api_version TEXT NOT NULL DEFAULT '',
    created_at INTEGER,                -- epoch milliseconds
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
"#;

/// SQL for the agent model assignments table.
const MIGRATION_002_AGENT_MODELS: &str = r#"
-- Model assigned to each agent role
CREATE TABLE IF NOT EXISTS agent_models (
    agent TEXT PRIMARY KEY CHECK (agent IN ('navigator', 'planner')),
    provider TEXT NOT NULL,
    model_name TEXT NOT NULL,
    temperature REAL,
    top_p REAL,
    reasoning_effort TEXT CHECK (reasoning_effort IN ('minimal', 'low', 'medium', 'high')),
    updated_at INTEGER NOT NULL DEFAULT (unixepoch())
);
"#;

/// All migrations in order. Each is (name, sql).
const MIGRATIONS: &[(&str, &str)] = &[
    ("001_providers", MIGRATION_001_PROVIDERS),
    ("002_agent_models", MIGRATION_002_AGENT_MODELS),
];

/// Run all pending migrations.
///
/// Creates the migrations tracking table if needed, then applies any migrations
/// that haven't been run yet.
pub fn run_migrations(conn: &Connection) -> anyhow::Result<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS migrations (
            id INTEGER PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            applied_at INTEGER NOT NULL DEFAULT (unixepoch())
        );",
    )?;

    for (name, sql) in MIGRATIONS {
        let applied: bool = conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM migrations WHERE name = ?)",
            [name],
            |row| row.get(0),
        )?;

        if !applied {
            tracing::info!(migration = %name, "Running migration");
            conn.execute_batch(sql)?;
            conn.execute("INSERT INTO migrations (name) VALUES (?)", [name])?;
            tracing::info!(migration = %name, "Migration complete");
        }
    }

    Ok(())
}
