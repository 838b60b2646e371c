//! Command implementations for the Agentdesk CLI.

pub mod agents;
pub mod models;
pub mod providers;

use agentdesk_core::{AgentRole, Database, ModelSettings, ProviderType, ReasoningEffort};
use clap::{Args, Subcommand, ValueEnum};

/// Settings session every command runs against.
pub type Settings = ModelSettings<Database>;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Manage LLM providers
    #[command(subcommand)]
    Providers(ProvidersCommand),

    /// Manage planner and navigator model assignments
    #[command(subcommand)]
    Agents(AgentsCommand),

    /// List the models available for assignment
    Models {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProvidersCommand {
    /// List configured providers
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the provider types that can be added
    Types,

    /// Add and save a provider
    Add {
        /// Provider type (openai, anthropic, azure_openai, custom_openai, ...)
        #[arg(value_parser = parse_provider_type)]
        provider_type: ProviderType,

        #[command(flatten)]
        fields: ProviderFields,
    },

    /// Edit and save an existing provider
    Set {
        /// Provider id
        id: String,

        #[command(flatten)]
        fields: ProviderFields,
    },

    /// Add a model name to a provider
    AddModel { id: String, model: String },

    /// Remove a model name from a provider
    RemoveModel { id: String, model: String },

    /// Validate and re-save a provider
    Save { id: String },

    /// Delete a provider
    Delete { id: String },
}

/// Provider fields accepted by `add` and `set`.
#[derive(Args, Debug, Default)]
pub struct ProviderFields {
    /// Display name
    #[arg(long)]
    pub name: Option<String>,

    /// API key
    #[arg(long)]
    pub api_key: Option<String>,

    /// Base URL (endpoint for Azure)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Model name; repeat to replace the whole list
    #[arg(long = "model", value_name = "MODEL")]
    pub models: Vec<String>,

    /// Azure deployment name; repeat to replace the whole list
    #[arg(long = "deployment", value_name = "NAME")]
    pub deployments: Vec<String>,

    /// Azure API version
    #[arg(long)]
    pub api_version: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum AgentsCommand {
    /// Show the current assignments
    Show,

    /// Assign a model to a role
    Set {
        #[arg(value_parser = parse_role)]
        role: AgentRole,

        /// Model as `provider>model`
        model: String,
    },

    /// Clear a role's assignment
    Reset {
        #[arg(value_parser = parse_role)]
        role: AgentRole,
    },

    /// Set a sampling parameter
    Param {
        #[arg(value_parser = parse_role)]
        role: AgentRole,

        #[arg(value_enum)]
        parameter: ParameterArg,

        value: f64,
    },

    /// Set the reasoning effort
    Effort {
        #[arg(value_parser = parse_role)]
        role: AgentRole,

        #[arg(value_parser = parse_effort)]
        effort: ReasoningEffort,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum ParameterArg {
    Temperature,
    TopP,
}

/// Execute a command against the settings session.
pub fn execute(command: Command, settings: &mut Settings) -> anyhow::Result<()> {
    match command {
        Command::Providers(cmd) => providers::execute(cmd, settings),
        Command::Agents(cmd) => agents::execute(cmd, settings),
        Command::Models { json } => models::execute(settings, json),
    }
}

fn parse_provider_type(value: &str) -> Result<ProviderType, String> {
    ProviderType::parse(value).ok_or_else(|| {
        let known: Vec<&str> = ProviderType::all().iter().map(|t| t.as_str()).collect();
        format!("unknown provider type '{value}' (expected one of: {})", known.join(", "))
    })
}

fn parse_role(value: &str) -> Result<AgentRole, String> {
    AgentRole::parse(value).ok_or_else(|| format!("unknown role '{value}' (expected planner or navigator)"))
}

fn parse_effort(value: &str) -> Result<ReasoningEffort, String> {
    ReasoningEffort::parse(value)
        .ok_or_else(|| format!("unknown reasoning effort '{value}' (expected minimal, low, medium or high)"))
}
