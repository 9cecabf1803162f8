pub mod toml_config;

pub use toml_config::BackendConfig;

#[cfg(feature = "cli")]
use crate::domain::model::LeadInput;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "lead-capture")]
#[command(about = "Capture a lead: validate it, save it and send the confirmation email")]
pub struct CliConfig {
    /// Path to the backend TOML configuration; falls back to LEAD_CAPTURE_* env vars
    #[arg(short, long)]
    pub config: Option<String>,

    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    /// One of: technology, healthcare, finance, education, retail, manufacturing, consulting, other
    #[arg(long, default_value = "")]
    pub industry: String,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,

    /// Validate the input without contacting the backend
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn lead_input(&self) -> LeadInput {
        LeadInput::new(&self.name, &self.email, &self.industry)
    }

    pub fn backend_config(&self) -> crate::utils::error::Result<BackendConfig> {
        match &self.config {
            Some(path) => BackendConfig::from_file(path),
            None => BackendConfig::from_env(),
        }
    }
}
