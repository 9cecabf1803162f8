use clap::Parser;
use lead_capture::utils::{logger, validation::Validate};
use lead_capture::{
    BackendClient, CliConfig, Field, LeadForm, NotificationOutcome, SessionLeadStore,
    SubmissionOutcome, SubmissionWorkflow,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("Starting lead-capture CLI");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    if cli.dry_run {
        let errors = lead_capture::validate(&cli.lead_input());
        if errors.is_empty() {
            println!("✅ Input is valid; nothing was sent (dry run)");
            return Ok(());
        }
        for error in &errors {
            eprintln!("❌ {}", error);
        }
        std::process::exit(2);
    }

    let config = cli.backend_config()?;
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }

    let client = BackendClient::new(&config)?;
    let store = SessionLeadStore::shared();
    let workflow = SubmissionWorkflow::new(client.clone(), client, store)
        .with_targets(config.leads_table(), config.confirmation_function());

    let mut form = LeadForm::new(workflow);
    form.mount();
    form.set_field(Field::Name, cli.name.as_str());
    form.set_field(Field::Email, cli.email.as_str());
    form.set_field(Field::Industry, cli.industry.as_str());

    match form.submit().await {
        SubmissionOutcome::Committed { lead, notification } => {
            println!("✅ Thank you, {}! Your information has been received.", lead.name);
            match notification {
                NotificationOutcome::Sent => {
                    println!("📧 A confirmation email is on its way to {}", lead.email);
                }
                NotificationOutcome::Failed(_) => {
                    println!("📧 Your confirmation email may be delayed.");
                }
            }
            Ok(())
        }
        SubmissionOutcome::ValidationFailed(errors) => {
            for error in &errors {
                eprintln!("❌ {}", error);
            }
            std::process::exit(2);
        }
        SubmissionOutcome::PersistFailed(_) | SubmissionOutcome::Unexpected(_) => {
            if let Some(notice) = form.notice() {
                eprintln!("❌ {}", notice);
            }
            std::process::exit(1);
        }
    }
}
