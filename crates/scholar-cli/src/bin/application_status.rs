use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use scholar_client::{CredentialStore, HttpGateway, PortalApi, SessionContext};
use scholar_core::models::Application;
use scholar_core::{
    can_request_correction, correction_context, presentation, progress_percent, stage_index,
    ClientConfig, TOTAL_STAGES,
};

#[derive(Parser, Debug)]
#[command(name = "application_status")]
#[command(about = "Show scholarship application progress")]
struct Args {
    /// Optional application ID (if not provided, lists all applications)
    #[arg(long)]
    id: Option<i64>,

    /// Output format: json or table (default: table)
    #[arg(long, default_value = "table")]
    format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();
    dotenvy::dotenv().ok();

    let args = Args::parse();

    let config = ClientConfig::from_env();
    let gateway = Arc::new(HttpGateway::new(&config)?);
    let api = PortalApi::new(gateway, &config);
    let session = SessionContext::new(api, CredentialStore::new(config.credential_path.clone()));

    session.hydrate();
    if !session.is_authenticated() {
        return Err(anyhow::anyhow!(
            "No active session. Log in first (stored credential at {}).",
            config.credential_path.display()
        ));
    }

    let applications = match args.id {
        Some(id) => vec![session.api().get_application(id).await?],
        None => session.api().list_applications().await?,
    };

    match args.format.as_str() {
        "json" => {
            let items: Vec<serde_json::Value> =
                applications.iter().map(application_summary).collect();
            println!("{}", serde_json::to_string_pretty(&items)?);
        }
        _ => {
            for application in &applications {
                print_application(application);
                println!();
            }
            if applications.is_empty() {
                println!("No applications found.");
            }
        }
    }

    Ok(())
}

fn application_summary(application: &Application) -> serde_json::Value {
    let chrome = presentation(application.status);
    serde_json::json!({
        "id": application.id,
        "scholarship_id": application.scholarship_id,
        "label": chrome.label,
        "severity": chrome.severity,
        "message": chrome.message,
        "stage": stage_index(application.status),
        "total_stages": TOTAL_STAGES,
        "progress_percent": progress_percent(application.status),
        "correction": correction_context(application),
    })
}

fn print_application(application: &Application) {
    let chrome = presentation(application.status);
    println!(
        "Application #{} (scholarship #{})",
        application.id, application.scholarship_id
    );
    println!(
        "  {} - stage {}/{} ({:.0}%)",
        chrome.label,
        stage_index(application.status),
        TOTAL_STAGES,
        progress_percent(application.status)
    );
    println!("  {}", chrome.message);
    if let Some(remarks) = &application.remarks {
        println!("  Remarks: {}", remarks);
    }
    if can_request_correction(application.status) {
        println!("  A correction can be submitted for this application.");
    }
    for document in &application.documents {
        let verdict = match document.is_verified {
            Some(true) => "verified",
            Some(false) => "rejected",
            None => "pending",
        };
        println!("  - document #{}: {}", document.id, verdict);
    }
}
