use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use scholar_client::{CredentialStore, HttpGateway, PortalApi, SessionContext};
use scholar_core::{build_vault_view, ClientConfig};

#[derive(Parser, Debug)]
#[command(name = "vault_status")]
#[command(about = "Show document vault completeness for the logged-in student")]
struct Args {
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

    // Session must be restored before any protected call.
    session.hydrate();
    if !session.is_authenticated() {
        return Err(anyhow::anyhow!(
            "No active session. Log in first (stored credential at {}).",
            config.credential_path.display()
        ));
    }

    let (types, documents) = tokio::try_join!(
        session.api().document_types(),
        session.api().my_documents(),
    )?;

    let view = build_vault_view(&types, &documents);
    let missing: Vec<&str> = view
        .missing_mandatory()
        .iter()
        .map(|t| t.name.as_str())
        .collect();

    match args.format.as_str() {
        "json" => {
            let slots: Vec<serde_json::Value> = view
                .slots
                .iter()
                .map(|slot| {
                    serde_json::json!({
                        "type": slot.definition.name,
                        "mandatory": slot.definition.is_mandatory,
                        "uploaded": slot.upload.as_ref().map(|u| u.display_name()),
                        "verified": slot.upload.as_ref().and_then(|u| u.is_verified),
                    })
                })
                .collect();
            let summary = serde_json::json!({
                "uploaded": view.uploaded_count(),
                "total": view.slots.len(),
                "coverage": view.coverage(),
                "missing_mandatory": missing,
                "slots": slots,
            });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        _ => {
            println!(
                "Documents uploaded: {} / {} ({:.0}%)",
                view.uploaded_count(),
                view.slots.len(),
                view.coverage() * 100.0
            );
            println!();
            println!("{:<30} {:<10} {:<30} {:<10}", "TYPE", "MANDATORY", "FILE", "STATUS");
            for slot in &view.slots {
                let mandatory = if slot.definition.is_mandatory { "yes" } else { "no" };
                let (file, status) = match &slot.upload {
                    Some(upload) => {
                        let status = match upload.is_verified {
                            Some(true) => "verified",
                            Some(false) => "rejected",
                            None => "pending",
                        };
                        (upload.display_name(), status)
                    }
                    None => ("-", "missing"),
                };
                println!(
                    "{:<30} {:<10} {:<30} {:<10}",
                    slot.definition.name, mandatory, file, status
                );
            }
            if !missing.is_empty() {
                println!();
                println!("Missing mandatory documents: {}", missing.join(", "));
            }
        }
    }

    Ok(())
}
