//! Subscribe/unsubscribe commands - newsletter management

use crate::cli::output::{self, colors};
use crate::cli::OutputFormat;
use crate::core::services::Services;
use crate::core::subscription::{validate_email, SubscribeOutcome, UnsubscribeOutcome};
use crate::core::types::SubscriptionResponse;
use clap::Args;
use std::sync::Arc;

/// Arguments for the subscribe command
#[derive(Args, Debug)]
pub struct SubscribeArgs {
    /// Email address to subscribe
    pub email: String,

    /// Signup source recorded with the subscriber
    #[arg(long, short = 's')]
    pub source: Option<String>,
}

/// Arguments for the unsubscribe command
#[derive(Args, Debug)]
pub struct UnsubscribeArgs {
    /// Email address to remove
    pub email: String,

    /// Optional reason passed to the CMS
    #[arg(long, short = 'r')]
    pub reason: Option<String>,
}

/// Execute the subscribe command
pub async fn execute_subscribe(
    args: SubscribeArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = validate_email(&args.email)?;
    let gateway = services.newsletter()?;
    let source = args
        .source
        .as_deref()
        .unwrap_or(services.config.newsletter.default_source.as_str());
    let outcome = gateway.subscribe(&email, source).await?;

    let response = SubscriptionResponse {
        status: outcome.as_str().to_string(),
        email,
    };

    match format {
        OutputFormat::Human => match outcome {
            SubscribeOutcome::Subscribed => {
                output::print_success(&format!("Subscribed {}", response.email));
            }
            SubscribeOutcome::AlreadySubscribed => {
                println!(
                    "{} is already subscribed",
                    colors::label(&response.email)
                );
            }
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}

/// Execute the unsubscribe command
pub async fn execute_unsubscribe(
    args: UnsubscribeArgs,
    services: &Arc<Services>,
    format: OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let email = validate_email(&args.email)?;
    let gateway = services.newsletter()?;
    let outcome = gateway.unsubscribe(&email, args.reason.as_deref()).await?;

    let response = SubscriptionResponse {
        status: outcome.as_str().to_string(),
        email,
    };

    match format {
        OutputFormat::Human => match outcome {
            UnsubscribeOutcome::Unsubscribed => {
                output::print_success(&format!("Unsubscribed {}", response.email));
            }
            UnsubscribeOutcome::NotFound => {
                output::print_warning(&format!("{} was not subscribed", response.email));
            }
        },
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&response)?);
        }
    }

    Ok(())
}
