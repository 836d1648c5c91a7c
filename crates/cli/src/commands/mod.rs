//! Subcommand implementations.
//!
//! Views render to strings; commands write them to stdout. Logs go to
//! stderr so that output stays pipeable.

pub mod basket;
pub mod events;
pub mod scan;
pub mod theme;

use std::io::Write;

use thiserror::Error;

/// Errors that can end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Client operation failed.
    #[error(transparent)]
    Client(#[from] ticketbox_client::Error),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),

    /// Output could not be encoded.
    #[error("Encoding error: {0}")]
    Encode(#[from] serde_json::Error),

    /// The event list could not be loaded.
    #[error("Events unavailable: {0}")]
    EventsUnavailable(String),
}

impl From<ticketbox_client::catalog::CatalogError> for CliError {
    fn from(err: ticketbox_client::catalog::CatalogError) -> Self {
        Self::Client(err.into())
    }
}

impl CliError {
    /// Log the error, capturing internal client failures to Sentry.
    pub fn report(&self) {
        match self {
            Self::Client(err) => err.report(),
            Self::Output(_) | Self::Encode(_) | Self::EventsUnavailable(_) => {
                tracing::error!(error = %self, "Command failed");
            }
        }
    }
}

/// Write a rendered view followed by a newline.
fn print(text: &str) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
