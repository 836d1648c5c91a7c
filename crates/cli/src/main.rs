//! ticketbox CLI - browse events, fill the basket, scan tickets.
//!
//! # Usage
//!
//! ```bash
//! # List events, newest first, filtered by title or location
//! tbx events list --search amsterdam --sort date
//!
//! # Show the ticket tree of one event, expanding a collapsed group
//! tbx events show 5kq2x --toggle 42
//!
//! # Add a ticket and inspect the basket
//! tbx basket add 5kq2x t1
//! tbx basket show
//!
//! # Accept a decoded QR payload
//! tbx scan "TICKET-1234"
//!
//! # Switch color scheme
//! tbx theme toggle
//! ```
//!
//! # Commands
//!
//! - `events` - Event list and event detail
//! - `basket` - Show and edit the persisted basket
//! - `scan` - Feed a decoded QR payload to the scanner
//! - `theme` - Show or change the color scheme
//!
//! Configuration comes from the environment (see `ticketbox_client::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use sentry::integrations::tracing as sentry_tracing;
use ticketbox_client::AppState;
use ticketbox_client::config::ClientConfig;
use ticketbox_core::{ColorScheme, SortBy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "tbx")]
#[command(author, version, about = "Browse events and manage a ticket basket")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// Show and edit the basket
    Basket {
        #[command(subcommand)]
        action: BasketAction,
    },
    /// Accept a decoded QR code payload
    Scan {
        /// Decoded payload
        payload: String,

        /// Use the front camera
        #[arg(long)]
        front: bool,
    },
    /// Show or change the color scheme
    Theme {
        #[command(subcommand)]
        action: ThemeAction,
    },
}

#[derive(Subcommand)]
enum EventsAction {
    /// List events
    List {
        /// Case-insensitive search on title or location
        #[arg(short, long, default_value = "")]
        search: String,

        /// Sort order (`date` or `title`)
        #[arg(long, default_value_t = SortBy::Date)]
        sort: SortBy,
    },
    /// Show the ticket shop of an event
    Show {
        /// Event key
        event_key: String,

        /// Title to display instead of the shop title
        #[arg(long)]
        title: Option<String>,

        /// Group id to expand or collapse (repeatable)
        #[arg(long = "toggle")]
        toggles: Vec<i64>,
    },
}

#[derive(Subcommand)]
enum BasketAction {
    /// Show the basket
    Show,
    /// Add one ticket of a type
    Add {
        /// Event key the ticket type belongs to
        event_key: String,
        /// Ticket type key
        ticket_type_key: String,
    },
    /// Remove a line
    Remove {
        /// Ticket type key
        ticket_type_key: String,
    },
    /// Set a line's quantity (zero or less removes it)
    Set {
        /// Ticket type key
        ticket_type_key: String,
        /// New quantity
        #[arg(allow_hyphen_values = true)]
        quantity: i64,
    },
    /// Increase a line's quantity by one
    Inc {
        /// Ticket type key
        ticket_type_key: String,
    },
    /// Decrease a line's quantity by one
    Dec {
        /// Ticket type key
        ticket_type_key: String,
    },
    /// Empty the basket
    Clear,
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Show the current scheme
    Show {
        /// Print the full palette as JSON
        #[arg(long)]
        json: bool,
    },
    /// Set the scheme (`light` or `dark`)
    Set {
        /// Color scheme
        scheme: ColorScheme,
    },
    /// Switch between light and dark
    Toggle,
}

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &ClientConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

fn init_tracing() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "ticketbox_client=info,ticketbox_cli=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            init_tracing();
            tracing::error!(error = %e, "Failed to load configuration");
            std::process::exit(1);
        }
    };

    // Sentry must be initialized before the tracing subscriber
    let sentry_guard = init_sentry(&config);
    init_tracing();

    let result = run(cli, config).await;

    if let Err(e) = result {
        e.report();
        drop(sentry_guard);
        std::process::exit(1);
    }
}

async fn run(cli: Cli, config: ClientConfig) -> Result<(), CliError> {
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Events { action } => match action {
            EventsAction::List { search, sort } => {
                commands::events::list(&state, &search, sort).await?;
            }
            EventsAction::Show {
                event_key,
                title,
                toggles,
            } => {
                commands::events::show(&state, &event_key, title.as_deref(), &toggles).await?;
            }
        },
        Commands::Basket { action } => match action {
            BasketAction::Show => commands::basket::show(&state)?,
            BasketAction::Add {
                event_key,
                ticket_type_key,
            } => commands::basket::add(&state, &event_key, &ticket_type_key).await?,
            BasketAction::Remove { ticket_type_key } => {
                commands::basket::remove(&state, &ticket_type_key)?;
            }
            BasketAction::Set {
                ticket_type_key,
                quantity,
            } => commands::basket::set(&state, &ticket_type_key, quantity)?,
            BasketAction::Inc { ticket_type_key } => {
                commands::basket::increase(&state, &ticket_type_key)?;
            }
            BasketAction::Dec { ticket_type_key } => {
                commands::basket::decrease(&state, &ticket_type_key)?;
            }
            BasketAction::Clear => commands::basket::clear(&state)?,
        },
        Commands::Scan { payload, front } => commands::scan::run(&payload, front)?,
        Commands::Theme { action } => match action {
            ThemeAction::Show { json } => commands::theme::show(&state, json)?,
            ThemeAction::Set { scheme } => commands::theme::set(&state, scheme)?,
            ThemeAction::Toggle => commands::theme::toggle(&state)?,
        },
    }
    Ok(())
}
