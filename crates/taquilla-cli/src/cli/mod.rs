//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use taquilla_core::api::ApiClient;
use taquilla_core::config;

mod commands;

#[derive(Parser)]
#[command(name = "taquilla")]
#[command(version = "1.0")]
#[command(about = "Taquilla ticketing platform client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Sign in to the platform
    Login {
        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Create an account and sign in
    Register {
        /// Display name
        #[arg(long)]
        name: String,

        /// Account email
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,
    },

    /// Sign out (clear the stored session)
    Logout,

    /// Show the signed-in user
    Whoami,

    /// Browse published events
    Events {
        #[command(subcommand)]
        command: EventCommands,
    },

    /// Manage your ticket orders
    Orders {
        #[command(subcommand)]
        command: OrderCommands,
    },

    /// Redeem a scanned ticket code at the door
    Checkin {
        /// Decoded ticket code
        #[arg(value_name = "CODE")]
        code: String,
    },

    /// Organizer dashboard
    Admin {
        #[command(subcommand)]
        command: AdminCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum EventCommands {
    /// Lists published events
    List,
    /// Shows one event with its ticket types
    Show {
        /// The ID of the event to show
        #[arg(value_name = "EVENT_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum OrderCommands {
    /// Lists your orders
    List,
    /// Shows one order with its tickets
    Show {
        /// The ID of the order to show
        #[arg(value_name = "ORDER_ID")]
        id: i64,
    },
    /// Places an order for an event
    Buy {
        /// Event to buy tickets for
        #[arg(long, value_name = "EVENT_ID")]
        event: i64,

        /// Ticket type within the event
        #[arg(long, value_name = "TICKET_TYPE_ID")]
        ticket_type: Option<i64>,

        /// Number of tickets
        #[arg(long, default_value_t = 1)]
        quantity: u32,
    },
}

#[derive(clap::Subcommand)]
enum AdminCommands {
    /// Lists your events, drafts included
    Events,
    /// Creates a draft event
    Create {
        /// Event name
        #[arg(long)]
        name: String,

        /// Venue name
        #[arg(long)]
        venue: String,

        /// Start time (RFC 3339, e.g. 2026-09-01T20:00:00Z)
        #[arg(long, value_name = "WHEN")]
        starts_at: String,

        /// Optional description
        #[arg(long)]
        description: Option<String>,
    },
    /// Publishes a draft event
    Publish {
        /// The ID of the event to publish
        #[arg(value_name = "EVENT_ID")]
        id: i64,
    },
    /// Adds a ticket type to an event
    AddTickets {
        /// Event to add the ticket type to
        #[arg(value_name = "EVENT_ID")]
        event: i64,

        /// Ticket type name
        #[arg(long)]
        name: String,

        /// Price in cents
        #[arg(long, value_name = "CENTS")]
        price: i64,

        /// Quantity on sale
        #[arg(long)]
        quantity: i64,
    },
    /// Shows sales counters for an event
    Stats {
        /// The ID of the event
        #[arg(value_name = "EVENT_ID")]
        id: i64,
    },
    /// Lists attendees of an event
    Attendees {
        /// The ID of the event
        #[arg(value_name = "EVENT_ID")]
        id: i64,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt::init();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

fn build_client() -> Result<ApiClient> {
    let config = config::Config::load().context("load config")?;
    ApiClient::from_config(&config).context("build API client")
}

async fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Login { email, password } => {
            commands::auth::login(&build_client()?, &email, &password).await
        }
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&build_client()?, &name, &email, &password).await,
        Commands::Logout => commands::auth::logout(),
        Commands::Whoami => commands::auth::whoami(),
        Commands::Events { command } => match command {
            EventCommands::List => commands::events::list(&build_client()?).await,
            EventCommands::Show { id } => commands::events::show(&build_client()?, id).await,
        },
        Commands::Orders { command } => match command {
            OrderCommands::List => commands::orders::list(&build_client()?).await,
            OrderCommands::Show { id } => commands::orders::show(&build_client()?, id).await,
            OrderCommands::Buy {
                event,
                ticket_type,
                quantity,
            } => commands::orders::buy(&build_client()?, event, ticket_type, quantity).await,
        },
        Commands::Checkin { code } => commands::checkin::run(&build_client()?, &code).await,
        Commands::Admin { command } => match command {
            AdminCommands::Events => commands::admin::events(&build_client()?).await,
            AdminCommands::Create {
                name,
                venue,
                starts_at,
                description,
            } => {
                commands::admin::create(&build_client()?, &name, &venue, &starts_at, description)
                    .await
            }
            AdminCommands::Publish { id } => commands::admin::publish(&build_client()?, id).await,
            AdminCommands::AddTickets {
                event,
                name,
                price,
                quantity,
            } => {
                commands::admin::add_tickets(&build_client()?, event, &name, price, quantity).await
            }
            AdminCommands::Stats { id } => commands::admin::stats(&build_client()?, id).await,
            AdminCommands::Attendees { id } => {
                commands::admin::attendees(&build_client()?, id).await
            }
        },
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
