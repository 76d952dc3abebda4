//! ticket-dashboard: 工单看板命令行

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ticket_client::{
    ClientConfig, CustomerProfile, DEFAULT_BASE_URL, TicketClient, TicketEscalate, TicketFilter,
    TicketRespond, TicketSource, TicketStatus, TicketUpsert, render,
};

/// 看板自身的身份，用作升级操作人
const DASHBOARD_ACTOR: &str = "supportAgent1";

/// 可升级到的团队
const TEAMS: [&str; 2] = ["Engineering", "Product"];

#[derive(Parser, Debug)]
#[command(
    name = "ticket-dashboard",
    version,
    about = "Support desk dashboard for the ticket server",
    long_about = None
)]
struct Cli {
    /// Ticket server base URL.
    #[arg(long, env = "TICKET_API_URL", default_value = DEFAULT_BASE_URL, global = true)]
    url: String,

    /// Request timeout in seconds.
    #[arg(long, default_value_t = 30, global = true)]
    timeout: u64,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List tickets, optionally filtered by source and status
    List {
        #[arg(long)]
        source: Option<TicketSource>,
        #[arg(long)]
        status: Option<TicketStatus>,
    },

    /// Show one ticket in full
    Show { id: i64 },

    /// Append a response message to a ticket
    Respond {
        id: i64,
        content: String,
        #[arg(long)]
        sender: Option<String>,
    },

    /// Escalate a ticket to a team
    Escalate {
        id: i64,
        #[arg(value_parser = TEAMS)]
        team: String,
        #[arg(long = "by", default_value = DASHBOARD_ACTOR)]
        escalated_by: String,
    },

    /// Create a ticket, or refresh it when subject and email already exist
    Create {
        #[arg(long)]
        subject: String,
        #[arg(long)]
        source: TicketSource,
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        company: String,
        #[arg(long)]
        steps: Option<String>,
    },

    /// Demo data from the upstream placeholder API
    #[command(subcommand)]
    Demo(DemoCommand),

    /// Search system assets (repositories)
    Assets { query: String },

    /// Server health
    Health,
}

#[derive(Subcommand, Debug)]
enum DemoCommand {
    Tickets,
    Customers,
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

async fn run(cli: Cli, client: TicketClient) -> anyhow::Result<()> {
    match cli.command {
        Commands::List { source, status } => {
            let filter = TicketFilter { source, status };
            let tickets = client.list_tickets(&filter).await?;
            if cli.json {
                return print_json(&tickets);
            }
            print!("{}", render::ticket_list(&tickets));
        }
        Commands::Show { id } => {
            let ticket = client.get_ticket(id).await?;
            if cli.json {
                return print_json(&ticket);
            }
            print!("{}", render::ticket_detail(&ticket));
        }
        Commands::Respond { id, content, sender } => {
            let ticket = client
                .respond(id, &TicketRespond { content, sender })
                .await?;
            if cli.json {
                return print_json(&ticket);
            }
            println!(
                "Response added to #{} ({} messages)",
                ticket.id,
                ticket.messages.len()
            );
        }
        Commands::Escalate {
            id,
            team,
            escalated_by,
        } => {
            let req = TicketEscalate {
                team,
                escalated_by: Some(escalated_by),
            };
            let ticket = client.escalate(id, &req).await?;
            if cli.json {
                return print_json(&ticket);
            }
            println!(
                "Ticket #{} escalated to {}",
                ticket.id,
                ticket.assigned_team.as_deref().unwrap_or("-")
            );
        }
        Commands::Create {
            subject,
            source,
            name,
            email,
            company,
            steps,
        } => {
            let req = TicketUpsert {
                subject: Some(subject),
                source: Some(source),
                customer_profile: Some(CustomerProfile::new(name, email, company)),
                reproduction_steps: steps,
            };
            let outcome = client.upsert_ticket(&req).await?;
            if cli.json {
                return print_json(&outcome.ticket);
            }
            let verb = if outcome.created { "Created" } else { "Updated" };
            println!("{} ticket #{}", verb, outcome.ticket.id);
        }
        Commands::Demo(DemoCommand::Tickets) => {
            let items = client.demo_tickets().await?;
            if cli.json {
                return print_json(&items);
            }
            print!("{}", render::demo_tickets(&items));
        }
        Commands::Demo(DemoCommand::Customers) => {
            let items = client.demo_customers().await?;
            if cli.json {
                return print_json(&items);
            }
            print!("{}", render::demo_customers(&items));
        }
        Commands::Assets { query } => {
            let items = client.search_assets(&query).await?;
            if cli.json {
                return print_json(&items);
            }
            print!("{}", render::assets(&items));
        }
        Commands::Health => print_json(&client.health().await?)?,
    }
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "ticket_client=debug,ticket_dashboard=debug"
    } else {
        "warn"
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let client = ClientConfig::new(&cli.url)
        .with_timeout(cli.timeout)
        .build_client()
        .context("failed to build HTTP client")?;
    let base_url = client.base_url().to_string();
    tracing::debug!(url = %base_url, "Dashboard connecting");

    run(cli, client)
        .await
        .with_context(|| format!("request to {base_url} failed"))
}
