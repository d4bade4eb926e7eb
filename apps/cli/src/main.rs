use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    load_settings,
    render::{CompareTable, DetailsView},
    Action, ClientSettings, CompanyApi, CompareView, HttpCompanyApi, ListView, Session, View,
};
use shared::domain::CompanyId;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "company-cli", about = "Manage company records from the terminal")]
struct Cli {
    /// Backend base URL, e.g. http://127.0.0.1:5000
    #[arg(long, global = true)]
    server_url: Option<String>,
    /// chrono format pattern for founded dates
    #[arg(long, global = true)]
    date_format: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every registered company.
    List,
    /// Show every field of one company.
    Show { id: String },
    /// Compare two or more companies side by side.
    Compare { ids: Vec<String> },
    /// Register a new company.
    Create {
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Load a company, override the given fields and save it.
    Update {
        id: String,
        #[arg(long = "field", value_parser = parse_field)]
        fields: Vec<(String, String)>,
    },
    /// Delete a company. Without --yes the deletion is cancelled.
    Delete {
        id: String,
        #[arg(long)]
        yes: bool,
    },
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{raw}'"))?;
    Ok((key.trim().to_string(), value.to_string()))
}

fn resolve_settings(cli: &Cli) -> Result<ClientSettings> {
    let mut settings = load_settings().context("failed to load client settings")?;
    if let Some(url) = &cli.server_url {
        settings.server_url = url.clone();
    }
    if let Some(format) = &cli.date_format {
        settings.date_format = format.clone();
    }
    settings.validate()?;
    Ok(settings)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();
    let settings = resolve_settings(&cli)?;

    debug!(
        server_url = %settings.server_url,
        date_format = %settings.date_format,
        "resolved client settings"
    );

    let api = HttpCompanyApi::new(&settings.server_url)
        .with_context(|| format!("invalid server url '{}'", settings.server_url))?;
    let mut session = Session::new(api, settings.date_style());
    run(&mut session, cli.command).await
}

/// Dispatches one action and turns a failure it caused into an error.
async fn step<A: CompanyApi>(session: &mut Session<A>, action: Action) -> Result<()> {
    debug!(?action, "dispatching");
    session.dispatch(action).await;
    match session.failure() {
        Some(failure) => {
            warn!(failure, "command failed");
            bail!("{failure}")
        }
        None => Ok(()),
    }
}

async fn run<A: CompanyApi>(session: &mut Session<A>, command: Command) -> Result<()> {
    info!(?command, "running command");
    match command {
        Command::List => {
            step(session, Action::Navigate(View::List)).await?;
            print_list(&session.view().list);
        }
        Command::Show { id } => {
            step(session, Action::Navigate(View::List)).await?;
            step(session, Action::ShowDetails(CompanyId::new(id.clone()))).await?;
            match session.view().details {
                Some(details) => print_details(&details),
                None => bail!("no company with id {id}"),
            }
        }
        Command::Compare { ids } => {
            step(session, Action::Navigate(View::List)).await?;
            for id in ids {
                step(
                    session,
                    Action::SetSelected {
                        id: CompanyId::new(id),
                        selected: true,
                    },
                )
                .await?;
            }
            step(session, Action::Compare).await?;
            match &session.view().compare {
                CompareView::Table(table) => print_compare(table),
                CompareView::Empty { message } => println!("{message}"),
                CompareView::Idle => {}
            }
        }
        Command::Create { fields } => {
            step(session, Action::Navigate(View::Register)).await?;
            apply_fields(session, fields).await?;
            step(session, Action::Submit).await?;
        }
        Command::Update { id, fields } => {
            step(session, Action::Edit(CompanyId::new(id))).await?;
            apply_fields(session, fields).await?;
            step(session, Action::Submit).await?;
        }
        Command::Delete { id, yes } => {
            step(session, Action::Navigate(View::List)).await?;
            step(session, Action::RequestDelete(CompanyId::new(id))).await?;
            if let Some(prompt) = session.view().confirm {
                println!("{} (id {})", prompt.message, prompt.id);
            }
            if yes {
                step(session, Action::ConfirmDelete).await?;
            } else {
                step(session, Action::CancelDelete).await?;
                println!("Cancelled; pass --yes to confirm.");
            }
        }
    }

    if let Some(alert) = session.view().alert {
        println!("{alert}");
    }
    Ok(())
}

async fn apply_fields<A: CompanyApi>(
    session: &mut Session<A>,
    fields: Vec<(String, String)>,
) -> Result<()> {
    for (key, value) in fields {
        step(session, Action::SetField { key, value }).await?;
    }
    Ok(())
}

fn print_list(view: &ListView) {
    match view {
        ListView::NotLoaded => {}
        ListView::Loading { message } | ListView::Empty { message } => println!("{message}"),
        ListView::Cards(cards) => {
            for card in cards {
                println!(
                    "[{}] {}  founded: {}  employees: {}",
                    card.id, card.name, card.founded, card.employees
                );
            }
        }
    }
}

fn print_details(details: &DetailsView) {
    println!("{}", details.title);
    let width = details
        .entries
        .iter()
        .map(|e| e.label.chars().count())
        .max()
        .unwrap_or(0);
    for entry in &details.entries {
        println!("  {:<width$}  {}", entry.label, entry.value);
    }
}

fn print_compare(table: &CompareTable) {
    let mut widths: Vec<usize> = table.header.iter().map(|h| h.chars().count()).collect();
    if let Some(first) = widths.first_mut() {
        *first = table
            .rows
            .iter()
            .map(|r| r.label.chars().count())
            .fold(*first, usize::max);
    }
    for row in &table.rows {
        for (idx, cell) in row.cells.iter().enumerate() {
            if let Some(width) = widths.get_mut(idx + 1) {
                *width = (*width).max(cell.chars().count());
            }
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(" | ")
    };
    println!("{}", line(table.header.iter().map(String::as_str).collect()));
    for row in &table.rows {
        let cells = std::iter::once(row.label)
            .chain(row.cells.iter().map(String::as_str))
            .collect();
        println!("{}", line(cells));
    }
}
