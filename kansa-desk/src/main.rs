//! kansa-desk - registration desk member tools
//!
//! Command line front end for the member editing core:
//! - show, edit and save member records
//! - print badges and claim day passes
//! - view logs, upgrade memberships and create invoices
//! - resolve registration client routes against the current session

mod config;
mod logger;
mod terminal;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use kansa_admin::{LogNotifier, MemberEditor};
use kansa_client::{InvoiceItem, NetworkHttpClient, UpgradeRequest};
use kansa_printer::{NetworkBadgePrinter, PrinterTarget};
use kansa_router::{ApiSession, NavigationAction, Outcome, RouteGuard};
use serde_json::{Map, Value};
use shared::util::format_timestamp;
use shared::{Membership, Record};

use config::DeskConfig;
use terminal::{TerminalPrompts, TerminalViewport};

type Editor = MemberEditor<NetworkHttpClient, NetworkBadgePrinter, TerminalPrompts, LogNotifier>;

#[derive(Parser)]
#[command(name = "kansa-desk")]
#[command(about = "Registration desk member tools")]
struct Cli {
    /// Membership API base URL
    #[arg(long, global = true)]
    api_url: Option<String>,
    /// Badge printer as unit#name
    #[arg(long, global = true)]
    printer: Option<String>,
    /// Treat the desk as locked
    #[arg(long, global = true, default_value_t = false)]
    locked: bool,
    /// Answer yes to every confirmation
    #[arg(long, short = 'y', global = true, default_value_t = false)]
    yes: bool,
    /// Log as JSON lines
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a member record and the actions available for it
    Show { id: i64 },
    /// Edit fields, e.g. `--set city=Helsinki --set paper_pubs.name=Ann`
    Edit {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
        /// Save the changes
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
    /// Print a badge or claim a day pass
    Print {
        id: i64,
        #[arg(long = "set", value_name = "FIELD=VALUE")]
        set: Vec<String>,
    },
    /// Show the audit log of a member
    Log { id: i64 },
    /// Upgrade a membership
    Upgrade {
        id: i64,
        #[arg(long)]
        membership: Option<Membership>,
        #[arg(long)]
        comment: Option<String>,
    },
    /// Create an invoice for a member's email
    Invoice {
        id: i64,
        #[arg(long)]
        category: String,
        #[arg(long = "type")]
        kind: String,
        /// Amount in cents
        #[arg(long)]
        amount: i64,
        #[arg(long)]
        comments: Option<String>,
    },
    /// Check that the configured badge printer unit is reachable
    PrinterStatus,
    /// Resolve a registration client path
    Route {
        path: String,
        /// Treat as a back/forward navigation
        #[arg(long, default_value_t = false)]
        pop: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();
    let cli = Cli::parse();
    logger::init_logger(cli.json_logs);

    let mut config = DeskConfig::from_env()?;
    if let Some(url) = cli.api_url.clone() {
        config.api_url = url;
    }
    if let Some(printer) = cli.printer.clone() {
        config.printer = Some(printer);
    }
    config.locked |= cli.locked;

    tracing::info!(api = %config.api_url, locked = config.locked, "Starting kansa-desk");

    let api = config
        .client_config()
        .build_http_client()
        .context("Failed to build HTTP client")?;
    let prompts = TerminalPrompts { assume_yes: cli.yes };
    let new_editor = |api: NetworkHttpClient| -> Editor {
        MemberEditor::new(
            api,
            NetworkBadgePrinter::default(),
            prompts,
            LogNotifier,
            config.registration(),
            config.editor_config(),
        )
    };

    match cli.command {
        Command::Show { id } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            show(&editor);
        }
        Command::Edit { id, set, apply } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            set_fields(&mut editor, &set)?;
            println!("{}", serde_json::to_string_pretty(&editor.changes())?);
            if apply {
                editor.apply().await?;
            }
        }
        Command::Print { id, set } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            set_fields(&mut editor, &set)?;
            let state = editor.print_badge().await?;
            tracing::info!(id, %state, "Badge flow finished");
        }
        Command::Log { id } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            for entry in editor.view_log().await? {
                println!(
                    "{:<24} {:<30} {}",
                    entry.timestamp.as_deref().map(format_timestamp).unwrap_or_default(),
                    entry.author.as_deref().unwrap_or("-"),
                    entry.description.as_deref().unwrap_or(""),
                );
            }
        }
        Command::Upgrade {
            id,
            membership,
            comment,
        } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            let request = UpgradeRequest {
                membership,
                paper_pubs: None,
                comment,
            };
            editor.upgrade(request).await?;
        }
        Command::Invoice {
            id,
            category,
            kind,
            amount,
            comments,
        } => {
            let mut editor = new_editor(api);
            open(&mut editor, id).await?;
            let item = InvoiceItem {
                category,
                kind,
                amount,
                comments,
                data: Map::new(),
            };
            editor.create_invoice(item).await?;
        }
        Command::PrinterStatus => printer_status(&config).await?,
        Command::Route { path, pop } => route(&config, api, &path, pop).await?,
    }

    Ok(())
}

async fn open(editor: &mut Editor, id: i64) -> anyhow::Result<()> {
    editor
        .receive(Record::new().with("id", id))
        .await
        .with_context(|| format!("Failed to load member {id}"))
}

fn show(editor: &Editor) {
    let Some(record) = editor.reconciler().baseline() else {
        return;
    };
    println!("{}", editor.title().unwrap_or_default());
    if let Some(modified) = editor.last_modified() {
        println!("Last modified {}", format_timestamp(modified));
    }
    for field in shared::fields() {
        if let Some(value) = record.get(field) {
            println!("  {:<18} {}", field, display_value(value));
        }
    }
    let actions: Vec<String> = editor
        .actions()
        .into_iter()
        .map(|a| {
            if a.enabled {
                a.label
            } else {
                format!("({})", a.label)
            }
        })
        .collect();
    println!("Actions: {}", actions.join(" | "));
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Apply `field=value` or `parent.child=value` edits to the draft
fn set_fields(editor: &mut Editor, edits: &[String]) -> anyhow::Result<()> {
    for edit in edits {
        let Some((field, value)) = edit.split_once('=') else {
            bail!("expected FIELD=VALUE, got {edit:?}");
        };
        let path: Vec<&str> = field.split('.').map(str::trim).collect();
        if path.iter().any(|p| p.is_empty()) {
            bail!("empty field name in {edit:?}");
        }
        editor.set_field(&path, value);
    }
    Ok(())
}

async fn printer_status(config: &DeskConfig) -> anyhow::Result<()> {
    let Some(configured) = config.printer.as_deref() else {
        bail!("no badge printer configured (KANSA_PRINTER or --printer)");
    };
    let target = PrinterTarget::parse(configured);
    let online = NetworkBadgePrinter::default()
        .is_reachable(&target.unit)
        .await
        .with_context(|| format!("Invalid printer {target}"))?;
    println!("{} {}", target, if online { "online" } else { "offline" });
    Ok(())
}

async fn route(
    config: &DeskConfig,
    api: NetworkHttpClient,
    path: &str,
    pop: bool,
) -> anyhow::Result<()> {
    let mut guard = RouteGuard::new(ApiSession::new(api), TerminalViewport, config.router_config());
    let action = if pop {
        NavigationAction::Pop
    } else {
        NavigationAction::Push
    };
    let navigation = guard.navigate(path, action).await?;

    for hop in &navigation.redirects {
        println!("-> {}", hop);
    }
    match navigation.outcome {
        Outcome::Render { location, route } => println!("{} {:?}", location, route),
        Outcome::External(url) => println!("external {}", url),
    }
    println!("session: {:?}", guard.state());
    Ok(())
}
