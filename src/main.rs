use clap::{Parser, Subcommand};
use clientes::config::{Config, BASE_URL_ENV};
use clientes::{cliente, ApiClient, ClienteSession, ClientesBackend, FormField, Notice};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "clientes", about = "Customer records client and name normalizer")]
struct Cli {
    /// Config file path (default: clientes.config.json or config/clientes.config.json)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// API base URL, overrides config and CLIENTES_API_URL
    #[arg(long, global = true)]
    base_url: Option<String>,

    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the normalized form of each argument (or of each stdin line)
    Normalize { text: Vec<String> },
    /// List customers
    List {
        /// Only customers whose name contains QUERY, ignoring accents and case
        #[arg(long)]
        search: Option<String>,
        /// Print JSON instead of tab-separated lines
        #[arg(long)]
        json: bool,
    },
    /// Create a customer
    Create {
        #[arg(long)]
        nombre: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        celular: String,
    },
    /// Update fields of an existing customer
    Update {
        id: String,
        #[arg(long)]
        nombre: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        celular: Option<String>,
    },
    /// Delete a customer
    Delete { id: String },
}

fn die(msg: &str) -> ! {
    eprintln!("error: {}", msg);
    process::exit(1);
}

fn notice_message(notice: Option<&Notice>, fallback: &str) -> String {
    notice
        .map(|n| n.message.clone())
        .unwrap_or_else(|| fallback.to_string())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(path: Option<&Path>, base_url: Option<String>) -> Config {
    let mut config =
        Config::load(path).unwrap_or_else(|e| die(&format!("cannot load config: {}", e)));
    config
        .apply_overrides(std::env::var(BASE_URL_ENV).ok(), base_url)
        .unwrap_or_else(|e| die(&e.to_string()));
    config
}

fn run_normalize<R: BufRead>(text: &[String], input: R, out: &mut dyn Write) -> io::Result<()> {
    let lines = if text.is_empty() {
        clientes::normalize_lines(input)?
    } else {
        text.iter().map(|t| clientes::normalize(t)).collect()
    };
    for line in lines {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

async fn refresh<B: ClientesBackend>(session: &mut ClienteSession<B>) -> Result<(), String> {
    if session.refresh().await {
        Ok(())
    } else {
        Err(notice_message(session.notice(), "cannot fetch clientes"))
    }
}

/// Run one API-backed command. The error is the message to report.
async fn run<B: ClientesBackend>(
    cmd: Cmd,
    session: &mut ClienteSession<B>,
    out: &mut dyn Write,
) -> Result<(), String> {
    match cmd {
        Cmd::Normalize { text } => {
            return run_normalize(&text, io::empty(), out).map_err(|e| e.to_string());
        }
        Cmd::List { search, json } => {
            refresh(session).await?;
            let shown = session.search(search.as_deref().unwrap_or(""));
            let text = if json {
                let mut s = serde_json::to_string_pretty(&shown).map_err(|e| e.to_string())?;
                s.push('\n');
                s
            } else {
                clientes::format_table(&shown)
            };
            write!(out, "{}", text).map_err(|e| e.to_string())?;
            return Ok(());
        }
        Cmd::Create {
            nombre,
            email,
            celular,
        } => {
            session.open_create();
            session.set_field(FormField::Nombre, nombre);
            session.set_field(FormField::Email, email);
            session.set_field(FormField::Celular, celular);
            if !session.save().await {
                return Err(notice_message(session.notice(), "cannot save cliente"));
            }
        }
        Cmd::Update {
            id,
            nombre,
            email,
            celular,
        } => {
            refresh(session).await?;
            let current = cliente::find_by_id(session.clientes(), &id)
                .cloned()
                .ok_or_else(|| clientes::Error::NotFound(id.clone()).to_string())?;
            session.open_update(&current);
            for (field, value) in [
                (FormField::Nombre, nombre),
                (FormField::Email, email),
                (FormField::Celular, celular),
            ] {
                if let Some(v) = value {
                    session.set_field(field, v);
                }
            }
            if !session.save().await {
                return Err(notice_message(session.notice(), "cannot save cliente"));
            }
        }
        Cmd::Delete { id } => {
            if !session.delete(&id).await {
                return Err(notice_message(session.notice(), "cannot delete cliente"));
            }
        }
    }
    writeln!(out, "{}", Notice::success().message).map_err(|e| e.to_string())
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Cmd::Normalize { text } = &cli.cmd {
        run_normalize(text, io::stdin().lock(), &mut io::stdout())
            .unwrap_or_else(|e| die(&format!("cannot read stdin: {}", e)));
        return;
    }

    let config = load_config(cli.config.as_deref(), cli.base_url);
    let api = ApiClient::new(&config).unwrap_or_else(|e| die(&e.to_string()));
    let mut session = ClienteSession::new(api);

    if let Err(msg) = run(cli.cmd, &mut session, &mut io::stdout()).await {
        die(&msg);
    }
}
