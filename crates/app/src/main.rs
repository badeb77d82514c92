use std::fmt;
use std::path::PathBuf;

use services::AppServices;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod render;
mod routes;

use routes::Screen;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownScreen { raw: String },
    InvalidIndex { raw: String },
    InvalidDbUrl { raw: String },
    MissingOperand { command: &'static str },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownScreen { raw } => write!(f, "unknown screen: {raw}"),
            ArgsError::InvalidIndex { raw } => write!(f, "invalid item index: {raw}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
            ArgsError::MissingOperand { command } => {
                write!(f, "{command} is missing an operand")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  emt-assess [options] show [home|vital-signs|drugs|equipment|summary]");
    eprintln!("  emt-assess [options] toggle <group-id> <item-index>");
    eprintln!("  emt-assess [options] reset");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <sqlite_url>     default sqlite://assessment.sqlite3");
    eprintln!("  --catalog <path>      default data/assessment-data.json");
    eprintln!("  --memory              keep progress in memory only");
    eprintln!("  --verbose             debug logging");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  ASSESS_DB_URL, ASSESS_CATALOG, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Show(Screen),
    Toggle { group: String, index: usize },
    Reset,
}

impl Command {
    fn from_operands(operands: Vec<String>) -> Result<Self, ArgsError> {
        let mut operands = operands.into_iter();
        match operands.next().as_deref() {
            None => Ok(Self::Show(Screen::Home)),
            Some("show") => {
                let screen = match operands.next() {
                    None => Screen::Home,
                    Some(raw) => {
                        Screen::from_arg(&raw).ok_or(ArgsError::UnknownScreen { raw })?
                    }
                };
                Ok(Self::Show(screen))
            }
            Some("toggle") => {
                let group = operands
                    .next()
                    .ok_or(ArgsError::MissingOperand { command: "toggle" })?;
                let raw = operands
                    .next()
                    .ok_or(ArgsError::MissingOperand { command: "toggle" })?;
                let index = raw
                    .parse()
                    .map_err(|_| ArgsError::InvalidIndex { raw: raw.clone() })?;
                Ok(Self::Toggle { group, index })
            }
            Some("reset") => Ok(Self::Reset),
            Some(other) => Err(ArgsError::UnknownArg(other.to_string())),
        }
    }
}

const DEFAULT_DB_URL: &str = "sqlite://assessment.sqlite3";

#[derive(Debug)]
struct Args {
    db_url: Option<String>,
    catalog: PathBuf,
    verbose: bool,
    command: Command,
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut db_url = Some(normalize_sqlite_url(
            std::env::var("ASSESS_DB_URL").unwrap_or_else(|_| DEFAULT_DB_URL.into()),
        ));
        let mut catalog = std::env::var("ASSESS_CATALOG")
            .map_or_else(|_| PathBuf::from("data/assessment-data.json"), PathBuf::from);
        let mut verbose = false;
        let mut operands = Vec::new();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--db" => {
                    let value = require_value(args, "--db")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidDbUrl { raw: value });
                    }
                    db_url = Some(normalize_sqlite_url(value));
                }
                "--catalog" => catalog = PathBuf::from(require_value(args, "--catalog")?),
                "--memory" => db_url = None,
                "--verbose" | "-v" => verbose = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => operands.push(arg),
            }
        }

        Ok(Self {
            db_url,
            catalog,
            verbose,
            command: Command::from_operands(operands)?,
        })
    }
}

/// Rewrite a `sqlite:` URL or bare path as `sqlite://<absolute path>`,
/// keeping any `?query` suffix.
fn normalize_sqlite_url(raw: String) -> String {
    let trimmed = raw.trim();
    if trimmed == "sqlite::memory:" {
        return trimmed.to_string();
    }

    let rest = trimmed
        .strip_prefix("sqlite://")
        .or_else(|| trimmed.strip_prefix("sqlite:"))
        .unwrap_or(trimmed);
    let (path_str, query) = match rest.split_once('?') {
        Some((path, query)) => (path, Some(query)),
        None => (rest, None),
    };
    let path = std::path::Path::new(path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(path)
    };
    match query {
        Some(query) => format!("sqlite://{}?{query}", absolute.display()),
        None => format!("sqlite://{}", absolute.display()),
    }
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let args = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    init_tracing(args.verbose);

    // Storage bootstrap stays in the binary glue so core/services stay pure.
    let services = match &args.db_url {
        Some(db_url) => {
            prepare_sqlite_file(db_url)?;
            AppServices::new_sqlite(db_url, &args.catalog).await?
        }
        None => AppServices::new_in_memory(&args.catalog).await,
    };
    let mut session = services.open_session().await;

    match args.command {
        Command::Show(screen) => {
            print!("{}", render::screen(&session, screen)?);
        }
        Command::Toggle { group, index } => {
            let checked = session.toggle(&group, index).await?;
            info!(group = %group, index, checked, "item updated");
            let screen = services
                .catalog()
                .group(&group)
                .map_or(Screen::Home, |g| Screen::Section(g.section()));
            print!("{}", render::screen(&session, screen)?);
        }
        Command::Reset => {
            session.reset().await;
            info!("progress reset");
            print!("{}", render::screen(&session, Screen::Summary)?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
