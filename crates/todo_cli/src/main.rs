//! `todo` command-line entry point.
//!
//! # Responsibility
//! - Parse flags and select exactly one store operation per invocation.
//! - Print results and map failures to a non-zero exit code.
//!
//! # Invariants
//! - All item rules live in `todo_core`; this binary only formats output.

use clap::{ArgGroup, Parser};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::PathBuf;
use std::process::ExitCode;
use todo_core::{
    default_log_level, format_item, init_logging, parse_item, Item, ItemId, LogLevel,
    LogSettings, LoggingError, ServiceError, StoreConfig, TodoService, DEFAULT_DB_PATH,
};

#[derive(Debug, Parser)]
#[command(name = "todo", version)]
#[command(about = "Manage todo items stored in a JSON file")]
#[command(group(
    ArgGroup::new("operation")
        .required(true)
        .args(["list", "restore", "query", "add", "update", "delete"])
))]
struct Cli {
    /// Backing JSON file.
    #[arg(long, env = "TODO_DB", default_value = DEFAULT_DB_PATH)]
    db: PathBuf,

    /// Backup file used by --restore [default: <db>.bak]
    #[arg(long, env = "TODO_BACKUP")]
    backup: Option<PathBuf>,

    /// trace|debug|info|warn|error [default: debug in debug builds, info otherwise]
    #[arg(long, env = "TODO_LOG_LEVEL")]
    log_level: Option<String>,

    /// Directory for rolling log files; logging is off when unset.
    #[arg(long, env = "TODO_LOG_DIR")]
    log_dir: Option<PathBuf>,

    /// List all items.
    #[arg(short, long)]
    list: bool,

    /// Restore the backing file from the backup file.
    #[arg(short, long)]
    restore: bool,

    /// Show one item by id.
    #[arg(short, long, value_name = "ID", allow_negative_numbers = true)]
    query: Option<ItemId>,

    /// Add an item from a JSON object, e.g. '{"id":1,"title":"x","isDone":false}'.
    #[arg(short, long, value_name = "JSON")]
    add: Option<String>,

    /// Replace an existing item from a JSON object.
    #[arg(short, long, value_name = "JSON")]
    update: Option<String>,

    /// Delete an item by id.
    #[arg(short, long, value_name = "ID", allow_negative_numbers = true)]
    delete: Option<ItemId>,

    /// Set the done flag of the item selected with --query.
    #[arg(
        short,
        long,
        value_name = "BOOL",
        requires = "query",
        conflicts_with_all = ["list", "restore", "add", "update", "delete"]
    )]
    status: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation<'a> {
    List,
    Restore,
    Query(ItemId),
    SetStatus(ItemId, bool),
    Add(&'a str),
    Update(&'a str),
    Delete(ItemId),
}

impl Operation<'_> {
    fn name(self) -> &'static str {
        match self {
            Self::List => "list",
            Self::Restore => "restore",
            Self::Query(_) => "query",
            Self::SetStatus(..) => "status",
            Self::Add(_) => "add",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
        }
    }
}

impl Cli {
    fn operation(&self) -> Option<Operation<'_>> {
        if self.list {
            return Some(Operation::List);
        }
        if self.restore {
            return Some(Operation::Restore);
        }
        if let Some(id) = self.query {
            return Some(match self.status {
                Some(is_done) => Operation::SetStatus(id, is_done),
                None => Operation::Query(id),
            });
        }
        if let Some(json) = self.add.as_deref() {
            return Some(Operation::Add(json));
        }
        if let Some(json) = self.update.as_deref() {
            return Some(Operation::Update(json));
        }
        self.delete.map(Operation::Delete)
    }

    fn store_config(&self) -> StoreConfig {
        let config = StoreConfig::new(&self.db);
        match &self.backup {
            Some(backup) => config.with_backup(backup),
            None => config,
        }
    }

    fn log_settings(&self) -> Result<Option<LogSettings>, LoggingError> {
        let Some(dir) = &self.log_dir else {
            return Ok(None);
        };
        let level = match self.log_level.as_deref() {
            Some(value) => value.parse::<LogLevel>()?,
            None => default_log_level(),
        };
        Ok(Some(LogSettings::new(level, dir)))
    }
}

#[derive(Debug)]
enum CliError {
    NoOperation,
    Logging(LoggingError),
    InvalidItem {
        flag: &'static str,
        source: ServiceError,
    },
    Service(ServiceError),
}

impl Display for CliError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoOperation => f.write_str("no operation selected"),
            Self::Logging(err) => write!(f, "{err}"),
            Self::InvalidItem { flag, source } => write!(
                f,
                "--{flag} requires a valid JSON todo item string: {source}"
            ),
            Self::Service(err) => write!(f, "{err}"),
        }
    }
}

impl Error for CliError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::NoOperation => None,
            Self::Logging(err) => Some(err),
            Self::InvalidItem { source, .. } => Some(source),
            Self::Service(err) => Some(err),
        }
    }
}

impl From<LoggingError> for CliError {
    fn from(value: LoggingError) -> Self {
        Self::Logging(value)
    }
}

impl From<ServiceError> for CliError {
    fn from(value: ServiceError) -> Self {
        Self::Service(value)
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(&cli) {
        Ok(()) => {
            println!("Ok");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("event=cli_run module=cli status=error error={err}");
            eprintln!("Error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    if let Some(settings) = cli.log_settings()? {
        init_logging(&settings)?;
    }

    let operation = cli.operation().ok_or(CliError::NoOperation)?;
    info!("event=cli_run module=cli status=start operation={}", operation.name());

    let mut service = TodoService::open(cli.store_config())?;
    match operation {
        Operation::List => {
            let items = service.get_all_items();
            for item in &items {
                println!("{}", format_item(item));
            }
            println!("THERE ARE {} ITEMS IN THE DB", items.len());
        }
        Operation::Restore => {
            service.restore_from_backup()?;
            println!("Database restored from backup file");
        }
        Operation::Query(id) => {
            let item = service.get_item(id)?;
            println!("{}", format_item(&item));
        }
        Operation::SetStatus(id, is_done) => service.change_done_status(id, is_done)?,
        Operation::Add(json) => service.add_item(parse_flag_item("add", json)?)?,
        Operation::Update(json) => service.update_item(parse_flag_item("update", json)?)?,
        Operation::Delete(id) => service.delete_item(id)?,
    }

    info!("event=cli_run module=cli status=ok operation={}", operation.name());
    Ok(())
}

fn parse_flag_item(flag: &'static str, json: &str) -> Result<Item, CliError> {
    parse_item(json).map_err(|source| CliError::InvalidItem { flag, source })
}
