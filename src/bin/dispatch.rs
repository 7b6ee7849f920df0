//! Command-line front end for the warehouse task store.
//!
//! Usage:
//!
//! ```text
//! dispatch [--database <path>] <command>
//! ```
//!
//! Commands print JSON to standard output; logs go to standard error. A
//! typical session:
//!
//! ```text
//! dispatch init
//! dispatch create T-100 --comment "rush order" --assembly-count 3
//! dispatch set-status 1 in_progress
//! dispatch import tasks.xlsx --policy best-effort
//! dispatch list --status new
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use cap_std::ambient_authority;
use cap_std::fs_utf8::Dir;
use clap::{Args, Parser, Subcommand, ValueEnum};
use eyre::{WrapErr, eyre};
use mockable::DefaultClock;
use serde_json::{Value, json};
use std::io::{self, Write};
use std::sync::Arc;
use tracing::info;
use warehouse_dispatch::{
    config::DispatchConfig,
    import::{
        adapters::AutoSheetReader,
        domain::ImportPolicy,
        services::{SpreadsheetImportService, preview},
    },
    task::{
        adapters::sqlite::SqliteTaskRepository,
        domain::TaskId,
        services::{
            CreateTaskRequest, SetTaskStatusRequest, TaskLifecycleService, UpdateTaskRequest,
        },
    },
    telemetry,
};

type Tasks = TaskLifecycleService<SqliteTaskRepository, DefaultClock>;

#[derive(Debug, Parser)]
#[command(name = "dispatch", version, about = "Warehouse production task tracking")]
struct Cli {
    #[command(flatten)]
    config: DispatchConfig,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create the task table if it does not exist.
    Init,
    /// Create a single task.
    Create {
        /// Unique task number.
        task_number: String,
        /// Free-text comment.
        #[arg(long)]
        comment: Option<String>,
        /// Number of assemblies; defaults to 1.
        #[arg(long)]
        assembly_count: Option<i64>,
        /// Creator identity; defaults to the configured creator.
        #[arg(long)]
        created_by: Option<String>,
    },
    /// Show one task.
    Get {
        /// Task identifier.
        id: i64,
    },
    /// List tasks newest first.
    List {
        /// Only list tasks with this status.
        #[arg(long)]
        status: Option<String>,
    },
    /// Change the comment, assembly count or status of a task.
    Update {
        /// Task identifier.
        id: i64,
        /// New comment.
        #[arg(long)]
        comment: Option<String>,
        /// New assembly count.
        #[arg(long)]
        assembly_count: Option<i64>,
        /// New status.
        #[arg(long)]
        status: Option<String>,
    },
    /// Change the status of a task.
    SetStatus {
        /// Task identifier.
        id: i64,
        /// New status.
        status: String,
    },
    /// Create one task per spreadsheet data row.
    Import {
        #[command(flatten)]
        file: SheetFile,
        /// Behaviour when a row is refused.
        #[arg(long, value_enum, default_value_t = PolicyArg::AllOrNothing)]
        policy: PolicyArg,
    },
    /// Show spreadsheet rows as header/value mappings without storing them.
    Preview {
        #[command(flatten)]
        file: SheetFile,
    },
}

#[derive(Debug, Clone, Args)]
struct SheetFile {
    /// Spreadsheet to read (`.csv`, `.tsv`, `.xlsx`, `.xls`, `.ods`, ...).
    path: Utf8PathBuf,
    /// Field delimiter for delimited text.
    #[arg(long, default_value_t = ',')]
    delimiter: char,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Store every row or none.
    AllOrNothing,
    /// Store valid rows and report the rest.
    BestEffort,
}

impl From<PolicyArg> for ImportPolicy {
    fn from(value: PolicyArg) -> Self {
        match value {
            PolicyArg::AllOrNothing => Self::AllOrNothing,
            PolicyArg::BestEffort => Self::BestEffort,
        }
    }
}

#[tokio::main]
async fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    cli.config.validate()?;
    telemetry::init(cli.config.log.as_deref())?;

    let output = run(cli).await?;

    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &output)?;
    writeln!(stdout)?;
    Ok(())
}

async fn run(cli: Cli) -> eyre::Result<Value> {
    let Cli { config, command } = cli;

    match command {
        Command::Init => {
            open_store(&config).await?;
            Ok(json!({ "database": config.database.as_str() }))
        }
        Command::Create {
            task_number,
            comment,
            assembly_count,
            created_by,
        } => {
            let mut request = CreateTaskRequest::new(task_number);
            if let Some(text) = comment {
                request = request.with_comment(text);
            }
            if let Some(count) = assembly_count {
                request = request.with_assembly_count(count);
            }
            if let Some(creator) = created_by {
                request = request.with_created_by(creator);
            }
            let tasks = open_store(&config).await?;
            Ok(serde_json::to_value(tasks.create(request).await?)?)
        }
        Command::Get { id } => {
            let tasks = open_store(&config).await?;
            Ok(serde_json::to_value(tasks.get(TaskId::new(id)).await?)?)
        }
        Command::List { status } => {
            let tasks = open_store(&config).await?;
            Ok(serde_json::to_value(tasks.list(status.as_deref()).await?)?)
        }
        Command::Update {
            id,
            comment,
            assembly_count,
            status,
        } => {
            let mut request = UpdateTaskRequest::new(TaskId::new(id));
            if let Some(text) = comment {
                request = request.with_comment(text);
            }
            if let Some(count) = assembly_count {
                request = request.with_assembly_count(count);
            }
            if let Some(wanted) = status {
                request = request.with_status(wanted);
            }
            let tasks = open_store(&config).await?;
            Ok(serde_json::to_value(tasks.update(request).await?)?)
        }
        Command::SetStatus { id, status } => {
            let tasks = open_store(&config).await?;
            let request = SetTaskStatusRequest::new(TaskId::new(id), status);
            Ok(serde_json::to_value(tasks.set_status(request).await?)?)
        }
        Command::Import { file, policy } => {
            let (reader, bytes) = load_sheet(&file)?;
            let importer = SpreadsheetImportService::new(open_store(&config).await?);
            let report = importer
                .bulk_create(&reader, &bytes, policy.into())
                .await?;
            Ok(serde_json::to_value(report)?)
        }
        Command::Preview { file } => {
            let (reader, bytes) = load_sheet(&file)?;
            Ok(serde_json::to_value(preview(&reader, &bytes)?)?)
        }
    }
}

async fn open_store(config: &DispatchConfig) -> eyre::Result<Tasks> {
    let repository = SqliteTaskRepository::connect(config.database_url(), config.pool_size)
        .wrap_err_with(|| format!("failed to open database '{}'", config.database))?;
    repository.initialize_schema().await?;
    info!(database = %config.database, "task store ready");
    Ok(
        TaskLifecycleService::new(Arc::new(repository), Arc::new(DefaultClock))
            .with_default_creator(&config.default_creator),
    )
}

fn load_sheet(file: &SheetFile) -> eyre::Result<(AutoSheetReader, Vec<u8>)> {
    let reader = AutoSheetReader::for_path(&file.path, delimiter_byte(file.delimiter)?)?;
    let bytes = read_file(&file.path)?;
    Ok((reader, bytes))
}

fn delimiter_byte(delimiter: char) -> eyre::Result<u8> {
    u8::try_from(delimiter)
        .ok()
        .filter(u8::is_ascii)
        .ok_or_else(|| eyre!("delimiter '{delimiter}' must be a single ASCII character"))
}

fn read_file(path: &Utf8Path) -> eyre::Result<Vec<u8>> {
    let parent = path
        .parent()
        .filter(|dir| !dir.as_str().is_empty())
        .unwrap_or_else(|| Utf8Path::new("."));
    let file_name = path
        .file_name()
        .ok_or_else(|| eyre!("'{path}' does not name a file"))?;
    let dir = Dir::open_ambient_dir(parent, ambient_authority())
        .wrap_err_with(|| format!("failed to open directory '{parent}'"))?;
    dir.read(file_name)
        .wrap_err_with(|| format!("failed to read '{path}'"))
}
