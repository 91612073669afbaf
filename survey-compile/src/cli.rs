//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(
    name = "survey-compile",
    version,
    about = "Compile survey documents into tasks and evaluate their navigation"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// More logging (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Log output format.
    #[arg(long = "log-format", value_enum, default_value = "pretty", global = true)]
    pub log_format: LogFormatArg,

    /// Disable colors in log output.
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compile a survey document and print the task as JSON.
    Compile(CompileArgs),

    /// Print the identifier of the step that follows `--current`.
    Navigate(NavigateArgs),

    /// Fold data-group answers over the participant's current groups.
    DataGroups(DataGroupsArgs),

    /// List the built-in example documents.
    Examples,
}

/// Where the survey document comes from, and how to build it.
#[derive(Args)]
pub struct SourceArgs {
    /// Survey document (JSON).
    #[arg(value_name = "DOCUMENT", required_unless_present = "example", conflicts_with = "example")]
    pub document: Option<PathBuf>,

    /// Use a built-in example document instead of a file.
    #[arg(long, value_name = "NAME")]
    pub example: Option<String>,

    /// Factory configuration (JSON); missing fields keep their defaults.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Resolve image and HTML names against files in this directory.
    #[arg(long, value_name = "DIR")]
    pub resources: Option<PathBuf>,

    /// Identifier of the compiled task.
    #[arg(long = "task-id", value_name = "ID", default_value = "survey")]
    pub task_id: String,
}

#[derive(Args)]
pub struct CompileArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Fail when the document has build defects.
    #[arg(long = "deny-defects")]
    pub deny_defects: bool,

    /// Print compact JSON.
    #[arg(long)]
    pub compact: bool,
}

#[derive(Args)]
pub struct NavigateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Task result collected so far (JSON).
    #[arg(long, value_name = "PATH")]
    pub results: Option<PathBuf>,

    /// The step just finished; omit to get the first step.
    #[arg(long, value_name = "STEP")]
    pub current: Option<String>,
}

#[derive(Args)]
pub struct DataGroupsArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Task result collected so far (JSON).
    #[arg(long, value_name = "PATH")]
    pub results: PathBuf,

    /// The participant's current data groups.
    #[arg(long, value_name = "GROUP", value_delimiter = ',')]
    pub groups: Vec<String>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
