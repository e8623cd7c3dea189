use crate::commands::{
    run_clear, run_export, run_fields, run_list, run_reset, run_submit, ExportArgs, SubmitArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use job_intake::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Job Application Intake",
    about = "Collect, validate, and manage job applications from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(flatten)]
    storage: StorageArgs,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Validate an application and store it when every field passes
    Submit(SubmitArgs),
    /// Show the stored applications as cards
    List,
    /// Write every stored application to a JSON file
    Export(ExportArgs),
    /// Delete every stored application
    Clear,
    /// Wipe stored data after a failure and start from an empty list
    Reset,
    /// Describe the form fields and their input kinds
    Fields,
}

#[derive(Args, Debug, Default)]
pub(crate) struct StorageArgs {
    /// Override the directory holding stored applications
    #[arg(long, global = true)]
    pub(crate) data_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let storage = cli.storage;
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args, storage).await,
        Command::Submit(args) => run_submit(args, storage),
        Command::List => run_list(storage),
        Command::Export(args) => run_export(args, storage),
        Command::Clear => run_clear(storage),
        Command::Reset => run_reset(storage),
        Command::Fields => run_fields(storage),
    }
}
