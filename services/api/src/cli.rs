use crate::commands::{
    run_call_metrics, run_classify, run_list_loads, run_search_loads, run_verify_carrier,
    ClassifyArgs, DatasetArgs, SearchArgs, VerifyArgs,
};
use crate::server;
use clap::{Args, Parser, Subcommand};
use freight_desk::error::AppError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "Freight Desk",
    about = "Serve and query the freight brokerage API from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Inspect the load dataset
    Loads {
        #[command(subcommand)]
        command: LoadsCommand,
    },
    /// Check carriers against the configured registry
    Carriers {
        #[command(subcommand)]
        command: CarriersCommand,
    },
    /// Classify calls and show call metrics
    Calls {
        #[command(subcommand)]
        command: CallsCommand,
    },
}

#[derive(Subcommand, Debug)]
enum LoadsCommand {
    /// Print every load in dataset order
    List(DatasetArgs),
    /// Filter loads by lane, equipment, and rate
    Search(SearchArgs),
}

#[derive(Subcommand, Debug)]
enum CarriersCommand {
    /// Verify an MC number
    Verify(VerifyArgs),
}

#[derive(Subcommand, Debug)]
enum CallsCommand {
    /// Classify a call from its transcript and negotiation details
    Classify(ClassifyArgs),
    /// Print the call metrics snapshot
    Metrics,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
    /// Override the load dataset path (.json or .csv)
    #[arg(long)]
    pub(crate) loads: Option<PathBuf>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Loads {
            command: LoadsCommand::List(args),
        } => run_list_loads(args),
        Command::Loads {
            command: LoadsCommand::Search(args),
        } => run_search_loads(args),
        Command::Carriers {
            command: CarriersCommand::Verify(args),
        } => run_verify_carrier(args).await,
        Command::Calls {
            command: CallsCommand::Classify(args),
        } => run_classify(args),
        Command::Calls {
            command: CallsCommand::Metrics,
        } => run_call_metrics(),
    }
}
