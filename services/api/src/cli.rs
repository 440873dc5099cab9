use crate::demo::{run_compensation_compute, run_demo, run_rate_listing, ComputeArgs, DemoArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use recovery_ops::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Recovery Ops",
    about = "Price vehicle recovery occurrences and serve the compensation API",
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
    /// Provider compensation tools
    Compensation {
        #[command(subcommand)]
        command: CompensationCommand,
    },
    /// Price a built-in batch of sample occurrences end to end
    Demo(DemoArgs),
}

#[derive(Subcommand, Debug)]
enum CompensationCommand {
    /// Price every occurrence in a CSV export and print the report
    Compute(ComputeArgs),
    /// Print the active rate table
    Rates,
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
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Compensation {
            command: CompensationCommand::Compute(args),
        } => run_compensation_compute(args),
        Command::Compensation {
            command: CompensationCommand::Rates,
        } => run_rate_listing(),
        Command::Demo(args) => run_demo(args),
    }
}
