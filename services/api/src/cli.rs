use crate::demo::{run_demo, run_reading, DemoArgs, ReadingArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use tarot_influence::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Tarot Influence Engine",
    about = "Compute how the cards of a tarot spread influence one another",
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
    /// Compute a reading from a JSON request file and print the result
    Reading(ReadingArgs),
    /// Run a fixed reading against the bundled demo deck
    Demo(DemoArgs),
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
        Command::Reading(args) => run_reading(args),
        Command::Demo(args) => run_demo(args),
    }
}
