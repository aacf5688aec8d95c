use crate::demo::{run_featured_preview, run_route_resolve, FeaturedArgs, RouteResolveArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use directory_hub::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Directory Hub",
    about = "Serve and inspect the multi-tenant directory publisher from the command line",
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
    /// Resolve an inbound host/path against a catalog
    Route {
        #[command(subcommand)]
        command: RouteCommand,
    },
    /// Preview a directory's featured-tier segmentation
    Featured(FeaturedArgs),
}

#[derive(Subcommand, Debug)]
enum RouteCommand {
    /// Print the serve/rewrite/redirect disposition for one request
    Resolve(RouteResolveArgs),
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
        Command::Route {
            command: RouteCommand::Resolve(args),
        } => run_route_resolve(args),
        Command::Featured(args) => run_featured_preview(args),
    }
}
