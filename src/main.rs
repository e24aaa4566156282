use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use seedposter::app::AppContext;
use seedposter::cli::{commands, Cli, Commands};
use seedposter::config::Config;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr so rendered HTML can be piped from stdout
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Render { source, output } => {
            let ctx = AppContext::new(config, source.as_deref())?;
            commands::render(&ctx, output.as_deref()).await?;
        }
        Commands::Fetch { source } => {
            let ctx = AppContext::new(config, source.as_deref())?;
            commands::fetch(&ctx).await?;
        }
        Commands::Config => {
            commands::show_config(&config, cli.config.as_deref())?;
        }
    }

    Ok(())
}
