use clap::Parser;
use tracing::Level;
use unilink::cli::ui::display_error;
use unilink::cli::{Cli, Commands};
use unilink::cli::{run_buy, run_claim, run_device, run_history};
use unilink::{DeviceIdentityResolver, SupabaseClient};

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = cli.config();
    // One resolver per process, shared by every command that needs the device ID
    let resolver = DeviceIdentityResolver::standard(config.data_dir());

    match cli.command {
        Commands::Device(cmd) => {
            run_device(cmd, &resolver)?;
        }
        Commands::Buy(cmd) => {
            let backend = SupabaseClient::new(config.backend()?);
            run_buy(cmd, &resolver, &backend).await?;
        }
        Commands::Claim(cmd) => {
            let backend = SupabaseClient::new(config.backend()?);
            run_claim(cmd, &resolver, &backend).await?;
        }
        Commands::History(cmd) => {
            let backend = SupabaseClient::new(config.backend()?);
            run_history(cmd, &resolver, &backend).await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli).await {
        display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}
