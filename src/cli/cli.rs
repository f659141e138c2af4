use crate::cli::commands::{BuyCommand, ClaimCommand, DeviceCommand, HistoryCommand};
use crate::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "unilink", about = "Buy and manage UniLink Wi-Fi vouchers", version, long_about = None)]
pub struct Cli {
    /// Directory holding the durable store and cookie jar
    #[arg(long, global = true, env = "UNILINK_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[arg(long, global = true, env = "UNILINK_SUPABASE_URL")]
    pub supabase_url: Option<String>,

    #[arg(long, global = true, env = "UNILINK_SUPABASE_ANON_KEY", hide_env_values = true)]
    pub anon_key: Option<String>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    pub fn config(&self) -> Config {
        Config {
            data_dir: self.data_dir.clone(),
            supabase_url: self.supabase_url.clone(),
            anon_key: self.anon_key.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Device(DeviceCommand),
    Buy(BuyCommand),
    Claim(ClaimCommand),
    History(HistoryCommand),
}
