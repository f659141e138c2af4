pub mod cli;
pub mod commands;
pub mod ui;

pub use cli::{Cli, Commands};
pub use commands::buy::BuyCommand;
pub use commands::buy::execute as run_buy;
pub use commands::claim::ClaimCommand;
pub use commands::claim::execute as run_claim;
pub use commands::device::DeviceCommand;
pub use commands::device::execute as run_device;
pub use commands::history::HistoryCommand;
pub use commands::history::execute as run_history;
