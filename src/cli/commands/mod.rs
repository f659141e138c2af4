pub mod buy;
pub mod claim;
pub mod device;
pub mod history;

pub use buy::BuyCommand;
pub use claim::ClaimCommand;
pub use device::DeviceCommand;
pub use history::HistoryCommand;
