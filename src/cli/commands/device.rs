use crate::cli::ui::{display_info, display_success, display_warning};
use crate::identity::{BackendState, DeviceIdentityResolver};
use clap::{Parser, Subcommand};
use comfy_table::Table;

#[derive(Parser, Debug)]
#[command(name = "device", about = "Show or reset this device's identifier")]
pub struct DeviceCommand {
    #[command(subcommand)]
    pub action: Option<DeviceAction>,

    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum DeviceAction {
    /// Print the identifier, creating it on first use (default)
    Resolve,
    /// Print the identifier only if one is already stored
    Peek,
    /// Remove the identifier from every storage backend
    Reset,
    /// Show which storage backends hold the identifier
    Status,
}

pub fn execute(command: DeviceCommand, resolver: &DeviceIdentityResolver) -> anyhow::Result<()> {
    match command.action.unwrap_or(DeviceAction::Resolve) {
        DeviceAction::Resolve => {
            let identity = resolver.identity();
            if command.json {
                println!("{}", serde_json::to_string_pretty(&identity)?);
            } else {
                println!("{}", identity.id);
            }
        }
        DeviceAction::Peek => match resolver.peek() {
            Some(id) if command.json => println!("{}", serde_json::json!({ "id": id })),
            Some(id) => println!("{}", id),
            None if command.json => println!("{}", serde_json::json!({ "id": null })),
            None => display_info("No device ID stored yet"),
        },
        DeviceAction::Reset => {
            resolver.reset();
            display_success("Device ID cleared");
        }
        DeviceAction::Status => {
            let report = resolver.backend_report();
            if command.json {
                println!("{}", serde_json::to_string_pretty(&report)?);
                return Ok(());
            }

            let mut table = Table::new();
            table.set_header(vec!["Backend", "State", "Value"]);
            for status in &report {
                let (state, value) = match &status.state {
                    BackendState::Holds(id) => ("stored", id.as_str()),
                    BackendState::Empty => ("empty", ""),
                    BackendState::Unavailable(reason) => ("unavailable", reason.as_str()),
                };
                table.add_row(vec![status.backend.as_str(), state, value]);
            }
            println!("{table}");

            if report
                .iter()
                .any(|s| matches!(s.state, BackendState::Unavailable(_)))
            {
                display_warning("Some storage backends are unavailable; the ID may not persist");
            }
        }
    }

    Ok(())
}
