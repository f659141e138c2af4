use crate::cli::ui::{display_info, format_naira};
use crate::client::VoucherBackend;
use crate::core::load_history;
use crate::identity::DeviceIdentityResolver;
use crate::voucher::DisplayState;
use chrono::{DateTime, Utc};
use clap::Parser;
use comfy_table::Table;

#[derive(Parser, Debug)]
#[command(name = "history", about = "List vouchers bought from this device")]
pub struct HistoryCommand {
    #[arg(short, long)]
    pub json: bool,
}

fn format_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %-d, %Y %H:%M").to_string()
}

pub async fn execute(
    command: HistoryCommand,
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
) -> anyhow::Result<()> {
    let history = load_history(resolver, backend).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&history)?);
        return Ok(());
    }

    if history.is_empty() {
        display_info("You haven't purchased any vouchers yet. Run `unilink buy` to get one.");
        return Ok(());
    }

    let now = Utc::now();
    let mut table = Table::new();
    table.set_header(vec!["Code", "Status", "Days", "Amount", "Purchased", "Time left"]);
    for voucher in &history.vouchers {
        let state = voucher.display_state(now);
        let time_left = match state {
            DisplayState::NotUsed => "Starts on first connection".to_string(),
            _ => voucher.time_remaining(now).unwrap_or_default(),
        };
        table.add_row(vec![
            voucher.voucher_code.clone(),
            state.to_string(),
            voucher.duration_days.to_string(),
            format_naira(voucher.amount),
            format_date(voucher.created_at),
            time_left,
        ]);
    }

    println!("{}", history.summary());
    println!("{table}");
    Ok(())
}
