use crate::cli::ui::{display_success, display_warning};
use crate::client::VoucherBackend;
use crate::core::claim_voucher;
use crate::identity::DeviceIdentityResolver;
use clap::Parser;
use colored::Colorize;

#[derive(Parser, Debug)]
#[command(name = "claim", about = "Verify a payment and show the voucher it bought")]
pub struct ClaimCommand {
    /// Transaction ID returned by the payment gateway
    pub transaction_id: String,

    #[arg(short, long)]
    pub json: bool,
}

pub async fn execute(
    command: ClaimCommand,
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
) -> anyhow::Result<()> {
    let claimed = claim_voucher(resolver, backend, &command.transaction_id).await?;

    if command.json {
        println!("{}", serde_json::to_string_pretty(&claimed)?);
        return Ok(());
    }

    match &claimed.voucher {
        Some(voucher) => {
            display_success("Payment verified");
            println!("  Voucher code: {}", voucher.voucher_code.bold());
            println!("  PIN:          {}", voucher.pin().bold());
            println!(
                "  Duration:     {} day{}",
                voucher.duration_days,
                if voucher.duration_days == 1 { "" } else { "s" }
            );
        }
        None => display_warning(
            "Payment verified but the voucher is not ready yet; run this command again shortly",
        ),
    }

    Ok(())
}
