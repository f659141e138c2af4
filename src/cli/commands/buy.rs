use crate::cli::ui::{display_info, display_success, format_naira};
use crate::client::VoucherBackend;
use crate::core::start_purchase;
use crate::identity::DeviceIdentityResolver;
use crate::voucher::{PRICE_PER_DAY, PurchaseRequestBuilder};
use clap::Parser;
use indicatif::ProgressBar;
use std::time::Duration;

#[derive(Parser, Debug)]
#[command(name = "buy", about = "Buy a Wi-Fi voucher")]
pub struct BuyCommand {
    /// Full name (prompted for when omitted)
    #[arg(long)]
    pub name: Option<String>,

    /// Nigerian phone number, e.g. 08012345678 (prompted for when omitted)
    #[arg(long)]
    pub phone: Option<String>,

    #[arg(long)]
    pub email: Option<String>,

    /// Number of days of access (1-365)
    #[arg(short, long, default_value = "1")]
    pub days: u32,
}

pub async fn execute(
    command: BuyCommand,
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
) -> anyhow::Result<()> {
    let name = match command.name {
        Some(name) => name,
        None => inquire::Text::new("Full name:").prompt()?,
    };
    let phone = match command.phone {
        Some(phone) => phone,
        None => inquire::Text::new("Phone number:")
            .with_placeholder("08012345678")
            .prompt()?,
    };

    let mut purchase = PurchaseRequestBuilder::new(name, phone).days(command.days);
    if let Some(email) = command.email {
        purchase = purchase.email(email);
    }

    display_info(&format!(
        "{} per day, {} day(s)",
        format_naira(f64::from(PRICE_PER_DAY)),
        command.days
    ));

    let spinner = ProgressBar::new_spinner();
    spinner.set_message("Processing...");
    spinner.enable_steady_tick(Duration::from_millis(100));
    let result = start_purchase(resolver, backend, purchase).await;
    spinner.finish_and_clear();

    let (request, link) = result?;
    display_success(&format!(
        "Pay {} to finish your purchase:",
        format_naira(f64::from(request.amount))
    ));
    println!("  {}", link.link);
    display_info("After paying, run `unilink claim <transaction_id>` to get your voucher");

    Ok(())
}
