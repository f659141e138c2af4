pub mod checkout;
pub mod history;

#[cfg(test)]
pub(crate) mod testing;

pub use checkout::{ClaimedVoucher, claim_voucher, start_purchase};
pub use history::{VoucherHistory, load_history};
