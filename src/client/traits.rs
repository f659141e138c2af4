use crate::client::types::{PaymentLink, PaymentVerification};
use crate::error::Result;
use crate::voucher::{PurchaseRequest, Voucher};

/// Remote operations the app needs from the voucher backend
#[async_trait::async_trait]
pub trait VoucherBackend: Send + Sync {
    /// Start a payment and get the checkout link to send the customer to
    async fn initiate_payment(&self, request: &PurchaseRequest) -> Result<PaymentLink>;

    /// Ask the backend whether a payment went through
    async fn verify_payment(&self, transaction_id: &str) -> Result<PaymentVerification>;

    /// Every voucher bought from this device, newest first
    async fn vouchers_for_device(&self, device_id: &str) -> Result<Vec<Voucher>>;

    /// The voucher issued for a payment, if the backend has recorded one
    async fn voucher_by_transaction(&self, transaction_ref: &str) -> Result<Option<Voucher>>;
}
