use crate::client::{PaymentLink, PaymentVerification, VoucherBackend};
use crate::error::{Result, UnilinkError};
use crate::identity::DeviceIdentityResolver;
use crate::voucher::{PurchaseRequest, PurchaseRequestBuilder, Voucher};
use serde::Serialize;

/// Validate the customer input, tag it with this device's identifier and ask
/// the backend for a checkout link
pub async fn start_purchase(
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
    purchase: PurchaseRequestBuilder,
) -> Result<(PurchaseRequest, PaymentLink)> {
    purchase.validate()?;

    let request = purchase.build(resolver.resolve())?;
    tracing::debug!(
        device_id = %request.device_id,
        days = request.days,
        amount = request.amount,
        "Starting payment"
    );

    let link = backend.initiate_payment(&request).await?;
    Ok((request, link))
}

/// A verified payment and the voucher the backend issued for it
#[derive(Clone, Debug, Serialize)]
pub struct ClaimedVoucher {
    pub verification: PaymentVerification,
    /// `None` while the backend has not recorded the voucher yet
    pub voucher: Option<Voucher>,
}

/// Verify a returned payment and fetch the voucher issued for it
pub async fn claim_voucher(
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
    transaction_id: &str,
) -> Result<ClaimedVoucher> {
    let transaction_id = transaction_id.trim();
    if transaction_id.is_empty() {
        return Err(UnilinkError::verification_failed(
            "Missing payment information",
        ));
    }

    let verification = backend.verify_payment(transaction_id).await?;
    if !verification.verified {
        return Err(UnilinkError::verification_failed(
            verification
                .message
                .clone()
                .unwrap_or_else(|| "Payment was not successful".to_string()),
        ));
    }

    let voucher = backend.voucher_by_transaction(transaction_id).await?;
    if let Some(voucher) = &voucher {
        let device_id = resolver.resolve();
        if voucher.purchase_device_id.as_deref() != Some(device_id.as_str()) {
            tracing::warn!(
                "Voucher {} was bought from another device ({:?})",
                voucher.voucher_code,
                voucher.purchase_device_id
            );
        }
    }

    Ok(ClaimedVoucher {
        verification,
        voucher,
    })
}
