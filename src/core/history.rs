use crate::client::VoucherBackend;
use crate::error::Result;
use crate::identity::DeviceIdentityResolver;
use crate::voucher::Voucher;
use serde::Serialize;

/// Vouchers bought from one device, newest first
#[derive(Clone, Debug, Serialize)]
pub struct VoucherHistory {
    pub device_id: String,
    pub vouchers: Vec<Voucher>,
}

impl VoucherHistory {
    pub fn is_empty(&self) -> bool {
        self.vouchers.is_empty()
    }

    /// "Showing 3 vouchers"
    pub fn summary(&self) -> String {
        let count = self.vouchers.len();
        format!(
            "Showing {} voucher{}",
            count,
            if count == 1 { "" } else { "s" }
        )
    }
}

/// Look up every voucher tagged with this device's identifier.
///
/// Uses `resolve` rather than `peek`: after storage was cleared, an unchanged
/// environment fingerprints to the same identifier, which recovers the history.
pub async fn load_history(
    resolver: &DeviceIdentityResolver,
    backend: &dyn VoucherBackend,
) -> Result<VoucherHistory> {
    let device_id = resolver.resolve();
    tracing::debug!("Loading vouchers for device: {}", device_id);

    let vouchers = backend.vouchers_for_device(&device_id).await?;
    if vouchers.is_empty() {
        tracing::info!("No vouchers found for device ID {}", device_id);
    }

    Ok(VoucherHistory {
        device_id,
        vouchers,
    })
}
