//! In-memory backend shared by the flow tests

use crate::client::{PaymentLink, PaymentVerification, VoucherBackend};
use crate::error::Result;
use crate::fingerprint::{EnvironmentSignals, FixedSignals};
use crate::identity::DeviceIdentityResolver;
use crate::storage::standard_backends;
use crate::voucher::{PurchaseRequest, Voucher, VoucherStatus};
use chrono::{Duration, Utc};
use parking_lot::Mutex;
use std::collections::HashSet;
use tempfile::TempDir;

pub fn resolver() -> (TempDir, DeviceIdentityResolver) {
    let dir = TempDir::new().unwrap();
    let signals = FixedSignals::new(EnvironmentSignals {
        user_agent: Some("Mozilla/5.0 (Linux; Android 14)".to_string()),
        language: Some("en-NG".to_string()),
        platform: Some("Linux armv8l".to_string()),
        ..Default::default()
    });
    let resolver = DeviceIdentityResolver::new(standard_backends(dir.path()), Box::new(signals));
    (dir, resolver)
}

pub fn voucher(code: &str, device_id: &str, age_days: i64) -> Voucher {
    Voucher {
        id: Some(code.to_string()),
        voucher_code: code.to_string(),
        security_pin: Some(code.to_string()),
        customer_name: "Ada".to_string(),
        phone: Some("08012345678".to_string()),
        email: None,
        duration_days: 1,
        amount: 500.0,
        transaction_ref: None,
        purchase_device_id: Some(device_id.to_string()),
        created_at: Utc::now() - Duration::days(age_days),
        expires_at: None,
        actual_expiry_at: None,
        first_connection_at: None,
        status: VoucherStatus::Active,
        is_used: false,
    }
}

#[derive(Default)]
pub struct MockBackend {
    submitted: Mutex<Vec<PurchaseRequest>>,
    paid: HashSet<String>,
    vouchers: Vec<Voucher>,
}

impl MockBackend {
    pub fn with_paid(mut self, transaction_id: &str) -> Self {
        self.paid.insert(transaction_id.to_string());
        self
    }

    pub fn with_voucher(self, transaction_id: &str, device_id: &str) -> Self {
        let mut voucher = voucher(&format!("CODE-{}", transaction_id), device_id, 0);
        voucher.transaction_ref = Some(transaction_id.to_string());
        self.with_paid(transaction_id).with_record(voucher)
    }

    pub fn with_record(mut self, voucher: Voucher) -> Self {
        self.vouchers.push(voucher);
        self
    }

    pub fn submitted(&self) -> Vec<PurchaseRequest> {
        self.submitted.lock().clone()
    }
}

#[async_trait::async_trait]
impl VoucherBackend for MockBackend {
    async fn initiate_payment(&self, request: &PurchaseRequest) -> Result<PaymentLink> {
        self.submitted.lock().push(request.clone());
        Ok(PaymentLink {
            link: "https://checkout.example/pay".to_string(),
        })
    }

    async fn verify_payment(&self, transaction_id: &str) -> Result<PaymentVerification> {
        Ok(PaymentVerification {
            transaction_id: transaction_id.to_string(),
            verified: self.paid.contains(transaction_id),
            amount: None,
            tx_ref: None,
            message: None,
        })
    }

    async fn vouchers_for_device(&self, device_id: &str) -> Result<Vec<Voucher>> {
        let mut vouchers: Vec<Voucher> = self
            .vouchers
            .iter()
            .filter(|v| v.purchase_device_id.as_deref() == Some(device_id))
            .cloned()
            .collect();
        vouchers.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(vouchers)
    }

    async fn voucher_by_transaction(&self, transaction_ref: &str) -> Result<Option<Voucher>> {
        Ok(self
            .vouchers
            .iter()
            .find(|v| v.transaction_ref.as_deref() == Some(transaction_ref))
            .cloned())
    }
}
