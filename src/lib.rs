pub mod client;
pub mod config;
pub mod core;
pub mod error;
pub mod fingerprint;
pub mod identity;
pub mod storage;
pub mod voucher;
pub mod prelude;

// Re-export commonly used types
pub use client::{PaymentLink, PaymentVerification, SupabaseClient, VoucherBackend};
pub use config::{BackendConfig, Config};
pub use crate::core::{ClaimedVoucher, VoucherHistory, claim_voucher, load_history, start_purchase};
pub use error::{Result, UnilinkError};
pub use fingerprint::{EnvironmentSignals, FixedSignals, SignalSource, SystemSignals};
pub use identity::{
    BackendState, BackendStatus, DEVICE_CREATED_KEY, DEVICE_ID_KEY, DEVICE_ID_PREFIX,
    DeviceIdentity, DeviceIdentityResolver, FALLBACK_PREFIX, IdentitySource,
};
pub use storage::{CookieJar, DurableStore, SessionStore, StorageBackend, standard_backends};
pub use voucher::{
    DisplayState, PRICE_PER_DAY, PurchaseRequest, PurchaseRequestBuilder, Voucher, VoucherStatus,
};

#[cfg(feature = "cli")]
pub mod cli;
