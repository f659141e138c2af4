//! Prelude module for convenient imports
//!
//! Use `use unilink::prelude::*;` to import commonly used types

// Device identity
pub use crate::identity::{DeviceIdentity, DeviceIdentityResolver, IdentitySource};

// Storage backends
pub use crate::storage::{CookieJar, DurableStore, SessionStore, StorageBackend, standard_backends};

// Fingerprinting
pub use crate::fingerprint::{EnvironmentSignals, FixedSignals, SignalSource, SystemSignals};

// Vouchers & purchase flow
pub use crate::core::{claim_voucher, load_history, start_purchase};
pub use crate::voucher::{PurchaseRequest, PurchaseRequestBuilder, Voucher, VoucherStatus};

// Backend
pub use crate::client::{SupabaseClient, VoucherBackend};
pub use crate::config::{BackendConfig, Config};

// Error handling
pub use crate::error::{Result, UnilinkError};
