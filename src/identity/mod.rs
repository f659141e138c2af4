pub mod resolver;
pub mod types;

pub use resolver::{BackendState, BackendStatus, DeviceIdentityResolver};
pub use types::{
    DEVICE_CREATED_KEY, DEVICE_ID_KEY, DEVICE_ID_PREFIX, DeviceIdentity, FALLBACK_PREFIX,
    IdentitySource, is_valid_device_id,
};
