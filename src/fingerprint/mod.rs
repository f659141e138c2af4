pub mod hash;
pub mod signals;

pub use hash::{digest, rolling_hash, to_base36};
pub use signals::{EnvironmentSignals, FixedSignals, SignalSource, SystemSignals};

use crate::error::{Result, UnilinkError};
use crate::identity::{DEVICE_ID_PREFIX, DeviceIdentity, FALLBACK_PREFIX, IdentitySource};
use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

const FALLBACK_SUFFIX_LEN: usize = 9;

static LAST_FALLBACK_MILLIS: AtomicI64 = AtomicI64::new(0);

/// Gather signals from `source` and hash them into a digest.
///
/// A failing render signature is skipped. Fails when collection itself fails
/// or when no signal at all could be read.
pub fn fingerprint_digest(source: &dyn SignalSource) -> Result<String> {
    let mut signals = source.collect()?;

    match source.render_signature() {
        Ok(signature) if !signature.is_empty() => signals.render_signature = Some(signature),
        Ok(_) => {}
        Err(e) => tracing::debug!("Skipping render signature: {}", e),
    }

    if signals.is_empty() {
        return Err(UnilinkError::signal("no environment signals available"));
    }

    Ok(digest(&signals.canonical()))
}

/// Derive a new identity, falling back to a random one if fingerprinting fails
pub fn derive_identity(source: &dyn SignalSource) -> DeviceIdentity {
    match fingerprint_digest(source) {
        Ok(digest) => DeviceIdentity::new(
            format!("{}{}", DEVICE_ID_PREFIX, digest),
            IdentitySource::Fingerprint,
        ),
        Err(e) => {
            tracing::warn!("Fingerprinting failed, using random identifier: {}", e);
            fallback_identity()
        }
    }
}

/// `DEV-FALLBACK-<millis>-<9 random base36 chars>`, unique within the process
pub fn fallback_identity() -> DeviceIdentity {
    let millis = next_fallback_millis();
    // 46 random bits fit in nine base36 digits
    let random = (uuid::Uuid::new_v4().as_u128() as u64) & ((1 << 46) - 1);
    let suffix = format!("{:0>width$}", to_base36(random), width = FALLBACK_SUFFIX_LEN);

    DeviceIdentity::new(
        format!("{}{}-{}", FALLBACK_PREFIX, millis, suffix),
        IdentitySource::FallbackRandom,
    )
}

/// Wall-clock millis, bumped so no two calls in this process return the same value
fn next_fallback_millis() -> i64 {
    let now = Utc::now().timestamp_millis();
    let mut last = LAST_FALLBACK_MILLIS.load(Ordering::Relaxed);
    loop {
        let next = now.max(last + 1);
        match LAST_FALLBACK_MILLIS.compare_exchange_weak(
            last,
            next,
            Ordering::Relaxed,
            Ordering::Relaxed,
        ) {
            Ok(_) => return next,
            Err(actual) => last = actual,
        }
    }
}
