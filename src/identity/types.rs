use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Namespace tag every device identifier starts with
pub const DEVICE_ID_PREFIX: &str = "DEV-";

/// Prefix of identifiers generated without a fingerprint
pub const FALLBACK_PREFIX: &str = "DEV-FALLBACK-";

/// Storage key holding the identifier (also the cookie name)
pub const DEVICE_ID_KEY: &str = "unilink_device_id";

/// Storage key holding the ISO-8601 creation timestamp
pub const DEVICE_CREATED_KEY: &str = "unilink_device_created";

/// How an identifier came to be. Diagnostics only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IdentitySource {
    Fingerprint,
    FallbackRandom,
}

impl IdentitySource {
    /// Provenance recovered from a stored identifier
    pub fn of(id: &str) -> Self {
        if id.starts_with(FALLBACK_PREFIX) {
            Self::FallbackRandom
        } else {
            Self::Fingerprint
        }
    }
}

impl std::fmt::Display for IdentitySource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fingerprint => write!(f, "fingerprint"),
            Self::FallbackRandom => write!(f, "fallback-random"),
        }
    }
}

/// Best-effort correlation key for this device. Not a credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceIdentity {
    pub id: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub source: IdentitySource,
}

impl DeviceIdentity {
    /// A freshly derived identity stamped with the current time
    pub fn new(id: impl Into<String>, source: IdentitySource) -> Self {
        Self {
            id: id.into(),
            created_at: Utc::now(),
            source,
        }
    }

    /// Rebuild an identity read back from storage
    pub fn restored(id: impl Into<String>, created_at: DateTime<Utc>) -> Self {
        let id = id.into();
        let source = IdentitySource::of(&id);
        Self {
            id,
            created_at,
            source,
        }
    }
}

/// Whether a stored value looks like one of our identifiers
pub fn is_valid_device_id(value: &str) -> bool {
    value.strip_prefix(DEVICE_ID_PREFIX).is_some_and(|rest| {
        !rest.is_empty() && rest.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_from_id() {
        assert_eq!(IdentitySource::of("DEV-ABC123"), IdentitySource::Fingerprint);
        assert_eq!(
            IdentitySource::of("DEV-FALLBACK-1700000000000-ABCDEFGHI"),
            IdentitySource::FallbackRandom
        );
    }

    #[test]
    fn test_valid_device_id() {
        assert!(is_valid_device_id("DEV-ABC123"));
        assert!(is_valid_device_id("DEV-FALLBACK-1700000000000-ABCDEFGHI"));
        assert!(!is_valid_device_id("DEV-"));
        assert!(!is_valid_device_id(""));
        assert!(!is_valid_device_id("abc"));
        assert!(!is_valid_device_id("DEV-<script>"));
    }

    #[test]
    fn test_identity_serialization() {
        let identity = DeviceIdentity::new("DEV-XYZ", IdentitySource::Fingerprint);
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["id"], "DEV-XYZ");
        assert_eq!(json["source"], "FINGERPRINT");
        assert!(json["createdAt"].is_string());
    }
}
