use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Price of one day of access, in naira
pub const PRICE_PER_DAY: u32 = 500;

pub const MIN_DAYS: u32 = 1;
pub const MAX_DAYS: u32 = 365;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoucherStatus {
    #[default]
    Active,
    Expired,
    Used,
    Blocked,
}

/// A voucher row as stored by the backend (`transactions` table)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    #[serde(default)]
    pub id: Option<String>,
    pub voucher_code: String,
    #[serde(default)]
    pub security_pin: Option<String>,
    pub customer_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub duration_days: u32,
    pub amount: f64,
    #[serde(default)]
    pub transaction_ref: Option<String>,
    #[serde(default)]
    pub purchase_device_id: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub actual_expiry_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub first_connection_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub status: VoucherStatus,
    #[serde(default)]
    pub is_used: bool,
}

/// What the history view shows for a voucher
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum DisplayState {
    Expired,
    Active,
    NotUsed,
}

impl std::fmt::Display for DisplayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expired => write!(f, "Expired"),
            Self::Active => write!(f, "Active"),
            Self::NotUsed => write!(f, "Not Used"),
        }
    }
}

impl Voucher {
    /// The access window only starts on first connection, so an unused
    /// voucher is never shown as expired unless the backend says so.
    pub fn display_state(&self, now: DateTime<Utc>) -> DisplayState {
        if self.status == VoucherStatus::Expired {
            return DisplayState::Expired;
        }

        match (self.is_used, self.actual_expiry_at) {
            (true, Some(expiry)) if now > expiry => DisplayState::Expired,
            (true, Some(_)) => DisplayState::Active,
            _ => DisplayState::NotUsed,
        }
    }

    /// Human readable time left, `None` until the timer has started
    pub fn time_remaining(&self, now: DateTime<Utc>) -> Option<String> {
        let expiry = self.actual_expiry_at?;
        let remaining = expiry - now;
        if remaining.num_milliseconds() <= 0 {
            return Some("Expired".to_string());
        }

        let hours = remaining.num_hours();
        let minutes = remaining.num_minutes() % 60;
        if hours > 24 {
            Some(format!("{}d {}h remaining", hours / 24, hours % 24))
        } else {
            Some(format!("{}h {}m remaining", hours, minutes))
        }
    }

    /// The PIN to show next to the code; the backend uses the code itself
    /// when no separate PIN was issued
    pub fn pin(&self) -> &str {
        self.security_pin.as_deref().unwrap_or(&self.voucher_code)
    }
}
