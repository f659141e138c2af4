use crate::error::{Result, UnilinkError};
use chrono::{Local, Offset};
use serde::{Deserialize, Serialize};

/// Low-entropy environment signals mixed into the device fingerprint.
///
/// Every field is optional: a signal that cannot be read is left out of the
/// hash input rather than failing the derivation.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvironmentSignals {
    #[serde(rename = "userAgent")]
    pub user_agent: Option<String>,
    pub language: Option<String>,
    pub screen: Option<String>,
    pub platform: Option<String>,
    #[serde(rename = "timezoneOffsetMinutes")]
    pub timezone_offset_minutes: Option<i32>,
    #[serde(rename = "hardwareConcurrency")]
    pub hardware_concurrency: Option<usize>,
    #[serde(rename = "renderSignature")]
    pub render_signature: Option<String>,
}

impl EnvironmentSignals {
    /// True when no signal at all is available
    pub fn is_empty(&self) -> bool {
        self.user_agent.is_none()
            && self.language.is_none()
            && self.screen.is_none()
            && self.platform.is_none()
            && self.timezone_offset_minutes.is_none()
            && self.hardware_concurrency.is_none()
            && self.render_signature.is_none()
    }

    /// Hash input: fixed field order, `|` separated, missing fields empty
    pub fn canonical(&self) -> String {
        let tz = self.timezone_offset_minutes.map(|m| m.to_string());
        let cores = self.hardware_concurrency.map(|c| c.to_string());

        [
            ("ua", self.user_agent.as_deref()),
            ("lang", self.language.as_deref()),
            ("screen", self.screen.as_deref()),
            ("platform", self.platform.as_deref()),
            ("tz", tz.as_deref()),
            ("cores", cores.as_deref()),
            ("render", self.render_signature.as_deref()),
        ]
        .iter()
        .map(|(name, value)| format!("{}={}", name, value.unwrap_or_default()))
        .collect::<Vec<_>>()
        .join("|")
    }
}

/// Where environment signals come from
pub trait SignalSource: Send + Sync {
    /// Gather the basic signals. An error here abandons fingerprinting
    /// altogether and the caller falls back to a random identifier.
    fn collect(&self) -> Result<EnvironmentSignals>;

    /// Optional extra entropy. An error only drops this one signal.
    fn render_signature(&self) -> Result<String>;
}

/// Signals read from the running process and its environment
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemSignals;

impl SystemSignals {
    fn env(name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.trim().is_empty())
    }

    fn user_agent() -> String {
        format!(
            "unilink/{} ({}; {})",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH
        )
    }

    fn language() -> Option<String> {
        ["LC_ALL", "LC_MESSAGES", "LANG"]
            .iter()
            .find_map(|name| Self::env(name))
            .map(|raw| normalize_locale(&raw))
            .filter(|lang| !lang.is_empty())
    }

    fn screen() -> Option<String> {
        let columns = Self::env("COLUMNS")?.parse::<u32>().ok()?;
        let lines = Self::env("LINES")?.parse::<u32>().ok()?;
        Some(format!("{}x{}", columns, lines))
    }

    fn platform() -> String {
        format!("{}-{}", std::env::consts::OS, std::env::consts::ARCH)
    }

    fn timezone_offset_minutes() -> i32 {
        Local::now().offset().fix().local_minus_utc() / 60
    }

    fn hardware_concurrency() -> Option<usize> {
        std::thread::available_parallelism().ok().map(|n| n.get())
    }
}

impl SignalSource for SystemSignals {
    fn collect(&self) -> Result<EnvironmentSignals> {
        Ok(EnvironmentSignals {
            user_agent: Some(Self::user_agent()),
            language: Self::language(),
            screen: Self::screen(),
            platform: Some(Self::platform()),
            timezone_offset_minutes: Some(Self::timezone_offset_minutes()),
            hardware_concurrency: Self::hardware_concurrency(),
            render_signature: None,
        })
    }

    fn render_signature(&self) -> Result<String> {
        let term = Self::env("TERM")
            .ok_or_else(|| UnilinkError::signal("no terminal profile exposed"))?;
        let color = Self::env("COLORTERM").unwrap_or_default();
        Ok(format!("{}/{}", term, color))
    }
}

/// `en_NG.UTF-8` -> `en-NG`
fn normalize_locale(raw: &str) -> String {
    let without_encoding = raw.split(['.', '@']).next().unwrap_or_default();
    if without_encoding == "C" || without_encoding == "POSIX" {
        return String::new();
    }
    without_encoding.replace('_', "-")
}

/// Signals supplied by the embedder rather than read from the process
#[derive(Clone, Debug, Default)]
pub struct FixedSignals {
    signals: Option<EnvironmentSignals>,
    render_signature: Option<String>,
}

impl FixedSignals {
    pub fn new(signals: EnvironmentSignals) -> Self {
        Self {
            signals: Some(signals),
            render_signature: None,
        }
    }

    /// A source whose collection always fails
    pub fn unavailable() -> Self {
        Self::default()
    }

    pub fn with_render_signature(mut self, signature: impl Into<String>) -> Self {
        self.render_signature = Some(signature.into());
        self
    }
}

impl SignalSource for FixedSignals {
    fn collect(&self) -> Result<EnvironmentSignals> {
        self.signals
            .clone()
            .ok_or_else(|| UnilinkError::signal("environment signals unavailable"))
    }

    fn render_signature(&self) -> Result<String> {
        self.render_signature
            .clone()
            .ok_or_else(|| UnilinkError::signal("render signature blocked"))
    }
}
