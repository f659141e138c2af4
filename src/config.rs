use crate::error::{Result, UnilinkError};
use std::path::PathBuf;

pub const DATA_DIR_ENV: &str = "UNILINK_DATA_DIR";
pub const SUPABASE_URL_ENV: &str = "UNILINK_SUPABASE_URL";
pub const SUPABASE_ANON_KEY_ENV: &str = "UNILINK_SUPABASE_ANON_KEY";

/// Connection details for the backend-as-a-service project
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Result<Self> {
        let url = url.into().trim().trim_end_matches('/').to_string();
        let anon_key = anon_key.into().trim().to_string();

        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(UnilinkError::config(format!(
                "backend URL must start with http:// or https://, got {:?}",
                url
            )));
        }
        if anon_key.is_empty() {
            return Err(UnilinkError::config("backend anon key cannot be empty"));
        }

        Ok(Self { url, anon_key })
    }
}

/// Runtime configuration assembled by the binary
#[derive(Clone, Debug, Default)]
pub struct Config {
    pub data_dir: Option<PathBuf>,
    pub supabase_url: Option<String>,
    pub anon_key: Option<String>,
}

impl Config {
    /// Where the durable store and cookie jar live
    pub fn data_dir(&self) -> PathBuf {
        self.data_dir.clone().unwrap_or_else(default_data_dir)
    }

    /// Backend settings; only network commands need them
    pub fn backend(&self) -> Result<BackendConfig> {
        match (&self.supabase_url, &self.anon_key) {
            (Some(url), Some(key)) => BackendConfig::new(url, key),
            _ => Err(UnilinkError::config(format!(
                "missing backend credentials, set {} and {}",
                SUPABASE_URL_ENV, SUPABASE_ANON_KEY_ENV
            ))),
        }
    }
}

/// `<local data dir>/unilink`, or a temp directory when the platform has none
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("unilink")
}
