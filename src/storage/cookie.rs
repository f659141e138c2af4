use crate::error::Result;
use crate::storage::traits::StorageBackend;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const COOKIE_JAR_FILE: &str = "cookies.json";

/// One year, the lifetime of the device cookie
pub const COOKIE_MAX_AGE_SECS: i64 = 365 * 24 * 60 * 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub name: String,
    pub value: String,
    pub path: String,
    #[serde(rename = "expiresAt")]
    pub expires_at: DateTime<Utc>,
}

impl Cookie {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

impl std::fmt::Display for Cookie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let max_age = (self.expires_at - Utc::now()).num_seconds().max(0);
        write!(
            f,
            "{}={}; Max-Age={}; Path={}",
            self.name, self.value, max_age, self.path
        )
    }
}

/// Long-lived, site-wide cookie persisted to a JSON jar file
#[derive(Clone, Debug)]
pub struct CookieJar {
    path: PathBuf,
    max_age: Duration,
}

impl CookieJar {
    /// Jar living at `<dir>/cookies.json` with the default one-year max age
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(COOKIE_JAR_FILE),
            max_age: Duration::seconds(COOKIE_MAX_AGE_SECS),
        }
    }

    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.max_age = max_age;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Look up a live cookie by name
    pub fn cookie(&self, name: &str) -> Result<Option<Cookie>> {
        let now = Utc::now();
        Ok(self
            .load()?
            .into_iter()
            .find(|c| c.name == name && !c.is_expired(now)))
    }

    fn load(&self) -> Result<Vec<Cookie>> {
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(Vec::new()),
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&self, cookies: &[Cookie]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, serde_json::to_vec_pretty(cookies)?)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl StorageBackend for CookieJar {
    fn name(&self) -> &str {
        "cookie"
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.cookie(key)?.map(|c| c.value))
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        let now = Utc::now();
        let mut cookies = self.load()?;
        cookies.retain(|c| c.name != key && !c.is_expired(now));

        let cookie = Cookie {
            name: key.to_string(),
            value: value.to_string(),
            path: "/".to_string(),
            expires_at: now + self.max_age,
        };
        tracing::debug!("Set-Cookie: {}", cookie);
        cookies.push(cookie);
        self.save(&cookies)
    }

    fn remove(&self, key: &str) -> Result<()> {
        let mut cookies = self.load()?;
        let before = cookies.len();
        cookies.retain(|c| c.name != key);
        if cookies.len() != before {
            self.save(&cookies)?;
        }
        Ok(())
    }

    fn stores_metadata(&self) -> bool {
        false
    }
}
