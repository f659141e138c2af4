pub mod cookie;
pub mod durable;
pub mod session;
pub mod traits;

pub use cookie::{COOKIE_MAX_AGE_SECS, Cookie, CookieJar};
pub use durable::DurableStore;
pub use session::SessionStore;
pub use traits::StorageBackend;

use std::path::Path;

/// The standard backend chain, in descending durability:
/// durable store, session store, cookie jar.
pub fn standard_backends(data_dir: impl AsRef<Path>) -> Vec<Box<dyn StorageBackend>> {
    let data_dir = data_dir.as_ref();
    vec![
        Box::new(DurableStore::in_dir(data_dir)),
        Box::new(SessionStore::new()),
        Box::new(CookieJar::in_dir(data_dir)),
    ]
}
