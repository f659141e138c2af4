pub mod client;
pub mod traits;
pub mod types;

pub use client::SupabaseClient;
pub use traits::VoucherBackend;
pub use types::{PaymentLink, PaymentVerification};
