pub mod purchase;
pub mod types;
pub mod validation;

pub use purchase::{PurchaseRequest, PurchaseRequestBuilder, total_price};
pub use types::{DisplayState, MAX_DAYS, MIN_DAYS, PRICE_PER_DAY, Voucher, VoucherStatus};
pub use validation::{sanitize_input, validate_days, validate_email, validate_phone};
