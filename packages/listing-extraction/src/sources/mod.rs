//! Page source implementations.

mod http;
mod mock;

pub use http::{HttpPageSource, DEFAULT_STOREFRONT, FETCH_TIMEOUT};
pub use mock::MockPageSource;
