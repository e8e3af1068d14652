//! Background jobs
//!
//! Stories have no expiry job; they are swept on access.

pub mod trends_refresh;

pub use trends_refresh::TrendsRefreshJob;
