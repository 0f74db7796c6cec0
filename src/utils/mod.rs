//! Common utilities and helper functions

pub mod error;

pub use error::{FetchError, ScrapeError};
