//! Cache warming and its background schedule
//!
//! - [`warmer`]: one warm cycle over all content types
//! - [`trigger`]: the startup warm, the periodic re-warm and the expiry sweep

pub mod trigger;
pub mod warmer;

pub use trigger::{WarmEvent, WarmScheduler};
pub use warmer::{CacheWarmer, WarmSummary};
