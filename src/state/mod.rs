//! Statistics state
//!
//! - [`InsightsStore`]: cached insights snapshot and per-slice fetch status
//! - [`SharedInsightsStore`]: the handle fetchers and view models share

pub mod insights_store;

pub use insights_store::{
    FetchStatus, InsightsAction, InsightsStore, SharedInsightsStore, StoreSlice,
    REFRESH_INTERVAL_MINUTES,
};
