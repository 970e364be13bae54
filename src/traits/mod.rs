//! Trait abstractions for dependency injection and testability.
//!
//! The REST client, the on-device account store and the experiment platform
//! are owned by the host; these traits are the seams the rest of the crate
//! talks to.
//!
//! # Traits
//!
//! - [`HttpClient`] - HTTP GET client
//! - [`AccountStore`] - Account and blog storage
//! - [`ExperimentPlatform`] - A/B experiment registration and assignment
//! - [`PinnedItemStore`] - Dismissed dashboard nudges
//! - [`LogoutHooks`] - Host cleanup when the default account signs out

pub mod account;
pub mod experiments;
pub mod http;
pub mod logout;
pub mod pinned;

pub use account::{AccountStore, AccountStoreError};
pub use experiments::{ExperimentPlatform, Variation};
pub use http::{bearer_headers, Headers, HttpClient, HttpError, Response};
pub use logout::{LogoutHooks, NoopLogoutHooks};
pub use pinned::{GrowAudienceHint, PinnedItemStore};
