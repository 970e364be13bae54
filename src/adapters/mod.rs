//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//! - [`FileAccountStore`] - JSON file account storage
//! - [`InMemoryPinnedItemStore`] - Process-lifetime nudge dismissals
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Configurable HTTP responses
//! - [`mock::InMemoryAccountStore`] - In-memory account storage
//! - [`mock::RecordingExperimentPlatform`] - Records experiment calls

pub mod file_account;
pub mod memory_pinned;
pub mod mock;
pub mod reqwest_http;

pub use file_account::FileAccountStore;
pub use memory_pinned::InMemoryPinnedItemStore;
pub use mock::{InMemoryAccountStore, MockHttpClient, RecordingExperimentPlatform};
pub use reqwest_http::ReqwestHttpClient;
