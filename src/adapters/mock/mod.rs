//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - HTTP client with configurable responses
//! - [`InMemoryAccountStore`] - In-memory account storage
//! - [`RecordingExperimentPlatform`] - Experiment platform that records calls

pub mod account;
pub mod experiments;
pub mod http;

pub use account::InMemoryAccountStore;
pub use experiments::RecordingExperimentPlatform;
pub use http::{MockHttpClient, MockResponse, RecordedRequest};
