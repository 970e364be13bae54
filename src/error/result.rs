//! Result type alias for crate operations.

use super::insights_error::InsightsError;

/// Type alias for Results using InsightsError.
pub type InsightsResult<T> = Result<T, InsightsError>;
