pub mod account;
pub mod insights;
pub mod prompt;
pub mod stats;

pub use account::{Account, AccountSnapshot, Blog};
pub use insights::{InsightType, StatSection};
pub use prompt::{
    BloggingPrompt, PromptAttribution, RemoteAnsweredUser, RemoteBloggingPrompt,
    RemotePromptsEnvelope,
};
pub use stats::*;

use serde::{Deserialize, Deserializer};

/// Helper to deserialize a numeric id sent as either string or integer
pub(crate) fn deserialize_numeric_id<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct IdVisitor;

    impl<'de> Visitor<'de> for IdVisitor {
        type Value = i64;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("an integer or a numeric string")
        }

        fn visit_str<E>(self, value: &str) -> Result<i64, E>
        where
            E: de::Error,
        {
            value
                .trim()
                .parse::<i64>()
                .map_err(|_| E::invalid_value(de::Unexpected::Str(value), &self))
        }

        fn visit_i64<E>(self, value: i64) -> Result<i64, E>
        where
            E: de::Error,
        {
            Ok(value)
        }

        fn visit_u64<E>(self, value: u64) -> Result<i64, E>
        where
            E: de::Error,
        {
            i64::try_from(value).map_err(|_| E::invalid_value(de::Unexpected::Unsigned(value), &self))
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

/// Helper to deserialize nullable strings as empty string
/// Handles both missing fields and explicit null values
pub(crate) fn deserialize_nullable_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer).map(|opt| opt.unwrap_or_default())
}
