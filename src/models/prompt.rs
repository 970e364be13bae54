//! Blogging prompt models
//!
//! [`RemoteBloggingPrompt`] mirrors the API payload; [`BloggingPrompt`] is the
//! value handed to callers.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{deserialize_nullable_string, deserialize_numeric_id};

/// Envelope returned by the blogging prompts endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RemotePromptsEnvelope {
    #[serde(default)]
    pub prompts: Vec<RemoteBloggingPrompt>,
}

/// One avatar entry in the answered-users sample
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteAnsweredUser {
    pub avatar: String,
}

/// Blogging prompt as sent by the server
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RemoteBloggingPrompt {
    #[serde(rename = "id", deserialize_with = "deserialize_numeric_id")]
    pub prompt_id: i64,
    pub text: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub title: String,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub content: String,
    pub date: NaiveDate,
    #[serde(default)]
    pub answered: bool,
    #[serde(default)]
    pub answered_users_count: i64,
    #[serde(default)]
    pub answered_users_sample: Vec<RemoteAnsweredUser>,
    #[serde(default, deserialize_with = "deserialize_nullable_string")]
    pub attribution: String,
}

/// A daily writing prompt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BloggingPrompt {
    pub prompt_id: i64,
    pub text: String,
    /// Used as the post title when answering
    pub title: String,
    /// Used as the post content when answering
    pub content: String,
    pub date: NaiveDate,
    pub answered: bool,
    pub answer_count: i64,
    pub display_avatar_urls: Vec<String>,
    pub attribution: String,
}

impl BloggingPrompt {
    /// Fixed prompt used for feature introductions
    pub fn example(date: NaiveDate) -> Self {
        let text = "Was there a toy or thing you always wanted as a child, during the holidays \
                    or on your birthday, but never received? Tell us about it.";
        Self {
            prompt_id: 239,
            text: text.to_string(),
            title: "Prompt number 1".to_string(),
            content: format!(
                "<!-- wp:pullquote -->\n<figure class=\"wp-block-pullquote\"><blockquote><p>{}</p>\
                 <cite>(courtesy of plinky.com)</cite></blockquote></figure>\n<!-- /wp:pullquote -->",
                text
            ),
            date,
            answered: false,
            answer_count: 5,
            display_avatar_urls: Vec::new(),
            attribution: "dayone".to_string(),
        }
    }

    /// Known attribution source, if any
    pub fn prompt_attribution(&self) -> Option<PromptAttribution> {
        PromptAttribution::from_raw(&self.attribution)
    }
}

impl From<RemoteBloggingPrompt> for BloggingPrompt {
    fn from(remote: RemoteBloggingPrompt) -> Self {
        Self {
            prompt_id: remote.prompt_id,
            text: remote.text,
            title: remote.title,
            content: remote.content,
            date: remote.date,
            answered: remote.answered,
            answer_count: remote.answered_users_count,
            display_avatar_urls: remote
                .answered_users_sample
                .into_iter()
                .map(|user| user.avatar)
                .collect(),
            attribution: remote.attribution,
        }
    }
}

/// Sources a prompt can be attributed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptAttribution {
    DayOne,
}

impl PromptAttribution {
    pub fn from_raw(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "dayone" => Some(PromptAttribution::DayOne),
            _ => None,
        }
    }

    /// Attribution line shown under the prompt
    pub fn source_text(&self) -> &'static str {
        match self {
            PromptAttribution::DayOne => "From Day One Journal",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAYLOAD: &str = r#"{
        "prompts": [
            {
                "id": 248,
                "text": "Tell us about a time when you felt out of place.",
                "title": "Prompt number 10",
                "content": "<!-- wp:pullquote -->",
                "date": "2022-05-03",
                "answered": true,
                "attribution": "dayone",
                "answered_users_count": 2,
                "answered_users_sample": [
                    {"avatar": "https://0.gravatar.com/avatar/a"},
                    {"avatar": "https://0.gravatar.com/avatar/b"}
                ]
            }
        ]
    }"#;

    #[test]
    fn test_decode_remote_envelope() {
        let envelope: RemotePromptsEnvelope = serde_json::from_str(PAYLOAD).unwrap();
        assert_eq!(envelope.prompts.len(), 1);

        let prompt = BloggingPrompt::from(envelope.prompts[0].clone());
        assert_eq!(prompt.prompt_id, 248);
        assert_eq!(prompt.date, NaiveDate::from_ymd_opt(2022, 5, 3).unwrap());
        assert!(prompt.answered);
        assert_eq!(prompt.answer_count, 2);
        assert_eq!(prompt.display_avatar_urls.len(), 2);
        assert_eq!(prompt.prompt_attribution(), Some(PromptAttribution::DayOne));
    }

    #[test]
    fn test_decode_tolerates_missing_optional_fields() {
        let json = r#"{"prompts": [{"id": "7", "text": "Hi", "date": "2022-01-01", "title": null}]}"#;
        let envelope: RemotePromptsEnvelope = serde_json::from_str(json).unwrap();
        let prompt = BloggingPrompt::from(envelope.prompts[0].clone());
        assert_eq!(prompt.prompt_id, 7);
        assert_eq!(prompt.title, "");
        assert!(!prompt.answered);
        assert_eq!(prompt.answer_count, 0);
        assert!(prompt.display_avatar_urls.is_empty());
        assert_eq!(prompt.prompt_attribution(), None);
    }

    #[test]
    fn test_example_prompt() {
        let date = NaiveDate::from_ymd_opt(2022, 5, 3).unwrap();
        let prompt = BloggingPrompt::example(date);
        assert_eq!(prompt.prompt_id, 239);
        assert_eq!(prompt.date, date);
        assert!(prompt.content.contains(&prompt.text));
    }
}
