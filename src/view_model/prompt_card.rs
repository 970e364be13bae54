//! Dashboard card for today's blogging prompt.

use crate::error::InsightsResult;
use crate::models::{BloggingPrompt, PromptAttribution};

use super::format::decode_xml_entities;

pub const ERROR_TITLE: &str = "Error loading prompt";
pub const EXAMPLE_PROMPT: &str = "Cast the movie of your life.";
pub const ANSWER_BUTTON_TITLE: &str = "Answer Prompt";
pub const ANSWERED_TITLE: &str = "✓ Answered";

/// Most avatars drawn next to the answer count
pub const MAX_AVATAR_COUNT: usize = 3;
/// Answer count shown in example mode
pub const EXAMPLE_ANSWER_COUNT: i64 = 19;

/// What the card offers below the prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnswerState {
    /// "Answer Prompt" button
    Unanswered,
    /// "Answered" label with a share action
    Answered,
}

/// Display-ready content of a loaded prompt card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptCardContent {
    pub prompt_text: String,
    pub attribution: Option<PromptAttribution>,
    /// "1 answer" / "N answers", only when someone answered
    pub answer_info: Option<String>,
    /// `None` entries draw a placeholder avatar
    pub avatar_urls: Vec<Option<String>>,
    pub answer_state: AnswerState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptCard {
    Loaded(PromptCardContent),
    /// The fetch failed; the card shows [`ERROR_TITLE`]
    Failed,
}

impl PromptCard {
    /// Card for the outcome of fetching today's prompt.
    ///
    /// A successful fetch with no prompt still draws the card with empty text.
    pub fn from_fetch(result: &InsightsResult<Option<BloggingPrompt>>) -> Self {
        match result {
            Ok(prompt) => PromptCard::Loaded(PromptCardContent::from_prompt(prompt.as_ref())),
            Err(_) => PromptCard::Failed,
        }
    }

    /// Card shown during feature introductions
    pub fn example() -> Self {
        PromptCard::Loaded(PromptCardContent {
            prompt_text: EXAMPLE_PROMPT.to_string(),
            attribution: None,
            answer_info: answer_info(EXAMPLE_ANSWER_COUNT),
            avatar_urls: vec![None; MAX_AVATAR_COUNT],
            answer_state: AnswerState::Unanswered,
        })
    }

    pub fn title(&self) -> Option<&'static str> {
        match self {
            PromptCard::Failed => Some(ERROR_TITLE),
            PromptCard::Loaded(_) => None,
        }
    }
}

impl PromptCardContent {
    pub fn from_prompt(prompt: Option<&BloggingPrompt>) -> Self {
        let answer_count = prompt.map_or(0, |p| p.answer_count);
        let avatar_limit = usize::try_from(answer_count)
            .unwrap_or(0)
            .min(MAX_AVATAR_COUNT);

        Self {
            prompt_text: prompt
                .map(|p| decode_xml_entities(&p.text).trim().to_string())
                .unwrap_or_default(),
            attribution: prompt.and_then(BloggingPrompt::prompt_attribution),
            answer_info: answer_info(answer_count),
            avatar_urls: prompt
                .map(|p| {
                    p.display_avatar_urls
                        .iter()
                        .take(avatar_limit)
                        .cloned()
                        .map(Some)
                        .collect()
                })
                .unwrap_or_default(),
            answer_state: if prompt.is_some_and(|p| p.answered) {
                AnswerState::Answered
            } else {
                AnswerState::Unanswered
            },
        }
    }
}

fn answer_info(count: i64) -> Option<String> {
    match count {
        c if c <= 0 => None,
        1 => Some("1 answer".to_string()),
        c => Some(format!("{} answers", c)),
    }
}
