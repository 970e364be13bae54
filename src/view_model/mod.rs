//! View models
//!
//! - [`SiteStatsInsightsViewModel`]: projects the insights store into rows
//! - [`PromptCard`]: today's blogging prompt as a dashboard card
//! - [`format`]: number and date formatting shared by both

pub mod format;
pub mod insights;
pub mod prompt_card;
pub mod rows;

pub use insights::{select_block, SiteStatsInsightsViewModel, MAX_ROWS_TO_DISPLAY};
pub use prompt_card::{
    AnswerState, PromptCard, PromptCardContent, ANSWERED_TITLE, ANSWER_BUTTON_TITLE, ERROR_TITLE,
};
pub use rows::{
    strip_structural_rows, GhostKind, GrowAudienceData, InsightsTable, MostPopularTimeData, Row,
    TabData, TotalInsightsData, TotalRowData, TwoColumnRowData,
};
