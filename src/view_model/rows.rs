//! Row models for the Insights table
//!
//! Rows carry display-ready strings and numbers only. Building them is the
//! job of [`super::insights`]; drawing them is the job of the caller.

use crate::models::{LastPostInsight, PostStats, PostingStreakEvent, StatSection};
use crate::traits::GrowAudienceHint;

// ============================================================================
// Row data
// ============================================================================

/// Two labelled values side by side
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TwoColumnRowData {
    pub left_column_name: String,
    pub left_column_data: String,
    pub right_column_name: String,
    pub right_column_data: String,
}

impl TwoColumnRowData {
    pub fn new(
        left_name: &str,
        left_data: impl Into<String>,
        right_name: &str,
        right_data: impl Into<String>,
    ) -> Self {
        Self {
            left_column_name: left_name.to_string(),
            left_column_data: left_data.into(),
            right_column_name: right_name.to_string(),
            right_column_data: right_data.into(),
        }
    }
}

/// A named value in a list, optionally with a bar, icon and drill-down
#[derive(Debug, Clone, PartialEq)]
pub struct TotalRowData {
    pub name: String,
    pub data: String,
    /// Fraction of the bar to fill, relative to the list's first item
    pub data_bar_percent: Option<f32>,
    pub icon: Option<String>,
    pub icon_url: Option<String>,
    pub show_disclosure: bool,
    pub disclosure_url: Option<String>,
    pub child_rows: Vec<TotalRowData>,
    pub stat_section: StatSection,
}

impl TotalRowData {
    pub fn new(name: impl Into<String>, data: impl Into<String>, stat_section: StatSection) -> Self {
        Self {
            name: name.into(),
            data: data.into(),
            data_bar_percent: None,
            icon: None,
            icon_url: None,
            show_disclosure: false,
            disclosure_url: None,
            child_rows: Vec::new(),
            stat_section,
        }
    }
}

/// One tab of a tabbed totals card
#[derive(Debug, Clone, PartialEq)]
pub struct TabData {
    pub tab_title: String,
    pub item_subtitle: String,
    pub data_subtitle: String,
    /// Caption such as "Total Email Followers: 12"
    pub total_count: Option<String>,
    pub data_rows: Vec<TotalRowData>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MostPopularTimeData {
    pub most_popular_day_title: String,
    pub most_popular_time_title: String,
    pub most_popular_day: String,
    pub most_popular_time: String,
    pub day_percentage: String,
    pub time_percentage: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TotalInsightsData {
    pub count: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GrowAudienceData {
    pub hint: GrowAudienceHint,
    pub all_time_views_count: i64,
    pub is_nudge_completed: bool,
}

/// Placeholder shapes shown while a card loads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GhostKind {
    GrowAudience,
    Chart,
    TwoColumn,
    Top,
    Tabbed,
    PostingActivity,
}

// ============================================================================
// Row
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Row {
    /// Card title
    Header(StatSection),
    GrowAudience(GrowAudienceData),
    LatestPostSummary {
        summary: Option<LastPostInsight>,
        chart: Option<PostStats>,
    },
    TwoColumnStats {
        section: StatSection,
        data_rows: Vec<TwoColumnRowData>,
    },
    TotalInsight {
        section: StatSection,
        data: TotalInsightsData,
    },
    /// `None` when there is no usable most-popular data
    MostPopularTime(Option<MostPopularTimeData>),
    TopTotals {
        section: StatSection,
        item_subtitle: String,
        data_subtitle: String,
        data_rows: Vec<TotalRowData>,
    },
    TabbedTotals {
        section: StatSection,
        tabs: Vec<TabData>,
        show_total_count: bool,
    },
    /// One list of events per month, oldest month first
    PostingActivity { months: Vec<Vec<PostingStreakEvent>> },
    Ghost(GhostKind),
    Error,
    TableFooter,
    AddInsight(TotalRowData),
}

impl Row {
    /// Header and footer rows, which the new appearance drops
    pub fn is_structural(&self) -> bool {
        matches!(self, Row::Header(_) | Row::TableFooter)
    }

    /// Content, placeholder or error row closing a card
    pub fn is_terminal(&self) -> bool {
        !self.is_structural() && !matches!(self, Row::AddInsight(_))
    }
}

// ============================================================================
// InsightsTable
// ============================================================================

/// The projected table
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InsightsTable {
    /// Nothing to show; the caller draws its blank state
    #[default]
    Empty,
    /// All rows in one section
    Single(Vec<Row>),
    /// One row per section
    Sectioned(Vec<Vec<Row>>),
}

impl InsightsTable {
    pub fn is_empty(&self) -> bool {
        matches!(self, InsightsTable::Empty)
    }

    pub fn section_count(&self) -> usize {
        match self {
            InsightsTable::Empty => 0,
            InsightsTable::Single(_) => 1,
            InsightsTable::Sectioned(sections) => sections.len(),
        }
    }

    /// Rows in display order regardless of sectioning
    pub fn rows(&self) -> Vec<&Row> {
        match self {
            InsightsTable::Empty => Vec::new(),
            InsightsTable::Single(rows) => rows.iter().collect(),
            InsightsTable::Sectioned(sections) => sections.iter().flatten().collect(),
        }
    }
}

/// Drop header and footer rows, keeping the order of the rest
pub fn strip_structural_rows(rows: Vec<Row>) -> Vec<Row> {
    rows.into_iter().filter(|row| !row.is_structural()).collect()
}
