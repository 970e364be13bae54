//! Plain-text rendering of the insights table and prompt cards.
//!
//! Every `render_*` function returns lines so output can be asserted on;
//! the `print_*` wrappers write them to stdout.

use unicode_width::UnicodeWidthStr;

use crate::models::BloggingPrompt;
use crate::view_model::{
    AnswerState, GhostKind, InsightsTable, PromptCard, PromptCardContent, Row, TotalRowData,
    ANSWERED_TITLE, ANSWER_BUTTON_TITLE,
};

use super::boxes::{LINE_WIDTH, SECTION_RULE};

const BAR_WIDTH: usize = 12;
const EMPTY_TABLE: &str = "No insights to show.";

/// Pad `text` with spaces to `width` display columns
fn pad(text: &str, width: usize) -> String {
    let used = UnicodeWidthStr::width(text);
    format!("{}{}", text, " ".repeat(width.saturating_sub(used)))
}

/// `name ........ value` filling the line width
fn name_value(indent: usize, name: &str, value: &str) -> String {
    let lead = " ".repeat(indent);
    let used = indent + UnicodeWidthStr::width(name) + UnicodeWidthStr::width(value);
    let gap = LINE_WIDTH.saturating_sub(used).max(1);
    format!("{}{}{}{}", lead, name, " ".repeat(gap), value)
}

fn bar(percent: f32) -> String {
    let filled = ((percent.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn ghost_text(kind: GhostKind) -> &'static str {
    match kind {
        GhostKind::GrowAudience => "░░░░░░░░░░░░░░░░░░░░",
        GhostKind::Chart => "▁▁▁▁▁▁▁▁▁▁▁▁ loading",
        GhostKind::TwoColumn | GhostKind::Top | GhostKind::Tabbed => "░░░░░░░░  ░░░░ loading",
        GhostKind::PostingActivity => "▢▢▢▢▢▢▢▢▢▢▢▢ loading",
    }
}

fn total_rows(lines: &mut Vec<String>, rows: &[TotalRowData], indent: usize) {
    for row in rows {
        let mut name = String::new();
        if let Some(icon) = &row.icon {
            name.push_str(icon);
            name.push(' ');
        }
        name.push_str(&row.name);
        if row.show_disclosure {
            name.push_str(" ›");
        }

        let value = match row.data_bar_percent {
            Some(percent) => format!("{} {}", bar(percent), row.data),
            None => row.data.clone(),
        };
        lines.push(name_value(indent, &name, &value));
        total_rows(lines, &row.child_rows, indent + 2);
    }
}

fn subtitles(lines: &mut Vec<String>, item: &str, data: &str) {
    if !item.is_empty() || !data.is_empty() {
        lines.push(name_value(2, item, data));
    }
}

/// Lines for one row
pub fn render_row(row: &Row) -> Vec<String> {
    let mut lines = Vec::new();
    match row {
        Row::Header(section) => {
            lines.push(section.title().to_uppercase());
            lines.push(SECTION_RULE.repeat(LINE_WIDTH));
        }
        Row::GrowAudience(data) => {
            lines.push(format!("  {}", data.hint.title()));
            lines.push(format!("  All-time views: {}", data.all_time_views_count));
            if data.is_nudge_completed {
                lines.push("  ✓ Done".to_string());
            }
        }
        Row::LatestPostSummary { summary, chart } => match summary {
            Some(post) => {
                lines.push(format!("  {}", post.title));
                lines.push(name_value(2, "Views", &post.views_count.to_string()));
                lines.push(name_value(2, "Likes", &post.likes_count.to_string()));
                lines.push(name_value(2, "Comments", &post.comments_count.to_string()));
                if let Some(chart) = chart {
                    lines.push(format!("  {} days of views", chart.daily_views.len()));
                }
            }
            None => lines.push("  You haven't published any posts yet.".to_string()),
        },
        Row::TwoColumnStats { data_rows, .. } => {
            let half = LINE_WIDTH / 2;
            for data in data_rows {
                lines.push(format!(
                    "  {}{}",
                    pad(&data.left_column_name, half - 2),
                    data.right_column_name
                ));
                lines.push(format!(
                    "  {}{}",
                    pad(&data.left_column_data, half - 2),
                    data.right_column_data
                ));
            }
        }
        Row::TotalInsight { data, .. } => lines.push(format!("  {}", data.count)),
        Row::MostPopularTime(Some(data)) => {
            lines.push(name_value(
                2,
                &data.most_popular_day_title,
                &format!("{} ({})", data.most_popular_day, data.day_percentage),
            ));
            lines.push(name_value(
                2,
                &data.most_popular_time_title,
                &format!("{} ({})", data.most_popular_time, data.time_percentage),
            ));
        }
        Row::MostPopularTime(None) => lines.push("  No data yet".to_string()),
        Row::TopTotals {
            item_subtitle,
            data_subtitle,
            data_rows,
            ..
        } => {
            subtitles(&mut lines, item_subtitle, data_subtitle);
            if data_rows.is_empty() {
                lines.push("  No data yet".to_string());
            }
            total_rows(&mut lines, data_rows, 2);
        }
        Row::TabbedTotals {
            tabs,
            show_total_count,
            ..
        } => {
            for tab in tabs {
                lines.push(format!("  [{}]", tab.tab_title));
                if *show_total_count {
                    if let Some(total) = &tab.total_count {
                        lines.push(format!("  {}", total));
                    }
                }
                subtitles(&mut lines, &tab.item_subtitle, &tab.data_subtitle);
                total_rows(&mut lines, &tab.data_rows, 4);
            }
        }
        Row::PostingActivity { months } => {
            for month in months {
                let Some(first) = month.first() else {
                    continue;
                };
                let posts: i64 = month.iter().map(|event| event.post_count).sum();
                lines.push(name_value(
                    2,
                    &first.date.format("%b %Y").to_string(),
                    &format!("{} posts", posts),
                ));
            }
            if lines.is_empty() {
                lines.push("  No posts in the last year".to_string());
            }
        }
        Row::Ghost(kind) => lines.push(format!("  {}", ghost_text(*kind))),
        Row::Error => lines.push("  ✗ An error occurred.".to_string()),
        Row::TableFooter => lines.push(String::new()),
        Row::AddInsight(data) => {
            let icon = data.icon.as_deref().unwrap_or("+");
            lines.push(format!("{} {}", icon, data.name));
        }
    }
    lines
}

/// Lines for the whole table; sections are separated by a blank line
pub fn render_table(table: &InsightsTable) -> Vec<String> {
    match table {
        InsightsTable::Empty => vec![EMPTY_TABLE.to_string()],
        InsightsTable::Single(rows) => rows.iter().flat_map(render_row).collect(),
        InsightsTable::Sectioned(sections) => {
            let mut lines = Vec::new();
            for (index, section) in sections.iter().enumerate() {
                if index > 0 {
                    lines.push(String::new());
                }
                lines.extend(section.iter().flat_map(render_row));
            }
            lines
        }
    }
}

pub fn print_table(table: &InsightsTable) {
    for line in render_table(table) {
        println!("{}", line);
    }
}

fn card_content(lines: &mut Vec<String>, content: &PromptCardContent) {
    lines.push(content.prompt_text.clone());
    if let Some(attribution) = content.attribution {
        lines.push(format!("  {}", attribution.source_text()));
    }
    if let Some(info) = &content.answer_info {
        let avatars = "◉".repeat(content.avatar_urls.len());
        if avatars.is_empty() {
            lines.push(info.clone());
        } else {
            lines.push(format!("{} {}", avatars, info));
        }
    }
    lines.push(match content.answer_state {
        AnswerState::Unanswered => format!("[ {} ]", ANSWER_BUTTON_TITLE),
        AnswerState::Answered => ANSWERED_TITLE.to_string(),
    });
}

/// Lines for the dashboard prompt card
pub fn render_prompt_card(card: &PromptCard) -> Vec<String> {
    let mut lines = Vec::new();
    match card {
        PromptCard::Failed => {
            if let Some(title) = card.title() {
                lines.push(format!("✗ {}", title));
            }
        }
        PromptCard::Loaded(content) => card_content(&mut lines, content),
    }
    lines
}

pub fn print_prompt_card(card: &PromptCard) {
    for line in render_prompt_card(card) {
        println!("{}", line);
    }
}

/// One line per prompt: date, answered mark, and the decoded text
pub fn render_prompt_list(prompts: &[BloggingPrompt]) -> Vec<String> {
    if prompts.is_empty() {
        return vec!["No prompts.".to_string()];
    }
    prompts
        .iter()
        .map(|prompt| {
            let content = PromptCardContent::from_prompt(Some(prompt));
            let mark = match content.answer_state {
                AnswerState::Answered => "✓",
                AnswerState::Unanswered => " ",
            };
            format!("{} {} {}", prompt.date.format("%Y-%m-%d"), mark, content.prompt_text)
        })
        .collect()
}

pub fn print_prompt_list(prompts: &[BloggingPrompt]) {
    for line in render_prompt_list(prompts) {
        println!("{}", line);
    }
}
