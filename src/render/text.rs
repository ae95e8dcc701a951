//! Plain-text rendering of a report index

use serde_json::Value;

use crate::core::{Category, Report, SectionData};

pub const DIVIDER: &str =
    "========================================================================";

/// Renders a built [`Report`] as a plain-text summary.
///
/// Sections come out sorted by name, categories in their declared order.
/// Rendering never mutates the report, so repeated calls give identical text.
#[derive(Debug, Clone, Copy)]
pub struct PlainTextReport<'a> {
    report: &'a Report,
}

impl<'a> PlainTextReport<'a> {
    pub fn new(report: &'a Report) -> Self {
        Self { report }
    }

    pub fn render(&self) -> String {
        let mut lines: Vec<String> = Vec::new();

        for (name, contents) in self.report.sections() {
            // One entry: it ends in the divider, so the name is never padded.
            lines.push(format!("{name}\n{DIVIDER}"));
            for category in Category::ALL {
                push_category(&mut lines, contents, category);
            }
        }

        lines
            .into_iter()
            .map(pad_trailing_backslash)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Shorthand for `PlainTextReport::new(report).render()`.
pub fn plain_text(report: &Report) -> String {
    PlainTextReport::new(report).render()
}

pub fn category_header(category: Category) -> &'static str {
    match category {
        Category::Commands => "-  commands executed:",
        Category::CopiedFiles => "-  files copied:",
        Category::CreatedFiles => "-  files created:",
        Category::Alerts => "-  alerts:",
        Category::Notes => "-  notes:",
    }
}

fn push_category(lines: &mut Vec<String>, contents: &SectionData, category: Category) {
    let Some(items) = contents.get(&category) else {
        return;
    };
    lines.push(category_header(category).to_string());
    for item in items {
        lines.push(format_item(category, item));
    }
}

fn format_item(category: Category, item: &Value) -> String {
    match category {
        Category::Commands | Category::CopiedFiles | Category::CreatedFiles => {
            let name = item.get("name").unwrap_or(item);
            format!("  * {}", value_text(name))
        }
        Category::Alerts => format!("  ! {}", value_text(item)),
        Category::Notes => format!("  * {}", value_text(item)),
    }
}

/// Strings as their raw contents, anything else as compact JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// Downstream consumers choke on a line ending in a backslash.
fn pad_trailing_backslash(mut line: String) -> String {
    if line.ends_with('\\') {
        line.push(' ');
    }
    line
}
