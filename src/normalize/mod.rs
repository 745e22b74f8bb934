//! Pure conversions from raw cell values into typed entry fields.
//!
//! None of these functions fail: malformed or missing input yields an absent
//! (`None` or empty) value.

use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::config::ColumnSpan;
use crate::model::{Cell, MentorshipType, MultilineText, NetworkLink, Numeric, Platform};

/// Link markers checked in order; the first one contained in a link decides
/// its platform.
pub const PLATFORM_MARKERS: &[(&str, Platform)] = &[
    ("linkedin", Platform::Linkedin),
    ("twitter", Platform::Twitter),
    ("github", Platform::Github),
    ("medium", Platform::Medium),
    ("youtube", Platform::Youtube),
    ("instagram", Platform::Instagram),
    ("//t.", Platform::Telegram),
    ("meetup", Platform::Meetup),
    ("slack", Platform::Slack),
    ("facebook", Platform::Facebook),
];

const TYPE_AD_HOC: &str = "ad hoc";
const TYPE_LONG_TERM: &str = "long-term";
const TYPE_BOTH: &str = "both";

static EMPTY_CELL: Cell = Cell::Empty;

/// Returns the cell at `column`, or an empty cell past the end of the row.
pub fn cell(row: &[Cell], column: usize) -> &Cell {
    row.get(column).unwrap_or(&EMPTY_CELL)
}

/// Splits whitespace-separated links and files each under a platform.
pub fn classify_network_links(raw: &str) -> Vec<NetworkLink> {
    raw.split_whitespace()
        .map(|link| NetworkLink::new(classify_link(link), link))
        .collect()
}

fn classify_link(link: &str) -> Platform {
    PLATFORM_MARKERS
        .iter()
        .find(|(marker, _)| link.contains(marker))
        .map(|(_, platform)| *platform)
        .unwrap_or(Platform::Website)
}

/// Collects the non-blank cells of an inclusive column span, in column order,
/// with trailing whitespace removed.
pub fn collect_range(row: &[Cell], span: ColumnSpan) -> Vec<String> {
    span.columns()
        .filter_map(|column| cell(row, column).text())
        .map(|value| value.trim_end().to_string())
        .collect()
}

fn digit_runs() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("digit pattern is valid"))
}

/// All runs of ASCII digits in `text`, in order of appearance. Runs too
/// large for an `i64` saturate at `i64::MAX`.
pub fn extract_numbers(text: &str) -> Vec<i64> {
    digit_runs()
        .find_iter(text)
        .map(|found| {
            found.as_str().parse::<i64>().unwrap_or_else(|_| {
                debug!(run = found.as_str(), "digit run overflows i64, saturating");
                i64::MAX
            })
        })
        .collect()
}

/// Numeric cells pass through; text cells yield the largest number they
/// mention. Anything else is absent.
pub fn extract_number(value: &Cell) -> Option<Numeric> {
    match value {
        Cell::Integer(number) => Some(Numeric::Integer(*number)),
        Cell::Float(number) if !number.is_nan() => Some(Numeric::from_f64(*number)),
        Cell::Text(text) => extract_numbers(text).into_iter().max().map(Numeric::Integer),
        _ => None,
    }
}

/// Keeps the line structure of long free text for literal block output.
pub fn preserve_multiline(value: &Cell) -> Option<MultilineText> {
    let text = value.text()?;
    Some(MultilineText(dedent(&text)))
}

/// Removes the leading whitespace shared by every non-blank line.
/// Whitespace-only lines are emptied and do not take part in the margin.
pub fn dedent(text: &str) -> String {
    let margin = text
        .split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(leading_whitespace)
        .reduce(common_prefix)
        .unwrap_or("");

    text.split('\n')
        .map(|line| {
            if line.trim().is_empty() {
                ""
            } else {
                &line[margin.len()..]
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn leading_whitespace(line: &str) -> &str {
    let content = line.trim_start_matches([' ', '\t']);
    &line[..line.len() - content.len()]
}

fn common_prefix<'a>(lhs: &'a str, rhs: &str) -> &'a str {
    let shared = lhs
        .bytes()
        .zip(rhs.bytes())
        .take_while(|(left, right)| left == right)
        .count();
    &lhs[..shared]
}

/// Maps free-text answers to a mentorship type. Checks run in the order
/// ad hoc, long-term, both; the first phrase found wins.
pub fn classify_mentorship_type(text: &str) -> Option<MentorshipType> {
    let lowered = text.to_lowercase();
    if lowered.contains(TYPE_AD_HOC) {
        Some(MentorshipType::AdHoc)
    } else if lowered.contains(TYPE_LONG_TERM) {
        Some(MentorshipType::LongTerm)
    } else if lowered.contains(TYPE_BOTH) {
        Some(MentorshipType::Both)
    } else {
        None
    }
}
