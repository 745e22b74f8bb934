use std::fmt;

/// One positional row read from the mentors sheet.
pub type Row = Vec<Cell>;

/// Value of a single worksheet cell, detached from the spreadsheet reader.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Cell {
    /// Missing or empty cell.
    #[default]
    Empty,
    /// Text cell.
    Text(String),
    /// Whole number cell.
    Integer(i64),
    /// Floating point cell. Excel stores most numbers this way.
    Float(f64),
    /// Boolean cell.
    Bool(bool),
}

impl Cell {
    /// Returns `true` when the cell holds no usable value.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(value) => value.trim().is_empty(),
            Cell::Float(value) => value.is_nan(),
            Cell::Integer(_) | Cell::Bool(_) => false,
        }
    }

    /// Renders the cell as text, or `None` when it is blank.
    /// Line breaks are normalised to `\n`.
    pub fn text(&self) -> Option<String> {
        if self.is_blank() {
            return None;
        }
        Some(match self {
            Cell::Text(value) => value.replace("\r\n", "\n").replace('\r', "\n"),
            Cell::Integer(value) => value.to_string(),
            Cell::Float(value) => Numeric::from_f64(*value).to_string(),
            Cell::Bool(value) => value.to_string(),
            Cell::Empty => String::new(),
        })
    }

    /// Like [`Cell::text`] but maps blank cells to the empty string.
    pub fn text_or_empty(&self) -> String {
        self.text().unwrap_or_default()
    }
}

/// Numeric field value. Whole numbers are kept as integers so they render
/// without a fractional part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Integer(i64),
    Decimal(f64),
}

impl Numeric {
    pub fn from_f64(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            Numeric::Integer(value as i64)
        } else {
            Numeric::Decimal(value)
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Integer(value) => write!(f, "{value}"),
            Numeric::Decimal(value) => write!(f, "{value}"),
        }
    }
}

/// Engagement style offered by a mentor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MentorshipType {
    AdHoc,
    LongTerm,
    Both,
}

impl MentorshipType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MentorshipType::AdHoc => "ad-hoc",
            MentorshipType::LongTerm => "long-term",
            MentorshipType::Both => "both",
        }
    }
}

/// Category a social-media link is filed under in the `network` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Linkedin,
    Twitter,
    Github,
    Medium,
    Youtube,
    Instagram,
    Telegram,
    Meetup,
    Slack,
    Facebook,
    Website,
}

impl Platform {
    /// Key used for the link in the output document.
    pub fn key(&self) -> &'static str {
        match self {
            Platform::Linkedin => "linkedin",
            Platform::Twitter => "twitter",
            Platform::Github => "github",
            Platform::Medium => "medium",
            Platform::Youtube => "youtube",
            Platform::Instagram => "instagram",
            Platform::Telegram => "telegram",
            Platform::Meetup => "meetup",
            Platform::Slack => "slack",
            Platform::Facebook => "facebook",
            Platform::Website => "website",
        }
    }
}

/// A classified entry of the `network` list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkLink {
    pub platform: Platform,
    pub url: String,
}

impl NetworkLink {
    pub fn new(platform: Platform, url: impl Into<String>) -> Self {
        Self {
            platform,
            url: url.into(),
        }
    }
}

/// Text that must be emitted as a literal block so embedded newlines survive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultilineText(pub String);

impl MultilineText {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Nested `skills` mapping of a mentor entry.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Skills {
    pub experience: String,
    pub years: Option<Numeric>,
    pub mentee: Option<MultilineText>,
    pub areas: Vec<String>,
    /// Programming languages joined with `", "`.
    pub languages: String,
    pub focus: Vec<String>,
    pub extra: Option<MultilineText>,
}

/// One entry of the mentors document, built from a single sheet row.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MentorRecord {
    pub name: String,
    pub disabled: bool,
    pub matched: bool,
    pub sort: i64,
    pub hours: Option<Numeric>,
    pub mentorship_type: Option<MentorshipType>,
    pub index: u64,
    pub location: String,
    pub position: String,
    pub bio: Option<MultilineText>,
    pub image: String,
    pub languages: String,
    pub skills: Skills,
    pub network: Vec<NetworkLink>,
}
