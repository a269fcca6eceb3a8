use chrono::{DateTime, Local, Utc};

/// An event that passed validation and can be turned into a link.
///
/// Only [`validate`](super::validate::validate_in) constructs this type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedEvent {
    pub(super) title: String,
    pub(super) start: DateTime<Utc>,
    pub(super) end: DateTime<Utc>,
    pub(super) location: Option<String>,
    pub(super) description: Option<String>,
}

impl ValidatedEvent {
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Local-time summary such as `Mon 15 Jan 2024 10:00 - 11:00`.
    pub fn duration_display(&self) -> String {
        let start = self.start.with_timezone(&Local);
        let end = self.end.with_timezone(&Local);
        if start.date_naive() == end.date_naive() {
            format!(
                "{} - {}",
                start.format("%a %d %b %Y %H:%M"),
                end.format("%H:%M")
            )
        } else {
            format!(
                "{} - {}",
                start.format("%a %d %b %Y %H:%M"),
                end.format("%a %d %b %Y %H:%M")
            )
        }
    }
}
