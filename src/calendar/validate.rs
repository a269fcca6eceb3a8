use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};

use super::draft::{EventDraft, Field};
use super::event::ValidatedEvent;

pub const END_BEFORE_START: &str = "End must be after Start";

/// Accepted date inputs; the first one is what the form displays.
const DATE_FORMATS: [&str; 2] = ["%d/%m/%Y", "%Y-%m-%d"];
const TIME_FORMAT: &str = "%H:%M";

/// One message per failing field, ordered like the form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<Field, String>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&str> {
        self.0.get(&field).map(String::as_str)
    }

    pub fn contains(&self, field: Field) -> bool {
        self.0.contains_key(&field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.0.iter().map(|(field, msg)| (*field, msg.as_str()))
    }

    /// Keep only the errors of fields matching `keep`.
    pub fn filtered(&self, mut keep: impl FnMut(Field) -> bool) -> Self {
        Self(
            self.0
                .iter()
                .filter(|(field, _)| keep(**field))
                .map(|(field, msg)| (*field, msg.clone()))
                .collect(),
        )
    }

    fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.0.insert(field, message.into());
    }
}

impl fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (_, msg)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(msg)?;
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

/// Validate against the machine's local time zone.
pub fn validate(draft: &EventDraft) -> Result<ValidatedEvent, FieldErrors> {
    validate_in(draft, &Local)
}

/// Validate a draft, interpreting its dates and times in `tz`.
///
/// Required fields are checked first. The end-after-start rule only runs
/// once all four date and time fields are present and well formed.
pub fn validate_in<Tz: TimeZone>(
    draft: &EventDraft,
    tz: &Tz,
) -> Result<ValidatedEvent, FieldErrors> {
    let mut errors = FieldErrors::default();

    let title = draft.get(Field::Title).trim();
    if title.is_empty() {
        errors.insert(Field::Title, required(Field::Title));
    }

    let start_date = parse_date(draft, Field::StartDate, &mut errors);
    let start_time = parse_time(draft, Field::StartTime, &mut errors);
    let end_date = parse_date(draft, Field::EndDate, &mut errors);
    let end_time = parse_time(draft, Field::EndTime, &mut errors);

    let range = match (start_date, start_time, end_date, end_time) {
        (Some(sd), Some(st), Some(ed), Some(et)) => {
            let start = resolve(tz, sd.and_time(st), Field::StartTime, &mut errors);
            let end = resolve(tz, ed.and_time(et), Field::EndTime, &mut errors);
            match (start, end) {
                (Some(start), Some(end)) if end > start => Some((start, end)),
                (Some(_), Some(_)) => {
                    errors.insert(Field::EndDate, END_BEFORE_START);
                    errors.insert(Field::EndTime, END_BEFORE_START);
                    None
                }
                _ => None,
            }
        }
        _ => None,
    };

    match range {
        Some((start, end)) if errors.is_empty() => Ok(ValidatedEvent {
            title: title.to_string(),
            start,
            end,
            location: optional(draft, Field::Location),
            description: optional(draft, Field::Description),
        }),
        _ => Err(errors),
    }
}

fn required(field: Field) -> String {
    format!("{} is required", field.label())
}

fn parse_date(draft: &EventDraft, field: Field, errors: &mut FieldErrors) -> Option<NaiveDate> {
    let raw = draft.get(field).trim();
    if raw.is_empty() {
        errors.insert(field, required(field));
        return None;
    }
    let parsed = DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok());
    if parsed.is_none() {
        errors.insert(field, format!("{} must be DD/MM/YYYY", field.label()));
    }
    parsed
}

fn parse_time(draft: &EventDraft, field: Field, errors: &mut FieldErrors) -> Option<NaiveTime> {
    let raw = draft.get(field).trim();
    if raw.is_empty() {
        errors.insert(field, required(field));
        return None;
    }
    match NaiveTime::parse_from_str(raw, TIME_FORMAT) {
        Ok(time) => Some(time),
        Err(_) => {
            errors.insert(field, format!("{} must be HH:MM", field.label()));
            None
        }
    }
}

/// Map a wall-clock time to an instant; ambiguous times take the earlier one.
fn resolve<Tz: TimeZone>(
    tz: &Tz,
    local: NaiveDateTime,
    field: Field,
    errors: &mut FieldErrors,
) -> Option<DateTime<Utc>> {
    match tz.from_local_datetime(&local).earliest() {
        Some(instant) => Some(instant.with_timezone(&Utc)),
        None => {
            errors.insert(
                field,
                format!("{} does not exist in the local time zone", field.label()),
            );
            None
        }
    }
}

fn optional(draft: &EventDraft, field: Field) -> Option<String> {
    let value = draft.get(field).trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::draft::Edit;
    use chrono::FixedOffset;

    fn est() -> FixedOffset {
        FixedOffset::west_opt(5 * 3600).unwrap()
    }

    fn draft(fields: &[(Field, &str)]) -> EventDraft {
        fields.iter().fold(EventDraft::default(), |d, (field, value)| {
            d.apply(Edit::Set(*field, value.to_string()))
        })
    }

    fn meeting() -> EventDraft {
        draft(&[
            (Field::Title, "Team Meeting"),
            (Field::StartDate, "15/01/2024"),
            (Field::StartTime, "10:00"),
            (Field::EndDate, "15/01/2024"),
            (Field::EndTime, "11:00"),
        ])
    }

    #[test]
    fn valid_draft_converts_to_utc() {
        let event = validate_in(&meeting(), &est()).unwrap();
        assert_eq!(event.title(), "Team Meeting");
        assert_eq!(event.start().to_rfc3339(), "2024-01-15T15:00:00+00:00");
        assert_eq!(event.end().to_rfc3339(), "2024-01-15T16:00:00+00:00");
        assert_eq!(event.location(), None);
        assert_eq!(event.description(), None);
    }

    #[test]
    fn empty_draft_reports_every_required_field() {
        let errors = validate_in(&EventDraft::default(), &Utc).unwrap_err();
        assert_eq!(errors.len(), 5);
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert_eq!(errors.get(Field::StartDate), Some("Start Date is required"));
        assert_eq!(errors.get(Field::StartTime), Some("Start Time is required"));
        assert_eq!(errors.get(Field::EndDate), Some("End Date is required"));
        assert_eq!(errors.get(Field::EndTime), Some("End Time is required"));
        assert!(!errors.contains(Field::Location));
        assert!(!errors.contains(Field::Description));
    }

    #[test]
    fn whitespace_title_counts_as_missing() {
        let d = meeting().apply(Edit::Set(Field::Title, "   ".to_string()));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(errors.get(Field::Title), Some("Title is required"));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn end_equal_to_start_fails_on_both_end_fields() {
        let d = meeting().apply(Edit::Set(Field::EndTime, "10:00".to_string()));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(errors.get(Field::EndDate), Some(END_BEFORE_START));
        assert_eq!(errors.get(Field::EndTime), Some(END_BEFORE_START));
        assert!(!errors.contains(Field::StartDate));
        assert!(!errors.contains(Field::StartTime));
    }

    #[test]
    fn end_on_earlier_day_fails() {
        let d = meeting().apply(Edit::Set(Field::EndDate, "14/01/2024".to_string()));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(errors.get(Field::EndDate), Some(END_BEFORE_START));
    }

    #[test]
    fn end_later_day_earlier_clock_time_passes() {
        let d = meeting()
            .apply(Edit::Set(Field::EndDate, "16/01/2024".to_string()))
            .apply(Edit::Set(Field::EndTime, "09:00".to_string()));
        assert!(validate_in(&d, &Utc).is_ok());
    }

    #[test]
    fn ordering_rule_waits_for_all_temporal_fields() {
        let d = meeting()
            .apply(Edit::Set(Field::EndTime, "08:00".to_string()))
            .apply(Edit::Clear(Field::StartDate));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::StartDate), Some("Start Date is required"));
    }

    #[test]
    fn malformed_values_get_format_errors() {
        let d = meeting()
            .apply(Edit::Set(Field::StartDate, "2024/15/01".to_string()))
            .apply(Edit::Set(Field::EndTime, "11h".to_string()));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(
            errors.get(Field::StartDate),
            Some("Start Date must be DD/MM/YYYY")
        );
        assert_eq!(errors.get(Field::EndTime), Some("End Time must be HH:MM"));
        assert!(!errors.contains(Field::EndDate));
    }

    #[test]
    fn iso_dates_are_accepted() {
        let d = meeting()
            .apply(Edit::Set(Field::StartDate, "2024-01-15".to_string()))
            .apply(Edit::Set(Field::EndDate, "2024-01-15".to_string()));
        let event = validate_in(&d, &Utc).unwrap();
        assert_eq!(event.start().to_rfc3339(), "2024-01-15T10:00:00+00:00");
    }

    #[test]
    fn optional_fields_are_trimmed_and_blank_becomes_none() {
        let d = meeting()
            .apply(Edit::Set(Field::Location, "  Room 4  ".to_string()))
            .apply(Edit::Set(Field::Description, "   ".to_string()));
        let event = validate_in(&d, &Utc).unwrap();
        assert_eq!(event.location(), Some("Room 4"));
        assert_eq!(event.description(), None);
    }

    #[test]
    fn validation_is_repeatable() {
        let d = meeting().apply(Edit::Set(Field::EndTime, "09:00".to_string()));
        assert_eq!(validate_in(&d, &Utc), validate_in(&d, &Utc));
    }

    #[test]
    fn filtered_keeps_selected_fields() {
        let errors = validate_in(&EventDraft::default(), &Utc).unwrap_err();
        let only_title = errors.filtered(|f| f == Field::Title);
        assert_eq!(only_title.len(), 1);
        assert!(only_title.contains(Field::Title));
    }

    #[test]
    fn display_joins_messages_in_form_order() {
        let d = meeting()
            .apply(Edit::Clear(Field::Title))
            .apply(Edit::Clear(Field::EndTime));
        let errors = validate_in(&d, &Utc).unwrap_err();
        assert_eq!(errors.to_string(), "Title is required; End Time is required");
    }

    // New York springs forward on 10 March 2024 and falls back on 3 November 2024.

    #[test]
    fn time_skipped_by_dst_is_reported_on_its_field() {
        let d = meeting()
            .apply(Edit::Set(Field::StartDate, "10/03/2024".to_string()))
            .apply(Edit::Set(Field::StartTime, "02:30".to_string()))
            .apply(Edit::Set(Field::EndDate, "10/03/2024".to_string()))
            .apply(Edit::Set(Field::EndTime, "04:00".to_string()));
        let errors = validate_in(&d, &chrono_tz::America::New_York).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors.get(Field::StartTime),
            Some("Start Time does not exist in the local time zone")
        );
    }

    #[test]
    fn repeated_time_resolves_to_earlier_instant() {
        let d = meeting()
            .apply(Edit::Set(Field::StartDate, "03/11/2024".to_string()))
            .apply(Edit::Set(Field::StartTime, "01:30".to_string()))
            .apply(Edit::Set(Field::EndDate, "03/11/2024".to_string()))
            .apply(Edit::Set(Field::EndTime, "01:45".to_string()));
        let event = validate_in(&d, &chrono_tz::America::New_York).unwrap();
        assert_eq!(event.start().to_rfc3339(), "2024-11-03T05:30:00+00:00");
        assert_eq!(event.end().to_rfc3339(), "2024-11-03T05:45:00+00:00");
    }

    #[test]
    fn same_repeated_wall_time_on_both_ends_fails_ordering() {
        let d = meeting()
            .apply(Edit::Set(Field::StartDate, "03/11/2024".to_string()))
            .apply(Edit::Set(Field::StartTime, "01:30".to_string()))
            .apply(Edit::Set(Field::EndDate, "03/11/2024".to_string()))
            .apply(Edit::Set(Field::EndTime, "01:30".to_string()));
        let errors = validate_in(&d, &chrono_tz::America::New_York).unwrap_err();
        assert_eq!(errors.get(Field::EndDate), Some(END_BEFORE_START));
        assert_eq!(errors.get(Field::EndTime), Some(END_BEFORE_START));
    }
}
