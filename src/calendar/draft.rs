/// Maximum number of characters accepted in the description field.
pub const DESCRIPTION_MAX_CHARS: usize = 500;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Title,
    StartDate,
    StartTime,
    EndDate,
    EndTime,
    Location,
    Description,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::Title,
        Field::StartDate,
        Field::StartTime,
        Field::EndDate,
        Field::EndTime,
        Field::Location,
        Field::Description,
    ];

    /// Human-readable name, also used in error messages.
    pub fn label(&self) -> &'static str {
        match self {
            Field::Title => "Title",
            Field::StartDate => "Start Date",
            Field::StartTime => "Start Time",
            Field::EndDate => "End Date",
            Field::EndTime => "End Time",
            Field::Location => "Location",
            Field::Description => "Description",
        }
    }

    pub fn is_temporal(&self) -> bool {
        matches!(
            self,
            Field::StartDate | Field::StartTime | Field::EndDate | Field::EndTime
        )
    }

    pub fn is_required(&self) -> bool {
        !matches!(self, Field::Location | Field::Description)
    }

    pub fn max_chars(&self) -> Option<usize> {
        match self {
            Field::Description => Some(DESCRIPTION_MAX_CHARS),
            _ => None,
        }
    }
}

/// A single user edit applied to one field of the draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Insert(Field, char),
    Backspace(Field),
    Clear(Field),
    Set(Field, String),
}

impl Edit {
    pub fn field(&self) -> Field {
        match self {
            Edit::Insert(field, _)
            | Edit::Backspace(field)
            | Edit::Clear(field)
            | Edit::Set(field, _) => *field,
        }
    }
}

/// The event as currently typed into the form.
///
/// Values are raw text; parsing and checking happen in
/// [`validate`](super::validate). Each edit produces a new draft.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventDraft {
    title: String,
    start_date: String,
    start_time: String,
    end_date: String,
    end_time: String,
    location: String,
    description: String,
}

impl EventDraft {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Title => &self.title,
            Field::StartDate => &self.start_date,
            Field::StartTime => &self.start_time,
            Field::EndDate => &self.end_date,
            Field::EndTime => &self.end_time,
            Field::Location => &self.location,
            Field::Description => &self.description,
        }
    }

    fn slot(&mut self, field: Field) -> &mut String {
        match field {
            Field::Title => &mut self.title,
            Field::StartDate => &mut self.start_date,
            Field::StartTime => &mut self.start_time,
            Field::EndDate => &mut self.end_date,
            Field::EndTime => &mut self.end_time,
            Field::Location => &mut self.location,
            Field::Description => &mut self.description,
        }
    }

    pub fn char_count(&self, field: Field) -> usize {
        self.get(field).chars().count()
    }

    /// Apply one edit and return the resulting draft.
    pub fn apply(mut self, edit: Edit) -> Self {
        let field = edit.field();
        let limit = field.max_chars();
        let len = self.char_count(field);
        let slot = self.slot(field);

        match edit {
            Edit::Insert(_, c) => {
                if !c.is_control() && limit.map_or(true, |max| len < max) {
                    slot.push(c);
                }
            }
            Edit::Backspace(_) => {
                slot.pop();
            }
            Edit::Clear(_) => slot.clear(),
            Edit::Set(_, text) => {
                *slot = match limit {
                    Some(max) => text.chars().take(max).collect(),
                    None => text,
                };
            }
        }

        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_backspace_touch_only_their_field() {
        let draft = EventDraft::default()
            .apply(Edit::Insert(Field::Title, 'H'))
            .apply(Edit::Insert(Field::Title, 'i'))
            .apply(Edit::Insert(Field::Location, 'X'))
            .apply(Edit::Backspace(Field::Location));

        assert_eq!(draft.get(Field::Title), "Hi");
        assert_eq!(draft.get(Field::Location), "");
    }

    #[test]
    fn backspace_on_empty_field_is_a_no_op() {
        let draft = EventDraft::default().apply(Edit::Backspace(Field::EndTime));
        assert_eq!(draft, EventDraft::default());
    }

    #[test]
    fn description_refuses_input_past_limit() {
        let full = "a".repeat(DESCRIPTION_MAX_CHARS);
        let draft = EventDraft::default()
            .apply(Edit::Set(Field::Description, full.clone()))
            .apply(Edit::Insert(Field::Description, 'b'));

        assert_eq!(draft.get(Field::Description), full);
    }

    #[test]
    fn description_set_is_truncated_by_chars() {
        let long = "é".repeat(DESCRIPTION_MAX_CHARS + 20);
        let draft = EventDraft::default().apply(Edit::Set(Field::Description, long));
        assert_eq!(draft.char_count(Field::Description), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn title_has_no_limit() {
        let long = "t".repeat(DESCRIPTION_MAX_CHARS + 1);
        let draft = EventDraft::default().apply(Edit::Set(Field::Title, long.clone()));
        assert_eq!(draft.get(Field::Title), long);
    }

    #[test]
    fn control_characters_are_ignored() {
        let draft = EventDraft::default()
            .apply(Edit::Insert(Field::Title, '\n'))
            .apply(Edit::Insert(Field::Title, '\t'));
        assert_eq!(draft.get(Field::Title), "");
    }

    #[test]
    fn clear_empties_field() {
        let draft = EventDraft::default()
            .apply(Edit::Set(Field::StartDate, "15/01/2024".to_string()))
            .apply(Edit::Clear(Field::StartDate));
        assert_eq!(draft.get(Field::StartDate), "");
    }

    #[test]
    fn required_and_temporal_fields() {
        let required: Vec<_> = Field::ALL.iter().filter(|f| f.is_required()).collect();
        assert_eq!(required.len(), 5);
        let temporal: Vec<_> = Field::ALL.iter().filter(|f| f.is_temporal()).collect();
        assert_eq!(temporal.len(), 4);
    }
}
