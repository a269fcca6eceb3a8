use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::calendar::{EventDraft, Field, FieldErrors, DESCRIPTION_MAX_CHARS};
use crate::theme;

/// Focusable items of the form, in Tab order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Provider,
    Field(Field),
}

const ORDER: [Focus; 8] = [
    Focus::Provider,
    Focus::Field(Field::Title),
    Focus::Field(Field::StartDate),
    Focus::Field(Field::StartTime),
    Focus::Field(Field::EndDate),
    Focus::Field(Field::EndTime),
    Focus::Field(Field::Location),
    Focus::Field(Field::Description),
];

impl Focus {
    fn position(&self) -> usize {
        ORDER.iter().position(|f| f == self).unwrap_or(0)
    }

    pub fn next(&self) -> Self {
        ORDER[(self.position() + 1) % ORDER.len()]
    }

    pub fn prev(&self) -> Self {
        ORDER[(self.position() + ORDER.len() - 1) % ORDER.len()]
    }
}

const LABEL_WIDTH: usize = 13;

/// Rows used by the form, borders included.
pub const FORM_HEIGHT: u16 = Field::ALL.len() as u16 * 2 + 2;

pub struct EventForm;

impl EventForm {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        draft: &EventDraft,
        errors: &FieldErrors,
        focus: Focus,
    ) {
        let block = Block::default()
            .title(" Event ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let inner = block.inner(area);
        frame.render_widget(block, area);

        // value line + error line per field
        let rows = Layout::vertical(
            Field::ALL
                .iter()
                .flat_map(|_| [Constraint::Length(1), Constraint::Length(1)])
                .chain([Constraint::Min(0)]),
        )
        .split(inner);

        for (i, field) in Field::ALL.iter().enumerate() {
            let active = focus == Focus::Field(*field);
            render_field(frame, rows[i * 2], draft, *field, active, errors.contains(*field));
            if let Some(msg) = errors.get(*field) {
                let line = Line::from(vec![
                    Span::raw(" ".repeat(LABEL_WIDTH)),
                    Span::styled(msg.to_string(), theme::current().error),
                ]);
                frame.render_widget(Paragraph::new(line), rows[i * 2 + 1]);
            }
        }
    }
}

fn placeholder(field: Field) -> &'static str {
    match field {
        Field::Title => "e.g. Team Meeting, Birthday Party",
        Field::StartDate | Field::EndDate => "DD/MM/YYYY",
        Field::StartTime | Field::EndTime => "HH:MM",
        Field::Location => "event location or meeting link",
        Field::Description => "agenda or notes",
    }
}

fn render_field(
    frame: &mut Frame,
    area: Rect,
    draft: &EventDraft,
    field: Field,
    active: bool,
    invalid: bool,
) {
    let value = draft.get(field);
    let cursor = if active { "_" } else { "" };
    let marker = if field.is_required() { "*" } else { " " };

    let style = if active {
        theme::current().accent
    } else {
        Style::default()
    };

    let label_style = if invalid {
        theme::current().error
    } else {
        theme::current().dim
    };

    let mut spans = vec![
        Span::styled(marker, theme::current().error),
        Span::styled(
            format!("{:<width$}", field.label(), width = LABEL_WIDTH - 1),
            label_style,
        ),
    ];

    if value.is_empty() && !active {
        spans.push(Span::styled(
            placeholder(field),
            theme::current().dim.add_modifier(Modifier::ITALIC),
        ));
    } else {
        spans.push(Span::styled(format!("{}{}", value, cursor), style));
    }

    if field == Field::Description {
        spans.push(Span::styled(
            format!("  {}/{}", draft.char_count(field), DESCRIPTION_MAX_CHARS),
            theme::current().dim,
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::validate::validate_in;
    use crate::calendar::Edit;
    use chrono::Utc;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen(draft: &EventDraft, errors: &FieldErrors, focus: Focus) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, FORM_HEIGHT)).unwrap();
        terminal
            .draw(|frame| EventForm::render(frame, frame.area(), draft, errors, focus))
            .unwrap();
        let buffer = terminal.backend().buffer();
        buffer
            .content()
            .chunks(buffer.area.width as usize)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn focus_cycles_through_every_item() {
        let mut focus = Focus::Provider;
        for _ in 0..ORDER.len() {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::Provider);
        assert_eq!(Focus::Provider.prev(), Focus::Field(Field::Description));
        assert_eq!(Focus::Field(Field::Title).prev(), Focus::Provider);
    }

    #[test]
    fn renders_labels_placeholders_and_counter() {
        let text = screen(&EventDraft::default(), &FieldErrors::default(), Focus::Provider);
        assert!(text.contains("*Start Date"));
        assert!(text.contains("DD/MM/YYYY"));
        assert!(text.contains(" Location"));
        assert!(text.contains("0/500"));
    }

    #[test]
    fn renders_value_with_cursor_and_errors() {
        let draft = EventDraft::default().apply(Edit::Set(Field::Title, "Standup".to_string()));
        let errors = validate_in(&draft, &Utc).unwrap_err();
        let text = screen(&draft, &errors, Focus::Field(Field::Title));
        assert!(text.contains("Standup_"));
        assert!(text.contains("Start Date is required"));
        assert!(!text.contains("Title is required"));
    }
}
