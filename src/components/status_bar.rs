use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{Notice, NoticeKind};
use crate::components::event_form::Focus;
use crate::theme;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, focus: Focus, notice: Option<&Notice>) {
        let w = area.width as usize;
        let status = theme::current().status;

        let left = match focus {
            Focus::Provider => " [Platform] ".to_string(),
            Focus::Field(field) => format!(" [{}] ", field.label()),
        };

        // Show the notice if present, otherwise context-aware hints
        let (right, right_style) = match notice {
            Some(notice) => {
                let style = match notice.kind {
                    NoticeKind::Info => status,
                    NoticeKind::Success => status.fg(theme::current().success.fg.unwrap_or_default()),
                    NoticeKind::Error => status.fg(theme::current().error.fg.unwrap_or_default()),
                };
                (format!(" {} ", notice.text), style)
            }
            None => {
                let hints = if w >= 80 {
                    " Tab:Next Enter:Open ^Y:Copy ^G:Generate ^U:Clear F1:Help Esc:Quit "
                } else if w >= 50 {
                    " Tab Enter:Open ^Y:Copy F1:Help Esc:Quit "
                } else {
                    " F1:Help Esc:Quit "
                };
                if focus == Focus::Provider && w >= 80 {
                    (format!(" \u{2190}/\u{2192}:Switch{}", hints), status)
                } else {
                    (hints.to_string(), status)
                }
            }
        };

        let used = left.chars().count() + right.chars().count();
        let padding = " ".repeat(w.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(left, status),
            Span::styled(padding, status),
            Span::styled(right, right_style),
        ]);

        frame.render_widget(Paragraph::new(line).style(status), area);
    }
}
