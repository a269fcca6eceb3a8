use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::calendar::{GeneratedLink, ValidatedEvent};
use crate::theme;

pub struct LinkPanel;

impl LinkPanel {
    pub fn render(
        frame: &mut Frame,
        area: Rect,
        link: Option<&GeneratedLink>,
        event: Option<&ValidatedEvent>,
        copied: bool,
    ) {
        let title = match link {
            Some(link) if copied => format!(" {} link \u{2713} copied ", link.provider.label()),
            Some(link) => format!(" {} link ", link.provider.label()),
            None => " Link ".to_string(),
        };
        let title_style = if copied {
            theme::current().success
        } else {
            theme::current().header
        };

        let block = Block::default()
            .title(title)
            .title_style(title_style)
            .borders(Borders::ALL)
            .border_style(theme::current().border);

        let lines = match link {
            Some(link) => {
                let mut lines = Vec::new();
                if let Some(event) = event {
                    lines.push(Line::from(Span::styled(
                        event.duration_display(),
                        theme::current().dim,
                    )));
                }
                lines.push(Line::from(Span::styled(
                    link.url.clone(),
                    theme::current().link,
                )));
                lines
            }
            None => vec![Line::from(Span::styled(
                "Enter: open   Ctrl+Y: copy   Ctrl+G: generate",
                theme::current().dim,
            ))],
        };

        let para = Paragraph::new(lines).block(block).wrap(Wrap { trim: false });
        frame.render_widget(para, area);
    }
}
