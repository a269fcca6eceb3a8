use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::theme;

const BINDINGS: &[(&str, &[(&str, &str)])] = &[
    (
        "Form",
        &[
            ("Tab", "Next field"),
            ("Shift+Tab", "Previous field"),
            ("\u{2190}/\u{2192} Space", "Switch platform"),
            ("Ctrl+U", "Clear field"),
        ],
    ),
    (
        "Link",
        &[
            ("Enter", "Open in calendar"),
            ("Ctrl+Y", "Copy URL to clipboard"),
            ("Ctrl+G", "Generate URL only"),
        ],
    ),
    ("", &[("F1", "Toggle help"), ("Esc", "Close help / quit")]),
];

pub fn render_help(frame: &mut Frame, area: Rect) {
    let popup_w = area.width.min(48).max(30);
    let popup_h = area.height.min(18).max(12);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Keybindings ")
        .title_style(theme::current().accent)
        .borders(Borders::ALL)
        .border_style(theme::current().accent);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = theme::current().accent;
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);

    let mut lines = Vec::new();
    for (i, (section, keys)) in BINDINGS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::from(""));
        }
        if !section.is_empty() {
            lines.push(Line::from(Span::styled(*section, section_style)));
        }
        for (key, desc) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<14}", key), key_style),
                Span::raw(*desc),
            ]));
        }
    }

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
