use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Tabs},
    Frame,
};

use crate::calendar::Provider;
use crate::theme;

pub struct ProviderPicker;

impl ProviderPicker {
    pub fn render(frame: &mut Frame, area: Rect, selected: Provider, focused: bool) {
        let border_style = if focused {
            theme::current().accent
        } else {
            theme::current().border
        };

        let mut block = Block::default()
            .title(" Calendar Platform ")
            .title_style(theme::current().header)
            .borders(Borders::ALL)
            .border_style(border_style);

        if let Some(note) = selected.note() {
            block = block.title_bottom(Line::from(Span::styled(
                format!(" {} ", note),
                theme::current().dim,
            )));
        }

        let titles = Provider::ALL
            .iter()
            .map(|p| Line::from(format!(" {} ", p.label())));

        let tabs = Tabs::new(titles)
            .block(block)
            .select(selected.index())
            .style(Style::default())
            .highlight_style(theme::current().accent.add_modifier(Modifier::REVERSED))
            .divider("|");

        frame.render_widget(tabs, area);
    }
}
