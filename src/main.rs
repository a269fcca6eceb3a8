mod app;
mod calendar;
mod clipboard;
mod components;
mod config;
mod event;
mod logging;
mod theme;
mod timer;
mod tui;

use app::App;
use color_eyre::Result;
use components::event_form::{Focus, FORM_HEIGHT};
use config::AppConfig;
use event::Message;
use ratatui::layout::{Constraint, Layout};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tokio::sync::mpsc::{self, UnboundedReceiver};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load()?;
    let log_path = logging::init(&config.log_level)?;
    theme::init(&config.theme);
    tracing::info!(
        provider = %config.provider,
        theme = %theme::current().name,
        log = ?log_path,
        "starting calendar-link"
    );

    tui::install_panic_hook();

    let (tx, rx) = mpsc::unbounded_channel();
    let mut terminal = tui::init()?;
    event::spawn_reader(tx.clone());

    let mut app = App::new(&config, tx);
    let result = run(&mut terminal, &mut app, rx).await;
    // Dropping the app cancels the pending feedback timer.
    drop(app);
    tui::restore()?;

    tracing::info!("exiting");
    result
}

async fn run(
    terminal: &mut tui::Tui,
    app: &mut App,
    mut rx: UnboundedReceiver<Message>,
) -> Result<()> {
    while app.running {
        terminal.draw(|frame| render(frame, app))?;

        let Some(message) = rx.recv().await else {
            break;
        };
        app.handle(message);
    }

    Ok(())
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();

    let layout = Layout::vertical([
        Constraint::Length(2),
        Constraint::Length(3),
        Constraint::Length(FORM_HEIGHT),
        Constraint::Min(4),
        Constraint::Length(1),
    ])
    .split(area);

    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "Calendar Event Scheduler",
            theme::current().header,
        )),
        Line::from(Span::styled(
            "Create events for Google Calendar or Outlook Calendar",
            theme::current().dim,
        )),
    ]);
    frame.render_widget(header, layout[0]);

    components::ProviderPicker::render(
        frame,
        layout[1],
        app.provider,
        app.focus == Focus::Provider,
    );

    components::EventForm::render(
        frame,
        layout[2],
        &app.draft,
        &app.visible_errors(),
        app.focus,
    );

    components::LinkPanel::render(
        frame,
        layout[3],
        app.link.as_ref(),
        app.event.as_ref(),
        app.copied,
    );

    components::StatusBar::render(frame, layout[4], app.focus, app.notice.as_ref());

    if app.show_help {
        components::help::render_help(frame, area);
    }
}
