use std::collections::BTreeSet;
use std::time::Duration;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::sync::mpsc::UnboundedSender;

use crate::calendar::validate::END_BEFORE_START;
use crate::calendar::{
    self, Edit, EventDraft, Field, FieldErrors, GeneratedLink, Provider, ValidatedEvent,
};
use crate::clipboard::{self, ClipboardError, CopyMethod};
use crate::components::event_form::Focus;
use crate::config::AppConfig;
use crate::event::Message;
use crate::timer::Deferred;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Info,
    Success,
    Error,
}

/// Transient message shown in the status bar until the next key press.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

pub struct App {
    pub running: bool,
    pub show_help: bool,
    pub focus: Focus,
    pub provider: Provider,
    pub draft: EventDraft,
    pub link: Option<GeneratedLink>,
    /// Event behind `link`, kept for the summary line.
    pub event: Option<ValidatedEvent>,
    pub copied: bool,
    pub notice: Option<Notice>,
    errors: FieldErrors,
    touched: BTreeSet<Field>,
    copy_feedback: Duration,
    copy_generation: u64,
    feedback_timer: Deferred,
    tx: UnboundedSender<Message>,
}

impl App {
    pub fn new(config: &AppConfig, tx: UnboundedSender<Message>) -> Self {
        let draft = EventDraft::default();
        let errors = calendar::validate(&draft).err().unwrap_or_default();

        Self {
            running: true,
            show_help: false,
            focus: Focus::Provider,
            provider: config.provider,
            draft,
            link: None,
            event: None,
            copied: false,
            notice: None,
            errors,
            touched: BTreeSet::new(),
            copy_feedback: config.copy_feedback(),
            copy_generation: 0,
            feedback_timer: Deferred::new(),
            tx,
        }
    }

    pub fn handle(&mut self, message: Message) {
        match message {
            Message::Key(key) => {
                // Notices last until the next key
                self.notice = None;
                self.on_key(key);
            }
            // The caller redraws after every message.
            Message::Resize => {}
            Message::CopyFinished { url, result } => self.on_copy_finished(&url, result),
            Message::CopyFeedbackExpired(generation) => self.on_copy_feedback_expired(generation),
            Message::InputClosed => self.running = false,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.show_help {
            if matches!(key.code, KeyCode::Esc | KeyCode::F(1)) {
                self.show_help = false;
            }
            return;
        }

        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => self.running = false,
            (KeyCode::F(1), _) => self.show_help = true,
            (KeyCode::Char('y'), KeyModifiers::CONTROL) => self.copy_link(),
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => {
                self.generate();
            }
            (KeyCode::Char('u'), KeyModifiers::CONTROL) => self.clear_field(),
            (KeyCode::Enter, _) => self.open_link(),
            (KeyCode::Tab, _) | (KeyCode::Down, _) => self.focus_next(),
            (KeyCode::BackTab, _) | (KeyCode::Up, _) => self.focus_prev(),
            (KeyCode::Left, _) if self.focus == Focus::Provider => self.prev_provider(),
            (KeyCode::Right, _) if self.focus == Focus::Provider => self.next_provider(),
            (KeyCode::Backspace, _) => self.backspace(),
            (KeyCode::Char(c), m) if is_text_input(m) => self.input_char(c),
            _ => {}
        }
    }

    /// Errors for fields the user has touched so far.
    pub fn visible_errors(&self) -> FieldErrors {
        self.errors.filtered(|field| self.touched.contains(&field))
    }

    pub fn notify(&mut self, kind: NoticeKind, text: impl Into<String>) {
        self.notice = Some(Notice {
            kind,
            text: text.into(),
        });
    }

    // ── Focus ──

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    // ── Provider ──

    pub fn set_provider(&mut self, provider: Provider) {
        if provider == self.provider {
            return;
        }
        self.provider = provider;
        self.invalidate_link();
        tracing::debug!(%provider, "provider changed");
    }

    pub fn next_provider(&mut self) {
        self.set_provider(self.provider.next());
    }

    pub fn prev_provider(&mut self) {
        self.set_provider(self.provider.prev());
    }

    // ── Editing ──

    /// Apply an edit to the draft and re-run validation.
    pub fn edit(&mut self, edit: Edit) {
        let field = edit.field();
        let draft = std::mem::take(&mut self.draft).apply(edit);
        self.draft = draft;
        self.touched.insert(field);
        self.invalidate_link();
        self.revalidate();

        // An ordering conflict belongs on the end fields even if they
        // were filled before the start changed.
        if field.is_temporal() && self.errors.get(Field::EndTime) == Some(END_BEFORE_START) {
            self.touched.extend([Field::EndDate, Field::EndTime]);
        }
    }

    pub fn input_char(&mut self, c: char) {
        match self.focus {
            Focus::Field(field) => self.edit(Edit::Insert(field, c)),
            Focus::Provider if c == ' ' => self.next_provider(),
            Focus::Provider => {}
        }
    }

    pub fn backspace(&mut self) {
        if let Focus::Field(field) = self.focus {
            self.edit(Edit::Backspace(field));
        }
    }

    pub fn clear_field(&mut self) {
        if let Focus::Field(field) = self.focus {
            self.edit(Edit::Clear(field));
        }
    }

    fn revalidate(&mut self) {
        self.errors = calendar::validate(&self.draft).err().unwrap_or_default();
    }

    fn invalidate_link(&mut self) {
        self.link = None;
        self.event = None;
        self.copied = false;
        self.feedback_timer.cancel();
    }

    // ── Generate / open / copy ──

    /// Validate the whole form and build the link for the current provider.
    pub fn generate(&mut self) -> Option<String> {
        self.touched.extend(Field::ALL);

        match calendar::validate(&self.draft) {
            Ok(event) => {
                self.errors = FieldErrors::default();
                let link = GeneratedLink::build(self.provider, &event);
                tracing::info!(provider = %self.provider, "generated link");
                let url = link.url.clone();
                self.link = Some(link);
                self.event = Some(event);
                Some(url)
            }
            Err(errors) => {
                tracing::debug!(count = errors.len(), %errors, "validation failed");
                self.errors = errors;
                self.link = None;
                self.event = None;
                self.notify(NoticeKind::Error, "Fix the highlighted fields");
                None
            }
        }
    }

    /// Generate and launch the link in the default browser.
    pub fn open_link(&mut self) {
        let Some(url) = self.generate() else {
            return;
        };
        match open::that_detached(&url) {
            Ok(()) => {
                let label = self.provider.label();
                self.notify(NoticeKind::Info, format!("Opening {}", label));
            }
            Err(err) => {
                tracing::warn!(error = %err, "could not launch browser");
                self.notify(
                    NoticeKind::Error,
                    "Could not open a browser. Copy the link instead.",
                );
            }
        }
    }

    /// Generate and copy the link on a background task.
    pub fn copy_link(&mut self) {
        let Some(url) = self.generate() else {
            return;
        };
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = clipboard::copy(&url).await;
            let _ = tx.send(Message::CopyFinished { url, result });
        });
    }

    fn on_copy_finished(&mut self, url: &str, result: Result<CopyMethod, ClipboardError>) {
        let tool = match result {
            Ok(CopyMethod::System(tool)) => tool,
            Ok(CopyMethod::Terminal) => {
                // Nothing confirms the terminal honoured OSC 52.
                tracing::info!("link sent through terminal clipboard sequence");
                self.notify(NoticeKind::Info, "Sent to terminal clipboard (OSC 52)");
                return;
            }
            Err(err) => {
                tracing::error!(error = %err, "copy failed");
                self.notify(
                    NoticeKind::Error,
                    "Failed to copy URL. Please copy it manually.",
                );
                return;
            }
        };

        tracing::info!(tool, "link copied");
        self.notify(NoticeKind::Success, "URL copied to clipboard");
        // The link changed while the copy was running.
        if self.link.as_ref().map(|link| link.url.as_str()) != Some(url) {
            return;
        }
        self.copied = true;

        let rescheduled = self.feedback_timer.is_pending();
        tracing::debug!(rescheduled, "scheduling copied indicator reset");

        self.copy_generation += 1;
        let generation = self.copy_generation;
        let tx = self.tx.clone();
        self.feedback_timer.schedule(self.copy_feedback, move || {
            let _ = tx.send(Message::CopyFeedbackExpired(generation));
        });
    }

    fn on_copy_feedback_expired(&mut self, generation: u64) {
        // A newer copy owns the indicator.
        if generation == self.copy_generation {
            self.copied = false;
        }
    }
}

/// Plain characters, including AltGr combinations, which terminals report
/// as Ctrl+Alt.
fn is_text_input(modifiers: KeyModifiers) -> bool {
    let chord = KeyModifiers::CONTROL | KeyModifiers::ALT;
    modifiers.contains(chord) || !modifiers.intersects(chord)
}
