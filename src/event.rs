use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;

use crate::clipboard::{ClipboardError, CopyMethod};

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Everything the main loop reacts to.
#[derive(Debug)]
pub enum Message {
    Key(KeyEvent),
    Resize,
    /// A background copy of `url` completed.
    CopyFinished {
        url: String,
        result: Result<CopyMethod, ClipboardError>,
    },
    /// The copied indicator timer fired; carries the copy it belongs to.
    CopyFeedbackExpired(u64),
    InputClosed,
}

pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Forward terminal input to `tx` until the receiver goes away.
pub fn spawn_reader(tx: UnboundedSender<Message>) -> JoinHandle<()> {
    tokio::task::spawn_blocking(move || {
        while !tx.is_closed() {
            let message = match poll_event(POLL_INTERVAL) {
                Ok(Some(Event::Key(key))) if key.kind == KeyEventKind::Press => Message::Key(key),
                Ok(Some(Event::Resize(..))) => Message::Resize,
                Ok(_) => continue,
                Err(err) => {
                    tracing::error!(error = %err, "terminal input failed");
                    let _ = tx.send(Message::InputClosed);
                    return;
                }
            };
            if tx.send(message).is_err() {
                return;
            }
        }
    })
}
