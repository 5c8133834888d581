//! "Waiting for reply" indicator driven by chat events.

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use testflows_common::{ChatEvent, EventBus};
use tokio::sync::broadcast::error::RecvError;
use tokio::task::JoinHandle;

const WAITING: &str = "...";

/// Indicator state on the terminal line.
#[derive(Debug, Default)]
struct Mark {
    shown: bool,
}

impl Mark {
    /// Draw the indicator unless the send has already settled.
    fn draw(&mut self, out: &mut impl Write, still_waiting: bool) -> io::Result<()> {
        if self.shown || !still_waiting {
            return Ok(());
        }
        write!(out, "{WAITING}")?;
        out.flush()?;
        self.shown = true;
        Ok(())
    }

    fn erase(&mut self, out: &mut impl Write) -> io::Result<()> {
        if !self.shown {
            return Ok(());
        }
        write!(out, "\r{}\r", " ".repeat(WAITING.len()))?;
        out.flush()?;
        self.shown = false;
        Ok(())
    }
}

/// Prints an indicator on stderr while a send is in flight.
///
/// The background task only draws; the owner erases with [`Indicator::clear`]
/// before printing the reply, so the two never interleave.
pub struct Indicator {
    mark: Arc<Mutex<Mark>>,
    task: JoinHandle<()>,
}

impl Indicator {
    pub fn spawn(events: &EventBus, waiting: Arc<AtomicBool>) -> Self {
        let mark = Arc::new(Mutex::new(Mark::default()));
        let mut rx = events.subscribe();
        let task_mark = Arc::clone(&mark);
        let task = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ChatEvent::WaitingChanged(true)) => {
                        let Ok(mut mark) = task_mark.lock() else {
                            break;
                        };
                        let _ = mark.draw(&mut io::stderr(), waiting.load(Ordering::Acquire));
                    }
                    Ok(_) | Err(RecvError::Lagged(_)) => {}
                    Err(RecvError::Closed) => break,
                }
            }
        });
        Self { mark, task }
    }

    /// Erase the indicator if it is on screen.
    pub fn clear(&self) {
        if let Ok(mut mark) = self.mark.lock() {
            let _ = mark.erase(&mut io::stderr());
        }
    }
}

impl Drop for Indicator {
    fn drop(&mut self) {
        self.task.abort();
    }
}
