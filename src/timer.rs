//! One-shot deferred events.
//!
//! A `OneShot` posts a single `AppEvent` onto the event loop after a delay.
//! Cancelling the handle, or dropping it, disarms the timer if it has not
//! fired yet.

use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread;
use std::time::Duration;

use crate::event::AppEvent;

pub struct OneShot {
    cancel: Sender<()>,
}

impl OneShot {
    pub fn after(delay: Duration, tx: Sender<AppEvent>, event: AppEvent) -> Self {
        let (cancel, cancelled) = mpsc::channel::<()>();
        thread::spawn(move || {
            if let Err(RecvTimeoutError::Timeout) = cancelled.recv_timeout(delay) {
                let _ = tx.send(event);
            }
        });
        Self { cancel }
    }

    pub fn cancel(self) {
        let _ = self.cancel.send(());
    }
}
