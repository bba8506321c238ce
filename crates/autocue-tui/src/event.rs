use std::time::Duration;

use anyhow::Result;
use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;

/// Cloneable handle the scroll engine callback posts deltas through
pub type DeltaSender = mpsc::UnboundedSender<f64>;

/// Multiplexes terminal input with scroll deltas coming from the engine task
///
/// Deltas arrive on the engine's own task; they are queued here and applied
/// by the UI loop, which is the only place the viewport offset changes.
pub struct EventHandler {
    poll_rate: Duration,
    deltas: mpsc::UnboundedReceiver<f64>,
}

impl EventHandler {
    pub fn new(poll_rate_ms: u64) -> (Self, DeltaSender) {
        let (tx, rx) = mpsc::unbounded_channel();
        let handler = Self {
            poll_rate: Duration::from_millis(poll_rate_ms.max(1)),
            deltas: rx,
        };
        (handler, tx)
    }

    /// Deltas queued since the last call, one entry per engine tick
    pub fn drain_deltas(&mut self) -> Vec<f64> {
        let mut drained = Vec::new();
        while let Ok(delta) = self.deltas.try_recv() {
            drained.push(delta);
        }
        drained
    }

    /// Wait up to the poll window for terminal input
    pub fn next(&self) -> Result<AppEvent> {
        if !event::poll(self.poll_rate)? {
            return Ok(AppEvent::Tick);
        }

        let event = match event::read()? {
            // Release/repeat events are reported by some terminals; only presses act
            Event::Key(key) if key.kind == KeyEventKind::Press => AppEvent::Key(key),
            Event::Resize(w, h) => AppEvent::Resize(w, h),
            _ => AppEvent::Ignored,
        };
        Ok(event)
    }
}

#[derive(Debug)]
pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
    /// Poll window elapsed without input
    Tick,
    /// Mouse, focus, paste and key releases
    Ignored,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drain_deltas_in_order() {
        let (mut handler, tx) = EventHandler::new(16);
        assert!(handler.drain_deltas().is_empty());

        tx.send(0.66).unwrap();
        tx.send(1.32).unwrap();
        assert_eq!(handler.drain_deltas(), vec![0.66, 1.32]);
        assert!(handler.drain_deltas().is_empty());
    }
}
