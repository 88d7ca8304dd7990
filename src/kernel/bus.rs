use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};

use super::event::LifecycleEvent;

#[derive(Clone)]
pub struct EventBusSender {
    tx: Sender<LifecycleEvent>,
}

pub struct EventBusReceiver {
    rx: Receiver<LifecycleEvent>,
}

pub fn event_bus() -> (EventBusSender, EventBusReceiver) {
    let (tx, rx) = mpsc::channel();
    (EventBusSender { tx }, EventBusReceiver { rx })
}

impl EventBusSender {
    /// Raises an event; a dropped engine is not an error for the host.
    pub fn emit(&self, event: LifecycleEvent) {
        if self.tx.send(event).is_err() {
            tracing::trace!(?event, "event bus closed, dropping event");
        }
    }
}

impl EventBusReceiver {
    pub fn try_recv(&mut self) -> Result<LifecycleEvent, TryRecvError> {
        self.rx.try_recv()
    }
}
