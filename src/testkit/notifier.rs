//! Event collector for notification assertions.

use std::sync::{Arc, Mutex};

use crate::port::{Event, Notifier};

/// Thread-safe event collector for notification assertions in tests.
///
/// Clones share the same event list, so a test can keep one clone and hand
/// another to a [`NotifierRegistry`](crate::port::NotifierRegistry).
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    events: Arc<Mutex<Vec<Event>>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.lock().expect("lock notifier events").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().expect("lock notifier events").clone()
    }

    /// Subjects of every recorded event, oldest first.
    pub fn subjects(&self) -> Vec<String> {
        self.events().iter().map(Event::subject).collect()
    }

    pub fn clear(&self) {
        self.events.lock().expect("lock notifier events").clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, event: Event) {
        self.events
            .lock()
            .expect("lock notifier events")
            .push(event);
    }
}
