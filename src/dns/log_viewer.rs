use crate::dns::log_record::LogRecord;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::sync::mpsc;

const RING_CAPACITY: usize = 100;
const SUBSCRIBER_CAPACITY: usize = 100;

struct State {
    ring: VecDeque<String>,
    subscribers: Vec<mpsc::Sender<String>>,
}

/// Holds a bounded ring buffer of the most recently answered questions and
/// fans new ones out to live HTTP subscribers. A single mutex guards both
/// the ring and the subscriber set.
pub struct LogViewer {
    state: Mutex<State>,
}

impl LogViewer {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(State {
                ring: VecDeque::with_capacity(RING_CAPACITY),
                subscribers: Vec::new(),
            }),
        }
    }

    pub fn push(&self, record: &LogRecord) {
        let line = record.render();
        let mut state = self.state.lock().unwrap();

        if state.ring.len() >= RING_CAPACITY {
            state.ring.pop_front();
        }
        state.ring.push_back(line.clone());

        // Non-blocking send; a subscriber that can't keep up (or has
        // disconnected) is dropped rather than stalling a DNS worker.
        state
            .subscribers
            .retain(|sender| sender.try_send(line.clone()).is_ok());
    }

    pub fn snapshot(&self) -> String {
        let state = self.state.lock().unwrap();
        state.ring.iter().cloned().collect::<Vec<_>>().join("\n")
    }

    /// Snapshot the ring and register a new subscriber, atomically under
    /// the same lock so no record is missed or duplicated.
    pub fn subscribe(&self) -> (String, mpsc::Receiver<String>) {
        let (sender, receiver) = mpsc::channel(SUBSCRIBER_CAPACITY);
        let mut state = self.state.lock().unwrap();
        let snapshot = state.ring.iter().cloned().collect::<Vec<_>>().join("\n");
        state.subscribers.push(sender);
        (snapshot, receiver)
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.state.lock().unwrap().subscribers.len()
    }
}

impl Default for LogViewer {
    fn default() -> Self {
        Self::new()
    }
}
