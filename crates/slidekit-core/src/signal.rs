//! Change signals: plain observer lists fired synchronously.

use std::fmt;

/// Identifies a connected listener so it can be disconnected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A payload-free signal. Listeners re-read state through the widget's getters.
#[derive(Default)]
pub struct Signal {
    listeners: Vec<(ListenerId, Box<dyn FnMut()>)>,
    next_id: u64,
}

impl Signal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener.
    pub fn connect(&mut self, listener: impl FnMut() + 'static) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns false if it was not connected.
    pub fn disconnect(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    /// Call every listener in connection order.
    pub fn fire(&mut self) {
        for (_, listener) in &mut self.listeners {
            listener();
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// When a widget fires its change signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NotifyPolicy {
    /// Any handle move that changes the derived value, drag ticks included.
    #[default]
    EveryChange,
    /// Only drag-end and programmatic writes.
    Settled,
}

/// Whether a handle update is a transient drag tick or a settled write.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateKind {
    Tick,
    Settled,
}

/// Tracks the last published value and decides when to notify.
#[derive(Debug, Clone)]
pub struct ChangeNotifier<T> {
    policy: NotifyPolicy,
    last: Option<T>,
}

impl<T> Default for ChangeNotifier<T> {
    fn default() -> Self {
        Self {
            policy: NotifyPolicy::default(),
            last: None,
        }
    }
}

impl<T: PartialEq + Copy> ChangeNotifier<T> {
    pub fn new(policy: NotifyPolicy) -> Self {
        Self { policy, last: None }
    }

    pub fn policy(&self) -> NotifyPolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: NotifyPolicy) {
        self.policy = policy;
    }

    /// Record `value` as already published without notifying.
    pub fn reset(&mut self, value: Option<T>) {
        self.last = value;
    }

    pub fn last(&self) -> Option<T> {
        self.last
    }

    /// Returns true if listeners should be notified about `value`.
    pub fn observe(&mut self, value: T, kind: UpdateKind) -> bool {
        if self.policy == NotifyPolicy::Settled && kind == UpdateKind::Tick {
            return false;
        }
        if self.last == Some(value) {
            return false;
        }
        self.last = Some(value);
        true
    }
}
