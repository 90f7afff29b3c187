//! Deferred writes gated on the host confirming layout.

/// Holds the write issued before the widget has been laid out.
///
/// Until [`LayoutGate::confirm`] is called, [`LayoutGate::when_rendered`]
/// parks its argument, replacing any earlier one. Afterwards it hands the
/// argument straight back so the caller can apply it. Dropping the gate drops
/// anything still parked.
#[derive(Debug, Clone)]
pub struct LayoutGate<T> {
    rendered: bool,
    pending: Option<T>,
}

impl<T> Default for LayoutGate<T> {
    fn default() -> Self {
        Self {
            rendered: false,
            pending: None,
        }
    }
}

impl<T> LayoutGate<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether layout has been confirmed.
    pub fn is_rendered(&self) -> bool {
        self.rendered
    }

    /// Park `write`, or return it for immediate application once rendered.
    pub fn when_rendered(&mut self, write: T) -> Option<T> {
        if self.rendered {
            Some(write)
        } else {
            if self.pending.is_some() {
                log::trace!("Replacing deferred write before layout");
            }
            self.pending = Some(write);
            None
        }
    }

    /// Mark layout as confirmed and take the parked write.
    pub fn confirm(&mut self) -> Option<T> {
        self.rendered = true;
        self.pending.take()
    }

    /// The parked write, if any.
    pub fn pending(&self) -> Option<&T> {
        self.pending.as_ref()
    }
}
