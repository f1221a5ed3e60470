//! Structural change notifications.
//!
//! Every mutation of the object graph emits exactly one [`GraphChange`]
//! through the document's [`Notifier`]. Dispatch is synchronous to an
//! explicit observer list; the core knows nothing about who listens or
//! what they redraw.

use std::fmt;

use crate::path::Path;

/// What happened to the object a change refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ChangeKind {
    Added,
    Removed,
    Modified,
}

/// One structural change: which object, and what happened to it.
#[derive(Clone, Debug, PartialEq)]
pub struct GraphChange {
    pub path: Path,
    pub kind: ChangeKind,
}

impl GraphChange {
    pub fn new(path: Path, kind: ChangeKind) -> Self {
        Self { path, kind }
    }
}

impl fmt::Display for GraphChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ChangeKind::Added => "added",
            ChangeKind::Removed => "removed",
            ChangeKind::Modified => "modified",
        };
        write!(f, "{} {}", kind, self.path)
    }
}

/// Handle returned by [`Notifier::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriberId(u64);

type Listener = Box<dyn FnMut(&GraphChange)>;

/// Synchronous observer list.
///
/// Listeners run on the owning thread, in subscription order, during the
/// mutation that produced the change. Not serialized and not cloned with
/// the document.
#[derive(Default)]
pub struct Notifier {
    listeners: Vec<(SubscriberId, Listener)>,
    next: u64,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a listener; returns a handle for [`Notifier::unsubscribe`].
    pub fn subscribe(&mut self, listener: Listener) -> SubscriberId {
        let id = SubscriberId(self.next);
        self.next += 1;
        self.listeners.push((id, listener));
        id
    }

    /// Remove a listener. Unknown handles are ignored.
    pub fn unsubscribe(&mut self, id: SubscriberId) {
        self.listeners.retain(|(sub, _)| *sub != id);
    }

    /// Dispatch a change to every listener, in subscription order.
    pub fn emit(&mut self, change: &GraphChange) {
        log::trace!("graph change: {}", change);
        for (_, listener) in &mut self.listeners {
            listener(change);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Notifier")
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_all_listeners() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut notifier = Notifier::new();
        for _ in 0..2 {
            let seen = Rc::clone(&seen);
            notifier.subscribe(Box::new(move |change: &GraphChange| {
                seen.borrow_mut().push(change.kind);
            }));
        }
        notifier.emit(&GraphChange::new(Path::root(), ChangeKind::Modified));
        assert_eq!(*seen.borrow(), vec![ChangeKind::Modified; 2]);
    }

    #[test]
    fn test_unsubscribe() {
        let seen = Rc::new(RefCell::new(0));
        let mut notifier = Notifier::new();
        let sub = {
            let seen = Rc::clone(&seen);
            notifier.subscribe(Box::new(move |_| *seen.borrow_mut() += 1))
        };
        notifier.emit(&GraphChange::new(Path::root(), ChangeKind::Added));
        notifier.unsubscribe(sub);
        notifier.emit(&GraphChange::new(Path::root(), ChangeKind::Added));
        assert_eq!(*seen.borrow(), 1);
        assert_eq!(notifier.listener_count(), 0);
    }
}
