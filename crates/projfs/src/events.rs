use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::node::NodeId;

/// What a mutation is about to do, offered to validators before any
/// backend I/O happens.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewEvent {
    pub node: NodeId,
    pub action: PreviewAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PreviewAction {
    Delete,
    Rename { old: PathBuf, new: PathBuf },
    Move { old: PathBuf, new: PathBuf },
    Modify { old: Vec<u8>, new: Vec<u8> },
}

/// A validator's answer to a preview.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    Ok,
    Veto(String),
}

/// Fired unconditionally after a mutation's I/O and state update
/// succeed. Purely informational.
#[derive(Debug, Clone, PartialEq)]
pub enum TreeEvent {
    Deleted { node: NodeId },
    Renamed { node: NodeId, old: PathBuf, new: PathBuf },
    Moved { node: NodeId, old: PathBuf, new: PathBuf },
    Modified { node: NodeId, old: Vec<u8>, new: Vec<u8> },
    Refreshed { node: NodeId },
    Saved { node: NodeId },
    DirtyChanged { node: NodeId },
    /// The backend changed underneath a file; re-read on demand.
    FileChanged { node: NodeId },
}

pub type Validator = Box<dyn Fn(&PreviewEvent) -> Verdict + Send + Sync>;
pub type Observer = Box<dyn Fn(&TreeEvent) + Send + Sync>;

/// Registered validators and observers for one tree.
///
/// Handlers must not mutate the tree from inside a callback; reentrancy
/// is not supported.
#[derive(Default)]
pub struct Hooks {
    validators: Vec<Validator>,
    observers: Vec<Observer>,
}

impl Hooks {
    pub fn add_validator(&mut self, v: Validator) {
        self.validators.push(v);
    }

    pub fn add_observer(&mut self, o: Observer) {
        self.observers.push(o);
    }

    /// Delivers a preview to every validator in registration order. The
    /// first veto short-circuits the rest and aborts the mutation; the
    /// veto reason is surfaced verbatim.
    pub fn validate(&self, event: &PreviewEvent) -> Result<()> {
        for validator in &self.validators {
            if let Verdict::Veto(reason) = validator(event) {
                return Err(Error::vetoed(reason));
            }
        }
        Ok(())
    }

    pub fn notify(&self, event: &TreeEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }
}

impl std::fmt::Debug for Hooks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Hooks{{validators: {}, observers: {}}}",
            self.validators.len(),
            self.observers.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn preview() -> PreviewEvent {
        PreviewEvent {
            node: NodeId::new(1),
            action: PreviewAction::Delete,
        }
    }

    #[test]
    fn no_validators_passes() {
        let hooks = Hooks::default();
        assert_eq!(hooks.validate(&preview()), Ok(()));
    }

    #[test]
    fn first_veto_short_circuits() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let mut hooks = Hooks::default();

        let c = calls.clone();
        hooks.add_validator(Box::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Verdict::Veto("first".to_string())
        }));
        let c = calls.clone();
        hooks.add_validator(Box::new(move |_| {
            c.fetch_add(1, Ordering::SeqCst);
            Verdict::Ok
        }));

        assert_eq!(
            hooks.validate(&preview()),
            Err(Error::Vetoed("first".to_string()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn observers_fire_in_order() {
        use std::sync::{Arc, Mutex};

        let seen = Arc::new(Mutex::new(Vec::new()));
        let mut hooks = Hooks::default();
        for tag in ["a", "b"] {
            let seen = seen.clone();
            hooks.add_observer(Box::new(move |_| {
                seen.lock().expect("lock").push(tag);
            }));
        }
        hooks.notify(&TreeEvent::Refreshed {
            node: NodeId::new(1),
        });
        assert_eq!(*seen.lock().expect("lock"), vec!["a", "b"]);
    }
}
