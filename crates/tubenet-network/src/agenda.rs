//! LIFO agenda of pending contractors.

use tubenet_core::ContractorId;

/// Stack of contractors awaiting invocation.
///
/// A contractor is on the stack at most once: pushing a queued contractor
/// is a no-op and keeps its current position.
#[derive(Debug, Default)]
pub(crate) struct Agenda {
    stack: Vec<ContractorId>,
    queued: Vec<bool>,
}

impl Agenda {
    /// Make room for one more contractor ID.
    pub(crate) fn register(&mut self) {
        self.queued.push(false);
    }

    /// Queue `id`; returns false if it was already queued.
    pub(crate) fn push(&mut self, id: ContractorId) -> bool {
        match self.queued.get_mut(id.index()) {
            Some(flag) if !*flag => {
                *flag = true;
                self.stack.push(id);
                true
            }
            _ => false,
        }
    }

    /// Take the most recently queued contractor.
    pub(crate) fn pop(&mut self) -> Option<ContractorId> {
        let id = self.stack.pop()?;
        self.queued[id.index()] = false;
        Some(id)
    }

    pub(crate) fn len(&self) -> usize {
        self.stack.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    pub(crate) fn contains(&self, id: ContractorId) -> bool {
        self.queued.get(id.index()).copied().unwrap_or(false)
    }
}
