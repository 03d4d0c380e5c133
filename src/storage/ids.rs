//! Identifier generation for catalog records.
//!
//! Each [`Catalog`](super::Catalog) owns its generator, so two catalogs (or two
//! tests) never share a counter.

use crate::domain::EventId;

/// Hands out fresh event identifiers.
pub trait IdGenerator: Send + std::fmt::Debug {
    /// Returns an identifier never returned before by this generator.
    fn next_id(&mut self) -> EventId;

    /// Records that `id` is taken so it is never handed out.
    fn reserve(&mut self, id: EventId);
}

/// Monotonic counter starting after the highest reserved identifier.
#[derive(Debug, Clone, Default)]
pub struct MonotonicIds {
    last: u64,
}

impl MonotonicIds {
    #[must_use]
    pub const fn starting_after(last: u64) -> Self {
        Self { last }
    }
}

impl IdGenerator for MonotonicIds {
    fn next_id(&mut self) -> EventId {
        self.last = self.last.saturating_add(1);
        EventId(self.last)
    }

    fn reserve(&mut self, id: EventId) {
        self.last = self.last.max(id.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_increase_past_reserved_values() {
        let mut ids = MonotonicIds::default();
        assert_eq!(ids.next_id(), EventId(1));

        ids.reserve(EventId(40));
        ids.reserve(EventId(12));
        assert_eq!(ids.next_id(), EventId(41));
        assert_eq!(ids.next_id(), EventId(42));
    }

    #[test]
    fn generators_are_independent() {
        let mut a = MonotonicIds::starting_after(1000);
        let mut b = MonotonicIds::starting_after(1000);
        a.next_id();
        a.next_id();
        assert_eq!(b.next_id(), EventId(1001));
    }
}
