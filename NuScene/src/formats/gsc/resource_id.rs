//! Implicit object numbering and buffer back-references.
//!
//! The container never stores buffer ids. Instead every object the game
//! engine would have created while loading gets the next number from a
//! running counter, and later mesh parts refer back to shared buffers by that
//! number. Reproducing the counter exactly is what makes back-references
//! resolvable.

use std::fmt;

use serde::Serialize;

/// Counter value at the start of every load.
pub const RESOURCE_ID_BASE: u32 = 7;

/// Top byte marking a reuse back-reference.
const REUSE_TAG: u32 = 0xC0;
const ID_MASK: u32 = 0x00FF_FFFF;

/// Sequential id of a buffer within one parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:X}", self.0)
    }
}

/// Running object counter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceIdAllocator {
    next: u32,
}

impl Default for ResourceIdAllocator {
    fn default() -> Self {
        Self::new()
    }
}

impl ResourceIdAllocator {
    #[must_use]
    pub fn new() -> Self {
        Self {
            next: RESOURCE_ID_BASE,
        }
    }

    /// The id the next allocation will receive.
    #[must_use]
    pub fn peek(&self) -> ResourceId {
        ResourceId(self.next)
    }

    /// Take the next id.
    pub fn allocate(&mut self) -> ResourceId {
        let id = ResourceId(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }

    /// Account for `n` objects that never become addressable buffers.
    pub fn advance(&mut self, n: u32) {
        self.next = self.next.wrapping_add(n);
    }
}

/// Decoded buffer slot discriminator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BufferRef {
    /// No buffer in this slot.
    Empty,
    /// Reuse the buffer introduced earlier under this id.
    Reuse(ResourceId),
    /// A new buffer follows; carries the raw discriminator.
    Fresh(u32),
}

impl BufferRef {
    #[must_use]
    pub fn decode(raw: u32) -> Self {
        if raw >> 24 == REUSE_TAG {
            Self::Reuse(ResourceId(raw & ID_MASK))
        } else if raw == 0 {
            Self::Empty
        } else {
            Self::Fresh(raw)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_decode_variants() {
        assert_eq!(BufferRef::decode(0), BufferRef::Empty);
        assert_eq!(
            BufferRef::decode(0xC000_0012),
            BufferRef::Reuse(ResourceId(0x12))
        );
        assert_eq!(BufferRef::decode(0x8000_0001), BufferRef::Fresh(0x8000_0001));
        assert_eq!(BufferRef::decode(1), BufferRef::Fresh(1));
    }

    #[test]
    fn test_allocator_sequence() {
        let mut ids = ResourceIdAllocator::new();
        assert_eq!(ids.allocate(), ResourceId(7));
        ids.advance(3);
        assert_eq!(ids.peek(), ResourceId(11));
        assert_eq!(ids.allocate(), ResourceId(11));
        assert_eq!(ids.allocate(), ResourceId(12));
    }

    proptest! {
        #[test]
        fn allocated_ids_strictly_increase(steps in proptest::collection::vec(0u32..5, 1..64)) {
            let mut ids = ResourceIdAllocator::new();
            let mut last = None;
            for gap in steps {
                ids.advance(gap);
                let id = ids.allocate();
                if let Some(prev) = last {
                    prop_assert!(id > prev);
                }
                last = Some(id);
            }
        }

        #[test]
        fn reuse_tag_round_trips_low_bits(id in 0u32..=0x00FF_FFFF) {
            prop_assert_eq!(BufferRef::decode(0xC000_0000 | id), BufferRef::Reuse(ResourceId(id)));
        }
    }
}
