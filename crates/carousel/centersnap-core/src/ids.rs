//! Identifiers and simple allocators for core entities.

use serde::{Deserialize, Serialize};

/// Opaque handle of one item inside the layout host.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct ItemId(pub u64);

/// Ownership token for one in-flight tween or delayed call.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct TweenHandle(pub u32);

/// Monotonic allocator for TweenHandle.
#[derive(Default, Debug)]
pub struct HandleAllocator {
    next: u32,
}

impl HandleAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn alloc(&mut self) -> TweenHandle {
        let id = TweenHandle(self.next);
        self.next = self.next.wrapping_add(1);
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alloc_monotonic() {
        let mut alloc = HandleAllocator::new();
        assert_eq!(alloc.alloc(), TweenHandle(0));
        assert_eq!(alloc.alloc(), TweenHandle(1));
        assert_eq!(alloc.alloc(), TweenHandle(2));
    }
}
