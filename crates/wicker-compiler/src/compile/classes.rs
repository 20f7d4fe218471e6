//! Synthetic class-tag allocation.

/// First synthetic class tag. User-addressable class indices stay strictly
/// below this, so compiler-minted tags never collide with authored ones.
pub const CLASS_BASE: u16 = 129;

/// Monotonic allocator for synthetic class tags.
///
/// Owned by exactly one linearization pass; never shared across concurrent
/// translations.
#[derive(Debug)]
pub struct ClassAllocator {
    next: u16,
}

impl ClassAllocator {
    pub fn new() -> Self {
        Self { next: CLASS_BASE }
    }

    pub fn alloc(&mut self) -> u16 {
        let tag = self.next;
        self.next += 1;
        tag
    }

    /// Number of tags handed out so far.
    pub fn allocated(&self) -> u16 {
        self.next - CLASS_BASE
    }
}

impl Default for ClassAllocator {
    fn default() -> Self {
        Self::new()
    }
}
