//! Contraction labels and the allocator shared by the plan builders.
//!
//! Within a plan over `n` subsystems, labels `0..n` are *identity* labels
//! (label `p` names subsystem position `p`) and labels `>= n` are *fresh*.
//! Fresh labels are only ever issued by [`LabelAllocator::fresh`], which hands
//! them out strictly increasing, so two fresh labels never collide and never
//! alias a subsystem position.

/// Integer tag attached to one axis of one contraction operand.
pub type Label = usize;

/// Issues identity and fresh labels for a plan over `n` subsystems.
#[derive(Debug, Clone)]
pub struct LabelAllocator {
    n: usize,
    next: Label,
}

impl LabelAllocator {
    /// Allocator for a composite system of `n` subsystems.
    pub fn new(n: usize) -> Self {
        Self { n, next: n }
    }

    /// The identity label of subsystem `position`.
    #[inline]
    pub fn identity(&self, position: usize) -> Label {
        debug_assert!(position < self.n, "position {position} >= {}", self.n);
        position
    }

    /// A label never issued before by this allocator and `>= n`.
    #[inline]
    pub fn fresh(&mut self) -> Label {
        let label = self.next;
        self.next += 1;
        label
    }

    /// Whether `label` lies in the fresh range.
    #[inline]
    pub fn is_fresh(&self, label: Label) -> bool {
        label >= self.n
    }

    /// Number of subsystems.
    #[inline]
    pub fn subsystems(&self) -> usize {
        self.n
    }

    /// Number of fresh labels issued so far.
    #[inline]
    pub fn issued(&self) -> usize {
        self.next - self.n
    }
}
