//! Per-resource in-flight flags

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use osdb_domain::ResourceKind;

/// One flag per [`ResourceKind`]; set while a sync for that kind is running.
#[derive(Debug, Default)]
pub struct PendingFlags {
    flags: [AtomicBool; 4],
}

impl PendingFlags {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pending(&self, kind: ResourceKind) -> bool {
        self.flags[kind.index()].load(Ordering::Acquire)
    }

    /// Claim the flag for `kind`, or `None` if a sync is already in flight.
    pub fn try_acquire(self: &Arc<Self>, kind: ResourceKind) -> Option<PendingGuard> {
        self.flags[kind.index()]
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard { flags: Arc::clone(self), kind })
    }
}

/// Clears its flag on drop, whether the sync succeeded, failed or was
/// abandoned.
#[derive(Debug)]
pub struct PendingGuard {
    flags: Arc<PendingFlags>,
    kind: ResourceKind,
}

impl PendingGuard {
    pub const fn kind(&self) -> ResourceKind {
        self.kind
    }
}

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.flags.flags[self.kind.index()].store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_until_guard_drops() {
        let flags = Arc::new(PendingFlags::new());

        let guard = flags.try_acquire(ResourceKind::Bank).unwrap();
        assert!(flags.is_pending(ResourceKind::Bank));
        assert!(flags.try_acquire(ResourceKind::Bank).is_none());

        drop(guard);
        assert!(!flags.is_pending(ResourceKind::Bank));
        assert!(flags.try_acquire(ResourceKind::Bank).is_some());
    }

    #[test]
    fn kinds_are_independent() {
        let flags = Arc::new(PendingFlags::new());
        let _bank = flags.try_acquire(ResourceKind::Bank).unwrap();

        let inventory = flags.try_acquire(ResourceKind::Inventory);
        assert!(inventory.is_some());
        assert!(!flags.is_pending(ResourceKind::Offer));
    }
}
