// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

const INTERRUPT_NONE: u8 = 0;
const INTERRUPT_NEW_HEAD: u8 = 1;
const INTERRUPT_RESUBMIT: u8 = 2;

/// Why an in-flight transaction commit run should stop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InterruptReason {
    /// keep going
    None,
    /// the chain head changed, the partial work is stale
    NewHead,
    /// periodic refresh, the partial work stays valid
    Resubmit,
}

/// Cancellation token shared between the work scheduler and one assembly
/// cycle. Allocated fresh per cycle, never reused across cycles.
#[derive(Clone)]
pub(crate) struct CommitInterrupt(Arc<AtomicU8>);

impl CommitInterrupt {
    pub(crate) fn new() -> Self {
        CommitInterrupt(Arc::new(AtomicU8::new(INTERRUPT_NONE)))
    }

    pub(crate) fn set(&self, reason: InterruptReason) {
        let raw = match reason {
            InterruptReason::None => INTERRUPT_NONE,
            InterruptReason::NewHead => INTERRUPT_NEW_HEAD,
            InterruptReason::Resubmit => INTERRUPT_RESUBMIT,
        };
        self.0.store(raw, Ordering::SeqCst);
    }

    pub(crate) fn get(&self) -> InterruptReason {
        match self.0.load(Ordering::SeqCst) {
            INTERRUPT_NEW_HEAD => InterruptReason::NewHead,
            INTERRUPT_RESUBMIT => InterruptReason::Resubmit,
            _ => InterruptReason::None,
        }
    }
}
