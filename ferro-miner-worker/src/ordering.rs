// Copyright (c) 2025 FERRO LABS <dev@ferro.network>

use std::cmp::Ordering;
use std::collections::{BTreeMap, BinaryHeap, VecDeque};

use ferro_models::{Address, Transaction};

/// Head of one sender's queue. Ordered by offered price, then by address so
/// the merge stays deterministic when prices tie.
#[derive(PartialEq, Eq)]
struct QueueHead {
    price: u64,
    origin: Address,
}

impl Ord for QueueHead {
    fn cmp(&self, other: &Self) -> Ordering {
        self.price
            .cmp(&other.price)
            .then_with(|| other.origin.cmp(&self.origin))
    }
}

impl PartialOrd for QueueHead {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Lazy price-then-nonce merge over per-sender transaction queues: each
/// sender's transactions keep their ascending nonce order, and the next
/// candidate is always the front transaction of whichever sender currently
/// offers the highest price. Being lazy, the merge can be abandoned early
/// without paying for a full sort.
pub(crate) struct TransactionsByPriceAndNonce {
    /// per-sender queues, front = lowest pending nonce
    queues: BTreeMap<Address, VecDeque<Transaction>>,
    /// current best candidate per sender
    heads: BinaryHeap<QueueHead>,
}

impl TransactionsByPriceAndNonce {
    /// Build the merge from nonce-sorted per-sender transaction lists.
    pub(crate) fn new(pending: BTreeMap<Address, Vec<Transaction>>) -> Self {
        let mut queues = BTreeMap::new();
        let mut heads = BinaryHeap::new();
        for (origin, txs) in pending {
            let queue: VecDeque<Transaction> = txs.into();
            if let Some(first) = queue.front() {
                heads.push(QueueHead {
                    price: first.price,
                    origin,
                });
                queues.insert(origin, queue);
            }
        }
        TransactionsByPriceAndNonce { queues, heads }
    }

    /// Best next candidate, without consuming it.
    pub(crate) fn peek(&self) -> Option<&Transaction> {
        self.heads
            .peek()
            .and_then(|head| self.queues.get(&head.origin))
            .and_then(|queue| queue.front())
    }

    /// Consume the current best candidate and advance within the same
    /// sender, preserving its nonce order.
    pub(crate) fn shift(&mut self) {
        if let Some(head) = self.heads.pop() {
            if let Some(queue) = self.queues.get_mut(&head.origin) {
                queue.pop_front();
                match queue.front() {
                    Some(next) => self.heads.push(QueueHead {
                        price: next.price,
                        origin: head.origin,
                    }),
                    None => {
                        self.queues.remove(&head.origin);
                    }
                }
            }
        }
    }

    /// Drop the current best sender along with all of its remaining
    /// transactions.
    pub(crate) fn pop(&mut self) {
        if let Some(head) = self.heads.pop() {
            self.queues.remove(&head.origin);
        }
    }
}
