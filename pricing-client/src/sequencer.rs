//! Monotonic request tokens for discarding stale answers

use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

/// Source of sequencer identities, unique per process
static NEXT_ISSUER: AtomicU64 = AtomicU64::new(1);

/// Token identifying one pricing request.
///
/// Tokens from the same sequencer grow with every request. A token only
/// means something to the sequencer that issued it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RequestToken {
    issuer: u64,
    seq: u64,
}

impl RequestToken {
    /// Position of this request in its sequencer's order
    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Issues increasing tokens and remembers the newest one
#[derive(Debug)]
pub struct RequestSequencer {
    issuer: u64,
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Create a sequencer that has issued nothing yet
    pub fn new() -> Self {
        Self {
            issuer: NEXT_ISSUER.fetch_add(1, Ordering::Relaxed),
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a token newer than every token issued before
    pub fn issue(&self) -> RequestToken {
        RequestToken {
            issuer: self.issuer,
            seq: self.latest.fetch_add(1, Ordering::SeqCst) + 1,
        }
    }

    /// Newest token issued, if any
    pub fn latest(&self) -> Option<RequestToken> {
        match self.latest.load(Ordering::SeqCst) {
            0 => None,
            seq => Some(RequestToken {
                issuer: self.issuer,
                seq,
            }),
        }
    }

    /// Whether this sequencer issued `token`
    pub fn issued(&self, token: RequestToken) -> bool {
        token.issuer == self.issuer
    }

    /// Whether `token` is the newest token this sequencer issued
    pub fn is_current(&self, token: RequestToken) -> bool {
        self.issued(token) && self.latest.load(Ordering::SeqCst) == token.seq
    }
}

impl Default for RequestSequencer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn tokens_increase_and_only_the_newest_is_current() {
        let sequencer = RequestSequencer::new();
        assert_eq!(sequencer.latest(), None);

        let first = sequencer.issue();
        let second = sequencer.issue();
        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
        assert_eq!(sequencer.latest(), Some(second));
    }

    #[test]
    fn tokens_of_another_sequencer_are_never_current() {
        let mine = RequestSequencer::new();
        let other = RequestSequencer::new();

        let token = other.issue();
        mine.issue();

        assert_eq!(token.seq(), 1);
        assert!(!mine.issued(token));
        assert!(!mine.is_current(token));
        assert!(other.is_current(token));
    }

    #[test]
    fn tokens_are_unique_across_threads() {
        let sequencer = Arc::new(RequestSequencer::new());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let sequencer = sequencer.clone();
                std::thread::spawn(move || (0..100).map(|_| sequencer.issue().seq()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 400);
        assert_eq!(sequencer.latest().map(|token| token.seq()), Some(400));
    }
}
