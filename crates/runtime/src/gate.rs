//! Single-flight exclusion gate for container transactions.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared busy latch. At most one [`GatePermit`] exists at a time.
#[derive(Clone, Debug, Default)]
pub struct ExclusionGate {
    busy: Arc<AtomicBool>,
}

impl ExclusionGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the gate, or returns `None` when another holder has it.
    pub fn try_acquire(&self) -> Option<GatePermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| GatePermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_held(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

/// Proof of holding the gate. Released on drop.
#[derive(Debug)]
#[must_use = "the gate is released as soon as the permit is dropped"]
pub struct GatePermit {
    busy: Arc<AtomicBool>,
}

impl Drop for GatePermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_one_permit_at_a_time() {
        let gate = ExclusionGate::new();

        let first = gate.try_acquire();
        assert!(first.is_some());
        assert!(gate.try_acquire().is_none());
        assert!(gate.is_held());

        drop(first);
        assert!(!gate.is_held());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn released_when_holder_panics() {
        let gate = ExclusionGate::new();
        let shared = gate.clone();

        let result = std::thread::spawn(move || {
            let _permit = shared.try_acquire();
            panic!("operation blew up");
        })
        .join();

        assert!(result.is_err());
        assert!(!gate.is_held());
    }

    #[tokio::test]
    async fn concurrent_attempts_admit_exactly_one() {
        let gate = ExclusionGate::new();
        let barrier = Arc::new(tokio::sync::Barrier::new(8));

        let attempts: Vec<_> = (0..8)
            .map(|_| {
                let gate = gate.clone();
                let barrier = Arc::clone(&barrier);
                tokio::spawn(async move {
                    barrier.wait().await;
                    gate.try_acquire()
                })
            })
            .collect();

        let mut permits = Vec::new();
        for attempt in attempts {
            permits.push(attempt.await.unwrap());
        }
        assert_eq!(permits.iter().filter(|p| p.is_some()).count(), 1);
    }
}
