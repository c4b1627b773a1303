//! Shared, runtime-adjustable severity threshold.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

use fanlog_common::Level;

/// Minimum severity shared by a root logger and all of its descendants.
///
/// Clones point at the same cell, so a change through any clone is seen by
/// all of them on their next check.
#[derive(Debug, Clone)]
pub struct Threshold {
    level: Arc<AtomicU8>,
}

impl Threshold {
    /// Create a new threshold cell.
    pub fn new(level: Level) -> Self {
        Threshold {
            level: Arc::new(AtomicU8::new(level.as_u8())),
        }
    }

    /// Current minimum level.
    pub fn get(&self) -> Level {
        Level::from_u8(self.level.load(Ordering::Acquire))
    }

    /// Replace the minimum level.
    pub fn set(&self, level: Level) {
        self.level.store(level.as_u8(), Ordering::Release);
    }

    /// Whether `level` meets the threshold.
    pub fn is_enabled(&self, level: Level) -> bool {
        level >= self.get()
    }

    /// Whether two handles share the same cell.
    pub fn shares_with(&self, other: &Threshold) -> bool {
        Arc::ptr_eq(&self.level, &other.level)
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::new(Level::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_enabled() {
        let threshold = Threshold::new(Level::Warn);
        assert!(!threshold.is_enabled(Level::Debug));
        assert!(!threshold.is_enabled(Level::Info));
        assert!(threshold.is_enabled(Level::Warn));
        assert!(threshold.is_enabled(Level::Error));
        assert!(threshold.is_enabled(Level::Fatal));
    }

    #[test]
    fn test_clones_share_cell() {
        let root = Threshold::new(Level::Info);
        let derived = root.clone();
        root.set(Level::Error);
        assert_eq!(derived.get(), Level::Error);
        assert!(root.shares_with(&derived));
        assert!(!root.shares_with(&Threshold::new(Level::Error)));
    }

    #[test]
    fn test_set_is_idempotent() {
        let threshold = Threshold::new(Level::Debug);
        threshold.set(Level::Warn);
        let once = threshold.get();
        threshold.set(Level::Warn);
        assert_eq!(threshold.get(), once);
    }

    #[test]
    fn test_default_is_info() {
        assert_eq!(Threshold::default().get(), Level::Info);
    }

    #[test]
    fn test_concurrent_set_never_tears() {
        use std::thread;

        let threshold = Threshold::new(Level::Debug);
        let writers: Vec<_> = Level::ALL
            .into_iter()
            .map(|level| {
                let t = threshold.clone();
                thread::spawn(move || {
                    for _ in 0..1000 {
                        t.set(level);
                    }
                })
            })
            .collect();

        for _ in 0..1000 {
            assert!(Level::ALL.contains(&threshold.get()));
        }
        for w in writers {
            w.join().unwrap();
        }
    }
}
