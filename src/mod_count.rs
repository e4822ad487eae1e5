//! Structural-modification counter.
//!
//! Each map embeds one `ModCount`. Every structural change bumps it; cursors
//! snapshot it at creation and recheck before each step. Detection is best
//! effort and exists to surface misuse, not to make concurrent mutation safe.

use crate::cursor::CursorError;

/// Per-instance generation tracker.
#[derive(Clone, Debug, Default)]
pub(crate) struct ModCount {
    generation: u64,
}

impl ModCount {
    pub(crate) const fn new() -> Self {
        Self { generation: 0 }
    }

    #[inline]
    pub(crate) fn get(&self) -> u64 {
        self.generation
    }

    #[inline]
    pub(crate) fn bump(&mut self) {
        self.generation = self.generation.wrapping_add(1);
    }

    /// Fails when the generation moved away from `expected`.
    #[inline]
    pub(crate) fn check(&self, expected: u64) -> Result<(), CursorError> {
        if self.generation == expected {
            Ok(())
        } else {
            Err(CursorError::ConcurrentModification)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ModCount;
    use crate::cursor::CursorError;

    #[test]
    fn snapshot_matches_until_bumped() {
        let mut m = ModCount::new();
        let snap = m.get();
        assert!(m.check(snap).is_ok());
        m.bump();
        assert_eq!(m.check(snap), Err(CursorError::ConcurrentModification));
        assert!(m.check(m.get()).is_ok());
    }

    #[test]
    fn bump_wraps_instead_of_overflowing() {
        let mut m = ModCount {
            generation: u64::MAX,
        };
        m.bump();
        assert_eq!(m.get(), 0);
    }
}
