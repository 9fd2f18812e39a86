use crate::Generator;
use margin_core::ShareCode;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A generator that replays a fixed list of codes.
///
/// Codes are returned in order; once the list is exhausted the last code
/// is repeated forever. Useful for reproducing collisions deterministically.
#[derive(Debug)]
pub struct ScriptedGenerator {
    codes: Vec<ShareCode>,
    cursor: AtomicUsize,
}

impl ScriptedGenerator {
    /// Creates a generator that replays `codes`.
    ///
    /// # Panics
    ///
    /// Panics if `codes` is empty.
    pub fn new(codes: impl IntoIterator<Item = ShareCode>) -> Self {
        let codes: Vec<ShareCode> = codes.into_iter().collect();
        assert!(!codes.is_empty(), "scripted generator needs at least one code");
        Self {
            codes,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Number of codes handed out so far.
    pub fn calls(&self) -> usize {
        self.cursor.load(Ordering::SeqCst)
    }
}

impl Generator for ScriptedGenerator {
    type Output = ShareCode;

    fn generate(&self) -> ShareCode {
        let index = self.cursor.fetch_add(1, Ordering::SeqCst);
        self.codes[index.min(self.codes.len() - 1)].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn code(s: &str) -> ShareCode {
        ShareCode::new_unchecked(s)
    }

    #[test]
    fn replays_in_order_then_repeats_last() {
        let generator = ScriptedGenerator::new([code("AAAAAA"), code("BBBBBB")]);

        assert_eq!(generator.generate().as_str(), "AAAAAA");
        assert_eq!(generator.generate().as_str(), "BBBBBB");
        assert_eq!(generator.generate().as_str(), "BBBBBB");
        assert_eq!(generator.calls(), 3);
    }

    #[test]
    #[should_panic(expected = "at least one code")]
    fn empty_script_panics() {
        let _ = ScriptedGenerator::new(Vec::new());
    }
}
