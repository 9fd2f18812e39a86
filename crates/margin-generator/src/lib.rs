//! Share code generators.
//!
//! Generators only produce candidate codes. They never look at storage;
//! the share service is responsible for rejecting codes that are already
//! taken.

pub mod random;
pub mod seq;

pub use random::{OsRandom, RandomSource};
pub use seq::ScriptedGenerator;

use margin_core::code::{ALPHABET, CODE_LENGTH};
use margin_core::ShareCode;

/// Trait for generating share codes.
///
/// Implementations are pure generators that don't interact with storage.
pub trait Generator: Send + Sync + 'static {
    type Output: Into<ShareCode>;
    /// Generates a candidate share code.
    ///
    /// Uniqueness is not guaranteed; callers must check for collisions.
    fn generate(&self) -> Self::Output;
}

/// Draws each symbol independently from [`ALPHABET`] using a [`RandomSource`].
///
/// Each random byte is mapped with `byte % 31`. Because 256 is not a
/// multiple of 31, the first 8 symbols are picked with probability 9/256
/// instead of 8/256. Codes are short-lived and not secrets, so this bias
/// is accepted rather than rejection-sampled away.
#[derive(Debug, Clone, Default)]
pub struct RandomGenerator<R = OsRandom> {
    source: R,
}

impl RandomGenerator<OsRandom> {
    /// Creates a generator backed by the operating system's CSPRNG.
    pub fn new() -> Self {
        Self { source: OsRandom }
    }
}

impl<R: RandomSource> RandomGenerator<R> {
    /// Creates a generator backed by a custom random source.
    pub fn with_source(source: R) -> Self {
        Self { source }
    }
}

impl<R: RandomSource> Generator for RandomGenerator<R> {
    type Output = ShareCode;

    fn generate(&self) -> Self::Output {
        let mut bytes = [0u8; CODE_LENGTH];
        self.source.fill_bytes(&mut bytes);

        let code: String = bytes
            .iter()
            .map(|b| ALPHABET[*b as usize % ALPHABET.len()] as char)
            .collect();
        ShareCode::new_unchecked(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use margin_core::code::is_valid;

    struct FixedSource(Vec<u8>);

    impl RandomSource for FixedSource {
        fn fill_bytes(&self, dest: &mut [u8]) {
            for (slot, byte) in dest.iter_mut().zip(self.0.iter().cycle()) {
                *slot = *byte;
            }
        }
    }

    #[test]
    fn maps_bytes_modulo_alphabet() {
        let generator = RandomGenerator::with_source(FixedSource(vec![0, 1, 30, 31, 62, 255]));
        // 255 % 31 == 7
        assert_eq!(generator.generate().as_str(), "23Z229");
    }

    #[test]
    fn deterministic_with_fixed_source() {
        let generator = RandomGenerator::with_source(FixedSource(vec![8]));
        assert_eq!(generator.generate().as_str(), "AAAAAA");
        assert_eq!(generator.generate().as_str(), "AAAAAA");
    }

    #[test]
    fn generated_codes_stay_in_alphabet() {
        let generator = RandomGenerator::new();
        for _ in 0..10_000 {
            let code = generator.generate();
            assert_eq!(code.as_str().len(), CODE_LENGTH);
            assert!(
                code.as_str().bytes().all(|b| ALPHABET.contains(&b)),
                "unexpected symbol in {code}"
            );
            assert!(is_valid(code.as_str()));
        }
    }

    #[test]
    fn generator_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RandomGenerator>();
    }
}
