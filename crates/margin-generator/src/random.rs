use rand::rngs::OsRng;
use rand::RngCore;

/// A provider of random bytes.
///
/// Injected into [`RandomGenerator`](crate::RandomGenerator) so tests can
/// replace the operating system's CSPRNG with a deterministic stub.
pub trait RandomSource: Send + Sync + 'static {
    /// Fills `dest` with random bytes.
    fn fill_bytes(&self, dest: &mut [u8]);
}

/// The operating system's cryptographically secure random number generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsRandom;

impl RandomSource for OsRandom {
    fn fill_bytes(&self, dest: &mut [u8]) {
        OsRng.fill_bytes(dest);
    }
}
