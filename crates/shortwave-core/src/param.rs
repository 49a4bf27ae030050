use std::sync::atomic::{AtomicU32, Ordering};

/// Single-writer/single-reader f32 cell stored as raw bits. Writes from the
/// UI tick become visible to the audio callback no later than its next
/// invocation; neither side ever blocks.
#[derive(Debug, Default)]
pub struct AtomicF32 {
    bits: AtomicU32,
}

impl AtomicF32 {
    pub fn new(value: f32) -> Self {
        Self {
            bits: AtomicU32::new(value.to_bits()),
        }
    }

    #[inline]
    pub fn load(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }

    #[inline]
    pub fn store(&self, value: f32) {
        self.bits.store(value.to_bits(), Ordering::Release);
    }
}
