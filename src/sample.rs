// ---------------------------------------------------------------------------
// Source sample types and their table-index normalization.
// ---------------------------------------------------------------------------

/// A source sample that can index a lookup table.
///
/// Unsigned samples index the table directly. Signed samples are biased by
/// `2^(BITS-1)`, so the most negative value lands on index 0 and zero lands
/// at the table midpoint.
pub trait Sample: bytemuck::Pod + Send + Sync {
    /// Bit width of the sample.
    const BITS: u32;
    /// Whether the sample is two's-complement signed.
    const SIGNED: bool;
    /// Offset added to a signed sample to make it a table index.
    const BIAS: u32 = if Self::SIGNED { 1 << (Self::BITS - 1) } else { 0 };
    /// Table length covering every value of the type, or `None` when the
    /// range is too large to tabulate densely (32-bit samples).
    const FULL_RANGE: Option<usize> = if Self::BITS <= 16 {
        Some(1 << Self::BITS)
    } else {
        None
    };

    /// Biased, non-negative table index of this sample.
    fn table_index(self) -> u32;

    /// The buffer as raw bytes, when the sample type is `u8`.
    #[inline(always)]
    fn as_u8s(_buf: &[Self]) -> Option<&[u8]> {
        None
    }
}

impl Sample for u8 {
    const BITS: u32 = 8;
    const SIGNED: bool = false;

    #[inline(always)]
    fn table_index(self) -> u32 {
        self as u32
    }

    #[inline(always)]
    fn as_u8s(buf: &[u8]) -> Option<&[u8]> {
        Some(buf)
    }
}

macro_rules! unsigned_sample {
    ($t:ty) => {
        impl Sample for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = false;

            #[inline(always)]
            fn table_index(self) -> u32 {
                self as u32
            }
        }
    };
}

// Flipping the sign bit of the unsigned reinterpretation is `v + 2^(BITS-1)`.
macro_rules! signed_sample {
    ($t:ty, $u:ty) => {
        impl Sample for $t {
            const BITS: u32 = <$t>::BITS;
            const SIGNED: bool = true;

            #[inline(always)]
            fn table_index(self) -> u32 {
                ((self as $u) ^ (1 << (<$t>::BITS - 1))) as u32
            }
        }
    };
}

unsigned_sample!(u16);
unsigned_sample!(u32);
signed_sample!(i8, u8);
signed_sample!(i16, u16);
signed_sample!(i32, u32);
