//! # pixlut
//!
//! *Remap your pixels through a table.*
//!
//! Per-channel lookup-table transforms for interleaved pixel rows and whole
//! strided images. Every output sample is `table[channel][sample]`, for 1–4
//! channels, 8/16/32-bit signed or unsigned sources and any `Pod` output type.
//! Single-table byte lookups run on x86-64 AVX2, ARM NEON and WASM SIMD128
//! with automatic fallback to scalar code.
//!
//! ## Core operations (always available)
//!
//! - [`lookup`] / [`lookup_strided`]: each channel indexes its own table.
//! - [`lookup_si`] / [`lookup_si_strided`]: one index per pixel selects from
//!   every channel table (palette expansion).
//! - [`lookup_inplace`] / [`lookup_inplace_strided`]: same-type remap in place.
//!
//! Signed samples are biased by `2^(bits-1)` before indexing, so a table for
//! `i16` input keeps the entry for `-32768` at index 0 and `0` at index 32768.
//!
//! ```rust
//! use pixlut::{LookupTable, lookup};
//!
//! let invert: Vec<u8> = (0..=255u8).map(|v| 255 - v).collect();
//! let table = LookupTable::single(&invert);
//! let src = [10u8, 20, 30, 40, 50];
//! let mut dst = [0u8; 5];
//! lookup(&src, &mut dst, &table).unwrap();
//! assert_eq!(dst, [245, 235, 225, 215, 205]);
//! ```
//!
//! ## Feature flags
//!
//! - **`rgb`**: Palette expansion and per-channel curves on [`rgb`] crate
//!   pixel types (`Rgb<u8>`, `Rgba<u8>`, …) via bytemuck.
//! - **`imgref`**: Whole-image lookups using [`imgref`] types. Implies `rgb`.
//! - **`rayon`**: Row-parallel strided lookups sharing one fused table.

#![no_std]
#![forbid(unsafe_code)]

#[cfg(feature = "std")]
extern crate std;

extern crate alloc;

mod fused;
mod lut;
mod rotate;
mod sample;
mod table;

pub use lut::*;
pub use sample::Sample;
pub use table::{DEFAULT_FUSE_THRESHOLD, LookupTable, MAX_CHANNELS, Path, Tuning};

#[cfg(feature = "rgb")]
pub mod typed_rgb;

#[cfg(feature = "imgref")]
pub mod imgref;

#[cfg(feature = "rayon")]
pub mod par;

/// Why a lookup was rejected. Nothing is written when one is returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LutError {
    /// The table count is outside `1..=4`.
    ChannelCount(usize),
    /// Buffer length is not a whole number of pixels.
    NotPixelAligned,
    /// Destination holds fewer pixels than the source.
    PixelCountMismatch,
    /// Stride is smaller than a row, or the buffer is shorter than the image.
    InvalidStride,
    /// A source sample maps outside the window of `channel`'s table.
    IndexOutOfTable {
        /// Channel whose table is too short.
        channel: usize,
        /// Biased table index of the offending sample.
        index: u32,
    },
}

impl core::fmt::Display for LutError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::ChannelCount(n) => write!(f, "expected 1 to 4 channel tables, got {n}"),
            Self::NotPixelAligned => f.write_str("buffer length is not a whole number of pixels"),
            Self::PixelCountMismatch => f.write_str("destination is smaller than source"),
            Self::InvalidStride => f.write_str("stride or buffer length does not fit the image"),
            Self::IndexOutOfTable { channel, index } => {
                write!(f, "index {index} is outside the table for channel {channel}")
            }
        }
    }
}

impl core::error::Error for LutError {}
