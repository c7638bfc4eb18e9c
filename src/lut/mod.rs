// ---------------------------------------------------------------------------
// Lookup-table pixel transforms with SIMD dispatch.
//
// Architecture: scan.rs holds the portable head/body/tail row loops, generic
// over sample type, entry type and channel count. The single-table byte
// kernel has #[rite] row functions per tier; #[arcane] wrappers dispatch via
// incant!, contiguous (single call) and strided (loop over rows, single
// dispatch).
// ---------------------------------------------------------------------------

use archmage::incant;
use bytemuck::Pod;

use crate::fused::{FusedTable, Strategy};
use crate::{LookupTable, LutError, Sample};

mod scalar;
use scalar::*;

pub(crate) mod scan;

#[cfg(target_arch = "x86_64")]
mod avx2;
#[cfg(target_arch = "x86_64")]
use avx2::*;

#[cfg(target_arch = "aarch64")]
mod neon;
#[cfg(target_arch = "aarch64")]
use neon::*;

#[cfg(target_arch = "wasm32")]
mod wasm;
#[cfg(target_arch = "wasm32")]
use wasm::*;


/// Samples per in-place block. A multiple of every channel count.
const INPLACE_BLOCK: usize = 192;

// ===========================================================================
// Validation helpers
// ===========================================================================

/// Pixel count of a contiguous source, checked against the destination.
#[inline]
fn check_copy(
    src_len: usize,
    src_spp: usize,
    dst_len: usize,
    dst_spp: usize,
) -> Result<usize, LutError> {
    if !src_len.is_multiple_of(src_spp) {
        return Err(LutError::NotPixelAligned);
    }
    let pixels = src_len / src_spp;
    if dst_len < pixels * dst_spp {
        return Err(LutError::PixelCountMismatch);
    }
    Ok(pixels)
}

#[inline]
pub(crate) fn check_strided(
    len: usize,
    width: usize,
    height: usize,
    stride: usize,
    spp: usize,
) -> Result<(), LutError> {
    let row = width.checked_mul(spp).ok_or(LutError::InvalidStride)?;
    if row > stride {
        return Err(LutError::InvalidStride);
    }
    let total = (height - 1)
        .checked_mul(stride)
        .ok_or(LutError::InvalidStride)?
        .checked_add(row)
        .ok_or(LutError::InvalidStride)?;
    if len < total {
        return Err(LutError::InvalidStride);
    }
    Ok(())
}

// ===========================================================================
// Call plan
// ===========================================================================

/// Whether each destination channel reads its own source sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Mode {
    /// Source and destination both carry one sample per channel.
    Plain,
    /// One source sample per pixel indexes every channel table.
    SharedIndex,
}

impl Mode {
    #[inline(always)]
    pub(crate) fn source_samples(self, channels: usize) -> usize {
        match self {
            Self::Plain => channels,
            Self::SharedIndex => 1,
        }
    }
}

/// Image shape. Strides are in samples of the respective buffer.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Geometry {
    pub(crate) width: usize,
    pub(crate) height: usize,
    pub(crate) src_stride: usize,
    pub(crate) dst_stride: usize,
}

impl Geometry {
    /// A single contiguous row.
    fn row(pixels: usize, src_spp: usize, dst_spp: usize) -> Self {
        Self {
            width: pixels,
            height: 1,
            src_stride: pixels * src_spp,
            dst_stride: pixels * dst_spp,
        }
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// Validate buffers against the table and pick a strategy.
///
/// Returns `None` for an empty image.
pub(crate) fn plan<S: Sample, T: Pod>(
    src: &[S],
    dst_len: usize,
    g: Geometry,
    table: &LookupTable<'_, T>,
    mode: Mode,
) -> Result<Option<(Strategy, usize)>, LutError> {
    if g.is_empty() {
        return Ok(None);
    }
    let channels = table.channels();
    let spp = mode.source_samples(channels);
    check_strided(src.len(), g.width, g.height, g.src_stride, spp)?;
    check_strided(dst_len, g.width, g.height, g.dst_stride, channels)?;
    let row = g.width * spp;
    let rows = src.chunks(g.src_stride).take(g.height).map(|r| &r[..row]);
    let span = table.coverage(rows, spp)?;
    Ok(Some((Strategy::choose(table, g.width * g.height, span), span)))
}

/// Expand `$body` once per channel count with `$n` bound as a const.
macro_rules! with_channels {
    ($channels:expr, $n:ident => $body:expr) => {
        match $channels {
            1 => {
                const $n: usize = 1;
                $body
            }
            2 => {
                const $n: usize = 2;
                $body
            }
            3 => {
                const $n: usize = 3;
                $body
            }
            4 => {
                const $n: usize = 4;
                $body
            }
            _ => unreachable!("LookupTable holds 1 to 4 channels"),
        }
    };
}
pub(crate) use with_channels;

/// A prepared row transform for `N` channels.
pub(crate) enum Kernel<'t, T, const N: usize> {
    Small { tables: [&'t [T]; N], first: u32 },
    Direct { tables: [&'t [T]; N], first: u32 },
    /// Dense u8→byte table; rows that can't be viewed as bytes use `tables`.
    Bytes {
        lut: &'t [u8; 256],
        tables: [&'t [T]; N],
        first: u32,
    },
    Fused(FusedTable<T, N>),
}

impl<'t, T: Pod, const N: usize> Kernel<'t, T, N> {
    pub(crate) fn prepare<S: Sample>(
        table: &LookupTable<'t, T>,
        strategy: Strategy,
        span: usize,
        mode: Mode,
    ) -> Self {
        let tables = table.array::<N>();
        let first = table.first_index();
        match strategy {
            Strategy::Small => Self::Small { tables, first },
            Strategy::Fused => Self::Fused(FusedTable::build(&tables, first, span)),
            Strategy::Direct => {
                let bytes = S::BITS == 8
                    && !S::SIGNED
                    && size_of::<T>() == 1
                    && N == 1
                    && first == 0;
                match byte_table(tables[0]) {
                    Some(lut) if bytes && mode == Mode::Plain => Self::Bytes { lut, tables, first },
                    _ => Self::Direct { tables, first },
                }
            }
        }
    }

    /// Transform one row. `src` and `dst` hold exactly the row's samples.
    #[inline]
    pub(crate) fn row<S: Sample>(&self, mode: Mode, src: &[S], dst: &mut [T]) {
        match (self, mode) {
            (Self::Small { tables, first }, Mode::Plain) => small_row(tables, *first, src, dst),
            (Self::Small { tables, first }, Mode::SharedIndex) => {
                small_si_row(tables, *first, src, dst)
            }
            (Self::Bytes { lut, tables, first }, Mode::Plain) => {
                match (S::as_u8s(src), bytemuck::try_cast_slice_mut::<T, u8>(dst)) {
                    (Some(s), Ok(d)) => {
                        incant!(lut8_impl(*lut, s, d), [v3, arm_v2, wasm128, scalar]);
                    }
                    _ => scan::direct_row(tables, *first, src, dst),
                }
            }
            (Self::Direct { tables, first }, Mode::Plain) => {
                scan::direct_row(tables, *first, src, dst)
            }
            (
                Self::Direct { tables, first } | Self::Bytes { tables, first, .. },
                Mode::SharedIndex,
            ) => scan::direct_si_row(tables, *first, src, dst),
            (Self::Fused(fused), Mode::Plain) => scan::fused_row(fused, src, dst),
            (Self::Fused(fused), Mode::SharedIndex) => scan::fused_si_row(fused, src, dst),
        }
    }

    /// Transform every row of a strided image.
    pub(crate) fn run<S: Sample>(&self, src: &[S], dst: &mut [T], g: Geometry, mode: Mode) {
        if let Self::Bytes { lut, .. } = self {
            if let (Some(s), Ok(d)) = (S::as_u8s(src), bytemuck::try_cast_slice_mut::<T, u8>(dst))
            {
                let (w, h, ss, ds) = (g.width, g.height, g.src_stride, g.dst_stride);
                incant!(
                    lut8_strided(*lut, s, d, w, h, ss, ds),
                    [v3, arm_v2, wasm128, scalar]
                );
                return;
            }
        }
        let src_row = g.width * mode.source_samples(N);
        let dst_row = g.width * N;
        for (s, d) in src
            .chunks(g.src_stride)
            .zip(dst.chunks_mut(g.dst_stride))
            .take(g.height)
        {
            self.row(mode, &s[..src_row], &mut d[..dst_row]);
        }
    }

    /// Transform one row in place, staging source samples through a stack block.
    pub(crate) fn row_inplace(&self, row: &mut [T])
    where
        T: Sample,
    {
        let mut block = [T::zeroed(); INPLACE_BLOCK];
        for chunk in row.chunks_mut(INPLACE_BLOCK) {
            let staged = &mut block[..chunk.len()];
            staged.copy_from_slice(chunk);
            self.row(Mode::Plain, &*staged, chunk);
        }
    }
}

/// The first 256 entries of a 1-byte table, viewed as bytes. `None` for
/// wider entry types.
fn byte_table<T: Pod>(table: &[T]) -> Option<&[u8; 256]> {
    if size_of::<T>() != 1 {
        return None;
    }
    let bytes = bytemuck::try_cast_slice::<T, u8>(table).ok()?;
    bytes.get(..256)?.try_into().ok()
}

fn transform<S: Sample, T: Pod>(
    src: &[S],
    dst: &mut [T],
    g: Geometry,
    table: &LookupTable<'_, T>,
    mode: Mode,
) -> Result<(), LutError> {
    let Some((strategy, span)) = plan(src, dst.len(), g, table, mode)? else {
        return Ok(());
    };
    with_channels!(table.channels(), N => {
        Kernel::<T, N>::prepare::<S>(table, strategy, span, mode).run(src, dst, g, mode)
    });
    Ok(())
}

fn transform_inplace<S: Sample>(
    buf: &mut [S],
    width: usize,
    height: usize,
    stride: usize,
    table: &LookupTable<'_, S>,
) -> Result<(), LutError> {
    let g = Geometry {
        width,
        height,
        src_stride: stride,
        dst_stride: stride,
    };
    let Some((strategy, span)) = plan(buf, buf.len(), g, table, Mode::Plain)? else {
        return Ok(());
    };
    let row = width * table.channels();
    with_channels!(table.channels(), N => {
        let kernel = Kernel::<S, N>::prepare::<S>(table, strategy, span, Mode::Plain);
        for r in buf.chunks_mut(stride).take(height) {
            kernel.row_inplace(&mut r[..row]);
        }
    });
    Ok(())
}

// ===========================================================================
// Public API: contiguous
// ===========================================================================

/// Remap interleaved pixels, each channel through its own table.
///
/// `src` and `dst` hold `table.channels()` samples per pixel. An empty `src`
/// is a no-op.
///
/// ```rust
/// use pixlut::{LookupTable, lookup};
///
/// let red: Vec<u8> = (0..=255u8).map(|v| v / 2).collect();
/// let green: Vec<u8> = (0..=255u8).collect();
/// let table = LookupTable::new(&[&red[..], &green[..]]).unwrap();
/// let mut out = [0u8; 4];
/// lookup(&[200u8, 200, 10, 10], &mut out, &table).unwrap();
/// assert_eq!(out, [100, 200, 5, 10]);
/// ```
pub fn lookup<S: Sample, T: Pod>(
    src: &[S],
    dst: &mut [T],
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    let ch = table.channels();
    let pixels = check_copy(src.len(), ch, dst.len(), ch)?;
    transform(src, dst, Geometry::row(pixels, ch, ch), table, Mode::Plain)
}

/// Expand one index per pixel into `table.channels()` output samples.
///
/// Every channel table is read at the same index (palette lookup).
///
/// ```rust
/// use pixlut::{LookupTable, lookup_si};
///
/// let r = [0u8, 255, 0];
/// let g = [0u8, 0, 255];
/// let b = [0u8, 0, 0];
/// let palette = LookupTable::new(&[&r[..], &g[..], &b[..]]).unwrap();
/// let mut rgb = [0u8; 6];
/// lookup_si(&[1u8, 2], &mut rgb, &palette).unwrap();
/// assert_eq!(rgb, [255, 0, 0, 0, 255, 0]);
/// ```
pub fn lookup_si<S: Sample, T: Pod>(
    src: &[S],
    dst: &mut [T],
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    let ch = table.channels();
    let pixels = check_copy(src.len(), 1, dst.len(), ch)?;
    transform(src, dst, Geometry::row(pixels, 1, ch), table, Mode::SharedIndex)
}

/// Remap interleaved pixels in place; samples and entries share a type.
pub fn lookup_inplace<S: Sample>(buf: &mut [S], table: &LookupTable<'_, S>) -> Result<(), LutError> {
    let ch = table.channels();
    if !buf.len().is_multiple_of(ch) {
        return Err(LutError::NotPixelAligned);
    }
    let pixels = buf.len() / ch;
    transform_inplace(buf, pixels, 1, pixels * ch, table)
}

// ===========================================================================
// Public API: strided
// ===========================================================================

/// Remap a strided image, each channel through its own table.
///
/// `src_stride` / `dst_stride` are the distances, in samples, between the
/// starts of consecutive rows; each must be ≥ `width × channels`. Padding
/// between rows is never read or written. A zero `width` or `height` is a
/// no-op.
pub fn lookup_strided<S: Sample, T: Pod>(
    src: &[S],
    dst: &mut [T],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    let g = Geometry {
        width,
        height,
        src_stride,
        dst_stride,
    };
    transform(src, dst, g, table, Mode::Plain)
}

/// Expand a strided single-channel index image through every channel table.
///
/// `src_stride` must be ≥ `width`; `dst_stride` ≥ `width × channels`.
pub fn lookup_si_strided<S: Sample, T: Pod>(
    src: &[S],
    dst: &mut [T],
    width: usize,
    height: usize,
    src_stride: usize,
    dst_stride: usize,
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    let g = Geometry {
        width,
        height,
        src_stride,
        dst_stride,
    };
    transform(src, dst, g, table, Mode::SharedIndex)
}

/// Remap a strided image in place.
///
/// `stride` is in samples and must be ≥ `width × channels`.
pub fn lookup_inplace_strided<S: Sample>(
    buf: &mut [S],
    width: usize,
    height: usize,
    stride: usize,
    table: &LookupTable<'_, S>,
) -> Result<(), LutError> {
    transform_inplace(buf, width, height, stride, table)
}
