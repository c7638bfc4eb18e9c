//! Whole-image lookups using [`imgref`] types.
//!
//! Each call validates the image once and runs the whole strided buffer
//! through one prepared kernel, so a fused table is built at most once per
//! image. No allocation beyond that; the caller owns all buffers.
//!
//! ```rust
//! use rgb::Rgb;
//! use ::imgref::{ImgVec, ImgRefMut};
//! use pixlut::{LookupTable, imgref};
//!
//! let r: Vec<u8> = (0..=255u8).map(|v| 255 - v).collect();
//! let g: Vec<u8> = (0..=255u8).collect();
//! let curves = LookupTable::new(&[&r[..], &g[..], &g[..]]).unwrap();
//!
//! let src = ImgVec::new(vec![Rgb::new(55u8, 1, 2); 4], 2, 2);
//! let mut dst_buf = vec![Rgb::default(); 4];
//! let dst = ImgRefMut::new(&mut dst_buf, 2, 2);
//! imgref::lookup_rgb(src.as_ref(), dst, &curves).unwrap();
//! assert_eq!(dst_buf[3], Rgb::new(200, 1, 2));
//! ```

use bytemuck::Pod;
use imgref::{ImgRef, ImgRefMut};
use rgb::{Rgb, Rgba};

use crate::{LookupTable, LutError, Sample};

// ---------------------------------------------------------------------------
// Dimension and channel checks
// ---------------------------------------------------------------------------

fn check_dims<A, B>(src: &ImgRef<'_, A>, dst: &ImgRefMut<'_, B>) -> Result<(), LutError> {
    if src.width() != dst.width() || src.height() != dst.height() {
        Err(LutError::PixelCountMismatch)
    } else {
        Ok(())
    }
}

fn check_channels<T: Pod>(table: &LookupTable<'_, T>, n: usize) -> Result<(), LutError> {
    if table.channels() == n {
        Ok(())
    } else {
        Err(LutError::ChannelCount(table.channels()))
    }
}

/// Plain lookup over a pixel image whose pixels hold `spp` samples each.
fn lookup_pixels<P: Pod, Q: Pod, S: Sample, T: Pod>(
    src: ImgRef<'_, P>,
    dst: ImgRefMut<'_, Q>,
    spp: usize,
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_dims(&src, &dst)?;
    check_channels(table, spp)?;
    let (w, h) = (src.width(), src.height());
    let (ss, ds) = (src.stride() * spp, dst.stride() * spp);
    let s: &[P] = src.buf();
    let d: &mut [Q] = dst.into_buf();
    crate::lookup_strided::<S, T>(
        bytemuck::cast_slice(s),
        bytemuck::cast_slice_mut(d),
        w,
        h,
        ss,
        ds,
        table,
    )
}

/// Shared-index lookup from an index image into a `channels`-sample pixel image.
fn expand_pixels<S: Sample, Q: Pod, T: Pod>(
    src: ImgRef<'_, S>,
    dst: ImgRefMut<'_, Q>,
    channels: usize,
    palette: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_dims(&src, &dst)?;
    check_channels(palette, channels)?;
    let (w, h) = (src.width(), src.height());
    let (ss, ds) = (src.stride(), dst.stride() * channels);
    let s: &[S] = src.buf();
    let d: &mut [Q] = dst.into_buf();
    crate::lookup_si_strided(s, bytemuck::cast_slice_mut(d), w, h, ss, ds, palette)
}

// ---------------------------------------------------------------------------
// Copy lookups
// ---------------------------------------------------------------------------

/// Map a single-channel image through one table.
pub fn lookup_gray<S: Sample, T: Pod>(
    src: ImgRef<'_, S>,
    dst: ImgRefMut<'_, T>,
    table: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    lookup_pixels::<S, T, S, T>(src, dst, 1, table)
}

/// Map `ImgRef<Rgb<S>>` into `ImgRefMut<Rgb<T>>` through three channel tables.
pub fn lookup_rgb<S: Sample, T: Pod>(
    src: ImgRef<'_, Rgb<S>>,
    dst: ImgRefMut<'_, Rgb<T>>,
    curves: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    lookup_pixels::<_, _, S, T>(src, dst, 3, curves)
}

/// Map `ImgRef<Rgba<S>>` into `ImgRefMut<Rgba<T>>` through four channel tables.
pub fn lookup_rgba<S: Sample, T: Pod>(
    src: ImgRef<'_, Rgba<S>>,
    dst: ImgRefMut<'_, Rgba<T>>,
    curves: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    lookup_pixels::<_, _, S, T>(src, dst, 4, curves)
}

// ---------------------------------------------------------------------------
// In-place lookups
// ---------------------------------------------------------------------------

/// Apply three channel curves to an RGB image in place. Padding is untouched.
pub fn apply_rgb<S: Sample>(img: ImgRefMut<'_, Rgb<S>>, curves: &LookupTable<'_, S>) -> Result<(), LutError> {
    check_channels(curves, 3)?;
    let (w, h, stride) = (img.width(), img.height(), img.stride() * 3);
    let buf: &mut [Rgb<S>] = img.into_buf();
    crate::lookup_inplace_strided(bytemuck::cast_slice_mut(buf), w, h, stride, curves)
}

/// Apply four channel curves to an RGBA image in place. Padding is untouched.
pub fn apply_rgba<S: Sample>(
    img: ImgRefMut<'_, Rgba<S>>,
    curves: &LookupTable<'_, S>,
) -> Result<(), LutError> {
    check_channels(curves, 4)?;
    let (w, h, stride) = (img.width(), img.height(), img.stride() * 4);
    let buf: &mut [Rgba<S>] = img.into_buf();
    crate::lookup_inplace_strided(bytemuck::cast_slice_mut(buf), w, h, stride, curves)
}

// ---------------------------------------------------------------------------
// Palette expansion
// ---------------------------------------------------------------------------

/// Expand an index image into an RGB image.
pub fn expand_rgb<S: Sample, T: Pod>(
    src: ImgRef<'_, S>,
    dst: ImgRefMut<'_, Rgb<T>>,
    palette: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    expand_pixels(src, dst, 3, palette)
}

/// Expand an index image into an RGBA image.
pub fn expand_rgba<S: Sample, T: Pod>(
    src: ImgRef<'_, S>,
    dst: ImgRefMut<'_, Rgba<T>>,
    palette: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    expand_pixels(src, dst, 4, palette)
}
