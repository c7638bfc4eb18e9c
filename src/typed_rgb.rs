//! Lookups on [`rgb`] crate pixel types via bytemuck.
//!
//! Pixel slices are reinterpreted as interleaved samples, so a three-table
//! [`LookupTable`] maps `Rgb<S>` to `Rgb<T>` and a four-table one maps
//! `Rgba<S>` to `Rgba<T>`. Palette expansion reads one index per pixel.
//!
//! # Per-channel curves
//!
//! ```rust
//! use rgb::Rgb;
//! use pixlut::{LookupTable, typed_rgb};
//!
//! let dim: Vec<u8> = (0..=255u8).map(|v| v / 2).collect();
//! let keep: Vec<u8> = (0..=255u8).collect();
//! let curves = LookupTable::new(&[&dim[..], &keep[..], &keep[..]]).unwrap();
//! let mut pixels = vec![Rgb::new(200u8, 100, 50); 4];
//! typed_rgb::apply_rgb(&mut pixels, &curves).unwrap();
//! assert_eq!(pixels[0], Rgb::new(100, 100, 50));
//! ```
//!
//! # Palette expansion
//!
//! ```rust
//! use rgb::Rgba;
//! use pixlut::{LookupTable, typed_rgb};
//!
//! let r = [0u8, 255];
//! let g = [0u8, 128];
//! let b = [0u8, 0];
//! let a = [0u8, 255];
//! let palette = LookupTable::new(&[&r[..], &g[..], &b[..], &a[..]]).unwrap();
//! let mut out = vec![Rgba::default(); 3];
//! typed_rgb::expand_rgba(&[1u8, 0, 1], &mut out, &palette).unwrap();
//! assert_eq!(out[0], Rgba::new(255, 128, 0, 255));
//! ```

use bytemuck::Pod;
use rgb::{Rgb, Rgba};

use crate::{LookupTable, LutError, Sample};

fn check_channels<T: Pod>(table: &LookupTable<'_, T>, n: usize) -> Result<(), LutError> {
    if table.channels() == n {
        Ok(())
    } else {
        Err(LutError::ChannelCount(table.channels()))
    }
}

// ---------------------------------------------------------------------------
// Copy lookups (RGB → RGB, RGBA → RGBA)
// ---------------------------------------------------------------------------

/// Map `&[Rgb<S>]` into `&mut [Rgb<T>]` through three channel tables.
pub fn lookup_rgb<S: Sample, T: Pod>(
    src: &[Rgb<S>],
    dst: &mut [Rgb<T>],
    curves: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_channels(curves, 3)?;
    crate::lookup::<S, T>(bytemuck::cast_slice(src), bytemuck::cast_slice_mut(dst), curves)
}

/// Map `&[Rgba<S>]` into `&mut [Rgba<T>]` through four channel tables.
pub fn lookup_rgba<S: Sample, T: Pod>(
    src: &[Rgba<S>],
    dst: &mut [Rgba<T>],
    curves: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_channels(curves, 4)?;
    crate::lookup::<S, T>(bytemuck::cast_slice(src), bytemuck::cast_slice_mut(dst), curves)
}

// ---------------------------------------------------------------------------
// In-place lookups
// ---------------------------------------------------------------------------

/// Apply three channel curves to `&mut [Rgb<S>]` in place.
pub fn apply_rgb<S: Sample>(pixels: &mut [Rgb<S>], curves: &LookupTable<'_, S>) -> Result<(), LutError> {
    check_channels(curves, 3)?;
    crate::lookup_inplace(bytemuck::cast_slice_mut(pixels), curves)
}

/// Apply four channel curves to `&mut [Rgba<S>]` in place.
pub fn apply_rgba<S: Sample>(pixels: &mut [Rgba<S>], curves: &LookupTable<'_, S>) -> Result<(), LutError> {
    check_channels(curves, 4)?;
    crate::lookup_inplace(bytemuck::cast_slice_mut(pixels), curves)
}

// ---------------------------------------------------------------------------
// Palette expansion (one index per pixel)
// ---------------------------------------------------------------------------

/// Expand palette indices into `&mut [Rgb<T>]`.
pub fn expand_rgb<S: Sample, T: Pod>(
    indices: &[S],
    dst: &mut [Rgb<T>],
    palette: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_channels(palette, 3)?;
    crate::lookup_si(indices, bytemuck::cast_slice_mut(dst), palette)
}

/// Expand palette indices into `&mut [Rgba<T>]`.
pub fn expand_rgba<S: Sample, T: Pod>(
    indices: &[S],
    dst: &mut [Rgba<T>],
    palette: &LookupTable<'_, T>,
) -> Result<(), LutError> {
    check_channels(palette, 4)?;
    crate::lookup_si(indices, bytemuck::cast_slice_mut(dst), palette)
}
