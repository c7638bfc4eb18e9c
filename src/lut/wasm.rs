use core::arch::wasm32::{i8x16_swizzle, u8x16_splat, u8x16_sub, v128_or};

use archmage::prelude::*;
use safe_unaligned_simd::wasm32::{v128_load, v128_store};

// ===========================================================================
// WASM SIMD128: 256-entry byte table via 16 swizzles
//
// swizzle yields 0 for indices >= 16. Subtracting 16 per slice moves exactly
// one slice's indices into range, so OR-ing all results assembles the lookup.
// ===========================================================================

#[rite]
pub(super) fn lut8_row_wasm128(_token: Wasm128Token, lut: &[u8; 256], src: &[u8], dst: &mut [u8]) {
    let mut slices = [u8x16_splat(0); 16];
    for (k, slice) in slices.iter_mut().enumerate() {
        let seg: &[u8; 16] = lut[k * 16..k * 16 + 16].try_into().unwrap();
        *slice = v128_load(seg);
    }
    let step = u8x16_splat(16);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let mut idx = v128_load(s);
        let mut acc = u8x16_splat(0);
        for slice in &slices {
            acc = v128_or(acc, i8x16_swizzle(*slice, idx));
            idx = u8x16_sub(idx, step);
        }
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        v128_store(d, acc);
        i += 16;
    }
    for (&s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = lut[s as usize];
    }
}

// WASM arcane wrappers
#[arcane]
pub(super) fn lut8_impl_wasm128(t: Wasm128Token, lut: &[u8; 256], s: &[u8], d: &mut [u8]) {
    lut8_row_wasm128(t, lut, s, d);
}
#[arcane]
pub(super) fn lut8_strided_wasm128(
    t: Wasm128Token,
    lut: &[u8; 256],
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        lut8_row_wasm128(t, lut, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
