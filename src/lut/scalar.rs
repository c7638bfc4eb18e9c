use archmage::prelude::*;
use bytemuck::Pod;

use crate::Sample;

// ===========================================================================
// Small-image rows: one table read per sample, no setup
// ===========================================================================

pub(super) fn small_row<S: Sample, T: Pod>(tables: &[&[T]], first: u32, src: &[S], dst: &mut [T]) {
    let ch = tables.len();
    for (s, d) in src.chunks_exact(ch).zip(dst.chunks_exact_mut(ch)) {
        for ((table, &v), out) in tables.iter().zip(s).zip(d) {
            *out = table[v.table_index().wrapping_sub(first) as usize];
        }
    }
}

pub(super) fn small_si_row<S: Sample, T: Pod>(tables: &[&[T]], first: u32, src: &[S], dst: &mut [T]) {
    let ch = tables.len();
    for (&v, d) in src.iter().zip(dst.chunks_exact_mut(ch)) {
        let k = v.table_index().wrapping_sub(first) as usize;
        for (table, out) in tables.iter().zip(d) {
            *out = table[k];
        }
    }
}

// ===========================================================================
// Scalar byte-table row (dispatch target for incant!)
// ===========================================================================

pub(super) fn lut8_row_scalar(_token: ScalarToken, lut: &[u8; 256], src: &[u8], dst: &mut [u8]) {
    for (&s, d) in src.iter().zip(dst.iter_mut()) {
        *d = lut[s as usize];
    }
}

pub(super) fn lut8_impl_scalar(t: ScalarToken, lut: &[u8; 256], s: &[u8], d: &mut [u8]) {
    lut8_row_scalar(t, lut, s, d);
}

pub(super) fn lut8_strided_scalar(
    t: ScalarToken,
    lut: &[u8; 256],
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        lut8_row_scalar(t, lut, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
