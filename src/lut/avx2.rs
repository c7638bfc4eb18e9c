use archmage::prelude::*;
use safe_unaligned_simd::x86_64::{_mm_loadu_si128, _mm256_loadu_si256, _mm256_storeu_si256};

// ===========================================================================
// x86-64 AVX2: 256-entry byte table via 16 nibble shuffles
//
// Each 16-entry slice of the table is broadcast to both lanes. For every
// source byte, the low nibble selects within a slice (pshufb) and a compare on
// the high nibble keeps only the matching slice's result.
// ===========================================================================

#[rite]
pub(super) fn lut8_row_v3(_token: X64V3Token, lut: &[u8; 256], src: &[u8], dst: &mut [u8]) {
    let mut slices = [_mm256_setzero_si256(); 16];
    for (k, slice) in slices.iter_mut().enumerate() {
        let seg: &[u8; 16] = lut[k * 16..k * 16 + 16].try_into().unwrap();
        *slice = _mm256_broadcastsi128_si256(_mm_loadu_si128(seg));
    }
    let nibble = _mm256_set1_epi8(0x0F);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 32 <= n {
        let s: &[u8; 32] = src[i..i + 32].try_into().unwrap();
        let idx = _mm256_loadu_si256(s);
        let lo = _mm256_and_si256(idx, nibble);
        let hi = _mm256_and_si256(_mm256_srli_epi16::<4>(idx), nibble);
        let mut acc = _mm256_setzero_si256();
        for (k, slice) in slices.iter().enumerate() {
            let hit = _mm256_cmpeq_epi8(hi, _mm256_set1_epi8(k as i8));
            let val = _mm256_shuffle_epi8(*slice, lo);
            acc = _mm256_or_si256(acc, _mm256_and_si256(hit, val));
        }
        let d: &mut [u8; 32] = (&mut dst[i..i + 32]).try_into().unwrap();
        _mm256_storeu_si256(d, acc);
        i += 32;
    }
    for (&s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = lut[s as usize];
    }
}

// x86-64 arcane wrappers
#[arcane]
pub(super) fn lut8_impl_v3(t: X64V3Token, lut: &[u8; 256], s: &[u8], d: &mut [u8]) {
    lut8_row_v3(t, lut, s, d);
}
#[arcane]
pub(super) fn lut8_strided_v3(
    t: X64V3Token,
    lut: &[u8; 256],
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        lut8_row_v3(t, lut, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
