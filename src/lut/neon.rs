use core::arch::aarch64::{uint8x16x4_t, vdupq_n_u8, vqtbl4q_u8, vqtbx4q_u8, vsubq_u8};

use archmage::prelude::*;
use safe_unaligned_simd::aarch64::{vld1q_u8, vst1q_u8};

// ===========================================================================
// ARM NEON: 256-entry byte table as four 64-byte TBL quarters
//
// TBL on the first quarter zeroes out-of-range lanes; TBX on the others
// leaves them untouched. Subtracting 64 between quarters wraps lower indices
// out of range, so each lane is filled by exactly one quarter.
// ===========================================================================

#[rite]
fn load_quarter_arm_v2(_token: Arm64V2Token, q: &[u8]) -> uint8x16x4_t {
    let a: &[u8; 16] = q[0..16].try_into().unwrap();
    let b: &[u8; 16] = q[16..32].try_into().unwrap();
    let c: &[u8; 16] = q[32..48].try_into().unwrap();
    let d: &[u8; 16] = q[48..64].try_into().unwrap();
    uint8x16x4_t(vld1q_u8(a), vld1q_u8(b), vld1q_u8(c), vld1q_u8(d))
}

#[rite]
pub(super) fn lut8_row_arm_v2(token: Arm64V2Token, lut: &[u8; 256], src: &[u8], dst: &mut [u8]) {
    let t0 = load_quarter_arm_v2(token, &lut[0..64]);
    let t1 = load_quarter_arm_v2(token, &lut[64..128]);
    let t2 = load_quarter_arm_v2(token, &lut[128..192]);
    let t3 = load_quarter_arm_v2(token, &lut[192..256]);
    let step = vdupq_n_u8(64);
    let n = src.len().min(dst.len());
    let mut i = 0;
    while i + 16 <= n {
        let s: &[u8; 16] = src[i..i + 16].try_into().unwrap();
        let idx0 = vld1q_u8(s);
        let idx1 = vsubq_u8(idx0, step);
        let idx2 = vsubq_u8(idx1, step);
        let idx3 = vsubq_u8(idx2, step);
        let mut acc = vqtbl4q_u8(t0, idx0);
        acc = vqtbx4q_u8(acc, t1, idx1);
        acc = vqtbx4q_u8(acc, t2, idx2);
        acc = vqtbx4q_u8(acc, t3, idx3);
        let d: &mut [u8; 16] = (&mut dst[i..i + 16]).try_into().unwrap();
        vst1q_u8(d, acc);
        i += 16;
    }
    for (&s, d) in src[i..n].iter().zip(&mut dst[i..n]) {
        *d = lut[s as usize];
    }
}

// ARM arcane wrappers
#[arcane]
pub(super) fn lut8_impl_arm_v2(t: Arm64V2Token, lut: &[u8; 256], s: &[u8], d: &mut [u8]) {
    lut8_row_arm_v2(t, lut, s, d);
}
#[arcane]
pub(super) fn lut8_strided_arm_v2(
    t: Arm64V2Token,
    lut: &[u8; 256],
    src: &[u8],
    dst: &mut [u8],
    w: usize,
    h: usize,
    ss: usize,
    ds: usize,
) {
    for y in 0..h {
        lut8_row_arm_v2(t, lut, &src[y * ss..][..w], &mut dst[y * ds..][..w]);
    }
}
