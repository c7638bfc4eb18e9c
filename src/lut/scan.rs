// ---------------------------------------------------------------------------
// Bulk row loops: head / body / tail.
//
// Head: scalar samples until the destination reaches the alignment of one
// body chunk. Body: LANES samples per step, one wide copy in, LANES table
// reads, one wide store out. Tail: scalar remainder. When the destination
// can never reach that alignment the head is empty and every body store is
// unaligned.
//
// Plain rows rotate the channel assignment (see rotate.rs) once per chunk.
// Shared-index rows run the same three phases over whole pixels: the head
// aligns the pixel stream to a chunk of SI_PIXELS pixels (the largest power
// of two dividing its size, capped at 64 bytes) and no rotation is needed.
// ---------------------------------------------------------------------------

use bytemuck::Pod;

use crate::Sample;
use crate::fused::FusedTable;
use crate::rotate::{ChannelRotator, LANES};

/// Pixels per shared-index body step.
const SI_PIXELS: usize = 4;

/// Samples before `dst` reaches body-chunk alignment, or 0 if it never will.
#[inline(always)]
pub(crate) fn head_len<T>(dst: &[T]) -> usize {
    let wide = size_of::<T>() * LANES;
    if !wide.is_power_of_two() || wide > 64 {
        return 0;
    }
    let head = dst.as_ptr().align_offset(wide);
    if head >= LANES { 0 } else { head.min(dst.len()) }
}

#[inline(always)]
fn plain_row<S: Sample, T: Pod, R: Copy, const N: usize>(
    per_channel: [R; N],
    src: &[S],
    dst: &mut [T],
    fetch: impl Fn(R, u32) -> T,
) {
    let n = src.len().min(dst.len());
    let (src, dst) = (&src[..n], &mut dst[..n]);
    let mut rot = ChannelRotator::new(per_channel);

    let head = head_len(dst);
    let (src_head, src_rest) = src.split_at(head);
    let (dst_head, dst_rest) = dst.split_at_mut(head);
    for (i, (s, d)) in src_head.iter().zip(dst_head).enumerate() {
        *d = fetch(rot.at(i), s.table_index());
    }
    rot.rotate(head);

    let (src_body, src_tail) = src_rest.as_chunks::<LANES>();
    let (dst_body, dst_tail) = dst_rest.as_chunks_mut::<LANES>();
    for (s, d) in src_body.iter().zip(dst_body) {
        let s: [S; LANES] = *s;
        *d = core::array::from_fn(|j| fetch(rot.at(j), s[j].table_index()));
        rot.rotate(LANES);
    }

    for (i, (s, d)) in src_tail.iter().zip(dst_tail).enumerate() {
        *d = fetch(rot.at(i), s.table_index());
    }
}

/// Pixels before `px` reaches the alignment of one shared-index body chunk,
/// or 0 if it never will.
#[inline(always)]
fn si_head_len<T, const N: usize>(px: &[[T; N]]) -> usize {
    let wide = size_of::<[T; N]>() * SI_PIXELS;
    let align = 1usize << wide.trailing_zeros().min(6);
    let head = px.as_ptr().align_offset(align);
    if head >= SI_PIXELS { 0 } else { head.min(px.len()) }
}

#[inline(always)]
fn si_row<S: Sample, T: Pod, const N: usize>(
    src: &[S],
    dst: &mut [T],
    fetch: impl Fn(u32) -> [T; N],
) {
    let (px, _) = dst.as_chunks_mut::<N>();
    let n = src.len().min(px.len());
    let (src, px) = (&src[..n], &mut px[..n]);

    let head = si_head_len(px);
    let (src_head, src_rest) = src.split_at(head);
    let (dst_head, dst_rest) = px.split_at_mut(head);
    for (s, d) in src_head.iter().zip(dst_head) {
        *d = fetch(s.table_index());
    }

    let (src_body, src_tail) = src_rest.as_chunks::<SI_PIXELS>();
    let (dst_body, dst_tail) = dst_rest.as_chunks_mut::<SI_PIXELS>();
    for (s, d) in src_body.iter().zip(dst_body) {
        *d = core::array::from_fn(|j| fetch(s[j].table_index()));
    }
    for (s, d) in src_tail.iter().zip(dst_tail) {
        *d = fetch(s.table_index());
    }
}

// ===========================================================================
// Direct per-channel tables
// ===========================================================================

pub(crate) fn direct_row<S: Sample, T: Pod, const N: usize>(
    tables: &[&[T]; N],
    first: u32,
    src: &[S],
    dst: &mut [T],
) {
    plain_row(*tables, src, dst, |table, i| {
        table[i.wrapping_sub(first) as usize]
    });
}

pub(crate) fn direct_si_row<S: Sample, T: Pod, const N: usize>(
    tables: &[&[T]; N],
    first: u32,
    src: &[S],
    dst: &mut [T],
) {
    si_row(src, dst, |i| -> [T; N] {
        let k = i.wrapping_sub(first) as usize;
        core::array::from_fn(|c| tables[c][k])
    });
}

// ===========================================================================
// Fused table
// ===========================================================================

pub(crate) fn fused_row<S: Sample, T: Pod, const N: usize>(
    fused: &FusedTable<T, N>,
    src: &[S],
    dst: &mut [T],
) {
    let channels: [usize; N] = core::array::from_fn(|c| c);
    plain_row(channels, src, dst, |c, i| fused.get(i)[c]);
}

pub(crate) fn fused_si_row<S: Sample, T: Pod, const N: usize>(
    fused: &FusedTable<T, N>,
    src: &[S],
    dst: &mut [T],
) {
    si_row(src, dst, |i| *fused.get(i));
}
