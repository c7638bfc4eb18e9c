//! Row-parallel strided lookups on the rayon thread pool.
//!
//! The image is validated and the kernel prepared once on the calling
//! thread; rows are then split across workers, which all read the same
//! (possibly fused) table. Output is identical to the sequential calls.

use bytemuck::Pod;
use rayon::prelude::*;

use crate::lut::{Geometry, Kernel, Mode, plan, with_channels};
use crate::{LookupTable, LutError, Sample};

fn transform_par<S: Sample, T: Pod + Send + Sync>(
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
        let kernel = Kernel::<T, N>::prepare::<S>(table, strategy, span, mode);
        let src_row = g.width * mode.source_samples(N);
        let dst_row = g.width * N;
        dst.par_chunks_mut(g.dst_stride)
            .take(g.height)
            .enumerate()
            .for_each(|(y, row)| {
                let s = &src[y * g.src_stride..][..src_row];
                kernel.row(mode, s, &mut row[..dst_row]);
            });
    });
    Ok(())
}

/// Parallel [`lookup_strided`](crate::lookup_strided).
pub fn lookup_strided_par<S: Sample, T: Pod + Send + Sync>(
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
    transform_par(src, dst, g, table, Mode::Plain)
}

/// Parallel [`lookup_si_strided`](crate::lookup_si_strided).
pub fn lookup_si_strided_par<S: Sample, T: Pod + Send + Sync>(
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
    transform_par(src, dst, g, table, Mode::SharedIndex)
}

/// Parallel [`lookup_inplace_strided`](crate::lookup_inplace_strided).
pub fn lookup_inplace_strided_par<S: Sample>(
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
        buf.par_chunks_mut(stride)
            .take(height)
            .for_each(|r| kernel.row_inplace(&mut r[..row]));
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    extern crate alloc;
    use super::*;
    use crate::{Path, Tuning};
    use alloc::vec;
    use alloc::vec::Vec;

    fn tables() -> [Vec<u16>; 3] {
        [
            (0..256).map(|v| v * 3).collect(),
            (0..256).map(|v| 1000 - v).collect(),
            (0..256).map(|v| v ^ 0x55).collect(),
        ]
    }

    #[test]
    fn matches_sequential() {
        let owned = tables();
        let refs = [&owned[0][..], &owned[1][..], &owned[2][..]];
        let (w, h, ss, ds) = (123, 57, 123 * 3 + 4, 123 * 3 + 2);
        let src: Vec<u8> = (0..ss * h).map(|i| (i * 31 % 256) as u8).collect();
        for path in [Path::Auto, Path::Small, Path::Direct, Path::Fused] {
            let table = LookupTable::new(&refs).unwrap().with_tuning(Tuning {
                path,
                ..Tuning::default()
            });
            let mut seq = vec![0xEEEEu16; ds * h];
            let mut par = seq.clone();
            crate::lookup_strided(&src, &mut seq, w, h, ss, ds, &table).unwrap();
            lookup_strided_par(&src, &mut par, w, h, ss, ds, &table).unwrap();
            assert_eq!(seq, par, "{path:?}");

            crate::lookup_si_strided(&src, &mut seq, w, h, ss, ds, &table).unwrap();
            lookup_si_strided_par(&src, &mut par, w, h, ss, ds, &table).unwrap();
            assert_eq!(seq, par, "si {path:?}");
        }
    }

    #[test]
    fn inplace_matches_sequential() {
        let t: Vec<u8> = (0..=255u8).map(|v| v.rotate_left(3)).collect();
        let table = LookupTable::new(&[&t[..], &t[..]]).unwrap();
        let (w, h, stride) = (300, 20, 640);
        let mut seq: Vec<u8> = (0..stride * h).map(|i| i as u8).collect();
        let mut par = seq.clone();
        crate::lookup_inplace_strided(&mut seq, w, h, stride, &table).unwrap();
        lookup_inplace_strided_par(&mut par, w, h, stride, &table).unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn errors_and_empty_images() {
        let owned = tables();
        let table = LookupTable::new(&[&owned[0][..], &owned[1][..], &owned[2][..]]).unwrap();
        let mut dst = vec![0u16; 30];
        assert_eq!(
            lookup_strided_par(&[0u8; 29], &mut dst, 10, 1, 30, 30, &table),
            Err(LutError::InvalidStride)
        );
        lookup_strided_par::<u8, u16>(&[], &mut dst, 0, 10, 0, 0, &table).unwrap();
        assert!(dst.iter().all(|&v| v == 0));
    }
}
