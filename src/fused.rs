// ---------------------------------------------------------------------------
// Path selection and fused-table construction.
//
// A fused table interleaves N channel tables into one table of N-tuples, so a
// shared-index pixel is one read instead of N, and plain-mode reads for all
// channels of a value share a cache line.
// ---------------------------------------------------------------------------

use alloc::vec;
use alloc::vec::Vec;

use bytemuck::Pod;

use crate::{LookupTable, Path};

/// Largest fused table, in entries.
pub(crate) const MAX_FUSED_ENTRIES: usize = 1 << 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Strategy {
    Small,
    Direct,
    Fused,
}

impl Strategy {
    /// `span` is the number of table entries the call can touch.
    pub(crate) fn choose<T: Pod>(table: &LookupTable<'_, T>, pixels: usize, span: usize) -> Self {
        let fusable = table.channels() > 1 && span <= MAX_FUSED_ENTRIES;
        let tuning = table.tuning();
        match tuning.path {
            Path::Small => Self::Small,
            Path::Direct => Self::Direct,
            Path::Fused if fusable => Self::Fused,
            Path::Fused => Self::Direct,
            Path::Auto if pixels < tuning.fuse_threshold => Self::Small,
            Path::Auto if fusable && pixels >= span => Self::Fused,
            Path::Auto => Self::Direct,
        }
    }
}

/// `entries[k]` holds every channel's output for biased index `first + k`.
#[derive(Clone, Debug)]
pub(crate) struct FusedTable<T, const N: usize> {
    entries: Vec<[T; N]>,
    first: u32,
}

impl<T: Pod, const N: usize> FusedTable<T, N> {
    /// Fuse the first `span` entries of each table. Entries past the end of a
    /// shorter table stay zero; the coverage check guarantees they are never read.
    pub(crate) fn build(tables: &[&[T]; N], first: u32, span: usize) -> Self {
        let mut entries = vec![[T::zeroed(); N]; span];
        for (c, table) in tables.iter().enumerate() {
            for (slot, &v) in entries.iter_mut().zip(table.iter()) {
                slot[c] = v;
            }
        }
        Self { entries, first }
    }

    #[inline(always)]
    pub(crate) fn get(&self, index: u32) -> &[T; N] {
        &self.entries[index.wrapping_sub(self.first) as usize]
    }
}
