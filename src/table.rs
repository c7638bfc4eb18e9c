// ---------------------------------------------------------------------------
// Per-channel lookup tables, their index window, and call tuning.
// ---------------------------------------------------------------------------

use bytemuck::Pod;

use crate::{LutError, Sample};

/// Maximum number of channel tables.
pub const MAX_CHANNELS: usize = 4;

/// Pixel count below which the small scalar path is used.
///
/// Building a fused table costs one pass over every channel table; below
/// this many pixels, direct per-channel reads are cheaper.
pub const DEFAULT_FUSE_THRESHOLD: usize = 512;

/// Which code path a lookup takes. Every path produces identical output.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Path {
    /// Choose from pixel count, channel count and table span.
    #[default]
    Auto,
    /// Per-pixel scalar loop.
    Small,
    /// Head/body/tail loop reading each channel table directly.
    Direct,
    /// Head/body/tail loop over a fused table of channel tuples.
    /// Falls back to [`Path::Direct`] for one channel or tables wider than 2^16.
    Fused,
}

/// Per-table knobs for path selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tuning {
    /// Images with fewer pixels than this take the small path under [`Path::Auto`].
    pub fuse_threshold: usize,
    /// Forced path, or [`Path::Auto`].
    pub path: Path,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            fuse_threshold: DEFAULT_FUSE_THRESHOLD,
            path: Path::Auto,
        }
    }
}

/// One lookup table per output channel.
///
/// The entry for sample `v` on channel `c` is
/// `tables[c][v.table_index() - first_index]`. With the default
/// `first_index` of 0, an 8-bit table needs 256 entries and a 16-bit table
/// 65536; for signed samples the entry for zero sits at the midpoint.
/// 32-bit sources use a window: set [`LookupTable::starting_at_value`] to the
/// smallest value the table covers.
#[derive(Clone, Copy, Debug)]
pub struct LookupTable<'a, T> {
    tables: [&'a [T]; MAX_CHANNELS],
    channels: usize,
    first_index: u32,
    tuning: Tuning,
}

impl<'a, T: Pod> LookupTable<'a, T> {
    /// Tables for 1 to 4 channels, in channel order.
    pub fn new(tables: &[&'a [T]]) -> Result<Self, LutError> {
        let channels = tables.len();
        if channels == 0 || channels > MAX_CHANNELS {
            return Err(LutError::ChannelCount(channels));
        }
        let mut all = [tables[0]; MAX_CHANNELS];
        all[..channels].copy_from_slice(tables);
        Ok(Self {
            tables: all,
            channels,
            first_index: 0,
            tuning: Tuning::default(),
        })
    }

    /// A single-channel table.
    pub fn single(table: &'a [T]) -> Self {
        Self {
            tables: [table; MAX_CHANNELS],
            channels: 1,
            first_index: 0,
            tuning: Tuning::default(),
        }
    }

    /// Entry 0 of every table holds the biased index `first_index`.
    #[must_use]
    pub fn starting_at(mut self, first_index: u32) -> Self {
        self.first_index = first_index;
        self
    }

    /// Entry 0 of every table holds the output for sample `first`.
    #[must_use]
    pub fn starting_at_value<S: Sample>(self, first: S) -> Self {
        self.starting_at(first.table_index())
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn tables(&self) -> &[&'a [T]] {
        &self.tables[..self.channels]
    }

    pub fn first_index(&self) -> u32 {
        self.first_index
    }

    pub fn tuning(&self) -> Tuning {
        self.tuning
    }

    /// The first `N` tables as an array. `N` must equal the channel count.
    #[inline]
    pub(crate) fn array<const N: usize>(&self) -> [&'a [T]; N] {
        core::array::from_fn(|c| self.tables[c])
    }

    /// Checks every sample the call will read against the table windows.
    ///
    /// `pixel_samples` is the number of source samples per pixel: the channel
    /// count in plain mode, 1 in shared-index mode. Returns how many table
    /// entries past `first_index` the call can touch.
    pub(crate) fn coverage<'s, S: Sample>(
        &self,
        rows: impl Iterator<Item = &'s [S]>,
        pixel_samples: usize,
    ) -> Result<usize, LutError> {
        if self.first_index == 0 {
            if let Some(full) = S::FULL_RANGE {
                if self.tables().iter().all(|t| t.len() >= full) {
                    return Ok(full);
                }
            }
        }

        // [lo, hi] biased index per source sample position
        let mut bounds = [(u32::MAX, 0u32); MAX_CHANNELS];
        for row in rows {
            for px in row.chunks_exact(pixel_samples) {
                for (b, &s) in bounds.iter_mut().zip(px) {
                    let i = s.table_index();
                    b.0 = b.0.min(i);
                    b.1 = b.1.max(i);
                }
            }
        }

        let mut span = 0;
        for (c, table) in self.tables().iter().enumerate() {
            let (lo, hi) = if pixel_samples == 1 {
                bounds[0]
            } else {
                bounds[c]
            };
            if lo > hi {
                continue;
            }
            if lo < self.first_index {
                return Err(LutError::IndexOutOfTable {
                    channel: c,
                    index: lo,
                });
            }
            let needed = (hi - self.first_index) as usize + 1;
            if needed > table.len() {
                return Err(LutError::IndexOutOfTable {
                    channel: c,
                    index: hi,
                });
            }
            span = span.max(needed);
        }
        Ok(span)
    }
}
