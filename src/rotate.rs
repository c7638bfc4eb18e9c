// ---------------------------------------------------------------------------
// Channel rotation for interleaved bulk loops.
//
// The body of a row loop works in fixed chunks of LANES samples. With N
// interleaved channels, a chunk starts on channel (offset mod N). Instead of
// computing the channel of every sample, the per-channel references are kept
// in cyclic order and expanded into one slot per lane. Both are refreshed
// only when a rotation changes the phase, so lane `j` reads slot `j` directly.
// ---------------------------------------------------------------------------

/// Samples per body chunk.
pub(crate) const LANES: usize = 8;

#[derive(Clone, Copy, Debug)]
pub(crate) struct ChannelRotator<R: Copy, const N: usize> {
    order: [R; N],
    lanes: [R; LANES],
}

impl<R: Copy, const N: usize> ChannelRotator<R, N> {
    /// `per_channel[c]` is the reference used for channel `c`.
    #[inline(always)]
    pub(crate) fn new(per_channel: [R; N]) -> Self {
        Self {
            order: per_channel,
            lanes: Self::expand(&per_channel),
        }
    }

    #[inline(always)]
    fn expand(order: &[R; N]) -> [R; LANES] {
        core::array::from_fn(|j| order[j % N])
    }

    /// Reference for `lane` of a chunk that starts at the current phase.
    #[inline(always)]
    pub(crate) fn at(&self, lane: usize) -> R {
        self.lanes[lane]
    }

    /// Advance the phase past `samples` samples.
    #[inline(always)]
    pub(crate) fn rotate(&mut self, samples: usize) {
        let by = samples % N;
        if by != 0 {
            self.order.rotate_left(by);
            self.lanes = Self::expand(&self.order);
        }
    }
}
