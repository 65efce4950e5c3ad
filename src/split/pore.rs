// Open-pore signal detection: the raw current trace shows a sustained
// high-current event when the channel is momentarily empty between two
// concatenated reads.

use log::{debug, trace};

use crate::read::ExtRead;
use crate::settings::DuplexSplitSettings;
use crate::split::ranges::PosRange;

/// Scan `signal` for clusters of super-threshold samples.
///
/// Returns maximal, disjoint `[start, end)` sample intervals, ordered by
/// start, each containing at least one sample above `threshold` with
/// consecutive super-threshold samples at most `cluster_dist` apart.
/// Samples before `ignore_prefix` are not considered.
pub fn detect_pore_signal(
    signal: &[f32],
    threshold: f32,
    cluster_dist: usize,
    ignore_prefix: usize,
) -> Vec<PosRange> {
    let mut regions = Vec::new();
    let mut open: Option<PosRange> = None;

    for (i, &sample) in signal.iter().enumerate().skip(ignore_prefix) {
        if sample > threshold {
            match open.as_mut() {
                Some(region) if i <= region.end + cluster_dist => region.end = i + 1,
                _ => {
                    if let Some(region) = open.take() {
                        regions.push(region);
                    }
                    open = Some(PosRange::new(i, i + 1));
                }
            }
        }
    }
    if let Some(region) = open {
        regions.push(region);
    }
    regions
}

/// Candidate spacer regions of `read` in sequence coordinates, derived from
/// open-pore signal above `pore_thr` (given in pA).
pub fn possible_pore_regions(
    settings: &DuplexSplitSettings,
    read: &ExtRead,
    pore_thr: f32,
) -> Vec<PosRange> {
    debug!("analyzing signal in read {}", read.read.read_id);

    let stride = read.read.model_stride;
    let raw_thr = (pore_thr - read.read.shift) / read.read.scale;

    let mut pore_regions = Vec::new();
    for signal_region in detect_pore_signal(
        &read.signal,
        raw_thr,
        settings.pore_cl_dist,
        settings.expect_pore_prefix,
    ) {
        let move_start = signal_region.start / stride;
        let move_end = signal_region.end / stride;
        debug_assert!(move_end >= move_start);
        // Stride rounding can push either index past the move table; a zero
        // cumulative sum means basecalling had not started yet.
        if move_start >= read.move_sums.len()
            || move_end >= read.move_sums.len()
            || read.move_sums[move_start] == 0
        {
            continue;
        }
        let start_pos = read.move_sums[move_start] - 1;
        let end_pos = read.move_sums[move_end];
        debug_assert!(end_pos > start_pos);
        pore_regions.push(PosRange::new(start_pos, end_pos));
    }

    trace!(
        "read {}: {} pore region(s) to check",
        read.read.read_id,
        pore_regions.len()
    );
    pore_regions
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
