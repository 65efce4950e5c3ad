// The split finders: five ordered detection strategies, each proposing
// spacer ranges in sequence coordinates. The set is closed and small, so a
// plain enum with one dispatch function replaces a table of closures.

use log::trace;

use crate::read::{ExtRead, Read};
use crate::settings::DuplexSplitSettings;
use crate::split::adapter::{check_rc_match, find_adapter_matches, find_best_adapter_match};
use crate::split::pore::possible_pore_regions;
use crate::split::ranges::{filter_ranges, merge_ranges, PosRange};

/// One split-detection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SplitFinder {
    /// Strong pore signal with a nearby adapter match.
    PoreAdapter,
    /// Strong pore signal with reverse-complementary flanks.
    PoreFlank,
    /// Relaxed pore signal with both adapter and flank evidence.
    PoreAll,
    /// Adapter match with a reverse-complementary flank at its start.
    AdapterFlank,
    /// Last resort: adapter near the read midpoint plus head/tail
    /// reverse-complement similarity.
    AdapterMiddle,
}

impl SplitFinder {
    /// The strategies in application order. In simplex mode only the
    /// pore-plus-adapter strategy runs.
    pub fn ordered(simplex_mode: bool) -> Vec<SplitFinder> {
        if simplex_mode {
            vec![SplitFinder::PoreAdapter]
        } else {
            vec![
                SplitFinder::PoreAdapter,
                SplitFinder::PoreFlank,
                SplitFinder::PoreAll,
                SplitFinder::AdapterFlank,
                SplitFinder::AdapterMiddle,
            ]
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SplitFinder::PoreAdapter => "PORE_ADAPTER",
            SplitFinder::PoreFlank => "PORE_FLANK",
            SplitFinder::PoreAll => "PORE_ALL",
            SplitFinder::AdapterFlank => "ADAPTER_FLANK",
            SplitFinder::AdapterMiddle => "ADAPTER_MIDDLE",
        }
    }

    /// Propose spacer ranges for `read`, ordered left to right.
    pub fn find_splits(&self, settings: &DuplexSplitSettings, read: &ExtRead) -> Vec<PosRange> {
        match self {
            SplitFinder::PoreAdapter => filter_ranges(
                &possible_pore_regions(settings, read, settings.pore_thr),
                |r| check_nearby_adapter(settings, &read.read, r, settings.adapter_edist),
            ),
            SplitFinder::PoreFlank => merge_ranges(
                &filter_ranges(
                    &possible_pore_regions(settings, read, settings.pore_thr),
                    |r| check_flank_match(settings, &read.read, r, settings.flank_edist),
                ),
                settings.end_flank + settings.start_flank,
            ),
            SplitFinder::PoreAll => merge_ranges(
                &filter_ranges(
                    &possible_pore_regions(settings, read, settings.relaxed_pore_thr),
                    |r| {
                        check_nearby_adapter(
                            settings,
                            &read.read,
                            r,
                            settings.relaxed_adapter_edist,
                        ) && check_flank_match(
                            settings,
                            &read.read,
                            r,
                            settings.relaxed_flank_edist,
                        )
                    },
                ),
                settings.end_flank + settings.start_flank,
            ),
            SplitFinder::AdapterFlank => {
                let seq = &read.read.seq;
                let search = PosRange::new(settings.expect_adapter_prefix.min(seq.len()), seq.len());
                filter_ranges(
                    &find_adapter_matches(&settings.adapter, seq, settings.adapter_edist, search),
                    |r| {
                        check_flank_match(
                            settings,
                            &read.read,
                            PosRange::new(r.start, r.start),
                            settings.flank_edist,
                        )
                    },
                )
            }
            SplitFinder::AdapterMiddle => middle_adapter_split(settings, &read.read)
                .into_iter()
                .collect(),
        }
    }
}

/// Whether the adapter matches within `r` extended downstream by the
/// configured search range.
pub(crate) fn check_nearby_adapter(
    settings: &DuplexSplitSettings,
    read: &Read,
    r: PosRange,
    adapter_edist: i32,
) -> bool {
    find_best_adapter_match(
        &settings.adapter,
        &read.seq,
        adapter_edist,
        // The spacer region itself is included in the search.
        PosRange::new(
            r.start,
            (r.end + settings.pore_adapter_range).min(read.seq.len()),
        ),
    )
    .is_some()
}

/// Whether the sequence upstream of a potential spacer `r` is the reverse
/// complement of the sequence downstream of it.
pub(crate) fn check_flank_match(
    settings: &DuplexSplitSettings,
    read: &Read,
    r: PosRange,
    dist_thr: i32,
) -> bool {
    r.start >= settings.end_flank
        && r.end + settings.start_flank <= read.seq.len()
        && check_rc_match(
            &read.seq,
            PosRange::new(r.start - settings.end_flank, r.start - settings.end_trim),
            // The spacer region itself is included in the complement flank.
            PosRange::new(r.start, r.end + settings.start_flank),
            dist_thr,
        )
}

/// Search the central window for an adapter that the stricter strategies
/// missed, verifying both the local flank match and head/tail
/// reverse-complement similarity.
fn middle_adapter_split(settings: &DuplexSplitSettings, read: &Read) -> Option<PosRange> {
    let len = read.seq.len();
    if len < settings.end_flank + settings.start_flank
        || len < settings.middle_adapter_search_span
    {
        return None;
    }

    trace!("searching for middle adapter in read {}", read.read_id);
    let window = PosRange::new(
        len / 2 - settings.middle_adapter_search_span / 2,
        len / 2 + settings.middle_adapter_search_span / 2,
    );
    let adapter_match = find_best_adapter_match(
        &settings.adapter,
        &read.seq,
        settings.relaxed_adapter_edist,
        window,
    )?;

    let adapter_start = adapter_match.start;
    trace!("checking middle flank and head/tail match");
    if check_flank_match(
        settings,
        read,
        PosRange::new(adapter_start, adapter_start),
        settings.relaxed_flank_edist,
    ) && check_rc_match(
        &read.seq,
        PosRange::new(len - settings.end_flank, len - settings.end_trim),
        PosRange::new(0, settings.start_flank),
        settings.relaxed_flank_edist,
    ) {
        return Some(PosRange::new(adapter_start - 1, adapter_start));
    }
    None
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
