// Bounded-edit-distance sequence matching, backed by edlib in semi-global
// ("HW") mode: the query must align fully, the target ends are free.

use edlib_rs::edlibrs::{
    edlibAlignRs, EdlibAlignConfigRs, EdlibAlignModeRs, EdlibAlignTaskRs, EdlibEqualityPairRs,
};

use crate::seq::reverse_complement;
use crate::split::ranges::PosRange;

/// Best infix match of `query` in `target` within `max_edist` edits, as a
/// half-open target range. A negative edit distance from the aligner means
/// no match within the bound (or an aligner failure), both treated as a
/// miss.
fn locate(query: &[u8], target: &[u8], max_edist: i32) -> Option<PosRange> {
    let no_extra_equalities: &[EdlibEqualityPairRs] = &[];
    let config = EdlibAlignConfigRs {
        k: max_edist,
        mode: EdlibAlignModeRs::EDLIB_MODE_HW,
        task: EdlibAlignTaskRs::EDLIB_TASK_LOC,
        additionalequalities: no_extra_equalities,
    };
    let result = edlibAlignRs(query, target, &config);
    if result.editDistance < 0 {
        return None;
    }
    let start = result.startLocations.as_ref()?.first().copied()?;
    let end = result.endLocations.as_ref()?.first().copied()?;
    Some(PosRange::new(start as usize, end as usize + 1))
}

/// Whether `query` aligns as an infix of `target` within `max_edist` edits.
fn within_distance(query: &[u8], target: &[u8], max_edist: i32) -> bool {
    let no_extra_equalities: &[EdlibEqualityPairRs] = &[];
    let config = EdlibAlignConfigRs {
        k: max_edist,
        mode: EdlibAlignModeRs::EDLIB_MODE_HW,
        task: EdlibAlignTaskRs::EDLIB_TASK_DISTANCE,
        additionalequalities: no_extra_equalities,
    };
    edlibAlignRs(query, target, &config).editDistance >= 0
}

/// Best match of `adapter` inside `seq[subrange)`, in absolute `seq`
/// coordinates, within `dist_thr` edits. An empty subrange never matches.
pub fn find_best_adapter_match(
    adapter: &str,
    seq: &str,
    dist_thr: i32,
    subrange: PosRange,
) -> Option<PosRange> {
    debug_assert!(subrange.start <= subrange.end && subrange.end <= seq.len());
    if subrange.is_empty() {
        return None;
    }
    let window = &seq.as_bytes()[subrange.start..subrange.end];
    locate(adapter.as_bytes(), window, dist_thr)
        .map(|m| PosRange::new(subrange.start + m.start, subrange.start + m.end))
}

/// All adapter matches in `seq[subrange)`. Currently at most the single
/// best match is returned.
pub fn find_adapter_matches(
    adapter: &str,
    seq: &str,
    dist_thr: i32,
    subrange: PosRange,
) -> Vec<PosRange> {
    find_best_adapter_match(adapter, seq, dist_thr, subrange)
        .into_iter()
        .collect()
}

/// Whether the template region aligns inside the reverse complement of the
/// complement region within `dist_thr` edits.
pub fn check_rc_match(seq: &str, templ: PosRange, compl: PosRange, dist_thr: i32) -> bool {
    assert!(!templ.is_empty() && !compl.is_empty() && dist_thr >= 0);
    let mut rc_compl = seq.as_bytes()[compl.start..compl.end].to_vec();
    reverse_complement(&mut rc_compl);
    within_distance(&seq.as_bytes()[templ.start..templ.end], &rc_compl, dist_thr)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
