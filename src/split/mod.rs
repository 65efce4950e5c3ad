// Duplex split engine: detects spacer events (open-pore signal plus
// sequencing adapter) inside a basecalled read and cuts the read into
// biologically meaningful subreads.
//
// Detection runs five strategies in fixed order, strongest evidence first;
// each strategy re-examines the subreads produced by the previous ones.

mod adapter;
mod node;
mod pore;
mod ranges;
mod strategy;
mod subread;

pub use adapter::{check_rc_match, find_adapter_matches, find_best_adapter_match};
pub use node::{split_read, DuplexSplitNode};
pub use pore::{detect_pore_signal, possible_pore_regions};
pub use ranges::{filter_ranges, merge_ranges, PosRange};
pub use strategy::SplitFinder;
pub use subread::{adjust_time_ms, derive_uuid, format_timestamp, parse_timestamp, subread};
