// Read data model: the basecalled read as it travels through the pipeline,
// plus the working-set wrapper used while splitting.

use crate::seq::move_cum_sums;

/// Acquisition metadata forwarded from the sequencer, carried into children.
#[derive(Debug, Clone, PartialEq)]
pub struct Attributes {
    /// Channel mux.
    pub mux: u32,
    /// Per-channel number of the read as acquired; `u32::MAX` means unknown.
    pub read_number: u32,
    /// Channel ID; `-1` means unknown.
    pub channel_number: i32,
    /// Read acquisition start time, `%Y-%m-%dT%H:%M:%S.mmm+00:00`.
    pub start_time: String,
    pub fast5_filename: String,
    pub num_samples: u64,
}

impl Default for Attributes {
    fn default() -> Self {
        Self {
            mux: u32::MAX,
            read_number: u32::MAX,
            channel_number: -1,
            start_time: String::new(),
            fast5_filename: String::new(),
            num_samples: 0,
        }
    }
}

/// One basecalled read with its raw signal, move vector, sequence, qualities
/// and acquisition metadata.
///
/// The raw signal is kept in DAC units; `pA = scale * raw + shift` after the
/// upstream scaler has run.
#[derive(Debug, Clone, PartialEq)]
pub struct Read {
    pub raw_signal: Vec<i16>,
    pub digitisation: f32,
    pub range: f32,
    pub offset: f32,
    /// Samples per second.
    pub sample_rate: u64,
    /// Set by the upstream scaler.
    pub shift: f32,
    /// Set by the upstream scaler.
    pub scale: f32,
    /// Raw-to-pA conversion factor from the sequencer.
    pub scaling: f32,
    /// Down-sampling factor of the basecaller model: samples per move entry.
    pub model_stride: usize,
    /// Unique read ID (UUID4).
    pub read_id: String,
    /// ID of the read this one was cut from; empty for unsplit reads.
    pub parent_read_id: String,
    /// Basecall over {A,C,G,T,N}.
    pub seq: String,
    /// Per-base Phred quality string, same length as `seq`.
    pub qstring: String,
    /// One entry per model stride; a 1 marks the stride at which the next
    /// base was emitted.
    pub moves: Vec<u8>,
    pub run_id: String,
    pub flowcell_id: String,
    pub model_name: String,
    /// Samples already trimmed from the front of the raw signal.
    pub num_trimmed_samples: u64,
    pub attributes: Attributes,
}

impl Default for Read {
    fn default() -> Self {
        Self {
            raw_signal: Vec::new(),
            digitisation: 0.0,
            range: 0.0,
            offset: 0.0,
            sample_rate: 4000,
            shift: 0.0,
            scale: 1.0,
            scaling: 1.0,
            model_stride: 1,
            read_id: String::new(),
            parent_read_id: String::new(),
            seq: String::new(),
            qstring: String::new(),
            moves: Vec::new(),
            run_id: String::new(),
            flowcell_id: String::new(),
            model_name: String::new(),
            num_trimmed_samples: 0,
            attributes: Attributes::default(),
        }
    }
}

/// A template/complement pair for duplex calling.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadPair {
    pub template: Read,
    pub complement: Read,
}

/// Working-set wrapper around a read: the raw signal cast to f32 and the
/// cumulative sums of the move vector, both computed once per wrap.
#[derive(Debug)]
pub struct ExtRead {
    pub read: Read,
    pub signal: Vec<f32>,
    pub move_sums: Vec<usize>,
}

impl ExtRead {
    /// Wrap a read, caching its float signal and move cumulative sums.
    ///
    /// Panics if the move vector does not account for every base of `seq`.
    pub fn new(read: Read) -> Self {
        let signal = read.raw_signal.iter().map(|&s| f32::from(s)).collect();
        let move_sums = move_cum_sums(&read.moves);
        assert_eq!(
            move_sums.last().copied().unwrap_or(0),
            read.seq.len(),
            "move vector does not sum to the sequence length"
        );
        Self {
            read,
            signal,
            move_sums,
        }
    }

    /// Unwrap, discarding the cached views.
    pub fn into_read(self) -> Read {
        self.read
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
