// The duplex split node: a worker-pool pipeline stage that pulls messages
// from its bounded queue, cuts concatenated reads on detected spacers, and
// pushes the resulting subreads downstream in order.

use std::sync::Arc;
use std::thread::{self, JoinHandle};

use log::{debug, error, trace, warn};

use crate::error::Error;
use crate::pipeline::{Message, MessageSink, WorkQueue};
use crate::read::{ExtRead, Read};
use crate::seq::moves_to_map;
use crate::settings::DuplexSplitSettings;
use crate::split::ranges::PosRange;
use crate::split::strategy::SplitFinder;
use crate::split::subread::subread;

/// Cut `read` at the given sorted, disjoint spacer ranges (sequence
/// coordinates). The spacers themselves are removed; each child keeps the
/// signal samples backing its bases.
pub fn split_read(read: Read, spacers: &[PosRange]) -> Result<Vec<Read>, Error> {
    if spacers.is_empty() {
        return Ok(vec![read]);
    }

    let seq_to_sig = moves_to_map(
        &read.moves,
        read.model_stride,
        read.raw_signal.len(),
        read.seq.len() + 1,
    );

    let mut subreads = Vec::with_capacity(spacers.len() + 1);
    let mut seq_start = 0;
    let mut sig_start = seq_to_sig[0];
    for spacer in spacers {
        subreads.push(subread(
            &read,
            PosRange::new(seq_start, spacer.start),
            PosRange::new(sig_start, seq_to_sig[spacer.start]),
        )?);
        seq_start = spacer.end;
        sig_start = seq_to_sig[spacer.end];
    }
    debug_assert_eq!(read.raw_signal.len(), seq_to_sig[read.seq.len()]);
    subreads.push(subread(
        &read,
        PosRange::new(seq_start, read.seq.len()),
        PosRange::new(sig_start, read.raw_signal.len()),
    )?);

    Ok(subreads)
}

struct NodeState {
    queue: WorkQueue<Message>,
    settings: DuplexSplitSettings,
    finders: Vec<SplitFinder>,
    sink: Arc<dyn MessageSink>,
}

/// Pipeline node that splits concatenated reads into subreads.
///
/// Owns a bounded work queue and a pool of worker threads. Dropping the
/// node closes the queue, drains and joins the workers, then terminates the
/// downstream sink exactly once.
pub struct DuplexSplitNode {
    state: Arc<NodeState>,
    workers: Vec<JoinHandle<()>>,
}

impl DuplexSplitNode {
    pub fn new(
        sink: Arc<dyn MessageSink>,
        settings: DuplexSplitSettings,
        num_worker_threads: usize,
        max_reads: usize,
    ) -> Result<Self, Error> {
        settings.validate()?;
        if num_worker_threads == 0 {
            return Err(Error::settings("num_worker_threads must be >= 1"));
        }
        if max_reads == 0 {
            return Err(Error::settings("max_reads must be >= 1"));
        }

        let finders = SplitFinder::ordered(settings.simplex_mode);
        let state = Arc::new(NodeState {
            queue: WorkQueue::with_capacity(max_reads),
            settings,
            finders,
            sink,
        });

        let workers = (0..num_worker_threads)
            .map(|_| {
                let state = Arc::clone(&state);
                thread::spawn(move || worker_loop(&state))
            })
            .collect();

        Ok(Self { state, workers })
    }
}

impl MessageSink for DuplexSplitNode {
    fn push_message(&self, message: Message) {
        if self.state.queue.push(message).is_err() {
            warn!("message pushed to a terminated split node was dropped");
        }
    }

    fn terminate(&self) {
        self.state.queue.terminate();
    }
}

impl Drop for DuplexSplitNode {
    fn drop(&mut self) {
        self.state.queue.terminate();
        for worker in self.workers.drain(..) {
            if worker.join().is_err() {
                error!("split worker thread panicked");
            }
        }
        self.state.sink.terminate();
    }
}

fn worker_loop(state: &NodeState) {
    while let Some(message) = state.queue.pop() {
        if !state.settings.enabled {
            state.sink.push_message(message);
            continue;
        }
        match message {
            Message::Read(read) => process_read(state, *read),
            other => state.sink.push_message(other),
        }
    }
}

/// Run the strategies over one parent read and emit the resulting subreads
/// contiguously, left to right.
fn process_read(state: &NodeState, read: Read) {
    let parent_id = read.read_id.clone();
    debug!("processing read {}; length {}", parent_id, read.seq.len());

    let mut working = vec![ExtRead::new(read)];
    for finder in &state.finders {
        trace!("running {}", finder.name());
        let mut next = Vec::with_capacity(working.len());
        for ext in working {
            let spacers = finder.find_splits(&state.settings, &ext);
            debug!(
                "{} strategy: {} split(s) in read {}",
                finder.name(),
                spacers.len(),
                parent_id
            );
            if spacers.is_empty() {
                next.push(ext);
                continue;
            }
            match split_read(ext.into_read(), &spacers) {
                Ok(children) => next.extend(children.into_iter().map(ExtRead::new)),
                Err(err) => {
                    warn!("dropping read {parent_id}: {err}");
                    return;
                }
            }
        }
        working = next;
    }

    debug!("read {} split into {} subread(s)", parent_id, working.len());
    for ext in working {
        let mut child = ext.into_read();
        child.parent_read_id = parent_id.clone();
        state.sink.push_message(Message::Read(Box::new(child)));
    }
}
