// Pipeline plumbing: the message type exchanged between nodes, the sink
// trait every node implements, and the bounded work queue behind it.

mod queue;

pub use queue::WorkQueue;

use noodles::sam::alignment::record_buf::RecordBuf;

use crate::read::{Read, ReadPair};

/// A unit of work travelling between pipeline nodes.
///
/// The split engine only acts on `Read`; the other variants pass through
/// untouched.
#[derive(Debug)]
pub enum Message {
    Read(Box<Read>),
    ReadPair(Box<ReadPair>),
    /// An already-aligned record on its way to the writer.
    Alignment(Box<RecordBuf>),
}

/// A pipeline node that consumes messages.
///
/// `terminate` must be safe to call more than once; nodes owning worker
/// threads call it on their own queue from their destructor, join the
/// workers, then propagate it downstream exactly once.
pub trait MessageSink: Send + Sync {
    /// Hand a message to this node. Blocks while the node's queue is full.
    fn push_message(&self, message: Message);

    /// Close this node's queue; queued messages are still drained.
    fn terminate(&self);
}
