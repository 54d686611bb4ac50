//! The simulator's run input: a finite, ordered sequence of memory operations.

use crate::common::addr::ByteAddr;

/// The kind of memory operation a trace [`Operation`] represents.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OpKind {
    /// A demand read. Feeds the prefetcher and contributes a latency sample.
    Read,
    /// A write-allocate. Never feeds the prefetcher and never contributes a
    /// latency sample.
    Write,
}

/// One memory operation in a trace: a kind and a byte address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Operation {
    /// Whether this is a read or a write.
    pub op_kind: OpKind,
    /// The byte address touched. Need not be line-aligned; alignment is
    /// applied implicitly by [`crate::common::addr::line_of`].
    pub byte_address: ByteAddr,
}

impl Operation {
    /// Builds a read operation for `byte_address`.
    #[inline]
    #[must_use]
    pub const fn read(byte_address: ByteAddr) -> Self {
        Self {
            op_kind: OpKind::Read,
            byte_address,
        }
    }

    /// Builds a write operation for `byte_address`.
    #[inline]
    #[must_use]
    pub const fn write(byte_address: ByteAddr) -> Self {
        Self {
            op_kind: OpKind::Write,
            byte_address,
        }
    }
}

/// An ordered, finite sequence of [`Operation`]s forming a simulation run's
/// input.
///
/// A thin newtype over `Vec<Operation>` rather than a bespoke collection:
/// the crate does not impose a trace-file format, so callers build traces
/// with ordinary `Vec`/iterator APIs and hand them to the simulator.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Trace(Vec<Operation>);

impl Trace {
    /// Creates an empty trace.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    /// Returns the number of operations in the trace.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the trace has no operations.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns an iterator over the trace's operations in order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Operation> {
        self.0.iter()
    }

    /// Appends an operation to the end of the trace.
    #[inline]
    pub fn push(&mut self, op: Operation) {
        self.0.push(op);
    }
}

impl From<Vec<Operation>> for Trace {
    #[inline]
    fn from(ops: Vec<Operation>) -> Self {
        Self(ops)
    }
}

impl FromIterator<Operation> for Trace {
    #[inline]
    fn from_iter<T: IntoIterator<Item = Operation>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for Trace {
    type Item = Operation;
    type IntoIter = std::vec::IntoIter<Operation>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a Trace {
    type Item = &'a Operation;
    type IntoIter = std::slice::Iter<'a, Operation>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
