// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Change log of a document.
//!
//! Mutations append [`ModelEvent`]s with increasing sequence numbers.
//! Viewers remember the last sequence they saw and poll
//! [`ChangeLog::since`]; nothing registers callbacks on the tree.

use super::{AttributeState, Path};

/// A single change to a document.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelEvent {
    /// The value of the attribute at `path` was replaced or edited.
    ValueChanged { path: Path },
    /// The attribute at `path` changed lifecycle state.
    StateChanged { path: Path, state: AttributeState },
    /// A slot was appended to the collection at `element`.
    AttributeAdded { element: Path, index: usize },
    /// A slot was removed from the collection at `element`.
    AttributeRemoved { element: Path, index: usize },
    /// Two adjacent slots were swapped.
    AttributeMoved { element: Path, from: usize, to: usize },
    /// The document's root element was replaced.
    RootReplaced,
    /// Navigation moved to the element at `path`.
    CurrentChanged { path: Path },
}

/// An event with its sequence number.
#[derive(Debug, Clone, PartialEq)]
pub struct Sequenced {
    pub seq: u64,
    pub event: ModelEvent,
}

/// Append-only, bounded event stream.
#[derive(Debug, Clone)]
pub struct ChangeLog {
    events: Vec<Sequenced>,
    next_seq: u64,
    capacity: usize,
}

impl ChangeLog {
    /// Default number of retained events.
    pub const DEFAULT_CAPACITY: usize = 4096;

    pub fn new() -> Self {
        Self::with_capacity(Self::DEFAULT_CAPACITY)
    }

    /// Retain at most `capacity` events; older ones are dropped.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            events: Vec::new(),
            next_seq: 1,
            capacity: capacity.max(1),
        }
    }

    /// Append an event; returns its sequence number.
    pub fn record(&mut self, event: ModelEvent) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        if self.events.len() == self.capacity {
            self.events.remove(0);
        }
        self.events.push(Sequenced { seq, event });
        seq
    }

    /// Events with a sequence number greater than `seq`.
    ///
    /// A viewer that fell behind the retention window gets the oldest
    /// retained events and should compare the first `seq` with its own.
    pub fn since(&self, seq: u64) -> &[Sequenced] {
        let start = self.events.partition_point(|e| e.seq <= seq);
        &self.events[start..]
    }

    /// Sequence number of the latest event (0 when none was recorded).
    pub fn last_seq(&self) -> u64 {
        self.next_seq - 1
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl Default for ChangeLog {
    fn default() -> Self {
        Self::new()
    }
}
