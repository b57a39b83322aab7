// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The scheduling seam between the cycle engine and its host.

use std::fmt::Display;
use std::fmt::Formatter;

/// Identifies one scheduled callback.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct TimerHandle(u64);

impl TimerHandle {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn id(self) -> u64 {
        self.0
    }
}

impl Display for TimerHandle {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "timer#{}", self.0)
    }
}

/// A one-shot delayed callback service, owned by the host's event loop.
///
/// When a scheduled delay elapses the host hands the handle back to
/// [`CycleEngine::on_timer`](crate::engine::CycleEngine::on_timer), on the
/// same thread that drives every other engine call.
pub trait TimerPort {
    /// Arrange for `handle` to be delivered after `delay_ms` milliseconds.
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle;

    /// Best-effort cancellation. Must be a silent no-op for handles that
    /// already fired, were already cancelled, or were never issued.
    fn cancel(&mut self, handle: TimerHandle);
}

/// Everything a [`ManualTimer`] was asked to do, in order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerOp {
    Schedule { handle: TimerHandle, due_ms: u64 },
    Cancel(TimerHandle),
}

/// A timer driven by a virtual clock. Nothing fires on its own: the owner
/// moves time forward and collects due handles with [`ManualTimer::pop_due`].
#[derive(Debug, Default)]
pub struct ManualTimer {
    now_ms: u64,
    next_id: u64,
    pending: Vec<(TimerHandle, u64)>,
    ops: Vec<TimerOp>,
    max_outstanding: usize,
}

impl ManualTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of handles scheduled but not yet fired or cancelled.
    pub fn outstanding(&self) -> usize {
        self.pending.len()
    }

    /// The highest value [`ManualTimer::outstanding`] ever reached.
    pub fn max_outstanding(&self) -> usize {
        self.max_outstanding
    }

    pub fn ops(&self) -> &[TimerOp] {
        &self.ops
    }

    /// The earliest pending handle and its due time. Ties go to the handle
    /// scheduled first.
    pub fn next_due(&self) -> Option<(TimerHandle, u64)> {
        self.pending
            .iter()
            .copied()
            .min_by_key(|(handle, due)| (*due, *handle))
    }

    /// Remove the earliest handle due at or before `deadline_ms`, moving the
    /// clock forward to its due time.
    pub fn pop_due(&mut self, deadline_ms: u64) -> Option<TimerHandle> {
        let (handle, due) = self.next_due()?;
        if due > deadline_ms {
            return None;
        }
        self.pending.retain(|(h, _)| *h != handle);
        self.now_ms = self.now_ms.max(due);
        Some(handle)
    }

    /// Move the clock to `ms`. The clock never runs backwards.
    pub fn set_now(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }
}

impl TimerPort for ManualTimer {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        self.next_id += 1;
        let handle = TimerHandle(self.next_id);
        let due_ms = self.now_ms.saturating_add(delay_ms);
        self.pending.push((handle, due_ms));
        self.ops.push(TimerOp::Schedule { handle, due_ms });
        self.max_outstanding = self.max_outstanding.max(self.pending.len());
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        self.pending.retain(|(h, _)| *h != handle);
        self.ops.push(TimerOp::Cancel(handle));
    }
}
