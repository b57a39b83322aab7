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

use std::collections::HashMap;
use std::time::Duration;

use tokio::spawn;
use tokio::sync::mpsc::UnboundedSender;
use tokio::task::JoinHandle;
use tokio::time::sleep;
use wordloop_core::timer::TimerHandle;
use wordloop_core::timer::TimerPort;

/// Timer port backed by tokio tasks. Each scheduled handle is a task that
/// sleeps, then sends the handle to the event loop.
pub struct TokioTimer {
    fire_tx: UnboundedSender<TimerHandle>,
    tasks: HashMap<TimerHandle, JoinHandle<()>>,
    next_id: u64,
}

impl TokioTimer {
    pub fn new(fire_tx: UnboundedSender<TimerHandle>) -> Self {
        Self {
            fire_tx,
            tasks: HashMap::new(),
            next_id: 0,
        }
    }
}

impl TimerPort for TokioTimer {
    fn schedule(&mut self, delay_ms: u64) -> TimerHandle {
        self.tasks.retain(|_, task| !task.is_finished());
        self.next_id += 1;
        let handle = TimerHandle::new(self.next_id);
        let fire_tx = self.fire_tx.clone();
        let task = spawn(async move {
            sleep(Duration::from_millis(delay_ms)).await;
            // The receiver is gone only during shutdown.
            let _ = fire_tx.send(handle);
        });
        self.tasks.insert(handle, task);
        handle
    }

    fn cancel(&mut self, handle: TimerHandle) {
        if let Some(task) = self.tasks.remove(&handle) {
            task.abort();
        }
    }
}

impl Drop for TokioTimer {
    fn drop(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.abort();
        }
    }
}
