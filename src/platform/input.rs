//! Input sources

use std::collections::VecDeque;

use crate::sim::{Snapshot, TickInput};

/// Produces the input for one tick
pub trait InputSource {
    fn poll(&mut self, view: &Snapshot) -> TickInput;
}

/// Replays queued inputs, then idles with empty input
#[derive(Debug, Clone, Default)]
pub struct ScriptedInput {
    queue: VecDeque<TickInput>,
}

impl ScriptedInput {
    pub fn new(inputs: impl IntoIterator<Item = TickInput>) -> Self {
        Self {
            queue: inputs.into_iter().collect(),
        }
    }

    /// Queue the same input for `ticks` ticks
    pub fn hold(&mut self, input: TickInput, ticks: usize) -> &mut Self {
        self.queue.extend(std::iter::repeat_n(input, ticks));
        self
    }

    pub fn push(&mut self, input: TickInput) -> &mut Self {
        self.queue.push_back(input);
        self
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl InputSource for ScriptedInput {
    fn poll(&mut self, _view: &Snapshot) -> TickInput {
        self.queue.pop_front().unwrap_or_default()
    }
}
