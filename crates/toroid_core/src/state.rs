//! Which buffer is current, and whether this tick runs at all.

use crate::buffer::BufferPair;
use toroid_data::CellState;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPhase {
    /// Between ticks: the current buffer holds committed state.
    AwaitingSwap,
    /// Buffers swapped, kernels are writing the current buffer.
    Simulating,
}

/// Ping-pong bookkeeping for the buffer pair. Only the scheduler mutates it.
#[derive(Debug, Clone)]
pub struct SimulationState {
    buffers: BufferPair,
    current: usize,
    /// Pause gate; cleared when the input asks to freeze time.
    pub process_simulation: bool,
    phase: TickPhase,
}

impl SimulationState {
    #[must_use]
    pub fn new(buffers: BufferPair) -> Self {
        Self {
            buffers,
            current: 0,
            process_simulation: true,
            phase: TickPhase::AwaitingSwap,
        }
    }

    pub fn swap_buffers(&mut self) {
        self.current = (self.current + 1) % 2;
    }

    #[inline(always)]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    #[inline(always)]
    #[must_use]
    pub fn previous_index(&self) -> usize {
        1 - self.current
    }

    #[must_use]
    pub fn phase(&self) -> TickPhase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: TickPhase) {
        self.phase = phase;
    }

    #[must_use]
    pub fn current(&self) -> &[CellState] {
        self.buffers.get(self.current)
    }

    #[must_use]
    pub fn previous(&self) -> &[CellState] {
        self.buffers.get(self.previous_index())
    }

    pub fn current_mut(&mut self) -> &mut [CellState] {
        self.buffers.get_mut(self.current)
    }

    pub fn previous_mut(&mut self) -> &mut [CellState] {
        let slot = self.previous_index();
        self.buffers.get_mut(slot)
    }

    /// `(previous, current)`: the read side and the write side of a tick.
    pub fn split(&mut self) -> (&[CellState], &mut [CellState]) {
        let read = self.previous_index();
        self.buffers.split(read)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers.is_empty()
    }
}
