//! The two cell buffers a simulation ping-pongs between.

use crate::error::{Result, SimError};
use toroid_data::CellState;

/// Two equal-length cell arrays. Holding them as distinct `Vec`s makes it
/// impossible for the read side and the write side of a tick to alias.
#[derive(Debug, Clone, PartialEq)]
pub struct BufferPair {
    buffers: [Vec<CellState>; 2],
}

impl BufferPair {
    /// Both buffers start as copies of `initial`.
    #[must_use]
    pub fn mirrored(initial: Vec<CellState>) -> Self {
        Self {
            buffers: [initial.clone(), initial],
        }
    }

    pub fn from_buffers(first: Vec<CellState>, second: Vec<CellState>) -> Result<Self> {
        if first.len() != second.len() {
            return Err(SimError::SizeMismatch {
                expected: first.len(),
                actual: second.len(),
            });
        }
        Ok(Self {
            buffers: [first, second],
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.buffers[0].len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffers[0].is_empty()
    }

    #[inline(always)]
    #[must_use]
    pub fn get(&self, slot: usize) -> &[CellState] {
        &self.buffers[slot]
    }

    #[inline(always)]
    pub fn get_mut(&mut self, slot: usize) -> &mut [CellState] {
        &mut self.buffers[slot]
    }

    /// Borrows slot `read` immutably and the other slot mutably.
    #[inline(always)]
    pub fn split(&mut self, read: usize) -> (&[CellState], &mut [CellState]) {
        let [first, second] = &mut self.buffers;
        if read == 0 {
            (first.as_slice(), second.as_mut_slice())
        } else {
            (second.as_slice(), first.as_mut_slice())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mirrored_buffers_match() {
        let pair = BufferPair::mirrored(vec![CellState::with_temperature(0.5); 9]);
        assert_eq!(pair.len(), 9);
        assert_eq!(pair.get(0), pair.get(1));
    }

    #[test]
    fn test_length_mismatch_rejected() {
        let result = BufferPair::from_buffers(vec![CellState::default(); 4], vec![]);
        assert!(matches!(
            result,
            Err(SimError::SizeMismatch {
                expected: 4,
                actual: 0
            })
        ));
    }

    #[test]
    fn test_split_sides() {
        let mut pair = BufferPair::from_buffers(
            vec![CellState::with_temperature(1.0); 2],
            vec![CellState::with_temperature(2.0); 2],
        )
        .unwrap();

        let (read, write) = pair.split(1);
        assert_eq!(read[0].temperature, 2.0);
        write[0].temperature = 3.0;
        assert_eq!(pair.get(0)[0].temperature, 3.0);
        assert_eq!(pair.get(1)[0].temperature, 2.0);
    }
}
