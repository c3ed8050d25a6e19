use super::lattice::Coord;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq)]
/// Read-only snapshot of external input consumed once per tick.
///
/// Capture, debouncing and picking are the caller's business; a selected
/// coordinate is expected to already lie inside the lattice.
pub struct TickInput {
    /// Cell under the cursor, if any.
    pub selected: Option<Coord>,
    /// Whether a perturbation was requested this tick.
    pub pressed: bool,
    /// Signed height change applied to the selected cell.
    pub height_delta: f32,
    /// Freezes the simulation for this tick.
    pub paused: bool,
}

impl TickInput {
    /// Input that advances the simulation without touching any cell.
    #[must_use]
    pub fn idle() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn paused() -> Self {
        Self {
            paused: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn poke(coord: Coord, height_delta: f32) -> Self {
        Self {
            selected: Some(coord),
            pressed: true,
            height_delta,
            paused: false,
        }
    }

    /// The cell and delta to inject, when a cell is selected and pressed.
    #[must_use]
    pub fn perturbation(&self) -> Option<(Coord, f32)> {
        match self.selected {
            Some(coord) if self.pressed => Some((coord, self.height_delta)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perturbation_requires_selection_and_press() {
        let hover = TickInput {
            selected: Some(Coord::xy(1, 1)),
            pressed: false,
            height_delta: 1.0,
            paused: false,
        };
        assert!(hover.perturbation().is_none());
        assert!(TickInput::idle().perturbation().is_none());
        assert_eq!(
            TickInput::poke(Coord::xy(1, 1), -2.0).perturbation(),
            Some((Coord::xy(1, 1), -2.0))
        );
    }
}
