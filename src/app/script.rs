//! Scripted input for headless runs.
//!
//! Events are keyed by frame: the number of scheduler calls so far, paused
//! frames included, starting at 0.
//!
//! Text forms, as accepted on the command line:
//! - poke: `x,y[,z[,w]]@frame[:delta]`, delta defaulting per dimensionality
//! - infection: `x,y[,z[,w]]@frame`
//! - pause window: `from..to`, frames `from` inclusive to `to` exclusive

use std::str::FromStr;
use thiserror::Error;
use toroid_core::injector::default_height_delta;
use toroid_data::{Coord, Dimensionality, TickInput};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScriptError {
    #[error("Invalid coordinate '{0}': expected 2 to 4 comma-separated integers")]
    InvalidCoord(String),

    #[error("Missing '@frame' in '{0}'")]
    MissingFrame(String),

    #[error("Invalid {field} '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    #[error("Invalid pause window '{0}': expected 'from..to' with from < to")]
    InvalidWindow(String),

    #[error("Coordinate {coord} does not match the {expected} lattice")]
    DimensionMismatch { coord: Coord, expected: Dimensionality },

    #[error("More than one poke scheduled for frame {0}")]
    DuplicatePoke(u64),
}

fn parse_coord(text: &str) -> Result<Coord, ScriptError> {
    let values = text
        .split(',')
        .map(|part| part.trim().parse::<i32>())
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| ScriptError::InvalidCoord(text.to_string()))?;
    Coord::from_slice(&values).ok_or_else(|| ScriptError::InvalidCoord(text.to_string()))
}

fn parse_number<T: FromStr>(field: &'static str, text: &str) -> Result<T, ScriptError> {
    text.trim().parse().map_err(|_| ScriptError::InvalidNumber {
        field,
        value: text.to_string(),
    })
}

/// Splits `coord@rest` into the coordinate and the text after `@`.
fn split_at_frame(text: &str) -> Result<(Coord, &str), ScriptError> {
    let (coord, rest) = text
        .split_once('@')
        .ok_or_else(|| ScriptError::MissingFrame(text.to_string()))?;
    Ok((parse_coord(coord)?, rest))
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PokeEvent {
    pub coord: Coord,
    pub frame: u64,
    /// `None` uses [`default_height_delta`] for the lattice.
    pub delta: Option<f32>,
}

impl FromStr for PokeEvent {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (coord, rest) = split_at_frame(s)?;
        let (frame, delta) = match rest.split_once(':') {
            Some((frame, delta)) => (frame, Some(parse_number("delta", delta)?)),
            None => (rest, None),
        };
        Ok(Self {
            coord,
            frame: parse_number("frame", frame)?,
            delta,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InfectEvent {
    pub coord: Coord,
    pub frame: u64,
}

impl FromStr for InfectEvent {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (coord, frame) = split_at_frame(s)?;
        Ok(Self {
            coord,
            frame: parse_number("frame", frame)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PauseWindow {
    pub from: u64,
    pub to: u64,
}

impl PauseWindow {
    #[must_use]
    pub fn contains(&self, frame: u64) -> bool {
        (self.from..self.to).contains(&frame)
    }
}

impl FromStr for PauseWindow {
    type Err = ScriptError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (from, to) = s
            .split_once("..")
            .ok_or_else(|| ScriptError::InvalidWindow(s.to_string()))?;
        let window = Self {
            from: parse_number("frame", from)?,
            to: parse_number("frame", to)?,
        };
        if window.from >= window.to {
            return Err(ScriptError::InvalidWindow(s.to_string()));
        }
        Ok(window)
    }
}

/// Everything a headless run feeds the engine, frame by frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputScript {
    pub pokes: Vec<PokeEvent>,
    pub infections: Vec<InfectEvent>,
    pub pauses: Vec<PauseWindow>,
}

impl InputScript {
    /// Checks coordinate arity and that no frame carries two pokes.
    /// Bounds are left to the engine, which knows the lattice side.
    pub fn validate(&self, dims: Dimensionality) -> Result<(), ScriptError> {
        let coords = self
            .pokes
            .iter()
            .map(|p| p.coord)
            .chain(self.infections.iter().map(|i| i.coord));
        for coord in coords {
            if coord.dims() != dims {
                return Err(ScriptError::DimensionMismatch {
                    coord,
                    expected: dims,
                });
            }
        }

        let mut frames: Vec<u64> = self.pokes.iter().map(|p| p.frame).collect();
        frames.sort_unstable();
        if let Some(pair) = frames.windows(2).find(|pair| pair[0] == pair[1]) {
            return Err(ScriptError::DuplicatePoke(pair[0]));
        }
        Ok(())
    }

    #[must_use]
    pub fn is_paused(&self, frame: u64) -> bool {
        self.pauses.iter().any(|w| w.contains(frame))
    }

    /// The engine input for `frame`.
    #[must_use]
    pub fn input_for(&self, frame: u64, dims: Dimensionality) -> TickInput {
        if self.is_paused(frame) {
            return TickInput::paused();
        }
        self.pokes
            .iter()
            .find(|p| p.frame == frame)
            .map_or_else(TickInput::idle, |p| {
                TickInput::poke(p.coord, p.delta.unwrap_or_else(|| default_height_delta(dims)))
            })
    }

    /// Infections to seed just before `frame` runs.
    pub fn infections_at(&self, frame: u64) -> impl Iterator<Item = &Coord> + '_ {
        self.infections
            .iter()
            .filter(move |i| i.frame == frame)
            .map(|i| &i.coord)
    }

    /// Last frame any event refers to.
    #[must_use]
    pub fn last_frame(&self) -> Option<u64> {
        let pokes = self.pokes.iter().map(|p| p.frame);
        let infections = self.infections.iter().map(|i| i.frame);
        let pauses = self.pauses.iter().map(|w| w.to - 1);
        pokes.chain(infections).chain(pauses).max()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_poke() {
        let poke: PokeEvent = "3,4@10".parse().unwrap();
        assert_eq!(poke.coord, Coord::xy(3, 4));
        assert_eq!(poke.frame, 10);
        assert_eq!(poke.delta, None);

        let poke: PokeEvent = "1,2,3,4@0:-2.5".parse().unwrap();
        assert_eq!(poke.coord, Coord::xyzw(1, 2, 3, 4));
        assert_eq!(poke.delta, Some(-2.5));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "3,4".parse::<PokeEvent>(),
            Err(ScriptError::MissingFrame("3,4".to_string()))
        );
        assert!(matches!(
            "3@1".parse::<InfectEvent>(),
            Err(ScriptError::InvalidCoord(_))
        ));
        assert!(matches!(
            "1,1@x".parse::<InfectEvent>(),
            Err(ScriptError::InvalidNumber { field: "frame", .. })
        ));
        assert!(matches!(
            "5..5".parse::<PauseWindow>(),
            Err(ScriptError::InvalidWindow(_))
        ));
    }

    #[test]
    fn test_input_for_frame() {
        let script = InputScript {
            pokes: vec!["1,1@2".parse().unwrap(), "2,2@3:0.5".parse().unwrap()],
            infections: vec!["0,0@2".parse().unwrap()],
            pauses: vec!["3..5".parse().unwrap()],
        };
        assert_eq!(script.input_for(0, Dimensionality::Two), TickInput::idle());
        assert_eq!(
            script.input_for(2, Dimensionality::Three),
            TickInput::poke(Coord::xy(1, 1), 2.0)
        );
        // Pause wins over a poke in the same frame.
        assert!(script.input_for(3, Dimensionality::Two).paused);
        assert!(!script.input_for(5, Dimensionality::Two).paused);
        assert_eq!(script.infections_at(2).count(), 1);
        assert_eq!(script.last_frame(), Some(4));
    }

    #[test]
    fn test_validate() {
        let mut script = InputScript {
            pokes: vec!["1,1@2".parse().unwrap()],
            ..Default::default()
        };
        assert!(script.validate(Dimensionality::Two).is_ok());
        assert!(matches!(
            script.validate(Dimensionality::Three),
            Err(ScriptError::DimensionMismatch { .. })
        ));

        script.pokes.push("0,1@2".parse().unwrap());
        assert_eq!(
            script.validate(Dimensionality::Two),
            Err(ScriptError::DuplicatePoke(2))
        );
    }
}
