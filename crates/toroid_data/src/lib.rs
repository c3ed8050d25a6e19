//! Core data structures for the toroid lattice engine.
//!
//! Everything in this crate is plain data: the per-cell record, the lattice
//! shape descriptors and the per-tick input snapshot. Behaviour lives in
//! `toroid_core`.

pub mod data;

pub use data::cell::CellState;
pub use data::input::TickInput;
pub use data::lattice::{Coord, Dimensionality, MAX_AXES};
