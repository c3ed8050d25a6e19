pub mod cell;
pub mod input;
pub mod lattice;
