//! Headless front end for the toroid lattice engine.
//!
//! `model` re-exports the engine crates under one roof; `app` drives a
//! simulation from scripted input and reports on the run.

pub mod app;
pub mod model;
