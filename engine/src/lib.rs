//! A live cell dies if it has fewer than two live neighbors.
//! A live cell with two or three live neighbors lives on to the next generation.
//! A live cell with more than three live neighbors dies.
//! A dead cell will be brought back to live if it has exactly three live neighbors.
//!
//! The grid is a torus: every edge wraps around to the opposite one.

pub mod config;
pub mod controller;
pub mod error;
pub mod grid;
pub mod neighbors;
pub mod stepper;

pub use config::{Density, LifeConfig, SpeedConfig, Viewport};
pub use controller::SimulationController;
pub use error::{LifeError, Result};
pub use grid::{CellState, Grid};
pub use stepper::GenerationStepper;
