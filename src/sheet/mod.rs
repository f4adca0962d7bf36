//! Sheet geometry and key placement
//!
//! This module computes the slot grid of the label stock and drives the
//! passes that place every key of a keymap onto it.

pub mod assembler;
pub mod config;
pub mod error;
pub mod grid;
pub mod queue;

pub use assembler::{Assembler, AssemblyReport};
pub use config::{SheetConfig, MM_PER_INCH};
pub use error::{Axis, SheetError};
pub use grid::{generate_grid, AxisGeometry, GridPosition};
pub use queue::{AlignmentRule, PositionQueue};
