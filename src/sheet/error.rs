//! Error types for sheet geometry and key placement

use std::fmt;

use thiserror::Error;

use crate::style::StyleError;

/// Page axis a geometry error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Columns,
    Rows,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Columns => f.write_str("columns"),
            Axis::Rows => f.write_str("rows"),
        }
    }
}

/// Errors that can occur while computing the grid or placing keys on it
#[derive(Debug, Error)]
pub enum SheetError {
    /// Axis parameters that produce an empty or inverted slot range
    #[error("invalid {axis} geometry: {reason}")]
    InvalidGeometry { axis: Axis, reason: String },

    /// The keymap needs more positions than the sheet provides
    #[error(
        "not enough grid positions {}: needed {needed}, {available} left",
        describe_pass(pass)
    )]
    InsufficientPositions {
        /// 1-based pass number, `None` while skipping the reserved header area
        pass: Option<usize>,
        needed: usize,
        available: usize,
    },

    /// A legend could not be styled
    #[error(transparent)]
    Style(#[from] StyleError),
}

impl SheetError {
    /// Create an invalid geometry error
    pub fn invalid_geometry(axis: Axis, reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            axis,
            reason: reason.into(),
        }
    }

    /// Create an insufficient positions error
    pub fn insufficient(pass: Option<usize>, needed: usize, available: usize) -> Self {
        Self::InsufficientPositions {
            pass,
            needed,
            available,
        }
    }
}

fn describe_pass(pass: &Option<usize>) -> String {
    match pass {
        Some(n) => format!("in pass {}", n),
        None => "for the reserved header area".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_geometry_display() {
        let err = SheetError::invalid_geometry(Axis::Rows, "group 3 is empty");
        assert_eq!(err.to_string(), "invalid rows geometry: group 3 is empty");
    }

    #[test]
    fn test_insufficient_positions_display() {
        let err = SheetError::insufficient(Some(5), 1, 0);
        assert_eq!(
            err.to_string(),
            "not enough grid positions in pass 5: needed 1, 0 left"
        );

        let err = SheetError::insufficient(None, 30, 12);
        assert!(err.to_string().contains("reserved header area"));
    }
}
