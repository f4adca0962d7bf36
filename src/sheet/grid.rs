//! Slot grid of a perforated label sheet
//!
//! Label stock is cut into blocks: three column groups across the page and
//! eight row groups down it. Slots are laid out independently inside each
//! group, starting just inside the group's margins and stepping by the slot
//! pitch, so the grid is not uniform across group boundaries.

use std::collections::BTreeSet;
use std::ops::Range;

use super::config::{to_units, SheetConfig};
use super::error::{Axis, SheetError};

/// Top-left anchor of one key slot, in drawing units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridPosition {
    pub x: i64,
    pub y: i64,
}

impl GridPosition {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Slot geometry along one page axis. Lengths are in millimetres.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisGeometry {
    /// Length of the page along this axis
    pub extent: f64,

    /// Number of equal groups the page is cut into
    pub groups: u32,

    /// Distance between consecutive slots of a group
    pub pitch: f64,

    /// Margin before the first slot of the first group
    pub leading_margin: f64,

    /// Margin after the last group
    pub trailing_margin: f64,

    /// Margin on both sides of every boundary between two groups
    pub inner_margin: f64,

    /// Margin at the end of the first group, when it differs from `inner_margin`
    pub first_gutter: Option<f64>,

    /// Margin at the start of the last group, when it differs from `inner_margin`
    pub last_gutter: Option<f64>,
}

impl AxisGeometry {
    /// Create an axis without margins
    pub fn new(extent: f64, groups: u32, pitch: f64) -> Self {
        Self {
            extent,
            groups,
            pitch,
            leading_margin: 0.0,
            trailing_margin: 0.0,
            inner_margin: 0.0,
            first_gutter: None,
            last_gutter: None,
        }
    }

    /// Columns of A4 stock: three blocks of five 13 mm slots
    pub fn a4_columns() -> Self {
        Self::new(210.0, 3, 13.0)
            .with_page_margins(6.0, 6.0)
            .with_inner_margin(4.5)
            .with_first_gutter(2.5)
            .with_last_gutter(2.5)
    }

    /// Rows of A4 stock: eight blocks of 12 mm slots below a 12 mm header
    pub fn a4_rows() -> Self {
        Self::new(297.0, 8, 12.0)
            .with_page_margins(12.0, 1.0)
            .with_inner_margin(1.0)
            .with_first_gutter(4.5)
    }

    pub fn with_page_margins(mut self, leading: f64, trailing: f64) -> Self {
        self.leading_margin = leading;
        self.trailing_margin = trailing;
        self
    }

    pub fn with_inner_margin(mut self, margin: f64) -> Self {
        self.inner_margin = margin;
        self
    }

    pub fn with_first_gutter(mut self, margin: f64) -> Self {
        self.first_gutter = Some(margin);
        self
    }

    pub fn with_last_gutter(mut self, margin: f64) -> Self {
        self.last_gutter = Some(margin);
        self
    }

    /// Margins (start, end) of group `index`
    fn group_margins(&self, index: u32) -> (f64, f64) {
        let last = self.groups - 1;
        let start = if index == 0 {
            self.leading_margin
        } else if index == last {
            self.last_gutter.unwrap_or(self.inner_margin)
        } else {
            self.inner_margin
        };
        let end = if index == last {
            self.trailing_margin
        } else if index == 0 {
            self.first_gutter.unwrap_or(self.inner_margin)
        } else {
            self.inner_margin
        };
        (start, end)
    }

    /// Half-open slot ranges of every group, in drawing units
    pub fn group_ranges(
        &self,
        axis: Axis,
        density: f64,
    ) -> Result<Vec<Range<i64>>, SheetError> {
        if self.groups == 0 {
            return Err(SheetError::invalid_geometry(axis, "no groups"));
        }
        let margins = [
            self.leading_margin,
            self.trailing_margin,
            self.inner_margin,
            self.first_gutter.unwrap_or(0.0),
            self.last_gutter.unwrap_or(0.0),
        ];
        if margins.iter().any(|m| *m < 0.0) {
            return Err(SheetError::invalid_geometry(axis, "negative margin"));
        }

        let group = to_units(self.extent / f64::from(self.groups), density);
        (0..self.groups)
            .map(|index| {
                let (start_margin, end_margin) = self.group_margins(index);
                let offset = i64::from(index) * group;
                let start = offset + to_units(start_margin, density);
                let end = offset + group - to_units(end_margin, density);
                if start >= end {
                    return Err(SheetError::invalid_geometry(
                        axis,
                        format!(
                            "margins of group {} exceed its span ({} >= {})",
                            index + 1,
                            start,
                            end
                        ),
                    ));
                }
                Ok(start..end)
            })
            .collect()
    }

    /// Sorted, deduplicated slot coordinates along this axis
    pub fn slots(&self, axis: Axis, density: f64) -> Result<Vec<i64>, SheetError> {
        let pitch = to_units(self.pitch, density);
        if pitch <= 0 {
            return Err(SheetError::invalid_geometry(
                axis,
                format!("pitch {} mm is below one drawing unit", self.pitch),
            ));
        }
        let step = pitch as usize;

        let mut slots = BTreeSet::new();
        for range in self.group_ranges(axis, density)? {
            slots.extend(range.step_by(step));
        }
        Ok(slots.into_iter().collect())
    }
}

/// All slot positions of the sheet, row by row, left to right
pub fn generate_grid(config: &SheetConfig) -> Result<Vec<GridPosition>, SheetError> {
    let density = config.density();
    let columns = config.columns.slots(Axis::Columns, density)?;
    let rows = config.rows.slots(Axis::Rows, density)?;

    Ok(rows
        .iter()
        .flat_map(|&y| columns.iter().map(move |&x| GridPosition::new(x, y)))
        .collect())
}
