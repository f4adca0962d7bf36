//! Physical geometry of the label sheet

use super::grid::AxisGeometry;
use super::queue::AlignmentRule;

/// Millimetres per inch
pub const MM_PER_INCH: f64 = 25.4;

/// Configuration of the printed sheet. Lengths are in millimetres and are
/// converted to drawing units with [`SheetConfig::density`].
#[derive(Debug, Clone, PartialEq)]
pub struct SheetConfig {
    /// Print density in dots per inch
    pub dpi: f64,

    /// Page size (width, height)
    pub page_size: (f64, f64),

    /// Printed keycap size (width, height)
    pub key_size: (f64, f64),

    /// Bezel margin around each key cell
    pub key_margin: f64,

    /// Width of the cut lines drawn along each key edge
    pub border_width: f64,

    /// Color of the cut lines
    pub border_color: String,

    /// Inset of an image legend from the cell's top-left corner, as a fraction of the cell
    pub image_inset: f64,

    /// Size of an image legend, as a fraction of the cell
    pub image_scale: f64,

    /// Column slots
    pub columns: AxisGeometry,

    /// Row slots
    pub rows: AxisGeometry,

    /// Positions skipped before the first pass (header strip of the sheet)
    pub leading_skip: usize,

    /// Gap rule applied after each pass
    pub alignment: AlignmentRule,
}

impl Default for SheetConfig {
    fn default() -> Self {
        Self {
            dpi: 300.0,
            page_size: (210.0, 297.0),
            key_size: (11.0, 11.0),
            key_margin: 1.0,
            border_width: 0.3,
            border_color: "black".to_string(),
            image_inset: 0.2,
            image_scale: 0.6,
            columns: AxisGeometry::a4_columns(),
            rows: AxisGeometry::a4_rows(),
            leading_skip: 30,
            alignment: AlignmentRule::default(),
        }
    }
}

impl SheetConfig {
    /// Create a configuration for A4 label stock printed at 300 dpi
    pub fn new() -> Self {
        Self::default()
    }

    /// Drawing units per millimetre
    pub fn density(&self) -> f64 {
        self.dpi / MM_PER_INCH
    }

    /// Convert a length to drawing units
    pub fn px(&self, mm: f64) -> f64 {
        mm * self.density()
    }

    /// Convert a length to whole drawing units, truncating
    pub fn units(&self, mm: f64) -> i64 {
        to_units(mm, self.density())
    }

    /// Page width in drawing units
    pub fn page_width(&self) -> f64 {
        self.px(self.page_size.0)
    }

    /// Page height in drawing units
    pub fn page_height(&self) -> f64 {
        self.px(self.page_size.1)
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = dpi;
        self
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_size = (width, height);
        self
    }

    pub fn with_key_size(mut self, width: f64, height: f64) -> Self {
        self.key_size = (width, height);
        self
    }

    pub fn with_key_margin(mut self, margin: f64) -> Self {
        self.key_margin = margin;
        self
    }

    pub fn with_border_width(mut self, width: f64) -> Self {
        self.border_width = width;
        self
    }

    pub fn with_columns(mut self, columns: AxisGeometry) -> Self {
        self.columns = columns;
        self
    }

    pub fn with_rows(mut self, rows: AxisGeometry) -> Self {
        self.rows = rows;
        self
    }

    pub fn with_leading_skip(mut self, skip: usize) -> Self {
        self.leading_skip = skip;
        self
    }

    pub fn with_alignment(mut self, alignment: AlignmentRule) -> Self {
        self.alignment = alignment;
        self
    }
}

/// Truncate a length to whole drawing units
pub(crate) fn to_units(mm: f64, density: f64) -> i64 {
    (mm * density).trunc() as i64
}
