//! Keycap Sheet - printable keycap labels on perforated label stock
//!
//! This library lays out the keys of a keymap on the slot grid of an A4
//! label sheet and renders every key as an SVG cell with its legends.
//!
//! # Example
//!
//! ```rust
//! use keycap_sheet::{generate, Keymap};
//!
//! let keymap = Keymap::embedded().unwrap();
//! let svg = generate(&keymap).unwrap();
//! assert!(svg.contains("<svg"));
//! ```

pub mod keymap;
pub mod renderer;
pub mod sheet;
pub mod style;

use std::path::{Path, PathBuf};

use thiserror::Error;

pub use keymap::{Key, Keymap, KeymapError, Legend};
pub use renderer::{KeyRenderer, SvgBuilder, SvgConfig};
pub use sheet::{
    generate_grid, AlignmentRule, Assembler, AssemblyReport, AxisGeometry, GridPosition,
    PositionQueue, SheetConfig, SheetError,
};
pub use style::{ColorScheme, LabelStyle, StyleError, StyleOptions, StyleRegistry, TextAnchor};

/// Errors that can occur while generating a sheet
#[derive(Debug, Error)]
pub enum GenerateError {
    /// The keymap could not be loaded
    #[error("keymap error: {0}")]
    Keymap(#[from] KeymapError),

    /// The keymap does not fit the sheet geometry
    #[error("sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// The output file could not be written
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Configuration for the complete generation pipeline
#[derive(Debug, Clone, Default)]
pub struct GenerateConfig {
    /// Physical sheet geometry
    pub sheet: SheetConfig,
    /// SVG output configuration
    pub svg: SvgConfig,
}

impl GenerateConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the sheet configuration
    pub fn with_sheet(mut self, sheet: SheetConfig) -> Self {
        self.sheet = sheet;
        self
    }

    /// Set the SVG configuration
    pub fn with_svg(mut self, svg: SvgConfig) -> Self {
        self.svg = svg;
        self
    }
}

/// A rendered sheet and how its positions were used
#[derive(Debug, Clone)]
pub struct GeneratedSheet {
    pub svg: String,
    pub report: AssemblyReport,
}

/// Render a keymap to SVG with the default A4 sheet
pub fn generate(keymap: &Keymap) -> Result<String, GenerateError> {
    generate_with_config(keymap, &GenerateConfig::default()).map(|sheet| sheet.svg)
}

/// Render a keymap to SVG with a custom configuration
///
/// # Example
///
/// ```rust
/// use keycap_sheet::{generate_with_config, GenerateConfig, Keymap, SvgConfig};
///
/// let config = GenerateConfig::new().with_svg(SvgConfig::new().with_pretty_print(false));
/// let sheet = generate_with_config(&Keymap::embedded().unwrap(), &config).unwrap();
/// assert_eq!(sheet.report.remaining, 0);
/// ```
pub fn generate_with_config(
    keymap: &Keymap,
    config: &GenerateConfig,
) -> Result<GeneratedSheet, GenerateError> {
    let mut positions = PositionQueue::new(generate_grid(&config.sheet)?);
    let mut page = SvgBuilder::new(config.svg.clone());

    let report = Assembler::from_sheet(&config.sheet).run(keymap, &mut positions, &mut page)?;

    let svg = page.build(config.sheet.page_width(), config.sheet.page_height());
    Ok(GeneratedSheet { svg, report })
}

/// Render a keymap and write the SVG document to `path`
///
/// Nothing is written if rendering fails.
pub fn write_sheet(
    path: &Path,
    keymap: &Keymap,
    config: &GenerateConfig,
) -> Result<AssemblyReport, GenerateError> {
    let sheet = generate_with_config(keymap, config)?;
    std::fs::write(path, sheet.svg.as_bytes()).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(sheet.report)
}
