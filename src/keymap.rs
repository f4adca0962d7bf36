//! Keymap data: keys, their legends, and the styles they are printed with
//!
//! A keymap is plain data. It is written in TOML and carries three tables:
//! the legend styles (`[base]` and `[styles.<category>]`), the color schemes
//! (`[[schemes]]`) and the ordered key list (`[[keys]]`). The default keymap
//! is embedded in the binary; the renderer never depends on its contents.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

use crate::style::{
    ColorScheme, StyleError, StyleOptions, StyleRegistry, TextAnchor, IMAGE_CATEGORY,
};

/// The keymap shipped with the binary
const DEFAULT_KEYMAP: &str = include_str!("../keymaps/default.toml");

/// Errors that can occur when loading a keymap
#[derive(Error, Debug)]
pub enum KeymapError {
    #[error("failed to parse keymap TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error("keymap defines no color scheme")]
    NoSchemes,
}

/// A single printed legend of a key
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "TomlLegend")]
pub enum Legend {
    /// Text painted with the style registered for `category`
    Text { text: String, category: String },
    /// External image asset, referenced by relative link
    Image { href: String },
}

impl Legend {
    pub fn text(text: impl Into<String>, category: impl Into<String>) -> Self {
        Legend::Text {
            text: text.into(),
            category: category.into(),
        }
    }

    pub fn image(href: impl Into<String>) -> Self {
        Legend::Image { href: href.into() }
    }

    /// The string carried by the legend: its glyphs or its asset path
    pub fn value(&self) -> &str {
        match self {
            Legend::Text { text, .. } => text,
            Legend::Image { href } => href,
        }
    }
}

#[derive(Deserialize)]
struct TomlLegend {
    text: String,
    category: String,
}

impl From<TomlLegend> for Legend {
    fn from(legend: TomlLegend) -> Self {
        if legend.category == IMAGE_CATEGORY {
            Legend::Image { href: legend.text }
        } else {
            Legend::Text {
                text: legend.text,
                category: legend.category,
            }
        }
    }
}

/// One keycap. Legends are declared in paint priority: the first one ends
/// up on top. A key without legends is printed as a blank cap.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Key {
    #[serde(default)]
    pub legends: Vec<Legend>,
}

impl Key {
    pub fn new(legends: Vec<Legend>) -> Self {
        Self { legends }
    }

    pub fn blank() -> Self {
        Self::default()
    }

    pub fn is_blank(&self) -> bool {
        self.legends.is_empty()
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<&str> = self.legends.iter().map(Legend::value).collect();
        f.write_str(&values.join(" "))
    }
}

/// A complete keymap: keys in print order plus the color schemes whose
/// passes print them
#[derive(Debug, Clone, PartialEq)]
pub struct Keymap {
    pub name: Option<String>,
    pub keys: Vec<Key>,
    pub schemes: Vec<ColorScheme>,
}

#[derive(Deserialize)]
struct TomlKeymap {
    metadata: Option<TomlMetadata>,
    #[serde(default)]
    base: TomlStyleOptions,
    #[serde(default)]
    styles: BTreeMap<String, TomlStyle>,
    #[serde(default)]
    schemes: Vec<TomlScheme>,
    #[serde(default)]
    keys: Vec<Key>,
}

#[derive(Deserialize)]
struct TomlMetadata {
    name: Option<String>,
}

#[derive(Deserialize, Default)]
struct TomlStyleOptions {
    font_family: Option<String>,
    font_size: Option<String>,
    text_anchor: Option<TextAnchor>,
    dominant_baseline: Option<String>,
}

impl TomlStyleOptions {
    fn apply(&self, mut options: StyleOptions) -> StyleOptions {
        if let Some(family) = &self.font_family {
            options = options.with_font_family(family.as_str());
        }
        if let Some(size) = &self.font_size {
            options = options.with_font_size(size.as_str());
        }
        if let Some(anchor) = self.text_anchor {
            options = options.with_text_anchor(anchor);
        }
        if let Some(baseline) = &self.dominant_baseline {
            options = options.with_dominant_baseline(baseline.as_str());
        }
        options
    }
}

#[derive(Deserialize)]
struct TomlStyle {
    dx: f64,
    dy: f64,
    font_family: Option<String>,
    font_size: Option<String>,
    text_anchor: Option<TextAnchor>,
    dominant_baseline: Option<String>,
}

impl TomlStyle {
    fn overrides(&self) -> TomlStyleOptions {
        TomlStyleOptions {
            font_family: self.font_family.clone(),
            font_size: self.font_size.clone(),
            text_anchor: self.text_anchor,
            dominant_baseline: self.dominant_baseline.clone(),
        }
    }
}

#[derive(Deserialize)]
struct TomlScheme {
    name: String,
    passes: usize,
    background: String,
    fill: String,
    #[serde(default)]
    fills: HashMap<String, String>,
}

impl Keymap {
    pub fn new(keys: Vec<Key>, schemes: Vec<ColorScheme>) -> Self {
        Self {
            name: None,
            keys,
            schemes,
        }
    }

    /// The keymap embedded in the binary
    pub fn embedded() -> Result<Self, KeymapError> {
        Self::from_str(DEFAULT_KEYMAP)
    }

    /// Load a keymap from a TOML string
    ///
    /// Every text legend must name a category defined under `[styles]`;
    /// the first one that does not is reported as
    /// [`StyleError::UnknownCategory`].
    pub fn from_str(content: &str) -> Result<Self, KeymapError> {
        let parsed: TomlKeymap = toml::from_str(content)?;

        let base = parsed.base.apply(StyleOptions::default());
        let mut registry = StyleRegistry::new();
        for (category, style) in &parsed.styles {
            let options = style.overrides().apply(base.clone());
            registry.register(category.as_str(), style.dx, style.dy, options)?;
        }

        if parsed.schemes.is_empty() {
            return Err(KeymapError::NoSchemes);
        }
        let schemes = parsed
            .schemes
            .iter()
            .map(|scheme| {
                let styles = registry.with_fills(&scheme.fill, &scheme.fills)?;
                Ok(ColorScheme::new(
                    scheme.name.as_str(),
                    scheme.background.as_str(),
                    scheme.passes,
                    styles,
                ))
            })
            .collect::<Result<Vec<_>, StyleError>>()?;

        let keymap = Keymap {
            name: parsed.metadata.and_then(|m| m.name),
            keys: parsed.keys,
            schemes,
        };
        keymap.validate()?;
        Ok(keymap)
    }

    /// Check every text legend against every scheme's registry
    pub fn validate(&self) -> Result<(), StyleError> {
        for scheme in &self.schemes {
            for legend in self.keys.iter().flat_map(|k| &k.legends) {
                if let Legend::Text { category, .. } = legend {
                    scheme.styles.lookup(category)?;
                }
            }
        }
        Ok(())
    }

    /// Total number of passes over the key list
    pub fn total_passes(&self) -> usize {
        self.schemes.iter().map(|s| s.passes).sum()
    }

    /// Number of grid positions the keymap consumes, before alignment gaps
    pub fn placements(&self) -> usize {
        self.keys.len() * self.total_passes()
    }
}
