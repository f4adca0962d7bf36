//! Label styles and color schemes
//!
//! Every text legend is tagged with a category name that resolves to a
//! [`LabelStyle`]: where the legend sits inside its key cell and how it is
//! painted. A [`ColorScheme`] owns a complete, immutable [`StyleRegistry`] so
//! switching from the dark passes to the light passes never touches the
//! styles used by earlier passes.

use std::collections::HashMap;
use std::fmt;

use serde::Deserialize;
use thiserror::Error;

/// Category reserved for embedded image legends; never present in a registry
pub const IMAGE_CATEGORY: &str = "image";

/// Errors raised while building or querying a style registry
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StyleError {
    /// A legend or fill override references a category that was never registered
    #[error("unknown label category '{category}'")]
    UnknownCategory { category: String },

    /// A fractional offset lies outside the key cell
    #[error("offset {axis} = {value} of category '{category}' is outside [0, 1]")]
    InvalidOffset {
        category: String,
        axis: char,
        value: f64,
    },

    /// Attempt to register a style under the image category
    #[error("category '{0}' is reserved for embedded images")]
    ReservedCategory(String),
}

impl StyleError {
    /// Create an unknown category error
    pub fn unknown(category: impl Into<String>) -> Self {
        Self::UnknownCategory {
            category: category.into(),
        }
    }
}

/// Horizontal anchoring of a text legend around its position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    #[default]
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

impl fmt::Display for TextAnchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paint attributes of a text legend
#[derive(Debug, Clone, PartialEq)]
pub struct StyleOptions {
    pub font_family: String,
    /// CSS font size, kept verbatim (e.g. `4.4em`)
    pub font_size: String,
    pub fill: String,
    pub text_anchor: TextAnchor,
    pub dominant_baseline: String,
}

impl Default for StyleOptions {
    fn default() -> Self {
        Self {
            font_family: "Source Han Sans CN Bold".to_string(),
            font_size: "4.4em".to_string(),
            fill: "white".to_string(),
            text_anchor: TextAnchor::Middle,
            dominant_baseline: "middle".to_string(),
        }
    }
}

impl StyleOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_size(mut self, size: impl Into<String>) -> Self {
        self.font_size = size.into();
        self
    }

    pub fn with_fill(mut self, fill: impl Into<String>) -> Self {
        self.fill = fill.into();
        self
    }

    pub fn with_text_anchor(mut self, anchor: TextAnchor) -> Self {
        self.text_anchor = anchor;
        self
    }

    pub fn with_dominant_baseline(mut self, baseline: impl Into<String>) -> Self {
        self.dominant_baseline = baseline.into();
        self
    }
}

/// A registered legend category
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    pub category: String,
    /// Horizontal offset as a fraction of the key width
    pub dx: f64,
    /// Vertical offset as a fraction of the key height
    pub dy: f64,
    pub options: StyleOptions,
}

/// Mapping from category name to label style
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StyleRegistry {
    styles: HashMap<String, LabelStyle>,
}

impl StyleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the style of a category
    pub fn register(
        &mut self,
        category: impl Into<String>,
        dx: f64,
        dy: f64,
        options: StyleOptions,
    ) -> Result<&LabelStyle, StyleError> {
        let category = category.into();
        if category == IMAGE_CATEGORY {
            return Err(StyleError::ReservedCategory(category));
        }
        for (axis, value) in [('x', dx), ('y', dy)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(StyleError::InvalidOffset {
                    category,
                    axis,
                    value,
                });
            }
        }

        let style = LabelStyle {
            category: category.clone(),
            dx,
            dy,
            options,
        };
        self.styles.insert(category.clone(), style);
        Ok(&self.styles[&category])
    }

    /// Look up the style of a category
    pub fn lookup(&self, category: &str) -> Result<&LabelStyle, StyleError> {
        self.styles
            .get(category)
            .ok_or_else(|| StyleError::unknown(category))
    }

    pub fn contains(&self, category: &str) -> bool {
        self.styles.contains_key(category)
    }

    /// Registered category names, sorted
    pub fn categories(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.styles.keys().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names
    }

    pub fn len(&self) -> usize {
        self.styles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.styles.is_empty()
    }

    /// Derive a registry whose fills are `default_fill`, except for the
    /// categories named in `overrides`
    pub fn with_fills(
        &self,
        default_fill: &str,
        overrides: &HashMap<String, String>,
    ) -> Result<StyleRegistry, StyleError> {
        if let Some(category) = overrides.keys().find(|c| !self.contains(c)) {
            return Err(StyleError::unknown(category.clone()));
        }

        let styles = self
            .styles
            .iter()
            .map(|(category, style)| {
                let fill = overrides
                    .get(category)
                    .map(String::as_str)
                    .unwrap_or(default_fill);
                let mut style = style.clone();
                style.options.fill = fill.to_string();
                (category.clone(), style)
            })
            .collect();

        Ok(StyleRegistry { styles })
    }
}

/// One color scheme: the cell background, the legend styles and how many
/// passes over the keymap are printed with it
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScheme {
    pub name: String,
    pub background: String,
    pub passes: usize,
    pub styles: StyleRegistry,
}

impl ColorScheme {
    pub fn new(
        name: impl Into<String>,
        background: impl Into<String>,
        passes: usize,
        styles: StyleRegistry,
    ) -> Self {
        Self {
            name: name.into(),
            background: background.into(),
            passes,
            styles,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn altgr_registry() -> StyleRegistry {
        let base = StyleOptions::default();
        let altgr = base
            .clone()
            .with_text_anchor(TextAnchor::End)
            .with_font_family("Verdana")
            .with_fill("#ff6666");

        let mut registry = StyleRegistry::new();
        registry.register("digits", 0.22, 0.87, base).unwrap();
        registry.register("altgr", 0.96, 0.87, altgr.clone()).unwrap();
        registry.register("altgrshift", 0.96, 0.39, altgr).unwrap();
        registry
    }

    #[test]
    fn test_default_options() {
        let options = StyleOptions::default();
        assert_eq!(options.font_family, "Source Han Sans CN Bold");
        assert_eq!(options.font_size, "4.4em");
        assert_eq!(options.text_anchor, TextAnchor::Middle);
        assert_eq!(options.dominant_baseline, "middle");
    }

    #[test]
    fn test_lookup_registered_category() {
        let registry = altgr_registry();
        let style = registry.lookup("altgr").unwrap();
        assert_eq!(style.dx, 0.96);
        assert_eq!(style.options.text_anchor, TextAnchor::End);
        assert_eq!(style.options.font_family, "Verdana");
    }

    #[test]
    fn test_cloned_options_do_not_leak() {
        let registry = altgr_registry();
        let digits = registry.lookup("digits").unwrap();
        assert_eq!(digits.options.text_anchor, TextAnchor::Middle);
        assert_eq!(digits.options.fill, "white");
    }

    #[test]
    fn test_lookup_unknown_category() {
        let registry = altgr_registry();
        let err = registry.lookup("fnkey").unwrap_err();
        assert_eq!(err, StyleError::unknown("fnkey"));
        assert!(err.to_string().contains("fnkey"));
    }

    #[test]
    fn test_image_category_is_reserved() {
        let mut registry = StyleRegistry::new();
        let err = registry
            .register(IMAGE_CATEGORY, 0.5, 0.5, StyleOptions::default())
            .unwrap_err();
        assert!(matches!(err, StyleError::ReservedCategory(_)));
        assert!(registry.lookup(IMAGE_CATEGORY).is_err());
    }

    #[test]
    fn test_offset_outside_cell_rejected() {
        let mut registry = StyleRegistry::new();
        let err = registry
            .register("digits", 1.2, 0.5, StyleOptions::default())
            .unwrap_err();
        assert!(matches!(err, StyleError::InvalidOffset { axis: 'x', .. }));
    }

    #[test]
    fn test_with_fills_applies_overrides() {
        let registry = altgr_registry();
        let overrides = HashMap::from([("altgr".to_string(), "#990000".to_string())]);
        let light = registry.with_fills("black", &overrides).unwrap();

        assert_eq!(light.lookup("digits").unwrap().options.fill, "black");
        assert_eq!(light.lookup("altgr").unwrap().options.fill, "#990000");
        assert_eq!(light.lookup("altgrshift").unwrap().options.fill, "black");
        // The source registry is untouched
        assert_eq!(registry.lookup("altgr").unwrap().options.fill, "#ff6666");
    }

    #[test]
    fn test_with_fills_unknown_override() {
        let registry = altgr_registry();
        let overrides = HashMap::from([("symbol".to_string(), "black".to_string())]);
        let err = registry.with_fills("black", &overrides).unwrap_err();
        assert_eq!(err, StyleError::unknown("symbol"));
    }

    #[test]
    fn test_categories_sorted() {
        let registry = altgr_registry();
        assert_eq!(registry.categories(), vec!["altgr", "altgrshift", "digits"]);
        assert_eq!(registry.len(), 3);
    }
}
