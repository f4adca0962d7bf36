//! SVG generation for key cells

use crate::keymap::{Key, Legend};
use crate::sheet::{GridPosition, SheetConfig};
use crate::style::{ColorScheme, LabelStyle, StyleError, StyleOptions};

use super::SvgConfig;

/// Build an SVG page incrementally, in draw order
pub struct SvgBuilder {
    config: SvgConfig,
    elements: Vec<String>,
}

impl SvgBuilder {
    /// Create a new SVG builder
    pub fn new(config: SvgConfig) -> Self {
        Self {
            config,
            elements: vec![],
        }
    }

    fn indent_str(&self) -> &str {
        if self.config.pretty_print {
            "  "
        } else {
            ""
        }
    }

    fn newline(&self) -> &str {
        if self.config.pretty_print {
            "\n"
        } else {
            ""
        }
    }

    /// Add a filled rectangle
    pub fn add_rect(&mut self, x: f64, y: f64, w: f64, h: f64, fill: &str) {
        self.elements.push(format!(
            r#"{}<rect x="{}" y="{}" width="{}" height="{}" fill="{}"/>"#,
            self.indent_str(),
            x,
            y,
            w,
            h,
            escape_xml(fill)
        ));
    }

    /// Add a stroked line
    pub fn add_line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, stroke: &str, width: f64) {
        self.elements.push(format!(
            r#"{}<line x1="{}" y1="{}" x2="{}" y2="{}" stroke="{}" stroke-width="{}"/>"#,
            self.indent_str(),
            x1,
            y1,
            x2,
            y2,
            escape_xml(stroke),
            width
        ));
    }

    /// Add a text element painted with `options`
    pub fn add_text(&mut self, text: &str, x: f64, y: f64, options: &StyleOptions) {
        self.elements.push(format!(
            r#"{}<text x="{}" y="{}" font-family="{}" font-size="{}" fill="{}" text-anchor="{}" dominant-baseline="{}">{}</text>"#,
            self.indent_str(),
            x,
            y,
            escape_xml(&options.font_family),
            escape_xml(&options.font_size),
            escape_xml(&options.fill),
            options.text_anchor,
            escape_xml(&options.dominant_baseline),
            escape_xml(text)
        ));
    }

    /// Add a reference to an external image
    pub fn add_image(&mut self, href: &str, x: f64, y: f64, w: f64, h: f64) {
        self.elements.push(format!(
            r#"{}<image x="{}" y="{}" width="{}" height="{}" xlink:href="{}"/>"#,
            self.indent_str(),
            x,
            y,
            w,
            h,
            escape_xml(href)
        ));
    }

    /// Number of elements drawn so far
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Build the final SVG string for a page of `width` x `height` drawing units
    pub fn build(self, width: f64, height: f64) -> String {
        let nl = self.newline();

        let mut svg = String::new();

        if self.config.standalone {
            svg.push_str(r#"<?xml version="1.0" encoding="UTF-8"?>"#);
            svg.push_str(nl);
        }

        svg.push_str(&format!(
            r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{}" height="{}" viewBox="0 0 {} {}">"#,
            width, height, width, height
        ));
        svg.push_str(nl);

        for elem in &self.elements {
            svg.push_str(elem);
            svg.push_str(nl);
        }

        svg.push_str("</svg>");

        svg
    }
}

/// A legend with its style resolved, ready to be painted
enum Paint<'a> {
    Text(&'a str, &'a LabelStyle),
    Image(&'a str),
}

/// Draws one key into a cell of fixed size
#[derive(Debug, Clone, PartialEq)]
pub struct KeyRenderer {
    /// Cell size in drawing units
    pub width: f64,
    pub height: f64,
    /// Bezel margin in drawing units
    pub margin: f64,
    pub border_width: f64,
    pub border_color: String,
    pub image_inset: f64,
    pub image_scale: f64,
}

impl KeyRenderer {
    pub fn from_sheet(config: &SheetConfig) -> Self {
        Self {
            width: config.px(config.key_size.0),
            height: config.px(config.key_size.1),
            margin: config.px(config.key_margin),
            border_width: config.px(config.border_width),
            border_color: config.border_color.clone(),
            image_inset: config.image_inset,
            image_scale: config.image_scale,
        }
    }

    /// Draw `key` with its top-left corner at `position`
    ///
    /// The cell background comes first, then the four cut lines, then the
    /// legends from last-declared to first-declared so that earlier legends
    /// are painted on top. Nothing is drawn if a legend's category is not
    /// registered in `scheme`.
    pub fn draw(
        &self,
        page: &mut SvgBuilder,
        scheme: &ColorScheme,
        position: GridPosition,
        key: &Key,
    ) -> Result<(), StyleError> {
        let paints = key
            .legends
            .iter()
            .rev()
            .map(|legend| match legend {
                Legend::Text { text, category } => scheme
                    .styles
                    .lookup(category)
                    .map(|style| Paint::Text(text, style)),
                Legend::Image { href } => Ok(Paint::Image(href)),
            })
            .collect::<Result<Vec<_>, _>>()?;

        let x = position.x as f64;
        let y = position.y as f64;
        let (w, h, m) = (self.width, self.height, self.margin);

        page.add_rect(
            x - 0.8 * m,
            y - 0.3 * m,
            w + 2.0 * 0.8 * m,
            h + 2.0 * 0.3 * m,
            &scheme.background,
        );

        let extend = 2.0 * m;
        let stroke = self.border_color.as_str();
        page.add_line(x, y - extend, x, y + h + extend, stroke, self.border_width);
        page.add_line(x + w, y - extend, x + w, y + h + extend, stroke, self.border_width);
        page.add_line(x - extend, y, x + w + extend, y, stroke, self.border_width);
        page.add_line(x - extend, y + h, x + w + extend, y + h, stroke, self.border_width);

        for paint in paints {
            match paint {
                Paint::Text(text, style) => {
                    page.add_text(text, x + style.dx * w, y + style.dy * h, &style.options);
                }
                Paint::Image(href) => {
                    page.add_image(
                        href,
                        x + self.image_inset * w,
                        y + self.image_inset * h,
                        self.image_scale * w,
                        self.image_scale * h,
                    );
                }
            }
        }

        Ok(())
    }
}

/// Escape special XML characters
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
