//! Pass-by-pass placement of a keymap onto the sheet
//!
//! Each color scheme prints the whole key list `passes` times. Keys take
//! grid positions in order; after each pass the queue is realigned to a
//! perforation boundary. Positions are shared across all passes, so a
//! later pass starts where the previous one stopped.

use tracing::{debug, info};

use crate::keymap::Keymap;
use crate::renderer::{KeyRenderer, SvgBuilder};

use super::error::SheetError;
use super::queue::{AlignmentRule, PositionQueue};
use super::SheetConfig;

/// Summary of one assembled sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AssemblyReport {
    /// Passes completed
    pub passes: usize,
    /// Keys drawn, over all passes
    pub placements: usize,
    /// Positions dropped by the header skip and the alignment gaps
    pub discarded: usize,
    /// Positions left unused at the end
    pub remaining: usize,
}

/// Drives the placement of every pass of a keymap
#[derive(Debug, Clone)]
pub struct Assembler {
    renderer: KeyRenderer,
    leading_skip: usize,
    alignment: AlignmentRule,
}

impl Assembler {
    pub fn new(renderer: KeyRenderer, leading_skip: usize, alignment: AlignmentRule) -> Self {
        Self {
            renderer,
            leading_skip,
            alignment,
        }
    }

    pub fn from_sheet(config: &SheetConfig) -> Self {
        Self::new(
            KeyRenderer::from_sheet(config),
            config.leading_skip,
            config.alignment,
        )
    }

    /// Place every pass of `keymap` on `page`, consuming `positions`
    pub fn run(
        &self,
        keymap: &Keymap,
        positions: &mut PositionQueue,
        page: &mut SvgBuilder,
    ) -> Result<AssemblyReport, SheetError> {
        keymap.validate()?;
        debug!(
            keymap = keymap.name.as_deref().unwrap_or("unnamed"),
            placements = keymap.placements(),
            available = positions.remaining(),
            "assembling"
        );

        let mut report = AssemblyReport::default();

        if !positions.skip(self.leading_skip) {
            return Err(SheetError::insufficient(
                None,
                self.leading_skip,
                positions.remaining(),
            ));
        }
        report.discarded += self.leading_skip;

        let passes = keymap
            .schemes
            .iter()
            .flat_map(|scheme| std::iter::repeat(scheme).take(scheme.passes));

        for (index, scheme) in passes.enumerate() {
            let pass = index + 1;

            for key in &keymap.keys {
                let position = positions
                    .pop()
                    .ok_or_else(|| SheetError::insufficient(Some(pass), 1, 0))?;
                debug!(pass, x = position.x, y = position.y, "key {}", key);
                self.renderer.draw(page, scheme, position, key)?;
                report.placements += 1;
            }

            let dropped = positions.align(&self.alignment);
            report.discarded += dropped;
            report.passes += 1;

            info!(
                pass,
                scheme = %scheme.name,
                keys = keymap.keys.len(),
                dropped,
                remaining = positions.remaining(),
                "pass complete"
            );
        }

        report.remaining = positions.remaining();
        Ok(report)
    }
}
