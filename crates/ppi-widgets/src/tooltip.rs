#![forbid(unsafe_code)]

//! Pointer-anchored tooltip.
//!
//! A lightweight floating box positioned relative to the pointer, flipped
//! above the anchor when there is no room below and shifted horizontally
//! to stay inside the viewport.

use crate::surface::{Rect, Style, Surface};

/// Gap between the pointer cell and the tooltip box.
const POINTER_GAP: u16 = 1;

#[derive(Debug, Clone, Copy)]
pub struct Tooltip {
    /// Pointer column.
    pub anchor_x: u16,
    /// Pointer row.
    pub anchor_y: u16,
    /// Content width in cells.
    pub width: u16,
}

impl Tooltip {
    pub const fn new(anchor_x: u16, anchor_y: u16) -> Self {
        Self {
            anchor_x,
            anchor_y,
            width: 24,
        }
    }

    #[must_use]
    pub const fn width(mut self, width: u16) -> Self {
        self.width = width;
        self
    }

    /// Where the box lands for `height` content rows, or `None` when the
    /// viewport cannot fit it at all.
    pub fn compute_area(&self, viewport: Rect, height: u16) -> Option<Rect> {
        if height == 0 || self.width == 0 {
            return None;
        }
        if viewport.width < self.width || viewport.height < height {
            return None;
        }

        // Prefer below the pointer; flip above when the bottom would clip.
        // Saturating throughout: anchors are not trusted to be in range.
        let below_y = self.anchor_y.saturating_add(POINTER_GAP + 1);
        let y = if below_y.saturating_add(height) <= viewport.bottom() {
            below_y
        } else {
            self.anchor_y
                .saturating_sub(height)
                .saturating_sub(POINTER_GAP)
        };
        let y = y.clamp(viewport.y, viewport.bottom() - height);

        // Shift left as needed to keep the right edge inside the viewport.
        let max_x = viewport.right() - self.width;
        let x = self.anchor_x.min(max_x).max(viewport.x);

        Some(Rect::new(x, y, self.width, height))
    }

    /// Render the given lines at the computed position.
    ///
    /// Returns the area used, or `None` when the tooltip could not fit
    /// (in which case nothing is drawn).
    pub fn render_lines(
        &self,
        viewport: Rect,
        surface: &mut Surface,
        lines: &[&str],
        style: Style,
    ) -> Option<Rect> {
        let area = self.compute_area(viewport, lines.len() as u16)?;
        surface.fill(area, ' ', style);
        for (i, line) in lines.iter().enumerate() {
            surface.set_str(area.x, area.y + i as u16, line, style);
        }
        Some(area)
    }
}
