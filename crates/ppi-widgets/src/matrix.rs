#![forbid(unsafe_code)]

//! Vendor/SKU coverage matrix.
//!
//! Vendors as rows, SKUs as columns. Each cell shows the price when the
//! vendor covers the SKU, a best-price highlight for rank 1, a primary
//! supplier mark, or an empty placeholder. Column headers flag
//! single-source SKUs; each row tails off with the vendor's coverage
//! percentage and best-price count. Aggregates are recomputed from the
//! full matrix on every render.

use ahash::AHashMap;
use ppi_core::color::Rgb;
use ppi_core::interaction::HoverState;
use ppi_core::model::{MatrixCell, Sku, Vendor};
use ppi_core::stats::{
    VendorSort, single_source_flags, sort_vendor_indices, vendor_aggregates,
};

use crate::surface::{Rect, Style, Surface};
use crate::StatefulWidget;

const BEST_PRICE_COLOR: Rgb = Rgb(0x2e, 0x7d, 0x32);
const SINGLE_SOURCE_COLOR: Rgb = Rgb(0xf9, 0xa8, 0x25);

/// What a pointer position resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixHit {
    /// A vendor row label; indexes into the widget's vendor slice.
    Vendor(usize),
    /// A SKU column header; indexes into the widget's SKU slice.
    Sku(usize),
    /// One vendor/SKU pairing.
    Cell { vendor: usize, sku: usize },
}

#[derive(Debug, Clone)]
pub struct CoverageMatrix<'a> {
    vendors: &'a [Vendor],
    skus: &'a [Sku],
    cells: &'a [MatrixCell],
    name_width: u16,
    col_width: u16,
}

impl<'a> CoverageMatrix<'a> {
    pub fn new(vendors: &'a [Vendor], skus: &'a [Sku], cells: &'a [MatrixCell]) -> Self {
        Self {
            vendors,
            skus,
            cells,
            name_width: 14,
            col_width: 8,
        }
    }

    /// Width of the vendor-name column.
    #[must_use]
    pub fn name_width(mut self, width: u16) -> Self {
        self.name_width = width.max(4);
        self
    }

    /// Width of each SKU column.
    #[must_use]
    pub fn col_width(mut self, width: u16) -> Self {
        self.col_width = width.max(4);
        self
    }
}

/// Sort order, hover, and the hit registry rebuilt each render.
#[derive(Debug, Default)]
pub struct MatrixState {
    pub sort: VendorSort,
    pub hover: HoverState<MatrixHit>,
    hits: Vec<(Rect, MatrixHit)>,
}

impl MatrixState {
    pub fn hit(&self, x: u16, y: u16) -> Option<MatrixHit> {
        self.hits
            .iter()
            .find(|(rect, _)| rect.contains(x, y))
            .map(|&(_, hit)| hit)
    }

    pub fn pointer_moved(&mut self, x: u16, y: u16) -> Option<MatrixHit> {
        match self.hit(x, y) {
            Some(hit) => {
                self.hover.pointer_enter(hit, x, y);
                Some(hit)
            }
            None => {
                self.hover.pointer_leave();
                None
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.hover.pointer_leave();
    }

    /// Resolve a click for the host's cell/vendor/SKU callbacks. Hover
    /// state is unaffected.
    pub fn click(&self, x: u16, y: u16) -> Option<MatrixHit> {
        self.hit(x, y)
    }
}

fn truncate(text: &str, width: u16) -> String {
    text.chars().take(usize::from(width)).collect()
}

impl StatefulWidget for CoverageMatrix<'_> {
    type State = MatrixState;

    fn render(&self, area: Rect, surface: &mut Surface, state: &mut MatrixState) {
        state.hits.clear();
        if area.is_empty() || area.height < 2 {
            return;
        }

        tracing::trace!(
            vendors = self.vendors.len(),
            skus = self.skus.len(),
            cells = self.cells.len(),
            "recomputing matrix aggregates"
        );
        let aggregates = vendor_aggregates(self.vendors, self.skus, self.cells);
        let order = sort_vendor_indices(self.vendors, &aggregates, state.sort);
        let single_source = single_source_flags(self.skus, self.cells);

        let mut lookup: AHashMap<(&str, &str), &MatrixCell> =
            AHashMap::with_capacity(self.cells.len());
        for cell in self.cells {
            lookup.insert((cell.vendor_id.as_str(), cell.sku_id.as_str()), cell);
        }

        // Column offsets in u64: a large SKU catalog must clip at the
        // area edge, not wrap through u16 arithmetic.
        let col_x = |sku_col: usize| -> u64 {
            u64::from(area.x)
                + u64::from(self.name_width)
                + 1
                + sku_col as u64 * (u64::from(self.col_width) + 1)
        };
        let right = u64::from(area.right());

        // Header row: SKU names, single-source SKUs flagged.
        let header_y = area.y;
        for (sku_col, sku) in self.skus.iter().enumerate() {
            let x = col_x(sku_col);
            if x + u64::from(self.col_width) > right {
                break;
            }
            let x = x as u16;
            let flagged = single_source.get(sku_col).copied().unwrap_or(false);
            let style = if flagged {
                Style::new().fg(SINGLE_SOURCE_COLOR).bold()
            } else {
                Style::new().bold()
            };
            let mut label = truncate(&sku.product_name, self.col_width - 1);
            if flagged {
                label.push('!');
            }
            surface.set_str(x, header_y, &label, style);
            state
                .hits
                .push((Rect::new(x, header_y, self.col_width, 1), MatrixHit::Sku(sku_col)));
        }

        // One row per vendor in sorted order.
        for (row_index, &vendor_index) in order.iter().enumerate() {
            let y = header_y + 1 + row_index as u16;
            if y >= area.bottom() {
                break;
            }
            let vendor = &self.vendors[vendor_index];
            let name_budget = self.name_width.min(area.width);
            surface.set_str_n(
                area.x,
                y,
                &truncate(&vendor.name, self.name_width),
                name_budget,
                Style::new(),
            );
            state.hits.push((
                Rect::new(area.x, y, name_budget, 1),
                MatrixHit::Vendor(vendor_index),
            ));

            for (sku_col, sku) in self.skus.iter().enumerate() {
                let x = col_x(sku_col);
                if x + u64::from(self.col_width) > right {
                    break;
                }
                let x = x as u16;
                match lookup.get(&(vendor.id.as_str(), sku.id.as_str())) {
                    Some(cell) if cell.has_pricing() => {
                        let price = cell.price.unwrap_or_default();
                        let mark = if cell.primary_supplier { "*" } else { "" };
                        let style = if cell.is_best_price() {
                            Style::new().fg(BEST_PRICE_COLOR).bold()
                        } else {
                            Style::new()
                        };
                        surface.set_str(
                            x,
                            y,
                            &truncate(&format!("${price:.2}{mark}"), self.col_width),
                            style,
                        );
                        state.hits.push((
                            Rect::new(x, y, self.col_width, 1),
                            MatrixHit::Cell {
                                vendor: vendor_index,
                                sku: sku_col,
                            },
                        ));
                    }
                    _ => {
                        // No pricing: placeholder, non-interactive.
                        surface.set(x, y, '—', Style::new().dim());
                    }
                }
            }

            // Row tail: coverage percentage and best-price count.
            let agg = &aggregates[vendor_index];
            let tail_x = col_x(self.skus.len());
            if tail_x < right {
                let tail_x = tail_x as u16;
                surface.set_str_n(
                    tail_x,
                    y,
                    &format!("{:>3.0}% {:>2}", agg.coverage_pct, agg.best_price_count),
                    area.right() - tail_x,
                    Style::new().dim(),
                );
            }
        }
    }
}
