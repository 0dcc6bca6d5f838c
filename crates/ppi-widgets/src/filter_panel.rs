#![forbid(unsafe_code)]

//! Search/filter panel display.
//!
//! Renders the current [`SearchFilters`] against the caller-supplied
//! domain lists: query box, one row per select field, price bounds, the
//! active-only toggle, and a reset action. The panel is display-only;
//! edits flow through `ppi_core::filter::FilterPanel`, which owns the
//! debounce and dispatch rules.

use ppi_core::model::SearchFilters;

use crate::surface::{Rect, Style, Surface};
use crate::StatefulWidget;

/// Domain lists for the select fields.
#[derive(Debug, Clone, Default)]
pub struct FilterDomains {
    pub categories: Vec<String>,
    pub regions: Vec<String>,
    pub suppliers: Vec<String>,
}

/// Row labels, top to bottom.
const ROWS: [&str; 7] = [
    "query",
    "category",
    "region",
    "supplier",
    "price",
    "active only",
    "[ reset ]",
];

#[derive(Debug, Clone)]
pub struct FilterPanelWidget<'a> {
    domains: &'a FilterDomains,
}

impl<'a> FilterPanelWidget<'a> {
    pub fn new(domains: &'a FilterDomains) -> Self {
        Self { domains }
    }

    /// Which row a pointer position falls on, for the host's focus and
    /// reset handling.
    pub fn row_at(area: Rect, y: u16) -> Option<&'static str> {
        if y < area.y {
            return None;
        }
        ROWS.get(usize::from(y - area.y)).copied()
    }
}

fn field_text(value: Option<&str>) -> &str {
    value.unwrap_or("any")
}

impl StatefulWidget for FilterPanelWidget<'_> {
    type State = SearchFilters;

    fn render(&self, area: Rect, surface: &mut Surface, filters: &mut SearchFilters) {
        if area.is_empty() {
            return;
        }
        let label_style = Style::new().dim();
        let value_style = Style::new();
        let unset_style = Style::new().dim();

        let write_row = |surface: &mut Surface, row: u16, label: &str, value: &str, set: bool| {
            if row >= area.height {
                return;
            }
            let y = area.y + row;
            let x = surface.set_str(area.x, y, label, label_style);
            let x = surface.set_str(x, y, ": ", label_style);
            surface.set_str(x, y, value, if set { value_style } else { unset_style });
        };

        write_row(surface, 0, "query", filters.query.as_deref().unwrap_or("_"), filters.query.is_some());
        write_row(
            surface,
            1,
            "category",
            field_text(filters.category.as_deref()),
            filters.category.is_some(),
        );
        write_row(
            surface,
            2,
            "region",
            field_text(filters.region.as_deref()),
            filters.region.is_some(),
        );
        write_row(
            surface,
            3,
            "supplier",
            field_text(filters.supplier.as_deref()),
            filters.supplier.is_some(),
        );

        let price = match (filters.min_price, filters.max_price) {
            (None, None) => "any".to_owned(),
            (min, max) => format!(
                "${:.2} - ${:.2}",
                min.unwrap_or(0.0),
                max.unwrap_or(f64::INFINITY)
            ),
        };
        write_row(
            surface,
            4,
            "price",
            &price,
            filters.min_price.is_some() || filters.max_price.is_some(),
        );

        let active = match filters.active_only {
            Some(true) => "yes",
            Some(false) => "no",
            None => "any",
        };
        write_row(surface, 5, "active only", active, filters.active_only.is_some());

        if area.height > 6 {
            surface.set_str(area.x, area.y + 6, "[ reset ]", Style::new().bold());
        }

        // Domain lists are display context for hosts that open pickers;
        // show how many options each select offers when there is room.
        if area.height > 7 {
            let counts = format!(
                "{} categories · {} regions · {} suppliers",
                self.domains.categories.len(),
                self.domains.regions.len(),
                self.domains.suppliers.len()
            );
            surface.set_str(area.x, area.y + 7, &counts, Style::new().dim());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domains() -> FilterDomains {
        FilterDomains {
            categories: vec!["flooring".into(), "tile".into()],
            regions: vec!["CA".into(), "TX".into()],
            suppliers: vec!["Acme".into()],
        }
    }

    #[test]
    fn unset_fields_render_as_any() {
        let domains = domains();
        let mut surface = Surface::new(40, 9);
        let mut filters = SearchFilters::default();
        FilterPanelWidget::new(&domains).render(surface.area(), &mut surface, &mut filters);

        assert!(surface.row_text(1).contains("category: any"));
        assert!(surface.row_text(4).contains("price: any"));
        assert!(surface.row_text(5).contains("active only: any"));
        assert!(surface.row_text(6).contains("[ reset ]"));
    }

    #[test]
    fn set_fields_render_their_values() {
        let domains = domains();
        let mut surface = Surface::new(40, 9);
        let mut filters = SearchFilters {
            query: Some("laminate".into()),
            category: Some("flooring".into()),
            min_price: Some(1.5),
            max_price: Some(4.0),
            active_only: Some(true),
            ..SearchFilters::default()
        };
        FilterPanelWidget::new(&domains).render(surface.area(), &mut surface, &mut filters);

        assert!(surface.row_text(0).contains("query: laminate"));
        assert!(surface.row_text(1).contains("category: flooring"));
        assert!(surface.row_text(4).contains("$1.50 - $4.00"));
        assert!(surface.row_text(5).contains("active only: yes"));
    }

    #[test]
    fn row_at_maps_pointer_rows_to_fields() {
        let area = Rect::new(0, 2, 30, 9);
        assert_eq!(FilterPanelWidget::row_at(area, 2), Some("query"));
        assert_eq!(FilterPanelWidget::row_at(area, 8), Some("[ reset ]"));
        assert_eq!(FilterPanelWidget::row_at(area, 1), None);
        assert_eq!(FilterPanelWidget::row_at(area, 11), None);
    }

    #[test]
    fn domain_counts_render_when_there_is_room() {
        let domains = domains();
        let mut surface = Surface::new(60, 9);
        let mut filters = SearchFilters::default();
        FilterPanelWidget::new(&domains).render(surface.area(), &mut surface, &mut filters);
        assert!(surface.row_text(7).contains("2 categories"));
    }
}
