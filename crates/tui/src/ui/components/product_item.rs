//! One product row: accent marker, name and scores.

use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};
use verdant_types::Product;

use crate::ui::{components::typography::ThemedText, theme::Theme, utils::truncate_to_width};

const MARKER: &str = "▌ ";

#[derive(Debug, Clone, Copy)]
pub struct ProductItem<'a> {
    product: &'a Product,
    accent: Color,
    dark: bool,
}

impl<'a> ProductItem<'a> {
    pub fn new(product: &'a Product, accent: Color) -> Self {
        Self {
            product,
            accent,
            dark: false,
        }
    }

    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Build the row, fitting the name into `width` columns.
    pub fn line<T: Theme + ?Sized>(&self, theme: &T, width: u16) -> Line<'a> {
        let scores = format_scores(self.product);
        let reserved = MARKER.chars().count() + scores.chars().count() + 1;
        let name_width = (width as usize).saturating_sub(reserved).max(1);
        let name = truncate_to_width(&self.product.name, name_width);

        Line::from(vec![
            ThemedText::body(MARKER)
                .dark(self.dark)
                .style(Style::default().fg(self.accent))
                .span(theme),
            ThemedText::body(name).dark(self.dark).span(theme),
            Span::raw(" "),
            ThemedText::body(scores)
                .dark(self.dark)
                .style(Style::default().fg(self.accent))
                .span(theme),
        ])
    }
}

fn format_scores(product: &Product) -> String {
    let fmt = |score: Option<f64>| score.map(|s| format!("{s:.1}")).unwrap_or_else(|| "-".to_string());
    format!(
        "S {}  Q {}",
        fmt(product.effective_sustainability_score()),
        fmt(product.effective_quality_score())
    )
}
