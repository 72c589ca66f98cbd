//! Product detail overlay opened from the home screen.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::Rect,
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use verdant_types::{Effect, Product, Route};

use crate::{
    app::App,
    ui::{
        components::{component::Component, typography::ThemedText},
        theme::{Theme, theme_helpers as th},
    },
};

/// Modal keyed by barcode. The product is looked up in the home collections
/// at render time so a refetch behind the overlay is reflected.
#[derive(Debug)]
pub struct ProductModalComponent {
    barcode: String,
}

impl ProductModalComponent {
    pub fn new(barcode: impl Into<String>) -> Self {
        Self { barcode: barcode.into() }
    }
}

impl Component for ProductModalComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc => vec![Effect::CloseModal],
            KeyCode::Char('s') => vec![Effect::CloseModal, Effect::SwitchTo(Route::Scan)],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Product  [Esc] Close"), true).style(th::modal_style(theme));
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let text = match app.home.find_product(&self.barcode) {
            Some(product) => product_details(theme, product),
            None => Text::from(vec![
                ThemedText::title("Product not found").line(theme),
                ThemedText::body(format!("No product with barcode {}", self.barcode))
                    .style(theme.text_muted_style())
                    .line(theme),
            ]),
        };
        frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Esc", " Close "), ("s", " Scan ")])
    }
}

fn product_details<'a, T: Theme + ?Sized>(theme: &T, product: &'a Product) -> Text<'a> {
    let score = |value: Option<f64>| value.map(|s| format!("{s:.1}")).unwrap_or_else(|| "not rated".to_string());
    let field = |label: &'a str, value: String| {
        Line::from(vec![
            ThemedText::body(label).style(theme.text_secondary_style()).span(theme),
            ThemedText::body(value).span(theme),
        ])
    };
    Text::from(vec![
        ThemedText::headline(product.name.as_str()).line(theme),
        Line::default(),
        field("Barcode         ", product.barcode.clone()),
        field("Sustainability  ", score(product.effective_sustainability_score())),
        field("Quality         ", score(product.effective_quality_score())),
    ])
}
