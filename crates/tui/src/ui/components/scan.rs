//! Scan route. Barcode capture happens outside the terminal; this view only
//! marks the destination and leads back home.

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    text::{Line, Span, Text},
    widgets::{Paragraph, Wrap},
};
use verdant_types::{Effect, Route};

use crate::{
    app::App,
    ui::{
        components::{component::Component, typography::ThemedText},
        theme::{Theme, theme_helpers as th},
    },
};

#[derive(Debug, Default)]
pub struct ScanComponent;

impl Component for ScanComponent {
    fn handle_key_events(&mut self, _app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Esc | KeyCode::Char('h') => vec![Effect::SwitchTo(Route::Home)],
            KeyCode::Char('q') => vec![Effect::Quit],
            _ => vec![],
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let block = th::block(theme, Some("Scan"), true);
        let inner = block.inner(rect);
        frame.render_widget(block, rect);

        let text = Text::from(vec![
            ThemedText::title("Scan a product").line(theme),
            Line::default(),
            ThemedText::body("Barcode scanning runs on the companion device.")
                .style(theme.text_secondary_style())
                .line(theme),
            ThemedText::body("Press Esc to return home.").style(theme.text_muted_style()).line(theme),
        ]);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center).wrap(Wrap { trim: true }), inner);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        th::build_hint_spans(&*app.ctx.theme, &[(" Esc", " Home "), ("q", " Quit ")])
    }
}
