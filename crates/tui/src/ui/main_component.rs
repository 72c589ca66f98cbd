use crossterm::event::KeyEvent;
use ratatui::{
    prelude::*,
    widgets::{Block, Clear, Paragraph},
};
use verdant_types::{Effect, Modal, Msg, Route};

use super::components::{Component, HomeComponent, ProductModalComponent, ScanComponent, ThemedText};
use super::theme::theme_helpers as th;
use super::utils::centered_rect;
use crate::app::App;

pub struct ModalLayout(Box<dyn Fn(Rect) -> Rect>);

impl std::fmt::Debug for ModalLayout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("ModalLayout")
    }
}

type ModalView = (Box<dyn Component>, ModalLayout);

#[derive(Default)]
pub struct MainView {
    /// Current main view component
    pub content_view: Option<Box<dyn Component>>,
    /// Currently open modal component
    pub modal_view: Option<ModalView>,
}

impl MainView {
    pub fn new(content_view: Option<Box<dyn Component>>) -> Self {
        Self {
            content_view,
            modal_view: None,
        }
    }

    /// Replace the content view with the component for `route`.
    /// Not intended to be called directly; use `Effect::SwitchTo`.
    pub fn set_current_route(&mut self, app: &mut App, route: Route) {
        let view: Box<dyn Component> = match route {
            Route::Home => Box::new(HomeComponent),
            Route::Scan => Box::new(ScanComponent),
        };
        app.current_route = route;
        self.content_view = Some(view);
    }

    /// Update the open modal kind (use None to clear).
    pub fn set_open_modal_kind(&mut self, app: &mut App, modal: Option<Modal>) {
        if let Some(modal_kind) = modal.as_ref() {
            let modal_view: ModalView = match modal_kind {
                Modal::Product(barcode) => (
                    Box::new(ProductModalComponent::new(barcode.clone())),
                    ModalLayout(Box::new(|rect| centered_rect(60, 50, rect))),
                ),
            };
            self.modal_view = Some(modal_view);
        } else {
            if matches!(app.open_modal_kind, Some(Modal::Product(_))) {
                app.home.close_modal();
            }
            self.modal_view = None;
        }
        app.open_modal_kind = modal;
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: &Msg) -> Vec<Effect> {
        let mut effects = app.update(msg);

        match self.modal_view.as_mut() {
            Some((modal, _)) => effects.extend(modal.handle_message(app, msg)),
            None => {
                if let Some(content) = self.content_view.as_mut() {
                    effects.extend(content.handle_message(app, msg));
                }
            }
        }

        effects
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if let Some(target) = self.modal_view.as_mut() {
            return target.0.handle_key_events(app, key);
        }

        if let Some(content) = self.content_view.as_mut() {
            return content.handle_key_events(app, key);
        }

        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        // Fill the entire background with the theme's background color for consistency
        let bg_fill = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(bg_fill, area);

        let layout = Layout::vertical([
            Constraint::Min(1),    // Main view
            Constraint::Length(1), // Hints bar
        ])
        .split(area);

        if let Some(current) = self.content_view.as_mut() {
            current.render(frame, layout[0], app);
        }

        let hint_spans: Vec<Span> = self.get_hint_spans(app);
        let hints_widget = Paragraph::new(Line::from(hint_spans));
        frame.render_widget(hints_widget, layout[1]);

        if let Some((modal, position)) = self.modal_view.as_mut() {
            render_overlay(frame, app);
            let modal_area = position.0(area);
            frame.render_widget(Clear, modal_area);
            modal.render(frame, modal_area, app);
        }
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let theme = &*app.ctx.theme;
        let mut hint_spans: Vec<Span> = vec![ThemedText::body("Hints: ").style(theme.text_muted_style()).span(theme)];

        if let Some((modal, _)) = self.modal_view.as_ref() {
            hint_spans.extend(modal.get_hint_spans(app));
            return hint_spans;
        }

        if let Some(content) = self.content_view.as_ref() {
            hint_spans.extend(content.get_hint_spans(app));
        }
        hint_spans.extend(th::build_hint_spans(&*app.ctx.theme, &[(" Ctrl+C", " Exit ")]));

        hint_spans
    }
}

/// Dim everything behind an open modal.
fn render_overlay(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(app.ctx.theme.modal_background_style()).dim(), frame.area());
}
