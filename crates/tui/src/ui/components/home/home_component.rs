use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};
use verdant_types::{Effect, Product, Route};

use super::state::{HomeSection, HomeState};
use crate::app::App;
use crate::ui::components::{Component, ProductItem, ThemedText};
use crate::ui::theme::{Theme, theme_helpers as th};

/// Accent used for the "Most popular" rows.
pub const POPULAR_ACCENT: Color = Color::Rgb(0x89, 0xA7, 0x60);

const LOADING_TEXT: &str = "Loading...";

/// The home screen: a welcome header and the two product sections.
#[derive(Debug, Default)]
pub struct HomeComponent;

impl Component for HomeComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let home = &mut app.home;
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => {
                home.move_cursor(-1);
                Vec::new()
            }
            KeyCode::Down | KeyCode::Char('j') => {
                home.move_cursor(1);
                Vec::new()
            }
            KeyCode::Tab | KeyCode::BackTab => {
                home.switch_section();
                Vec::new()
            }
            KeyCode::Enter => home.select_at_cursor(),
            KeyCode::Char('s') => vec![Effect::SwitchTo(Route::Scan)],
            KeyCode::Char('r') => home.retry(),
            KeyCode::Char('q') => vec![Effect::Quit],
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let home = &app.home;

        let banner_height = if home.failure_reason().is_some() { 2 } else { 0 };
        let areas = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(banner_height),
            Constraint::Percentage(50),
            Constraint::Min(3),
        ])
        .split(rect);

        render_header(frame, areas[0], theme);
        if let Some(reason) = home.failure_reason() {
            render_failure_banner(frame, areas[1], theme, reason);
        }

        let popular = Section {
            section: HomeSection::Popular,
            title: "Most popular",
            title_dark: true,
            accent: POPULAR_ACCENT,
            container: th::contrast_panel_style(theme),
        };
        popular.render(frame, areas[2], theme, home);

        let sustainable = Section {
            section: HomeSection::Sustainable,
            title: "Most sustainable",
            title_dark: false,
            accent: theme.roles().accent_primary,
            container: th::panel_style(theme),
        };
        sustainable.render(frame, areas[3], theme, home);
    }

    fn get_hint_spans(&self, app: &App) -> Vec<Span<'_>> {
        let mut hints = vec![
            (" ↑/↓", " Move "),
            ("Tab", " Section "),
            ("Enter", " Details "),
            ("s", " Scan "),
        ];
        if app.home.failure_reason().is_some() {
            hints.push(("r", " Retry "));
        }
        hints.push(("q", " Quit "));
        th::build_hint_spans(&*app.ctx.theme, &hints)
    }

    fn on_route_enter(&mut self, app: &mut App) -> Vec<Effect> {
        app.home.on_focus()
    }
}

fn render_header<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, theme: &T) {
    let columns = Layout::horizontal([Constraint::Min(1), Constraint::Length(10)]).split(area);
    frame.render_widget(ThemedText::headline("Welcome!").paragraph(theme), columns[0]);
    let scan = Line::from(th::build_hint_spans(theme, &[("[s]", " Scan")])).right_aligned();
    frame.render_widget(Paragraph::new(scan), columns[1]);
}

fn render_failure_banner<T: Theme + ?Sized>(frame: &mut Frame, area: Rect, theme: &T, reason: &str) {
    let banner = Paragraph::new(Line::from(vec![
        ThemedText::body(format!("Couldn't load products: {reason}"))
            .style(theme.status_error())
            .span(theme),
        ThemedText::body("  press r to retry").style(theme.text_muted_style()).span(theme),
    ]))
    .wrap(Wrap { trim: true });
    frame.render_widget(banner, area);
}

struct Section {
    section: HomeSection,
    title: &'static str,
    title_dark: bool,
    accent: Color,
    container: Style,
}

impl Section {
    fn render<T: Theme + ?Sized>(&self, frame: &mut Frame, area: Rect, theme: &T, home: &HomeState) {
        let (cursor_section, cursor_index) = home.cursor();
        let focused = cursor_section == self.section;

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ratatui::widgets::BorderType::Rounded)
            .border_style(theme.border_style(focused))
            .style(self.container)
            .title(ThemedText::title(self.title).dark(self.title_dark).line(theme));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if home.shows_placeholder() {
            frame.render_widget(ThemedText::body(LOADING_TEXT).dark(self.title_dark).paragraph(theme), inner);
            return;
        }

        let products = home.products_in(self.section);
        let visible = inner.height as usize;
        let offset = if focused && visible > 0 {
            cursor_index.saturating_sub(visible - 1)
        } else {
            0
        };
        let lines: Vec<Line> = products
            .iter()
            .enumerate()
            .skip(offset)
            .take(visible)
            .map(|(index, product)| self.row(theme, product, inner.width, focused && index == cursor_index))
            .collect();
        frame.render_widget(Paragraph::new(lines), inner);
    }

    fn row<'a, T: Theme + ?Sized>(&self, theme: &T, product: &'a Product, width: u16, selected: bool) -> Line<'a> {
        let line = ProductItem::new(product, self.accent).dark(true).line(theme, width);
        if selected {
            line.patch_style(th::list_selected_style(theme))
        } else {
            line
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{buffer_text, collections, test_app};
    use crossterm::event::KeyModifiers;
    use ratatui::{Terminal, backend::TestBackend};
    use verdant_types::Modal;

    fn draw(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|frame| HomeComponent.render(frame, frame.area(), app))
            .unwrap();
        buffer_text(terminal.backend().buffer())
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn shows_placeholder_in_both_sections_while_loading() {
        let mut app = test_app();
        app.home.mount();
        app.home.begin_fetch();

        let screen = draw(&mut app);
        assert!(screen.contains("Welcome!"));
        assert_eq!(screen.matches(LOADING_TEXT).count(), 2);
    }

    #[test]
    fn renders_both_lists_after_load() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Ok(collections(2, 1)));

        let screen = draw(&mut app);
        assert!(!screen.contains(LOADING_TEXT));
        assert!(screen.contains("Most popular"));
        assert!(screen.contains("Most sustainable"));
        assert!(screen.contains("Popular 0"));
        assert!(screen.contains("Popular 1"));
        assert!(screen.contains("Sustainable 0"));
    }

    #[test]
    fn renders_five_popular_and_three_sustainable_rows() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Ok(collections(5, 3)));

        let screen = draw(&mut app);
        let rows: Vec<&str> = screen.lines().filter(|line| line.contains('▌')).collect();
        assert_eq!(rows.len(), 8);
        assert_eq!(rows.iter().filter(|line| line.contains("Popular ")).count(), 5);
        assert_eq!(rows.iter().filter(|line| line.contains("Sustainable ")).count(), 3);
        for i in 0..5 {
            assert!(screen.contains(&format!("Popular {i}")));
        }
        for i in 0..3 {
            assert!(screen.contains(&format!("Sustainable {i}")));
        }
    }

    #[test]
    fn failure_banner_colors_come_from_themed_text() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Err("HTTP 500".into()));

        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|frame| HomeComponent.render(frame, frame.area(), &mut app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let theme = &*app.ctx.theme;

        // Banner sits on the row after the two-line header.
        let error_fg = ThemedText::body("").style(theme.status_error()).resolve_style(theme).fg;
        assert_eq!(Some(buffer[(0, 2)].fg), error_fg);
        let retry_x = buffer_text(buffer).lines().nth(2).unwrap().find("press").unwrap() as u16;
        let muted_fg = ThemedText::body("").style(theme.text_muted_style()).resolve_style(theme).fg;
        assert_eq!(Some(buffer[(retry_x, 2)].fg), muted_fg);
    }

    #[test]
    fn refetch_keeps_rows_on_screen() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Ok(collections(2, 1)));

        HomeComponent.on_route_enter(&mut app);
        app.home.begin_fetch();
        let screen = draw(&mut app);
        assert!(!screen.contains(LOADING_TEXT));
        assert!(screen.contains("Popular 1"));
    }

    #[test]
    fn failure_banner_offers_retry() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Err("backend returned HTTP 500".into()));

        let screen = draw(&mut app);
        assert!(screen.contains("Couldn't load products: backend returned HTTP 500"));
        assert!(screen.contains("press r to retry"));
        assert_eq!(
            HomeComponent.handle_key_events(&mut app, key(KeyCode::Char('r'))),
            vec![Effect::FetchProducts]
        );
    }

    #[test]
    fn popular_rows_use_popular_accent() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Ok(collections(1, 0)));

        let mut terminal = Terminal::new(TestBackend::new(70, 24)).unwrap();
        terminal
            .draw(|frame| HomeComponent.render(frame, frame.area(), &mut app))
            .unwrap();
        let buffer = terminal.backend().buffer();
        let marker = buffer
            .content()
            .iter()
            .find(|cell| cell.symbol() == "▌")
            .expect("row marker rendered");
        assert_eq!(marker.fg, POPULAR_ACCENT);
    }

    #[test]
    fn keys_drive_selection_and_navigation() {
        let mut app = test_app();
        app.home.mount();
        let ticket = app.home.begin_fetch();
        app.home.apply_fetch(ticket.generation, Ok(collections(3, 2)));

        HomeComponent.handle_key_events(&mut app, key(KeyCode::Down));
        let effects = HomeComponent.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::ShowModal(Modal::Product("pop-1".into()))]);
        assert_eq!(app.home.selected_barcode(), Some("pop-1"));

        HomeComponent.handle_key_events(&mut app, key(KeyCode::Tab));
        let effects = HomeComponent.handle_key_events(&mut app, key(KeyCode::Enter));
        assert_eq!(effects, vec![Effect::ShowModal(Modal::Product("sus-1".into()))]);

        assert_eq!(
            HomeComponent.handle_key_events(&mut app, key(KeyCode::Char('s'))),
            vec![Effect::SwitchTo(Route::Scan)]
        );
        assert_eq!(
            HomeComponent.handle_key_events(&mut app, key(KeyCode::Char('q'))),
            vec![Effect::Quit]
        );
    }

    #[test]
    fn route_enter_mounts_then_refreshes() {
        let mut app = test_app();
        assert_eq!(HomeComponent.on_route_enter(&mut app), vec![Effect::FetchProducts]);
        assert_eq!(HomeComponent.on_route_enter(&mut app), vec![Effect::FetchProducts]);
    }
}
