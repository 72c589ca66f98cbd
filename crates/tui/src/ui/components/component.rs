//! Component system for the Verdant TUI.
//!
//! Components are self-contained UI elements that handle their own events
//! and render themselves into a provided `Rect`. They never perform side
//! effects directly; instead they return [`Effect`]s that the runtime
//! executes.

use crossterm::event::KeyEvent;
use ratatui::{Frame, layout::Rect, text::Span};
use verdant_types::{Effect, Msg};

use crate::app::App;

/// A trait representing a UI component with its own state and behavior.
///
/// # Component Lifecycle
///
/// 1. **Route enter**: `on_route_enter()` runs when the component becomes the
///    visible route or modal. Screens use it to refresh their data.
/// 2. **Event Handling**: keys arrive through `handle_key_events()`, runtime
///    messages through `handle_message()`.
/// 3. **Rendering**: `render()` draws the component into the frame area.
/// 4. **Route exit**: `on_route_exit()` runs just before the component is
///    replaced.
pub(crate) trait Component {
    /// Handle an application-level message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: &Msg) -> Vec<Effect> {
        Vec::new()
    }

    /// Handle key events when this component has focus.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
    ///     match key.code {
    ///         KeyCode::Esc => vec![Effect::CloseModal],
    ///         _ => vec![],
    ///     }
    /// }
    /// ```
    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    /// Render the component into the given area.
    ///
    /// Implementations should be side-effect free except for frame drawing.
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);

    /// Key hints shown in the hint bar while this component is active.
    fn get_hint_spans(&self, _app: &App) -> Vec<Span<'_>> {
        Vec::new()
    }

    /// Called when the component becomes visible.
    fn on_route_enter(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }

    /// Called just before the component is replaced.
    fn on_route_exit(&mut self, _app: &mut App) -> Vec<Effect> {
        Vec::new()
    }
}
