//! Application state for the Verdant TUI.
//!
//! `App` owns the state that outlives any single view: the shared context
//! (theme and catalog) and the home screen's view state, which persists while
//! the user visits other routes so returning home never flashes a placeholder.

use std::sync::Arc;

use tracing::debug;
use verdant_api::ProductCatalog;
use verdant_types::{Effect, Modal, Msg, Route};

use crate::ui::{components::home::HomeState, theme::Theme};

/// Cross-cutting shared context owned by the App.
///
/// Holds runtime-wide objects so components do not need them threaded
/// through every call.
pub struct SharedCtx {
    /// Active UI theme
    pub theme: Box<dyn Theme>,
    /// Source of the home-screen product lists
    pub catalog: Arc<dyn ProductCatalog>,
}

impl std::fmt::Debug for SharedCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SharedCtx")
            .field("theme", &self.theme)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct App {
    pub ctx: SharedCtx,
    pub home: HomeState,
    pub current_route: Route,
    pub open_modal_kind: Option<Modal>,
}

impl App {
    pub fn new(ctx: SharedCtx) -> Self {
        Self {
            ctx,
            home: HomeState::new(),
            current_route: Route::default(),
            open_modal_kind: None,
        }
    }

    /// Apply a runtime message to app-wide state.
    ///
    /// Runs before the message reaches any component, so fetch results land
    /// in `home` regardless of which route or modal is showing.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::ProductsFetched { generation, result } => {
                self.home.apply_fetch(*generation, result.clone());
            }
            Msg::ProductsFetchCancelled { generation } => {
                debug!(generation, "home fetch cancelled");
                self.home.apply_cancelled(*generation);
            }
            Msg::Resize(..) => {}
        }
        Vec::new()
    }
}
