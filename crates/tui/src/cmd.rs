//! # Command Execution Layer
//!
//! This module translates high-level application effects (`Effect`) into
//! imperative commands (`Cmd`) and executes them. It is the boundary where the
//! pure state management of the app meets side effects such as live API
//! calls to the Verdant backend.
//!
//! ## Design
//! - [`Cmd`] is the effectful command type.
//! - [`from_effects`] translates state-driven [`Effect`]s into [`Cmd`]s.
//! - [`run_from_effects`] spawns the commands and hands back their join
//!   handles for the runtime to poll.
//!
//! State updates stay pure; commands handle side effects.

use std::sync::Arc;

use tokio::task::{JoinHandle, spawn};
use tracing::{debug, info};
use verdant_api::{ProductCatalog, fetch_home_collections};
use verdant_types::{Effect, ExecOutcome};

use crate::app::App;
use crate::ui::components::home::FetchTicket;

/// Side-effectful commands executed outside of pure state updates.
#[derive(Debug)]
pub enum Cmd {
    /// Fetch both home-screen product lists under the given ticket.
    FetchProducts(FetchTicket),
}

/// Commands that were started by [`run_from_effects`].
#[derive(Debug, Default)]
pub struct CommandBatch {
    /// Spawned work the runtime polls to completion.
    pub pending: Vec<JoinHandle<ExecOutcome>>,
}

/// Convert application [`Effect`]s into [`Cmd`] instances.
///
/// Navigation and quit effects are handled by the runtime and never reach
/// this function; any that do are ignored.
pub fn from_effects(app: &mut App, effects: Vec<Effect>) -> Vec<Cmd> {
    let mut commands = Vec::new();
    for effect in effects {
        match effect {
            Effect::FetchProducts => {
                let ticket = app.home.begin_fetch();
                commands.push(Cmd::FetchProducts(ticket));
            }
            other => debug!(?other, "effect has no command"),
        }
    }
    commands
}

/// Translate effects and start the resulting commands.
pub fn run_from_effects(app: &mut App, effects: Vec<Effect>) -> CommandBatch {
    let commands = from_effects(app, effects);
    let mut batch = CommandBatch::default();
    for command in commands {
        match command {
            Cmd::FetchProducts(ticket) => {
                let catalog = Arc::clone(&app.ctx.catalog);
                batch.pending.push(spawn(fetch_products_task(catalog, ticket)));
            }
        }
    }
    batch
}

/// Run one home fetch, stopping early when the ticket is cancelled.
pub async fn fetch_products_task(catalog: Arc<dyn ProductCatalog>, ticket: FetchTicket) -> ExecOutcome {
    let FetchTicket { generation, cancel } = ticket;
    tokio::select! {
        _ = cancel.cancelled() => {
            debug!(generation, "home fetch cancelled");
            ExecOutcome::Cancelled { generation }
        }
        result = fetch_home_collections(catalog.as_ref()) => {
            let result = result.map_err(|error| {
                info!(generation, %error, "home fetch failed");
                error.user_message()
            });
            ExecOutcome::Products { generation, result }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::test_support::{GatedCatalog, StaticCatalog, popular, sustainable_entries, test_app, test_app_with};
    use tokio_util::sync::CancellationToken;
    use verdant_api::NetworkError;
    use verdant_types::Route;

    fn ticket(generation: u64) -> FetchTicket {
        FetchTicket {
            generation,
            cancel: CancellationToken::new(),
        }
    }

    #[test]
    fn fetch_effect_begins_a_new_generation() {
        let mut app = test_app();
        app.home.mount();
        let commands = from_effects(&mut app, vec![Effect::FetchProducts, Effect::SwitchTo(Route::Scan)]);
        assert_eq!(commands.len(), 1);
        let Cmd::FetchProducts(ticket) = &commands[0];
        assert_eq!(ticket.generation, app.home.generation());
        assert!(app.home.is_fetching());
    }

    #[tokio::test]
    async fn task_joins_both_lists() {
        let catalog: Arc<dyn ProductCatalog> = Arc::new(StaticCatalog::new(5, 3));
        match fetch_products_task(catalog, ticket(4)).await {
            ExecOutcome::Products { generation, result } => {
                assert_eq!(generation, 4);
                let collections = result.unwrap();
                assert_eq!(collections.popular.len(), 5);
                assert_eq!(collections.sustainable.len(), 3);
                assert!(collections.sustainable[0].review_aggregate.is_some());
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn task_reports_failure_as_message() {
        let catalog: Arc<dyn ProductCatalog> = Arc::new(StaticCatalog::failing(500));
        match fetch_products_task(catalog, ticket(1)).await {
            ExecOutcome::Products { result, .. } => assert_eq!(result.unwrap_err(), "HTTP 500"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn task_waits_for_both_responses() {
        let (catalog, gates) = GatedCatalog::new();
        let catalog: Arc<dyn ProductCatalog> = Arc::new(catalog);
        let handle = spawn(fetch_products_task(catalog, ticket(1)));

        gates.popular.send(Ok(popular(5))).unwrap();
        tokio::time::sleep(Duration::from_millis(20)).await;
        assert!(!handle.is_finished(), "result must not be delivered with one list");

        gates.sustainable.send(Ok(sustainable_entries(3))).unwrap();
        match handle.await.unwrap() {
            ExecOutcome::Products { result, .. } => {
                let collections = result.unwrap();
                assert_eq!(collections.popular.len(), 5);
                assert_eq!(collections.sustainable.len(), 3);
            }
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn one_failure_fails_the_whole_fetch() {
        let (catalog, gates) = GatedCatalog::new();
        let catalog: Arc<dyn ProductCatalog> = Arc::new(catalog);
        let handle = spawn(fetch_products_task(catalog, ticket(1)));

        gates.popular.send(Ok(popular(5))).unwrap();
        let _ = gates.sustainable.send(Err(NetworkError::Status {
            status: 503,
            body: "down".into(),
        }));
        match handle.await.unwrap() {
            ExecOutcome::Products { result, .. } => assert_eq!(result.unwrap_err(), "HTTP 503"),
            other => panic!("unexpected outcome {other:?}"),
        }
    }

    #[tokio::test]
    async fn cancelled_ticket_stops_the_task() {
        let (catalog, _gates) = GatedCatalog::new();
        let catalog: Arc<dyn ProductCatalog> = Arc::new(catalog);
        let ticket = ticket(7);
        let cancel = ticket.cancel.clone();
        let handle = spawn(fetch_products_task(catalog, ticket));

        cancel.cancel();
        assert!(matches!(handle.await.unwrap(), ExecOutcome::Cancelled { generation: 7 }));
    }

    #[tokio::test]
    async fn run_from_effects_spawns_fetch() {
        let mut app = test_app_with(Arc::new(StaticCatalog::new(2, 2)));
        app.home.mount();
        let batch = run_from_effects(&mut app, vec![Effect::FetchProducts]);
        assert_eq!(batch.pending.len(), 1);

        let outcome = batch.pending.into_iter().next().unwrap().await.unwrap();
        let msg = outcome.into_msg().unwrap();
        app.update(&msg);
        assert_eq!(app.home.popular_products().len(), 2);
    }
}
