//! Runtime: event loop and input routing for the TUI.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode).
//! - Route keys to the active component and execute returned `Effect`s.
//! - Poll spawned fetches and feed their outcomes back as `Msg`s.
//! - Cancel outstanding work and restore the terminal on exit.
//!
//! Input comes from a dedicated OS thread that blocks on
//! `crossterm::event::read()` and forwards events over a channel. The loop
//! redraws after every input event or completed command; nothing animates, so
//! there is no ticker.
use std::io::Stdout;

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::CrosstermBackend};
use tokio::{signal, sync::mpsc, task::JoinHandle};
use tracing::{debug, info, warn};
use verdant_types::{Effect, ExecOutcome, Msg, Route};

use crate::app::{App, SharedCtx};
use crate::cmd;
use crate::ui::components::component::Component;
use crate::ui::main_component::MainView;

type PendingExecs = FuturesUnordered<JoinHandle<ExecOutcome>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    terminal.draw(|frame| main_view.render(frame, frame.area(), app))?;
    Ok(())
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Mouse(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Feed a finished command back into the app.
fn handle_outcome(app: &mut App, main_view: &mut MainView, outcome: ExecOutcome) -> Vec<Effect> {
    match outcome {
        ExecOutcome::Log(line) => {
            warn!("{line}");
            Vec::new()
        }
        other => match other.into_msg() {
            Some(msg) => main_view.handle_message(app, &msg),
            None => Vec::new(),
        },
    }
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop, and performs cleanup on exit whether or not the loop failed.
pub async fn run_app(ctx: SharedCtx) -> Result<()> {
    let mut input_receiver = spawn_input_thread();
    let mut app = App::new(ctx);
    let mut main_view = MainView::new(None);
    let mut pending_execs = PendingExecs::new();

    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver, &mut pending_execs).await;

    shutdown(&mut app, &mut pending_execs);
    let cleanup = cleanup_terminal(&mut terminal);
    result.and(cleanup)
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
    pending_execs: &mut PendingExecs,
) -> Result<()> {
    let mut effects = vec![Effect::SwitchTo(Route::Home)];

    loop {
        if process_effects(app, main_view, &mut effects, pending_execs) == Flow::Exit {
            info!("quit requested");
            break;
        }
        render(terminal, app, main_view)?;

        tokio::select! {
            // Terminal input events
            maybe_event = input_receiver.recv() => {
                match maybe_event {
                    Some(Event::Key(key_event)) if is_ctrl_c(&key_event) => break,
                    Some(event) => effects.extend(handle_input_event(app, main_view, event)),
                    // Input channel closed; break out to shut down cleanly.
                    None => break,
                }
            }

            Some(joined) = pending_execs.next(), if !pending_execs.is_empty() => {
                let outcome = joined.unwrap_or_else(|error| ExecOutcome::Log(format!("Execution task failed: {error}")));
                effects.extend(handle_outcome(app, main_view, outcome));
            }

            // Handle Ctrl+C delivered as a signal
            _ = signal::ctrl_c() => break,
        }
    }
    Ok(())
}

/// Cancel the home lifecycle and abort anything still running.
fn shutdown(app: &mut App, pending_execs: &mut PendingExecs) {
    app.home.unmount();
    for handle in pending_execs.iter() {
        handle.abort();
    }
    debug!(aborted = pending_execs.len(), "runtime shut down");
}

/// Drain `effects`, including any raised while handling them.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: &mut Vec<Effect>, pending_execs: &mut PendingExecs) -> Flow {
    while !effects.is_empty() {
        // move effects out of their Vec to avoid processing new effects while processing current ones
        let mut effects_to_process = std::mem::take(effects);
        if effects_to_process.contains(&Effect::Quit) {
            return Flow::Exit;
        }

        handle_navigation_effects(app, main_view, &mut effects_to_process, effects);
        let command_batch = cmd::run_from_effects(app, effects_to_process);
        pending_execs.extend(command_batch.pending);
    }
    Flow::Continue
}

fn handle_navigation_effects(app: &mut App, main_view: &mut MainView, effects: &mut Vec<Effect>, queued_effects: &mut Vec<Effect>) {
    let navigation_effects = effects
        .extract_if(.., |effect| matches!(effect, Effect::SwitchTo(_) | Effect::ShowModal(_) | Effect::CloseModal))
        .collect::<Vec<Effect>>();

    for effect in navigation_effects {
        match effect {
            Effect::SwitchTo(route) => {
                if let Some(mut view) = main_view.content_view.take() {
                    queued_effects.extend(view.on_route_exit(app));
                }
                main_view.set_current_route(app, route);
                if let Some(view) = main_view.content_view.as_mut() {
                    queued_effects.extend(view.on_route_enter(app));
                }
            }
            Effect::ShowModal(modal) => {
                if let Some((mut view, _)) = main_view.modal_view.take() {
                    queued_effects.extend(view.on_route_exit(app));
                }
                main_view.set_open_modal_kind(app, Some(modal));
                if let Some((view, _)) = main_view.modal_view.as_mut() {
                    queued_effects.extend(view.on_route_enter(app));
                }
            }
            Effect::CloseModal => {
                if let Some((view, _)) = main_view.modal_view.as_mut() {
                    queued_effects.extend(view.on_route_exit(app));
                }
                main_view.set_open_modal_kind(app, None);
            }
            _ => {}
        }
    }
}
