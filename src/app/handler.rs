//! Event handling and state transition logic.
//!
//! [`handle_event`] is the only place where application state changes. It
//! pattern-matches an [`Event`], mutates [`AppState`], and returns whether the
//! UI should re-render plus the [`Action`]s the runtime must execute.
//!
//! # Event Types
//!
//! - **Navigation**: `KeyDown`, `KeyUp`, `FocusNext`, `SelectExample`
//! - **Input**: `Char`, `Backspace`, `Escape`, `Submit`
//! - **Search**: `SearchMode`, `FocusSearchBar`, `FocusResults`, `ExitSearch`
//! - **System**: `DebounceElapsed`, `PermissionsResult`, `ServiceResponse`
//!
//! # Example
//!
//! ```rust
//! use medsimplifier::app::{handle_event, Action, AppState, Event};
//! use medsimplifier::service::Endpoints;
//! use medsimplifier::ui::Theme;
//!
//! let mut state = AppState::new(Endpoints::default(), Theme::default());
//! let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true })?;
//! assert!(matches!(actions.as_slice(), [Action::SendRequest(_)]));
//! # Ok::<(), medsimplifier::SimplifierError>(())
//! ```

use super::modes::{InputMode, Pane, RequestPhase, SearchFocus};
use crate::app::{Action, AppState};
use crate::domain::{Result, SimplifierError};
use crate::service::{interpret_simplify_reply, RequestKind, ServiceReply};

/// Events from user input, host timers and host HTTP replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Moves the catalog cursor down (wraps to top).
    KeyDown,
    /// Moves the catalog cursor up (wraps to bottom).
    KeyUp,
    /// Switches focus between the catalog and the editor.
    FocusNext,
    /// Hides the plugin pane.
    CloseFocus,
    /// Loads the highlighted catalog example into the editor.
    SelectExample,
    /// Enters search mode with typing focus.
    SearchMode,
    /// Returns to typing the query (from navigating results).
    FocusSearchBar,
    /// Moves from typing the query to navigating its results.
    FocusResults,
    /// Leaves search mode and clears the query.
    ExitSearch,
    /// Types a character into the focused input.
    Char(char),
    /// Deletes the last character of the focused input.
    Backspace,
    /// Backs out of the current context.
    Escape,
    /// Submits the editor text for simplification.
    Submit,

    /// A debounce timer elapsed.
    DebounceElapsed,

    /// Outcome of the `WebAccess` permission request.
    PermissionsResult {
        /// Whether web access was granted.
        granted: bool,
    },

    /// An HTTP request issued via [`Action::SendRequest`] completed.
    ServiceResponse(ServiceReply),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order.
///
/// # Errors
///
/// Returns an error if a simplify request body cannot be serialized.
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event).entered();

    match event {
        Event::KeyDown => {
            if state.focus != Pane::Catalog {
                return Ok((false, vec![]));
            }
            state.move_selection_down();
            Ok((true, vec![]))
        }
        Event::KeyUp => {
            if state.focus != Pane::Catalog {
                return Ok((false, vec![]));
            }
            state.move_selection_up();
            Ok((true, vec![]))
        }
        Event::FocusNext => {
            state.focus = state.focus.toggled();
            tracing::debug!(focus = ?state.focus, "focus changed");
            Ok((true, vec![]))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::SelectExample => {
            if state.load_selected_example() {
                return Ok((true, vec![]));
            }

            tracing::debug!("no example selected");
            if matches!(state.input_mode, InputMode::Search(_)) {
                tracing::debug!("exiting search mode (no selection)");
                exit_search(state);
                return Ok((true, vec![]));
            }
            Ok((false, vec![]))
        }
        Event::SearchMode => {
            tracing::debug!("entering search mode");
            state.focus = Pane::Catalog;
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            state.search_query = String::new();
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::FocusSearchBar => {
            state.input_mode = InputMode::Search(SearchFocus::Typing);
            Ok((true, vec![]))
        }
        Event::FocusResults => {
            if state.search_query.trim().is_empty() {
                exit_search(state);
                return Ok((true, vec![]));
            }

            state.input_mode = InputMode::Search(SearchFocus::Navigating);
            Ok((true, vec![]))
        }
        Event::ExitSearch => {
            tracing::debug!(query = %state.search_query, "exiting search mode");
            exit_search(state);
            Ok((true, vec![]))
        }
        Event::Char(c) => match state.focus {
            Pane::Editor => {
                let seconds = state.edit_input(|input| input.push(*c));
                Ok((true, vec![Action::ScheduleTimer { seconds }]))
            }
            Pane::Catalog => {
                if !matches!(state.input_mode, InputMode::Search(_)) {
                    return Ok((false, vec![]));
                }
                state.search_query.push(*c);
                tracing::trace!(query = %state.search_query, char = %c, "search query updated");
                state.apply_search_filter();
                Ok((true, vec![]))
            }
        },
        Event::Backspace => match state.focus {
            Pane::Editor => {
                if state.input.is_empty() {
                    return Ok((false, vec![]));
                }
                let seconds = state.edit_input(|input| {
                    input.pop();
                });
                Ok((true, vec![Action::ScheduleTimer { seconds }]))
            }
            Pane::Catalog => {
                if !matches!(state.input_mode, InputMode::Search(_)) {
                    return Ok((false, vec![]));
                }
                state.search_query.pop();
                state.apply_search_filter();
                Ok((true, vec![]))
            }
        },
        Event::Escape => {
            match state.focus {
                Pane::Editor => state.focus = Pane::Catalog,
                Pane::Catalog => exit_search(state),
            }
            Ok((true, vec![]))
        }
        Event::Submit => match state.begin_submission()? {
            Some(request) => Ok((true, vec![Action::SendRequest(request)])),
            None => Ok((true, vec![])),
        },
        Event::DebounceElapsed => {
            if !state.debounce.on_timer() {
                tracing::trace!("stale debounce tick");
                return Ok((false, vec![]));
            }
            state.run_validation();
            tracing::debug!(
                is_valid = state.verdict.is_valid,
                phase = ?state.phase,
                "debounced validation ran"
            );
            Ok((true, vec![]))
        }
        Event::PermissionsResult { granted } => {
            if *granted {
                tracing::debug!("web access granted, fetching catalog");
                let actions = state
                    .catalog
                    .begin_load(&state.endpoints.catalog_url)
                    .map(Action::SendRequest)
                    .into_iter()
                    .collect();
                return Ok((false, actions));
            }

            tracing::warn!("web access denied, using fallback catalog");
            let denied = Err(SimplifierError::Catalog("web access permission denied".to_string()));
            let _ = state.catalog.complete_load(denied);
            state.apply_search_filter();
            Ok((true, vec![]))
        }
        Event::ServiceResponse(reply) => {
            let _context_guard = reply.trace_context.as_ref().and_then(|trace| trace.attach());
            let _reply_span = tracing::debug_span!(
                "service_reply",
                kind = ?reply.kind,
                status = reply.status,
                body_len = reply.body.len()
            )
            .entered();

            match reply.kind {
                RequestKind::Catalog => {
                    handle_catalog_reply(state, reply);
                    Ok((true, vec![]))
                }
                RequestKind::Simplify => {
                    if state.phase != RequestPhase::Submitting {
                        tracing::debug!("simplify reply with no submission in flight, ignoring");
                        return Ok((false, vec![]));
                    }
                    let outcome = interpret_simplify_reply(reply);
                    state.finish_submission(outcome);
                    Ok((true, vec![]))
                }
            }
        }
    }
}

fn exit_search(state: &mut AppState) {
    state.input_mode = InputMode::Normal;
    state.search_query = String::new();
    state.apply_search_filter();
}

fn handle_catalog_reply(state: &mut AppState, reply: &ServiceReply) {
    let feed = if reply.is_success_status() {
        Ok(reply.body.as_slice())
    } else {
        Err(SimplifierError::Service {
            status: reply.status,
            body: String::from_utf8_lossy(&reply.body).into_owned(),
        })
    };

    match state.catalog.complete_load(feed) {
        Ok(count) => tracing::debug!(count, "catalog ready"),
        Err(e) => tracing::debug!(error = %e, "catalog fell back to built-in examples"),
    }
    state.apply_search_filter();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::Endpoints;
    use crate::ui::Theme;

    fn state_with_fallback() -> AppState {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        handle_event(&mut state, &Event::PermissionsResult { granted: false }).expect("handled");
        state
    }

    fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
        text.chars()
            .flat_map(|c| handle_event(state, &Event::Char(c)).expect("handled").1)
            .collect()
    }

    #[test]
    fn permission_grant_requests_catalog_once() {
        let mut state = AppState::new(Endpoints::from_base("http://svc"), Theme::default());

        let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).expect("handled");
        match actions.as_slice() {
            [Action::SendRequest(request)] => {
                assert_eq!(request.kind, RequestKind::Catalog);
                assert_eq!(request.url, "http://svc/static/data/medical_examples.json");
            }
            other => panic!("unexpected actions {other:?}"),
        }

        let (_, again) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).expect("handled");
        assert!(again.is_empty());
    }

    #[test]
    fn permission_denial_installs_fallback() {
        let state = state_with_fallback();
        assert_eq!(state.filtered_examples.len(), 3);
    }

    #[test]
    fn failed_catalog_reply_falls_back() {
        let mut state = AppState::new(Endpoints::default(), Theme::default());
        let reply = ServiceReply {
            kind: RequestKind::Catalog,
            status: 404,
            body: b"Not Found".to_vec(),
            trace_context: None,
        };
        handle_event(&mut state, &Event::ServiceResponse(reply)).expect("handled");
        assert_eq!(state.filtered_examples.len(), 3);
    }

    #[test]
    fn typing_in_catalog_normal_mode_is_ignored() {
        let mut state = state_with_fallback();
        let (render, actions) = handle_event(&mut state, &Event::Char('x')).expect("handled");
        assert!(!render);
        assert!(actions.is_empty());
        assert!(state.input.is_empty());
    }

    #[test]
    fn search_typing_filters_catalog() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::SearchMode).expect("handled");
        type_text(&mut state, "neuro");

        assert_eq!(state.filtered_examples.len(), 1);
        assert_eq!(state.filtered_examples[0].id, "febrile-seizure");

        handle_event(&mut state, &Event::ExitSearch).expect("handled");
        assert_eq!(state.filtered_examples.len(), 3);
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn focus_results_with_blank_query_exits_search() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::SearchMode).expect("handled");
        handle_event(&mut state, &Event::FocusResults).expect("handled");
        assert_eq!(state.input_mode, InputMode::Normal);
    }

    #[test]
    fn editor_keystrokes_schedule_debounce() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::FocusNext).expect("handled");

        let actions = type_text(&mut state, "ab");

        assert_eq!(
            actions,
            vec![
                Action::ScheduleTimer { seconds: 0.3 },
                Action::ScheduleTimer { seconds: 0.3 }
            ]
        );
        assert_eq!(state.input, "ab");
        assert_eq!(state.phase, RequestPhase::Validating);
    }

    #[test]
    fn only_last_debounce_tick_validates() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::FocusNext).expect("handled");
        type_text(&mut state, "Pasien demam tinggi");
        let ticks = "Pasien demam tinggi".chars().count();

        for _ in 1..ticks {
            let (render, _) = handle_event(&mut state, &Event::DebounceElapsed).expect("handled");
            assert!(!render);
            assert_eq!(state.phase, RequestPhase::Validating);
        }

        let (render, _) = handle_event(&mut state, &Event::DebounceElapsed).expect("handled");
        assert!(render);
        assert_eq!(state.phase, RequestPhase::Ready);
        assert!(state.verdict.is_valid);
    }

    #[test]
    fn backspace_on_empty_editor_does_nothing() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::FocusNext).expect("handled");
        let (render, actions) = handle_event(&mut state, &Event::Backspace).expect("handled");
        assert!(!render);
        assert!(actions.is_empty());
    }

    #[test]
    fn escape_from_editor_returns_to_catalog() {
        let mut state = state_with_fallback();
        handle_event(&mut state, &Event::FocusNext).expect("handled");
        handle_event(&mut state, &Event::Escape).expect("handled");
        assert_eq!(state.focus, Pane::Catalog);
    }

    #[test]
    fn stray_simplify_reply_is_ignored() {
        let mut state = state_with_fallback();
        let reply = ServiceReply {
            kind: RequestKind::Simplify,
            status: 200,
            body: br#"{"status":"success","simplified_text":"X"}"#.to_vec(),
            trace_context: None,
        };
        let (render, _) = handle_event(&mut state, &Event::ServiceResponse(reply)).expect("handled");
        assert!(!render);
        assert!(state.outcome.is_none());
    }

    #[test]
    fn close_focus_hides_plugin() {
        let mut state = state_with_fallback();
        let (_, actions) = handle_event(&mut state, &Event::CloseFocus).expect("handled");
        assert_eq!(actions, vec![Action::CloseFocus]);
    }
}
