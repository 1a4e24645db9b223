//! End-to-end request lifecycle driven through `handle_event`.

use std::collections::BTreeMap;

use medsimplifier::app::RequestPhase;
use medsimplifier::service::{RequestKind, ServiceReply, ServiceRequest};
use medsimplifier::ui::viewmodel::{OutputPanel, TermPair, WarningKind};
use medsimplifier::{handle_event, initialize, Action, AppState, Config, Event, Pane, SimplifyOutcome};

const VALID_PASSAGE: &str = "Pasien mengalami demam tinggi";

fn state_with_fallback_catalog() -> AppState {
    let mut state = initialize(&Config::default());
    handle_event(&mut state, &Event::PermissionsResult { granted: false }).expect("handled");
    state
}

fn type_into_editor(state: &mut AppState, text: &str) {
    if state.focus != Pane::Editor {
        handle_event(state, &Event::FocusNext).expect("handled");
    }
    for c in text.chars() {
        handle_event(state, &Event::Char(c)).expect("handled");
    }
    handle_event(state, &Event::DebounceElapsed).expect("handled");
}

fn submit(state: &mut AppState) -> ServiceRequest {
    let (_, actions) = handle_event(state, &Event::Submit).expect("handled");
    match actions.as_slice() {
        [Action::SendRequest(request)] => request.clone(),
        other => panic!("expected one request, got {other:?}"),
    }
}

/// Builds the reply the host would deliver for `request`.
fn reply_to(request: &ServiceRequest, status: u16, body: &str) -> Event {
    let reply = ServiceReply::from_host(status, body.as_bytes().to_vec(), &request.context())
        .expect("context identifies the request");
    Event::ServiceResponse(reply)
}

#[test]
fn success_renders_text_and_term_pairs() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, VALID_PASSAGE);

    let request = submit(&mut state);
    assert_eq!(request.kind, RequestKind::Simplify);
    assert_eq!(request.url, "http://localhost:5000/simplify");

    let vm = state.compute_viewmodel(40, 100);
    assert!(vm.submit.busy);
    assert!(!vm.submit.enabled);
    assert_eq!(vm.submit.label, "Simplifying...");

    let body = r#"{"status":"success","simplified_text":"X","simplification_map":{"A":"B"}}"#;
    handle_event(&mut state, &reply_to(&request, 200, body)).expect("handled");

    let vm = state.compute_viewmodel(40, 100);
    assert_eq!(
        vm.output,
        Some(OutputPanel::Simplified {
            text: "X".to_string(),
            terms: vec![TermPair {
                original: "A".to_string(),
                simplified: "B".to_string(),
            }],
        })
    );
    assert_eq!(vm.submit.label, "Simplify");
    assert!(vm.submit.enabled);
    assert!(!vm.submit.busy);
}

#[test]
fn blocked_reply_shows_message_without_terms() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, VALID_PASSAGE);
    let request = submit(&mut state);

    handle_event(&mut state, &reply_to(&request, 400, r#"{"status":"blocked","message":"M"}"#))
        .expect("handled");

    assert_eq!(
        state.compute_viewmodel(40, 100).output,
        Some(OutputPanel::Warning {
            kind: WarningKind::Blocked,
            message: "M".to_string(),
        })
    );
    assert_eq!(state.phase, RequestPhase::Ready);
}

#[test]
fn transport_failure_surfaces_host_message() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, VALID_PASSAGE);
    let request = submit(&mut state);

    handle_event(&mut state, &reply_to(&request, 503, "connection refused")).expect("handled");

    match &state.outcome {
        Some(SimplifyOutcome::Error { message }) => {
            assert!(message.contains("503"), "{message}");
            assert!(message.contains("connection refused"), "{message}");
        }
        other => panic!("expected error outcome, got {other:?}"),
    }
    assert!(matches!(
        state.compute_viewmodel(40, 100).output,
        Some(OutputPanel::Warning { kind: WarningKind::Failed, .. })
    ));
}

#[test]
fn control_follows_current_input_after_outcome() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, VALID_PASSAGE);
    let request = submit(&mut state);

    // Trim the passage to one word while the request is in flight.
    for _ in 0..VALID_PASSAGE.len() - "Pasien".len() {
        handle_event(&mut state, &Event::Backspace).expect("handled");
    }
    assert_eq!(state.phase, RequestPhase::Submitting);

    handle_event(&mut state, &reply_to(&request, 200, r#"{"status":"success","simplified_text":"X"}"#))
        .expect("handled");

    let vm = state.compute_viewmodel(40, 100);
    assert_eq!(vm.submit.label, "Simplify");
    assert!(!vm.submit.enabled);
}

#[test]
fn invalid_submission_is_refused_locally() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, "hi");

    let (render, actions) = handle_event(&mut state, &Event::Submit).expect("handled");
    assert!(render);
    assert!(actions.is_empty());

    let alert = state.compute_viewmodel(40, 100).alert.expect("alert shown");
    assert!(alert.contains("at least 2 words"), "{alert}");

    handle_event(&mut state, &Event::Char('!')).expect("handled");
    assert!(state.alert.is_none());
}

#[test]
fn second_submit_while_in_flight_sends_nothing() {
    let mut state = state_with_fallback_catalog();
    type_into_editor(&mut state, VALID_PASSAGE);
    submit(&mut state);

    let (_, actions) = handle_event(&mut state, &Event::Submit).expect("handled");
    assert!(actions.is_empty());
}

#[test]
fn validation_waits_for_typing_to_pause() {
    let mut state = state_with_fallback_catalog();
    handle_event(&mut state, &Event::FocusNext).expect("handled");

    let mut timers = 0;
    for c in VALID_PASSAGE.chars() {
        let (_, actions) = handle_event(&mut state, &Event::Char(c)).expect("handled");
        assert_eq!(actions, vec![Action::ScheduleTimer { seconds: 0.3 }]);
        timers += 1;
    }
    assert_eq!(state.phase, RequestPhase::Validating);
    assert!(!state.compute_viewmodel(40, 100).submit.enabled);

    // Only the last of the overlapping timers validates.
    for _ in 1..timers {
        let (render, _) = handle_event(&mut state, &Event::DebounceElapsed).expect("handled");
        assert!(!render);
    }
    assert_eq!(state.phase, RequestPhase::Validating);

    handle_event(&mut state, &Event::DebounceElapsed).expect("handled");
    assert_eq!(state.phase, RequestPhase::Ready);
    assert!(state.compute_viewmodel(40, 100).submit.enabled);
}

#[test]
fn unreachable_feed_falls_back_to_built_in_catalog() {
    let mut state = initialize(&Config::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).expect("handled");

    let request = match actions.as_slice() {
        [Action::SendRequest(request)] => request.clone(),
        other => panic!("expected catalog request, got {other:?}"),
    };
    assert_eq!(request.kind, RequestKind::Catalog);
    assert!(state.compute_viewmodel(40, 100).empty_state.is_some());

    handle_event(&mut state, &reply_to(&request, 0, "connection refused")).expect("handled");

    let vm = state.compute_viewmodel(40, 100);
    assert_eq!(vm.display_items.len(), 3);
    assert_eq!(vm.display_items[0].name, "Hypertension");
    assert!(vm.empty_state.is_none());
}

#[test]
fn feed_entries_load_and_search_narrows_them() {
    let mut state = initialize(&Config::default());
    let (_, actions) = handle_event(&mut state, &Event::PermissionsResult { granted: true }).expect("handled");
    let [Action::SendRequest(request)] = actions.as_slice() else {
        panic!("expected catalog request");
    };

    let feed = r#"{"diseases":[
        {"id":1,"name":"Diabetes Tipe 2","category":"Endokrin","example":"Pasien diabetes tipe dua kontrol rutin."},
        {"id":2,"name":"Asma","category":"Respirasi"}
    ]}"#;
    handle_event(&mut state, &reply_to(request, 200, feed)).expect("handled");
    assert_eq!(state.filtered_examples.len(), 2);

    handle_event(&mut state, &Event::SearchMode).expect("handled");
    for c in "DIABET".chars() {
        handle_event(&mut state, &Event::Char(c)).expect("handled");
    }
    let vm = state.compute_viewmodel(40, 100);
    assert_eq!(vm.display_items.len(), 1);
    assert_eq!(vm.display_items[0].highlight_ranges, vec![(0, 6)]);

    handle_event(&mut state, &Event::FocusResults).expect("handled");
    handle_event(&mut state, &Event::SelectExample).expect("handled");
    assert_eq!(state.focus, Pane::Editor);
    assert_eq!(state.input, "Pasien diabetes tipe dua kontrol rutin.");
    assert!(state.verdict.is_valid);
}

#[test]
fn unknown_reply_context_is_not_ours() {
    assert!(ServiceReply::from_host(200, vec![], &BTreeMap::new()).is_none());
}
