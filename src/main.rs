//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the medsimplifier library and the Zellij
//! plugin API. Zellij events are translated to library [`Event`]s and the
//! returned [`Action`]s become host calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: Parse config, initialize tracing, create `AppState`
//! 2. **Permissions**: Ask for `WebAccess`; the result triggers the catalog load
//! 3. **Update**: Map keys, timers and HTTP replies, delegate to the library
//! 4. **Render**: Call the library render function
//!
//! # Event Mapping
//!
//! - `Key(..)` → see keybindings below
//! - `WebRequestResult` → `Event::ServiceResponse`
//! - `Timer` → `Event::DebounceElapsed`
//! - `PermissionRequestResult` → `Event::PermissionsResult`
//!
//! # Keybindings
//!
//! Global:
//! - `Tab`: Switch between catalog and editor
//! - `Ctrl+s`: Simplify the editor text
//! - `Ctrl+n` / `Ctrl+p`: Move down / up in the catalog
//! - `Ctrl+q`: Close plugin
//!
//! Catalog, normal mode:
//! - `j`/`Down`, `k`/`Up`: Move
//! - `Enter`: Load the example into the editor
//! - `/`: Search
//! - `q`: Close plugin
//!
//! Catalog, search mode:
//! - Characters: Type the query (while typing)
//! - `Enter`: Jump to results, or load the example when navigating
//! - `/`: Return to the query
//! - `Esc`: Exit search
//!
//! Editor:
//! - Characters / `Backspace`: Edit
//! - `Enter`: Simplify
//! - `Esc`: Back to the catalog

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use medsimplifier::service::{HttpMethod, ServiceReply, ServiceRequest};
use medsimplifier::{handle_event, Action, Config, Event, InputMode, Pane, SearchFocus};

register_plugin!(State);

/// Plugin state wrapper around the library's `AppState`.
struct State {
    app: medsimplifier::AppState,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: medsimplifier::initialize(&Config::default()),
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, builds the app state, requests web access and
    /// subscribes to events. The catalog is fetched once access is granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        medsimplifier::observability::init_tracing(&config);

        let _guard = tracing::debug_span!("plugin_load").entered();

        tracing::debug!(service_url = %config.service_url, theme = ?config.theme_name, "parsed configuration");
        self.app = medsimplifier::initialize(&config);

        request_permission(&[PermissionType::WebAccess]);
        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    /// Translates a Zellij event, delegates to `handle_event` and executes the
    /// resulting actions. Returns `true` if the UI should re-render.
    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!(
            "plugin_update_event",
            otel.name = %format!("plugin_update::{event_name}"),
            event_type = %event_name
        );
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match ServiceReply::from_host(status, body, &context) {
                    Some(reply) => Event::ServiceResponse(reply),
                    None => {
                        tracing::debug!(status, "ignoring web reply without a known request kind");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::Timer(_elapsed) => Event::DebounceElapsed,
            zellij_tile::prelude::Event::PermissionRequestResult(status) => Event::PermissionsResult {
                granted: matches!(status, PermissionStatus::Granted),
            },
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled");
                for action in &actions {
                    Self::execute_action(action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        medsimplifier::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps keyboard input to application events based on focus and mode.
    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('s') => Some(Event::Submit),
                BareKey::Char('n') => Some(Event::KeyDown),
                BareKey::Char('p') => Some(Event::KeyUp),
                BareKey::Char('q') => Some(Event::CloseFocus),
                _ => None,
            };
        }
        if key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }
        if key.bare_key == BareKey::Tab {
            return Some(Event::FocusNext);
        }

        match self.app.focus {
            Pane::Editor => Self::map_editor_key(key.bare_key),
            Pane::Catalog => match self.app.input_mode {
                InputMode::Normal => Self::map_catalog_key(key.bare_key),
                InputMode::Search(focus) => Self::map_search_key(key.bare_key, focus),
            },
        }
    }

    fn map_editor_key(bare_key: BareKey) -> Option<Event> {
        Some(match bare_key {
            BareKey::Enter => Event::Submit,
            BareKey::Esc => Event::Escape,
            BareKey::Backspace => Event::Backspace,
            BareKey::Char(c) => Event::Char(c),
            _ => return None,
        })
    }

    fn map_catalog_key(bare_key: BareKey) -> Option<Event> {
        Some(match bare_key {
            BareKey::Down | BareKey::Char('j') => Event::KeyDown,
            BareKey::Up | BareKey::Char('k') => Event::KeyUp,
            BareKey::Enter => Event::SelectExample,
            BareKey::Char('/') => Event::SearchMode,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Esc => Event::Escape,
            _ => return None,
        })
    }

    fn map_search_key(bare_key: BareKey, focus: SearchFocus) -> Option<Event> {
        Some(match (focus, bare_key) {
            (_, BareKey::Esc) => Event::ExitSearch,
            (_, BareKey::Down) => Event::KeyDown,
            (_, BareKey::Up) => Event::KeyUp,
            (SearchFocus::Typing, BareKey::Enter) => Event::FocusResults,
            (SearchFocus::Typing, BareKey::Backspace) => Event::Backspace,
            (SearchFocus::Typing, BareKey::Char(c)) => Event::Char(c),
            (SearchFocus::Navigating, BareKey::Enter) => Event::SelectExample,
            (SearchFocus::Navigating, BareKey::Char('j')) => Event::KeyDown,
            (SearchFocus::Navigating, BareKey::Char('k')) => Event::KeyUp,
            (SearchFocus::Navigating, BareKey::Char('/')) => Event::FocusSearchBar,
            _ => return None,
        })
    }

    /// Translates library actions to Zellij API calls.
    #[tracing::instrument(level = "debug")]
    fn execute_action(action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::ScheduleTimer { seconds } => set_timeout(*seconds),
            Action::SendRequest(request) => Self::send_request(request),
        }
    }

    fn send_request(request: &ServiceRequest) {
        let verb = match request.method {
            HttpMethod::Get => HttpVerb::Get,
            HttpMethod::Post => HttpVerb::Post,
        };

        tracing::debug!(url = %request.url, kind = ?request.kind, "sending web request");
        web_request(
            &request.url,
            verb,
            request.headers.clone(),
            request.body.clone(),
            request.context(),
        );
    }
}
