//! Top-level rendering coordinator.
//!
//! Rendering is two steps:
//!
//! 1. **View Model Computation**: `AppState` → `UIViewModel`
//! 2. **Component Rendering**: `UIViewModel` → ANSI output on stdout

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);

    render_viewmodel(&viewmodel, &state.theme, rows, cols);
}

/// Renders a precomputed view model.
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, rows: usize, cols: usize) {
    let _span = tracing::trace_span!("render", rows, cols, items = vm.display_items.len()).entered();

    components::render_layout(vm, theme, cols, rows);
}
