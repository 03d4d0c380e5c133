//! Top-level rendering coordinator.
//!
//! This module provides the rendering entry points. It computes the view
//! model from [`DiscoveryState`] and delegates to the list or detail layout.
//!
//! # Architecture
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: Transform `DiscoveryState` into `UIViewModel`
//! 2. **Component Rendering**: Delegate to specialized component renderers
//!
//! Output is returned as a `String` rather than printed, so the binder decides
//! where it goes and tests can inspect it.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use eventscout::app::DiscoveryState;
//! use eventscout::discovery::DEFAULT_PAGE_SIZE;
//! use eventscout::domain::SystemClock;
//! use eventscout::storage::Catalog;
//! use eventscout::ui::{render, Theme};
//!
//! let state = DiscoveryState::new(
//!     Catalog::default(),
//!     DEFAULT_PAGE_SIZE,
//!     Arc::new(SystemClock),
//!     Theme::plain(),
//! );
//! let screen = render(&state, None, 80);
//! assert!(screen.contains("0 results"));
//! assert!(screen.contains("No events match these filters."));
//! ```

use crate::app::DiscoveryState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::UIViewModel;

/// Renders the current screen of `state` for a terminal `cols` wide.
///
/// # Parameters
///
/// * `state` - Current browser state
/// * `notification` - Message to show on the notification line, if any
/// * `cols` - Terminal width in columns
#[must_use]
pub fn render(state: &DiscoveryState, notification: Option<&str>, cols: usize) -> String {
    let viewmodel = state.compute_viewmodel(cols, notification);
    render_viewmodel(&viewmodel, &state.theme, cols)
}

/// Renders a pre-computed view model with the layout its content calls for.
#[must_use]
pub fn render_viewmodel(vm: &UIViewModel, theme: &Theme, cols: usize) -> String {
    let mut out = String::with_capacity(4096);
    if let Some(detail) = &vm.detail {
        components::render_detail_screen(&mut out, vm, detail, theme, cols);
    } else {
        components::render_list_screen(&mut out, vm, theme, cols);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{handle_command, Command};
    use crate::domain::{EventId, FixedClock};
    use crate::storage::{Catalog, JsonCatalog};
    use chrono::{TimeZone, Utc};
    use std::num::NonZeroUsize;
    use std::sync::Arc;

    fn state() -> DiscoveryState {
        let records = JsonCatalog::parse(include_str!("../../data/events.json")).unwrap();
        DiscoveryState::new(
            Catalog::from_records(records).unwrap(),
            NonZeroUsize::new(4).unwrap(),
            Arc::new(FixedClock(Utc.with_ymd_and_hms(2024, 6, 15, 0, 0, 0).unwrap())),
            Theme::plain(),
        )
    }

    #[test]
    fn list_screen_shows_first_page_in_date_order() {
        let screen = render(&state(), None, 100);

        assert!(screen.contains("8 results"));
        assert!(screen.contains("Page 1 / 2"));
        assert!(screen.contains("next ›"));
        assert!(!screen.contains("‹ prev"));

        let first = screen.find("Şehir İçi Gıda Paylaşım Ağı").unwrap();
        let second = screen.find("Boğaz Çevresi Kıyı Temizliği").unwrap();
        assert!(first < second);
        assert!(screen.contains("Online Türkçe"));
        assert!(!screen.contains("Sanatla Terapi"));
    }

    #[test]
    fn chips_and_notification_are_rendered() {
        let mut state = state();
        handle_command(&mut state, &Command::Tag("STEM".to_string()));
        let screen = render(&state, Some("Signed in as ayse"), 100);

        assert!(screen.contains(" Tag: STEM  (tag STEM) "));
        assert!(screen.contains("2 results"));
        assert!(screen.contains("Signed in as ayse"));
    }

    #[test]
    fn empty_results_render_the_empty_state() {
        let mut state = state();
        handle_command(&mut state, &Command::Search("zzzz".to_string()));
        let screen = render(&state, None, 80);

        assert!(screen.contains("No events match these filters."));
        assert!(!screen.contains("TITLE"));
        assert!(screen.contains("Page 1 / 1"));
    }

    #[test]
    fn detail_screen_lists_sections() {
        let mut state = state();
        handle_command(&mut state, &Command::Show(EventId(1)));
        let screen = render(&state, None, 100);

        assert!(screen.contains("Boğaz Çevresi Kıyı Temizliği"));
        assert!(screen.contains("Zeynep Aksoy"));
        assert!(screen.contains("Schedule"));
        assert!(!screen.contains("Page 1"));
    }

    #[test]
    fn plain_theme_emits_no_color_escapes() {
        let screen = render(&state(), None, 80);
        assert!(!screen.contains("38;2;"));
    }
}
