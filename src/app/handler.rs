//! Command handling and state transition logic.
//!
//! This module implements the handler that applies parsed user commands to
//! [`DiscoveryState`], translating them into state changes and action
//! sequences. It is the control flow coordinator of the browser.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. The binder parses a line into a [`Command`]
//! 2. [`handle_command`] pattern-matches the command
//! 3. State mutations occur via `DiscoveryState` methods
//! 4. Actions are collected and returned for the runtime to execute
//!
//! # Command Types
//!
//! - **Filters**: `Search`, `Location`, `Organization`, `Category`, `Tag`,
//!   `Date`, `MinVolunteers`, `Mode`, `Sort`, `Reset`
//! - **Paging**: `Page`, `Next`, `Prev`
//! - **Screens**: `Show`, `Back`, `Redraw`
//! - **Session**: `Login`, `Logout`, `WhoAmI`, `Reload`, `Help`, `Quit`
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use eventscout::app::{handle_command, Command, DiscoveryState};
//! use eventscout::discovery::DEFAULT_PAGE_SIZE;
//! use eventscout::domain::SystemClock;
//! use eventscout::storage::Catalog;
//! use eventscout::ui::Theme;
//!
//! let mut state = DiscoveryState::new(
//!     Catalog::default(),
//!     DEFAULT_PAGE_SIZE,
//!     Arc::new(SystemClock),
//!     Theme::default(),
//! );
//! let (needs_render, actions) = handle_command(&mut state, &Command::Next);
//! assert!(needs_render);
//! assert!(actions.is_empty());
//! ```

use super::modes::ViewMode;
use super::{Action, DiscoveryState};
use crate::domain::{Category, DateRange, EventId, EventMode, FilterChange, SortOption};

/// A parsed user command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replaces the search text; an empty string clears it.
    Search(String),
    /// Selects one location, `None` for all.
    Location(Option<String>),
    /// Selects one organization, `None` for all.
    Organization(Option<String>),
    /// Adds or removes a category.
    Category(Category),
    /// Adds or removes a tag.
    Tag(String),
    Date(DateRange),
    MinVolunteers(u32),
    /// Selects a participation mode, `None` for all.
    Mode(Option<EventMode>),
    Sort(SortOption),
    /// Restores every filter to its default.
    Reset,

    /// Jumps to a 1-based page, clamped to the valid range.
    Page(usize),
    Next,
    Prev,

    /// Opens the detail screen of an event.
    Show(EventId),
    /// Returns from the detail screen to the result list.
    Back,
    /// Renders the current screen again without changing anything.
    Redraw,

    Login {
        identifier: String,
        password: String,
    },
    Logout,
    WhoAmI,
    Reload,
    Help,
    Quit,
}

impl Command {
    /// Verb naming the command, safe to record in spans (never the password).
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Search(_) => "search",
            Self::Location(_) => "location",
            Self::Organization(_) => "organization",
            Self::Category(_) => "category",
            Self::Tag(_) => "tag",
            Self::Date(_) => "date",
            Self::MinVolunteers(_) => "min_volunteers",
            Self::Mode(_) => "mode",
            Self::Sort(_) => "sort",
            Self::Reset => "reset",
            Self::Page(_) => "page",
            Self::Next => "next",
            Self::Prev => "prev",
            Self::Show(_) => "show",
            Self::Back => "back",
            Self::Redraw => "redraw",
            Self::Login { .. } => "login",
            Self::Logout => "logout",
            Self::WhoAmI => "whoami",
            Self::Reload => "reload",
            Self::Help => "help",
            Self::Quit => "quit",
        }
    }
}

/// Applies a command to the state and returns actions to execute.
///
/// # Parameters
///
/// * `state` - Mutable reference to the browser state
/// * `command` - Command to apply
///
/// # Returns
///
/// `(needs_render, actions)`: whether the screen changed, and the side effects
/// to run in order. Filter commands always return to the result list on
/// page 1; paging commands return to the result list on the new page.
///
/// # Tracing
///
/// Each call creates a debug-level span recording the command's
/// [`kind`](Command::kind).
pub fn handle_command(state: &mut DiscoveryState, command: &Command) -> (bool, Vec<Action>) {
    let _span = tracing::debug_span!("handle_command", command = command.kind()).entered();

    match command {
        Command::Search(text) => filter(state, FilterChange::Search(text.clone())),
        Command::Location(location) => filter(state, FilterChange::Location(location.clone())),
        Command::Organization(organization) => {
            filter(state, FilterChange::Organization(organization.clone()))
        }
        Command::Date(range) => filter(state, FilterChange::DateRange(*range)),
        Command::MinVolunteers(min) => filter(state, FilterChange::MinVolunteers(*min)),
        Command::Mode(mode) => filter(state, FilterChange::Mode(*mode)),
        Command::Sort(sort) => filter(state, FilterChange::SortBy(*sort)),
        Command::Category(category) => {
            state.toggle_category(*category);
            state.close_detail();
            (true, vec![])
        }
        Command::Tag(tag) => {
            state.toggle_tag(tag);
            state.close_detail();
            (true, vec![])
        }
        Command::Reset => {
            let was_restricted = !state.filters().is_unrestricted()
                || state.filters().sort_by != SortOption::default();
            state.reset_filters();
            state.close_detail();
            if was_restricted {
                (true, vec![Action::Notify("Filters cleared".to_string())])
            } else {
                (true, vec![])
            }
        }
        Command::Page(page) => {
            state.go_to_page(*page);
            state.close_detail();
            (true, vec![])
        }
        Command::Next => {
            state.next_page();
            state.close_detail();
            (true, vec![])
        }
        Command::Prev => {
            state.prev_page();
            state.close_detail();
            (true, vec![])
        }
        Command::Show(id) => {
            if state.open_detail(*id) {
                tracing::debug!(event_id = %id, "opened event detail");
                (true, vec![])
            } else {
                (false, vec![Action::Notify(format!("No event with id {id}"))])
            }
        }
        Command::Back => {
            let was_detail = matches!(state.view_mode, ViewMode::Detail(_));
            state.close_detail();
            (was_detail, vec![])
        }
        Command::Redraw => (true, vec![]),
        Command::Login {
            identifier,
            password,
        } => (
            false,
            vec![Action::Login {
                identifier: identifier.clone(),
                password: password.clone(),
            }],
        ),
        Command::Logout => (false, vec![Action::Logout]),
        Command::WhoAmI => (false, vec![Action::WhoAmI]),
        Command::Reload => (false, vec![Action::ReloadCatalog]),
        Command::Help => (false, vec![Action::ShowHelp]),
        Command::Quit => (false, vec![Action::Quit]),
    }
}

fn filter(state: &mut DiscoveryState, change: FilterChange) -> (bool, Vec<Action>) {
    state.set_filter(change);
    state.close_detail();
    tracing::debug!(filtered_count = state.filtered_count(), "filters applied");
    (true, vec![])
}
