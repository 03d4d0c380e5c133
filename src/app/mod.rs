//! Application layer coordinating state, commands and actions.
//!
//! This module sits between the terminal runtime (`main.rs`) and the
//! domain/discovery/storage layers. It implements the command-driven flow of
//! the event browser.
//!
//! # Architecture
//!
//! The application layer follows a unidirectional data flow pattern:
//!
//! ```text
//! Input line → command::parse → handle_command → State Mutations → Actions → Side Effects
//!                                     ↑                                          ↓
//!                                     └──────── reloaded catalog / session ──────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the handler
//! - [`command`]: Line parsing and option resolution
//! - [`handler`]: Command processing and state transition coordinator
//! - [`modes`]: List/detail screen selection
//! - [`notifications`]: Transient message with an owned expiry timer
//! - [`state`]: Central browser state and view model computation
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use eventscout::app::{command, handle_command, DiscoveryState};
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
//! let cmd = command::parse("min 30", state.catalog())?;
//! let (needs_render, _actions) = handle_command(&mut state, &cmd);
//! assert!(needs_render);
//! assert_eq!(state.filters().min_volunteers, 30);
//! # Ok::<(), eventscout::EventScoutError>(())
//! ```

pub mod actions;
pub mod command;
pub mod handler;
pub mod modes;
pub mod notifications;
pub mod state;

pub use actions::Action;
pub use handler::{handle_command, Command};
pub use modes::ViewMode;
pub use notifications::Notifier;
pub use state::{DiscoveryState, PageView};
