//! Admin console state layer for the `PixelMuse` platform
//!
//! Headless view-model components for the admin screens: session-flag
//! authentication, sign-out actions, the dashboard aggregator, the
//! pagination engine and the username filter, plus the HTTP client the
//! dashboard controller drives them with. Rendering is left to whatever
//! front end consumes this crate.

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    missing_docs,
    rust_2018_idioms
)]

pub mod actions;
pub mod client;
pub mod dashboard;
pub mod filter;
pub mod pagination;
pub mod session;

// Re-export the building blocks most consumers need
pub use actions::{Navigator, Notifier, sign_out};
pub use client::ApiClient;
pub use dashboard::{DashboardController, DashboardState, FetchState};
pub use filter::FilterState;
pub use pagination::{PageMarker, PaginationState, page_markers};
pub use session::{AdminAuth, AuthState, FileSessionStore, MemorySessionStore, SessionStore};
