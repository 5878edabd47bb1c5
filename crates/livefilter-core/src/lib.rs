//! Page model and live substring filter.
//!
//! # Architecture
//!
//! ```text
//! input change ──► LiveFilter::on_query_change ──► compute_visibility ──► VisibilitySink
//!                        ▲                                                  (Page, TUI list)
//!                        └── attached once to a Page under a FilterProfile
//! ```
//!
//! The decision logic is pure; everything that renders entries implements
//! [`VisibilitySink`] and receives one [`Visibility`] per candidate entry.

pub mod config;
pub mod error;
pub mod filter;
pub mod page;
pub mod profile;
pub mod types;

pub use error::{PageError, ProfileError};
pub use filter::{compute_visibility, Attach, InactiveReason, LiveFilter, Query, VisibilitySink};
pub use page::{Element, Page, ReadyState};
pub use profile::{FilterProfile, KeyPolicy, Normalization, SelectionPolicy};
pub use types::{Entry, EntryId, Visibility};
