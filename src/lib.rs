//! Live substring filtering over a list of entries.
//!
//! The binary loads a page (a JSON document, plain text lines, stdin, or the
//! built-in demo), attaches the live filter from `livefilter-core`, and
//! either hands everything to the TUI or applies a single query headlessly.
//!
//! # Architecture
//!
//! ```text
//! page source ──► Page ──► LiveFilter::attach ──┬──► TUI (search box → entry list)
//!                                               └──► headless (query → stdout)
//! ```

pub mod headless;
pub mod source;

pub use headless::{run_headless, OutputFormat};
pub use source::{demo_page, load_page};
