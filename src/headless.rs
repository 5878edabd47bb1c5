//! Headless mode: apply one query to a page and print the result.
//!
//! The page itself is the presentation sink here: the filter toggles each
//! candidate element's `display`, then the candidates are written out.

use clap::ValueEnum;
use livefilter_core::{Attach, FilterProfile, LiveFilter, Page, ReadyState};
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Rendered text of each shown entry, one per line.
    #[default]
    Plain,
    /// One JSON object per candidate entry, shown or not.
    Jsonl,
}

/// Attach the filter to `page`, deliver `query` as one input change, and
/// write the candidates to `out`.
///
/// An inactive filter leaves the page as rendered; that is not an error.
pub fn run_headless<W: Write>(
    page: &mut Page,
    input_id: &str,
    profile: &FilterProfile,
    query: &str,
    format: OutputFormat,
    out: &mut W,
) -> anyhow::Result<()> {
    let mut attach = LiveFilter::attach(page, input_id, profile);
    if matches!(attach, Attach::Pending) {
        // Loading is synchronous here; the document is complete once parsed.
        page.set_ready_state(ReadyState::Complete);
        attach = LiveFilter::attach(page, input_id, profile);
    }

    match attach {
        Attach::Active(filter) => filter.on_query_change(query, page),
        Attach::Inactive(reason) => {
            tracing::info!(%reason, "filter inactive, page left as rendered")
        }
        Attach::Pending => {}
    }

    for id in page.select(&profile.selection) {
        let Some(element) = page.element(id) else {
            continue;
        };
        match format {
            OutputFormat::Plain => {
                if element.display.is_shown() {
                    writeln!(out, "{}", element.text)?;
                }
            }
            OutputFormat::Jsonl => {
                let record = serde_json::json!({
                    "id": id,
                    "text": element.text,
                    "visible": element.display.is_shown(),
                });
                writeln!(out, "{record}")?;
            }
        }
    }
    Ok(())
}
