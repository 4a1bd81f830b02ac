//! Human-readable rendering of a probe outcome.

use std::io::{self, Write};

use crate::error::RerankError;
use crate::probe::ProbeOutcome;
use crate::types::{RerankRequest, RerankResponse};

pub const PREVIEW_CHARS: usize = 50;
pub const PREVIEW_MARKER: &str = "...";

pub fn render_outcome<W: Write>(
    request: &RerankRequest,
    outcome: &ProbeOutcome,
    out: &mut W,
) -> io::Result<()> {
    match outcome {
        Ok(response) => render_success(request, response, out),
        Err(RerankError::Api { status, body }) => {
            writeln!(out, "rerank failed: {status}")?;
            writeln!(out, "   body: {body}")
        }
        Err(err) => writeln!(out, "rerank error ({}): {}", err.kind(), err.chain()),
    }
}

fn render_success<W: Write>(
    request: &RerankRequest,
    response: &RerankResponse,
    out: &mut W,
) -> io::Result<()> {
    writeln!(out, "rerank succeeded")?;
    writeln!(out, "   model: {}", response.model)?;
    writeln!(out, "   results: {}", response.results.len())?;
    for (rank, result) in response.results.iter().enumerate() {
        let text = request
            .documents
            .get(result.index)
            .map(String::as_str)
            .map_or_else(|| "<no such document>".to_string(), preview);
        writeln!(
            out,
            "   #{}: doc {}, score {:.4}, text: {text}",
            rank + 1,
            result.index,
            result.relevance_score,
        )?;
    }
    Ok(())
}

/// First [`PREVIEW_CHARS`] characters of `doc` plus the marker, which is
/// appended whether or not anything was cut.
pub fn preview(doc: &str) -> String {
    let mut text: String = doc.chars().take(PREVIEW_CHARS).collect();
    text.push_str(PREVIEW_MARKER);
    text
}
