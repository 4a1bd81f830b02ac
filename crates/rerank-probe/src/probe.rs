use std::io::{self, Write};

use tracing::{debug, warn};

use crate::config::ProbeConfig;
use crate::error::RerankError;
use crate::providers::RerankServiceProvider;
use crate::report::render_outcome;
use crate::traits::RerankProvider;
use crate::types::{RerankRequest, RerankResponse};

pub type ProbeOutcome = Result<RerankResponse, RerankError>;

/// One request/response cycle, classified but not printed.
pub async fn run_probe(provider: &dyn RerankProvider, request: &RerankRequest) -> ProbeOutcome {
    let outcome = provider.rerank(request).await;
    match &outcome {
        Ok(response) => debug!(
            provider = provider.name(),
            model = %response.model,
            results = response.results.len(),
            "rerank probe succeeded"
        ),
        Err(err) => warn!(
            provider = provider.name(),
            kind = %err.kind(),
            error = %err,
            "rerank probe failed"
        ),
    }
    outcome
}

/// Probes the service described by `config` and writes the report to `out`.
///
/// Rerank failures end up in the report; the only error returned is a
/// failure to write to `out`.
pub async fn rerank<W: Write>(config: &ProbeConfig, out: &mut W) -> io::Result<()> {
    let request = config.request();
    let outcome = match RerankServiceProvider::new(config.service()) {
        Ok(provider) => run_probe(&provider, &request).await,
        Err(err) => Err(err),
    };
    render_outcome(&request, &outcome, out)
}
