//! Reductions from raw fetch outcomes to table rows.
//!
//! Both reports walk every outcome, turn failed fetches into diagnostics,
//! and decode successful bodies into a [`ClusterState`]. A body that does
//! not decode aborts the whole report.

use crate::clients::FetchOutcome;
use crate::models::state::{ClusterState, StateResponse};
use crate::models::views::{Diagnostic, ProblemRow, Report, SummaryRow};

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("malformed state payload from {site}: {source}")]
    MalformedPayload {
        site: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Splits outcomes into decoded clusters and diagnostics for failed fetches.
fn decode_all(
    outcomes: &[FetchOutcome],
) -> Result<(Vec<(&str, ClusterState)>, Vec<Diagnostic>), ReportError> {
    let mut clusters = Vec::new();
    let mut diagnostics = Vec::new();

    for outcome in outcomes {
        match &outcome.result {
            Ok(body) => {
                let state = StateResponse::parse(body).map_err(|source| {
                    ReportError::MalformedPayload {
                        site: outcome.name.clone(),
                        source,
                    }
                })?;
                clusters.push((outcome.name.as_str(), state.content));
            }
            Err(error) => diagnostics.push(Diagnostic {
                site: outcome.name.clone(),
                error: error.clone(),
            }),
        }
    }

    Ok((clusters, diagnostics))
}

/// Host, service and problem counts per site, sorted by site, plus a TOTAL.
pub fn summarize(outcomes: &[FetchOutcome]) -> Result<Report<SummaryRow>, ReportError> {
    let (clusters, diagnostics) = decode_all(outcomes)?;

    let mut rows: Vec<SummaryRow> = clusters
        .into_iter()
        .map(|(site, cluster)| {
            let mut row = SummaryRow {
                site: site.to_string(),
                ..Default::default()
            };
            for host in cluster.values() {
                row.host_count += 1;
                for service in host.services.values() {
                    row.service_count += 1;
                    if !service.is_ok() {
                        row.problem_count += 1;
                    }
                }
            }
            row
        })
        .collect();

    rows.sort_by(|a, b| a.site.cmp(&b.site));
    let total = SummaryRow::total(&rows);

    Ok(Report {
        rows,
        total: Some(total),
        diagnostics,
    })
}

/// Every check not in state "0", across all sites, sorted by site.
pub fn problems(outcomes: &[FetchOutcome]) -> Result<Report<ProblemRow>, ReportError> {
    let (clusters, diagnostics) = decode_all(outcomes)?;

    let mut rows = Vec::new();
    for (site, cluster) in clusters {
        for (host_name, host) in &cluster {
            for (check, service) in &host.services {
                if service.is_ok() {
                    continue;
                }
                rows.push(ProblemRow {
                    site: site.to_string(),
                    host: host_name.clone(),
                    check: check.clone(),
                    message: service.plugin_output.clone(),
                });
            }
        }
    }

    // stable: hosts and checks keep their decoded (name) order within a site
    rows.sort_by(|a, b| a.site.cmp(&b.site));

    Ok(Report {
        rows,
        total: None,
        diagnostics,
    })
}
