use futures_util::future::join_all;
use std::sync::Arc;
use tracing::{debug, warn};

use super::{FetchError, FetchOutcome, NagiosClient};

pub struct Aggregator {
    clients: Vec<Arc<NagiosClient>>,
}

impl Aggregator {
    pub fn new(clients: Vec<NagiosClient>) -> Self {
        Self {
            clients: clients.into_iter().map(Arc::new).collect(),
        }
    }

    /// Queries every server at once and waits for all of them.
    ///
    /// One outcome per client, in registration order. A failing server never
    /// cancels or delays the report for the others.
    pub async fn fetch_all(&self) -> Vec<FetchOutcome> {
        let mut handles = Vec::with_capacity(self.clients.len());

        for client in &self.clients {
            let c = client.clone();
            handles.push(tokio::spawn(async move { c.fetch_state().await }));
        }

        let settled = join_all(handles).await;

        let outcomes: Vec<FetchOutcome> = settled
            .into_iter()
            .zip(&self.clients)
            .map(|(joined, client)| match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    warn!("fetch task for {} did not finish: {}", client.name, e);
                    FetchOutcome::failed(&client.name, FetchError::Transport(e.to_string()))
                }
            })
            .collect();

        for o in &outcomes {
            debug!(site = %o.name, ok = o.is_success(), status = ?o.status_code(), "settled");
        }
        outcomes
    }
}
