//! Stale-response guard for view fetches
//!
//! A view opens a [`ViewScope`] and runs each fetch through it. Once the
//! scope is closed (explicitly or by dropping it) in-flight fetches resolve
//! to `None` and their results are never applied.

use std::future::Future;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Lifetime of one view; closes on drop
#[derive(Debug, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// A handle for fetches that outlive the borrow, e.g. spawned tasks
    pub fn handle(&self) -> ScopeHandle {
        ScopeHandle {
            token: self.token.clone(),
        }
    }

    /// A nested scope closed together with this one
    pub fn child(&self) -> ViewScope {
        ViewScope {
            token: self.token.child_token(),
        }
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Run a fetch; `None` when the scope closed first
    pub async fn run<F: Future>(&self, fetch: F) -> Option<F::Output> {
        guarded(&self.token, fetch).await
    }
}

impl Drop for ViewScope {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Non-owning handle to a [`ViewScope`]; dropping it closes nothing
#[derive(Debug, Clone)]
pub struct ScopeHandle {
    token: CancellationToken,
}

impl ScopeHandle {
    pub fn is_closed(&self) -> bool {
        self.token.is_cancelled()
    }

    pub async fn run<F: Future>(&self, fetch: F) -> Option<F::Output> {
        guarded(&self.token, fetch).await
    }
}

async fn guarded<F: Future>(token: &CancellationToken, fetch: F) -> Option<F::Output> {
    let output = tokio::select! {
        biased;
        _ = token.cancelled() => None,
        output = fetch => Some(output),
    };

    // a result that lands after close is still stale
    if output.is_none() || token.is_cancelled() {
        debug!("Discarding result of a closed view scope");
        return None;
    }
    output
}
