//! View scope — explicit cancellation for work started by a mounted view.
//!
//! A page opens a scope when it mounts and closes it when the user navigates
//! away. Work run through the scope yields `None` once the scope is closed,
//! so results that arrive late are dropped instead of written into state
//! that belongs to a view which no longer exists.

use std::future::Future;

use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Default)]
pub struct ViewScope {
    token: CancellationToken,
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn close(&self) {
        self.token.cancel();
    }

    /// Drive `fut` to completion unless the scope closes first.
    pub async fn run<F: Future>(&self, fut: F) -> Option<F::Output> {
        tokio::select! {
            biased;
            () = self.token.cancelled() => None,
            out = fut => Some(out),
        }
    }
}

#[cfg(test)]
#[path = "scope_test.rs"]
mod tests;
