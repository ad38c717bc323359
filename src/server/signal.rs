// Shutdown signal module
//
// The serve loop ends on the first of:
// - the bounded-run deadline, when one is armed
// - SIGINT / Ctrl+C

use std::fmt;
use std::time::Duration;

use crate::logger;

/// Why the serve loop stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    BoundedRunElapsed,
    Interrupted,
}

impl fmt::Display for ShutdownReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BoundedRunElapsed => write!(f, "bounded run elapsed"),
            Self::Interrupted => write!(f, "interrupted"),
        }
    }
}

/// Resolve once the loop should exit. The deadline is one-shot and cannot
/// be cancelled other than by dropping the future.
pub async fn shutdown_signal(bounded_run: Option<Duration>) -> ShutdownReason {
    let deadline = async {
        match bounded_run {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending().await,
        }
    };

    let interrupt = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            logger::log_warning(&format!("Failed to listen for Ctrl+C: {e}"));
            std::future::pending::<()>().await;
        }
    };

    tokio::select! {
        () = deadline => ShutdownReason::BoundedRunElapsed,
        () = interrupt => ShutdownReason::Interrupted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_bounded_run_fires() {
        let reason = shutdown_signal(Some(Duration::from_secs(60))).await;
        assert_eq!(reason, ShutdownReason::BoundedRunElapsed);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unbounded_run_does_not_fire() {
        let outcome =
            tokio::time::timeout(Duration::from_secs(3600), shutdown_signal(None)).await;
        assert!(outcome.is_err());
    }
}
