// Dispatch engine module
// Builds the Tokio runtime that drives every connection and decides at
// runtime whether the accelerated backend is available

use std::future::Future;
use std::num::NonZeroUsize;
use std::time::Duration;

use crate::config::ServerConfig;
use crate::error::Result;
use crate::logger;

/// Runtime flavour backing the dispatch engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    /// Single-threaded cooperative loop
    CurrentThread,
    /// Work-stealing pool, the accelerated mode
    MultiThread { workers: usize },
}

impl Backend {
    /// Pick a backend for the requested mode on a host with `parallelism`
    /// CPUs. Acceleration needs more than one CPU or an explicit worker
    /// count; otherwise it is ignored.
    pub fn select(accelerate: bool, workers: Option<usize>, parallelism: usize) -> Self {
        let pinned = workers.is_some_and(|w| w > 0);
        if accelerate && (parallelism > 1 || pinned) {
            Self::MultiThread {
                workers: workers.filter(|w| *w > 0).unwrap_or(parallelism),
            }
        } else {
            Self::CurrentThread
        }
    }

    /// Name printed in the startup banner
    pub const fn method(self) -> &'static str {
        match self {
            Self::CurrentThread => "current_thread",
            Self::MultiThread { .. } => "multi_thread",
        }
    }

    /// Whether a one-shot bounded-exit timer is armed on this backend
    pub const fn supports_bounded_run(self) -> bool {
        matches!(self, Self::MultiThread { .. })
    }
}

/// CPUs available to this process, at least 1
pub fn available_parallelism() -> usize {
    std::thread::available_parallelism().map_or(1, NonZeroUsize::get)
}

/// The dispatch engine: a runtime plus the backend it was built with
pub struct Engine {
    runtime: tokio::runtime::Runtime,
    backend: Backend,
}

impl Engine {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let backend = Backend::select(config.accelerate, config.workers, available_parallelism());
        if config.accelerate && !backend.supports_bounded_run() {
            logger::log_warning("Acceleration requested but only one CPU is available and no workers are set; ignoring -i");
        }
        Self::with_backend(backend)
    }

    pub fn with_backend(backend: Backend) -> Result<Self> {
        let runtime = match backend {
            Backend::CurrentThread => tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()?,
            Backend::MultiThread { workers } => tokio::runtime::Builder::new_multi_thread()
                .worker_threads(workers)
                .enable_all()
                .build()?,
        };
        Ok(Self { runtime, backend })
    }

    pub const fn backend(&self) -> Backend {
        self.backend
    }

    /// Deadline for the bounded run, if this configuration arms one
    pub fn bounded_run(&self, config: &ServerConfig) -> Option<Duration> {
        (config.accelerate && self.backend.supports_bounded_run())
            .then(|| Duration::from_secs(config.exit_after_secs))
    }

    /// Run `future` to completion on the engine's loop
    pub fn block_on<F: Future>(&self, future: F) -> F::Output {
        self.runtime.block_on(future)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_config(accelerate: bool) -> ServerConfig {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
            accelerate,
            workers: Some(2),
            exit_after_secs: 5,
        }
    }

    #[test]
    fn test_default_is_current_thread() {
        assert_eq!(Backend::select(false, None, 8), Backend::CurrentThread);
        assert_eq!(Backend::select(false, Some(4), 8), Backend::CurrentThread);
    }

    #[test]
    fn test_accelerate_picks_multi_thread() {
        assert_eq!(
            Backend::select(true, None, 8),
            Backend::MultiThread { workers: 8 }
        );
        assert_eq!(
            Backend::select(true, Some(3), 8),
            Backend::MultiThread { workers: 3 }
        );
        assert_eq!(
            Backend::select(true, Some(0), 4),
            Backend::MultiThread { workers: 4 }
        );
    }

    #[test]
    fn test_accelerate_ignored_on_single_cpu() {
        let backend = Backend::select(true, None, 1);
        assert_eq!(backend, Backend::CurrentThread);
        assert!(!backend.supports_bounded_run());
    }

    #[test]
    fn test_explicit_workers_accelerate_single_cpu() {
        assert_eq!(
            Backend::select(true, Some(2), 1),
            Backend::MultiThread { workers: 2 }
        );
        assert_eq!(Backend::select(true, Some(0), 1), Backend::CurrentThread);
        assert_eq!(Backend::select(false, Some(2), 1), Backend::CurrentThread);
    }

    #[test]
    fn test_bounded_run_only_when_accelerated() {
        let engine = Engine::with_backend(Backend::MultiThread { workers: 2 }).unwrap();
        assert_eq!(
            engine.bounded_run(&server_config(true)),
            Some(Duration::from_secs(5))
        );
        assert_eq!(engine.bounded_run(&server_config(false)), None);

        let engine = Engine::with_backend(Backend::CurrentThread).unwrap();
        assert_eq!(engine.bounded_run(&server_config(true)), None);
    }

    #[test]
    fn test_block_on_runs_future() {
        let engine = Engine::with_backend(Backend::CurrentThread).unwrap();
        assert_eq!(engine.backend().method(), "current_thread");
        assert_eq!(engine.block_on(async { 21 * 2 }), 42);
    }
}
