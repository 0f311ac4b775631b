//! Slow-operation notification.

use std::future::Future;
use std::time::{Duration, Instant};

/// Receives a call when a timed operation exceeds its threshold.
pub trait SlowOperationHook: Send + Sync {
    /// Called once per slow operation with its wall-clock duration.
    fn on_slow_operation(&self, operation: &str, elapsed: Duration);
}

/// Reports slow operations as `tracing` warnings.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSlowOperationHook;

impl SlowOperationHook for TracingSlowOperationHook {
    fn on_slow_operation(&self, operation: &str, elapsed: Duration) {
        tracing::warn!(
            operation,
            elapsed_ms = elapsed.as_millis() as u64,
            "slow operation"
        );
    }
}

/// Run `fut`, notifying `hook` if it takes longer than `threshold`.
pub(crate) async fn timed<F: Future>(
    hook: Option<&dyn SlowOperationHook>,
    threshold: Duration,
    operation: &str,
    fut: F,
) -> F::Output {
    let started = Instant::now();
    let output = fut.await;
    let elapsed = started.elapsed();
    if let Some(hook) = hook {
        if elapsed > threshold {
            hook.on_slow_operation(operation, elapsed);
        }
    }
    output
}
