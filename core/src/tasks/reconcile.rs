use tokio::time::Instant;

use crate::engine::{SearchIndex, TaskUid, WaitOptions, WaitTimedOut};
use crate::report::TaskReporter;

use super::outcome::{TaskOutcome, TaskReport};
use super::retry::RetryStrategy;
use super::submit::UpdateTask;

/// Waits for one task, retrying failed polls per `retry`.
///
/// `options.timeout` bounds the whole wait, retries and backoff included.
/// A timeout is final; transport errors are retried until the strategy
/// gives up, which yields [`TaskOutcome::Unreachable`].
pub async fn wait_gracefully(
    index: &dyn SearchIndex,
    task_uid: TaskUid,
    options: WaitOptions,
    retry: &dyn RetryStrategy,
) -> TaskOutcome {
    let started = Instant::now();
    let deadline = started + options.timeout;
    let timed_out = || TaskOutcome::TimedOut {
        waited_ms: started.elapsed().as_millis() as u64,
    };

    let mut attempt: u32 = 0;
    loop {
        let remaining = if attempt == 0 {
            options.timeout
        } else {
            deadline.saturating_duration_since(Instant::now())
        };
        if remaining.is_zero() {
            tracing::warn!(
                index = %index.uid(),
                task_uid,
                attempts = attempt,
                "wait budget exhausted"
            );
            return timed_out();
        }
        let budget = WaitOptions {
            timeout: remaining,
            interval: options.interval,
        };

        let before_call = started.elapsed();
        let err = match index.wait_for_task(task_uid, budget).await {
            Ok(task) => return TaskOutcome::from_task(&task),
            Err(err) => err,
        };

        if let Some(inner) = err.downcast_ref::<WaitTimedOut>() {
            tracing::warn!(index = %index.uid(), task_uid, "{inner}");
            return TaskOutcome::TimedOut {
                waited_ms: before_call.as_millis() as u64 + inner.waited_ms,
            };
        }

        let message = format!("{err:#}");
        let delay = if retry.should_retry(attempt, &message) {
            retry.next_delay(attempt, &message)
        } else {
            None
        };
        let Some(delay) = delay else {
            tracing::warn!(
                index = %index.uid(),
                task_uid,
                attempts = attempt + 1,
                strategy = retry.name(),
                error = %message,
                "giving up waiting for task"
            );
            return TaskOutcome::Unreachable { error: message };
        };

        tracing::debug!(
            index = %index.uid(),
            task_uid,
            attempt = attempt + 1,
            delay_ms = delay.as_millis() as u64,
            error = %message,
            "task status poll failed, retrying"
        );
        let remaining = deadline.saturating_duration_since(Instant::now());
        if delay >= remaining {
            tokio::time::sleep(remaining).await;
            tracing::warn!(
                index = %index.uid(),
                task_uid,
                error = %message,
                "wait budget exhausted while backing off"
            );
            return timed_out();
        }
        tokio::time::sleep(delay).await;
        attempt += 1;
    }
}

/// Waits for every submitted task in submission order and reports each
/// outcome as it becomes known.
pub async fn reconcile(
    index: &dyn SearchIndex,
    tasks: &[UpdateTask],
    options: WaitOptions,
    retry: &dyn RetryStrategy,
    reporter: &dyn TaskReporter,
) -> Vec<TaskReport> {
    let mut reports = Vec::with_capacity(tasks.len());

    for task in tasks {
        reporter.task_started(task.description);
        tracing::debug!(
            stage = "update.reconcile.in",
            index = %index.uid(),
            category = %task.category,
            task_uid = ?task.task_uid
        );

        let outcome = match task.task_uid {
            Some(uid) => wait_gracefully(index, uid, options, retry).await,
            None => TaskOutcome::MissingHandle,
        };

        tracing::debug!(
            stage = "update.reconcile.out",
            index = %index.uid(),
            category = %task.category,
            outcome = %outcome
        );
        reporter.task_finished(task.description, &outcome);

        reports.push(TaskReport {
            category: task.category,
            description: task.description,
            task_uid: task.task_uid,
            outcome,
        });
    }

    reports
}
