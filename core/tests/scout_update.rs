mod common;

use std::sync::atomic::Ordering;
use std::time::Duration;

use common::{fixture_registry, Article, Post, Product, RecordingEngine, Tag, User};
use meiliscout_core::api::{
    run_update, AttributeCategory, CapturingReporter, NoRetry, ReportLine, RetryStrategy,
    TaskOutcome, TaskStatus, UpdateContext, UpdateError, UpdateRequest, WaitOptions,
};
use pretty_assertions::assert_eq;

/// Retries immediately, up to `max` times.
struct ImmediateRetry {
    max: u32,
}

impl RetryStrategy for ImmediateRetry {
    fn name(&self) -> &str {
        "immediate"
    }

    fn next_delay(&self, attempt: u32, _error: &str) -> Option<Duration> {
        (attempt < self.max).then_some(Duration::ZERO)
    }

    fn max_attempts(&self) -> u32 {
        self.max
    }
}

fn request(model: &str, wait: bool) -> UpdateRequest {
    UpdateRequest {
        model: model.to_string(),
        wait,
    }
}

fn fast_wait() -> WaitOptions {
    WaitOptions {
        timeout: Duration::from_millis(200),
        interval: Duration::from_millis(1),
    }
}

fn strings(v: &[&str]) -> Vec<String> {
    v.iter().map(|s| s.to_string()).collect()
}

#[tokio::test]
async fn method_level_declaration_updates_searchable_and_sortable_only() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Post::TYPE, false), &ctx).await.unwrap();

    let index = engine.recording("posts");
    assert_eq!(
        index.updated_categories(),
        vec![AttributeCategory::Searchable, AttributeCategory::Sortable]
    );
    assert_eq!(index.applied(AttributeCategory::Searchable), Some(strings(&["title"])));
    assert_eq!(index.applied(AttributeCategory::Sortable), Some(strings(&["slug"])));
    assert_eq!(summary.tasks.len(), 2);
    assert_eq!(summary.tasks[0].description, "Update searchable attributes");
    assert_eq!(summary.tasks[1].description, "Update sortable attributes");
    assert_eq!(
        reporter.lines(),
        vec![ReportLine::Info(
            "Index posts [App\\Models\\Post] settings updated successfully.".to_string()
        )]
    );
}

#[tokio::test]
async fn type_level_declaration_wins_over_capability_methods() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    run_update(&request(User::TYPE, false), &ctx).await.unwrap();

    let index = engine.recording("users");
    assert_eq!(index.applied(AttributeCategory::Filterable), Some(strings(&["email"])));
    assert_eq!(index.applied(AttributeCategory::Sortable), Some(strings(&["name"])));
    assert_eq!(index.applied(AttributeCategory::Searchable), None);
    assert_eq!(index.applied(AttributeCategory::Displayable), None);
}

#[tokio::test]
async fn capability_methods_drive_filters_and_sorts() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    run_update(&request(Tag::TYPE, false), &ctx).await.unwrap();

    let index = engine.recording("tags");
    assert_eq!(
        index.updated_categories(),
        vec![AttributeCategory::Filterable, AttributeCategory::Sortable]
    );
    assert_eq!(index.applied(AttributeCategory::Filterable), Some(strings(&["name"])));
    assert_eq!(index.applied(AttributeCategory::Sortable), Some(strings(&["slug"])));
}

#[tokio::test]
async fn displayable_capability_splits_searchable_fields() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    run_update(&request(Article::TYPE, false), &ctx).await.unwrap();

    let index = engine.recording("articles");
    assert_eq!(
        index.applied(AttributeCategory::Searchable),
        Some(strings(&["headline", "body"]))
    );
    assert_eq!(
        index.applied(AttributeCategory::Displayable),
        Some(strings(&["id", "published_at"]))
    );
}

#[tokio::test]
async fn unknown_model_fails_before_any_remote_call() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let err = run_update(&request("App\\Models\\Missing", true), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::ModelNotSearchable(_)));
    assert_eq!(err.exit_code(), 1);
    assert_eq!(err.to_string(), "This model is not searchable.");
    assert_eq!(engine.total_calls(), 0);
    assert!(reporter.lines().is_empty());
}

#[tokio::test]
async fn registered_but_not_searchable_model_is_rejected() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let err = run_update(&request("App\\Models\\AuditLog", false), &ctx)
        .await
        .unwrap_err();
    assert_eq!(err.exit_code(), 1);
}

#[tokio::test]
async fn unsupported_engine_fails_before_any_remote_call() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let err = run_update(&request(Product::TYPE, false), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(err, UpdateError::UnsupportedEngine { ref engine, .. } if engine == "algolia"));
    assert_eq!(err.exit_code(), 2);
    assert!(err.is_precondition());
    assert_eq!(engine.total_calls(), 0);
}

#[tokio::test]
async fn without_wait_no_status_is_polled() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Article::TYPE, false), &ctx).await.unwrap();

    assert_eq!(engine.recording("articles").wait_count(), 0);
    assert!(summary.outcomes.is_none());
    assert!(summary.all_succeeded());
}

#[tokio::test]
async fn wait_reports_each_task_in_submission_order() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    engine
        .recording("tags")
        .statuses
        .lock()
        .unwrap()
        .insert(AttributeCategory::Sortable, TaskStatus::Failed);
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Tag::TYPE, true), &ctx).await.unwrap();

    assert_eq!(
        reporter.lines(),
        vec![
            ReportLine::Info("Update filterable attributes done successfully".to_string()),
            ReportLine::Error("Update sortable attributes done unsuccessfully".to_string()),
            ReportLine::Info(
                "Index tags [App\\Models\\Tag] settings updated successfully.".to_string()
            ),
        ]
    );
    let outcomes = summary.outcomes.as_ref().unwrap();
    assert_eq!(outcomes[0].outcome, TaskOutcome::Succeeded);
    assert!(matches!(
        outcomes[1].outcome,
        TaskOutcome::Failed { status: TaskStatus::Failed, .. }
    ));
    assert!(!summary.all_succeeded());
}

#[tokio::test]
async fn canceled_task_is_reported_as_failure() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    engine
        .recording("posts")
        .statuses
        .lock()
        .unwrap()
        .insert(AttributeCategory::Searchable, TaskStatus::Canceled);
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Post::TYPE, true), &ctx).await.unwrap();
    let outcomes = summary.outcomes.unwrap();
    assert!(!outcomes[0].outcome.is_success());
    assert!(outcomes[1].outcome.is_success());
}

#[tokio::test]
async fn missing_task_uid_is_indeterminate_without_polling() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let index = engine.recording("tags");
    index
        .omit_uid_for
        .lock()
        .unwrap()
        .push(AttributeCategory::Filterable);
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Tag::TYPE, true), &ctx).await.unwrap();

    let outcomes = summary.outcomes.unwrap();
    assert_eq!(outcomes[0].task_uid, None);
    assert_eq!(outcomes[0].outcome, TaskOutcome::MissingHandle);
    assert!(outcomes[1].outcome.is_success());
    assert_eq!(index.wait_count(), 1);
}

#[tokio::test]
async fn transient_poll_errors_are_retried() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let index = engine.recording("posts");
    index.transient_wait_failures.store(2, Ordering::SeqCst);
    let reporter = CapturingReporter::new();
    let retry = ImmediateRetry { max: 3 };
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &retry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Post::TYPE, true), &ctx).await.unwrap();

    assert!(summary.all_succeeded());
    // two failed polls, then one poll per task
    assert_eq!(index.wait_count(), 4);
}

#[tokio::test]
async fn exhausted_retries_fail_only_that_task() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let index = engine.recording("posts");
    index.transient_wait_failures.store(2, Ordering::SeqCst);
    let reporter = CapturingReporter::new();
    let retry = ImmediateRetry { max: 1 };
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &retry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Post::TYPE, true), &ctx).await.unwrap();

    let outcomes = summary.outcomes.unwrap();
    assert!(matches!(
        outcomes[0].outcome,
        TaskOutcome::Unreachable { ref error } if error.contains("connection reset")
    ));
    assert_eq!(outcomes[1].outcome, TaskOutcome::Succeeded);
}

#[tokio::test]
async fn timed_out_wait_is_not_retried() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let index = engine.recording("tags");
    index.time_out.store(true, Ordering::SeqCst);
    let reporter = CapturingReporter::new();
    let retry = ImmediateRetry { max: 5 };
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &retry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let summary = run_update(&request(Tag::TYPE, true), &ctx).await.unwrap();

    let outcomes = summary.outcomes.unwrap();
    assert!(outcomes
        .iter()
        .all(|r| r.outcome == TaskOutcome::TimedOut { waited_ms: 200 }));
    assert_eq!(index.wait_count(), 2);
}

#[tokio::test]
async fn failed_update_call_aborts_the_run() {
    let registry = fixture_registry();
    let engine = RecordingEngine::new();
    let index = engine.recording("tags");
    *index.fail_update_for.lock().unwrap() = Some(AttributeCategory::Sortable);
    let reporter = CapturingReporter::new();
    let ctx = UpdateContext {
        registry: &registry,
        engine: &engine,
        retry: &NoRetry,
        reporter: &reporter,
        wait_options: fast_wait(),
    };

    let err = run_update(&request(Tag::TYPE, true), &ctx)
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        UpdateError::Submission { description: "Update sortable attributes", .. }
    ));
    assert_eq!(err.exit_code(), 20);
    // the filterable update already went through and is not rolled back
    assert_eq!(index.updated_categories(), vec![AttributeCategory::Filterable]);
    assert_eq!(index.wait_count(), 0);
    assert!(reporter.lines().is_empty());
}
