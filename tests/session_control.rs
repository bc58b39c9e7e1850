mod common;
use crate::common::{init_tracing, with_timeout, BASIC_SOURCE};

use std::time::Duration;

use loopviz::engine::{Pace, QueueId, RunOutcome};
use loopviz::errors::SimError;
use loopviz::event::EventKind;
use loopviz::presets::PresetCatalog;
use loopviz::session::Session;
use loopviz::types::RunStatus;
use loopviz_test_utils::{collect_until_complete, drain_events};

fn session(pace: Pace) -> Session {
    Session::new(PresetCatalog::builtin(), pace)
}

#[tokio::test(start_paused = true)]
async fn start_runs_the_source_and_streams_events() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::instant());
    let mut events = session.events();

    session.start(BASIC_SOURCE, Pace::instant())?;
    let streamed = with_timeout(collect_until_complete(&mut events)).await?;

    let outputs: Vec<_> = streamed
        .iter()
        .filter(|e| e.kind == EventKind::Output)
        .map(|e| e.text.as_str())
        .collect();
    assert_eq!(
        outputs,
        vec!["Start", "End", "nextTick", "Promise", "setTimeout", "setImmediate"]
    );

    match with_timeout(session.wait()).await {
        Some(RunOutcome::Completed(log)) => assert_eq!(log.as_slice(), streamed.as_slice()),
        other => panic!("unexpected outcome: {other:?}"),
    }
    assert!(session.snapshot().is_complete());
    assert!(!session.is_running());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn start_is_rejected_while_a_run_is_active() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::from_millis(1000));
    session.start_current()?;

    let err = session
        .start(BASIC_SOURCE, Pace::from_millis(1000))
        .expect_err("second start must be rejected");
    assert!(matches!(err, SimError::AlreadyRunning));
    assert!(session.is_running());

    session.reset().await;
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reset_mid_run_clears_everything() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::from_millis(1000));
    let mut events = session.events();
    session.start(BASIC_SOURCE, Pace::from_millis(1000))?;

    // Start has run and the batch is half enqueued.
    tokio::time::sleep(Duration::from_millis(2000)).await;
    let mid = session.snapshot();
    assert_eq!(mid.status, RunStatus::Running);
    assert_eq!(mid.queue(QueueId::Timers), ["setTimeout"]);
    assert_eq!(mid.queue(QueueId::Check), ["setImmediate"]);
    assert!(mid.queue(QueueId::NextTick).is_empty());

    with_timeout(session.reset()).await;

    let snap = session.snapshot();
    assert!(snap.is_reset());
    assert!(!session.is_running());

    // Nothing arrives after the reset returned.
    drain_events(&mut events);
    tokio::time::sleep(Duration::from_secs(60)).await;
    assert!(drain_events(&mut events).is_empty());
    assert!(session.snapshot().is_reset());
    assert!(session.wait().await.is_none());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn reset_is_idempotent_from_any_state() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::instant());

    // Idle.
    session.reset().await;
    session.reset().await;
    assert!(session.snapshot().is_reset());

    // Finished.
    session.start_current()?;
    let _ = with_timeout(session.wait()).await;
    assert!(session.snapshot().is_complete());
    session.reset().await;
    assert!(session.snapshot().is_reset());
    session.reset().await;
    assert!(session.snapshot().is_reset());

    // Running.
    session.set_pace(Pace::from_millis(500));
    session.start_current()?;
    tokio::time::sleep(Duration::from_millis(700)).await;
    for _ in 0..3 {
        session.reset().await;
        assert!(session.snapshot().is_reset());
    }
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn a_new_run_can_start_after_the_previous_one_finished() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::instant());
    session.start_current()?;
    let first = with_timeout(session.wait()).await;

    session.start_current()?;
    let second = with_timeout(session.wait()).await;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn change_example_loads_preset_and_cancels_active_run() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::from_millis(1000));
    assert_eq!(session.selected(), Some("basic"));

    session.start_current()?;
    tokio::time::sleep(Duration::from_millis(1200)).await;

    session.change_example("microTaskQueue").await?;
    assert!(!session.is_running());
    assert!(session.snapshot().is_reset());
    assert_eq!(session.selected(), Some("microTaskQueue"));
    assert!(session.source().contains("nextTick 2"));

    session.set_pace(Pace::instant());
    session.start_current()?;
    match with_timeout(session.wait()).await {
        Some(RunOutcome::Completed(log)) => assert_eq!(
            log.outputs(),
            vec!["Sync code", "nextTick 1", "nextTick 2", "Promise 1", "Promise 2"]
        ),
        other => panic!("unexpected outcome: {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn unknown_example_is_an_error_and_keeps_the_source() {
    init_tracing();

    let mut session = session(Pace::instant());
    let before = session.source().to_string();

    let err = session
        .change_example("doesNotExist")
        .await
        .expect_err("unknown key");
    assert!(matches!(err, SimError::UnknownPreset(ref k) if k == "doesNotExist"));
    assert_eq!(session.source(), before);
    assert_eq!(session.selected(), Some("basic"));
}

#[tokio::test(start_paused = true)]
async fn custom_source_clears_the_selected_example() -> anyhow::Result<()> {
    init_tracing();

    let mut session = session(Pace::instant());
    session.start("console.log('only');", Pace::instant())?;
    assert_eq!(session.selected(), None);
    assert_eq!(session.source(), "console.log('only');");

    match with_timeout(session.wait()).await {
        Some(RunOutcome::Completed(log)) => assert_eq!(log.outputs(), vec!["only"]),
        other => panic!("unexpected outcome: {other:?}"),
    }
    Ok(())
}
