pub mod builders;

use std::sync::Once;

use tokio::sync::broadcast;
use tracing_subscriber::{fmt, EnvFilter};

use loopviz::event::Event;

static INIT: Once = Once::new();

/// Initialise tracing for tests.
///
/// - Uses `with_test_writer()`, so logs are captured per-test.
/// - The Rust test harness only prints captured output for **failing** tests
///   (unless you run with `-- --nocapture`).
///
/// Enable levels with e.g.:
/// `RUST_LOG=debug cargo test`
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer() // print only for failing tests unless --nocapture
            .with_target(true)
            .init();
    });
}

/// Run a future with a 120-second timeout.
///
/// Under `start_paused = true` the timeout is virtual time too, so paced
/// runs must fit in it.
#[allow(dead_code)]
pub async fn with_timeout<F, T>(f: F) -> T
where
    F: std::future::Future<Output = T>,
{
    tokio::time::timeout(std::time::Duration::from_secs(120), f)
        .await
        .expect("Test timed out")
}

/// Everything currently buffered on a bus receiver.
pub fn drain_events(rx: &mut broadcast::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Ok(ev) = rx.try_recv() {
        events.push(ev);
    }
    events
}

/// Wait until the session's run has emitted the completion event.
pub async fn collect_until_complete(
    rx: &mut broadcast::Receiver<Event>,
) -> anyhow::Result<Vec<Event>> {
    let mut events = Vec::new();
    loop {
        let ev = rx.recv().await?;
        let done = ev.kind == loopviz::event::EventKind::Complete;
        events.push(ev);
        if done {
            return Ok(events);
        }
    }
}
