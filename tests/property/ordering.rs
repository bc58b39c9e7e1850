use proptest::prelude::*;

use loopviz::classify::{classify, TaskGroups};
use loopviz::engine::{Pace, Scheduler};
use loopviz::event::{EventKind, EventLog};
use loopviz::types::{RunStatus, TaskGroup};

// Short lowercase labels can never spell one of the marker words.
fn label() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{0,7}"
}

fn labels(max: usize) -> impl Strategy<Value = Vec<String>> {
    proptest::collection::vec(label(), 0..=max)
}

fn groups_strategy(min_sync: usize) -> impl Strategy<Value = TaskGroups> {
    (
        proptest::collection::vec(label(), min_sync..=4),
        labels(3),
        labels(3),
        labels(3),
        labels(3),
    )
        .prop_map(|(sync, timer, immediate, priority_micro, secondary_micro)| TaskGroups {
            sync,
            timer,
            immediate,
            priority_micro,
            secondary_micro,
        })
}

fn phase_texts(log: &EventLog) -> Vec<&str> {
    log.texts_of(EventKind::Phase)
}

fn sorted(labels: &[String]) -> Vec<String> {
    let mut labels = labels.to_vec();
    labels.sort();
    labels
}

fn count(texts: &[&str], needle: &str) -> usize {
    texts.iter().filter(|t| **t == needle).count()
}

/// Render the groups as one-line statements, one per task.
fn source_lines(groups: &TaskGroups) -> Vec<String> {
    let mut lines = Vec::new();
    for l in &groups.sync {
        lines.push(format!("console.log('{l}');"));
    }
    for l in &groups.timer {
        lines.push(format!("setTimeout(() => console.log('{l}'), 0);"));
    }
    for l in &groups.immediate {
        lines.push(format!("setImmediate(() => console.log(\"{l}\"));"));
    }
    for l in &groups.priority_micro {
        lines.push(format!("process.nextTick(() => console.log('{l}'));"));
    }
    for l in &groups.secondary_micro {
        lines.push(format!("Promise.resolve().then(() => console.log('{l}'));"));
    }
    lines
}

proptest! {
    #[test]
    fn outputs_follow_group_priority(groups in groups_strategy(1)) {
        let log = Scheduler::new(groups.clone(), Pace::instant()).run_to_end();
        prop_assert_eq!(log.outputs(), groups.expected_output_order());
    }

    #[test]
    fn next_tick_outputs_precede_promise_outputs(groups in groups_strategy(1)) {
        prop_assume!(!groups.priority_micro.is_empty() && !groups.secondary_micro.is_empty());

        let log = Scheduler::new(groups.clone(), Pace::instant()).run_to_end();
        let outputs = log.outputs();
        let sync_len = groups.sync.len();
        let ticks = &outputs[sync_len..sync_len + groups.priority_micro.len()];
        let promises_start = sync_len + groups.priority_micro.len();
        let promises = &outputs[promises_start..promises_start + groups.secondary_micro.len()];

        prop_assert_eq!(ticks.to_vec(), groups.priority_micro.iter().map(String::as_str).collect::<Vec<_>>());
        prop_assert_eq!(promises.to_vec(), groups.secondary_micro.iter().map(String::as_str).collect::<Vec<_>>());
    }

    #[test]
    fn structural_phases_appear_exactly_once(groups in groups_strategy(0)) {
        let log = Scheduler::new(groups, Pace::instant()).run_to_end();
        let phases = phase_texts(&log);

        for (enter, exit) in [
            ("--- Pending I/O Phase (Empty) ---", "--- Leaving Pending I/O Phase ---"),
            ("--- Poll Phase (Empty) ---", "--- Leaving Poll Phase ---"),
            ("--- Close Phase (Empty) ---", "--- Leaving Close Phase ---"),
        ] {
            prop_assert_eq!(count(&phases, enter), 1);
            prop_assert_eq!(count(&phases, exit), 1);

            // Nothing is printed between the pair.
            let texts: Vec<_> = log.iter().map(|e| e.text.as_str()).collect();
            let at = texts.iter().position(|t| *t == enter).unwrap();
            prop_assert_eq!(texts[at + 1], exit);
        }

        prop_assert_eq!(log.texts_of(EventKind::Complete).len(), 1);
        prop_assert_eq!(log.last().map(|e| e.kind), Some(EventKind::Complete));
    }

    #[test]
    fn empty_queues_emit_no_markers(groups in groups_strategy(1)) {
        let log = Scheduler::new(groups.clone(), Pace::instant()).run_to_end();
        let phases = phase_texts(&log);

        let expect = |non_empty: bool| usize::from(non_empty);
        prop_assert_eq!(count(&phases, "--- Executing nextTick Queue ---"), expect(!groups.priority_micro.is_empty()));
        prop_assert_eq!(count(&phases, "--- Executing Microtask Queue ---"), expect(!groups.secondary_micro.is_empty()));
        prop_assert_eq!(count(&phases, "--- Entering Timers Phase ---"), expect(!groups.timer.is_empty()));
        prop_assert_eq!(count(&phases, "--- Entering Check Phase ---"), expect(!groups.immediate.is_empty()));
    }

    #[test]
    fn without_sync_nothing_is_registered(groups in groups_strategy(0)) {
        let groups = TaskGroups { sync: Vec::new(), ..groups };
        let log = Scheduler::new(groups, Pace::instant()).run_to_end();

        prop_assert!(log.outputs().is_empty());
        prop_assert!(log.texts_of(EventKind::Queue).is_empty());
        prop_assert_eq!(phase_texts(&log).len(), 6);
    }

    #[test]
    fn paced_runs_are_monotonic_and_repeatable(groups in groups_strategy(0), ms in 300u64..=2000) {
        let run = || {
            let mut scheduler = Scheduler::new(groups.clone(), Pace::from_millis(ms));
            while scheduler.step().is_some() {}
            (scheduler.elapsed_ms(), scheduler.snapshot())
        };

        let (elapsed, first) = run();
        let (_, second) = run();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(first.status, RunStatus::Idle);
        prop_assert!(first.all_queues_empty());

        let stamps: Vec<u64> = first.events.to_vec().iter().map(|e| e.timestamp).collect();
        prop_assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(stamps.last().is_some_and(|t| *t <= elapsed));
    }

    #[test]
    fn one_line_statements_classify_back_to_their_groups(
        lines in groups_strategy(0).prop_flat_map(|g| Just(source_lines(&g)).prop_shuffle().prop_map(move |l| (g.clone(), l)))
    ) {
        let (groups, shuffled) = lines;
        let classified = classify(&shuffled.join("\n"));

        // Line order is shuffled across groups, so compare each group as a set.
        for group in TaskGroup::ALL {
            prop_assert_eq!(sorted(classified.get(group)), sorted(groups.get(group)));
        }
    }
}
