#![allow(dead_code)]

pub use loopviz_test_utils::{init_tracing, with_timeout};

/// Every kind of task on its own line, callbacks written inline.
pub const BASIC_SOURCE: &str = "\
console.log('Start');
setTimeout(() => console.log('setTimeout'), 0);
setImmediate(() => console.log('setImmediate'));
process.nextTick(() => console.log('nextTick'));
Promise.resolve().then(() => console.log('Promise'));
console.log('End');
";

/// Two timers, two immediates and one sync line; no microtasks.
pub const TIMERS_AND_IMMEDIATES: &str = "\
setTimeout(() => console.log('setTimeout 1'), 0);
setTimeout(() => console.log('setTimeout 2'), 0);
setImmediate(() => console.log('setImmediate 1'));
setImmediate(() => console.log('setImmediate 2'));
console.log('Main code');
";

pub const PENDING_IO: [&str; 2] = [
    "--- Pending I/O Phase (Empty) ---",
    "--- Leaving Pending I/O Phase ---",
];
pub const POLL: [&str; 2] = ["--- Poll Phase (Empty) ---", "--- Leaving Poll Phase ---"];
pub const CLOSE: [&str; 2] = ["--- Close Phase (Empty) ---", "--- Leaving Close Phase ---"];
pub const COMPLETE: &str = "--- Event Loop Complete ---";
