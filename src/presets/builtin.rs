// src/presets/builtin.rs

//! Example programs shipped with the binary.
//!
//! Callbacks are written on one line each so the line classifier can see
//! their labels.

pub(super) struct BuiltinPreset {
    pub key: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub code: &'static str,
}

pub(super) const BUILTIN: [BuiltinPreset; 6] = [
    BuiltinPreset {
        key: "basic",
        name: "Basic Example",
        description: "Understanding execution order",
        code: "\
console.log('Start');

setTimeout(() => console.log('setTimeout'), 0);

setImmediate(() => console.log('setImmediate'));

process.nextTick(() => console.log('nextTick'));

Promise.resolve().then(() => console.log('Promise'));

console.log('End');
",
    },
    BuiltinPreset {
        key: "timersVsImmediate",
        name: "setTimeout vs setImmediate",
        description: "When does each execute?",
        code: "\
setTimeout(() => console.log('setTimeout 1'), 0);

setTimeout(() => console.log('setTimeout 2'), 0);

setImmediate(() => console.log('setImmediate 1'));

setImmediate(() => console.log('setImmediate 2'));

console.log('Main code');
",
    },
    BuiltinPreset {
        key: "nextTickRecursion",
        name: "process.nextTick() Behavior",
        description: "nextTick executes before everything",
        code: "\
console.log('Start');

process.nextTick(() => console.log('nextTick 1'));

process.nextTick(() => console.log('nextTick 2'));

Promise.resolve().then(() => console.log('Promise 1'));

setTimeout(() => console.log('setTimeout'), 0);

console.log('End');
",
    },
    BuiltinPreset {
        key: "microTaskQueue",
        name: "Microtask Queue Priority",
        description: "nextTick vs Promise microtasks",
        code: "\
process.nextTick(() => console.log('nextTick 1'));

Promise.resolve().then(() => console.log('Promise 1'));

Promise.resolve().then(() => console.log('Promise 2'));

process.nextTick(() => console.log('nextTick 2'));

console.log('Sync code');
",
    },
    BuiltinPreset {
        key: "nestedTimers",
        name: "Nested Timers",
        description: "Understanding timer phases",
        code: "\
setTimeout(() => console.log('Timeout 1'), 0);

setTimeout(() => console.log('Timeout 2'), 0);

setImmediate(() => console.log('Immediate 1'));

setImmediate(() => console.log('Immediate 2'));

console.log('Main');
",
    },
    BuiltinPreset {
        key: "ioExample",
        name: "Complex Example",
        description: "All features combined",
        code: "\
console.log('Start');

setTimeout(() => { console.log('Timer 1'); process.nextTick(() => console.log('nextTick inside timer')); }, 0);

setImmediate(() => console.log('Immediate 1'));

process.nextTick(() => console.log('nextTick 1'));

Promise.resolve().then(() => console.log('Promise 1'));

console.log('End');
",
    },
];
