#![allow(dead_code)]

use std::collections::BTreeMap;

use loopviz::classify::TaskGroups;
use loopviz::config::{ConfigFile, ConfigSection, PresetConfig, RawConfigFile};

/// Builder for `TaskGroups` to skip the classifier in engine tests.
#[derive(Default)]
pub struct TaskGroupsBuilder {
    groups: TaskGroups,
}

impl TaskGroupsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sync(mut self, label: &str) -> Self {
        self.groups.sync.push(label.to_string());
        self
    }

    pub fn timer(mut self, label: &str) -> Self {
        self.groups.timer.push(label.to_string());
        self
    }

    pub fn immediate(mut self, label: &str) -> Self {
        self.groups.immediate.push(label.to_string());
        self
    }

    pub fn next_tick(mut self, label: &str) -> Self {
        self.groups.priority_micro.push(label.to_string());
        self
    }

    pub fn promise(mut self, label: &str) -> Self {
        self.groups.secondary_micro.push(label.to_string());
        self
    }

    pub fn build(self) -> TaskGroups {
        self.groups
    }
}

/// The groups of the "basic" walkthrough: two sync lines and one task of
/// every deferred kind.
pub fn basic_groups() -> TaskGroups {
    TaskGroupsBuilder::new()
        .sync("Start")
        .sync("End")
        .timer("setTimeout")
        .immediate("setImmediate")
        .next_tick("nextTick")
        .promise("Promise")
        .build()
}

/// Builder for `ConfigFile` to simplify test setup.
pub struct ConfigFileBuilder {
    config: RawConfigFile,
}

impl ConfigFileBuilder {
    pub fn new() -> Self {
        Self {
            config: RawConfigFile {
                config: ConfigSection::default(),
                preset: BTreeMap::new(),
            },
        }
    }

    pub fn speed_ms(mut self, ms: u64) -> Self {
        self.config.config.speed_ms = ms;
        self
    }

    pub fn example(mut self, key: &str) -> Self {
        self.config.config.example = Some(key.to_string());
        self
    }

    pub fn with_preset(mut self, key: &str, code: &str) -> Self {
        self.config.preset.insert(
            key.to_string(),
            PresetConfig {
                name: None,
                description: None,
                code: code.to_string(),
            },
        );
        self
    }

    pub fn raw(self) -> RawConfigFile {
        self.config
    }

    pub fn build(self) -> ConfigFile {
        ConfigFile::try_from(self.config).expect("Failed to build valid config from builder")
    }
}

impl Default for ConfigFileBuilder {
    fn default() -> Self {
        Self::new()
    }
}
