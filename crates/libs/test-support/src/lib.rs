//! Shared fixtures for location content tests.

use serde_json::{json, Value as JsonValue};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;
use std::sync::{Mutex, MutexGuard};

static CONFIG_ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn config_env_lock() -> &'static Mutex<()> {
    CONFIG_ENV_LOCK.get_or_init(|| Mutex::new(()))
}

/// Holds a process-wide config env var for the duration of a test.
pub struct ConfigEnvGuard {
    var: &'static str,
    _lock: MutexGuard<'static, ()>,
}

impl Drop for ConfigEnvGuard {
    fn drop(&mut self) {
        std::env::remove_var(self.var);
    }
}

/// Points `var` at `path`, or clears it, until the guard drops.
pub fn lock_config_env(var: &'static str, path: Option<&Path>) -> ConfigEnvGuard {
    let _lock = config_env_lock().lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    match path {
        Some(path) => std::env::set_var(var, path),
        None => std::env::remove_var(var),
    }
    ConfigEnvGuard { var, _lock }
}

/// Content as sent by clients that only know the MSC3488 keys.
pub fn unstable_location() -> JsonValue {
    json!({
        "msgtype": "m.location",
        "body": "Big Ben, London, UK",
        "geo_uri": "geo:51.5008,0.1247;30",
        "org.matrix.msc3488.location": {
            "uri": "geo:51.5008,0.1247;30",
            "description": "Big Ben"
        },
        "org.matrix.msc3488.ts": 1_636_829_458_432u64,
        "org.matrix.msc1767.text": "Big Ben, London, UK",
        "org.matrix.msc3488.asset": { "type": "m.pin" }
    })
}

/// Content carrying only the stabilized keys.
pub fn stable_location() -> JsonValue {
    json!({
        "msgtype": "m.location",
        "body": "Location",
        "geo_uri": "geo:1,2;3",
        "m.location": { "uri": "geo:9,9;9" },
        "m.ts": 1_700_000_000_000u64,
        "m.text": "Location",
        "m.asset": { "type": "m.self" }
    })
}

/// Content where both revisions disagree, as after a partial migration.
pub fn mixed_location() -> JsonValue {
    json!({
        "msgtype": "m.location",
        "body": "Meeting point",
        "geo_uri": "geo:48.8584,2.2945",
        "org.matrix.msc3488.location": { "uri": "geo:0,0" },
        "m.location": { "uri": "geo:48.8584,2.2945;u=10", "description": "Eiffel Tower" },
        "org.matrix.msc3488.ts": 1,
        "m.ts": 2,
        "org.matrix.msc3488.asset": { "type": "m.self" },
        "m.asset": { "type": "m.pin" }
    })
}

/// Content from clients that predate every extension.
pub fn legacy_location() -> JsonValue {
    json!({
        "msgtype": "m.location",
        "body": "Somewhere",
        "geo_uri": "geo:40.05,29.24;30"
    })
}

/// Writes `value` as JSON into a fresh file inside `dir`.
pub fn write_fixture(dir: &tempfile::TempDir, name: &str, value: &JsonValue) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, value.to_string()).expect("write fixture");
    path
}
