//! Shared test utilities.
//!
//! Tests that manipulate environment variables must hold `env_lock()`.

use std::fs;
use std::path::Path;
use std::sync::{Mutex, OnceLock};
use tempfile::TempDir;

use crate::archive::Archive;

/// Global lock for tests that modify environment variables.
pub fn env_lock() -> std::sync::MutexGuard<'static, ()> {
    static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
    LOCK.get_or_init(|| Mutex::new(()))
        .lock()
        .unwrap_or_else(|e| e.into_inner())
}

/// RAII guard for temporarily setting an environment variable.
pub struct EnvGuard {
    key: String,
    old: Option<String>,
}

impl EnvGuard {
    pub fn set(key: &str, value: &str) -> Self {
        let old = std::env::var(key).ok();
        unsafe {
            std::env::set_var(key, value);
        }
        Self {
            key: key.to_string(),
            old,
        }
    }
}

impl Drop for EnvGuard {
    fn drop(&mut self) {
        match &self.old {
            Some(val) => unsafe { std::env::set_var(&self.key, val) },
            None => unsafe { std::env::remove_var(&self.key) },
        }
    }
}

/// Temporary archive directory with helpers to write export files.
pub struct ArchiveFixture {
    tmp: TempDir,
}

impl ArchiveFixture {
    pub fn new() -> Self {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("data").join("days")).unwrap();
        Self { tmp }
    }

    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn data_dir(&self) -> std::path::PathBuf {
        self.tmp.path().join("data")
    }

    pub fn archive(&self) -> Archive {
        Archive::new(self.data_dir())
    }

    pub fn global(&self, json: &str) {
        fs::write(self.data_dir().join("index.json"), json).unwrap();
    }

    pub fn day(&self, day: &str, json: &str) {
        let dir = self.data_dir().join("days").join(day);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("index.json"), json).unwrap();
    }

    pub fn messages(&self, day: &str, conversation: &str, json: &str) {
        let dir = self
            .data_dir()
            .join("days")
            .join(day)
            .join(format!("messages-{conversation}"));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("messages.json"), json).unwrap();
    }

    /// A small two-day archive with a direct chat and a group
    pub fn sample() -> Self {
        let fixture = Self::new();
        fixture.global(
            r#"{
                "owner": "me",
                "users": {
                    "alice": {"display_name": "Alice Johnson", "avatar": "/avatars/alice.png"},
                    "bob": {"display_name": "Bob Stone"}
                }
            }"#,
        );
        fixture.day(
            "2024-01-05",
            r#"{
                "conversations": {
                    "alice": {
                        "type": "individual",
                        "participants": ["me", "alice"],
                        "latest_from": "alice",
                        "latest_kind": "snap",
                        "latest_media_type": "VIDEO",
                        "latest_timestamp": 1704470400000,
                        "is_sender": false
                    },
                    "crew": {
                        "type": "group",
                        "title": "Weekend Crew",
                        "participants": ["me", "alice", "bob"],
                        "latest_from": "bob",
                        "latest_kind": "chat",
                        "latest_timestamp": 1704484800000,
                        "is_sender": true
                    }
                }
            }"#,
        );
        fixture.messages(
            "2024-01-05",
            "alice",
            r#"[
                {"id": "m1", "from": "alice", "kind": "chat", "media_type": "TEXT",
                 "text": "Hey <there>", "timestamp": 1704470000000},
                {"id": "m2", "from": "me", "kind": "chat", "media_type": "TEXT",
                 "text": "This message is long enough that it should wrap in the bubble view",
                 "timestamp": 1704470100000, "is_sender": true},
                {"id": "m3", "from": "alice", "kind": "snap", "media_type": "VIDEO",
                 "timestamp": 1704470400000, "media": "/media/m3.mp4",
                 "thumbnail": "/media/m3.jpg", "duration": 15, "caption": "Sunrise"},
                {"id": "m4", "from": "alice", "kind": "chat", "media_type": "IMAGE",
                 "timestamp": 1704470500000, "media": "/media/m4.jpg"}
            ]"#,
        );
        fixture.day(
            "2024-01-06",
            r#"{"conversations": {"bob": {"participants": ["me", "bob"], "latest_timestamp": 1704556800000}}}"#,
        );
        fixture
    }
}
