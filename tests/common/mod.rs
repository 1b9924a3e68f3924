//! Archive fixture shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct Export {
    tmp: TempDir,
}

impl Export {
    pub fn root(&self) -> &Path {
        self.tmp.path()
    }

    pub fn data_dir(&self) -> PathBuf {
        self.tmp.path().join("data")
    }

    pub fn web_root(&self) -> PathBuf {
        self.tmp.path().join("web")
    }

    fn write(&self, relative: &str, contents: &str) {
        let path = self.tmp.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }
}

/// Two days, a direct chat with media and an untitled group
pub fn export() -> Export {
    let export = Export {
        tmp: TempDir::new().unwrap(),
    };
    export.write(
        "data/index.json",
        r#"{"owner":"me","users":{"sam":{"display_name":"Sam Rivera","avatar":"/avatars/sam.png"}}}"#,
    );
    export.write(
        "data/days/2024-03-09/index.json",
        r#"{"conversations":{
            "sam":{"participants":["me","sam"],"latest_kind":"chat","latest_timestamp":1709990000000},
            "g42":{"type":"group","participants":["me","sam","kim"],"latest_from":"kim","latest_timestamp":1709999000000}
        }}"#,
    );
    export.write(
        "data/days/2024-03-09/messages-sam/messages.json",
        r#"[
            {"id":"s1","from":"sam","kind":"chat","media_type":"TEXT","text":"pizza tonight?","timestamp":"2024-03-09T13:00:00Z"},
            {"id":"s2","from":"me","kind":"chat","media_type":"TEXT","text":"yes!","timestamp":1709989300000,"is_sender":true},
            {"id":"s3","from":"sam","kind":"chat","media_type":"IMAGE","media":"/media/s3.jpg","timestamp":1709990000000}
        ]"#,
    );
    export.write(
        "data/days/2024-03-10/index.json",
        r#"{"conversations":{"sam":{"participants":["me","sam"],"latest_timestamp":1710072000000}}}"#,
    );
    export.write("web/styles/main.css", "body { margin: 0; }");
    export
}
