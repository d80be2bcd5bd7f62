//! Shared test helpers
#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Mutex;

use hipchat_notify::Reporter;

/// Reporter that records everything it is given
#[derive(Default)]
pub struct CapturingReporter {
    pub errors: Mutex<Vec<String>>,
    pub warnings: Mutex<Vec<String>>,
}

impl CapturingReporter {
    pub fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }

    pub fn warnings(&self) -> Vec<String> {
        self.warnings.lock().unwrap().clone()
    }
}

impl Reporter for CapturingReporter {
    fn error(&self, message: &str) {
        self.errors.lock().unwrap().push(message.to_string());
    }

    fn warn(&self, message: &str) {
        self.warnings.lock().unwrap().push(message.to_string());
    }
}

/// Write `contents` to `root/relative`, creating parent directories
pub fn write_file(root: &Path, relative: &str, contents: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, contents).unwrap();
}

/// Populate `root/src/.git` with the given metadata files
pub fn write_git_metadata(root: &Path, files: &[(&str, &str)]) {
    fs::create_dir_all(root.join("src/.git")).unwrap();
    for (name, contents) in files {
        write_file(root, &format!("src/.git/{}", name), contents);
    }
}

pub const FULL_GIT_METADATA: [(&str, &str); 3] = [
    ("committer", "john.doe@nowhere.io"),
    ("short_ref", "abc123"),
    ("commit_message", "I hope this doesn't break anything!"),
];
