// SPDX-License-Identifier: MIT
// Copyright (c) 2026 the gastown authors

//! Sandbox helpers shared by every black-box scenario.

use assert_cmd::Command;
use std::path::{Path, PathBuf};
use std::process::Child;
use std::time::{Duration, Instant};
use tempfile::TempDir;

/// Locate a sibling workspace binary by name.
///
/// `assert_cmd::Command::cargo_bin` only resolves binaries owned by the
/// crate the integration test belongs to; `gt` and `gastownd` live in their
/// own crates, so the path is derived from this test binary's own location
/// instead (`target/debug/deps/specs-<hash>` -> `target/debug/<name>`).
pub fn workspace_bin(name: &str) -> PathBuf {
    let mut path = std::env::current_exe().expect("current_exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push(name);
    path.with_extension(std::env::consts::EXE_EXTENSION)
}

pub fn gt() -> Command {
    Command::new(workspace_bin("gt"))
}

/// A fresh, isolated town: a temp state directory handed to every command
/// built through [`Sandbox::gt`] via `GASTOWN_STATE_DIR`.
pub struct Sandbox {
    dir: TempDir,
}

impl Sandbox {
    pub fn new() -> Self {
        Self { dir: TempDir::new().expect("tempdir") }
    }

    pub fn state_dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn gt(&self) -> Command {
        let mut cmd = gt();
        cmd.env("GASTOWN_STATE_DIR", self.state_dir());
        cmd
    }

    /// Write a single-entry routing file mapping `prefix` to `rig`.
    pub fn write_routing(&self, prefix: &str, rig: &str) {
        let line = format!("{{\"prefix\":\"{prefix}\",\"rig\":\"{rig}\"}}\n");
        std::fs::write(self.state_dir().join("routing.jsonl"), line).expect("write routing.jsonl");
    }
}

/// A running `gastownd`, killed on drop. Every CLI command the daemon's
/// queue control plane round-trips through shares this daemon's state
/// directory and its single in-process `QueueRuntimeState` record.
pub struct Daemon {
    child: Child,
    sandbox: Sandbox,
}

impl Daemon {
    pub fn start() -> Self {
        let sandbox = Sandbox::new();
        let child = std::process::Command::new(workspace_bin("gastownd"))
            .env("GASTOWN_STATE_DIR", sandbox.state_dir())
            .env("RUST_LOG", "error")
            .spawn()
            .expect("spawn gastownd");

        let socket = sandbox.state_dir().join("daemon.sock");
        let deadline = Instant::now() + Duration::from_secs(5);
        while !socket.exists() {
            if Instant::now() > deadline {
                panic!("gastownd did not create its control-plane socket in time");
            }
            std::thread::sleep(Duration::from_millis(20));
        }

        Self { child, sandbox }
    }

    pub fn gt(&self) -> Command {
        self.sandbox.gt()
    }
}

impl Drop for Daemon {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}
