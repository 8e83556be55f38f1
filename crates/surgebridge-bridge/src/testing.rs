// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Test doubles: a facade that records every OS call, and an in-memory sink
// for trace output.

use std::cell::RefCell;
use std::collections::BTreeSet;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;

use surgebridge_core::error::{BridgeError, Result};
use surgebridge_core::types::{NavigationIntent, ShareRequest};

use crate::traits::*;

/// One call the bridge made against the OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OsCall {
    LoadLibrary(String),
    Navigate(NavigationIntent),
    Share(ShareRequest),
    Notice(String),
    CreateDir(PathBuf),
    LatencyHint,
}

/// Facade that records calls and answers from mutable fixtures.
#[derive(Default)]
pub struct RecordingBridge {
    pub calls: RefCell<Vec<OsCall>>,
    pub features: RefCell<BTreeSet<String>>,
    pub sdk: RefCell<u32>,
    /// Libraries whose load attempt fails.
    pub missing_libraries: BTreeSet<&'static str>,
    /// When set, every one-way send fails at the facade.
    pub fail_sends: bool,
    /// Answer for `create_dir`; `None` makes the call itself fail.
    pub mkdir_answer: Option<bool>,
}

impl RecordingBridge {
    pub fn new() -> Self {
        Self {
            mkdir_answer: Some(true),
            ..Default::default()
        }
    }

    pub fn tv() -> Self {
        let bridge = Self::new();
        bridge.set_tv(true);
        bridge
    }

    pub fn set_tv(&self, tv: bool) {
        let mut features = self.features.borrow_mut();
        if tv {
            features.insert(surgebridge_core::FEATURE_LEANBACK.into());
        } else {
            features.remove(surgebridge_core::FEATURE_LEANBACK);
        }
    }

    pub fn calls(&self) -> Vec<OsCall> {
        self.calls.borrow().clone()
    }

    pub fn navigations(&self) -> Vec<NavigationIntent> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                OsCall::Navigate(intent) => Some(intent.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn notices(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                OsCall::Notice(text) => Some(text.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: OsCall) {
        self.calls.borrow_mut().push(call);
    }

    fn send_result(&self) -> Result<()> {
        if self.fail_sends {
            Err(BridgeError::Jni("ActivityNotFoundException".into()))
        } else {
            Ok(())
        }
    }
}

impl PlatformBridge for RecordingBridge {
    fn platform_name(&self) -> &str {
        "Recording"
    }
}

impl NativeLibraryLoader for RecordingBridge {
    fn load_library(&self, name: &str) -> Result<()> {
        self.record(OsCall::LoadLibrary(name.into()));
        if self.missing_libraries.contains(name) {
            return Err(BridgeError::LibraryLoad {
                name: name.into(),
                reason: "UnsatisfiedLinkError".into(),
            });
        }
        Ok(())
    }
}

impl NativeFeatures for RecordingBridge {
    fn has_system_feature(&self, feature: &str) -> bool {
        self.features.borrow().contains(feature)
    }

    fn sdk_version(&self) -> u32 {
        *self.sdk.borrow()
    }
}

impl NativeNavigation for RecordingBridge {
    fn start_navigation(&self, intent: &NavigationIntent) -> Result<()> {
        self.record(OsCall::Navigate(intent.clone()));
        self.send_result()
    }
}

impl NativeShare for RecordingBridge {
    fn share(&self, request: &ShareRequest) -> Result<()> {
        self.record(OsCall::Share(request.clone()));
        self.send_result()
    }
}

impl NativeNotice for RecordingBridge {
    fn show_notice(&self, text: &str) -> Result<()> {
        self.record(OsCall::Notice(text.into()));
        self.send_result()
    }
}

impl NativeFileSystem for RecordingBridge {
    fn create_dir(&self, path: &Path) -> Result<bool> {
        self.record(OsCall::CreateDir(path.to_path_buf()));
        self.mkdir_answer
            .ok_or_else(|| BridgeError::Jni("SecurityException".into()))
    }
}

impl NativeDisplay for RecordingBridge {
    fn prefer_minimal_post_processing(&self) -> Result<()> {
        self.record(OsCall::LatencyHint);
        Ok(())
    }
}

/// Shared buffer that collects formatted trace lines.
#[derive(Clone, Default)]
pub struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    pub fn lines(&self) -> Vec<String> {
        let buf = self.0.lock().expect("log buffer poisoned");
        String::from_utf8_lossy(&buf)
            .lines()
            .map(str::to_owned)
            .collect()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.0
            .lock()
            .expect("log buffer poisoned")
            .extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for CapturedLogs {
    type Writer = CapturedLogs;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// Run `f` with a thread-local subscriber that writes into the returned buffer.
pub fn capture_traces<T>(f: impl FnOnce() -> T) -> (T, CapturedLogs) {
    let logs = CapturedLogs::default();
    let subscriber = tracing_subscriber::fmt()
        .with_writer(logs.clone())
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .without_time()
        .finish();
    let out = tracing::subscriber::with_default(subscriber, f);
    (out, logs)
}
