// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the OS facilities the bridge uses.
//
// Each trait is one OS facility. The navigation, share and notice traits are
// one-way sends: an `Ok(())` means the request was handed to the OS, not that
// anything happened downstream. Failures past the facade are unobservable.

use std::path::Path;

use surgebridge_core::error::Result;
use surgebridge_core::types::{NavigationIntent, ShareRequest};

/// Unified bridge that groups all OS facilities.
pub trait PlatformBridge:
    NativeLibraryLoader
    + NativeFeatures
    + NativeNavigation
    + NativeShare
    + NativeNotice
    + NativeFileSystem
    + NativeDisplay
{
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Load a native dynamic library by bare name.
pub trait NativeLibraryLoader {
    /// Load `lib<name>.so` into the process.
    fn load_library(&self, name: &str) -> Result<()>;
}

/// Device and OS feature queries.
pub trait NativeFeatures {
    /// Whether the OS declares the given system feature. Never fails; an
    /// unanswerable query is `false`.
    fn has_system_feature(&self, feature: &str) -> bool;

    /// SDK level of the running OS. 0 when unknown.
    fn sdk_version(&self) -> u32;
}

/// Open a URL in whatever application the OS picks.
pub trait NativeNavigation {
    fn start_navigation(&self, intent: &NavigationIntent) -> Result<()>;
}

/// The OS share chooser.
pub trait NativeShare {
    fn share(&self, request: &ShareRequest) -> Result<()>;
}

/// Short-lived, non-blocking on-screen notices.
pub trait NativeNotice {
    /// Show `text` for the OS's short notice duration.
    fn show_notice(&self, text: &str) -> Result<()>;
}

/// Filesystem operations the engine cannot do itself.
pub trait NativeFileSystem {
    /// Create exactly one directory. Parents are not created.
    ///
    /// Returns `Ok(false)` when the OS declined (already exists, missing
    /// parent), `Err` when the call itself failed.
    fn create_dir(&self, path: &Path) -> Result<bool>;
}

/// Display tuning hints for the hosting window.
pub trait NativeDisplay {
    /// Ask the compositor to skip post-processing (auto low latency mode).
    fn prefer_minimal_post_processing(&self) -> Result<()>;
}

/// The native engine's lifecycle entry points.
///
/// On Android these delegate up the activity's own call chain; the forwarder
/// only wraps them.
pub trait EngineLifecycle {
    fn on_create(&mut self) -> Result<()>;
    fn on_start(&mut self) -> Result<()>;
    fn on_resume(&mut self) -> Result<()>;
    fn on_pause(&mut self) -> Result<()>;
    fn on_stop(&mut self) -> Result<()>;
    fn on_restart(&mut self) -> Result<()>;
    fn on_destroy(&mut self) -> Result<()>;
}

/// The contract the native engine calls back into.
pub trait EngineServices {
    fn open_web_page(&self, url: &str);
    fn share_text(&self, text: &str);
    fn is_tv_device(&self) -> bool;
    fn show_toast(&self, text: &str);
    fn mkdir(&self, path: &str) -> bool;
}
