// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the activity bridge.

/// Feature flag the OS declares on TV-class (leanback) devices.
pub const FEATURE_LEANBACK: &str = "android.software.leanback";

/// First SDK level that exposes `Window.setPreferMinimalPostProcessing`.
pub const MIN_SDK_LATENCY_HINT: u32 = 30;

/// Store application that should handle "app details" links.
pub const STORE_PACKAGE: &str = "com.android.vending";

/// Prefix of the canonical store "app details" URL.
pub const STORE_DETAILS_PREFIX: &str = "https://play.google.com/store/apps/details?id=";

/// URL schemes the bridge is willing to hand to the OS.
pub const ALLOWED_URL_PREFIXES: [&str; 3] = ["https://", "http://", "mailto:"];

/// Name of the main engine library (`libopensurge.so`).
pub const ENGINE_LIBRARY: &str = "opensurge";

// ---------------------------------------------------------------------------
// Library manifest
// ---------------------------------------------------------------------------

/// What a native library provides. Only used for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LibraryRole {
    /// Storage I/O layer (physfs).
    StorageIo,
    /// Core Allegro runtime.
    Runtime,
    /// Allegro add-on (primitives, image, font, audio, codecs, ...).
    Addon,
    /// The engine itself, always last.
    Engine,
}

/// One native library in the load sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryEntry {
    /// Bare library name as passed to `System.loadLibrary` (no `lib`/`.so`).
    pub name: &'static str,
    pub role: LibraryRole,
}

impl LibraryEntry {
    const fn new(name: &'static str, role: LibraryRole) -> Self {
        Self { name, role }
    }
}

/// The fixed load order: storage I/O, runtime, add-ons, then the engine.
const DECLARED_LIBRARIES: [LibraryEntry; 13] = [
    LibraryEntry::new("physfs", LibraryRole::StorageIo),
    LibraryEntry::new("allegro", LibraryRole::Runtime),
    LibraryEntry::new("allegro_primitives", LibraryRole::Addon),
    LibraryEntry::new("allegro_image", LibraryRole::Addon),
    LibraryEntry::new("allegro_font", LibraryRole::Addon),
    LibraryEntry::new("allegro_ttf", LibraryRole::Addon),
    LibraryEntry::new("allegro_audio", LibraryRole::Addon),
    LibraryEntry::new("allegro_acodec", LibraryRole::Addon),
    LibraryEntry::new("allegro_color", LibraryRole::Addon),
    LibraryEntry::new("allegro_dialog", LibraryRole::Addon),
    LibraryEntry::new("allegro_memfile", LibraryRole::Addon),
    LibraryEntry::new("allegro_physfs", LibraryRole::Addon),
    LibraryEntry::new(ENGINE_LIBRARY, LibraryRole::Engine),
];

/// Ordered set of native libraries to load at startup.
///
/// Order is dependency order and must be preserved exactly: loading a
/// dependent before its dependency may fail or misbehave at the native layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LibraryManifest {
    entries: &'static [LibraryEntry],
}

impl LibraryManifest {
    /// The manifest the bridge ships with. Names never vary at runtime.
    pub const fn declared() -> Self {
        Self {
            entries: &DECLARED_LIBRARIES,
        }
    }

    /// Build a manifest over an arbitrary static table.
    pub const fn from_static(entries: &'static [LibraryEntry]) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &'static [LibraryEntry] {
        self.entries
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|e| e.name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of one load attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadOutcome {
    Loaded,
    Failed { reason: String },
}

impl LoadOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, LoadOutcome::Loaded)
    }
}

/// Per-library outcomes in attempt order.
///
/// Diagnostic only. The engine's own capability checks are the authoritative
/// signal for missing functionality, so startup never branches on this.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub attempts: Vec<(LibraryEntry, LoadOutcome)>,
}

impl LoadReport {
    pub fn loaded(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attempts
            .iter()
            .filter(|(_, o)| o.is_loaded())
            .map(|(e, _)| e.name)
    }

    pub fn failed(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.attempts
            .iter()
            .filter(|(_, o)| !o.is_loaded())
            .map(|(e, _)| e.name)
    }

    pub fn all_loaded(&self) -> bool {
        self.attempts.iter().all(|(_, o)| o.is_loaded())
    }
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

/// Execution phase of the hosting activity, as last reported by the OS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Restarted,
    Destroyed,
}

/// An OS-issued lifecycle callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Create,
    Start,
    Resume,
    Pause,
    Stop,
    Restart,
    Destroy,
}

impl Transition {
    /// State the activity is in once the transition has been forwarded.
    pub fn target_state(self) -> LifecycleState {
        match self {
            Transition::Create => LifecycleState::Created,
            Transition::Start => LifecycleState::Started,
            Transition::Resume => LifecycleState::Resumed,
            Transition::Pause => LifecycleState::Paused,
            Transition::Stop => LifecycleState::Stopped,
            Transition::Restart => LifecycleState::Restarted,
            Transition::Destroy => LifecycleState::Destroyed,
        }
    }

    /// Name of the activity callback (`onStart`, ...).
    pub fn callback_name(self) -> &'static str {
        match self {
            Transition::Create => "onCreate",
            Transition::Start => "onStart",
            Transition::Resume => "onResume",
            Transition::Pause => "onPause",
            Transition::Stop => "onStop",
            Transition::Restart => "onRestart",
            Transition::Destroy => "onDestroy",
        }
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.callback_name())
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// A request from the engine. Stateless; the bridge never retries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    OpenUrl(String),
    ShareText(String),
    ShowToast(String),
    MakeDirectory(String),
    QueryIsTvDevice,
}

/// What the dispatcher did with a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The OS-facing effect was handed off (or absorbed on failure).
    Done,
    /// Refused locally by a validation or capability gate.
    Refused,
    /// Result of a directory creation.
    Created(bool),
    /// Result of a device-class query.
    IsTvDevice(bool),
}

/// A view request handed to the OS. Fire-and-forget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationIntent {
    pub url: String,
    /// Application package that should handle the URL, if any.
    pub package: Option<String>,
}

impl NavigationIntent {
    /// Build an intent for an already-validated URL, tagging store links.
    pub fn for_url(url: &str) -> Self {
        let package = url
            .starts_with(STORE_DETAILS_PREFIX)
            .then(|| STORE_PACKAGE.to_string());
        Self {
            url: url.to_string(),
            package,
        }
    }
}

/// Plain-text share request routed through the OS chooser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareRequest {
    pub mime_type: &'static str,
    pub text: String,
    pub chooser_title: &'static str,
}

impl ShareRequest {
    pub fn plain_text(text: &str) -> Self {
        Self {
            mime_type: "text/plain",
            text: text.to_string(),
            chooser_title: "Share",
        }
    }
}
