// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the Android runtime is unavailable.
//
// Libraries are resolved against the configured search directories but not
// mapped into the process. Features and SDK level come from the configured
// profile. Directory creation hits the real filesystem. Navigation and
// sharing have no desktop counterpart and return `PlatformUnavailable`.

use std::path::{Path, PathBuf};

use surgebridge_core::config::DesktopProfile;
use surgebridge_core::error::{BridgeError, Result};
use surgebridge_core::types::{NavigationIntent, ShareRequest};

use crate::traits::*;

/// Desktop bridge driven by a [`DesktopProfile`].
pub struct StubBridge {
    profile: DesktopProfile,
}

impl StubBridge {
    pub fn new(profile: DesktopProfile) -> Self {
        Self { profile }
    }

    /// Location of `name` in the search directories, using the host's
    /// dynamic-library naming convention.
    pub fn resolve_library(&self, name: &str) -> Option<PathBuf> {
        let file = format!(
            "{}{name}{}",
            std::env::consts::DLL_PREFIX,
            std::env::consts::DLL_SUFFIX
        );
        self.profile
            .library_dirs
            .iter()
            .map(|dir| dir.join(&file))
            .find(|candidate| candidate.is_file())
    }
}

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeLibraryLoader for StubBridge {
    fn load_library(&self, name: &str) -> Result<()> {
        match self.resolve_library(name) {
            Some(path) => {
                tracing::debug!(library = name, path = %path.display(), "resolved library");
                Ok(())
            }
            None => Err(BridgeError::LibraryLoad {
                name: name.into(),
                reason: format!(
                    "not found in {} search director{}",
                    self.profile.library_dirs.len(),
                    if self.profile.library_dirs.len() == 1 { "y" } else { "ies" }
                ),
            }),
        }
    }
}

impl NativeFeatures for StubBridge {
    fn has_system_feature(&self, feature: &str) -> bool {
        self.profile.system_features.iter().any(|f| f == feature)
    }

    fn sdk_version(&self) -> u32 {
        self.profile.sdk_version
    }
}

impl NativeNavigation for StubBridge {
    fn start_navigation(&self, intent: &NavigationIntent) -> Result<()> {
        tracing::warn!(url = %intent.url, "NativeNavigation::start_navigation called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeShare for StubBridge {
    fn share(&self, _request: &ShareRequest) -> Result<()> {
        tracing::warn!("NativeShare::share called on stub bridge");
        Err(BridgeError::PlatformUnavailable)
    }
}

impl NativeNotice for StubBridge {
    fn show_notice(&self, text: &str) -> Result<()> {
        tracing::info!("notice: {text}");
        Ok(())
    }
}

impl NativeFileSystem for StubBridge {
    fn create_dir(&self, path: &Path) -> Result<bool> {
        match std::fs::create_dir(path) {
            Ok(()) => Ok(true),
            Err(e)
                if matches!(
                    e.kind(),
                    std::io::ErrorKind::AlreadyExists | std::io::ErrorKind::NotFound
                ) =>
            {
                Ok(false)
            }
            Err(e) => Err(e.into()),
        }
    }
}

impl NativeDisplay for StubBridge {
    fn prefer_minimal_post_processing(&self) -> Result<()> {
        Err(BridgeError::PlatformUnavailable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_with_dir(dir: &Path) -> DesktopProfile {
        DesktopProfile {
            library_dirs: vec![dir.to_path_buf()],
            ..Default::default()
        }
    }

    fn touch_library(dir: &Path, name: &str) {
        let file = format!(
            "{}{name}{}",
            std::env::consts::DLL_PREFIX,
            std::env::consts::DLL_SUFFIX
        );
        std::fs::write(dir.join(file), b"").expect("write failed");
    }

    #[test]
    fn resolves_libraries_in_search_dirs() {
        let dir = tempfile::tempdir().expect("tempdir failed");
        touch_library(dir.path(), "physfs");
        let bridge = StubBridge::new(profile_with_dir(dir.path()));

        assert!(bridge.load_library("physfs").is_ok());
        match bridge.load_library("allegro") {
            Err(BridgeError::LibraryLoad { name, reason }) => {
                assert_eq!(name, "allegro");
                assert!(reason.contains("1 search directory"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn no_search_dirs_means_nothing_loads() {
        let bridge = StubBridge::new(DesktopProfile::default());
        assert!(bridge.load_library("opensurge").is_err());
    }

    #[test]
    fn features_come_from_profile() {
        let bridge = StubBridge::new(DesktopProfile {
            system_features: vec![surgebridge_core::FEATURE_LEANBACK.into()],
            sdk_version: 33,
            ..Default::default()
        });
        assert!(bridge.has_system_feature(surgebridge_core::FEATURE_LEANBACK));
        assert!(!bridge.has_system_feature("android.hardware.camera"));
        assert_eq!(bridge.sdk_version(), 33);
    }

    #[test]
    fn create_dir_is_single_level() {
        let root = tempfile::tempdir().expect("tempdir failed");
        let bridge = StubBridge::new(DesktopProfile::default());

        assert!(bridge.create_dir(&root.path().join("a")).expect("create_dir failed"));
        assert!(!bridge.create_dir(&root.path().join("a")).expect("create_dir failed"));
        assert!(!bridge
            .create_dir(&root.path().join("b").join("c"))
            .expect("create_dir failed"));
    }

    #[test]
    fn outward_sends_are_unavailable() {
        let bridge = StubBridge::new(DesktopProfile::default());
        assert!(matches!(
            bridge.start_navigation(&NavigationIntent::for_url("https://opensurge2d.org")),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.share(&ShareRequest::plain_text("hi")),
            Err(BridgeError::PlatformUnavailable)
        ));
        assert!(bridge.show_notice("hi").is_ok());
    }
}
