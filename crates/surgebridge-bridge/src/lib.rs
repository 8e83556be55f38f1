// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! surgebridge: activity bridge between the Android lifecycle runtime and
//! the native engine.
//!
//! The bridge has four parts:
//!
//! - [`loader`]: loads the fixed native-library manifest once, in order,
//!   isolating failures per library.
//! - [`capability`]: device-class queries (TV-class, latency-hint support).
//! - [`dispatcher`]: executes engine requests (open URL, share, toast,
//!   mkdir) behind validation and capability gates.
//! - [`lifecycle`]: forwards OS lifecycle transitions to the engine with
//!   paired enter/leave tracing.
//!
//! OS facilities are reached through the traits in [`traits`]; the Android
//! backend speaks JNI, the desktop stub backs the host binary and CI.

pub mod capability;
pub mod dispatcher;
pub mod lifecycle;
pub mod loader;
pub mod logging;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

#[cfg(test)]
pub(crate) mod testing;

pub use dispatcher::ActionDispatcher;
pub use lifecycle::LifecycleForwarder;
pub use traits::{EngineLifecycle, EngineServices, PlatformBridge};

use surgebridge_core::config::BridgeConfig;

/// Build the bridge implementation for the target operating system.
///
/// `config` only affects the desktop stub.
pub fn platform_bridge(config: &BridgeConfig) -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: JNI calls on the hosting activity.
        let _ = config;
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: configured device profile, no Android runtime.
        Box::new(stub::StubBridge::new(config.desktop.clone()))
    }
}

#[cfg(test)]
mod tests {
    const SHIM: &str =
        include_str!("../../../android/src/main/java/org/opensurge2d/surgeengine/MainActivity.java");
    const EXPORTS: &str = include_str!("android/entry.rs");
    const EXPORT_PREFIX: &str = "Java_org_opensurge2d_surgeengine_MainActivity_";

    fn shim_natives() -> Vec<&'static str> {
        SHIM.lines()
            .filter(|l| l.contains(" native "))
            .filter_map(|l| l.split('(').next()?.split_whitespace().last())
            .collect()
    }

    #[test]
    fn every_java_native_has_an_export() {
        let natives = shim_natives();
        assert_eq!(natives.len(), 13, "{natives:?}");
        for name in natives {
            assert!(
                EXPORTS.contains(&format!("{EXPORT_PREFIX}{name}(")),
                "no export for {name}"
            );
        }
    }

    #[test]
    fn every_export_is_declared_in_java() {
        let natives = shim_natives();
        let exported = EXPORTS
            .match_indices(EXPORT_PREFIX)
            .filter_map(|(at, _)| EXPORTS[at + EXPORT_PREFIX.len()..].split('(').next());
        for name in exported {
            assert!(natives.contains(&name), "{name} is not declared native in Java");
        }
    }

    #[test]
    fn lifecycle_overrides_never_call_super() {
        assert!(!SHIM.contains("super.on"));
        assert!(SHIM.contains("nativeLoadLibraries();"));
    }
}
