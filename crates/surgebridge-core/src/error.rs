// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for surgebridge.
//
// These errors never cross the engine boundary. The loader, dispatcher and
// forwarder turn every one of them into a trace record plus a no-op or a
// boolean result.

use thiserror::Error;

/// Top-level error type for all bridge operations.
#[derive(Debug, Error)]
pub enum BridgeError {
    // -- Bootstrap --
    #[error("failed to load native library {name}: {reason}")]
    LibraryLoad { name: String, reason: String },

    // -- Platform bridge --
    #[error("JNI call failed: {0}")]
    Jni(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // -- Configuration / persistence --
    #[error("configuration error: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, BridgeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn library_load_message_names_the_library() {
        let err = BridgeError::LibraryLoad {
            name: "allegro_acodec".into(),
            reason: "dlopen failed".into(),
        };
        assert_eq!(
            err.to_string(),
            "failed to load native library allegro_acodec: dlopen failed"
        );
    }

    #[test]
    fn io_errors_convert() {
        let io = std::io::Error::new(std::io::ErrorKind::AlreadyExists, "exists");
        let err: BridgeError = io.into();
        assert!(matches!(err, BridgeError::Io(_)));
    }
}
