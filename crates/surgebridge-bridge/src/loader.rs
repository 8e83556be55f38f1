// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Native library bootstrap.
//
// Libraries are loaded sequentially in manifest order. A failed load is
// traced and the next library is still attempted: a missing codec should
// leave the engine running in a reduced mode rather than not at all. The
// engine's own capability checks are the authoritative failure surface, so
// nothing here returns an error or aborts early.

use std::sync::OnceLock;

use tracing::{debug, info, warn};

use surgebridge_core::types::{LibraryManifest, LoadOutcome, LoadReport};

use crate::traits::NativeLibraryLoader;

/// Outcome of the process-wide bootstrap. Immutable once set.
static BOOTSTRAP: OnceLock<LoadReport> = OnceLock::new();

/// Attempt every library in `manifest`, in order, without short-circuiting.
pub fn load_libraries<L>(manifest: &LibraryManifest, loader: &L) -> LoadReport
where
    L: NativeLibraryLoader + ?Sized,
{
    let attempts = manifest
        .entries()
        .iter()
        .map(|entry| {
            debug!(library = entry.name, role = ?entry.role, "loadLibrary");
            let outcome = match loader.load_library(entry.name) {
                Ok(()) => LoadOutcome::Loaded,
                Err(e) => {
                    warn!(library = entry.name, error = %e, "loadLibrary FAILED");
                    LoadOutcome::Failed {
                        reason: e.to_string(),
                    }
                }
            };
            (*entry, outcome)
        })
        .collect();

    let report = LoadReport { attempts };
    info!(
        loaded = report.loaded().count(),
        failed = report.failed().count(),
        "native library bootstrap finished"
    );
    report
}

/// Load the declared manifest once per process.
///
/// Must run before any lifecycle transition or action. Later calls return
/// the first report and attempt nothing.
pub fn bootstrap<L>(loader: &L) -> &'static LoadReport
where
    L: NativeLibraryLoader + ?Sized,
{
    BOOTSTRAP.get_or_init(|| load_libraries(&LibraryManifest::declared(), loader))
}
