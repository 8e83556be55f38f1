// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Tracing subscriber setup.

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Filter used when neither `RUST_LOG` nor the configured filter parses.
const FALLBACK_FILTER: &str = "info";

/// Install the global `fmt` subscriber writing to stdout.
///
/// `RUST_LOG` wins over `default_filter`. Safe to call more than once; only
/// the first call installs anything.
pub fn init(default_filter: &str) {
    init_with_writer(default_filter, std::io::stdout, true);
}

/// Same as [`init`], with a caller-chosen writer (e.g. logcat). Returns
/// whether this call installed the subscriber.
pub fn init_with_writer<W>(default_filter: &str, writer: W, ansi: bool) -> bool
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let env_value = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = select_filter(env_value.as_deref(), default_filter);

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .try_init()
        .is_ok();

    if installed {
        tracing::debug!(default_filter, "tracing initialised");
    }
    installed
}

/// Pick the filter: a non-blank, parseable `env_value` first, then
/// `default_filter`, then [`FALLBACK_FILTER`].
pub fn select_filter(env_value: Option<&str>, default_filter: &str) -> EnvFilter {
    env_value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| EnvFilter::try_new(v).ok())
        .or_else(|| EnvFilter::try_new(default_filter).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_FILTER))
}
