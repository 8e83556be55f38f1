// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Device-class queries. The OS is the source of truth: nothing is cached.

use surgebridge_core::types::{FEATURE_LEANBACK, MIN_SDK_LATENCY_HINT};

use crate::traits::NativeFeatures;

/// Whether the device is TV-class (declares the leanback feature).
pub fn is_tv_device<F>(features: &F) -> bool
where
    F: NativeFeatures + ?Sized,
{
    features.has_system_feature(FEATURE_LEANBACK)
}

/// Whether the OS understands the minimal post-processing window hint.
pub fn supports_latency_hint<F>(features: &F) -> bool
where
    F: NativeFeatures + ?Sized,
{
    features.sdk_version() >= MIN_SDK_LATENCY_HINT
}
