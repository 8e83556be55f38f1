// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// User-visible notices for locally refused actions.
//
// Refusals surface as a short transient notice, never as a dialog. The text
// is deliberately generic; the trace record carries the details.

/// Why the bridge refused to act on a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refusal {
    /// External browsers may not be launched on TV-class devices.
    TvDevice,
    /// The URL scheme is not on the allow-list.
    DisallowedScheme,
}

impl Refusal {
    /// Text shown to the user.
    pub fn notice(self) -> &'static str {
        match self {
            Refusal::TvDevice => "Can't open URLs in TVs",
            Refusal::DisallowedScheme => "Can't open URL",
        }
    }

    /// Text written to the trace.
    pub fn diagnostic(self) -> &'static str {
        match self {
            Refusal::TvDevice => "can't open URLs in TVs",
            Refusal::DisallowedScheme => "can't open URL with a disallowed scheme",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notices_stay_short() {
        for refusal in [Refusal::TvDevice, Refusal::DisallowedScheme] {
            assert!(refusal.notice().len() <= 32, "{refusal:?} notice too long");
        }
    }
}
