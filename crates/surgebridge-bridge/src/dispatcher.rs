// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Action dispatch on behalf of the native engine.
//
// Every action either reaches the OS or degrades to a no-op with a trace
// record. Nothing here returns an error to the engine or panics; the only
// results the engine sees are the booleans of `mkdir` and `is_tv_device`.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, error, warn};

use surgebridge_core::notice::Refusal;
use surgebridge_core::types::{
    ActionOutcome, ActionRequest, NavigationIntent, ShareRequest, ALLOWED_URL_PREFIXES,
};

use crate::capability;
use crate::traits::{EngineServices, PlatformBridge};

/// Whether `url` uses a scheme the bridge may hand to the OS.
///
/// Plain prefix match, case-sensitive.
pub fn scheme_allowed(url: &str) -> bool {
    ALLOWED_URL_PREFIXES.iter().any(|p| url.starts_with(p))
}

/// Executes engine requests against a platform backend.
pub struct ActionDispatcher<B: ?Sized> {
    platform: Arc<B>,
}

impl<B: ?Sized> Clone for ActionDispatcher<B> {
    fn clone(&self) -> Self {
        Self {
            platform: Arc::clone(&self.platform),
        }
    }
}

impl<B> ActionDispatcher<B>
where
    B: PlatformBridge + ?Sized,
{
    pub fn new(platform: Arc<B>) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &B {
        &self.platform
    }

    /// Execute one request.
    pub fn dispatch(&self, request: &ActionRequest) -> ActionOutcome {
        match request {
            ActionRequest::OpenUrl(url) => self.open_url(url),
            ActionRequest::ShareText(text) => {
                self.share_text(text);
                ActionOutcome::Done
            }
            ActionRequest::ShowToast(text) => {
                self.show_toast(text);
                ActionOutcome::Done
            }
            ActionRequest::MakeDirectory(path) => ActionOutcome::Created(self.mkdir(path)),
            ActionRequest::QueryIsTvDevice => ActionOutcome::IsTvDevice(self.is_tv_device()),
        }
    }

    fn open_url(&self, url: &str) -> ActionOutcome {
        debug!(url, "will open URL");

        // TV platform policy: apps may not launch an external browser.
        if capability::is_tv_device(&*self.platform) {
            return self.refuse(Refusal::TvDevice, url);
        }
        if !scheme_allowed(url) {
            return self.refuse(Refusal::DisallowedScheme, url);
        }

        let intent = NavigationIntent::for_url(url);
        if let Err(e) = self.platform.start_navigation(&intent) {
            warn!(url, package = ?intent.package, error = %e, "navigation request not delivered");
        }
        ActionOutcome::Done
    }

    fn refuse(&self, refusal: Refusal, url: &str) -> ActionOutcome {
        error!(url, "{}", refusal.diagnostic());
        self.notify(refusal.notice());
        ActionOutcome::Refused
    }

    fn notify(&self, text: &str) {
        if let Err(e) = self.platform.show_notice(text) {
            warn!(text, error = %e, "notice not shown");
        }
    }
}

impl<B> EngineServices for ActionDispatcher<B>
where
    B: PlatformBridge + ?Sized,
{
    fn open_web_page(&self, url: &str) {
        self.open_url(url);
    }

    fn share_text(&self, text: &str) {
        debug!(chars = text.chars().count(), "will share text");
        if let Err(e) = self.platform.share(&ShareRequest::plain_text(text)) {
            warn!(error = %e, "share request not delivered");
        }
    }

    fn is_tv_device(&self) -> bool {
        let tv = capability::is_tv_device(&*self.platform);
        debug!(tv, "queried device class");
        tv
    }

    fn show_toast(&self, text: &str) {
        debug!(text, "will show toast");
        self.notify(text);
    }

    fn mkdir(&self, path: &str) -> bool {
        debug!(path, "will call mkdir");

        let result = if path.is_empty() {
            Ok(false)
        } else {
            self.platform.create_dir(Path::new(path))
        };

        match result {
            Ok(true) => true,
            Ok(false) => {
                debug!(path, error = "mkdir failed", "can't mkdir");
                false
            }
            Err(e) => {
                debug!(path, error = %e, "can't mkdir");
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stub::StubBridge;
    use crate::testing::{capture_traces, OsCall, RecordingBridge};
    use surgebridge_core::config::DesktopProfile;
    use surgebridge_core::types::STORE_PACKAGE;

    fn dispatcher(bridge: RecordingBridge) -> ActionDispatcher<RecordingBridge> {
        ActionDispatcher::new(Arc::new(bridge))
    }

    const STORE_URL: &str =
        "https://play.google.com/store/apps/details?id=org.opensurge2d.surgeengine";

    #[test]
    fn tv_device_never_navigates() {
        let d = dispatcher(RecordingBridge::tv());
        for url in [
            "https://opensurge2d.org",
            "http://example.com",
            "mailto:test@example.com",
            STORE_URL,
            "ftp://example.com",
            "",
        ] {
            assert_eq!(d.dispatch(&ActionRequest::OpenUrl(url.into())), ActionOutcome::Refused);
        }
        assert!(d.platform().navigations().is_empty());
        assert!(d.platform().notices().iter().all(|n| n == "Can't open URLs in TVs"));
    }

    #[test]
    fn disallowed_scheme_is_refused() {
        let d = dispatcher(RecordingBridge::new());
        d.open_web_page("ftp://example.com");

        assert!(d.platform().navigations().is_empty());
        assert_eq!(d.platform().notices(), ["Can't open URL"]);
    }

    #[test]
    fn scheme_match_is_case_sensitive() {
        assert!(!scheme_allowed("HTTPS://example.com"));
        assert!(!scheme_allowed("javascript:alert(1)"));
        assert!(!scheme_allowed(" https://example.com"));
        assert!(scheme_allowed("http://example.com"));
    }

    #[test]
    fn store_link_prefers_store_package() {
        let d = dispatcher(RecordingBridge::new());
        d.open_web_page(STORE_URL);

        let navs = d.platform().navigations();
        assert_eq!(navs.len(), 1);
        assert_eq!(navs[0].url, STORE_URL);
        assert_eq!(navs[0].package.as_deref(), Some(STORE_PACKAGE));
    }

    #[test]
    fn mailto_has_no_package() {
        let d = dispatcher(RecordingBridge::new());
        d.open_web_page("mailto:test@example.com");

        let navs = d.platform().navigations();
        assert_eq!(navs.len(), 1);
        assert_eq!(navs[0].package, None);
        assert!(d.platform().notices().is_empty());
    }

    #[test]
    fn navigation_failure_is_absorbed() {
        let mut bridge = RecordingBridge::new();
        bridge.fail_sends = true;
        let d = dispatcher(bridge);

        assert_eq!(
            d.dispatch(&ActionRequest::OpenUrl("https://opensurge2d.org".into())),
            ActionOutcome::Done
        );
        assert_eq!(d.platform().navigations().len(), 1);
    }

    #[test]
    fn share_is_not_gated() {
        let d = dispatcher(RecordingBridge::tv());
        d.share_text("Open Surge Engine https://opensurge2d.org");

        assert_eq!(
            d.platform().calls(),
            [OsCall::Share(ShareRequest::plain_text(
                "Open Surge Engine https://opensurge2d.org"
            ))]
        );
    }

    #[test]
    fn share_request_shape() {
        let req = ShareRequest::plain_text("hi");
        assert_eq!(req.mime_type, "text/plain");
        assert_eq!(req.chooser_title, "Share");
    }

    #[test]
    fn toast_failure_is_absorbed() {
        let mut bridge = RecordingBridge::new();
        bridge.fail_sends = true;
        let d = dispatcher(bridge);
        assert_eq!(d.dispatch(&ActionRequest::ShowToast("saved".into())), ActionOutcome::Done);
        assert_eq!(d.platform().notices(), ["saved"]);
    }

    #[test]
    fn tv_query_is_never_cached() {
        let d = dispatcher(RecordingBridge::new());
        assert!(!d.is_tv_device());
        d.platform().set_tv(true);
        assert!(d.is_tv_device());
        assert_eq!(d.dispatch(&ActionRequest::QueryIsTvDevice), ActionOutcome::IsTvDevice(true));
        d.platform().set_tv(false);
        assert_eq!(d.dispatch(&ActionRequest::QueryIsTvDevice), ActionOutcome::IsTvDevice(false));
    }

    #[test]
    fn mkdir_maps_facade_answers() {
        let mut declined = RecordingBridge::new();
        declined.mkdir_answer = Some(false);
        assert!(!dispatcher(declined).mkdir("/data/user/0/saves"));

        let mut throwing = RecordingBridge::new();
        throwing.mkdir_answer = None;
        assert!(!dispatcher(throwing).mkdir("/data/user/0/saves"));

        assert!(dispatcher(RecordingBridge::new()).mkdir("/data/user/0/saves"));
    }

    #[test]
    fn mkdir_empty_path_skips_the_os() {
        let d = dispatcher(RecordingBridge::new());
        assert!(!d.mkdir(""));
        assert!(d.platform().calls().is_empty());
    }

    fn filesystem_dispatcher() -> ActionDispatcher<StubBridge> {
        ActionDispatcher::new(Arc::new(StubBridge::new(DesktopProfile::default())))
    }

    #[test]
    fn mkdir_fresh_path_succeeds() {
        let root = tempfile::tempdir().expect("tempdir failed");
        let target = root.path().join("saves");
        let d = filesystem_dispatcher();

        assert!(d.mkdir(target.to_str().expect("non-utf8 temp path")));
        assert!(target.is_dir());
    }

    #[test]
    fn mkdir_existing_directory_fails() {
        let root = tempfile::tempdir().expect("tempdir failed");
        let d = filesystem_dispatcher();

        assert!(!d.mkdir(root.path().to_str().expect("non-utf8 temp path")));
    }

    #[test]
    fn mkdir_missing_parent_fails() {
        let root = tempfile::tempdir().expect("tempdir failed");
        let target = root.path().join("missing").join("saves");
        let d = filesystem_dispatcher();

        assert_eq!(
            d.dispatch(&ActionRequest::MakeDirectory(
                target.to_str().expect("non-utf8 temp path").into()
            )),
            ActionOutcome::Created(false)
        );
        assert!(!target.exists());
    }

    #[test]
    fn every_action_traces_on_entry() {
        let d = dispatcher(RecordingBridge::new());
        let requests = [
            (ActionRequest::OpenUrl("https://opensurge2d.org".into()), "will open URL"),
            (ActionRequest::ShareText("hi".into()), "will share text"),
            (ActionRequest::ShowToast("saved".into()), "will show toast"),
            (ActionRequest::MakeDirectory("/data/user/0/saves".into()), "will call mkdir"),
            (ActionRequest::QueryIsTvDevice, "queried device class"),
        ];
        for (request, expected) in requests {
            let (_, logs) = capture_traces(|| d.dispatch(&request));
            let lines = logs.lines();
            assert!(
                lines.first().is_some_and(|l| l.contains("DEBUG") && l.contains(expected)),
                "{request:?}: {lines:?}"
            );
        }
    }
}
