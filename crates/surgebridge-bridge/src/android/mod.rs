// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Targets `aarch64-linux-android` / `armv7-linux-androideabi`. Each facade
// method calls the corresponding Android SDK API through JNI on the hosting
// activity.
//
// ## Architecture notes
//
// The Java side is a thin `MainActivity extends AllegroActivity` whose
// static initialiser loads this library and calls `nativeLoadLibraries()`,
// whose lifecycle overrides call `nativeOnX()` instead of `super.onX()`, and
// which declares the engine contract (`openWebPage`, `shareText`,
// `isTVDevice`, `showToast`, `mkdir`) as `native` methods. The exports live
// in [`entry`]; see `ANDROID-INTEGRATION.md` for the Java shim.
//
// Any Java exception raised by a facade call is described to logcat,
// cleared, and turned into `BridgeError::Jni` so the JNI environment stays
// usable for the next call.

#![cfg(target_os = "android")]

pub mod entry;
pub mod logcat;

use std::path::Path;
use std::sync::{Mutex, OnceLock, PoisonError};

use jni::objects::{GlobalRef, JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use surgebridge_core::error::{BridgeError, Result};
use surgebridge_core::types::{NavigationIntent, ShareRequest};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Toast.LENGTH_SHORT`.
const TOAST_LENGTH_SHORT: i32 = 0;

/// The process-wide Java VM, captured from the first JNI entry point.
static JAVA_VM: OnceLock<JavaVM> = OnceLock::new();

/// The hosting activity, held between `nativeOnCreate` and `nativeOnDestroy`.
static ACTIVITY: Mutex<Option<GlobalRef>> = Mutex::new(None);

/// Remember the VM behind `env` so facade calls can attach later.
pub(crate) fn remember_vm(env: &JNIEnv<'_>) -> Result<()> {
    if JAVA_VM.get().is_some() {
        return Ok(());
    }
    let vm = env
        .get_java_vm()
        .map_err(|e| BridgeError::Jni(format!("GetJavaVM: {e}")))?;
    let _ = JAVA_VM.set(vm);
    Ok(())
}

/// Obtain a [`JNIEnv`] for the current thread, attaching it if needed.
fn jni_env() -> Result<JNIEnv<'static>> {
    let vm = JAVA_VM.get().ok_or_else(|| {
        BridgeError::Jni("JavaVM not captured; no JNI entry point has run yet".into())
    })?;
    vm.attach_current_thread_permanently()
        .map_err(|e| BridgeError::Jni(format!("failed to attach JNI thread: {e}")))
}

/// The hosting activity as a global reference.
fn activity() -> Result<GlobalRef> {
    ACTIVITY
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .clone()
        .ok_or_else(|| {
            BridgeError::Jni("activity not attached; nativeOnCreate has not run".into())
        })
}

/// Pin `activity` for facade calls and publish it through `ndk-context` so
/// native libraries that look up the Android context can find it. Returns
/// the pinned reference.
pub(crate) fn attach_activity(env: &mut JNIEnv<'_>, activity: &JObject<'_>) -> Result<GlobalRef> {
    let global = env
        .new_global_ref(activity)
        .or_bridge(env, "NewGlobalRef(activity)")?;
    let vm = JAVA_VM
        .get()
        .ok_or_else(|| BridgeError::Jni("JavaVM not captured".into()))?;

    let mut slot = ACTIVITY.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.is_some() {
        // SAFETY: the previous context was published by this function.
        unsafe { ndk_context::release_android_context() };
    }
    // SAFETY: the VM pointer is valid for the life of the process and the
    // activity pointer is a global reference kept alive in `ACTIVITY` until
    // `detach_activity` releases the context again.
    unsafe {
        ndk_context::initialize_android_context(
            vm.get_java_vm_pointer().cast(),
            global.as_obj().as_raw().cast(),
        );
    }
    *slot = Some(global.clone());
    Ok(global)
}

/// Drop the activity reference once the OS has destroyed it.
pub(crate) fn detach_activity() {
    let mut slot = ACTIVITY.lock().unwrap_or_else(PoisonError::into_inner);
    if slot.take().is_some() {
        // SAFETY: paired with the initialisation in `attach_activity`.
        unsafe { ndk_context::release_android_context() };
    }
}

/// Map JNI failures into `BridgeError::Jni`, clearing any pending Java
/// exception first.
trait OrBridge<T> {
    fn or_bridge(self, env: &mut JNIEnv<'_>, context: &str) -> Result<T>;
}

impl<T> OrBridge<T> for jni::errors::Result<T> {
    fn or_bridge(self, env: &mut JNIEnv<'_>, context: &str) -> Result<T> {
        self.map_err(|e| {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_describe();
                let _ = env.exception_clear();
            }
            BridgeError::Jni(format!("{context}: {e}"))
        })
    }
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the platform bridge.
///
/// Zero-sized; all state lives on the Java side or in the statics above.
#[derive(Debug, Default, Clone, Copy)]
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge.
    ///
    /// This does **not** touch JNI. The first JNI call happens lazily when
    /// a trait method is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeLibraryLoader: java.lang.System.loadLibrary
// ---------------------------------------------------------------------------

impl NativeLibraryLoader for AndroidBridge {
    fn load_library(&self, name: &str) -> Result<()> {
        let mut env = jni_env()?;
        let j_name: JString = env.new_string(name).or_bridge(&mut env, "new_string(library)")?;

        env.call_static_method(
            "java/lang/System",
            "loadLibrary",
            "(Ljava/lang/String;)V",
            &[JValue::Object(&j_name)],
        )
        .map_err(|e| {
            // UnsatisfiedLinkError; keep the env usable for the next library.
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            BridgeError::LibraryLoad {
                name: name.into(),
                reason: e.to_string(),
            }
        })?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeFeatures: PackageManager.hasSystemFeature / Build.VERSION.SDK_INT
// ---------------------------------------------------------------------------

impl NativeFeatures for AndroidBridge {
    fn has_system_feature(&self, feature: &str) -> bool {
        match query_system_feature(feature) {
            Ok(present) => present,
            Err(e) => {
                tracing::warn!(feature, error = %e, "feature query failed; assuming absent");
                false
            }
        }
    }

    fn sdk_version(&self) -> u32 {
        let sdk = jni_env().and_then(|mut env| {
            env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
                .and_then(|v| v.i())
                .or_bridge(&mut env, "Build.VERSION.SDK_INT")
        });
        match sdk {
            Ok(level) => u32::try_from(level).unwrap_or(0),
            Err(e) => {
                tracing::warn!(error = %e, "SDK level unavailable");
                0
            }
        }
    }
}

fn query_system_feature(feature: &str) -> Result<bool> {
    let mut env = jni_env()?;
    let activity = activity()?;

    let package_manager: JObject = env
        .call_method(
            activity.as_obj(),
            "getPackageManager",
            "()Landroid/content/pm/PackageManager;",
            &[],
        )
        .and_then(|v| v.l())
        .or_bridge(&mut env, "getPackageManager")?;

    let j_feature: JString = env
        .new_string(feature)
        .or_bridge(&mut env, "new_string(feature)")?;

    env.call_method(
        &package_manager,
        "hasSystemFeature",
        "(Ljava/lang/String;)Z",
        &[JValue::Object(&j_feature)],
    )
    .and_then(|v| v.z())
    .or_bridge(&mut env, "hasSystemFeature")
}

// ---------------------------------------------------------------------------
// NativeNavigation: Intent ACTION_VIEW
// ---------------------------------------------------------------------------

impl NativeNavigation for AndroidBridge {
    /// Launch an `ACTION_VIEW` intent for the URL, optionally pinned to a
    /// package. Returns once `startActivity` has accepted the intent.
    fn start_navigation(&self, intent: &NavigationIntent) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_url: JString = env
            .new_string(&intent.url)
            .or_bridge(&mut env, "new_string(url)")?;

        let uri: JObject = env
            .call_static_method(
                "android/net/Uri",
                "parse",
                "(Ljava/lang/String;)Landroid/net/Uri;",
                &[JValue::Object(&j_url)],
            )
            .and_then(|v| v.l())
            .or_bridge(&mut env, "Uri.parse")?;

        let j_action: JString = env
            .new_string("android.intent.action.VIEW")
            .or_bridge(&mut env, "new_string(ACTION_VIEW)")?;

        let view: JObject = env
            .new_object(
                "android/content/Intent",
                "(Ljava/lang/String;Landroid/net/Uri;)V",
                &[JValue::Object(&j_action), JValue::Object(&uri)],
            )
            .or_bridge(&mut env, "new Intent(VIEW)")?;

        if let Some(package) = &intent.package {
            let j_package: JString = env
                .new_string(package)
                .or_bridge(&mut env, "new_string(package)")?;
            env.call_method(
                &view,
                "setPackage",
                "(Ljava/lang/String;)Landroid/content/Intent;",
                &[JValue::Object(&j_package)],
            )
            .or_bridge(&mut env, "setPackage")?;
        }

        env.call_method(
            activity.as_obj(),
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&view)],
        )
        .or_bridge(&mut env, "startActivity(view)")?;

        tracing::info!(url = %intent.url, package = ?intent.package, "Android: view intent dispatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeShare: Intent ACTION_SEND + chooser
// ---------------------------------------------------------------------------

impl NativeShare for AndroidBridge {
    fn share(&self, request: &ShareRequest) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_action: JString = env
            .new_string("android.intent.action.SEND")
            .or_bridge(&mut env, "new_string(ACTION_SEND)")?;

        let send: JObject = env
            .new_object(
                "android/content/Intent",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&j_action)],
            )
            .or_bridge(&mut env, "new Intent(SEND)")?;

        let j_mime: JString = env
            .new_string(request.mime_type)
            .or_bridge(&mut env, "new_string(mime)")?;
        env.call_method(
            &send,
            "setType",
            "(Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_mime)],
        )
        .or_bridge(&mut env, "setType(share)")?;

        let j_extra_text: JString = env
            .new_string("android.intent.extra.TEXT")
            .or_bridge(&mut env, "new_string(EXTRA_TEXT)")?;
        let j_text: JString = env
            .new_string(&request.text)
            .or_bridge(&mut env, "new_string(text)")?;
        env.call_method(
            &send,
            "putExtra",
            "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/Intent;",
            &[JValue::Object(&j_extra_text), JValue::Object(&j_text)],
        )
        .or_bridge(&mut env, "putExtra(EXTRA_TEXT)")?;

        let j_title: JString = env
            .new_string(request.chooser_title)
            .or_bridge(&mut env, "new_string(chooser_title)")?;
        let chooser: JObject = env
            .call_static_method(
                "android/content/Intent",
                "createChooser",
                "(Landroid/content/Intent;Ljava/lang/CharSequence;)Landroid/content/Intent;",
                &[JValue::Object(&send), JValue::Object(&j_title)],
            )
            .and_then(|v| v.l())
            .or_bridge(&mut env, "Intent.createChooser")?;

        env.call_method(
            activity.as_obj(),
            "startActivity",
            "(Landroid/content/Intent;)V",
            &[JValue::Object(&chooser)],
        )
        .or_bridge(&mut env, "startActivity(share)")?;

        tracing::info!("Android: share chooser dispatched");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeNotice: android.widget.Toast
// ---------------------------------------------------------------------------

impl NativeNotice for AndroidBridge {
    fn show_notice(&self, text: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let j_text: JString = env
            .new_string(text)
            .or_bridge(&mut env, "new_string(toast)")?;

        let toast: JObject = env
            .call_static_method(
                "android/widget/Toast",
                "makeText",
                "(Landroid/content/Context;Ljava/lang/CharSequence;I)Landroid/widget/Toast;",
                &[
                    JValue::Object(activity.as_obj()),
                    JValue::Object(&j_text),
                    JValue::Int(TOAST_LENGTH_SHORT),
                ],
            )
            .and_then(|v| v.l())
            .or_bridge(&mut env, "Toast.makeText")?;

        env.call_method(&toast, "show", "()V", &[])
            .or_bridge(&mut env, "Toast.show")?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// NativeFileSystem: java.io.File.mkdir
// ---------------------------------------------------------------------------

impl NativeFileSystem for AndroidBridge {
    fn create_dir(&self, path: &Path) -> Result<bool> {
        let path = path
            .to_str()
            .ok_or_else(|| BridgeError::InvalidArgument("path is not valid UTF-8".into()))?;
        let mut env = jni_env()?;

        let j_path: JString = env
            .new_string(path)
            .or_bridge(&mut env, "new_string(path)")?;
        let file: JObject = env
            .new_object(
                "java/io/File",
                "(Ljava/lang/String;)V",
                &[JValue::Object(&j_path)],
            )
            .or_bridge(&mut env, "new File(path)")?;

        env.call_method(&file, "mkdir", "()Z", &[])
            .and_then(|v| v.z())
            .or_bridge(&mut env, "File.mkdir")
    }
}

// ---------------------------------------------------------------------------
// NativeDisplay: Window.setPreferMinimalPostProcessing (API 30+)
// ---------------------------------------------------------------------------

impl NativeDisplay for AndroidBridge {
    fn prefer_minimal_post_processing(&self) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;

        let window: JObject = env
            .call_method(activity.as_obj(), "getWindow", "()Landroid/view/Window;", &[])
            .and_then(|v| v.l())
            .or_bridge(&mut env, "getWindow")?;

        env.call_method(
            &window,
            "setPreferMinimalPostProcessing",
            "(Z)V",
            &[JValue::Bool(1)],
        )
        .or_bridge(&mut env, "setPreferMinimalPostProcessing")?;

        tracing::debug!("Android: minimal post-processing requested");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Read a Java string, treating `null` as absent.
pub(crate) fn read_string(env: &mut JNIEnv<'_>, value: &JString<'_>) -> Option<String> {
    if value.is_null() {
        return None;
    }
    match env.get_string(value) {
        Ok(s) => Some(s.into()),
        Err(e) => {
            if env.exception_check().unwrap_or(false) {
                let _ = env.exception_clear();
            }
            tracing::warn!(error = %e, "could not read Java string");
            None
        }
    }
}
