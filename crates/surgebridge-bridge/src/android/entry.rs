// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// JNI entry points for `org.opensurge2d.surgeengine.MainActivity`.
//
// The exports never let a panic or error escape into the JVM: every failure
// is traced and mapped to a no-op or `JNI_FALSE`. Lifecycle exports replace
// `super.onX()` on the Java side, so each of them reaches the superclass
// exactly once on every path: through the bound forwarder, or directly on
// `this` when no forwarder is bound to the calling instance.

use std::sync::{Arc, Mutex, PoisonError};

use jni::objects::{GlobalRef, JClass, JObject, JString, JValue};
use jni::sys::{jboolean, JNI_FALSE, JNI_TRUE};
use jni::JNIEnv;

use surgebridge_core::error::Result;
use surgebridge_core::types::Transition;

use super::{activity, attach_activity, detach_activity, jni_env, read_string, remember_vm};
use super::{AndroidBridge, OrBridge};
use crate::dispatcher::ActionDispatcher;
use crate::lifecycle::{ActivitySlot, Delivery, LifecycleForwarder};
use crate::loader;
use crate::traits::{EngineLifecycle, EngineServices};

/// The Allegro activity whose lifecycle methods run the engine.
const SUPERCLASS: &str = "org/liballeg/android/AllegroActivity";

const ON_CREATE_SIG: &str = "(Landroid/os/Bundle;)V";

/// Forwarder bound to the attached activity, set in `nativeOnCreate`.
static FORWARDER: Mutex<ActivitySlot<GlobalRef, ActivityChain, AndroidBridge>> =
    Mutex::new(ActivitySlot::new());

/// Engine lifecycle entry points: the superclass implementations, invoked
/// non-virtually on the attached activity.
#[derive(Default)]
pub struct ActivityChain {
    /// `savedInstanceState` for the pending `onCreate`.
    saved_state: Option<GlobalRef>,
}

impl ActivityChain {
    fn call_super(&self, method: &str) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        env.call_nonvirtual_method(activity.as_obj(), SUPERCLASS, method, "()V", &[])
            .or_bridge(&mut env, method)?;
        Ok(())
    }
}

impl EngineLifecycle for ActivityChain {
    fn on_create(&mut self) -> Result<()> {
        let mut env = jni_env()?;
        let activity = activity()?;
        let saved = self.saved_state.take();
        let null = JObject::null();
        let bundle = saved.as_ref().map_or(&null, |g| g.as_obj());
        env.call_nonvirtual_method(
            activity.as_obj(),
            SUPERCLASS,
            "onCreate",
            ON_CREATE_SIG,
            &[JValue::Object(bundle)],
        )
        .or_bridge(&mut env, "onCreate")?;
        Ok(())
    }

    fn on_start(&mut self) -> Result<()> {
        self.call_super("onStart")
    }

    fn on_resume(&mut self) -> Result<()> {
        self.call_super("onResume")
    }

    fn on_pause(&mut self) -> Result<()> {
        self.call_super("onPause")
    }

    fn on_stop(&mut self) -> Result<()> {
        self.call_super("onStop")
    }

    fn on_restart(&mut self) -> Result<()> {
        self.call_super("onRestart")
    }

    fn on_destroy(&mut self) -> Result<()> {
        self.call_super("onDestroy")
    }
}

fn dispatcher() -> ActionDispatcher<AndroidBridge> {
    ActionDispatcher::new(Arc::new(AndroidBridge::new()))
}

fn capture_vm(env: &JNIEnv<'_>) -> bool {
    match remember_vm(env) {
        Ok(()) => true,
        Err(e) => {
            tracing::error!(error = %e, "cannot capture JavaVM");
            false
        }
    }
}

/// Run the superclass callback on `this` with the caller's own `env`,
/// bypassing the forwarder.
fn call_super_direct(
    env: &mut JNIEnv<'_>,
    this: &JObject<'_>,
    transition: Transition,
    saved_state: Option<&JObject<'_>>,
) {
    let method = transition.callback_name();
    let result = match transition {
        Transition::Create => {
            let null = JObject::null();
            let bundle = saved_state.unwrap_or(&null);
            env.call_nonvirtual_method(
                this,
                SUPERCLASS,
                method,
                ON_CREATE_SIG,
                &[JValue::Object(bundle)],
            )
        }
        _ => env.call_nonvirtual_method(this, SUPERCLASS, method, "()V", &[]),
    };
    if let Err(e) = result.or_bridge(env, method) {
        tracing::error!(%transition, error = %e, "superclass callback failed");
    }
}

/// Forward a non-create transition from `this`.
fn forward(env: &mut JNIEnv<'_>, this: &JObject<'_>, transition: Transition) {
    let delivery = {
        let mut slot = FORWARDER.lock().unwrap_or_else(PoisonError::into_inner);
        slot.deliver(transition, |bound| {
            env.is_same_object(bound.as_obj(), this).unwrap_or(false)
        })
    };
    match delivery {
        Delivery::Forwarded => {}
        Delivery::Released => detach_activity(),
        Delivery::Direct => call_super_direct(env, this, transition, None),
    }
}

// ---------------------------------------------------------------------------
// Bootstrap
// ---------------------------------------------------------------------------

/// `static native void nativeLoadLibraries()`, called from the static
/// initialiser right after this library is loaded.
#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeLoadLibraries(
    env: JNIEnv,
    _class: JClass,
) {
    crate::logging::init_with_writer("debug", super::logcat::Logcat, false);
    if !capture_vm(&env) {
        return;
    }
    loader::bootstrap(&AndroidBridge::new());
}

// ---------------------------------------------------------------------------
// Lifecycle
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnCreate(
    mut env: JNIEnv,
    this: JObject,
    saved_instance_state: JObject,
) {
    let saved = (!saved_instance_state.is_null()).then_some(&saved_instance_state);
    if !capture_vm(&env) {
        call_super_direct(&mut env, &this, Transition::Create, saved);
        return;
    }
    let key = match attach_activity(&mut env, &this) {
        Ok(key) => key,
        Err(e) => {
            tracing::error!(error = %e, "cannot attach activity");
            call_super_direct(&mut env, &this, Transition::Create, saved);
            return;
        }
    };

    let saved_state = saved.and_then(|bundle| match env.new_global_ref(bundle) {
        Ok(global) => Some(global),
        Err(e) => {
            tracing::warn!(error = %e, "savedInstanceState dropped");
            None
        }
    });

    let chain = ActivityChain { saved_state };
    let mut forwarder = LifecycleForwarder::new(chain, Arc::new(AndroidBridge::new()));
    forwarder.on_create();
    let replaced = FORWARDER
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .bind(key, forwarder);
    if replaced.is_some() {
        tracing::info!("newer activity instance took over the engine");
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnStart(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Start);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnResume(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Resume);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnPause(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Pause);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnStop(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Stop);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnRestart(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Restart);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_nativeOnDestroy(
    mut env: JNIEnv,
    this: JObject,
) {
    forward(&mut env, &this, Transition::Destroy);
}

// ---------------------------------------------------------------------------
// Engine contract
// ---------------------------------------------------------------------------

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_openWebPage(
    mut env: JNIEnv,
    _this: JObject,
    url: JString,
) {
    match read_string(&mut env, &url) {
        Some(url) => dispatcher().open_web_page(&url),
        None => tracing::error!("openWebPage called without a URL"),
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_shareText(
    mut env: JNIEnv,
    _this: JObject,
    text: JString,
) {
    let text = read_string(&mut env, &text).unwrap_or_default();
    dispatcher().share_text(&text);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_isTVDevice(
    _env: JNIEnv,
    _this: JObject,
) -> jboolean {
    if dispatcher().is_tv_device() {
        JNI_TRUE
    } else {
        JNI_FALSE
    }
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_showToast(
    mut env: JNIEnv,
    _this: JObject,
    text: JString,
) {
    let text = read_string(&mut env, &text).unwrap_or_default();
    dispatcher().show_toast(&text);
}

#[unsafe(no_mangle)]
pub extern "system" fn Java_org_opensurge2d_surgeengine_MainActivity_mkdir(
    mut env: JNIEnv,
    _this: JObject,
    path: JString,
) -> jboolean {
    let created = read_string(&mut env, &path).is_some_and(|path| dispatcher().mkdir(&path));
    if created { JNI_TRUE } else { JNI_FALSE }
}
