// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Lifecycle forwarding.
//
// Transitions are forwarded synchronously in the order the OS delivers
// them, each wrapped in a `<onX>` / `</onX>` trace pair. The forwarder does
// not buffer, reorder or coalesce.

use std::sync::Arc;

use tracing::{debug, error, warn};

use surgebridge_core::types::{LifecycleState, Transition};

use crate::capability;
use crate::traits::{EngineLifecycle, NativeDisplay, NativeFeatures};

/// Wraps an engine's lifecycle entry points with paired tracing.
pub struct LifecycleForwarder<E, P: ?Sized> {
    engine: E,
    platform: Arc<P>,
    current: Option<LifecycleState>,
}

impl<E, P> LifecycleForwarder<E, P>
where
    E: EngineLifecycle,
    P: NativeFeatures + NativeDisplay + ?Sized,
{
    pub fn new(engine: E, platform: Arc<P>) -> Self {
        Self {
            engine,
            platform,
            current: None,
        }
    }

    /// Last state forwarded, `None` before the first transition.
    pub fn current(&self) -> Option<LifecycleState> {
        self.current
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    /// Forward one transition to the engine.
    pub fn forward(&mut self, transition: Transition) {
        match transition {
            Transition::Create => self.on_create(),
            other => self.traced(other),
        }
    }

    pub fn on_create(&mut self) {
        self.delegate(Transition::Create);

        // Android TV auto low latency mode. Best effort only.
        if capability::supports_latency_hint(&*self.platform) {
            if let Err(e) = self.platform.prefer_minimal_post_processing() {
                debug!(error = %e, "minimal post-processing hint skipped");
            }
        } else {
            debug!(
                sdk = self.platform.sdk_version(),
                "minimal post-processing hint unsupported"
            );
        }
    }

    pub fn on_start(&mut self) {
        self.traced(Transition::Start);
    }

    pub fn on_resume(&mut self) {
        self.traced(Transition::Resume);
    }

    pub fn on_pause(&mut self) {
        self.traced(Transition::Pause);
    }

    pub fn on_stop(&mut self) {
        self.traced(Transition::Stop);
    }

    pub fn on_restart(&mut self) {
        self.traced(Transition::Restart);
    }

    pub fn on_destroy(&mut self) {
        self.traced(Transition::Destroy);
    }

    fn traced(&mut self, transition: Transition) {
        debug!(transition = transition.callback_name(), "<{transition}>");
        self.delegate(transition);
        debug!(transition = transition.callback_name(), "</{transition}>");
    }

    fn delegate(&mut self, transition: Transition) {
        let result = match transition {
            Transition::Create => self.engine.on_create(),
            Transition::Start => self.engine.on_start(),
            Transition::Resume => self.engine.on_resume(),
            Transition::Pause => self.engine.on_pause(),
            Transition::Stop => self.engine.on_stop(),
            Transition::Restart => self.engine.on_restart(),
            Transition::Destroy => self.engine.on_destroy(),
        };
        if let Err(e) = result {
            error!(transition = transition.callback_name(), error = %e, "engine lifecycle call failed");
        }
        self.current = Some(transition.target_state());
    }
}

/// How [`ActivitySlot::deliver`] handled a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
    /// Forwarded to the bound activity's engine.
    Forwarded,
    /// `Destroy` forwarded to the bound activity, which is now unbound.
    Released,
    /// No forwarder is bound to the calling activity. The caller must run
    /// the superclass callback itself.
    Direct,
}

/// The forwarder bound to the one activity instance the bridge drives.
///
/// `K` identifies the activity. A newer instance replaces the binding; the
/// older one keeps receiving its callbacks, but as [`Delivery::Direct`].
pub struct ActivitySlot<K, E, P: ?Sized> {
    bound: Option<(K, LifecycleForwarder<E, P>)>,
}

impl<K, E, P: ?Sized> Default for ActivitySlot<K, E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, E, P: ?Sized> ActivitySlot<K, E, P> {
    pub const fn new() -> Self {
        Self { bound: None }
    }

    pub fn is_bound(&self) -> bool {
        self.bound.is_some()
    }

    /// Bind `forwarder` to `key`, returning the key it replaced.
    pub fn bind(&mut self, key: K, forwarder: LifecycleForwarder<E, P>) -> Option<K> {
        self.bound.replace((key, forwarder)).map(|(old, _)| old)
    }

    pub fn forwarder(&self) -> Option<&LifecycleForwarder<E, P>> {
        self.bound.as_ref().map(|(_, f)| f)
    }
}

impl<K, E, P> ActivitySlot<K, E, P>
where
    E: EngineLifecycle,
    P: NativeFeatures + NativeDisplay + ?Sized,
{
    /// Route `transition` from the activity for which `is_caller` holds.
    pub fn deliver<M>(&mut self, transition: Transition, is_caller: M) -> Delivery
    where
        M: FnOnce(&K) -> bool,
    {
        let matched = self.bound.as_ref().is_some_and(|(key, _)| is_caller(key));
        if !matched {
            if self.bound.is_some() {
                warn!(%transition, "callback from an activity that is not bound");
            } else {
                warn!(%transition, "callback with no bound activity");
            }
            return Delivery::Direct;
        }

        if let Some((_, forwarder)) = self.bound.as_mut() {
            forwarder.forward(transition);
        }
        if transition == Transition::Destroy {
            self.bound = None;
            Delivery::Released
        } else {
            Delivery::Forwarded
        }
    }
}
