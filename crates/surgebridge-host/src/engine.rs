// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stand-in engine for desktop runs: records the lifecycle entry points it
// receives instead of driving a real activity.

use surgebridge_bridge::EngineLifecycle;
use surgebridge_core::error::Result;
use surgebridge_core::types::Transition;

/// Engine that logs and remembers every entry point.
#[derive(Debug, Default)]
pub struct HeadlessEngine {
    pub received: Vec<Transition>,
}

impl HeadlessEngine {
    fn enter(&mut self, transition: Transition) -> Result<()> {
        tracing::info!(%transition, "engine entry point");
        self.received.push(transition);
        Ok(())
    }
}

impl EngineLifecycle for HeadlessEngine {
    fn on_create(&mut self) -> Result<()> {
        self.enter(Transition::Create)
    }

    fn on_start(&mut self) -> Result<()> {
        self.enter(Transition::Start)
    }

    fn on_resume(&mut self) -> Result<()> {
        self.enter(Transition::Resume)
    }

    fn on_pause(&mut self) -> Result<()> {
        self.enter(Transition::Pause)
    }

    fn on_stop(&mut self) -> Result<()> {
        self.enter(Transition::Stop)
    }

    fn on_restart(&mut self) -> Result<()> {
        self.enter(Transition::Restart)
    }

    fn on_destroy(&mut self) -> Result<()> {
        self.enter(Transition::Destroy)
    }
}
