// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// surgebridge-host: drive the activity bridge on the desktop stub backend.
//
// Entry point. Loads configuration, initialises logging, bootstraps the
// native library manifest, then either replays a lifecycle sequence or
// dispatches a single engine action.

mod engine;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use surgebridge_bridge::{loader, logging, ActionDispatcher, LifecycleForwarder, PlatformBridge};
use surgebridge_core::types::{ActionOutcome, ActionRequest, Transition, FEATURE_LEANBACK};
use surgebridge_core::BridgeConfig;

use engine::HeadlessEngine;

/// The transitions a cold start followed by a clean exit produces.
const BOOT_SEQUENCE: [Transition; 6] = [
    Transition::Create,
    Transition::Start,
    Transition::Resume,
    Transition::Pause,
    Transition::Stop,
    Transition::Destroy,
];

/// surgebridge desktop host
#[derive(Debug, Parser)]
#[command(name = "surgebridge-host")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long, env = "SURGEBRIDGE_CONFIG")]
    config: Option<PathBuf>,

    /// Pretend to be a TV-class device
    #[arg(long, global = true)]
    tv: bool,

    /// Override the reported SDK level
    #[arg(long, global = true)]
    sdk: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Load libraries and replay create → start → resume → pause → stop → destroy
    Boot,
    /// Ask the bridge to open a URL
    OpenUrl { url: String },
    /// Share plain text through the OS chooser
    Share { text: String },
    /// Show a transient notice
    Toast { text: String },
    /// Create a single directory (exit code 1 when not created)
    Mkdir { path: String },
    /// Report whether the device is TV-class
    IsTv,
}

impl Command {
    fn action(&self) -> Option<ActionRequest> {
        match self {
            Command::Boot => None,
            Command::OpenUrl { url } => Some(ActionRequest::OpenUrl(url.clone())),
            Command::Share { text } => Some(ActionRequest::ShareText(text.clone())),
            Command::Toast { text } => Some(ActionRequest::ShowToast(text.clone())),
            Command::Mkdir { path } => Some(ActionRequest::MakeDirectory(path.clone())),
            Command::IsTv => Some(ActionRequest::QueryIsTvDevice),
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            logging::init("info");
            tracing::error!(error = %e, "cannot load configuration");
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.log_filter);

    let platform: Arc<dyn PlatformBridge> = Arc::from(surgebridge_bridge::platform_bridge(&config));
    tracing::info!(platform = platform.platform_name(), "surgebridge host starting");

    // Libraries first: nothing else may run before the bootstrap barrier.
    let report = loader::bootstrap(&*platform);
    for name in report.failed() {
        tracing::warn!(library = name, "running without library");
    }

    match cli.command.action() {
        None => {
            boot(platform);
            ExitCode::SUCCESS
        }
        Some(request) => exit_code(ActionDispatcher::new(platform).dispatch(&request)),
    }
}

fn load_config(cli: &Cli) -> surgebridge_core::error::Result<BridgeConfig> {
    let mut config = match &cli.config {
        Some(path) => BridgeConfig::load(path)?,
        None => BridgeConfig::default(),
    };
    if cli.tv && !config.desktop.system_features.iter().any(|f| f == FEATURE_LEANBACK) {
        config.desktop.system_features.push(FEATURE_LEANBACK.into());
    }
    if let Some(sdk) = cli.sdk {
        config.desktop.sdk_version = sdk;
    }
    Ok(config)
}

fn boot(platform: Arc<dyn PlatformBridge>) {
    let mut forwarder = LifecycleForwarder::new(HeadlessEngine::default(), platform);
    for transition in BOOT_SEQUENCE {
        forwarder.forward(transition);
    }
    tracing::info!(
        transitions = forwarder.engine().received.len(),
        state = ?forwarder.current(),
        "lifecycle replay finished"
    );
}

fn exit_code(outcome: ActionOutcome) -> ExitCode {
    tracing::info!(?outcome, "action finished");
    match outcome {
        ActionOutcome::Done => ExitCode::SUCCESS,
        ActionOutcome::Refused | ActionOutcome::Created(false) => ExitCode::FAILURE,
        ActionOutcome::Created(true) => ExitCode::SUCCESS,
        ActionOutcome::IsTvDevice(tv) => {
            println!("{tv}");
            ExitCode::SUCCESS
        }
    }
}
