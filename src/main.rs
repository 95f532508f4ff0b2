//! # Action Input Demo
//!
//! Reads keyboards, mice and gamepads through evdev and prints the default
//! movement and jump actions as they fire.

use anyhow::Result;
use std::thread;
use tokio::sync::mpsc;
use tokio::time::{interval, Duration};
use tracing::{debug, info, warn};

use action_input::context::InputContext;
use action_input::controller::backend::GamepadBackend;
use action_input::controller::codes::{KeyCode, PadButton};
use action_input::controller::evdev::{scan_devices, DeviceKind, EvdevDevice, EvdevGamepads, EvdevTranslator};
use action_input::controller::gamepad::MAX_GAMEPADS;
use action_input::event::InputEvent;

/// Directory scanned for evdev nodes
const INPUT_DIR: &str = "/dev/input";

/// Action polling rate in Hz
const POLL_RATE_HZ: u64 = 60;

/// Number of frames between status log messages
const LOG_INTERVAL_FRAMES: u64 = 600;

/// Pending events buffered between reader threads and the main loop
const EVENT_CHANNEL_CAPACITY: usize = 1024;

/// Held movement actions polled every frame
const MOVEMENT_ACTIONS: [&str; 4] = ["moveforward", "movebackward", "moveleft", "moveright"];

/// Main entry point for the demo
///
/// # Control Flow
///
/// 1. **Initialization**
///    - Set up logging with tracing subscriber
///    - Scan `/dev/input` and assign gamepads to ports in path order
///    - Register default actions, then apply the binding file given as the
///      first argument, if any
///
/// 2. **Main Loop**
///    - Dispatch events forwarded by the reader threads
///    - Poll actions at 60Hz
///    - Handle Ctrl+C for graceful shutdown
///
/// # Examples
///
/// ```bash
/// cargo run --release -- config/actions.toml
/// ```
#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Action Input v{} starting...", env!("CARGO_PKG_VERSION"));

    let devices = match scan_devices(INPUT_DIR) {
        Ok(devices) => devices,
        Err(e) => {
            warn!("Device scan failed: {}", e);
            Vec::new()
        }
    };

    let mut input = InputContext::new(EvdevGamepads::from_devices(&devices));
    register_default_actions(&mut input);

    if let Some(path) = std::env::args().nth(1) {
        if !input.load_actions_from_file(&path) {
            warn!("Continuing with default bindings");
        }
    }

    let (tx, mut rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
    let mut next_port = 0;
    for device in devices {
        let translator = match device.kind() {
            DeviceKind::Gamepad if next_port >= MAX_GAMEPADS => {
                warn!("No free port for {}, ignoring", device.name());
                continue;
            }
            DeviceKind::Gamepad => {
                next_port += 1;
                EvdevTranslator::gamepad(next_port - 1)
            }
            DeviceKind::KeyboardMouse => EvdevTranslator::keyboard_mouse(),
        };
        spawn_reader(device, translator, tx.clone())?;
    }
    drop(tx);

    let mut poll_interval = interval(Duration::from_millis(1000 / POLL_RATE_HZ));
    let mut frame_count: u64 = 0;

    info!("Polling actions at {}Hz", POLL_RATE_HZ);
    info!("Press Ctrl+C to exit");

    loop {
        tokio::select! {
            Some(event) = rx.recv() => {
                input.dispatch(event);
            }

            _ = poll_interval.tick() => {
                if let Err(e) = poll_actions(&mut input) {
                    warn!("Action poll failed: {}", e);
                }

                frame_count += 1;
                if frame_count % LOG_INTERVAL_FRAMES == 0 {
                    info!(
                        "{} frames, device: {}, gamepads: {}",
                        frame_count,
                        input.active_device(),
                        input.gamepad_count()
                    );
                }
            }

            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down...");
                break;
            }
        }
    }

    Ok(())
}

fn register_default_actions<B: GamepadBackend>(input: &mut InputContext<B>) {
    input.register_action("moveforward", KeyCode::W, PadButton::LEFT_STICK_UP, true);
    input.register_action("movebackward", KeyCode::S, PadButton::LEFT_STICK_DOWN, true);
    input.register_action("moveleft", KeyCode::A, PadButton::LEFT_STICK_LEFT, true);
    input.register_action("moveright", KeyCode::D, PadButton::LEFT_STICK_RIGHT, true);
    input.register_action("jump", KeyCode::SPACE, PadButton::A, false);
}

fn poll_actions<B: GamepadBackend>(input: &mut InputContext<B>) -> action_input::Result<()> {
    for name in MOVEMENT_ACTIONS {
        let value = input.action_input(name)?;
        if value > 0.0 {
            debug!("{}: {:.2}", name, value);
        }
    }

    if input.action_input("jump")? > 0.0 {
        info!("Jump! ({})", input.active_device());
    }

    Ok(())
}

/// Reads one device on its own thread until it fails or the receiver is gone.
///
/// Gamepad readers bracket their events with connect and disconnect events.
fn spawn_reader(
    mut device: EvdevDevice,
    mut translator: EvdevTranslator,
    tx: mpsc::Sender<InputEvent>,
) -> Result<()> {
    let path = device.path().display().to_string();
    let thread_name = format!("evdev-{}", path);

    thread::Builder::new().name(thread_name).spawn(move || {
        let port = translator.port();
        if let Some(port) = port {
            if tx.blocking_send(InputEvent::GamepadConnected { port }).is_err() {
                return;
            }
        }

        loop {
            let events = match device.fetch_events() {
                Ok(events) => events,
                Err(e) => {
                    warn!("Stopped reading {}: {}", path, e);
                    break;
                }
            };

            for event in events {
                for input in translator.translate(&event) {
                    if tx.blocking_send(input).is_err() {
                        return;
                    }
                }
            }
        }

        if let Some(port) = port {
            let _ = tx.blocking_send(InputEvent::GamepadDisconnected { port });
        }
    })?;

    Ok(())
}
