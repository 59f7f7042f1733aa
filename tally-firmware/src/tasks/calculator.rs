//! Calculator task
//!
//! Drains debounced presses into the engine and publishes a frame for every
//! result. Also owns the session lifecycle: the ready blinks, the shutdown
//! and restart sequence, and handing off to diagnostics.

use core::sync::atomic::Ordering;

use defmt::*;
use embassy_time::{Duration, Timer};

use tally_core::config::{DisplayConfig, EngineConfig};
use tally_core::engine::Outcome;
use tally_core::input::TerminateKind;
use tally_core::Engine;
use tally_display::Frame;

use super::diagnostics;
use crate::channels::{FRAME, KEY_PRESSES, RESTART, STANDBY};

/// How long the farewell frame stays up
const FAREWELL: Duration = Duration::from_millis(1000);

/// Shown when a session ends
const FAREWELL_CODES: [Option<u8>; 4] = [Some(1), Some(3), Some(3), Some(7)];

/// Calculator task - runs expression sessions
#[embassy_executor::task]
pub async fn calculator_task(engine_config: EngineConfig, display: DisplayConfig) {
    info!("Calculator task started");

    let blink = Duration::from_millis(display.blink_ms.max(1) as u64);
    let mut engine = Engine::new(engine_config);

    ready(display.ready_blinks, blink).await;
    FRAME.signal(Frame::from_view(&engine.view()));

    loop {
        let press = KEY_PRESSES.receive().await;
        let action = engine.submit(press.event);

        match action.outcome {
            Outcome::Accepted => trace!("Accepted {}", press.event),
            Outcome::Ignored => trace!("Ignored {}", press.event),
            Outcome::Rejected(reason) => trace!("Rejected {}: {}", press.event, reason),
            Outcome::Computed { value, overflow } => {
                if overflow {
                    warn!("Result {} does not fit the display", value);
                } else {
                    info!("Result {}", value);
                }
            }
            Outcome::Failed(e) => warn!("Computation failed: {}", e),
            Outcome::Terminated(TerminateKind::Normal) => {
                shutdown(&mut engine, display.ready_blinks, blink).await;
            }
            Outcome::Terminated(TerminateKind::Test) => {
                info!("Entering diagnostics");
                diagnostics::run().await;
                info!("Diagnostics done");
            }
        }

        FRAME.signal(Frame::from_view(&engine.view()));
    }
}

/// Blink the sign indicator `times` times
async fn ready(times: u8, period: Duration) {
    for _ in 0..times {
        FRAME.signal(Frame::blank().with_sign(true));
        Timer::after(period).await;
        FRAME.signal(Frame::blank());
        Timer::after(period).await;
    }
}

/// End the session and idle until the restart chord
async fn shutdown(engine: &mut Engine, blinks: u8, period: Duration) {
    info!("Session ended");

    RESTART.reset();
    STANDBY.store(true, Ordering::Release);

    FRAME.signal(Frame::from_codes(FAREWELL_CODES));
    Timer::after(FAREWELL).await;
    ready(blinks, period).await;
    FRAME.signal(Frame::blank());

    RESTART.wait().await;

    STANDBY.store(false, Ordering::Release);
    // Anything queued before standby belongs to the old session
    while KEY_PRESSES.try_receive().is_ok() {}

    ready(blinks, period).await;
    engine.reset();
    info!("New session");
}
