//! Hardware smoke binary.
//!
//! Wires the plugin to a simulated brewing host and the real panel on
//! `/dev/i2c-1`, then ticks the dispatcher forever. Useful for
//! checking wiring, bus address and character map on a bench Pi:
//!
//! ```text
//! RUST_LOG=debug cargo run --features rpi
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use anyhow::Result;
use chrono::{DateTime, Local};
use log::{info, warn};

use brewpanel::adapters::clock::SystemClock;
use brewpanel::adapters::lcd;
use brewpanel::app::ports::{
    CachePort, ClockPort, ConfigPort, Host, HostInfoPort, NotifyKind, NotifyPort, SensorPort,
};
use brewpanel::app::service::DisplayService;
use brewpanel::app::snapshot::{
    ActiveStep, Actor, BrewSnapshot, Fermenter, FermenterTask, Kettle, SensorId, TaskState,
};
use brewpanel::config::{self, ConfigValue, ParameterSpec};

/// Host-driven dispatcher cadence.
const TICK: Duration = Duration::from_millis(700);

// ── Simulated host ────────────────────────────────────────────
//
// One mash step on one kettle plus one fermenting batch, with the
// heater toggling every few seconds so the blink icon shows.

struct SimHost {
    params: Mutex<HashMap<String, ConfigValue>>,
    clock: SystemClock,
    mash_start: i64,
    ferment_start: i64,
}

impl SimHost {
    fn new() -> Self {
        let clock = SystemClock::new();
        let now = clock.epoch_secs();
        Self {
            params: Mutex::new(HashMap::new()),
            clock,
            mash_start: now,
            ferment_start: now - 3 * 86_400 - 7_200,
        }
    }

    fn elapsed(&self) -> i64 {
        self.clock.epoch_secs() - self.mash_start
    }
}

impl ConfigPort for SimHost {
    fn get_parameter(&self, key: &str) -> Option<ConfigValue> {
        self.params.lock().ok()?.get(key).cloned()
    }

    fn add_parameter(&self, spec: &ParameterSpec) {
        if let Ok(mut params) = self.params.lock() {
            params
                .entry(spec.key.to_owned())
                .or_insert_with(|| spec.default.clone());
        }
    }
}

impl CachePort for SimHost {
    fn snapshot(&self) -> BrewSnapshot {
        BrewSnapshot {
            active_step: Some(ActiveStep {
                name: "Mash In".to_owned(),
                timer_end: Some(self.mash_start + 75 * 60),
            }),
            kettles: vec![Kettle {
                id: 1,
                name: "Mash Tun".to_owned(),
                target_temp: 66.5,
                sensor: Some(1),
                heater: Some(1),
            }],
            fermenters: vec![Fermenter {
                id: 1,
                brew_name: "Altbier 23".to_owned(),
                name: "Keller".to_owned(),
                target_temp: 12.0,
                sensor: Some(2),
                heater: None,
                cooler: Some(2),
            }],
            fermenter_tasks: vec![FermenterTask {
                fermenter_id: 1,
                timer_start: Some(self.ferment_start),
                state: TaskState::Active,
            }],
            actors: vec![
                Actor {
                    id: 1,
                    on: (self.elapsed() / 10) % 2 == 0,
                },
                Actor { id: 2, on: true },
            ],
        }
    }
}

impl SensorPort for SimHost {
    fn sensor_value(&self, sensor: SensorId) -> Option<f64> {
        let wobble = f64::sin(self.elapsed() as f64 / 30.0) * 0.4;
        match sensor {
            1 => Some(65.8 + wobble),
            2 => Some(12.4 - wobble),
            _ => None,
        }
    }
}

impl NotifyPort for SimHost {
    fn notify(&self, headline: &str, message: &str, kind: NotifyKind, _timeout_secs: Option<u32>) {
        warn!("notification [{kind:?}] {headline}: {message}");
    }
}

impl ClockPort for SimHost {
    fn epoch_secs(&self) -> i64 {
        self.clock.epoch_secs()
    }

    fn local_now(&self) -> DateTime<Local> {
        self.clock.local_now()
    }
}

impl HostInfoPort for SimHost {
    fn app_name(&self) -> String {
        "brewpanel".to_owned()
    }

    fn app_version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_owned()
    }
}

// ── Main ──────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    info!("brewpanel v{} smoke run", env!("CARGO_PKG_VERSION"));

    let host: Arc<dyn Host> = Arc::new(SimHost::new());

    // Resolving here and again inside init is fine: creation is lazy
    // and idempotent, and the probe needs the ROM variant up front.
    let charmap = config::charactermap(host.as_ref());

    let mut service = DisplayService::init(Arc::clone(&host), |address| {
        lcd::probe(address, charmap)
    });

    info!("entering tick loop ({}ms)", TICK.as_millis());
    loop {
        service.tick();
        thread::sleep(TICK);
    }
}
