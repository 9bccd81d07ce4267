//! Read-only mirror of the host's brewing entities.
//!
//! The host owns every entity lifecycle; this module only defines the
//! point-in-time shape handed over per render. All references between
//! entities are ids resolved against the same snapshot, with lookup
//! misses degrading per the contracts on
//! [`ports`](crate::app::ports).

use serde::{Deserialize, Serialize};

pub type KettleId = i64;
pub type FermenterId = i64;
pub type ActorId = i64;
pub type SensorId = i64;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

/// The brewing process step currently executing, if any.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActiveStep {
    pub name: String,
    /// Unix timestamp at which the step timer expires; `None` while the
    /// timer has not been started.
    pub timer_end: Option<i64>,
}

/// A brew kettle with its control references.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kettle {
    pub id: KettleId,
    pub name: String,
    pub target_temp: f64,
    pub sensor: Option<SensorId>,
    pub heater: Option<ActorId>,
}

/// A fermentation vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fermenter {
    pub id: FermenterId,
    /// Name of the batch currently fermenting.
    pub brew_name: String,
    /// Display name of the vessel itself.
    pub name: String,
    pub target_temp: f64,
    pub sensor: Option<SensorId>,
    pub heater: Option<ActorId>,
    pub cooler: Option<ActorId>,
}

/// Progress state of a fermentation task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TaskState {
    Active,
    Inactive,
}

/// One scheduled fermentation step on a fermenter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FermenterTask {
    pub fermenter_id: FermenterId,
    /// Unix timestamp at which the task timer started; `None` while the
    /// task is waiting on a target temperature.
    pub timer_start: Option<i64>,
    pub state: TaskState,
}

/// A controllable output (heater or cooler) with a binary state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Actor {
    pub id: ActorId,
    pub on: bool,
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// Everything a render needs, captured in one call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BrewSnapshot {
    pub active_step: Option<ActiveStep>,
    pub kettles: Vec<Kettle>,
    pub fermenters: Vec<Fermenter>,
    pub fermenter_tasks: Vec<FermenterTask>,
    pub actors: Vec<Actor>,
}

impl BrewSnapshot {
    pub fn kettle(&self, id: KettleId) -> Option<&Kettle> {
        self.kettles.iter().find(|k| k.id == id)
    }

    /// Resolve an actor reference to its on/off state.
    ///
    /// `None` references and ids with no matching actor both read as
    /// off, so a half-configured vessel never breaks a render.
    pub fn actor_on(&self, id: Option<ActorId>) -> bool {
        id.and_then(|id| self.actors.iter().find(|a| a.id == id))
            .is_some_and(|a| a.on)
    }

    /// The running task on a fermenter, if one has started its timer.
    pub fn task_for(&self, fermenter: FermenterId) -> Option<&FermenterTask> {
        self.fermenter_tasks
            .iter()
            .find(|t| t.fermenter_id == fermenter && t.timer_start.is_some())
    }

    /// True when any fermentation task is in the active state.
    pub fn fermentation_active(&self) -> bool {
        self.fermenter_tasks
            .iter()
            .any(|t| t.state == TaskState::Active)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(id: ActorId, on: bool) -> Actor {
        Actor { id, on }
    }

    #[test]
    fn actor_resolution_degrades_to_off() {
        let snap = BrewSnapshot {
            actors: vec![actor(2, true)],
            ..Default::default()
        };
        assert!(snap.actor_on(Some(2)));
        assert!(!snap.actor_on(Some(7)), "unknown actor reads as off");
        assert!(!snap.actor_on(None), "missing reference reads as off");
    }

    #[test]
    fn task_lookup_requires_started_timer() {
        let snap = BrewSnapshot {
            fermenter_tasks: vec![
                FermenterTask {
                    fermenter_id: 1,
                    timer_start: None,
                    state: TaskState::Active,
                },
                FermenterTask {
                    fermenter_id: 1,
                    timer_start: Some(1000),
                    state: TaskState::Active,
                },
            ],
            ..Default::default()
        };
        assert_eq!(snap.task_for(1).and_then(|t| t.timer_start), Some(1000));
        assert!(snap.task_for(2).is_none());
    }

    #[test]
    fn fermentation_active_scans_states() {
        let mut snap = BrewSnapshot {
            fermenter_tasks: vec![FermenterTask {
                fermenter_id: 1,
                timer_start: None,
                state: TaskState::Inactive,
            }],
            ..Default::default()
        };
        assert!(!snap.fermentation_active());
        snap.fermenter_tasks[0].state = TaskState::Active;
        assert!(snap.fermentation_active());
    }

    #[test]
    fn snapshot_serde_roundtrip() {
        let snap = BrewSnapshot {
            active_step: Some(ActiveStep {
                name: "Mash In".into(),
                timer_end: Some(1_700_000_000),
            }),
            kettles: vec![Kettle {
                id: 1,
                name: "Mash Tun".into(),
                target_temp: 66.5,
                sensor: Some(3),
                heater: Some(2),
            }],
            ..Default::default()
        };
        let json = serde_json::to_string(&snap).unwrap();
        let back: BrewSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.kettles[0].name, "Mash Tun");
        assert_eq!(back.active_step.unwrap().timer_end, Some(1_700_000_000));
    }
}
