//! Rooms domain: the room lifecycle state machine and the active room.

use bevy::prelude::*;

use crate::core::RoomGeneration;
use crate::rooms::plan::{PlannedRoom, RunPlan};
use crate::rooms::spawner::SpawnSequence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoomPhase {
    /// No run started
    #[default]
    Empty,
    Loading,
    /// Gate locked, enemies spawning or alive
    AwaitingClear,
    Unlocked,
    /// Advance accepted, next room loads on the following frame
    Transitioning,
    /// Plan exhausted. Terminal.
    Complete,
}

/// Per-instance state of the room the player is in.
#[derive(Debug)]
pub struct ActiveRoom {
    pub index: usize,
    pub entity: Entity,
    pub blueprint_id: String,
    pub theme_id: String,
    /// None when the room could not resolve a gate and has no exit
    pub gate: Option<Entity>,
    pub spawn_points: Vec<Vec2>,
    pub spawn: Option<SpawnSequence>,
    pub alive: u32,
    /// `Time::elapsed_secs_f64` when the room finished loading
    pub loaded_at: f64,
}

impl ActiveRoom {
    pub fn spawning_finished(&self) -> bool {
        self.spawn.as_ref().is_none_or(SpawnSequence::is_finished)
    }
}

/// Owns the run plan and sequences rooms: load, await clear, unlock, advance.
#[derive(Resource, Debug, Default)]
pub struct RoomLifecycle {
    plan: RunPlan,
    phase: RoomPhase,
    generation: RoomGeneration,
    active: Option<ActiveRoom>,
    transitioning: bool,
    pending_advance: bool,
    rooms_cleared: usize,
}

impl RoomLifecycle {
    /// Install a fresh plan. The room generation keeps counting across runs.
    pub fn begin_run(&mut self, plan: RunPlan) {
        self.plan = plan;
        self.phase = RoomPhase::Empty;
        self.active = None;
        self.transitioning = false;
        self.pending_advance = false;
        self.rooms_cleared = 0;
    }

    pub fn plan(&self) -> &RunPlan {
        &self.plan
    }

    pub fn planned_room(&self, index: usize) -> Option<&PlannedRoom> {
        self.plan.get(index)
    }

    pub fn phase(&self) -> RoomPhase {
        self.phase
    }

    pub fn generation(&self) -> RoomGeneration {
        self.generation
    }

    pub fn active(&self) -> Option<&ActiveRoom> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut ActiveRoom> {
        self.active.as_mut()
    }

    pub fn current_index(&self) -> Option<usize> {
        self.active.as_ref().map(|room| room.index)
    }

    pub fn alive(&self) -> u32 {
        self.active.as_ref().map_or(0, |room| room.alive)
    }

    pub fn rooms_cleared(&self) -> usize {
        self.rooms_cleared
    }

    pub fn is_transitioning(&self) -> bool {
        self.transitioning
    }

    /// Request a move to the next room. Returns false when absorbed: a
    /// transition is already under way, the run is over, or no room is loaded.
    pub fn try_advance(&mut self) -> bool {
        if self.transitioning {
            return false;
        }
        if matches!(self.phase, RoomPhase::Empty | RoomPhase::Complete) || self.active.is_none()
        {
            return false;
        }

        self.transitioning = true;
        self.pending_advance = true;
        self.phase = RoomPhase::Transitioning;
        true
    }

    /// Index of the room to load for an accepted advance, at most once per advance.
    pub fn take_pending_advance(&mut self) -> Option<usize> {
        if !self.pending_advance {
            return None;
        }
        self.pending_advance = false;
        Some(self.current_index().map_or(0, |index| index + 1))
    }

    pub fn finish_transition(&mut self) {
        self.transitioning = false;
    }

    /// Drop the active room and its alive counter. Returns the new generation.
    pub fn reset_room(&mut self) -> RoomGeneration {
        self.active = None;
        self.generation = self.generation.next();
        self.generation
    }

    pub fn begin_loading(&mut self) {
        self.phase = RoomPhase::Loading;
    }

    pub fn enter_room(&mut self, room: ActiveRoom) {
        self.active = Some(room);
        self.phase = RoomPhase::AwaitingClear;
    }

    pub fn complete(&mut self) {
        self.active = None;
        self.phase = RoomPhase::Complete;
        self.transitioning = false;
        self.pending_advance = false;
    }

    /// Decrement the alive counter for a death reported by `room`. Reports from
    /// any other generation are stale and ignored.
    pub fn record_death(&mut self, room: RoomGeneration) -> bool {
        if room != self.generation {
            return false;
        }
        let Some(active) = self.active.as_mut() else {
            return false;
        };
        if active.alive == 0 {
            warn!(
                "[ROOM] Death reported for room {} with no enemies alive",
                room.0
            );
            return false;
        }
        active.alive -= 1;
        true
    }

    pub fn is_ready_to_unlock(&self) -> bool {
        self.phase == RoomPhase::AwaitingClear
            && self
                .active
                .as_ref()
                .is_some_and(|room| room.alive == 0 && room.spawning_finished())
    }

    pub fn mark_unlocked(&mut self) {
        self.phase = RoomPhase::Unlocked;
        self.rooms_cleared += 1;
    }
}
