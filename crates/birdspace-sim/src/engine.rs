//! Simulation engine.
//!
//! `SimulationEngine` owns the simulation context, processes queued
//! commands, runs one frame per `tick` and produces `FrameSnapshot`s.
//! Headless: drawing goes through the `Canvas` trait supplied by the host.

use std::collections::{BTreeSet, VecDeque};

use hecs::{Entity, World};

use birdspace_core::commands::{InputFrame, Key, SimCommand};
use birdspace_core::components::{CameraLimit, StationLink};
use birdspace_core::enums::{EntityKind, SceneId, SimPhase};
use birdspace_core::level::LevelDescription;
use birdspace_core::state::FrameSnapshot;
use birdspace_core::types::SimTime;

use crate::camera::Camera;
use crate::context::SimContext;
use crate::registry::Registry;
use crate::render::{self, Canvas};
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed. Same seed and inputs give the same simulation.
    pub seed: u64,
    /// Longest frame delta accepted by `tick`, in seconds.
    pub max_frame_dt: f64,
    pub viewport_width: f64,
    pub viewport_height: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            max_frame_dt: 0.25,
            viewport_width: 600.0,
            viewport_height: 600.0,
        }
    }
}

pub struct SimulationEngine {
    ctx: SimContext,
    phase: SimPhase,
    time: SimTime,
    config: SimConfig,
    command_queue: VecDeque<SimCommand>,
    /// Keys held on the previous frame, for edge-triggered input.
    prev_keys: BTreeSet<Key>,
}

impl SimulationEngine {
    pub fn new(config: SimConfig) -> Self {
        Self {
            ctx: SimContext::new(config.seed, config.viewport_width, config.viewport_height),
            phase: SimPhase::default(),
            time: SimTime::default(),
            config,
            command_queue: VecDeque::new(),
            prev_keys: BTreeSet::new(),
        }
    }

    /// Queue a command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: SimCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = SimCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the world with a built-in scene.
    pub fn load_scene(&mut self, scene: SceneId) {
        let level = LevelDescription::builtin(scene);
        self.load_level(&level, scene);
    }

    /// Clear the world and replay `level` under the rules of `scene`.
    pub fn load_level(&mut self, level: &LevelDescription, scene: SceneId) {
        self.ctx.clear();
        self.ctx.camera.reset();
        self.ctx.scene = Some(scene);
        let spawned = world_setup::populate(&mut self.ctx, level);
        let linked = world_setup::link_turret_stations(&mut self.ctx);
        self.phase = SimPhase::Running;
        self.time = SimTime::default();
        self.prev_keys.clear();
        log::info!(
            "loaded {:?}: {} entities, {} turret links",
            scene,
            spawned,
            linked
        );
    }

    /// Advance one frame of `dt` seconds and return the resulting snapshot.
    /// Paused or idle engines still process commands and report state.
    pub fn tick(&mut self, dt: f64, input: &InputFrame) -> FrameSnapshot {
        self.process_commands();

        if self.phase == SimPhase::Running {
            let dt = dt.clamp(0.0, self.config.max_frame_dt);
            self.run_frame(dt, input);
            self.time.advance(dt);
        }
        self.prev_keys = input.keys.clone();

        let events = std::mem::take(&mut self.ctx.events);
        systems::snapshot::build_snapshot(&self.ctx, &self.time, self.phase, events)
    }

    /// Issue the draw calls for the current frame.
    pub fn draw<C: Canvas + ?Sized>(&self, canvas: &mut C) {
        render::draw_world(&self.ctx, canvas);
    }

    /// Make `follower` trail `leader`. Both must be birds.
    pub fn set_follower(&mut self, leader: Entity, follower: Entity) -> bool {
        world_setup::set_follower(&mut self.ctx, leader, follower)
    }

    pub fn phase(&self) -> SimPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    pub fn registry(&self) -> &Registry {
        &self.ctx.registry
    }

    pub fn camera(&self) -> &Camera {
        &self.ctx.camera
    }

    pub fn controlled(&self) -> Option<Entity> {
        self.ctx.controlled
    }

    pub fn scene(&self) -> Option<SceneId> {
        self.ctx.scene
    }

    pub fn context(&self) -> &SimContext {
        &self.ctx
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: SimCommand) {
        match command {
            SimCommand::LoadScene { scene } => self.load_scene(scene),
            SimCommand::LoadLevel { level, scene } => self.load_level(&level, scene),
            SimCommand::Resize { width, height } => self.ctx.camera.resize(width, height),
            SimCommand::Pause => {
                if self.phase == SimPhase::Running {
                    self.phase = SimPhase::Paused;
                }
            }
            SimCommand::Resume => {
                if self.phase == SimPhase::Paused {
                    self.phase = SimPhase::Running;
                }
            }
        }
    }

    /// One frame: input, entity updates newest first, purge, camera.
    fn run_frame(&mut self, dt: f64, input: &InputFrame) {
        let interact = input.held(Key::Interact) && !self.prev_keys.contains(&Key::Interact);
        systems::control::run(&mut self.ctx, input, interact, dt);

        for entity in self.ctx.registry.update_order() {
            if self.ctx.is_alive(entity) {
                systems::update_entity(&mut self.ctx, entity, dt);
            }
        }
        systems::cleanup::purge_dead(&mut self.ctx);

        self.follow_controlled();
        let limit = self
            .ctx
            .controlled
            .and_then(|e| self.ctx.world.get::<&CameraLimit>(e).ok().map(|l| l.max_height));
        self.ctx.camera.update(input.mouse.scroll, limit);
    }

    /// Center the camera on the controlled entity; a piloted station looks
    /// at its aim point instead.
    fn follow_controlled(&mut self) {
        let Some(controlled) = self.ctx.controlled else {
            return;
        };
        let focus = if self.ctx.kind(controlled) == Some(EntityKind::TurretStation) {
            self.ctx
                .world
                .get::<&StationLink>(controlled)
                .ok()
                .map(|link| link.aim_point)
        } else {
            self.ctx.position(controlled)
        };
        if let Some(focus) = focus {
            self.ctx.camera.focus = focus;
        }
    }
}
