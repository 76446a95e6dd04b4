//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, the economy ledger and the wave
//! scheduler, processes player commands, runs all systems, and produces
//! `GameStateSnapshot`s. Completely headless: the host measures frame time
//! and passes it to `tick`.

use std::collections::VecDeque;

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use siegeline_core::commands::{CommandOutcome, PlayerCommand};
use siegeline_core::components::*;
use siegeline_core::constants::*;
use siegeline_core::enums::{Difficulty, EnemyKind, GamePhase, TowerKind};
use siegeline_core::error::CommandError;
use siegeline_core::events::GameEvent;
use siegeline_core::path::EnemyPath;
use siegeline_core::profiles::tower_profile;
use siegeline_core::state::{EconomyView, GameStateSnapshot};
use siegeline_core::types::{Bounds, Position, SimTime};

use crate::economy::{sell_value, upgrade_cost, Ledger};
use crate::systems;
use crate::systems::wave_spawner::{SpawnContext, WaveScheduler};
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Seed for spawn jitter and particle scatter.
    pub seed: u64,
    pub difficulty: Difficulty,
    pub starting_money: u32,
    pub starting_lives: u32,
    /// Completing this wave wins the game.
    pub final_wave: u32,
    pub bounds: Bounds,
    pub path: EnemyPath,
    /// Frame deltas above this are clamped (ms).
    pub max_frame_delta_ms: f64,
    /// Initial time scale (1.0 = normal).
    pub time_scale: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            difficulty: Difficulty::default(),
            starting_money: STARTING_MONEY,
            starting_lives: STARTING_LIVES,
            final_wave: FINAL_WAVE,
            bounds: Bounds::default(),
            path: EnemyPath::default(),
            max_frame_delta_ms: MAX_FRAME_DELTA_MS,
            time_scale: 1.0,
        }
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    time_scale: f64,
    rng: ChaCha8Rng,
    ledger: Ledger,
    scheduler: WaveScheduler,
    next_enemy_id: u32,
    next_tower_id: u32,
    command_queue: VecDeque<PlayerCommand>,
    events: Vec<GameEvent>,
    despawn_buffer: Vec<Entity>,
    leaked_buffer: Vec<Entity>,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config. The game starts
    /// in the `Playing` phase with no waves running.
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Playing,
            time_scale: sanitize_time_scale(config.time_scale),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ledger: Ledger::new(config.starting_money, config.starting_lives),
            scheduler: WaveScheduler::new(config.final_wave),
            next_enemy_id: 0,
            next_tower_id: 0,
            command_queue: VecDeque::new(),
            events: Vec::new(),
            despawn_buffer: Vec::new(),
            leaked_buffer: Vec::new(),
            config,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    /// Rejections are reported as `GameEvent::CommandRejected`.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Apply a command immediately.
    pub fn execute(&mut self, command: PlayerCommand) -> Result<CommandOutcome, CommandError> {
        match command {
            PlayerCommand::PlaceTower { kind, x, y } => self.place_tower(kind, x, y),
            PlayerCommand::SellTower { tower_id } => self.sell_tower(tower_id),
            PlayerCommand::UpgradeTower { tower_id } => self.upgrade_tower(tower_id),
            PlayerCommand::StartWave { wave_number } => self.start_wave(wave_number),
            PlayerCommand::SetTimeScale { scale } => {
                self.time_scale = sanitize_time_scale(scale);
                Ok(CommandOutcome::Applied)
            }
            PlayerCommand::Pause => {
                self.ensure_running()?;
                self.phase = GamePhase::Paused;
                Ok(CommandOutcome::Applied)
            }
            PlayerCommand::Resume => {
                self.ensure_running()?;
                self.phase = GamePhase::Playing;
                Ok(CommandOutcome::Applied)
            }
            PlayerCommand::Restart => {
                self.restart();
                Ok(CommandOutcome::Applied)
            }
        }
    }

    /// Advance the simulation by one frame of `dt_ms` milliseconds of wall
    /// time and return the resulting snapshot.
    pub fn tick(&mut self, dt_ms: f64) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Playing {
            let dt = self.frame_delta(dt_ms);
            self.time.advance(dt);
            self.run_systems(dt);
            self.check_terminal();
        }

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            &self.scheduler,
            &self.ledger,
            events,
        )
    }

    /// Money, score, wave counter and lives.
    pub fn economy(&self) -> EconomyView {
        self.ledger.view()
    }

    /// Get the current game phase.
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// Get the current simulation time.
    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Get the current time scale.
    pub fn time_scale(&self) -> f64 {
        self.time_scale
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn scheduler(&self) -> &WaveScheduler {
        &self.scheduler
    }

    /// Highest wave number a `StartWave` command would currently accept.
    pub fn next_wave_number(&self) -> u32 {
        self.scheduler.next_wave_number(self.ledger.frontier())
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for hosts and tests that stage scenarios directly.
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn a single enemy at the path start outside of any wave.
    pub fn spawn_enemy(&mut self, kind: EnemyKind, wave_number: u32) -> Entity {
        let id = self.allocate_enemy_id();
        world_setup::spawn_enemy(
            &mut self.world,
            &self.config.path,
            id,
            kind,
            u32::MAX,
            wave_number,
            0.0,
        )
    }

    /// Find a tower entity by its public id.
    pub fn tower_entity(&self, tower_id: TowerId) -> Option<Entity> {
        self.world
            .query::<&Tower>()
            .iter()
            .find(|(_, tower)| tower.id == tower_id)
            .map(|(entity, _)| entity)
    }

    #[cfg(test)]
    pub(crate) fn ledger_mut(&mut self) -> &mut Ledger {
        &mut self.ledger
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            if let Err(reason) = self.execute(command.clone()) {
                warn!(?command, %reason, "command rejected");
                self.events.push(GameEvent::CommandRejected { reason });
            }
        }
    }

    fn ensure_running(&self) -> Result<(), CommandError> {
        match self.phase {
            GamePhase::Playing | GamePhase::Paused => Ok(()),
            GamePhase::Defeat | GamePhase::Victory => Err(CommandError::GameNotRunning),
        }
    }

    /// Clamp a wall-clock delta to the frame limit and apply the time scale.
    fn frame_delta(&self, dt_ms: f64) -> f64 {
        if !dt_ms.is_finite() || dt_ms <= 0.0 {
            return 0.0;
        }
        dt_ms.min(self.config.max_frame_delta_ms) * self.time_scale
    }

    fn allocate_enemy_id(&mut self) -> EnemyId {
        let id = EnemyId(self.next_enemy_id);
        self.next_enemy_id += 1;
        id
    }

    fn place_tower(&mut self, kind: TowerKind, x: f64, y: f64) -> Result<CommandOutcome, CommandError> {
        self.ensure_running()?;

        let position = Position::planar(x, y);
        if !(x.is_finite() && y.is_finite()) || !self.config.bounds.contains(&position, 0.0) {
            return Err(CommandError::OutOfBounds { x, y });
        }
        if self.config.path.distance_to(&position) < PATH_CLEARANCE {
            return Err(CommandError::BlockedByPath { x, y });
        }
        if let Some((_, tower)) = self
            .world
            .query::<(&Tower, &Position)>()
            .iter()
            .map(|(_, (tower, pos))| (pos.range_to(&position), tower.id))
            .find(|(distance, _)| *distance < TOWER_RADIUS * 2.0)
        {
            return Err(CommandError::OverlapsTower { tower });
        }

        let cost = tower_profile(kind).cost;
        self.ledger.spend(cost)?;

        let tower_id = TowerId(self.next_tower_id);
        self.next_tower_id += 1;
        world_setup::spawn_tower(&mut self.world, tower_id, kind, position, self.time.elapsed_ms);
        self.ledger.towers_built += 1;

        info!(%tower_id, ?kind, x, y, cost, "tower placed");
        self.events.push(GameEvent::TowerPlaced {
            tower_id,
            kind,
            position,
        });
        Ok(CommandOutcome::TowerPlaced { tower_id, cost })
    }

    fn sell_tower(&mut self, tower_id: TowerId) -> Result<CommandOutcome, CommandError> {
        self.ensure_running()?;
        let entity = self
            .tower_entity(tower_id)
            .ok_or(CommandError::UnknownTower { tower: tower_id })?;
        let invested = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| tower.invested)
            .map_err(|_| CommandError::UnknownTower { tower: tower_id })?;

        let refund = sell_value(invested);
        let _ = self.world.despawn(entity);
        self.ledger.credit(refund);

        info!(%tower_id, refund, "tower sold");
        self.events.push(GameEvent::TowerSold { tower_id, refund });
        Ok(CommandOutcome::TowerSold { tower_id, refund })
    }

    fn upgrade_tower(&mut self, tower_id: TowerId) -> Result<CommandOutcome, CommandError> {
        self.ensure_running()?;
        let entity = self
            .tower_entity(tower_id)
            .ok_or(CommandError::UnknownTower { tower: tower_id })?;
        let (kind, level) = self
            .world
            .get::<&Tower>(entity)
            .map(|tower| (tower.kind, tower.level))
            .map_err(|_| CommandError::UnknownTower { tower: tower_id })?;

        let cost = upgrade_cost(kind, level).ok_or(CommandError::MaxLevel {
            tower: tower_id,
            level,
        })?;
        self.ledger.spend(cost)?;

        let new_level = level + 1;
        if let Ok((tower, stats)) = self
            .world
            .query_one_mut::<(&mut Tower, &mut TowerStats)>(entity)
        {
            tower.level = new_level;
            tower.invested += cost;
            *stats = world_setup::tower_stats(kind, new_level);
        }

        info!(%tower_id, level = new_level, cost, "tower upgraded");
        self.events.push(GameEvent::TowerUpgraded {
            tower_id,
            level: new_level,
        });
        Ok(CommandOutcome::TowerUpgraded {
            tower_id,
            level: new_level,
            cost,
        })
    }

    fn start_wave(&mut self, wave_number: u32) -> Result<CommandOutcome, CommandError> {
        self.ensure_running()?;
        let wave = self
            .scheduler
            .start_wave(wave_number, self.ledger.frontier(), self.time.elapsed_ms)?;
        let (wave_id, total, special) = (wave.id, wave.total, wave.special);

        info!(wave = wave_number, wave_id, total, special, "wave started");
        self.events.push(GameEvent::WaveStarted {
            wave_id,
            wave_number,
            total,
        });
        Ok(CommandOutcome::WaveStarted {
            wave_id,
            wave_number,
        })
    }

    /// Throw away the session and start over from the config. Bumping the
    /// scheduler epoch turns every queued spawn event into a no-op.
    fn restart(&mut self) {
        self.world.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.rng = ChaCha8Rng::seed_from_u64(self.config.seed);
        self.ledger = Ledger::new(self.config.starting_money, self.config.starting_lives);
        self.scheduler.reset();
        self.next_enemy_id = 0;
        self.next_tower_id = 0;
        self.events.clear();
        info!(epoch = self.scheduler.epoch(), "game restarted");
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt_ms: f64) {
        let now_ms = self.time.elapsed_ms;

        // 1. Wave scheduler
        systems::wave_spawner::run(
            &mut self.scheduler,
            &mut SpawnContext {
                world: &mut self.world,
                path: &self.config.path,
                rng: &mut self.rng,
                ledger: &mut self.ledger,
                events: &mut self.events,
                next_enemy_id: &mut self.next_enemy_id,
                difficulty: self.config.difficulty,
            },
            now_ms,
        );
        // 2. Enemies: status, regeneration, movement; reap leaked and dead
        systems::enemies::run(
            &mut self.world,
            &self.config.path,
            dt_ms,
            &mut self.leaked_buffer,
        );
        systems::cleanup::reap_leaked(
            &mut self.world,
            &mut self.leaked_buffer,
            &mut self.ledger,
            &mut self.events,
        );
        systems::cleanup::reap_dead(
            &mut self.world,
            &mut self.ledger,
            &mut self.rng,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        // 3. Towers: retarget, fire
        systems::targeting::run(&mut self.world);
        systems::fire_control::run(
            &mut self.world,
            &self.config.path,
            now_ms,
            &mut self.ledger,
            &mut self.events,
        );
        // 4. Projectiles: move, collide, explode; reap dead enemies and spent rounds
        systems::projectiles::run(
            &mut self.world,
            &self.config.bounds,
            dt_ms,
            &mut self.rng,
            &mut self.events,
        );
        systems::cleanup::reap_dead(
            &mut self.world,
            &mut self.ledger,
            &mut self.rng,
            &mut self.events,
            &mut self.despawn_buffer,
        );
        systems::cleanup::reap_projectiles(&mut self.world, &mut self.despawn_buffer);
        // 5. Particles
        systems::particles::run(&mut self.world, dt_ms, &mut self.despawn_buffer);
    }

    /// 6. Terminal conditions.
    fn check_terminal(&mut self) {
        if self.ledger.is_defeated() {
            self.phase = GamePhase::Defeat;
            info!(wave = self.ledger.wave, score = self.ledger.score, "defeat");
            self.events.push(GameEvent::Defeat {
                wave: self.ledger.wave,
                score: self.ledger.score,
            });
        } else if self.ledger.wave > self.scheduler.final_wave() {
            self.phase = GamePhase::Victory;
            info!(score = self.ledger.score, "victory");
            self.events.push(GameEvent::Victory {
                score: self.ledger.score,
            });
        }
    }
}

/// Time scales are clamped to `[0, 4]`; non-finite values reset to 1.
fn sanitize_time_scale(scale: f64) -> f64 {
    if scale.is_finite() {
        scale.clamp(0.0, 4.0)
    } else {
        1.0
    }
}
