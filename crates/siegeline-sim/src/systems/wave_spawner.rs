//! Wave scheduler: compositions, spawn cadence and completion bonuses.
//!
//! Several waves may be active at once. Each start request schedules a
//! preparation event on the virtual-time queue; from then on every spawn
//! schedules the next one. A wave completes the moment its last enemy is
//! spawned, whether or not anything has died.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use siegeline_core::components::EnemyId;
use siegeline_core::constants::*;
use siegeline_core::enums::{Difficulty, EnemyKind};
use siegeline_core::error::CommandError;
use siegeline_core::events::GameEvent;
use siegeline_core::path::EnemyPath;

use crate::economy::{wave_bonus, Ledger};
use crate::scheduler::EventQueue;
use crate::world_setup;

/// A hand-authored wave that replaces the generic composition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpecialWave {
    /// Spawned round-robin.
    pub enemy_types: &'static [EnemyKind],
    pub count: u32,
    pub bonus_multiplier: f64,
}

/// Look up the override for a designated wave number.
pub fn special_wave(number: u32) -> Option<SpecialWave> {
    use EnemyKind::*;

    let (enemy_types, count, bonus_multiplier): (&'static [EnemyKind], u32, f64) = match number {
        5 => (&[Fast, Fast, Heavy, Boss], 4, 2.0),
        10 => (&[Shielded, Armored, Boss, Armored, Shielded], 10, 2.5),
        15 => (&[Swarm, Swarm, Swarm, Boss], 16, 3.0),
        20 => (&[Ultra, Boss, Boss], 3, 4.0),
        25 => (&[Boss, Ultra, Shielded, Armored], 12, 5.0),
        _ => return None,
    };
    Some(SpecialWave {
        enemy_types,
        count,
        bonus_multiplier,
    })
}

/// Generic wave size: `min(8 + (n-1)*3, 60)`.
pub fn enemy_count_for_wave(number: u32) -> u32 {
    let growth = number.saturating_sub(1).saturating_mul(WAVE_ENEMY_INCREASE);
    WAVE_BASE_ENEMY_COUNT
        .saturating_add(growth)
        .min(WAVE_ENEMY_HARD_CAP)
}

/// Generic roster: archetypes unlock as waves progress.
pub fn enemy_types_for_wave(number: u32) -> Vec<EnemyKind> {
    const UNLOCKS: [(u32, EnemyKind); 7] = [
        (1, EnemyKind::Basic),
        (3, EnemyKind::Fast),
        (6, EnemyKind::Heavy),
        (7, EnemyKind::Flying),
        (8, EnemyKind::Armored),
        (11, EnemyKind::Swarm),
        (12, EnemyKind::Shielded),
    ];
    UNLOCKS
        .iter()
        .filter(|(from, _)| number >= *from)
        .map(|(_, kind)| *kind)
        .collect()
}

/// Delay between consecutive spawns: `max(300, 1200 - (n-1)*40)` ms.
pub fn spawn_delay_for_wave(number: u32) -> f64 {
    let steps = number.saturating_sub(1) as f64;
    (WAVE_BASE_SPAWN_DELAY_MS - steps * WAVE_SPAWN_DELAY_STEP_MS).max(WAVE_MIN_SPAWN_DELAY_MS)
}

/// Resolved composition of a wave.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveComposition {
    pub enemy_types: Vec<EnemyKind>,
    pub total: u32,
    pub bonus_multiplier: f64,
    pub special: bool,
}

impl WaveComposition {
    pub fn for_wave(number: u32) -> Self {
        match special_wave(number) {
            Some(special) => Self {
                enemy_types: special.enemy_types.to_vec(),
                total: special.count,
                bonus_multiplier: special.bonus_multiplier,
                special: true,
            },
            None => Self {
                enemy_types: enemy_types_for_wave(number),
                total: enemy_count_for_wave(number),
                bonus_multiplier: 1.0,
                special: false,
            },
        }
    }

    /// The full spawn order. Empty when the roster is.
    pub fn sequence(&self) -> Vec<EnemyKind> {
        if self.enemy_types.is_empty() {
            return Vec::new();
        }
        (0..self.total as usize)
            .map(|i| self.enemy_types[i % self.enemy_types.len()])
            .collect()
    }
}

/// A wave that is preparing or spawning.
#[derive(Debug, Clone)]
pub struct ActiveWave {
    pub id: u32,
    pub number: u32,
    pub enemy_types: Vec<EnemyKind>,
    pub total: u32,
    pub spawn_delay_ms: f64,
    pub spawned: u32,
    /// Preparation delay elapsed.
    pub spawning: bool,
    pub special: bool,
    pub bonus_multiplier: f64,
}

impl ActiveWave {
    fn next_kind(&self) -> EnemyKind {
        if self.enemy_types.is_empty() {
            return EnemyKind::default();
        }
        self.enemy_types[self.spawned as usize % self.enemy_types.len()]
    }

    pub fn is_complete(&self) -> bool {
        self.spawned >= self.total
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum WaveEvent {
    BeginSpawning { wave_id: u32 },
    SpawnEnemy { wave_id: u32 },
}

/// Queue entry stamped with the session epoch it was scheduled in.
#[derive(Debug, Clone, Copy)]
struct ScheduledEvent {
    epoch: u32,
    event: WaveEvent,
}

/// Active waves plus their pending spawn events.
#[derive(Debug, Clone)]
pub struct WaveScheduler {
    active: Vec<ActiveWave>,
    queue: EventQueue<ScheduledEvent>,
    next_wave_id: u32,
    epoch: u32,
    final_wave: u32,
}

impl Default for WaveScheduler {
    fn default() -> Self {
        Self::new(FINAL_WAVE)
    }
}

impl WaveScheduler {
    pub fn new(final_wave: u32) -> Self {
        Self {
            active: Vec::new(),
            queue: EventQueue::new(),
            next_wave_id: 0,
            epoch: 0,
            final_wave,
        }
    }

    pub fn active(&self) -> &[ActiveWave] {
        &self.active
    }

    pub fn epoch(&self) -> u32 {
        self.epoch
    }

    pub fn final_wave(&self) -> u32 {
        self.final_wave
    }

    /// Scheduled events not yet drained, including stale ones.
    pub fn pending_events(&self) -> usize {
        self.queue.len()
    }

    pub fn is_active(&self, number: u32) -> bool {
        self.active.iter().any(|w| w.number == number)
    }

    /// Highest wave number that may be started now.
    pub fn next_wave_number(&self, counter: u32) -> u32 {
        self.active
            .iter()
            .map(|w| w.number + 1)
            .fold(counter, u32::max)
    }

    /// Validate and activate wave `number`. Spawning begins after the
    /// preparation delay.
    pub fn start_wave(
        &mut self,
        number: u32,
        counter: u32,
        now_ms: f64,
    ) -> Result<&ActiveWave, CommandError> {
        let next = self.next_wave_number(counter);
        if number == 0 || number > self.final_wave || number > next {
            return Err(CommandError::InvalidWave { wave: number, next });
        }
        if self.is_active(number) {
            return Err(CommandError::WaveAlreadyActive { wave: number });
        }

        let composition = WaveComposition::for_wave(number);
        let id = self.next_wave_id;
        self.next_wave_id += 1;

        self.queue.schedule(
            now_ms + WAVE_PREP_DELAY_MS,
            ScheduledEvent {
                epoch: self.epoch,
                event: WaveEvent::BeginSpawning { wave_id: id },
            },
        );
        self.active.push(ActiveWave {
            id,
            number,
            enemy_types: composition.enemy_types,
            total: composition.total,
            spawn_delay_ms: spawn_delay_for_wave(number),
            spawned: 0,
            spawning: false,
            special: composition.special,
            bonus_multiplier: composition.bonus_multiplier,
        });

        let index = self.active.len() - 1;
        Ok(&self.active[index])
    }

    /// Drop every active wave and start a new epoch. Events already queued
    /// stay in the queue but no longer match and are discarded when due.
    pub fn reset(&mut self) {
        self.active.clear();
        self.next_wave_id = 0;
        self.epoch = self.epoch.wrapping_add(1);
    }

    fn wave_index(&self, wave_id: u32) -> Option<usize> {
        self.active.iter().position(|w| w.id == wave_id)
    }
}

/// Per-tick inputs the spawner writes through.
pub struct SpawnContext<'a> {
    pub world: &'a mut World,
    pub path: &'a EnemyPath,
    pub rng: &'a mut ChaCha8Rng,
    pub ledger: &'a mut Ledger,
    pub events: &'a mut Vec<GameEvent>,
    pub next_enemy_id: &'a mut u32,
    pub difficulty: Difficulty,
}

/// Drain every event due by `now_ms`.
pub fn run(scheduler: &mut WaveScheduler, ctx: &mut SpawnContext<'_>, now_ms: f64) {
    while let Some((due_ms, scheduled)) = scheduler.queue.pop_due(now_ms) {
        if scheduled.epoch != scheduler.epoch {
            continue;
        }
        let wave_id = match scheduled.event {
            WaveEvent::BeginSpawning { wave_id } | WaveEvent::SpawnEnemy { wave_id } => wave_id,
        };
        let Some(index) = scheduler.wave_index(wave_id) else {
            continue;
        };

        if let WaveEvent::BeginSpawning { .. } = scheduled.event {
            let wave = &mut scheduler.active[index];
            wave.spawning = true;
            info!(wave = wave.number, total = wave.total, "wave spawning");
            ctx.events.push(GameEvent::WaveSpawning {
                wave_id,
                wave_number: wave.number,
            });
        }

        spawn_next(scheduler, index, ctx, due_ms);
    }
}

/// Spawn the wave's next enemy, then either complete the wave or schedule
/// the following spawn one delay after this one was due.
fn spawn_next(scheduler: &mut WaveScheduler, index: usize, ctx: &mut SpawnContext<'_>, due_ms: f64) {
    let wave = &mut scheduler.active[index];

    if !wave.is_complete() {
        let kind = wave.next_kind();
        let lane_offset = ctx.rng.gen_range(-SPAWN_JITTER..=SPAWN_JITTER);
        let enemy_id = EnemyId(*ctx.next_enemy_id);
        *ctx.next_enemy_id += 1;

        world_setup::spawn_enemy(
            ctx.world,
            ctx.path,
            enemy_id,
            kind,
            wave.id,
            wave.number,
            lane_offset,
        );
        wave.spawned += 1;

        debug!(%enemy_id, ?kind, wave = wave.number, "enemy spawned");
        ctx.events.push(GameEvent::EnemySpawned {
            enemy_id,
            kind,
            wave_number: wave.number,
        });
    }

    if wave.is_complete() {
        let wave = scheduler.active.remove(index);
        let bonus = wave_bonus(wave.number, wave.bonus_multiplier, ctx.difficulty);
        let advanced = ctx.ledger.record_wave_completed(wave.number, bonus);

        info!(
            wave = wave.number,
            bonus,
            counter = ctx.ledger.wave,
            advanced,
            "wave completed"
        );
        ctx.events.push(GameEvent::WaveCompleted {
            wave_id: wave.id,
            wave_number: wave.number,
            bonus,
        });
    } else {
        let next_due = due_ms + wave.spawn_delay_ms;
        let epoch = scheduler.epoch;
        scheduler.queue.schedule(
            next_due,
            ScheduledEvent {
                epoch,
                event: WaveEvent::SpawnEnemy { wave_id: wave.id },
            },
        );
    }
}
