//! Autopilot: a simple scripted player for headless demo games.
//!
//! Reads snapshots and answers with player commands. Builds towers on
//! precomputed sites beside the path in a fixed kind rotation, upgrades the
//! weakest tower when every site is taken, and starts the next wave as soon
//! as nothing is spawning.

use glam::DVec2;

use siegeline_core::commands::PlayerCommand;
use siegeline_core::constants::{PATH_CLEARANCE, TOWER_RADIUS};
use siegeline_core::enums::{GamePhase, TowerKind};
use siegeline_core::path::perpendicular;
use siegeline_core::profiles::tower_profile;
use siegeline_core::state::GameStateSnapshot;
use siegeline_core::types::Position;
use siegeline_sim::engine::SimConfig;

/// How far beside the path centreline sites are placed.
const SITE_OFFSET: f64 = 60.0;

/// Fractions along each segment where sites are tried.
const SITE_STOPS: [f64; 3] = [0.25, 0.5, 0.75];

const BUILD_ORDER: [TowerKind; 4] = [
    TowerKind::Basic,
    TowerKind::Cannon,
    TowerKind::Ice,
    TowerKind::Laser,
];

#[derive(Debug, Clone)]
pub struct Autopilot {
    sites: Vec<Position>,
    /// Tick of the snapshot the last commands were planned from. Nothing new
    /// is planned until the engine has moved past it.
    pending_tick: Option<u64>,
}

impl Autopilot {
    pub fn new(config: &SimConfig) -> Self {
        Self {
            sites: build_sites(config),
            pending_tick: None,
        }
    }

    /// Candidate tower sites, nearest the spawn first.
    pub fn sites(&self) -> &[Position] {
        &self.sites
    }

    /// Decide this frame's commands.
    pub fn plan(&mut self, snapshot: &GameStateSnapshot) -> Vec<PlayerCommand> {
        if snapshot.phase != GamePhase::Playing {
            return Vec::new();
        }
        if let Some(tick) = self.pending_tick {
            if snapshot.time.tick <= tick {
                return Vec::new();
            }
            self.pending_tick = None;
        }

        let mut commands = Vec::new();
        if snapshot.waves.is_empty() {
            commands.push(PlayerCommand::StartWave {
                wave_number: snapshot.economy.wave,
            });
        }
        if let Some(command) = self.build_or_upgrade(snapshot) {
            commands.push(command);
        }

        if !commands.is_empty() {
            self.pending_tick = Some(snapshot.time.tick);
        }
        commands
    }

    fn build_or_upgrade(&self, snapshot: &GameStateSnapshot) -> Option<PlayerCommand> {
        let money = snapshot.economy.money;
        let kind = BUILD_ORDER[snapshot.towers.len() % BUILD_ORDER.len()];

        let free_site = self.sites.iter().find(|site| {
            snapshot
                .towers
                .iter()
                .all(|t| t.position.range_to(site) >= TOWER_RADIUS * 2.0)
        });

        match free_site {
            Some(site) if tower_profile(kind).cost <= money => Some(PlayerCommand::PlaceTower {
                kind,
                x: site.x,
                y: site.y,
            }),
            Some(_) => None,
            None => snapshot
                .towers
                .iter()
                .filter(|t| t.upgrade_cost.is_some_and(|cost| cost <= money))
                .min_by_key(|t| (t.level, t.tower_id))
                .map(|t| PlayerCommand::UpgradeTower {
                    tower_id: t.tower_id,
                }),
        }
    }
}

/// Sites on both sides of every segment that the engine would accept:
/// inside the bounds, clear of the path, and clear of each other.
fn build_sites(config: &SimConfig) -> Vec<Position> {
    let waypoints = config.path.waypoints();
    let mut sites: Vec<Position> = Vec::new();

    for pair in waypoints.windows(2) {
        let (a, b) = (pair[0].xy(), pair[1].xy());
        let normal = perpendicular((b - a).normalize_or_zero());
        if normal == DVec2::ZERO {
            continue;
        }
        for t in SITE_STOPS {
            for side in [1.0, -1.0] {
                let site = Position::from_xy(a.lerp(b, t) + normal * side * SITE_OFFSET);
                let valid = config.bounds.contains(&site, -TOWER_RADIUS)
                    && config.path.distance_to(&site) >= PATH_CLEARANCE
                    && sites
                        .iter()
                        .all(|s| s.range_to(&site) >= TOWER_RADIUS * 2.0);
                if valid {
                    sites.push(site);
                }
            }
        }
    }
    sites
}

#[cfg(test)]
mod tests {
    use super::*;
    use siegeline_core::events::GameEvent;
    use siegeline_sim::engine::SimulationEngine;

    #[test]
    fn test_sites_are_buildable() {
        let config = SimConfig {
            starting_money: 1_000_000,
            ..Default::default()
        };
        let pilot = Autopilot::new(&config);
        assert!(pilot.sites().len() >= 8);

        let mut engine = SimulationEngine::new(config);
        for site in pilot.sites() {
            engine
                .execute(PlayerCommand::PlaceTower {
                    kind: TowerKind::Basic,
                    x: site.x,
                    y: site.y,
                })
                .unwrap();
        }
    }

    #[test]
    fn test_first_plan_starts_wave_and_builds() {
        let config = SimConfig::default();
        let mut pilot = Autopilot::new(&config);
        let mut engine = SimulationEngine::new(config);

        let snapshot = engine.tick(16.0);
        let commands = pilot.plan(&snapshot);
        assert_eq!(commands.len(), 2);
        assert_eq!(commands[0], PlayerCommand::StartWave { wave_number: 1 });
        assert!(matches!(
            commands[1],
            PlayerCommand::PlaceTower {
                kind: TowerKind::Basic,
                ..
            }
        ));

        // Same snapshot again: still waiting on the engine.
        assert!(pilot.plan(&snapshot).is_empty());
    }

    #[test]
    fn test_idle_when_paused() {
        let config = SimConfig::default();
        let mut pilot = Autopilot::new(&config);
        let mut engine = SimulationEngine::new(config);
        engine.queue_command(PlayerCommand::Pause);

        let snapshot = engine.tick(16.0);
        assert!(pilot.plan(&snapshot).is_empty());
    }

    #[test]
    fn test_headless_game_progresses_without_rejections() {
        let config = SimConfig {
            seed: 3,
            starting_lives: 1_000,
            ..Default::default()
        };
        let mut pilot = Autopilot::new(&config);
        let mut engine = SimulationEngine::new(config);

        let mut rejections = 0;
        let mut snapshot = engine.tick(16.0);
        for _ in 0..4000 {
            engine.queue_commands(pilot.plan(&snapshot));
            snapshot = engine.tick(50.0);
            rejections += snapshot
                .events
                .iter()
                .filter(|e| matches!(e, GameEvent::CommandRejected { .. }))
                .count();
        }

        let economy = engine.economy();
        assert_eq!(rejections, 0);
        assert!(economy.towers_built >= 2);
        assert!(economy.waves_completed >= 3);
        assert!(economy.enemies_killed > 0);
    }
}
