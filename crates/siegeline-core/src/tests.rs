//! Tests for the core vocabulary: profiles, scaling, path geometry and serde shapes.

use crate::commands::{CommandOutcome, PlayerCommand};
use crate::components::TowerId;
use crate::constants::*;
use crate::enums::*;
use crate::error::CommandError;
use crate::events::GameEvent;
use crate::path::{default_path, EnemyPath, PathError};
use crate::profiles::*;
use crate::state::GameStateSnapshot;
use crate::types::{Bounds, Position, SimTime, Velocity};

// ---- Type tags ----

#[test]
fn test_unknown_tags_fall_back_to_defaults() {
    assert_eq!(EnemyKind::from_tag("dragon"), EnemyKind::Basic);
    assert_eq!(TowerKind::from_tag("catapult"), TowerKind::Basic);
    assert_eq!(ProjectileKind::from_tag(""), ProjectileKind::Bullet);
}

#[test]
fn test_enemy_tags_round_trip() {
    for kind in EnemyKind::ALL {
        assert_eq!(EnemyKind::from_tag(kind.tag()), kind);
    }
    for kind in TowerKind::ALL {
        assert_eq!(TowerKind::from_tag(kind.tag()), kind);
    }
}

#[test]
fn test_only_laser_hits_flying() {
    let flyers: Vec<TowerKind> = TowerKind::ALL
        .into_iter()
        .filter(|k| k.can_hit_flying())
        .collect();
    assert_eq!(flyers, vec![TowerKind::Laser]);
}

// ---- Profiles ----

#[test]
fn test_basic_and_shielded_profiles() {
    let basic = enemy_profile(EnemyKind::Basic);
    assert_eq!(basic.health, 150.0);
    assert_eq!(basic.armor, 0.0);
    assert_eq!(basic.shield, 0.0);

    let shielded = enemy_profile(EnemyKind::Shielded);
    assert_eq!(shielded.health, 350.0);
    assert_eq!(shielded.shield, 200.0);
    assert!(shielded.shield_regen_delay_ms > 0.0);
}

#[test]
fn test_boss_class_and_flying_flags() {
    for kind in EnemyKind::ALL {
        let profile = enemy_profile(kind);
        assert_eq!(
            profile.boss,
            matches!(kind, EnemyKind::Boss | EnemyKind::Ultra),
            "{kind:?} boss flag"
        );
        assert_eq!(profile.flying, kind == EnemyKind::Flying, "{kind:?} flying flag");
        assert!((0.0..1.0).contains(&profile.armor), "{kind:?} armor out of range");
    }
}

#[test]
fn test_tower_profiles_fire_their_projectiles() {
    assert_eq!(tower_profile(TowerKind::Basic).projectile, ProjectileKind::Bullet);
    assert_eq!(tower_profile(TowerKind::Cannon).projectile, ProjectileKind::Cannonball);
    assert_eq!(tower_profile(TowerKind::Laser).projectile, ProjectileKind::Laser);
    assert_eq!(tower_profile(TowerKind::Ice).projectile, ProjectileKind::Ice);
    assert!(tower_profile(TowerKind::Cannon).explosion_radius > 0.0);
    assert!(tower_profile(TowerKind::Ice).slow_amount > 0.0);
}

#[test]
fn test_projectile_profiles() {
    let laser = projectile_profile(ProjectileKind::Laser);
    assert!(laser.instant && laser.penetrating);
    assert!(laser.max_distance.is_none());

    let cannonball = projectile_profile(ProjectileKind::Cannonball);
    assert!(cannonball.explosive && cannonball.gravity);

    let missile = projectile_profile(ProjectileKind::Missile);
    assert!(missile.homing && missile.explosive);
    assert_eq!(missile.damage_type, DamageType::Explosive);
}

// ---- Wave scaling ----

#[test]
fn test_speed_multiplier_known_values() {
    assert!((speed_multiplier(1) - 1.0).abs() < 1e-12);
    assert!((speed_multiplier(5) - 2.0).abs() < 1e-12);
    // 1 + 8*0.25 + 4^1.5*0.1 = 3.8
    assert!((speed_multiplier(9) - 3.8).abs() < 1e-9);
    // Past the cap.
    assert_eq!(speed_multiplier(16), SPEED_MULTIPLIER_CAP);
}

#[test]
fn test_scaled_speed_floors_and_clamps() {
    assert_eq!(scaled_speed(50.0, 1), 50.0);
    assert_eq!(scaled_speed(25.0, 5), 50.0);
    assert_eq!(scaled_speed(4.0, 1), MIN_ENEMY_SPEED);
    // 33 * 3.8 = 125.4 floors to 125
    assert_eq!(scaled_speed(33.0, 9), 125.0);
    // 10 * 8.0 at the cap
    assert_eq!(scaled_speed(10.0, 30), 80.0);
}

#[test]
fn test_speed_scaling_bounds_hold_for_all_waves() {
    for wave in 1..=200 {
        let multiplier = speed_multiplier(wave);
        assert!(multiplier <= SPEED_MULTIPLIER_CAP, "wave {wave}: {multiplier}");
        assert!(multiplier >= 1.0);
        for kind in EnemyKind::ALL {
            let speed = scaled_speed(enemy_profile(kind).speed, wave);
            assert!(speed >= MIN_ENEMY_SPEED, "wave {wave} {kind:?}: {speed}");
            assert!(speed <= enemy_profile(kind).speed * SPEED_MULTIPLIER_CAP);
        }
    }
    // Wave 0 is treated as wave 1.
    assert_eq!(speed_multiplier(0), 1.0);
}

#[test]
fn test_scaled_health() {
    assert_eq!(scaled_health(150.0, 1), 150.0);
    // 150 * 1.3 = 195
    assert_eq!(scaled_health(150.0, 3), 195.0);
    // 90 * 1.15 = 103.5 floors
    assert_eq!(scaled_health(90.0, 2), 103.0);
}

// ---- Path ----

#[test]
fn test_default_path_geometry() {
    let path = default_path();
    assert_eq!(path.segment_count(), 7);
    assert!((path.total_length() - 1500.0).abs() < 1e-9);
    assert_eq!(path.start(), Position::planar(0.0, 100.0));
    assert_eq!(path.end(), Position::planar(800.0, 200.0));
}

#[test]
fn test_path_advance_within_and_across_segments() {
    let path = default_path();

    let step = path.advance(0, 0.0, 50.0);
    assert_eq!(step.segment, 0);
    assert!((step.progress - 0.25).abs() < 1e-12);
    assert!(!step.finished);

    // 100 left on segment 0, 50 more onto the 200-long segment 1.
    let step = path.advance(0, 0.5, 150.0);
    assert_eq!(step.segment, 1);
    assert!((step.progress - 0.25).abs() < 1e-12);

    let step = path.advance(6, 0.5, 60.0);
    assert!(step.finished);
}

#[test]
fn test_path_point_with_lane_offset() {
    let path = default_path();
    let p = path.point_at(0, 0.25, 0.0);
    assert_eq!(p, Position::planar(50.0, 100.0));

    // Segment 0 heads +x, so the left-hand normal is +y.
    let p = path.point_at(0, 0.25, 5.0);
    assert!((p.x - 50.0).abs() < 1e-12);
    assert!((p.y - 105.0).abs() < 1e-12);
}

#[test]
fn test_path_distance_to_point() {
    let path = default_path();
    assert!((path.distance_to(&Position::planar(100.0, 130.0)) - 30.0).abs() < 1e-9);
    assert!(path.distance_to(&Position::planar(200.0, 200.0)) < 1e-9);
}

#[test]
fn test_path_rejects_degenerate_definitions() {
    assert_eq!(
        EnemyPath::new(vec![Position::planar(0.0, 0.0)]),
        Err(PathError::TooFewWaypoints(1))
    );
    assert_eq!(
        EnemyPath::new(vec![Position::planar(0.0, 0.0), Position::planar(f64::NAN, 1.0)]),
        Err(PathError::NonFinite(1))
    );

    let json = r#"[{"x":0.0,"y":0.0,"z":0.0}]"#;
    assert!(serde_json::from_str::<EnemyPath>(json).is_err());
}

#[test]
fn test_path_serde_as_waypoint_list() {
    let path = default_path();
    let json = serde_json::to_string(&path).unwrap();
    let back: EnemyPath = serde_json::from_str(&json).unwrap();
    assert_eq!(back, path);
    assert!(json.starts_with('['));
}

// ---- Geometry ----

#[test]
fn test_position_range_ignores_height() {
    let a = Position::new(0.0, 0.0, 0.0);
    let b = Position::new(3.0, 4.0, 50.0);
    assert!((a.range_to(&b) - 5.0).abs() < 1e-10);
}

#[test]
fn test_velocity_along_direction() {
    let v = Velocity::along(glam::DVec2::new(0.6, 0.8), 10.0);
    assert!((v.speed() - 10.0).abs() < 1e-10);
    assert!((v.x - 6.0).abs() < 1e-10);
}

#[test]
fn test_bounds_margin() {
    let bounds = Bounds::new(100.0, 50.0);
    assert!(bounds.contains(&Position::planar(100.0, 50.0), 0.0));
    assert!(!bounds.contains(&Position::planar(-5.0, 10.0), 0.0));
    assert!(bounds.contains(&Position::planar(-5.0, 10.0), 10.0));
}

#[test]
fn test_sim_time_advance() {
    let mut time = SimTime::default();
    time.advance(16.0);
    time.advance(17.5);
    assert_eq!(time.tick, 2);
    assert!((time.elapsed_ms - 33.5).abs() < 1e-12);
}

// ---- Serde shapes ----

#[test]
fn test_player_command_serde() {
    let commands = vec![
        PlayerCommand::PlaceTower {
            kind: TowerKind::Cannon,
            x: 120.0,
            y: 40.0,
        },
        PlayerCommand::SellTower {
            tower_id: TowerId(3),
        },
        PlayerCommand::UpgradeTower {
            tower_id: TowerId(3),
        },
        PlayerCommand::StartWave { wave_number: 2 },
        PlayerCommand::SetTimeScale { scale: 2.0 },
        PlayerCommand::Pause,
        PlayerCommand::Resume,
        PlayerCommand::Restart,
    ];
    for cmd in &commands {
        let json = serde_json::to_string(cmd).unwrap();
        let back: PlayerCommand = serde_json::from_str(&json).unwrap();
        assert_eq!(*cmd, back);
    }
}

#[test]
fn test_command_from_ui_json() {
    let json = r#"{"type":"PlaceTower","kind":"Ice","x":10.0,"y":20.0}"#;
    let cmd: PlayerCommand = serde_json::from_str(json).unwrap();
    assert_eq!(
        cmd,
        PlayerCommand::PlaceTower {
            kind: TowerKind::Ice,
            x: 10.0,
            y: 20.0
        }
    );
}

#[test]
fn test_command_error_messages() {
    let err = CommandError::InsufficientFunds {
        needed: 120,
        available: 80,
    };
    assert_eq!(err.to_string(), "not enough money: need 120, have 80");

    let err = CommandError::MaxLevel {
        tower: TowerId(4),
        level: 5,
    };
    assert_eq!(err.to_string(), "tower T4 is already at max level 5");
}

#[test]
fn test_event_and_outcome_serde() {
    let event = GameEvent::CommandRejected {
        reason: CommandError::GameNotRunning,
    };
    let json = serde_json::to_string(&event).unwrap();
    let back: GameEvent = serde_json::from_str(&json).unwrap();
    assert_eq!(event, back);

    let outcome = CommandOutcome::TowerSold {
        tower_id: TowerId(1),
        refund: 35,
    };
    let json = serde_json::to_string(&outcome).unwrap();
    assert_eq!(serde_json::from_str::<CommandOutcome>(&json).unwrap(), outcome);
}

#[test]
fn test_snapshot_serde() {
    let snapshot = GameStateSnapshot::default();
    let json = serde_json::to_string(&snapshot).unwrap();
    let back: GameStateSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot.time.tick, back.time.tick);
    assert_eq!(snapshot.phase, back.phase);
    assert!(
        json.len() < 1024,
        "Empty snapshot should be <1KB, was {} bytes",
        json.len()
    );
}

#[test]
fn test_difficulty_bonus_multiplier() {
    assert!(Difficulty::Easy.bonus_multiplier() > Difficulty::Normal.bonus_multiplier());
    assert!(Difficulty::Hard.bonus_multiplier() < Difficulty::Normal.bonus_multiplier());
    assert_eq!(Difficulty::default(), Difficulty::Normal);
}
