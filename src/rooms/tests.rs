//! Rooms domain: tests for planning, repair, spawning, gates and the room lifecycle.

use std::collections::HashMap;
use std::time::Duration;

use avian2d::prelude::{CollidingEntities, CollisionStart};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use super::*;
use crate::combat::{CombatPlugin, DamageEvent, Enemy, EnemyIdentity};
use crate::content::{
    AutoRepairDefaults, ContentRegistry, DelayRangeDef, EnemyDef, GateDef, GateTemplateDef,
    PointDef, RoomBlueprintDef, RunDefaults, SizeDef, SpawnEntryDef, SpawnProfileDef, ThemeDef,
};
use crate::core::{CorePlugin, GameState, RoomGeneration, RunConfig, RunRng, ScriptedRng};
use crate::movement::Player;

// -----------------------------------------------------------------------------
// Test content
// -----------------------------------------------------------------------------

fn blueprint(id: &str, profile: Option<&str>) -> RoomBlueprintDef {
    RoomBlueprintDef {
        id: id.to_string(),
        name: id.to_string(),
        size: SizeDef::new(800.0, 600.0),
        player_spawn: Some(PointDef::new(0.0, -200.0)),
        exit_anchor: Some(PointDef::new(0.0, 250.0)),
        enemy_spawns: vec![PointDef::new(-200.0, 100.0), PointDef::new(200.0, 100.0)],
        exit_gate: None,
        spawn_profile_id: profile.map(str::to_string),
    }
}

fn theme(id: &str, room_ids: &[&str]) -> ThemeDef {
    ThemeDef {
        id: id.to_string(),
        name: id.to_string(),
        room_ids: room_ids.iter().map(|r| r.to_string()).collect(),
    }
}

fn enemy(id: &str) -> EnemyDef {
    EnemyDef {
        id: id.to_string(),
        name: id.to_string(),
        health: 10.0,
        size: 20.0,
        color: crate::content::ColorDef {
            r: 1.0,
            g: 0.0,
            b: 0.0,
        },
    }
}

fn entry(enemy_id: &str, min_count: u32, max_count: u32) -> SpawnEntryDef {
    SpawnEntryDef {
        enemy_id: enemy_id.to_string(),
        min_count,
        max_count,
    }
}

fn profile(id: &str, entries: Vec<SpawnEntryDef>) -> SpawnProfileDef {
    SpawnProfileDef {
        id: id.to_string(),
        entries,
        gradual: false,
        initial_delay: 0.0,
        per_spawn_delay: DelayRangeDef::default(),
    }
}

fn trickle_profile() -> SpawnProfileDef {
    SpawnProfileDef {
        gradual: true,
        initial_delay: 0.5,
        per_spawn_delay: DelayRangeDef { min: 0.4, max: 1.0 },
        ..profile("trickle", vec![entry("enemy_y", 1, 3)])
    }
}

fn test_registry() -> ContentRegistry {
    let bare = RoomBlueprintDef {
        player_spawn: None,
        exit_anchor: None,
        enemy_spawns: Vec::new(),
        ..blueprint("bare_room", Some("pair"))
    };
    let gated = RoomBlueprintDef {
        exit_gate: Some(GateDef {
            position: PointDef::new(100.0, 250.0),
            size: SizeDef::new(50.0, 20.0),
        }),
        ..blueprint("gated_room", None)
    };
    let rooms = vec![
        blueprint("quiet_room", None),
        blueprint("pair_room", Some("pair")),
        blueprint("trickle_room", Some("trickle")),
        blueprint("zero_room", Some("none_drawn")),
        bare,
        gated,
    ];

    ContentRegistry {
        themes: vec![
            theme("t_quiet", &["quiet_room"]),
            theme("t_pair", &["pair_room"]),
            theme("t_trickle", &["trickle_room"]),
            theme("t_zero", &["zero_room"]),
            theme("t_bare", &["bare_room"]),
            theme("t_gated", &["gated_room"]),
            theme("t_mixed", &["quiet_room", "pair_room", "trickle_room"]),
            theme("t_empty", &[]),
            theme("t_ghost", &["ghost_room"]),
        ],
        rooms: rooms.into_iter().map(|r| (r.id.clone(), r)).collect(),
        spawn_profiles: [
            profile("pair", vec![entry("enemy_x", 2, 2)]),
            trickle_profile(),
            profile("none_drawn", vec![entry("enemy_x", 0, 0)]),
        ]
        .into_iter()
        .map(|p| (p.id.clone(), p))
        .collect::<HashMap<_, _>>(),
        enemies: [enemy("enemy_x"), enemy("enemy_y")]
            .into_iter()
            .map(|e| (e.id.clone(), e))
            .collect(),
    }
}

fn themes<'a>(registry: &'a ContentRegistry, ids: &[&str]) -> Vec<&'a ThemeDef> {
    ids.iter().filter_map(|id| registry.theme(id)).collect()
}

// -----------------------------------------------------------------------------
// RunPlanBuilder tests
// -----------------------------------------------------------------------------

#[test]
fn test_plan_is_deterministic_for_a_seed() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_mixed", "t_pair"]);
    let builder = RunPlanBuilder::new(&registry);

    let first = builder.build(1234, 10, 3, &themes);
    let second = builder.build(1234, 10, 3, &themes);

    assert_eq!(first, second);
    assert_eq!(first.seed, 1234);
}

#[test]
fn test_plan_length_matches_request_with_nonempty_pools() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_mixed", "t_pair"]);
    let plan = RunPlanBuilder::new(&registry).build(99, 7, 3, &themes);

    assert_eq!(plan.len(), 7);
    assert!(!plan.is_truncated());

    let theme_ids: Vec<&str> = plan.rooms().iter().map(|r| r.theme_id.as_str()).collect();
    assert_eq!(
        theme_ids,
        vec!["t_mixed", "t_mixed", "t_mixed", "t_pair", "t_pair", "t_pair", "t_pair"]
    );
    for (slot, room) in plan.rooms().iter().enumerate() {
        assert_eq!(room.slot, slot);
    }
}

#[test]
fn test_plan_short_run_stays_in_first_block() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_mixed"]);
    let plan = RunPlanBuilder::new(&registry).build(7, 3, 5, &themes);

    assert_eq!(plan.len(), 3);
    let pool = &registry.theme("t_mixed").unwrap().room_ids;
    for room in plan.rooms() {
        assert_eq!(room.theme_id, "t_mixed");
        assert!(room.pool_index < pool.len());
        assert_eq!(pool[room.pool_index], room.blueprint_id);
    }
}

#[test]
fn test_plan_draws_pool_indices_from_rng() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_mixed"]);
    let mut rng = ScriptedRng::new(&[2, 0, 1], &[]);
    let plan = RunPlanBuilder::new(&registry).build_with(&mut rng, 5, 3, 3, &themes);

    let ids: Vec<&str> = plan.rooms().iter().map(|r| r.blueprint_id.as_str()).collect();
    assert_eq!(ids, vec!["trickle_room", "quiet_room", "pair_room"]);
}

#[test]
fn test_plan_skips_slots_with_empty_pool() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_quiet", "t_empty"]);
    let plan = RunPlanBuilder::new(&registry).build(3, 4, 2, &themes);

    assert_eq!(plan.requested, 4);
    assert_eq!(plan.len(), 2);
    assert!(plan.is_truncated());
    let slots: Vec<usize> = plan.rooms().iter().map(|r| r.slot).collect();
    assert_eq!(slots, vec![0, 1]);
}

#[test]
fn test_plan_skips_unknown_blueprints() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_ghost", "t_quiet"]);
    let plan = RunPlanBuilder::new(&registry).build(3, 2, 1, &themes);

    assert_eq!(plan.len(), 1);
    assert_eq!(plan.get(0).unwrap().blueprint_id, "quiet_room");
    assert_eq!(plan.get(0).unwrap().slot, 1);
}

#[test]
fn test_plan_zero_rooms_per_theme_is_one() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_quiet", "t_pair"]);
    let plan = RunPlanBuilder::new(&registry).build(3, 3, 0, &themes);

    let theme_ids: Vec<&str> = plan.rooms().iter().map(|r| r.theme_id.as_str()).collect();
    assert_eq!(theme_ids, vec!["t_quiet", "t_pair", "t_pair"]);
}

#[test]
fn test_plan_without_themes_is_empty() {
    let registry = test_registry();
    let plan = RunPlanBuilder::new(&registry).build(3, 5, 2, &[]);
    assert!(plan.is_empty());
    assert!(plan.is_truncated());
}

#[test]
fn test_plan_zero_seed_draws_nonzero_seed() {
    let registry = test_registry();
    let themes = themes(&registry, &["t_mixed"]);
    let plan = RunPlanBuilder::new(&registry).build(0, 2, 2, &themes);
    assert_ne!(plan.seed, 0);
    assert_eq!(plan.len(), 2);
}

// -----------------------------------------------------------------------------
// RoomValidator tests
// -----------------------------------------------------------------------------

#[test]
fn test_validator_leaves_complete_layout_alone() {
    let settings = AutoRepairDefaults::default();
    let mut layout = RoomLayout::from_blueprint(&blueprint("quiet_room", None));
    let before = layout.clone();

    let warnings = RoomValidator::new(&settings).repair(&mut layout);

    assert!(warnings.is_empty());
    assert_eq!(layout, before);
}

#[test]
fn test_validator_synthesizes_missing_anchors() {
    let settings = AutoRepairDefaults::default();
    let registry = test_registry();
    let mut layout = RoomLayout::from_blueprint(&registry.rooms["bare_room"]);
    assert_eq!(RoomValidator::missing(&layout).len(), 3);

    let warnings = RoomValidator::new(&settings).repair(&mut layout);

    assert_eq!(
        warnings,
        vec![
            RepairWarning::PlayerSpawnAtCenter,
            RepairWarning::ExitAnchorSynthesized {
                position: Vec2::new(0.0, 220.0)
            },
            RepairWarning::EnemySpawnsSynthesized { count: 4 },
        ]
    );
    assert_eq!(layout.player_spawn, Some(Vec2::ZERO));
    assert_eq!(layout.exit_anchor, Some(Vec2::new(0.0, 220.0)));
    assert_eq!(layout.enemy_spawns.len(), 4);
    for point in &layout.enemy_spawns {
        assert!((point.length() - 180.0).abs() < 0.01);
    }
    assert!((layout.enemy_spawns[0] - Vec2::new(180.0, 0.0)).length() < 0.01);
    assert!(RoomValidator::missing(&layout).is_empty());
}

#[test]
fn test_validator_keeps_synthesized_points_inside_small_rooms() {
    let settings = AutoRepairDefaults::default();
    let mut layout = RoomLayout {
        size: Vec2::new(200.0, 200.0),
        player_spawn: Some(Vec2::ZERO),
        exit_anchor: None,
        enemy_spawns: Vec::new(),
    };

    RoomValidator::new(&settings).repair(&mut layout);

    // Inner half extent is 100 - 48 = 52
    assert_eq!(layout.exit_anchor, Some(Vec2::new(0.0, 52.0)));
    for point in &layout.enemy_spawns {
        assert!((point.length() - 52.0).abs() < 0.01);
    }
}

#[test]
fn test_validator_disabled_only_reports() {
    let settings = AutoRepairDefaults {
        enabled: false,
        ..AutoRepairDefaults::default()
    };
    let registry = test_registry();
    let mut layout = RoomLayout::from_blueprint(&registry.rooms["bare_room"]);
    let before = layout.clone();

    let warnings = RoomValidator::new(&settings).repair(&mut layout);

    assert_eq!(layout, before);
    assert_eq!(
        warnings,
        vec![
            RepairWarning::LeftMissing {
                anchor: Anchor::PlayerSpawn
            },
            RepairWarning::LeftMissing {
                anchor: Anchor::ExitAnchor
            },
            RepairWarning::LeftMissing {
                anchor: Anchor::EnemySpawns
            },
        ]
    );
    assert_eq!(
        warnings[1].to_string(),
        "missing exit anchor and auto-repair is disabled"
    );
}

// -----------------------------------------------------------------------------
// SpawnSequence tests
// -----------------------------------------------------------------------------

#[test]
fn test_spawn_sequence_fixed_count() {
    let mut rng = RunRng::for_spawns(11);
    let mut sequence = SpawnSequence::resolve(&profile("pair", vec![entry("x", 2, 2)]), &mut rng);

    assert_eq!(sequence.timing(), SpawnTiming::Instant);
    assert_eq!(sequence.len(), 2);
    assert_eq!(sequence.drain_all(), vec!["x", "x"]);
    assert!(sequence.is_finished());
}

#[test]
fn test_spawn_sequence_queues_entries_in_order() {
    let mut rng = ScriptedRng::new(&[3, 1], &[]);
    let mut sequence = SpawnSequence::resolve(
        &profile("mix", vec![entry("x", 1, 3), entry("y", 0, 2)]),
        &mut rng,
    );

    assert_eq!(sequence.drain_all(), vec!["x", "x", "x", "y"]);
}

#[test]
fn test_spawn_sequence_zero_yield_is_empty() {
    let mut rng = RunRng::for_spawns(11);
    let empty_entries = SpawnSequence::resolve(&profile("none", Vec::new()), &mut rng);
    let zero_counts = SpawnSequence::resolve(&profile("zero", vec![entry("x", 0, 0)]), &mut rng);

    assert!(empty_entries.is_empty());
    assert!(zero_counts.is_empty());
}

#[test]
fn test_instant_sequence_tick_releases_everything() {
    let mut rng = RunRng::for_spawns(1);
    let mut sequence = SpawnSequence::resolve(&profile("pair", vec![entry("x", 2, 2)]), &mut rng);
    assert_eq!(sequence.tick(0.0, &mut rng).len(), 2);
    assert!(sequence.tick(1.0, &mut rng).is_empty());
}

#[test]
fn test_gradual_sequence_waits_initial_then_per_spawn_delay() {
    let mut rng = ScriptedRng::new(&[2], &[0.75]);
    let mut sequence = SpawnSequence::resolve(&trickle_profile(), &mut rng);
    assert_eq!(sequence.len(), 2);

    assert!(sequence.tick(0.25, &mut rng).is_empty());
    assert_eq!(sequence.tick(0.25, &mut rng), vec!["enemy_y"]);
    assert!(sequence.tick(0.5, &mut rng).is_empty());
    assert_eq!(sequence.tick(0.5, &mut rng), vec!["enemy_y"]);
    assert!(sequence.is_finished());
    assert!(sequence.tick(5.0, &mut rng).is_empty());
    assert!(rng.floats.is_empty());
}

#[test]
fn test_gradual_sequence_releases_one_per_tick() {
    let mut rng = ScriptedRng::new(&[3], &[0.5, 0.5]);
    let mut sequence = SpawnSequence::resolve(&trickle_profile(), &mut rng);

    // a long frame releases one enemy and restarts the full delay
    assert_eq!(sequence.tick(1.75, &mut rng), vec!["enemy_y"]);
    assert!(sequence.tick(0.25, &mut rng).is_empty());
    assert_eq!(sequence.tick(1.75, &mut rng), vec!["enemy_y"]);
    assert_eq!(sequence.len(), 1);
    assert_eq!(sequence.tick(1.75, &mut rng), vec!["enemy_y"]);
    assert!(sequence.is_finished());
}

#[test]
fn test_gradual_spawn_times_respect_delays() {
    let dt = 0.01_f32;
    for step_size in [1_u32, 7, 40] {
        for seed in 1..=20 {
            let mut rng = RunRng::for_spawns(seed);
            let mut sequence = SpawnSequence::resolve(&trickle_profile(), &mut rng);
            let count = sequence.len();
            assert!((1..=3).contains(&count), "seed {} drew {}", seed, count);

            // spawn times in units of dt
            let mut steps = Vec::new();
            let mut step = 0_u32;
            while !sequence.is_finished() && step < 10_000 {
                step += step_size;
                let due = sequence.tick(dt * step_size as f32, &mut rng);
                assert!(due.len() <= 1, "{} enemies in one tick", due.len());
                if !due.is_empty() {
                    steps.push(step);
                }
            }

            assert_eq!(steps.len(), count);
            assert!(steps[0] >= 50, "first spawn at step {}", steps[0]);
            for pair in steps.windows(2) {
                let gap = pair[1] - pair[0];
                assert!(gap >= 40, "gap of {} steps", gap);
                assert!(gap <= 100 + step_size, "gap of {} steps", gap);
            }
        }
    }
}

#[test]
fn test_pick_spawn_point() {
    let points = [Vec2::new(1.0, 0.0), Vec2::new(2.0, 0.0)];
    let mut rng = ScriptedRng::new(&[1], &[]);
    assert_eq!(pick_spawn_point(&points, &mut rng), Some(points[1]));
    assert_eq!(pick_spawn_point(&[], &mut rng), None);
}

// -----------------------------------------------------------------------------
// ExitGate tests
// -----------------------------------------------------------------------------

#[test]
fn test_gate_starts_locked_and_unlocks_once() {
    let mut gate = ExitGate::new(RoomGeneration(4));
    assert!(gate.is_locked());
    assert_eq!(gate.room(), RoomGeneration(4));

    assert!(gate.lock());
    assert!(gate.is_locked());

    assert!(gate.unlock());
    assert_eq!(gate.state(), GateState::Unlocked);
    assert!(!gate.unlock());
}

#[test]
fn test_gate_never_relocks() {
    let mut gate = ExitGate::new(RoomGeneration(1));
    gate.unlock();
    assert!(!gate.lock());
    assert_eq!(gate.state(), GateState::Unlocked);
}

#[test]
fn test_gate_placement_prefers_embedded_gate() {
    let embedded = GateDef {
        position: PointDef::new(10.0, 20.0),
        size: SizeDef::new(30.0, 40.0),
    };
    let template = GateTemplateDef {
        size: SizeDef::new(96.0, 32.0),
    };

    let placement =
        resolve_gate_placement(Some(&embedded), Some(&template), Some(Vec2::new(0.0, 99.0)))
            .unwrap();
    assert_eq!(placement.source, GateSource::Embedded);
    assert_eq!(placement.position, Vec2::new(10.0, 20.0));
    assert_eq!(placement.size, Vec2::new(30.0, 40.0));

    let placement = resolve_gate_placement(None, Some(&template), Some(Vec2::new(0.0, 99.0)))
        .unwrap();
    assert_eq!(placement.source, GateSource::Template);
    assert_eq!(placement.position, Vec2::new(0.0, 99.0));
    assert_eq!(placement.size, Vec2::new(96.0, 32.0));
}

#[test]
fn test_gate_placement_needs_template_and_anchor() {
    let template = GateTemplateDef {
        size: SizeDef::new(96.0, 32.0),
    };
    assert!(resolve_gate_placement(None, Some(&template), None).is_none());
    assert!(resolve_gate_placement(None, None, Some(Vec2::ZERO)).is_none());
}

// -----------------------------------------------------------------------------
// RoomLifecycle tests
// -----------------------------------------------------------------------------

fn active_room(index: usize, alive: u32) -> ActiveRoom {
    ActiveRoom {
        index,
        entity: Entity::PLACEHOLDER,
        blueprint_id: "pair_room".to_string(),
        theme_id: "t_pair".to_string(),
        gate: None,
        spawn_points: Vec::new(),
        spawn: None,
        alive,
        loaded_at: 0.0,
    }
}

fn lifecycle_in_room(alive: u32) -> RoomLifecycle {
    let registry = test_registry();
    let themes = themes(&registry, &["t_pair"]);
    let mut lifecycle = RoomLifecycle::default();
    lifecycle.begin_run(RunPlanBuilder::new(&registry).build(8, 3, 1, &themes));
    lifecycle.reset_room();
    lifecycle.begin_loading();
    lifecycle.enter_room(active_room(0, alive));
    lifecycle
}

#[test]
fn test_try_advance_without_run_is_noop() {
    let mut lifecycle = RoomLifecycle::default();
    assert!(!lifecycle.try_advance());
    assert_eq!(lifecycle.take_pending_advance(), None);
}

#[test]
fn test_try_advance_debounces_until_transition_finishes() {
    let mut lifecycle = lifecycle_in_room(0);

    assert!(lifecycle.try_advance());
    assert!(!lifecycle.try_advance());
    assert!(lifecycle.is_transitioning());
    assert_eq!(lifecycle.phase(), RoomPhase::Transitioning);

    assert_eq!(lifecycle.take_pending_advance(), Some(1));
    assert_eq!(lifecycle.take_pending_advance(), None);

    lifecycle.reset_room();
    lifecycle.enter_room(active_room(1, 0));
    lifecycle.finish_transition();
    assert!(lifecycle.try_advance());
    assert_eq!(lifecycle.take_pending_advance(), Some(2));
}

#[test]
fn test_try_advance_after_complete_is_noop() {
    let mut lifecycle = lifecycle_in_room(0);
    lifecycle.complete();
    assert!(!lifecycle.try_advance());
    assert_eq!(lifecycle.phase(), RoomPhase::Complete);
}

#[test]
fn test_record_death_only_counts_current_generation() {
    let mut lifecycle = lifecycle_in_room(2);
    let current = lifecycle.generation();

    assert!(!lifecycle.record_death(RoomGeneration(current.0 + 7)));
    assert_eq!(lifecycle.alive(), 2);

    assert!(lifecycle.record_death(current));
    assert!(lifecycle.record_death(current));
    assert!(!lifecycle.record_death(current));
    assert_eq!(lifecycle.alive(), 0);
}

#[test]
fn test_ready_to_unlock_requires_finished_spawning() {
    let mut lifecycle = lifecycle_in_room(0);
    let mut rng = ScriptedRng::new(&[1], &[]);
    let sequence = SpawnSequence::resolve(&trickle_profile(), &mut rng);
    lifecycle.active_mut().unwrap().spawn = Some(sequence);
    assert!(!lifecycle.is_ready_to_unlock());

    lifecycle.active_mut().unwrap().spawn = None;
    assert!(lifecycle.is_ready_to_unlock());

    lifecycle.mark_unlocked();
    assert_eq!(lifecycle.phase(), RoomPhase::Unlocked);
    assert_eq!(lifecycle.rooms_cleared(), 1);
    assert!(!lifecycle.is_ready_to_unlock());
}

#[test]
fn test_reset_room_bumps_generation() {
    let mut lifecycle = lifecycle_in_room(3);
    let before = lifecycle.generation();
    let after = lifecycle.reset_room();
    assert_eq!(after, before.next());
    assert!(lifecycle.active().is_none());
    assert_eq!(lifecycle.alive(), 0);
}

// -----------------------------------------------------------------------------
// App tests
// -----------------------------------------------------------------------------

fn run_config(theme_order: &[&str]) -> RunConfig {
    RunConfig {
        seed: 42,
        total_rooms: theme_order.len(),
        rooms_per_theme: 1,
        theme_order: theme_order.iter().map(|t| t.to_string()).collect(),
    }
}

fn room_app_with(config: RunConfig, defaults: RunDefaults) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin))
        .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
        .add_message::<CollisionStart>()
        .insert_resource(test_registry())
        .insert_resource(defaults)
        .add_plugins((CorePlugin, CombatPlugin, RoomsPlugin))
        .insert_resource(config);
    app.world_mut().spawn((Player, Transform::default()));

    for _ in 0..5 {
        app.update();
        if app.world().resource::<RoomLifecycle>().phase() != RoomPhase::Empty {
            break;
        }
    }
    app
}

fn room_app(theme_order: &[&str]) -> App {
    room_app_with(run_config(theme_order), RunDefaults::default())
}

fn update_n(app: &mut App, n: usize) {
    for _ in 0..n {
        app.update();
    }
}

fn lifecycle(app: &App) -> &RoomLifecycle {
    app.world().resource::<RoomLifecycle>()
}

fn enemies(app: &mut App) -> Vec<Entity> {
    app.world_mut()
        .query_filtered::<Entity, With<Enemy>>()
        .iter(app.world())
        .collect()
}

fn count<C: Component>(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<Entity, With<C>>()
        .iter(app.world())
        .count()
}

fn active_gate(app: &App) -> Option<(Entity, GateState)> {
    let gate = lifecycle(app).active()?.gate?;
    let state = app.world().get::<ExitGate>(gate)?.state();
    Some((gate, state))
}

fn player_position(app: &mut App) -> Vec2 {
    let mut players = app
        .world_mut()
        .query_filtered::<&Transform, With<Player>>();
    players.single(app.world()).unwrap().translation.truncate()
}

fn kill(app: &mut App, enemy: Entity) {
    app.world_mut().write_message(DamageEvent {
        target: enemy,
        amount: 1000.0,
    });
}

#[test]
fn test_room_without_profile_unlocks_on_load() {
    let mut app = room_app(&["t_quiet"]);

    assert_eq!(lifecycle(&app).current_index(), Some(0));
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert_eq!(lifecycle(&app).alive(), 0);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Unlocked));
    assert!(enemies(&mut app).is_empty());
    assert_eq!(count::<GateBarrier>(&mut app), 0);
    assert_eq!(player_position(&mut app), Vec2::new(0.0, -200.0));

    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 0);
}

#[test]
fn test_zero_yield_profile_unlocks_on_load() {
    let mut app = room_app(&["t_zero"]);

    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Unlocked));
    assert!(enemies(&mut app).is_empty());
}

#[test]
fn test_instant_pair_unlocks_after_both_die() {
    let mut app = room_app(&["t_pair"]);

    assert_eq!(lifecycle(&app).phase(), RoomPhase::AwaitingClear);
    assert_eq!(lifecycle(&app).alive(), 2);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Locked));
    assert_eq!(count::<GateBarrier>(&mut app), 1);

    let spawned = enemies(&mut app);
    assert_eq!(spawned.len(), 2);
    for enemy in &spawned {
        let identity = app.world().get::<EnemyIdentity>(*enemy).unwrap();
        assert_eq!(identity.def_id, "enemy_x");
    }

    kill(&mut app, spawned[0]);
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 1);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Locked));

    kill(&mut app, spawned[1]);
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 0);
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Unlocked));
    assert_eq!(count::<GateBarrier>(&mut app), 0);
    assert_eq!(lifecycle(&app).current_index(), Some(0));
}

#[test]
fn test_despawn_without_kill_counts_once() {
    let mut app = room_app(&["t_pair"]);
    let spawned = enemies(&mut app);

    app.world_mut().despawn(spawned[0]);
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 1);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Locked));

    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 1);
}

#[test]
fn test_gradual_room_spawns_over_time() {
    let mut app = room_app(&["t_trickle"]);

    let queued = lifecycle(&app)
        .active()
        .and_then(|room| room.spawn.as_ref())
        .map_or(0, SpawnSequence::len);
    assert!((1..=3).contains(&queued));
    assert_eq!(lifecycle(&app).phase(), RoomPhase::AwaitingClear);
    assert!(enemies(&mut app).is_empty());
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Locked));

    // 20 frames of 0.25s covers the initial delay plus two maximal gaps
    update_n(&mut app, 20);
    let spawned = enemies(&mut app);
    assert_eq!(spawned.len(), queued);
    assert_eq!(lifecycle(&app).alive() as usize, queued);
    assert!(lifecycle(&app).active().unwrap().spawning_finished());
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Locked));

    for enemy in spawned {
        kill(&mut app, enemy);
    }
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert_eq!(active_gate(&app).map(|g| g.1), Some(GateState::Unlocked));
}

#[test]
fn test_gradual_room_waits_initial_delay_after_load() {
    let mut app = room_app(&["t_trickle"]);
    assert!(enemies(&mut app).is_empty());

    // 0.25s after load, initial delay is 0.5s
    app.update();
    assert!(enemies(&mut app).is_empty());
    assert_eq!(lifecycle(&app).alive(), 0);

    app.update();
    assert_eq!(enemies(&mut app).len(), 1);
    assert_eq!(lifecycle(&app).alive(), 1);
}

#[test]
fn test_duplicate_gate_contacts_advance_once() {
    let mut app = room_app(&["t_quiet", "t_quiet", "t_quiet"]);
    let (gate, _) = active_gate(&app).unwrap();
    let generation = lifecycle(&app).generation();

    app.world_mut().write_message(GateContactEvent { gate });
    app.world_mut().write_message(GateContactEvent { gate });
    app.update();
    assert_eq!(lifecycle(&app).current_index(), Some(0));
    assert!(lifecycle(&app).is_transitioning());

    app.update();
    assert_eq!(lifecycle(&app).current_index(), Some(1));
    assert!(!lifecycle(&app).is_transitioning());
    assert_eq!(lifecycle(&app).generation(), generation.next());

    update_n(&mut app, 2);
    assert_eq!(lifecycle(&app).current_index(), Some(1));
}

#[test]
fn test_locked_gate_contact_is_ignored() {
    let mut app = room_app(&["t_pair", "t_quiet"]);
    let (gate, state) = active_gate(&app).unwrap();
    assert_eq!(state, GateState::Locked);

    app.world_mut().write_message(GateContactEvent { gate });
    update_n(&mut app, 2);

    assert_eq!(lifecycle(&app).current_index(), Some(0));
    assert_eq!(lifecycle(&app).phase(), RoomPhase::AwaitingClear);
}

#[test]
fn test_player_inside_gate_at_unlock_advances() {
    let mut app = room_app(&["t_pair", "t_quiet"]);
    let (gate, _) = active_gate(&app).unwrap();
    let player = app
        .world_mut()
        .query_filtered::<Entity, With<Player>>()
        .single(app.world())
        .unwrap();
    app.world_mut()
        .get_mut::<CollidingEntities>(gate)
        .unwrap()
        .insert(player);

    for enemy in enemies(&mut app) {
        kill(&mut app, enemy);
    }
    update_n(&mut app, 5);

    assert_eq!(lifecycle(&app).current_index(), Some(1));
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
}

#[test]
fn test_advance_tears_down_previous_room() {
    let mut app = room_app(&["t_pair", "t_pair"]);
    let first_room = enemies(&mut app);
    assert_eq!(first_room.len(), 2);

    assert!(app.world_mut().resource_mut::<RoomLifecycle>().try_advance());
    app.update();

    assert_eq!(lifecycle(&app).current_index(), Some(1));
    let second_room = enemies(&mut app);
    assert_eq!(second_room.len(), 2);
    for enemy in &first_room {
        assert!(!second_room.contains(enemy));
    }
    assert_eq!(count::<RoomInstance>(&mut app), 1);
    assert_eq!(count::<ExitGate>(&mut app), 1);
    assert_eq!(lifecycle(&app).alive(), 2);

    // Teardown reports from the first room must not touch the new counter
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).alive(), 2);
}

#[test]
fn test_unregistered_blueprint_is_skipped_without_second_teardown() {
    let mut app = room_app(&["t_pair", "t_gated", "t_quiet"]);
    app.world_mut()
        .resource_mut::<ContentRegistry>()
        .rooms
        .remove("gated_room");
    let generation = lifecycle(&app).generation();

    assert!(app.world_mut().resource_mut::<RoomLifecycle>().try_advance());
    app.update();

    assert_eq!(lifecycle(&app).current_index(), Some(2));
    assert_eq!(lifecycle(&app).generation(), generation.next());
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert!(enemies(&mut app).is_empty());
    assert_eq!(count::<RoomInstance>(&mut app), 1);
    assert_eq!(count::<ExitGate>(&mut app), 1);
    assert_eq!(count::<GateBarrier>(&mut app), 0);
}

#[test]
fn test_run_completes_after_last_room() {
    let mut app = room_app(&["t_quiet"]);
    let (gate, _) = active_gate(&app).unwrap();

    app.world_mut().write_message(GateContactEvent { gate });
    update_n(&mut app, 2);
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Complete);
    assert!(lifecycle(&app).active().is_none());
    assert!(!app.world_mut().resource_mut::<RoomLifecycle>().try_advance());
}

#[test]
fn test_run_complete_switches_game_state() {
    let mut app = room_app(&["t_quiet"]);
    let (gate, _) = active_gate(&app).unwrap();

    app.world_mut().write_message(GateContactEvent { gate });
    update_n(&mut app, 5);

    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::Complete
    );
    assert_eq!(count::<RoomInstance>(&mut app), 0);
}

#[test]
fn test_room_without_gate_has_no_exit() {
    let defaults = RunDefaults {
        exit_gate_template: None,
        ..RunDefaults::default()
    };
    let mut app = room_app_with(run_config(&["t_pair"]), defaults);

    assert!(lifecycle(&app).active().unwrap().gate.is_none());
    assert_eq!(count::<ExitGate>(&mut app), 0);

    for enemy in enemies(&mut app) {
        kill(&mut app, enemy);
    }
    update_n(&mut app, 3);
    assert_eq!(lifecycle(&app).phase(), RoomPhase::Unlocked);
    assert_eq!(lifecycle(&app).current_index(), Some(0));
}

#[test]
fn test_embedded_gate_is_used() {
    let mut app = room_app(&["t_gated"]);
    let (gate, _) = active_gate(&app).unwrap();

    let transform = app.world().get::<Transform>(gate).unwrap();
    assert_eq!(transform.translation.truncate(), Vec2::new(100.0, 250.0));
    assert_eq!(count::<ExitGate>(&mut app), 1);
}

#[test]
fn test_bare_room_is_repaired_on_load() {
    let mut app = room_app(&["t_bare"]);

    assert_eq!(player_position(&mut app), Vec2::ZERO);
    let (gate, _) = active_gate(&app).unwrap();
    let gate_position = app.world().get::<Transform>(gate).unwrap().translation.truncate();
    assert_eq!(gate_position, Vec2::new(0.0, 220.0));

    let spawned = enemies(&mut app);
    assert_eq!(spawned.len(), 2);
    for enemy in spawned {
        let position = app.world().get::<Transform>(enemy).unwrap().translation.truncate();
        assert!((position.length() - 180.0).abs() < 0.01);
    }
}
