//! Jump domain: tests for power, landing validation, the charge state
//! machine, hop motion, and the fixed-tick pipeline.

use bevy::prelude::*;

use super::*;
use crate::audio::{CueRequest, PlayCue};
use crate::content::JumpConfig;
use crate::core::{CorePlugin, JumpDirection, MapChangedEvent, TickClock};
use crate::input::{JumpInput, JumpInputPlugin};
use crate::map::{
    MapPlugin, MapQuery, MapView, Occupant, RealPosition, TileMap, TilePosition,
};

// -----------------------------------------------------------------------------
// Fakes
// -----------------------------------------------------------------------------

/// Open square map with optional walls and occupants.
struct FakeMap {
    size: i32,
    walls: Vec<IVec2>,
    occupants: Vec<(IVec2, Occupant)>,
}

impl FakeMap {
    fn open(size: i32) -> Self {
        Self {
            size,
            walls: Vec::new(),
            occupants: Vec::new(),
        }
    }
}

impl MapQuery for FakeMap {
    fn in_bounds(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.size && tile.y < self.size
    }

    fn is_passable(&self, tile: IVec2, _direction: JumpDirection) -> bool {
        self.in_bounds(tile) && !self.walls.contains(&tile)
    }

    fn occupants_at(&self, tile: IVec2) -> Vec<Occupant> {
        self.occupants
            .iter()
            .filter(|(at, _)| *at == tile)
            .map(|(_, occupant)| *occupant)
            .collect()
    }
}

/// Records every feedback call. Owns a world only to mint entity ids.
#[derive(Default)]
struct FakeFeedback {
    world: World,
    shown: Vec<IndicatorHandle>,
    hidden: Vec<IndicatorHandle>,
    readings: Vec<IndicatorReading>,
    cues: Vec<(CueRequest, bool)>,
}

impl ChargeFeedback for FakeFeedback {
    fn show_indicator(&mut self) -> IndicatorHandle {
        let handle = IndicatorHandle(self.world.spawn_empty().id());
        self.shown.push(handle);
        handle
    }

    fn update_indicator(&mut self, _handle: IndicatorHandle, reading: IndicatorReading) {
        self.readings.push(reading);
    }

    fn hide_indicator(&mut self, handle: IndicatorHandle) {
        self.hidden.push(handle);
    }

    fn play_cue(&mut self, cue: CueRequest, jitter: bool) {
        self.cues.push((cue, jitter));
    }
}

const ORIGIN: IVec2 = IVec2::new(5, 5);

struct Harness {
    session: ChargeSession,
    config: JumpConfig,
    map: FakeMap,
    feedback: FakeFeedback,
    now: u64,
    leader: Option<LeaderState>,
    locked: bool,
}

impl Harness {
    fn new() -> Self {
        Self {
            session: ChargeSession::default(),
            config: JumpConfig::default(),
            map: FakeMap::open(12),
            feedback: FakeFeedback::default(),
            now: 100,
            leader: Some(LeaderState {
                tile: ORIGIN,
                airborne: false,
            }),
            locked: false,
        }
    }

    /// Advance one tick with the given input.
    fn step(&mut self, held: bool, direction: JumpDirection) -> ChargeOutcome {
        self.now += 1;
        let ctx = ChargeContext {
            now: self.now,
            input: JumpInput {
                activation_held: held,
                direction,
            },
            locked: self.locked,
            leader: self.leader,
            config: &self.config,
        };
        self.session.tick(&ctx, &self.map, &mut self.feedback)
    }

    /// Press, hold, and release so that exactly `ticks` elapse.
    fn charge_and_release(&mut self, ticks: u32, direction: JumpDirection) -> ChargeOutcome {
        assert_eq!(self.step(true, direction), ChargeOutcome::Started);
        for _ in 1..ticks {
            self.step(true, direction);
        }
        self.step(false, direction)
    }

    /// Send a scripted jump request on the next tick.
    fn request(&mut self, direction: JumpDirection) -> ChargeOutcome {
        self.now += 1;
        let ctx = ChargeContext {
            now: self.now,
            input: JumpInput::default(),
            locked: self.locked,
            leader: self.leader,
            config: &self.config,
        };
        self.session
            .request_jump(&ctx, direction, &self.map, &mut self.feedback)
    }

    fn failure_cues(&self) -> usize {
        let failure = &self.config.sound.failure.name;
        self.feedback
            .cues
            .iter()
            .filter(|(cue, _)| &cue.name == failure)
            .count()
    }
}

fn blocker_at(tile: IVec2) -> (IVec2, Occupant) {
    (
        tile,
        Occupant {
            entity: World::new().spawn_empty().id(),
            blocking: true,
        },
    )
}

fn launched(outcome: ChargeOutcome) -> JumpLaunch {
    match outcome {
        ChargeOutcome::Launched(launch) => launch,
        other => panic!("expected a launch, got {:?}", other),
    }
}

// -----------------------------------------------------------------------------
// Power tests
// -----------------------------------------------------------------------------

#[test]
fn test_power_at_minimum_and_full_charge() {
    let config = JumpConfig::default();

    let weakest = JumpPower::from_elapsed(config.min_charge_ticks, &config);
    assert_eq!(weakest.progress, 0.0);
    assert_eq!(weakest.multiplier, 0.5);
    assert_eq!(weakest.height, config.base_jump_height);
    assert_eq!(weakest.distance, config.base_jump_distance);

    let full = JumpPower::from_elapsed(config.max_charge_ticks, &config);
    assert!(full.is_full());
    assert_eq!(full.multiplier, 2.0);
    assert_eq!(full.height, config.max_jump_height);
    assert_eq!(full.distance, config.max_jump_distance);
}

#[test]
fn test_power_is_monotone_in_elapsed() {
    let config = JumpConfig::default();
    let mut previous = JumpPower::from_elapsed(0, &config);
    for elapsed in 1..=200 {
        let power = JumpPower::from_elapsed(elapsed, &config);
        assert!(power.height >= previous.height, "height fell at {elapsed}");
        assert!(power.distance >= previous.distance, "distance fell at {elapsed}");
        assert!(power.level >= previous.level, "level fell at {elapsed}");
        previous = power;
    }
}

#[test]
fn test_power_levels_bucket_progress() {
    assert_eq!(power_level(0.0, 4), 0);
    assert_eq!(power_level(0.24, 4), 0);
    assert_eq!(power_level(0.25, 4), 1);
    assert_eq!(power_level(0.5, 4), 2);
    assert_eq!(power_level(1.0, 4), 3);
}

#[test]
fn test_charge_progress_clamps() {
    let config = JumpConfig::default();
    assert_eq!(charge_progress(0, &config), 0.0);
    assert_eq!(charge_progress(50, &config), 0.5);
    assert_eq!(charge_progress(500, &config), 1.0);
}

#[test]
fn test_landing_offset_rounds_diagonals() {
    let config = JumpConfig::default();
    let full = JumpPower::from_elapsed(config.max_charge_ticks, &config);
    assert_eq!(full.tiles(config.tile_size), 2);
    assert_eq!(
        full.landing_offset(JumpDirection::East, config.tile_size),
        IVec2::new(2, 0)
    );
    assert_eq!(
        full.landing_offset(JumpDirection::NorthEast, config.tile_size),
        IVec2::new(1, -1)
    );
    assert_eq!(
        full.landing_offset(JumpDirection::None, config.tile_size),
        IVec2::ZERO
    );
}

// -----------------------------------------------------------------------------
// Landing validator tests
// -----------------------------------------------------------------------------

#[test]
fn test_vertical_jump_is_always_valid() {
    let config = JumpConfig::default();
    let mut map = FakeMap::open(12);
    map.occupants.push(blocker_at(ORIGIN));
    let validator = LandingValidator::new(&map, &config);
    assert_eq!(
        validator.validate(ORIGIN, JumpDirection::None, 90),
        LandingVerdict::Vertical
    );
}

#[test]
fn test_clear_landing_reports_target() {
    let config = JumpConfig::default();
    let map = FakeMap::open(12);
    let validator = LandingValidator::new(&map, &config);
    let verdict = validator.validate(ORIGIN, JumpDirection::South, 10);
    assert_eq!(verdict.target(), Some(IVec2::new(5, 6)));
    assert!(verdict.is_valid());
}

#[test]
fn test_landing_out_of_bounds() {
    let config = JumpConfig::default();
    let map = FakeMap::open(12);
    let validator = LandingValidator::new(&map, &config);
    let verdict = validator.validate(IVec2::new(0, 3), JumpDirection::West, 90);
    assert_eq!(
        verdict,
        LandingVerdict::Rejected(LandingRejection::OutOfBounds {
            target: IVec2::new(-2, 3)
        })
    );
}

#[test]
fn test_landing_on_wall_is_impassable() {
    let config = JumpConfig::default();
    let mut map = FakeMap::open(12);
    map.walls.push(IVec2::new(7, 5));
    let validator = LandingValidator::new(&map, &config);
    let verdict = validator.validate(ORIGIN, JumpDirection::East, 90);
    assert!(matches!(
        verdict,
        LandingVerdict::Rejected(LandingRejection::Impassable { .. })
    ));
}

#[test]
fn test_non_blocking_occupant_allows_landing() {
    let config = JumpConfig::default();
    let mut map = FakeMap::open(12);
    map.occupants.push((
        IVec2::new(7, 5),
        Occupant {
            entity: World::new().spawn_empty().id(),
            blocking: false,
        },
    ));
    let validator = LandingValidator::new(&map, &config);
    assert!(validator.validate(ORIGIN, JumpDirection::East, 90).is_valid());
}

#[test]
fn test_validator_is_idempotent() {
    let config = JumpConfig::default();
    let mut map = FakeMap::open(12);
    map.occupants.push(blocker_at(IVec2::new(5, 3)));
    let validator = LandingValidator::new(&map, &config);
    for direction in JumpDirection::ALL {
        for elapsed in [10, 45, 90] {
            let first = validator.validate(ORIGIN, direction, elapsed);
            let second = validator.validate(ORIGIN, direction, elapsed);
            assert_eq!(first, second);
        }
    }
}

#[test]
fn test_rejection_message_names_target() {
    let reason = LandingRejection::OutOfBounds {
        target: IVec2::new(-2, 3),
    };
    assert!(reason.to_string().contains("-2"));
}

/// Fence at (2, 1), crossable east-west only.
fn fenced_map() -> TileMap {
    TileMap::from_rows(&[".....", "..=..", "....."])
}

#[test]
fn test_landing_on_fence_from_below_is_impassable() {
    let config = JumpConfig::default();
    let tiles = fenced_map();
    let map = MapView::new(&tiles, Vec::<(IVec2, Occupant)>::new());
    let validator = LandingValidator::new(&map, &config);

    // Leaving (2, 2) northwards is open; entering the fence from the south is not.
    assert!(map.is_passable(IVec2::new(2, 2), JumpDirection::North));
    let verdict =
        validator.validate(IVec2::new(2, 2), JumpDirection::North, config.min_charge_ticks);
    assert_eq!(
        verdict,
        LandingVerdict::Rejected(LandingRejection::Impassable {
            origin: IVec2::new(2, 2),
            target: IVec2::new(2, 1),
            direction: JumpDirection::North,
        })
    );
}

#[test]
fn test_landing_on_fence_from_the_side_is_clear() {
    let config = JumpConfig::default();
    let tiles = fenced_map();
    let map = MapView::new(&tiles, Vec::<(IVec2, Occupant)>::new());
    let validator = LandingValidator::new(&map, &config);

    let verdict =
        validator.validate(IVec2::new(1, 1), JumpDirection::East, config.min_charge_ticks);
    assert_eq!(
        verdict,
        LandingVerdict::Clear {
            target: IVec2::new(2, 1)
        }
    );
}

#[test]
fn test_leaving_fence_vertically_is_impassable() {
    let config = JumpConfig::default();
    let tiles = fenced_map();
    let map = MapView::new(&tiles, Vec::<(IVec2, Occupant)>::new());
    let validator = LandingValidator::new(&map, &config);

    let verdict =
        validator.validate(IVec2::new(2, 1), JumpDirection::South, config.min_charge_ticks);
    assert!(matches!(
        verdict,
        LandingVerdict::Rejected(LandingRejection::Impassable { .. })
    ));
}

// -----------------------------------------------------------------------------
// Charge state machine tests
// -----------------------------------------------------------------------------

#[test]
fn test_release_below_minimum_does_nothing() {
    let mut harness = Harness::new();
    let outcome = harness.charge_and_release(5, JumpDirection::East);

    assert_eq!(outcome, ChargeOutcome::TooShort);
    assert!(!harness.session.executing);
    assert!(!harness.session.charging);
    assert_eq!(harness.session.cooldown_remaining, 0);
    assert!(harness.feedback.cues.is_empty());
    assert_eq!(harness.feedback.hidden, harness.feedback.shown);
}

#[test]
fn test_scenario_full_charge_east_commits_max_jump() {
    let mut harness = Harness::new();
    let launch = launched(harness.charge_and_release(90, JumpDirection::East));

    assert_eq!(launch.direction, JumpDirection::East);
    assert_eq!(launch.distance(), harness.config.max_jump_distance);
    assert_eq!(launch.height(), harness.config.max_jump_height);
    assert_eq!(launch.target, Some(IVec2::new(7, 5)));
    assert!(harness.session.executing);

    let (cue, jitter) = harness.feedback.cues.last().expect("jump cue");
    assert_eq!(cue.name, harness.config.sound.jump.name);
    assert_eq!(cue.volume, 100);
    assert_eq!(cue.pitch, 115);
    assert!(*jitter);
}

#[test]
fn test_scenario_blocked_landing_cancels_with_one_failure_cue() {
    let mut harness = Harness::new();
    harness.map.occupants.push(blocker_at(IVec2::new(5, 3)));

    let outcome = harness.charge_and_release(90, JumpDirection::North);

    assert!(matches!(
        outcome,
        ChargeOutcome::Cancelled(LandingRejection::Occupied { .. })
    ));
    assert_eq!(harness.failure_cues(), 1);
    assert!(!harness.session.executing);
    assert_eq!(harness.session.cooldown_remaining, 0);
    assert_eq!(harness.leader.map(|l| l.tile), Some(ORIGIN));

    // Nothing to wait out: the next press charges immediately.
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Started);
}

#[test]
fn test_scenario_vertical_at_minimum_commits_half_height() {
    let mut harness = Harness::new();
    let launch = launched(harness.charge_and_release(10, JumpDirection::None));

    assert_eq!(launch.distance(), 0.0);
    assert_eq!(launch.height(), 0.5 * harness.config.max_jump_height);
    assert_eq!(launch.target, None);

    let (_, jitter) = harness.feedback.cues.last().expect("jump cue");
    assert!(!*jitter);
}

#[test]
fn test_scenario_auto_release_fires_once() {
    let mut harness = Harness::new();
    let mut launches = Vec::new();
    let mut starts = 0;

    for _ in 0..400 {
        match harness.step(true, JumpDirection::South) {
            ChargeOutcome::Launched(_) => launches.push(harness.now),
            ChargeOutcome::Started => starts += 1,
            _ => {}
        }
    }

    assert_eq!(starts, 1);
    assert_eq!(launches.len(), 1);
    let started_at = 101;
    assert_eq!(
        launches[0] - started_at,
        harness.config.auto_release_ticks() as u64
    );
}

#[test]
fn test_scenario_reset_mid_charge_returns_to_zero() {
    let mut harness = Harness::new();
    harness.step(true, JumpDirection::East);
    for _ in 0..20 {
        harness.step(true, JumpDirection::East);
    }
    assert!(harness.session.charging);

    harness.session.reset(&mut harness.feedback);

    assert_eq!(
        harness.session,
        ChargeSession {
            activation_latched: true,
            ..ChargeSession::default()
        }
    );
    assert_eq!(harness.feedback.hidden, harness.feedback.shown);
}

#[test]
fn test_cooldown_counts_down_by_one_and_blocks_charging() {
    let mut harness = Harness::new();
    launched(harness.charge_and_release(30, JumpDirection::None));

    // Airborne for a few ticks; no cooldown yet.
    harness.leader = Some(LeaderState {
        tile: ORIGIN,
        airborne: true,
    });
    for _ in 0..5 {
        harness.step(false, JumpDirection::None);
        assert_eq!(harness.session.cooldown_remaining, 0);
        assert!(harness.session.executing);
    }

    // Landing arms the cooldown.
    harness.leader = Some(LeaderState {
        tile: ORIGIN,
        airborne: false,
    });
    harness.step(false, JumpDirection::None);
    assert!(!harness.session.executing);
    let armed = harness.config.cooldown_ticks;
    assert_eq!(harness.session.cooldown_remaining, armed);

    for expected in (0..armed).rev() {
        let pressed = expected % 2 == 0;
        let outcome = harness.step(pressed, JumpDirection::None);
        assert_eq!(harness.session.cooldown_remaining, expected);
        if expected > 0 {
            assert_eq!(outcome, ChargeOutcome::Idle);
        }
    }
    assert!(harness.session.is_idle() || harness.session.charging);
}

#[test]
fn test_executing_blocks_new_charge() {
    let mut harness = Harness::new();
    launched(harness.charge_and_release(20, JumpDirection::None));
    harness.leader = Some(LeaderState {
        tile: ORIGIN,
        airborne: true,
    });

    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Idle);
    assert!(!harness.session.charging);
}

#[test]
fn test_interaction_lock_blocks_start() {
    let mut harness = Harness::new();
    harness.locked = true;
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Idle);

    // Still held when the lock clears: no new edge, no charge.
    harness.locked = false;
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Idle);

    harness.step(false, JumpDirection::None);
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Started);
}

#[test]
fn test_charge_requires_leader() {
    let mut harness = Harness::new();
    harness.leader = None;
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Idle);
}

#[test]
fn test_leader_lost_mid_charge_drops_charge() {
    let mut harness = Harness::new();
    harness.step(true, JumpDirection::East);
    harness.step(true, JumpDirection::East);
    harness.leader = None;

    assert_eq!(harness.step(true, JumpDirection::East), ChargeOutcome::Idle);
    assert!(!harness.session.charging);
    assert_eq!(harness.feedback.hidden, harness.feedback.shown);
}

#[test]
fn test_indicator_tracks_progress_and_validity() {
    let mut harness = Harness::new();
    harness.map.occupants.push(blocker_at(IVec2::new(7, 5)));

    harness.step(true, JumpDirection::East);
    for _ in 0..89 {
        harness.step(true, JumpDirection::East);
    }

    let last = harness.feedback.readings.last().expect("reading");
    assert_eq!(last.direction, JumpDirection::East);
    assert!(!last.valid);
    assert!(last.progress > 0.95);

    let first = harness.feedback.readings.first().expect("reading");
    assert!(first.valid, "weak jump lands short of the blocker");
    assert_eq!(first.power_level, 0);
}

#[test]
fn test_indicator_can_be_disabled() {
    let mut harness = Harness::new();
    harness.config.show_indicator = false;
    harness.charge_and_release(40, JumpDirection::None);
    assert!(harness.feedback.shown.is_empty());
    assert!(harness.feedback.readings.is_empty());
}

#[test]
fn test_charge_cues_rise_with_each_level() {
    let mut harness = Harness::new();
    harness.step(true, JumpDirection::None);
    for _ in 0..89 {
        harness.step(true, JumpDirection::None);
    }

    let charge = harness.config.sound.charge.clone();
    let pitches: Vec<u8> = harness
        .feedback
        .cues
        .iter()
        .filter(|(cue, _)| cue.name == charge.name)
        .map(|(cue, _)| cue.pitch)
        .collect();
    assert_eq!(
        pitches,
        vec![charge.pitch + 15, charge.pitch + 30, charge.pitch + 45]
    );
}

#[test]
fn test_disabled_sounds_stay_silent() {
    let mut harness = Harness::new();
    harness.config.sound.enable_charge = false;
    harness.config.sound.enable_jump = false;
    launched(harness.charge_and_release(90, JumpDirection::East));
    assert!(harness.feedback.cues.is_empty());
}

#[test]
fn test_directional_release_too_short_for_a_tile_hops_in_place() {
    let mut harness = Harness::new();
    harness.config.base_jump_distance = 20.0;

    let launch = launched(harness.charge_and_release(11, JumpDirection::East));
    assert_eq!(launch.direction, JumpDirection::East);
    assert_eq!(launch.target, None);
    assert_eq!(launch.distance(), 0.0);

    // Nothing drifts the leader off its tile.
    let mut data = JumpData::begin(0, launch.direction, launch.height(), launch.distance(), None);
    data.advance(15, harness.config.jump_duration_ticks);
    assert_eq!(data.offset(harness.config.diagonal_split).drift, Vec2::ZERO);
}

#[test]
fn test_set_cooldown_blocks_then_lifts() {
    let mut harness = Harness::new();
    harness.session.set_cooldown(2);

    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Idle);
    assert_eq!(harness.step(false, JumpDirection::None), ChargeOutcome::Idle);
    assert_eq!(harness.session.cooldown_remaining, 0);
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Started);
}

#[test]
fn test_set_cooldown_zero_makes_party_ready() {
    let mut harness = Harness::new();
    harness.session.cooldown_remaining = 40;
    harness.session.set_cooldown(0);
    assert!(harness.session.is_idle());
}

#[test]
fn test_jump_request_commits_at_minimum_power() {
    let mut harness = Harness::new();
    let launch = launched(harness.request(JumpDirection::South));

    assert_eq!(launch.origin, ORIGIN);
    assert_eq!(launch.target, Some(ORIGIN + IVec2::Y));
    assert_eq!(launch.power.progress, 0.0);
    assert!(harness.session.executing);
    assert!(!harness.session.charging);
    assert!(harness.feedback.shown.is_empty());

    let jump = &harness.config.sound.jump.name;
    assert!(
        harness
            .feedback
            .cues
            .iter()
            .any(|(cue, jitter)| &cue.name == jump && *jitter)
    );
}

#[test]
fn test_jump_request_uses_the_start_gate() {
    let mut harness = Harness::new();
    harness.session.set_cooldown(5);
    assert_eq!(harness.request(JumpDirection::East), ChargeOutcome::Idle);

    harness.session.set_cooldown(0);
    harness.locked = true;
    assert_eq!(harness.request(JumpDirection::East), ChargeOutcome::Idle);

    harness.locked = false;
    harness.leader = None;
    assert_eq!(harness.request(JumpDirection::East), ChargeOutcome::Idle);

    harness.leader = Some(LeaderState {
        tile: ORIGIN,
        airborne: false,
    });
    assert_eq!(harness.step(true, JumpDirection::None), ChargeOutcome::Started);
    assert_eq!(harness.request(JumpDirection::East), ChargeOutcome::Idle);
    assert!(harness.session.charging);
    assert!(!harness.session.executing);
}

#[test]
fn test_jump_request_into_wall_cancels() {
    let mut harness = Harness::new();
    harness.map.walls.push(ORIGIN + IVec2::X);

    let outcome = harness.request(JumpDirection::East);
    assert!(matches!(
        outcome,
        ChargeOutcome::Cancelled(LandingRejection::Impassable { .. })
    ));
    assert_eq!(harness.failure_cues(), 1);
    assert!(!harness.session.executing);
}

// -----------------------------------------------------------------------------
// Motion tests
// -----------------------------------------------------------------------------

#[test]
fn test_easing_endpoints_and_midpoint() {
    assert_eq!(jump_easing(0.0), 0.0);
    assert_eq!(jump_easing(0.5), 0.5);
    assert_eq!(jump_easing(1.0), 1.0);

    let mut previous = 0.0;
    for step in 1..=20 {
        let eased = jump_easing(step as f32 / 20.0);
        assert!(eased >= previous);
        previous = eased;
    }
}

#[test]
fn test_jump_lifts_to_height_at_midpoint_and_lands() {
    let mut data = JumpData::begin(10, JumpDirection::None, 60.0, 0.0, None);

    data.advance(25, 30);
    let apex = data.offset(0.7);
    assert!((apex.lift - 60.0).abs() < 1e-3);

    let frame = data.advance(40, 30).expect("active");
    assert!(frame.landed);
    assert_eq!(frame.progress, 1.0);

    data.clear();
    assert!(data.advance(41, 30).is_none());
    assert_eq!(data.offset(0.7), JumpOffset::default());
}

#[test]
fn test_leader_path_has_no_drift() {
    let mut data = JumpData::begin(
        0,
        JumpDirection::East,
        60.0,
        96.0,
        Some(LandingPath {
            origin: IVec2::new(1, 1),
            target: IVec2::new(3, 1),
        }),
    );
    data.advance(15, 30);
    assert_eq!(data.offset(0.7).drift, Vec2::ZERO);
}

#[test]
fn test_drift_splits_diagonals() {
    let drift = drift_vector(JumpDirection::SouthWest, 100.0, 0.7);
    assert!((drift.x + 70.0).abs() < 1e-4);
    assert!((drift.y - 30.0).abs() < 1e-4);

    let cardinal = drift_vector(JumpDirection::North, 100.0, 0.7);
    assert_eq!(cardinal, Vec2::new(0.0, -100.0));
}

#[test]
fn test_follower_starts_are_strictly_ordered() {
    let starts: Vec<u64> = (0..4).map(|i| follower_start_tick(100, i, 3)).collect();
    assert_eq!(starts, vec![103, 106, 109, 112]);
    for pair in starts.windows(2) {
        assert_eq!(pair[1] - pair[0], 3);
    }
}

#[test]
fn test_pending_jump_promotes_on_its_tick() {
    let pending = PendingJump {
        start_tick: 50,
        direction: JumpDirection::West,
        height: 40.0,
        distance: 48.0,
    };
    assert!(!pending.is_due(49));
    assert!(pending.is_due(50));

    let data = pending.into_jump();
    assert!(data.active);
    assert_eq!(data.start_tick, 50);
    assert_eq!(data.landing, None);
}

// -----------------------------------------------------------------------------
// Pipeline tests
// -----------------------------------------------------------------------------

fn pipeline_app() -> App {
    let mut app = App::new();
    app.add_plugins((CorePlugin, MapPlugin, JumpInputPlugin, JumpPlugin))
        .init_resource::<JumpConfig>()
        .init_resource::<ButtonInput<KeyCode>>()
        .add_message::<PlayCue>()
        .insert_resource(TileMap::open(10, 10));
    app
}

fn spawn_party(app: &mut App) -> (Entity, Vec<Entity>) {
    let world = app.world_mut();
    let leader = world
        .spawn((
            PartyLeader,
            TilePosition(IVec2::new(3, 3)),
            RealPosition::at_tile(IVec2::new(3, 3)),
            JumpData::default(),
            JumpOffset::default(),
        ))
        .id();
    let followers = [Visibility::Visible, Visibility::Hidden, Visibility::Inherited]
        .into_iter()
        .enumerate()
        .map(|(index, visibility)| {
            world
                .spawn((
                    Follower {
                        index: index as u32,
                    },
                    visibility,
                    TilePosition(IVec2::new(2, 3)),
                    RealPosition::at_tile(IVec2::new(2, 3)),
                    JumpData::default(),
                    JumpOffset::default(),
                ))
                .id()
        })
        .collect();
    (leader, followers)
}

fn tick(app: &mut App, times: usize) {
    for _ in 0..times {
        app.world_mut().run_schedule(FixedUpdate);
    }
}

fn indicator_count(app: &mut App) -> usize {
    let mut query = app
        .world_mut()
        .query_filtered::<Entity, With<ChargeIndicator>>();
    query.iter(app.world()).count()
}

#[test]
fn test_pipeline_charges_jumps_and_lands() {
    let mut app = pipeline_app();
    let (leader, followers) = spawn_party(&mut app);
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::ArrowRight);
    }

    tick(&mut app, 90);
    assert!(app.world().resource::<ChargeSession>().charging);
    assert_eq!(indicator_count(&mut app), 1);

    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::Space);
    tick(&mut app, 1);

    let launch_tick = app.world().resource::<TickClock>().now();
    let session = app.world().resource::<ChargeSession>();
    assert!(session.executing);
    assert!(!session.charging);
    assert_eq!(indicator_count(&mut app), 0);

    let data = *app.world().get::<JumpData>(leader).expect("leader jump");
    assert!(data.active);
    assert_eq!(data.direction, JumpDirection::East);
    assert_eq!(
        data.landing.map(|path| path.target),
        Some(IVec2::new(5, 3))
    );

    let stagger = app.world().resource::<JumpConfig>().follower_stagger_ticks as u64;
    let first = app.world().get::<PendingJump>(followers[0]).expect("first");
    assert_eq!(first.start_tick, launch_tick + stagger);
    assert!(app.world().get::<PendingJump>(followers[1]).is_none());
    let third = app.world().get::<PendingJump>(followers[2]).expect("third");
    assert_eq!(third.start_tick, launch_tick + 2 * stagger);

    let duration = app.world().resource::<JumpConfig>().jump_duration_ticks as usize;
    tick(&mut app, duration);

    assert_eq!(
        app.world().get::<TilePosition>(leader),
        Some(&TilePosition(IVec2::new(5, 3)))
    );
    assert!(!app.world().get::<JumpData>(leader).expect("data").active);
    let session = app.world().resource::<ChargeSession>();
    assert!(!session.executing);
    assert_eq!(
        session.cooldown_remaining,
        app.world().resource::<JumpConfig>().cooldown_ticks
    );
}

#[test]
fn test_pipeline_map_change_resets_on_next_tick() {
    let mut app = pipeline_app();
    spawn_party(&mut app);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .press(KeyCode::Space);

    tick(&mut app, 20);
    assert!(app.world().resource::<ChargeSession>().charging);

    app.world_mut().write_message(MapChangedEvent {
        map_id: "stage_next".to_string(),
    });
    tick(&mut app, 1);

    let session = app.world().resource::<ChargeSession>();
    assert!(!session.charging);
    assert_eq!(session.indicator, None);
    assert_eq!(session.cooldown_remaining, 0);
    assert_eq!(indicator_count(&mut app), 0);

    // The key is still down; no new charge starts until it is pressed again.
    tick(&mut app, 5);
    assert!(!app.world().resource::<ChargeSession>().charging);
}

#[test]
fn test_pipeline_publishes_follower_drift() {
    let mut app = pipeline_app();
    let (_, followers) = spawn_party(&mut app);
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::ArrowDown);
    }
    tick(&mut app, 40);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::Space);
    tick(&mut app, 1);

    // First follower takes off after one stagger, then drifts south.
    let stagger = app.world().resource::<JumpConfig>().follower_stagger_ticks as usize;
    tick(&mut app, stagger + 5);

    let offset = *app.world().get::<JumpOffset>(followers[0]).expect("offset");
    assert!(offset.lift > 0.0);
    assert!(offset.drift.y > 0.0);
    assert_eq!(offset.drift.x, 0.0);
}

#[test]
fn test_pipeline_followers_never_leave_their_tile() {
    let mut app = pipeline_app();
    // Wall between the leader at (3, 3) and its landing tile (5, 3).
    let rows: Vec<String> = (0..10)
        .map(|y| {
            if y == 3 {
                "....#.....".to_string()
            } else {
                ".".repeat(10)
            }
        })
        .collect();
    app.insert_resource(TileMap::from_rows(&rows));
    let (leader, followers) = spawn_party(&mut app);
    {
        let mut keys = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
        keys.press(KeyCode::Space);
        keys.press(KeyCode::ArrowRight);
    }
    tick(&mut app, 90);
    app.world_mut()
        .resource_mut::<ButtonInput<KeyCode>>()
        .release(KeyCode::Space);

    let config = app.world().resource::<JumpConfig>().clone();
    let settle = config.jump_duration_ticks + 3 * config.follower_stagger_ticks + 2;
    tick(&mut app, settle as usize);

    assert_eq!(
        app.world().get::<TilePosition>(leader),
        Some(&TilePosition(IVec2::new(5, 3)))
    );
    for follower in [followers[0], followers[2]] {
        let real = app.world().get::<RealPosition>(follower).expect("real");
        let tile = app.world().get::<TilePosition>(follower).expect("tile");
        assert_eq!(real.0, Vec2::new(2.0, 3.0));
        assert_eq!(tile.0, IVec2::new(2, 3));
        assert!(!app.world().get::<JumpData>(follower).expect("data").active);
        assert_eq!(
            app.world().get::<JumpOffset>(follower),
            Some(&JumpOffset::default())
        );
    }
    assert!(app.world().resource::<TileMap>().is_wall(IVec2::new(4, 3)));
}

#[test]
fn test_pipeline_jump_request_launches_party() {
    let mut app = pipeline_app();
    let (leader, followers) = spawn_party(&mut app);

    app.world_mut().write_message(JumpRequest {
        direction: JumpDirection::South,
    });
    tick(&mut app, 1);

    let data = *app.world().get::<JumpData>(leader).expect("leader jump");
    assert!(data.active);
    assert_eq!(
        data.landing.map(|path| path.target),
        Some(IVec2::new(3, 4))
    );
    assert!(app.world().resource::<ChargeSession>().executing);
    assert!(app.world().get::<PendingJump>(followers[0]).is_some());
}

#[test]
fn test_pipeline_set_cooldown_message() {
    let mut app = pipeline_app();
    spawn_party(&mut app);

    app.world_mut().write_message(SetJumpCooldown { ticks: 50 });
    tick(&mut app, 1);
    assert_eq!(app.world().resource::<ChargeSession>().cooldown_remaining, 50);

    // A cooling-down party ignores scripted requests too.
    app.world_mut().write_message(JumpRequest {
        direction: JumpDirection::None,
    });
    tick(&mut app, 1);
    assert!(!app.world().resource::<ChargeSession>().executing);
}
