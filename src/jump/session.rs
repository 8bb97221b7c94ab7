//! Jump domain: the charge state machine.
//!
//! `ChargeSession` is a plain resource driven once per fixed tick. It talks
//! to the outside world only through `MapQuery` (landing checks) and
//! `ChargeFeedback` (indicator and cues), so it runs unchanged against the
//! ECS adapter in `systems` or test fakes.

use bevy::prelude::*;

use crate::audio::CueRequest;
use crate::content::JumpConfig;
use crate::core::JumpDirection;
use crate::input::JumpInput;
use crate::jump::components::IndicatorReading;
use crate::jump::cues::{charge_level_cue, failure_cue, jump_cue};
use crate::jump::landing::{LandingRejection, LandingValidator, LandingVerdict};
use crate::jump::power::JumpPower;
use crate::map::MapQuery;

/// Opaque handle to a shown indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IndicatorHandle(pub Entity);

/// Presentation side effects of charging.
pub trait ChargeFeedback {
    fn show_indicator(&mut self) -> IndicatorHandle;
    fn update_indicator(&mut self, handle: IndicatorHandle, reading: IndicatorReading);
    fn hide_indicator(&mut self, handle: IndicatorHandle);
    fn play_cue(&mut self, cue: CueRequest, jitter: bool);
}

/// The leader as the state machine sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LeaderState {
    pub tile: IVec2,
    /// The leader's jump is still animating
    pub airborne: bool,
}

/// Everything one tick of the state machine reads.
#[derive(Debug, Clone, Copy)]
pub struct ChargeContext<'a> {
    pub now: u64,
    pub input: JumpInput,
    /// Any interaction lock is active
    pub locked: bool,
    pub leader: Option<LeaderState>,
    pub config: &'a JumpConfig,
}

/// A release that passed validation and must now be animated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JumpLaunch {
    pub origin: IVec2,
    /// Landing tile; `None` for a jump in place
    pub target: Option<IVec2>,
    pub direction: JumpDirection,
    pub power: JumpPower,
}

impl JumpLaunch {
    pub fn height(&self) -> f32 {
        self.power.height
    }

    /// Travel committed with the jump. A launch without a landing tile,
    /// including a directional one too short to reach the next tile, hops
    /// in place.
    pub fn distance(&self) -> f32 {
        match self.target {
            Some(_) => self.power.distance_for(self.direction),
            None => 0.0,
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChargeOutcome {
    Idle,
    Started,
    Charging,
    /// Released before the minimum charge; nothing happens
    TooShort,
    Cancelled(LandingRejection),
    Launched(JumpLaunch),
}

/// Session charge state. Reset to its zero value on map change and load.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ChargeSession {
    pub cooldown_remaining: u32,
    pub executing: bool,
    pub charging: bool,
    pub charge_start_tick: u64,
    pub held_direction: JumpDirection,
    pub indicator: Option<IndicatorHandle>,
    /// Activation as seen last tick, for edge detection
    pub activation_latched: bool,
    /// Last power level announced with a charge cue
    pub charge_level: u8,
}

impl ChargeSession {
    pub fn is_idle(&self) -> bool {
        !self.charging && !self.executing && self.cooldown_remaining == 0
    }

    pub fn elapsed(&self, now: u64) -> u32 {
        u32::try_from(now.saturating_sub(self.charge_start_tick)).unwrap_or(u32::MAX)
    }

    /// Back to the zero state, hiding any indicator. The activation latch
    /// survives so a key held across a map change cannot start a charge.
    pub fn reset(&mut self, feedback: &mut impl ChargeFeedback) {
        if let Some(handle) = self.indicator.take() {
            feedback.hide_indicator(handle);
        }
        *self = Self {
            activation_latched: self.activation_latched,
            ..Self::default()
        };
    }

    /// Overwrite the remaining cooldown, e.g. to lift it after a cutscene.
    pub fn set_cooldown(&mut self, ticks: u32) {
        self.cooldown_remaining = ticks;
    }

    /// Scripted jump in `direction` at minimum charge power. Gated like a
    /// charge start; returns `Idle` when the party cannot jump right now.
    pub fn request_jump<M: MapQuery, F: ChargeFeedback>(
        &mut self,
        ctx: &ChargeContext,
        direction: JumpDirection,
        map: &M,
        feedback: &mut F,
    ) -> ChargeOutcome {
        let Some(leader) = ctx.leader else {
            return ChargeOutcome::Idle;
        };
        if !self.is_idle() || ctx.locked {
            debug!("Jump request {:?} ignored, party busy", direction);
            return ChargeOutcome::Idle;
        }

        let power = JumpPower::from_elapsed(ctx.config.min_charge_ticks, ctx.config);
        let validator = LandingValidator::new(map, ctx.config);
        self.commit(ctx, &validator, leader.tile, direction, power, feedback)
    }

    pub fn tick<M: MapQuery, F: ChargeFeedback>(
        &mut self,
        ctx: &ChargeContext,
        map: &M,
        feedback: &mut F,
    ) -> ChargeOutcome {
        let held = ctx.input.activation_held;
        let pressed = held && !self.activation_latched;
        self.activation_latched = held;

        self.settle(ctx);

        if !self.charging {
            return self.try_start(ctx, pressed, feedback);
        }

        let Some(leader) = ctx.leader else {
            debug!("Leader gone mid-charge, dropping charge");
            self.end_charge(feedback);
            return ChargeOutcome::Idle;
        };

        let elapsed = self.elapsed(ctx.now);
        let validator = LandingValidator::new(map, ctx.config);

        if held {
            self.held_direction = ctx.input.direction;
            if elapsed >= ctx.config.auto_release_ticks() {
                debug!("Charge held past {} ticks, releasing", elapsed);
                return self.release(ctx, &validator, leader.tile, elapsed, feedback);
            }
            self.show_progress(ctx, &validator, leader.tile, elapsed, feedback);
            return ChargeOutcome::Charging;
        }

        self.release(ctx, &validator, leader.tile, elapsed, feedback)
    }

    /// Landing ends execution and arms the cooldown; otherwise the
    /// cooldown counts down by one.
    fn settle(&mut self, ctx: &ChargeContext) {
        let airborne = ctx.leader.is_some_and(|leader| leader.airborne);
        if self.executing && !airborne {
            self.executing = false;
            self.cooldown_remaining = ctx.config.cooldown_ticks;
            debug!("Party landed, cooldown {} ticks", self.cooldown_remaining);
        } else if self.cooldown_remaining > 0 {
            self.cooldown_remaining -= 1;
        }
    }

    fn try_start(
        &mut self,
        ctx: &ChargeContext,
        pressed: bool,
        feedback: &mut impl ChargeFeedback,
    ) -> ChargeOutcome {
        if !pressed
            || self.cooldown_remaining > 0
            || self.executing
            || ctx.locked
            || ctx.leader.is_none()
        {
            return ChargeOutcome::Idle;
        }

        self.charging = true;
        self.charge_start_tick = ctx.now;
        self.held_direction = JumpDirection::None;
        self.charge_level = 0;
        if ctx.config.show_indicator {
            self.indicator = Some(feedback.show_indicator());
        }
        debug!("Charge started at tick {}", ctx.now);
        ChargeOutcome::Started
    }

    fn show_progress<M: MapQuery>(
        &mut self,
        ctx: &ChargeContext,
        validator: &LandingValidator<M>,
        origin: IVec2,
        elapsed: u32,
        feedback: &mut impl ChargeFeedback,
    ) {
        let power = JumpPower::from_elapsed(elapsed, ctx.config);
        let verdict = validator.validate_power(origin, self.held_direction, &power);

        if let Some(handle) = self.indicator {
            feedback.update_indicator(
                handle,
                IndicatorReading {
                    progress: power.progress,
                    direction: self.held_direction,
                    valid: verdict.is_valid(),
                    power_level: power.level,
                    full_charge: power.is_full(),
                },
            );
        }

        if power.level > self.charge_level {
            self.charge_level = power.level;
            if let Some(cue) = charge_level_cue(&ctx.config.sound, power.level) {
                feedback.play_cue(cue, false);
            }
        }
    }

    fn release<M: MapQuery>(
        &mut self,
        ctx: &ChargeContext,
        validator: &LandingValidator<M>,
        origin: IVec2,
        elapsed: u32,
        feedback: &mut impl ChargeFeedback,
    ) -> ChargeOutcome {
        self.end_charge(feedback);
        let direction = self.held_direction;

        if elapsed < ctx.config.min_charge_ticks {
            return ChargeOutcome::TooShort;
        }

        let power = JumpPower::from_elapsed(elapsed, ctx.config);
        debug!("Released after {} ticks", elapsed);
        self.commit(ctx, validator, origin, direction, power, feedback)
    }

    /// Validate a landing and either cancel with the failure cue or launch.
    fn commit<M: MapQuery>(
        &mut self,
        ctx: &ChargeContext,
        validator: &LandingValidator<M>,
        origin: IVec2,
        direction: JumpDirection,
        power: JumpPower,
        feedback: &mut impl ChargeFeedback,
    ) -> ChargeOutcome {
        let verdict = validator.validate_power(origin, direction, &power);
        match verdict {
            LandingVerdict::Rejected(reason) => {
                debug!("Jump cancelled: {}", reason);
                if let Some(cue) = failure_cue(&ctx.config.sound) {
                    feedback.play_cue(cue, false);
                }
                ChargeOutcome::Cancelled(reason)
            }
            LandingVerdict::Vertical | LandingVerdict::Clear { .. } => {
                self.executing = true;
                if let Some(cue) = jump_cue(&ctx.config.sound, power.level, power.is_full()) {
                    feedback.play_cue(cue, !direction.is_none());
                }
                debug!("Jump committed {:?} from {}", direction, origin);
                ChargeOutcome::Launched(JumpLaunch {
                    origin,
                    target: verdict.target(),
                    direction,
                    power,
                })
            }
        }
    }

    fn end_charge(&mut self, feedback: &mut impl ChargeFeedback) {
        self.charging = false;
        self.charge_level = 0;
        if let Some(handle) = self.indicator.take() {
            feedback.hide_indicator(handle);
        }
    }
}
