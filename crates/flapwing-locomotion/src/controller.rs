use tracing::{debug, info, warn};
use flapwing_aero::{AeroModel, AeroQuery, CombinedAero};
use flapwing_controllers::{
    FlapForceModel, FlightState, GlideForceModel, GlideInput, HandMotion, ModeArbiter, TiltStabilizer,
    TurnController, TurnMemory,
};
use flapwing_core::{
    blend, hash_vec3, lerp, tilt_from_upright, PoseFrame, Scalar, StateHasher, TickCtx, Vec3,
};
use crate::{
    sample_frame, ConfigError, ForceMode, HandHistory, LocomotionConfig, PhysicsBody, PoseSource, TickReport, TickSkip,
};

/// The per-tick control loop. Owns its pose source, its body and all state
/// carried between ticks; `advance` is the only entry point that mutates them.
pub struct LocomotionLoop<S, B> {
    config: LocomotionConfig,
    source: S,
    body: B,

    arbiter: ModeArbiter,
    flap: FlapForceModel,
    glide: GlideForceModel,
    turn: TurnController,
    tilt: TiltStabilizer,
    aero: Option<CombinedAero>,

    history: HandHistory,
    tick: u64,

    // log bookkeeping only
    last_state: Option<FlightState>,
    tracking_lost: bool,
}

impl<S: PoseSource, B: PhysicsBody> LocomotionLoop<S, B> {
    pub fn new(config: LocomotionConfig, source: S, body: B) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            arbiter: ModeArbiter::new(config.mode_params()),
            flap: FlapForceModel::new(config.flap_params()),
            glide: GlideForceModel::new(config.glide_params(), config.initial_glide_force),
            turn: TurnController::new(config.turn_params()),
            tilt: TiltStabilizer::new(config.tilt_params()),
            aero: config.aero.as_ref().map(|a| a.build()),
            history: HandHistory::new(),
            tick: 0,
            last_state: None,
            tracking_lost: false,
            config,
            source,
            body,
        })
    }

    /// Run one tick of `dt` seconds.
    pub fn advance(&mut self, dt: Scalar) -> TickReport {
        let ctx = TickCtx::new(dt, self.tick + 1);
        if ctx.is_degenerate() {
            debug!(dt, "degenerate tick skipped");
            return TickReport::skipped(self.tick, dt, TickSkip::DegenerateDt(dt));
        }

        let frame = match sample_frame(&mut self.source) {
            Ok(frame) => {
                if self.tracking_lost {
                    info!(tick = ctx.tick, "tracking restored");
                    self.tracking_lost = false;
                }
                frame
            }
            Err(skip) => {
                if self.tracking_lost {
                    debug!(%skip, "tick skipped");
                } else {
                    warn!(%skip, "tracking lost; holding controller state");
                    self.tracking_lost = true;
                }
                return TickReport::skipped(self.tick, dt, skip);
            }
        };
        self.tick = ctx.tick;

        let (left_delta, right_delta) = self.history.deltas(&frame);
        let motion = HandMotion::new(left_delta, right_delta, dt);
        let avg_speed = motion.avg_speed();
        let grounded = self.body.is_grounded(self.config.ground_check_distance);

        let state = self.arbiter.classify(&frame, avg_speed, grounded);
        if self.last_state != Some(state) {
            debug!(?state, tick = ctx.tick, "flight state");
            self.last_state = Some(state);
        }
        let mut report = TickReport::begin(&ctx, state, grounded, avg_speed);

        match state {
            FlightState::Flapping => {
                self.flap_tick(&frame, &motion, &mut report);
                self.home_speed(&frame, dt);
            }
            FlightState::Gliding => self.glide_tick(&frame, grounded, dt, &mut report),
            FlightState::Grounded | FlightState::Coasting => {}
        }

        if self.config.turn_while_flapping || !self.flap.is_flapping() {
            self.turn_tick(&frame, dt, &mut report);
        }

        if !grounded {
            self.forward_tilt(&frame, &mut report);
            self.aero_tick(&ctx, &mut report);
        }

        let rotation = self.tilt.step(self.body.rotation(), dt);
        self.body.set_rotation(rotation);
        report.tilt_after = tilt_from_upright(rotation);

        self.flap.tick(dt);
        self.history.store(&frame);
        report
    }

    fn flap_tick(&mut self, frame: &PoseFrame, motion: &HandMotion, report: &mut TickReport) {
        let velocity = self.body.velocity();
        let outcome = self.flap.evaluate(frame, motion, self.body.forward(), velocity);
        if outcome.fired {
            info!(impulse = ?outcome.impulse, velocity_before = ?velocity, "flap");
            self.body.add_force(outcome.impulse, ForceMode::Impulse);
            report.impulse += outcome.impulse;
        }
        report.flap = Some(outcome);
    }

    // Home the body's speed toward a target: hands close together speed up, otherwise cruise.
    fn home_speed(&mut self, frame: &PoseFrame, dt: Scalar) {
        let c = &self.config;
        let velocity = self.body.velocity();
        let speed = velocity.length();
        let target = if frame.hand_distance() < c.close_threshold { speed * c.speed_up_factor } else { c.base_speed };
        let new_speed = lerp(speed, target, blend(c.speed_change_rate, dt));
        self.body.set_velocity(velocity.normalize_or_zero() * new_speed);
    }

    fn glide_tick(&mut self, frame: &PoseFrame, grounded: bool, dt: Scalar, report: &mut TickReport) {
        let rotation = self.body.rotation();
        let head_world = self.body.position() + rotation * frame.head.position;
        let input = GlideInput {
            reach: frame.hand_reach(),
            body_rotation: rotation,
            body_velocity: self.body.velocity(),
            head_offset: head_world - self.body.position(),
            flapping: self.flap.is_flapping(),
            grounded,
        };
        let Some(out) = self.glide.step(&input, dt) else { return };

        self.body.add_force(out.force, ForceMode::Continuous);
        report.force += out.force;
        if let Some(v) = out.velocity {
            self.body.set_velocity(v);
        }
        report.glide = Some(out);
    }

    fn turn_tick(&mut self, frame: &PoseFrame, dt: Scalar, report: &mut TickReport) {
        let cmd = self.turn.step(frame, self.body.rotation(), self.body.velocity(), dt);
        if let Some(bank) = cmd.bank {
            let rotation = (bank * self.body.rotation()).normalize();
            self.body.set_rotation(rotation);
        }
        if cmd.steer_force != Vec3::ZERO {
            self.body.add_force(cmd.steer_force, ForceMode::Continuous);
            report.force += cmd.steer_force;
        }
        report.turn = Some(cmd);
    }

    // Pitching the head down pushes the body forward.
    fn forward_tilt(&mut self, frame: &PoseFrame, report: &mut TickReport) {
        let look = frame.head.forward();
        if look.y >= 0.0 { return; }
        let force = self.body.forward() * (-look.y * self.config.forward_tilt_factor);
        self.body.add_force(force, ForceMode::Continuous);
        report.force += force;
    }

    fn aero_tick(&mut self, ctx: &TickCtx, report: &mut TickReport) {
        let Some(aero) = &self.aero else { return };
        let query = AeroQuery {
            velocity: self.body.velocity(),
            orientation: self.body.rotation(),
            altitude: self.body.position().y,
        };
        let force = aero.force(ctx, query);
        if force != Vec3::ZERO {
            self.body.add_force(force, ForceMode::Continuous);
            report.force += force;
        }
    }

    /// blake3 digest of everything the loop carries between ticks.
    pub fn state_digest(&self) -> [u8; 32] {
        let mut h = StateHasher::new();
        h.update_u64(self.tick);
        match self.history.previous() {
            Some([l, r]) => { h.update_bytes(&[1]); hash_vec3(&mut h, &l); hash_vec3(&mut h, &r); }
            None => h.update_bytes(&[0]),
        }
        h.update_f32(self.flap.cooldown());
        h.update_bytes(&[self.flap.is_flapping() as u8]);
        h.update_f32(self.glide.glide_force());
        match self.turn.memory() {
            TurnMemory::NoTurn => h.update_bytes(&[0]),
            TurnMemory::Turning(d) => { h.update_bytes(&[1]); h.update_f32(d); }
        }
        h.update_f32(self.turn.turn_speed());
        h.finalize()
    }
}

impl<S, B> LocomotionLoop<S, B> {
    pub fn config(&self) -> &LocomotionConfig { &self.config }
    pub fn source(&self) -> &S { &self.source }
    pub fn source_mut(&mut self) -> &mut S { &mut self.source }
    pub fn body(&self) -> &B { &self.body }
    pub fn body_mut(&mut self) -> &mut B { &mut self.body }
    pub fn into_parts(self) -> (S, B) { (self.source, self.body) }

    #[inline] pub fn tick(&self) -> u64 { self.tick }
    #[inline] pub fn flap_cooldown(&self) -> Scalar { self.flap.cooldown() }
    #[inline] pub fn is_flapping(&self) -> bool { self.flap.is_flapping() }
    #[inline] pub fn glide_force(&self) -> Scalar { self.glide.glide_force() }
    #[inline] pub fn turn_memory(&self) -> TurnMemory { self.turn.memory() }
    #[inline] pub fn history(&self) -> &HandHistory { &self.history }
}
