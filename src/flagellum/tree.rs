//! Trunk plus branches sharing one time window.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use super::{Flagellum, FlagellumFrame};
use crate::config::FlagellumConfig;
use crate::error::Result;
use crate::timing::{Envelope, EnvelopePhase};

/// Window split: trunk grow, branch grow, hold, branch retract, trunk retract
pub const PHASE_RATIOS: [f64; 5] = [1.0, 1.0, 10.0, 4.0, 4.0];

/// Envelopes of the trunk and of every branch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TreeSchedule {
    pub trunk: Envelope,
    pub branches: Envelope,
}

impl TreeSchedule {
    /// Split `[start, finish]` by [`PHASE_RATIOS`]
    pub fn new(start: f64, finish: f64) -> Self {
        if finish < start {
            log::warn!("Inverted tree window [{}, {}], clamping finish to start", start, finish);
        }
        let finish = finish.max(start);
        let unit = (finish - start) / PHASE_RATIOS.iter().sum::<f64>();
        let [trunk_grow, branch_grow, hold, branch_retract, trunk_retract] = PHASE_RATIOS.map(|r| r * unit);

        let branch_start = start + trunk_grow;
        let hold_end = branch_start + branch_grow + hold;
        Self {
            trunk: Envelope::new(start, branch_start, finish - trunk_retract, finish),
            branches: Envelope::new(
                branch_start,
                branch_start + branch_grow,
                hold_end,
                hold_end + branch_retract,
            ),
        }
    }
}

/// Where a tree grows from and to
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TreeTargets {
    pub origin: Vec2,
    /// Tangent at the trunk's root
    pub direction: Vec2,
    /// Absolute point the trunk reaches
    pub trunk_target: Vec2,
    /// Absolute points the branches reach from the trunk tip
    pub branch_targets: Vec<Vec2>,
}

/// One trunk flagellum with lazily spawned branches
#[derive(Debug, Clone)]
pub struct FlagellumTree {
    trunk: Flagellum,
    direction: Vec2,
    branch_targets: Vec<Vec2>,
    branches: Vec<Flagellum>,
    schedule: TreeSchedule,
    config: FlagellumConfig,
    rng: StdRng,
}

impl FlagellumTree {
    /// Generate the trunk now; branches wait until the trunk has grown
    pub fn new<R: Rng + ?Sized>(
        targets: TreeTargets,
        start: f64,
        finish: f64,
        config: FlagellumConfig,
        rng: &mut R,
    ) -> Result<Self> {
        let trunk = Flagellum::generate(targets.origin, targets.trunk_target - targets.origin, config, rng)?;
        let tip = trunk.tip();
        let branch_targets: Vec<Vec2> = targets
            .branch_targets
            .into_iter()
            .filter(|t| {
                let ok = t.is_finite() && *t != tip;
                if !ok {
                    log::warn!("Dropping branch target {:?} coinciding with trunk tip", t);
                }
                ok
            })
            .collect();

        Ok(Self {
            trunk,
            direction: targets.direction,
            branch_targets,
            branches: Vec::new(),
            schedule: TreeSchedule::new(start, finish),
            config,
            rng: StdRng::seed_from_u64(rng.gen()),
        })
    }

    pub fn schedule(&self) -> &TreeSchedule {
        &self.schedule
    }

    pub fn trunk(&self) -> &Flagellum {
        &self.trunk
    }

    pub fn branches(&self) -> &[Flagellum] {
        &self.branches
    }

    pub fn is_terminal(&self, time: f64) -> bool {
        self.schedule.trunk.is_terminal(time)
    }

    /// Spawn or remove branches for wall-clock `time`, returning the trunk's phase
    pub fn tick(&mut self, time: f64) -> EnvelopePhase {
        let branch_env = self.schedule.branches;
        let growing = time > branch_env.start_in && time <= branch_env.finish_out;

        if growing && self.branches.len() != self.branch_targets.len() {
            self.spawn_branches();
        } else if time > branch_env.finish_out && !self.branches.is_empty() {
            log::debug!("Removing {} branches", self.branches.len());
            self.branches.clear();
        }

        self.schedule.trunk.phase(time)
    }

    fn spawn_branches(&mut self) {
        let tip = self.trunk.tip();
        let mut kept = Vec::with_capacity(self.branch_targets.len());
        let mut spawned = Vec::with_capacity(self.branch_targets.len());
        for target in &self.branch_targets {
            match Flagellum::generate(tip, *target - tip, self.config, &mut self.rng) {
                Ok(branch) => {
                    spawned.push(branch);
                    kept.push(*target);
                }
                Err(e) => log::warn!("Skipping branch toward {:?}: {}", target, e),
            }
        }
        log::debug!("Spawned {} branches", spawned.len());
        self.branch_targets = kept;
        self.branches = spawned;
    }

    /// Visible strips at wall-clock `time`, trunk first
    pub fn evaluate(&self, time: f64) -> Vec<FlagellumFrame> {
        let mut frames = Vec::with_capacity(1 + self.branches.len());
        let trunk_heading = self.trunk.target();

        let trunk_progress = self.schedule.trunk.value(time);
        if trunk_progress > 0.0 {
            frames.push(self.trunk.evaluate(self.direction, trunk_heading, trunk_progress, time));
        }

        let branch_progress = self.schedule.branches.value(time);
        if branch_progress > 0.0 {
            for branch in &self.branches {
                frames.push(branch.evaluate(trunk_heading, branch.target(), branch_progress, time));
            }
        }
        frames
    }
}
