//! A living cell: wall, nucleus and the attack tendrils leaving it.

use glam::Vec2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Serialize;

use crate::config::{FlagellumConfig, Parameters};
use crate::error::Result;
use crate::flagellum::{FlagellumFrame, FlagellumTree, TreeTargets};
use crate::membrane::{MembraneFrame, MembraneShape, MembraneSkeleton, Spike};

/// Everything the renderer needs for one cell in one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CellFrame {
    pub time: f64,
    pub wall: MembraneFrame,
    pub nucleus: Option<MembraneFrame>,
    pub flagella: Vec<FlagellumFrame>,
}

/// Animated cell owned by one on-screen entity
#[derive(Debug, Clone)]
pub struct CellVisual {
    wall: MembraneSkeleton,
    nucleus: Option<MembraneSkeleton>,
    attacks: Vec<FlagellumTree>,
    flagellum: FlagellumConfig,
    rng: StdRng,
}

impl CellVisual {
    /// Generate a cell centered at `center` from a seed
    pub fn new(params: &Parameters, center: Vec2, seed: u64) -> Result<Self> {
        let mut rng = StdRng::seed_from_u64(seed);

        let wall_shape = MembraneShape::Regular {
            center,
            radius: params.cell.radius,
            segments: params.cell.segments,
        };
        let wall = MembraneSkeleton::build(&wall_shape, params.cell.resolve()?, &mut rng)?;

        let nucleus = match &params.nucleus {
            Some(nucleus) => {
                let shape = MembraneShape::Regular {
                    center,
                    radius: nucleus.radius,
                    segments: nucleus.segments,
                };
                Some(MembraneSkeleton::build(&shape, nucleus.resolve()?, &mut rng)?)
            }
            None => None,
        };

        log::info!("Cell created at {:?} with seed {}", center, seed);
        Ok(Self::from_parts(wall, nucleus, params.flagellum.resolve()?, rng))
    }

    /// Assemble a cell from already generated membranes
    pub fn from_parts(
        wall: MembraneSkeleton,
        nucleus: Option<MembraneSkeleton>,
        flagellum: FlagellumConfig,
        rng: StdRng,
    ) -> Self {
        Self {
            wall,
            nucleus,
            attacks: Vec::new(),
            flagellum,
            rng,
        }
    }

    pub fn wall(&self) -> &MembraneSkeleton {
        &self.wall
    }

    pub fn nucleus(&self) -> Option<&MembraneSkeleton> {
        self.nucleus.as_ref()
    }

    pub fn attacks(&self) -> &[FlagellumTree] {
        &self.attacks
    }

    /// Spike the wall toward `target` and grow a tendril from the spike
    ///
    /// The tendril starts when the spike is fully extended and lasts at least
    /// `duration`. Branches fan out from the trunk tip to `branch_targets`.
    pub fn attack(&mut self, target: Vec2, branch_targets: Vec<Vec2>, time: f64, duration: f64) -> Result<Spike> {
        let spike = self.wall.attack(target, time, duration)?;

        if target == spike.tip {
            log::warn!("Attack target {:?} lies on the membrane, no tendril grown", target);
            return Ok(spike);
        }

        let finish = spike.finish.max(spike.start + duration.max(0.0));
        let targets = TreeTargets {
            origin: spike.tip,
            direction: spike.normal,
            trunk_target: target,
            branch_targets,
        };
        let tree = FlagellumTree::new(targets, spike.start, finish, self.flagellum, &mut self.rng)?;
        log::debug!(
            "Attack on edge {} scheduled for [{:.1}, {:.1}]",
            spike.edge,
            spike.start,
            finish
        );
        self.attacks.push(tree);
        Ok(spike)
    }

    /// Advance structural state to wall-clock `time`
    ///
    /// Spawns and removes branches, drops finished tendrils and forgets
    /// expired locks. Call once per frame before [`CellVisual::evaluate`].
    pub fn tick(&mut self, time: f64) {
        for tree in &mut self.attacks {
            tree.tick(time);
        }
        let before = self.attacks.len();
        self.attacks.retain(|tree| !tree.is_terminal(time));
        if self.attacks.len() != before {
            log::debug!("{} attack tendrils finished", before - self.attacks.len());
        }
        self.wall.clear_expired_locks(time);
    }

    /// Tessellate the whole cell at wall-clock `time`
    pub fn evaluate(&self, time: f64) -> CellFrame {
        CellFrame {
            time,
            wall: self.wall.evaluate(time),
            nucleus: self.nucleus.as_ref().map(|n| n.evaluate(time)),
            flagella: self.attacks.iter().flat_map(|tree| tree.evaluate(time)).collect(),
        }
    }

    /// Random point at `distance` from the cell center, for demos and tests
    pub fn random_target(&mut self, distance: f32) -> Vec2 {
        let theta = self.rng.gen_range(0.0..std::f32::consts::TAU);
        self.wall.center() + Vec2::from_angle(theta) * distance
    }
}
