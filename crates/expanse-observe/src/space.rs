//! SpaceTime - objects sharing one expansion model
//!
//! This is the surface the driver and the rendering/HUD/persistence layers
//! talk to. Ordering: `step` for a tick always completes before any
//! projection for that tick is requested, so projections never mix pre- and
//! post-step state.

use expanse_core::{ExpanseResult, ObjectRecord, Position2D, SpaceSnapshot};
use expanse_model::{CosmologyConfig, ExpansionModel};

use crate::{
    LightDelaySolver, ObserverProjector, Projection, Projections, SolverConfig, SpaceObject,
};

/// The simulated universe
#[derive(Debug, Clone)]
pub struct SpaceTime {
    objects: Vec<SpaceObject>,
    model: ExpansionModel,
    projector: ObserverProjector,
}

impl SpaceTime {
    pub fn new(
        cosmology: CosmologyConfig,
        solver: SolverConfig,
        objects: impl IntoIterator<Item = SpaceObject>,
    ) -> ExpanseResult<Self> {
        Ok(SpaceTime {
            objects: objects.into_iter().collect(),
            model: ExpansionModel::new(cosmology)?,
            projector: ObserverProjector::new(LightDelaySolver::new(solver)?),
        })
    }

    /// Seed objects from a persisted snapshot
    pub fn from_snapshot(
        cosmology: CosmologyConfig,
        solver: SolverConfig,
        snapshot: &SpaceSnapshot,
    ) -> ExpanseResult<Self> {
        Self::new(cosmology, solver, snapshot.objects.iter().map(SpaceObject::from))
    }

    /// Advance the expansion model by one tick
    pub fn step(&mut self, dt: f64, absolute_time: f64) -> ExpanseResult<()> {
        self.model.step(dt, absolute_time)
    }

    /// Projections of one object
    pub fn project<'a>(&'a self, object: &'a SpaceObject, now: f64) -> Projections<'a> {
        self.projector.project(object, &self.model, now)
    }

    /// Projections of every object, object by object
    pub fn project_all(&self, now: f64) -> impl Iterator<Item = Projection> + '_ {
        self.objects
            .iter()
            .flat_map(move |object| self.project(object, now))
    }

    /// Number of objects whose light delay did not converge at `now`
    pub fn unconverged(&self, now: f64) -> usize {
        self.objects
            .iter()
            .filter(|object| !self.project(object, now).solution().converged)
            .count()
    }

    /// Current scalar values for HUD and graph overlays
    pub fn scalar_snapshot(&self) -> Vec<(&'static str, f64)> {
        self.model.scalar_snapshot()
    }

    /// Comoving positions of every object, for persistence
    pub fn state_snapshot(&self) -> Vec<ObjectRecord> {
        self.objects.iter().map(SpaceObject::to_record).collect()
    }

    /// Full persistence record stamped with `time`
    pub fn snapshot(&self, time: f64) -> SpaceSnapshot {
        SpaceSnapshot::new(time, self.state_snapshot())
    }

    pub fn add_object(&mut self, comoving: Position2D) {
        self.objects.push(SpaceObject::new(comoving));
    }

    pub fn objects(&self) -> &[SpaceObject] {
        &self.objects
    }

    pub fn model(&self) -> &ExpansionModel {
        &self.model
    }

    pub fn projector(&self) -> &ObserverProjector {
        &self.projector
    }
}
