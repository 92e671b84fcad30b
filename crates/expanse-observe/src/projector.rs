//! Observer Projector - per-object positions for the renderer
//!
//! Every object yields three projections per frame:
//! - present:  where it physically is now, `x · a(now)`
//! - emitted:  where it was when it emitted the light arriving now, `x · a(t_emit)`
//! - apparent: naive Euclidean estimate, distance `c_ref · (now - t_emit)`
//!   along the comoving direction

use std::iter::FusedIterator;

use expanse_core::Position2D;
use expanse_model::ExpansionModel;
use serde::{Deserialize, Serialize};

use crate::{DelaySolution, LightDelaySolver, SpaceObject};

/// Meaning of a projected position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Present,
    Emitted,
    Apparent,
}

impl Role {
    /// Emission order within one object's projections
    pub const ALL: [Role; 3] = [Role::Present, Role::Emitted, Role::Apparent];

    pub fn name(&self) -> &'static str {
        match self {
            Role::Present => "present",
            Role::Emitted => "emitted",
            Role::Apparent => "apparent",
        }
    }
}

/// One mark for the renderer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub position: Position2D,
    pub role: Role,
}

/// Projects objects as seen by the observer at the origin
#[derive(Debug, Clone, Default)]
pub struct ObserverProjector {
    solver: LightDelaySolver,
}

impl ObserverProjector {
    pub fn new(solver: LightDelaySolver) -> Self {
        Self { solver }
    }

    pub fn solver(&self) -> &LightDelaySolver {
        &self.solver
    }

    /// Lazy projections of one object at `now`.
    /// Nothing is computed until the result is iterated; iterating again
    /// starts over.
    pub fn project<'a>(
        &'a self,
        object: &'a SpaceObject,
        model: &'a ExpansionModel,
        now: f64,
    ) -> Projections<'a> {
        Projections {
            solver: &self.solver,
            object,
            model,
            now,
        }
    }
}

/// Restartable projection sequence for one object
#[derive(Debug, Clone, Copy)]
pub struct Projections<'a> {
    solver: &'a LightDelaySolver,
    object: &'a SpaceObject,
    model: &'a ExpansionModel,
    now: f64,
}

impl<'a> Projections<'a> {
    pub fn iter(&self) -> ProjectionIter<'a> {
        ProjectionIter {
            source: *self,
            cursor: 0,
            solution: None,
        }
    }

    /// Light delay solution behind the emitted and apparent projections
    pub fn solution(&self) -> DelaySolution {
        self.solver
            .solve(self.object.comoving_distance(), self.now, self.model)
    }

    fn position(&self, role: Role, solution: &mut Option<DelaySolution>) -> Position2D {
        let scale = self.model.scale_factor();
        match role {
            Role::Present => self.object.physical_position(scale.get()),
            Role::Emitted => {
                let sol = *solution.get_or_insert_with(|| self.solution());
                self.object.physical_position(scale.value_at(sol.emit_time))
            }
            Role::Apparent => {
                let sol = *solution.get_or_insert_with(|| self.solution());
                let distance = self.model.reference_light_speed() * (self.now - sol.emit_time);
                self.object.comoving_position().with_length(distance)
            }
        }
    }
}

impl<'a> IntoIterator for Projections<'a> {
    type Item = Projection;
    type IntoIter = ProjectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a> IntoIterator for &Projections<'a> {
    type Item = Projection;
    type IntoIter = ProjectionIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over present, emitted, apparent (in that order).
/// The delay is solved at most once, on first need.
#[derive(Debug, Clone)]
pub struct ProjectionIter<'a> {
    source: Projections<'a>,
    cursor: usize,
    solution: Option<DelaySolution>,
}

impl<'a> ProjectionIter<'a> {
    /// Solution computed so far, if any role needed it
    pub fn solution(&self) -> Option<DelaySolution> {
        self.solution
    }
}

impl Iterator for ProjectionIter<'_> {
    type Item = Projection;

    fn next(&mut self) -> Option<Projection> {
        let role = *Role::ALL.get(self.cursor)?;
        self.cursor += 1;
        let position = self.source.position(role, &mut self.solution);
        Some(Projection { position, role })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = Role::ALL.len() - self.cursor;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for ProjectionIter<'_> {}

impl FusedIterator for ProjectionIter<'_> {}
