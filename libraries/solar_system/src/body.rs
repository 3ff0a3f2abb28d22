use crate::animation::{AnimationSlot, Period, RotationAnimation};
use crate::appearance::{Appearance, Surface};
use crate::error::{BuildError, GraphError};
use crate::graph::{Node, NodeId, NodeRole, SceneGraph};
use crate::orbit;
use crate::ring::Ring;
use crate::shape::Shape;
use bevy::prelude::*;

pub struct BodyPlugin;

impl Plugin for BodyPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<PlanetaryBody>()
            .register_type::<crate::system::Sun>()
            .register_type::<crate::graph::NodeRole>();
    }
}

/// Marks the visible sphere of the sun, a planet or a moon.
#[derive(Debug, Copy, Clone, Component, Reflect)]
#[reflect(Component)]
pub struct PlanetaryBody;

/// The node chain carrying a body around its parent.
///
/// The collar receives the orbit animation, the axis is offset by the orbit
/// distance and the body sits at the axis origin, so turning the collar moves
/// the body along a circle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pivot {
    pub collar: NodeId,
    pub axis: NodeId,
    pub body: NodeId,
    pub path: NodeId,
}

impl Pivot {
    fn build(
        graph: &mut SceneGraph,
        name: &str,
        role: NodeRole,
        radius: f32,
        distance: f32,
        appearance: Appearance,
    ) -> Result<Self, BuildError> {
        let shape = Shape::sphere(radius)?;
        let collar = graph.add(Node::new(format!("{name} (Collar)")));
        let axis = graph.add_under(
            collar,
            Node::new(format!("{name} (Axis)")).with_translation(Vec3::X * distance),
        );
        let body = graph.add_under(
            axis,
            Node::new(name)
                .with_role(role)
                .with_geometry(shape, Surface::lit(appearance)),
        );
        let path = orbit::orbital_path(graph, name, distance, radius);
        graph.add_child(collar, path)?;
        Ok(Self {
            collar,
            axis,
            body,
            path,
        })
    }
}

#[derive(Debug, Clone)]
pub struct MoonConfig {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    pub appearance: Appearance,
    pub year: Period,
}

#[derive(Debug, Clone)]
pub struct Moon {
    pub name: String,
    pub pivot: Pivot,
    pub year: Period,
}

impl Moon {
    pub fn build(graph: &mut SceneGraph, config: MoonConfig) -> Result<Self, BuildError> {
        let MoonConfig {
            name,
            radius,
            distance,
            appearance,
            year,
        } = config;
        let pivot = Pivot::build(graph, &name, NodeRole::Moon, radius, distance, appearance)?;
        Ok(Self { name, pivot, year })
    }
}

#[derive(Debug, Clone)]
pub struct PlanetConfig {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    pub appearance: Appearance,
    /// Self-spin period.
    pub day: Period,
    /// Orbital period.
    pub year: Period,
}

#[derive(Debug, Clone)]
pub struct Planet {
    pub name: String,
    pub pivot: Pivot,
    pub year: Period,
}

impl Planet {
    /// Builds a planet. Flat-colored planets are placeholders and do not spin.
    pub fn build(graph: &mut SceneGraph, config: PlanetConfig) -> Result<Self, BuildError> {
        let PlanetConfig {
            name,
            radius,
            distance,
            appearance,
            day,
            year,
        } = config;
        let spins = !appearance.is_flat_color();
        let pivot = Pivot::build(graph, &name, NodeRole::Planet, radius, distance, appearance)?;
        if spins {
            graph.animate(
                pivot.body,
                AnimationSlot::Spin,
                RotationAnimation::full_turn(day),
            );
        }
        Ok(Self { name, pivot, year })
    }

    pub fn add_moon(&self, graph: &mut SceneGraph, moon: &Moon) -> Result<(), GraphError> {
        graph.add_child(self.pivot.axis, moon.pivot.collar)?;
        graph.animate(
            moon.pivot.collar,
            AnimationSlot::Orbit,
            RotationAnimation::full_turn(moon.year),
        );
        debug!("Added moon {} to {}", moon.name, self.name);
        Ok(())
    }

    /// Rings hang off the axis and follow the planet without an animation of
    /// their own.
    pub fn add_ring(&self, graph: &mut SceneGraph, ring: &Ring) -> Result<(), GraphError> {
        graph.add_child(self.pivot.axis, ring.node)
    }
}
