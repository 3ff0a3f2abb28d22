use crate::animation::{AnimationSlot, Period, RotationAnimation};
use crate::appearance::{Appearance, Surface};
use crate::error::{BuildError, GraphError};
use crate::graph::{Node, NodeId, NodeRole, SceneGraph};
use crate::body::Planet;
use crate::shape::Shape;
use bevy::prelude::*;

/// Marks the sun's sphere.
#[derive(Debug, Clone, Copy, Component, Reflect)]
#[reflect(Component)]
pub struct Sun;

#[derive(Debug, Clone)]
pub struct PlanetEntry {
    pub name: String,
    pub collar: NodeId,
}

/// The sun and the planets revolving around it.
#[derive(Debug, Clone)]
pub struct System {
    pub axis: NodeId,
    pub sun: NodeId,
    planets: Vec<PlanetEntry>,
}

impl System {
    pub const SUN_RADIUS: f32 = 6.0;
    pub const SUN_SPIN_PERIOD: f64 = 60.0;
    pub const SUN_TEXTURE: &'static str = "textures/sun.jpg";

    pub fn build(graph: &mut SceneGraph) -> Result<Self, BuildError> {
        let axis = graph.add(Node::new("Solar System"));
        let sun = graph.add_under(
            axis,
            Node::new("Sun").with_role(NodeRole::Sun).with_geometry(
                Shape::sphere(Self::SUN_RADIUS)?,
                Surface::constant(Appearance::Texture(Self::SUN_TEXTURE.to_string())),
            ),
        );
        graph.animate(
            sun,
            AnimationSlot::Spin,
            RotationAnimation::full_turn(Period::new(Self::SUN_SPIN_PERIOD)?),
        );
        Ok(Self {
            axis,
            sun,
            planets: Vec::new(),
        })
    }

    /// Puts the planet in orbit around the sun. Planets sharing a name keep
    /// their own animations.
    pub fn add_planet(&mut self, graph: &mut SceneGraph, planet: &Planet) -> Result<(), GraphError> {
        graph.add_child(self.axis, planet.pivot.collar)?;
        graph.animate(
            planet.pivot.collar,
            AnimationSlot::Orbit,
            RotationAnimation::full_turn(planet.year),
        );
        debug!("Added planet {} with a {} year", planet.name, planet.year);
        self.planets.push(PlanetEntry {
            name: planet.name.clone(),
            collar: planet.pivot.collar,
        });
        Ok(())
    }

    pub fn planets(&self) -> &[PlanetEntry] {
        &self.planets
    }
}
