use crate::animation::Period;
use crate::appearance::Appearance;
use crate::body::{Moon, MoonConfig, Planet, PlanetConfig};
use crate::error::BuildError;
use crate::graph::SceneGraph;
use crate::ring::Ring;
use crate::system::System;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MaterialManifest {
    /// sRGB color, takes precedence over `texture`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Vec3>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

impl MaterialManifest {
    pub fn appearance(&self) -> Appearance {
        let color = self
            .color
            .map(|color| Color::from(Srgba::from_f32_array_no_alpha(color.to_array())));
        Appearance::resolve(color, self.texture.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct RingManifest {
    pub inner_radius: f32,
    pub outer_radius: f32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct MoonManifest {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    #[serde(flatten)]
    pub material: MaterialManifest,
    pub year: Period,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct PlanetManifest {
    pub name: String,
    pub radius: f32,
    pub distance: f32,
    #[serde(flatten)]
    pub material: MaterialManifest,
    pub day: Period,
    pub year: Period,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub moons: Vec<MoonManifest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring: Option<RingManifest>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Component, Reflect)]
#[reflect(Component)]
#[serde(rename_all = "kebab-case")]
pub struct CameraConfig {
    /// Distance from the sun.
    pub radius: f32,
    /// Radians.
    #[serde(default)]
    pub pitch: f32,
    /// Radians.
    #[serde(default)]
    pub yaw: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            radius: 60.0,
            pitch: -0.4,
            yaw: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct LightConfig {
    /// Point light intensity at the sun, in lumens.
    pub intensity: f32,
    #[serde(default = "LightConfig::default_range")]
    pub range: f32,
}

impl LightConfig {
    fn default_range() -> f32 {
        1000.0
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            intensity: 4e7,
            range: Self::default_range(),
        }
    }
}

/// Six images of a cube map, in +X, -X, +Y, -Y, +Z, -Z order.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SkyboxConfig {
    pub right: String,
    pub left: String,
    pub top: String,
    pub bottom: String,
    pub front: String,
    pub back: String,
    #[serde(default = "SkyboxConfig::default_brightness")]
    pub brightness: f32,
}

impl SkyboxConfig {
    fn default_brightness() -> f32 {
        1000.0
    }

    pub fn faces(&self) -> [&str; 6] {
        [
            &self.right,
            &self.left,
            &self.top,
            &self.bottom,
            &self.front,
            &self.back,
        ]
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct SystemManifest {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skybox: Option<SkyboxConfig>,
    #[serde(default)]
    pub planets: Vec<PlanetManifest>,
}

/// A scene graph built from a manifest.
#[derive(Debug, Clone)]
pub struct BuiltSystem {
    pub graph: SceneGraph,
    pub system: System,
}

impl SystemManifest {
    pub fn build(&self) -> Result<BuiltSystem, BuildError> {
        let mut graph = SceneGraph::new();
        let mut system = System::build(&mut graph)?;
        for manifest in &self.planets {
            let planet = manifest.build(&mut graph)?;
            system.add_planet(&mut graph, &planet)?;
        }
        Ok(BuiltSystem { graph, system })
    }
}

impl PlanetManifest {
    fn build(&self, graph: &mut SceneGraph) -> Result<Planet, BuildError> {
        let planet = Planet::build(
            graph,
            PlanetConfig {
                name: self.name.clone(),
                radius: self.radius,
                distance: self.distance,
                appearance: self.material.appearance(),
                day: self.day,
                year: self.year,
            },
        )?;
        for manifest in &self.moons {
            let moon = Moon::build(
                graph,
                MoonConfig {
                    name: manifest.name.clone(),
                    radius: manifest.radius,
                    distance: manifest.distance,
                    appearance: manifest.material.appearance(),
                    year: manifest.year,
                },
            )?;
            planet.add_moon(graph, &moon)?;
        }
        if let Some(ring) = &self.ring {
            let ring = Ring::build(
                graph,
                &self.name,
                ring.inner_radius,
                ring.outer_radius,
                ring.texture.clone(),
            )?;
            planet.add_ring(graph, &ring)?;
        }
        Ok(planet)
    }
}
