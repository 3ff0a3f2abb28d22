use bevy::app::PluginGroupBuilder;
use bevy::prelude::*;

pub mod animation;
pub mod appearance;
pub mod body;
pub mod error;
pub mod graph;
pub mod orbit;
pub mod ring;
pub mod scene;
pub mod shape;
pub mod skybox;
pub mod system;

#[derive(Debug, Default)]
pub struct SolarSystemPlugin;

impl PluginGroup for SolarSystemPlugin {
    fn build(self) -> PluginGroupBuilder {
        PluginGroupBuilder::start::<Self>()
            .add(animation::AnimationPlugin)
            .add(appearance::AppearancePlugin)
            .add(body::BodyPlugin)
            .add(orbit::OrbitPlugin::default())
            .add(skybox::SkyboxPlugin)
            .add(scene::PlanetScenePlugin)
    }
}
