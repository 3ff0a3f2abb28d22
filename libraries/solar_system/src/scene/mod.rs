use bevy::prelude::*;

mod asset;
pub mod components;
mod error;
mod manifest;
mod spawn;

pub use asset::{SolarSystem, SolarSystemLoader};
pub use error::SceneLoadError;
pub use manifest::{
    BuiltSystem, CameraConfig, LightConfig, MaterialManifest, MoonManifest, PlanetManifest,
    RingManifest, SkyboxConfig, SystemManifest,
};

pub struct PlanetScenePlugin;

impl Plugin for PlanetScenePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<components::SolarSystemSpawned>()
            .register_type::<components::SceneCamera>()
            .register_type::<CameraConfig>()
            .init_asset::<SolarSystem>()
            .init_asset_loader::<SolarSystemLoader>()
            .add_systems(Update, spawn::spawn_loaded_systems);
    }
}
