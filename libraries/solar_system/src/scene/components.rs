use super::asset::SolarSystem;
use bevy::prelude::*;

/// Spawns the scene of a solar-system asset beneath this entity once loaded.
#[derive(Debug, Clone, Component, Deref)]
#[require(Transform, Visibility)]
pub struct SolarSystemRoot(pub Handle<SolarSystem>);

/// Added to a [`SolarSystemRoot`] once its scene has been instantiated.
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct SolarSystemSpawned;

/// The camera looking at a spawned system, configured by its
/// [`CameraConfig`](super::CameraConfig).
#[derive(Debug, Copy, Clone, Default, Reflect, Component)]
#[reflect(Component)]
pub struct SceneCamera;
