use super::asset::SolarSystem;
use super::components::{SceneCamera, SolarSystemRoot, SolarSystemSpawned};
use crate::animation::PerpetualRotation;
use crate::body::PlanetaryBody;
use crate::graph::{NodeId, NodeRole, SceneGraph};
use crate::orbit::OrbitalPath;
use crate::skybox::SkyboxFaces;
use crate::system::Sun;
use bevy::asset::LoadState;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;

#[allow(clippy::too_many_arguments)]
pub(crate) fn spawn_loaded_systems(
    mut commands: Commands,
    q_roots: Query<(Entity, &SolarSystemRoot), Without<SolarSystemSpawned>>,
    systems: Res<Assets<SolarSystem>>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    time: Res<Time<Virtual>>,
    mut app_exit: EventWriter<AppExit>,
) {
    for (entity, root) in &q_roots {
        let Some(system) = systems.get(&root.0) else {
            if let LoadState::Failed(err) = asset_server.load_state(root.id()) {
                error!("Cannot load solar system: {err}");
                commands.entity(entity).insert(SolarSystemSpawned);
                app_exit.send(AppExit::error());
            }
            continue;
        };

        info!(
            "Spawning solar system with {} planets",
            system.system.planets().len()
        );
        let mut instantiate = Instantiate {
            graph: &system.graph,
            asset_server: &asset_server,
            meshes: &mut meshes,
            materials: &mut materials,
            epoch: time.elapsed_secs_f64(),
        };
        let light = &system.manifest.light;
        commands
            .entity(entity)
            .insert(SolarSystemSpawned)
            .with_children(|parent| {
                for root in system.graph.roots() {
                    instantiate.spawn(parent, root);
                }
                parent.spawn((
                    Name::new("Sunlight"),
                    PointLight {
                        intensity: light.intensity,
                        range: light.range,
                        shadows_enabled: true,
                        ..default()
                    },
                ));
            });

        let mut camera = commands.spawn((
            Name::new("Camera"),
            SceneCamera,
            system.manifest.camera.clone(),
        ));
        if let Some(skybox) = &system.manifest.skybox {
            camera.insert(SkyboxFaces::load(&asset_server, skybox));
        }
    }
}

struct Instantiate<'a> {
    graph: &'a SceneGraph,
    asset_server: &'a AssetServer,
    meshes: &'a mut Assets<Mesh>,
    materials: &'a mut Assets<StandardMaterial>,
    epoch: f64,
}

impl Instantiate<'_> {
    fn spawn(&mut self, parent: &mut ChildBuilder, id: NodeId) {
        let graph = self.graph;
        let node = &graph[id];
        let mut entity = parent.spawn((
            Name::new(node.name.clone()),
            node.role,
            node.transform(),
            Visibility::default(),
        ));
        if let (Some(shape), Some(surface)) = (&node.shape, &node.surface) {
            entity.insert((
                Mesh3d(self.meshes.add(shape.mesh())),
                MeshMaterial3d(self.materials.add(surface.create_material(self.asset_server))),
            ));
        }
        if node.is_animated() {
            entity.insert(PerpetualRotation::new(
                node.rotation,
                node.animations().map(|(_, animation)| *animation),
                self.epoch,
            ));
        }
        if node.role.is_body() {
            entity.insert(PlanetaryBody);
        }
        match node.role {
            NodeRole::Sun => {
                entity.insert((Sun, NotShadowCaster));
            }
            NodeRole::OrbitalPath => {
                entity.insert((OrbitalPath, NotShadowCaster));
            }
            _ => {}
        }
        entity.with_children(|children| {
            for &child in node.children() {
                self.spawn(children, child);
            }
        });
    }
}
