use crate::appearance::{Appearance, Surface};
use crate::graph::{Node, NodeId, NodeRole, SceneGraph};
use crate::shape::Shape;
use bevy::prelude::*;

pub const ORBIT_TEXTURE: &str = "textures/orbit.png";

pub struct OrbitPlugin {
    pub draw_orbits: bool,
}

impl Default for OrbitPlugin {
    fn default() -> Self {
        Self { draw_orbits: true }
    }
}

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<OrbitalPath>()
            .insert_resource(DrawOrbits(self.draw_orbits))
            .add_systems(
                PostUpdate,
                sync_orbit_visibility.run_if(resource_changed::<DrawOrbits>),
            )
            .add_observer(on_add_orbital_path);
    }
}

#[derive(Resource, Deref, DerefMut)]
pub struct DrawOrbits(pub bool);

/// Marks the decorative ring tracing an orbit.
#[derive(Debug, Copy, Clone, Default, Component, Reflect)]
#[reflect(Component)]
pub struct OrbitalPath;

/// Builds the flat ring marking an orbit of radius `orbit` for a body of
/// radius `object_radius`.
///
/// The plane spans `2 * orbit + object_radius` so the painted band sits near
/// the orbit circle. It lies in the XZ plane, the plane swept by the collar.
pub fn orbital_path(graph: &mut SceneGraph, name: &str, orbit: f32, object_radius: f32) -> NodeId {
    let size = orbit * 2.0 + object_radius;
    graph.add(
        Node::new(format!("{name} (Orbital Path)"))
            .with_role(NodeRole::OrbitalPath)
            .with_geometry(
                Shape::plane(size, size),
                Surface::constant(Appearance::Texture(ORBIT_TEXTURE.to_string()))
                    .double_sided()
                    .translucent(),
            ),
    )
}

fn visibility(draw: bool) -> Visibility {
    if draw {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

fn on_add_orbital_path(
    trigger: Trigger<OnAdd, OrbitalPath>,
    draw_orbits: Res<DrawOrbits>,
    mut q: Query<&mut Visibility>,
) {
    if let Ok(mut vis) = q.get_mut(trigger.entity()) {
        *vis = visibility(**draw_orbits);
    }
}

fn sync_orbit_visibility(
    draw_orbits: Res<DrawOrbits>,
    mut q: Query<&mut Visibility, With<OrbitalPath>>,
) {
    debug!("Setting orbital path visibility to {}", **draw_orbits);
    for mut vis in &mut q {
        *vis = visibility(**draw_orbits);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::appearance::Lighting;

    #[test]
    fn path_is_sized_to_orbit_diameter_plus_radius() {
        let mut graph = SceneGraph::new();
        let id = orbital_path(&mut graph, "Earth", 8.0, 0.5);
        let node = &graph[id];
        assert_eq!(node.role, NodeRole::OrbitalPath);
        assert_eq!(node.shape, Some(Shape::plane(16.5, 16.5)));
        assert_eq!(node.rotation, Quat::IDENTITY);
        let surface = node.surface.as_ref().unwrap();
        assert!(surface.double_sided);
        assert_eq!(surface.lighting, Lighting::Constant);
        assert_eq!(surface.texture(), Some(ORBIT_TEXTURE));
    }

    #[test]
    fn path_blends_over_the_scene() {
        let mut graph = SceneGraph::new();
        let id = orbital_path(&mut graph, "Mars", 12.0, 0.4);
        let surface = graph[id].surface.as_ref().unwrap();
        let material = surface.to_material(Some(Handle::default()));
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!(material.unlit);
        assert_eq!(material.cull_mode, None);

        // No image means nothing to draw, not a white square.
        assert_eq!(surface.to_material(None).base_color.alpha(), 0.0);
    }

    #[test]
    fn hiding_orbits_hides_paths() {
        let mut app = App::new();
        app.add_plugins(OrbitPlugin::default());
        let path = app
            .world_mut()
            .spawn((OrbitalPath, Visibility::default()))
            .id();
        app.update();
        assert_eq!(app.world().get::<Visibility>(path), Some(&Visibility::Inherited));

        app.world_mut().resource_mut::<DrawOrbits>().0 = false;
        app.update();
        assert_eq!(app.world().get::<Visibility>(path), Some(&Visibility::Hidden));
    }
}
