use crate::appearance::{Appearance, Surface};
use crate::error::ShapeError;
use crate::graph::{Node, NodeId, NodeRole, SceneGraph};
use crate::shape::Shape;
use std::f32::consts::FRAC_PI_4;

/// Decorative ring around a planet. Never animated on its own.
#[derive(Debug, Clone)]
pub struct Ring {
    pub node: NodeId,
    pub inner_radius: f32,
    pub outer_radius: f32,
}

impl Ring {
    /// The whole tube carries the top-face material: the image, turned by a
    /// quarter of π, or plain white.
    pub fn build(
        graph: &mut SceneGraph,
        planet_name: &str,
        inner_radius: f32,
        outer_radius: f32,
        image: Option<String>,
    ) -> Result<Self, ShapeError> {
        let shape = Shape::ring(inner_radius, outer_radius)?;
        let surface = Surface::lit(Appearance::texture_or_white(image))
            .translucent()
            .with_uv_rotation(FRAC_PI_4);
        let node = graph.add(
            Node::new(format!("{planet_name} (Ring)"))
                .with_role(NodeRole::Ring)
                .with_geometry(shape, surface),
        );
        Ok(Self {
            node,
            inner_radius,
            outer_radius,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::RING_HEIGHT;
    use bevy::prelude::{AlphaMode, Color, Handle};

    #[test]
    fn ring_geometry_matches_radii() {
        let mut graph = SceneGraph::new();
        let ring = Ring::build(&mut graph, "Saturn", 2.0, 3.0, None).unwrap();
        match graph[ring.node].shape {
            Some(Shape::Tube {
                inner_radius,
                outer_radius,
                height,
                ..
            }) => {
                assert_eq!(inner_radius, 2.0);
                assert_eq!(outer_radius, 3.0);
                assert_eq!(height, RING_HEIGHT);
                assert_eq!(height, 0.1);
            }
            other => panic!("Expected a tube, got {other:?}"),
        }
    }

    #[test]
    fn ring_without_image_is_white() {
        let mut graph = SceneGraph::new();
        let ring = Ring::build(&mut graph, "Uranus", 1.0, 1.5, None).unwrap();
        let surface = graph[ring.node].surface.as_ref().unwrap();
        assert_eq!(surface.appearance, Appearance::Default);
        assert_eq!(surface.uv_rotation, FRAC_PI_4);
        let material = surface.to_material(None);
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert_eq!(material.base_color, Color::WHITE);
    }

    #[test]
    fn ring_with_image_is_textured() {
        let mut graph = SceneGraph::new();
        let ring = Ring::build(
            &mut graph,
            "Saturn",
            1.2,
            2.4,
            Some("textures/saturn_ring.png".to_string()),
        )
        .unwrap();
        let node = &graph[ring.node];
        assert_eq!(node.role, NodeRole::Ring);
        assert_eq!(
            node.surface.as_ref().and_then(Surface::texture),
            Some("textures/saturn_ring.png")
        );
        let material = node.surface.as_ref().unwrap().to_material(Some(Handle::default()));
        assert_eq!(material.alpha_mode, AlphaMode::Blend);
        assert!(!material.unlit);
    }

    #[test]
    fn inverted_ring_is_rejected() {
        let mut graph = SceneGraph::new();
        assert!(Ring::build(&mut graph, "Saturn", 3.0, 2.0, None).is_err());
        assert!(graph.is_empty());
    }
}
