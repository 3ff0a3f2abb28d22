use crate::error::ShapeError;
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

/// Tessellation used for every body sphere.
pub const SPHERE_SEGMENTS: u32 = 17;
pub const RING_HEIGHT: f32 = 0.1;
pub const RING_RADIAL_SEGMENTS: u32 = 17;
pub const RING_HEIGHT_SEGMENTS: u32 = 3;

#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub enum Shape {
    Sphere {
        radius: f32,
        segments: u32,
    },
    /// Hollow cylinder standing on the Y axis.
    Tube {
        inner_radius: f32,
        outer_radius: f32,
        height: f32,
        radial_segments: u32,
        height_segments: u32,
    },
    /// Flat rectangle lying in the XZ plane.
    Plane { width: f32, height: f32 },
}

impl Shape {
    pub fn sphere(radius: f32) -> Result<Self, ShapeError> {
        ensure_positive(radius)?;
        Ok(Self::Sphere {
            radius,
            segments: SPHERE_SEGMENTS,
        })
    }

    pub fn ring(inner_radius: f32, outer_radius: f32) -> Result<Self, ShapeError> {
        ensure_positive(inner_radius)?;
        ensure_positive(outer_radius)?;
        if inner_radius >= outer_radius {
            return Err(ShapeError::InvertedRing {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self::Tube {
            inner_radius,
            outer_radius,
            height: RING_HEIGHT,
            radial_segments: RING_RADIAL_SEGMENTS,
            height_segments: RING_HEIGHT_SEGMENTS,
        })
    }

    pub fn plane(width: f32, height: f32) -> Self {
        Self::Plane { width, height }
    }

    pub fn mesh(&self) -> Mesh {
        match *self {
            Self::Sphere { radius, segments } => Sphere::new(radius)
                .mesh()
                .uv(segments * 2, segments),
            Self::Tube {
                inner_radius,
                outer_radius,
                height,
                radial_segments,
                height_segments,
            } => Mesh::from(
                Extrusion::new(Annulus::new(inner_radius, outer_radius), height)
                    .mesh()
                    .resolution(radial_segments)
                    .segments(height_segments as usize),
            )
            // Extrusions grow along Z; stand the tube on Y instead.
            .rotated_by(Quat::from_rotation_x(-FRAC_PI_2)),
            Self::Plane { width, height } => {
                Mesh::from(Plane3d::default().mesh().size(width, height))
            }
        }
    }
}

fn ensure_positive(radius: f32) -> Result<(), ShapeError> {
    if radius.is_finite() && radius > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NonPositiveRadius(radius))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bevy::render::mesh::VertexAttributeValues;

    fn positions(mesh: &Mesh) -> Vec<[f32; 3]> {
        match mesh.attribute(Mesh::ATTRIBUTE_POSITION) {
            Some(VertexAttributeValues::Float32x3(positions)) => positions.clone(),
            other => panic!("Unexpected position attribute {other:?}"),
        }
    }

    #[test]
    fn ring_has_exact_radii_and_fixed_height() {
        let shape = Shape::ring(2.0, 3.0).unwrap();
        assert_eq!(
            shape,
            Shape::Tube {
                inner_radius: 2.0,
                outer_radius: 3.0,
                height: 0.1,
                radial_segments: 17,
                height_segments: 3,
            }
        );
    }

    #[test]
    fn ring_rejects_inverted_radii() {
        assert_eq!(
            Shape::ring(3.0, 2.0),
            Err(ShapeError::InvertedRing {
                inner: 3.0,
                outer: 2.0
            })
        );
        assert_eq!(Shape::ring(0.0, 2.0), Err(ShapeError::NonPositiveRadius(0.0)));
    }

    #[test]
    fn sphere_rejects_non_positive_radius() {
        assert_eq!(Shape::sphere(-1.0), Err(ShapeError::NonPositiveRadius(-1.0)));
        assert!(Shape::sphere(f32::NAN).is_err());
    }

    #[test]
    fn sphere_mesh_matches_radius() {
        let mesh = Shape::sphere(0.5).unwrap().mesh();
        for [x, y, z] in positions(&mesh) {
            assert_relative_eq!(Vec3::new(x, y, z).length(), 0.5, epsilon = 1e-4);
        }
    }

    #[test]
    fn ring_mesh_stands_on_y_axis() {
        let mesh = Shape::ring(2.0, 3.0).unwrap().mesh();
        for [x, y, z] in positions(&mesh) {
            assert!(y.abs() <= 0.05 + 1e-4, "y = {y}");
            let radial = Vec2::new(x, z).length();
            assert!((2.0 - 1e-3..=3.0 + 1e-3).contains(&radial), "radial = {radial}");
        }
    }

    #[test]
    fn plane_mesh_lies_in_xz_plane() {
        let mesh = Shape::plane(10.0, 10.0).mesh();
        for [x, y, z] in positions(&mesh) {
            assert_relative_eq!(y, 0.0);
            assert!(x.abs() <= 5.0 + 1e-4 && z.abs() <= 5.0 + 1e-4);
        }
    }
}
