//! Cube-map skybox assembled from six separate face images.
//!
//! The faces are mandatory once requested: a face that fails to load, or that
//! does not match the others, stops the app.

use crate::scene::SkyboxConfig;
use bevy::asset::LoadState;
use bevy::core_pipeline::Skybox;
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{
    Extent3d, TextureDimension, TextureFormat, TextureViewDescriptor, TextureViewDimension,
};
use thiserror::Error;

pub struct SkyboxPlugin;

impl Plugin for SkyboxPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, stitch_skybox);
    }
}

#[derive(Debug, Error)]
pub enum SkyboxError {
    #[error("Skybox face {path} could not be loaded: {reason}")]
    MissingFace { path: String, reason: String },
    #[error("A cube map needs 6 faces, got {0}")]
    WrongFaceCount(usize),
    #[error("Skybox faces must be square, got {width}x{height}")]
    NotSquare { width: u32, height: u32 },
    #[error("Skybox face {index} is {width}x{height} {format:?}, expected {expected_width}x{expected_height} {expected_format:?}")]
    MismatchedFace {
        index: usize,
        width: u32,
        height: u32,
        format: TextureFormat,
        expected_width: u32,
        expected_height: u32,
        expected_format: TextureFormat,
    },
}

/// Face images waiting to be stitched into a [`Skybox`] on this camera.
#[derive(Debug, Clone, Component)]
pub struct SkyboxFaces {
    /// +X, -X, +Y, -Y, +Z, -Z.
    pub faces: [Handle<Image>; 6],
    pub brightness: f32,
}

impl SkyboxFaces {
    pub fn load(asset_server: &AssetServer, config: &SkyboxConfig) -> Self {
        Self {
            faces: config.faces().map(|path| asset_server.load(path.to_string())),
            brightness: config.brightness,
        }
    }

    /// `Ok(None)` while any face is still loading.
    fn try_stitch(
        &self,
        asset_server: &AssetServer,
        images: &Assets<Image>,
    ) -> Result<Option<Image>, SkyboxError> {
        let mut loaded = Vec::with_capacity(self.faces.len());
        for handle in &self.faces {
            if let LoadState::Failed(err) = asset_server.load_state(handle.id()) {
                return Err(SkyboxError::MissingFace {
                    path: handle
                        .path()
                        .map(|path| path.to_string())
                        .unwrap_or_else(|| format!("{:?}", handle.id())),
                    reason: err.to_string(),
                });
            }
            let Some(image) = images.get(handle) else {
                return Ok(None);
            };
            loaded.push(image);
        }
        stack_faces(&loaded).map(Some)
    }
}

/// Stacks six equally sized square images into one cube-map texture.
pub fn stack_faces(faces: &[&Image]) -> Result<Image, SkyboxError> {
    let [first, ..] = faces else {
        return Err(SkyboxError::WrongFaceCount(0));
    };
    if faces.len() != 6 {
        return Err(SkyboxError::WrongFaceCount(faces.len()));
    }
    let size = first.texture_descriptor.size;
    let format = first.texture_descriptor.format;
    if size.width != size.height {
        return Err(SkyboxError::NotSquare {
            width: size.width,
            height: size.height,
        });
    }

    let mut data = Vec::with_capacity(first.data.len() * faces.len());
    for (index, face) in faces.iter().enumerate() {
        let face_size = face.texture_descriptor.size;
        let face_format = face.texture_descriptor.format;
        if face_size != size || face_format != format {
            return Err(SkyboxError::MismatchedFace {
                index,
                width: face_size.width,
                height: face_size.height,
                format: face_format,
                expected_width: size.width,
                expected_height: size.height,
                expected_format: format,
            });
        }
        data.extend_from_slice(&face.data);
    }

    let mut image = Image::new(
        Extent3d {
            width: size.width,
            height: size.height * faces.len() as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        data,
        format,
        RenderAssetUsages::RENDER_WORLD,
    );
    image.reinterpret_stacked_2d_as_array(faces.len() as u32);
    image.texture_view_descriptor = Some(TextureViewDescriptor {
        dimension: Some(TextureViewDimension::Cube),
        ..default()
    });
    Ok(image)
}

fn stitch_skybox(
    mut commands: Commands,
    q: Query<(Entity, &SkyboxFaces)>,
    asset_server: Res<AssetServer>,
    mut images: ResMut<Assets<Image>>,
    mut app_exit: EventWriter<AppExit>,
) {
    for (entity, faces) in &q {
        match faces.try_stitch(&asset_server, &images) {
            Ok(None) => {}
            Ok(Some(image)) => {
                info!("Skybox ready on {entity}");
                let image = images.add(image);
                commands
                    .entity(entity)
                    .remove::<SkyboxFaces>()
                    .insert(Skybox {
                        image,
                        brightness: faces.brightness,
                        rotation: Quat::IDENTITY,
                    });
            }
            Err(err) => {
                error!("Cannot build skybox: {err}");
                commands.entity(entity).remove::<SkyboxFaces>();
                app_exit.send(AppExit::error());
            }
        }
    }
}
