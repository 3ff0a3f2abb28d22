use super::error::SceneLoadError;
use super::manifest::{BuiltSystem, SystemManifest};
use crate::graph::SceneGraph;
use crate::system::System;
use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use std::path::Path;

#[derive(Default)]
pub struct SolarSystemLoader;

impl AssetLoader for SolarSystemLoader {
    type Asset = SolarSystem;
    type Settings = ();
    type Error = SceneLoadError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        let manifest: SystemManifest = serde_yaml::from_slice(&data)?;
        let system = SolarSystem::from_manifest(manifest)?;
        debug!(
            "Loaded {} with {} planets ({} nodes)",
            load_context.path().display(),
            system.system.planets().len(),
            system.graph.len()
        );
        Ok(system)
    }

    fn extensions(&self) -> &[&str] {
        &["system.yaml"]
    }
}

/// A parsed manifest together with the scene graph it describes.
#[derive(Debug, Clone, Asset, TypePath)]
pub struct SolarSystem {
    pub manifest: SystemManifest,
    pub graph: SceneGraph,
    pub system: System,
}

impl SolarSystem {
    pub fn from_manifest(manifest: SystemManifest) -> Result<Self, SceneLoadError> {
        let BuiltSystem { graph, system } = manifest.build()?;
        Ok(Self {
            manifest,
            graph,
            system,
        })
    }

    /// Reads a manifest straight from the filesystem, bypassing the asset server.
    pub fn read(path: impl AsRef<Path>) -> Result<Self, SceneLoadError> {
        let data = std::fs::read_to_string(path)?;
        Self::from_manifest(serde_yaml::from_str(&data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_missing_file_is_an_io_error() {
        let result = SolarSystem::read("does/not/exist.system.yaml");
        assert!(matches!(result, Err(SceneLoadError::IoError(_))));
    }

    #[test]
    fn empty_manifest_has_only_the_sun() {
        let system = SolarSystem::from_manifest(SystemManifest::default()).unwrap();
        assert!(system.system.planets().is_empty());
        assert_eq!(system.graph.len(), 2);
        assert_eq!(system.graph.to_string(), "Solar System\n  Sun [Sun] spin=60s\n");
    }
}
