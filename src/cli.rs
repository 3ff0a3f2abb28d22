use crate::app;
use bevy::app::AppExit;
use bevy::asset::io::file::FileAssetReader;
use bevy::window::WindowResolution;
use clap::ArgAction;
use solar_system::scene::SolarSystem;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(clap::Parser)]
#[clap(about = "Animated, textured model of the solar system")]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) fn run(self) -> AppExit {
        self.command.run()
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Print the render graph
    Dump,
    /// Open the viewer
    Run {
        /// Scene manifest, relative to the asset directory
        #[clap(long, default_value = app::DEFAULT_SCENE)]
        scene: String,
        #[clap(short, long)]
        resolution: Option<Resolution>,
        #[clap(long, action = ArgAction::SetTrue)]
        inspector: bool,
        /// Simulated seconds per real second
        #[clap(short, long, default_value_t = 1.0, value_parser = parse_time_scale)]
        time_scale: f32,
    },
    /// Print the node hierarchy a scene manifest describes
    Tree {
        /// Scene manifest, relative to the asset directory
        #[clap(long, default_value = app::DEFAULT_SCENE)]
        scene: PathBuf,
    },
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Resolution {
    width: f32,
    height: f32,
}

impl FromStr for Resolution {
    type Err = ResolutionInvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').ok_or(ResolutionInvalidFormat)?;
        let width = w.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        let height = h.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        if width <= 0.0 || height <= 0.0 {
            return Err(ResolutionInvalidFormat);
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid format for resolution; expected <width>x<height>")]
struct ResolutionInvalidFormat;

#[derive(Debug, thiserror::Error)]
enum TimeScaleError {
    #[error("Invalid time scale: {0}")]
    Parse(#[from] std::num::ParseFloatError),
    #[error("Time scale must be positive and finite, got {0}")]
    OutOfRange(f32),
}

fn parse_time_scale(s: &str) -> Result<f32, TimeScaleError> {
    let scale = s.parse::<f32>()?;
    if scale.is_finite() && scale > 0.0 {
        Ok(scale)
    } else {
        Err(TimeScaleError::OutOfRange(scale))
    }
}

/// Resolves a scene the way the asset server does, below `assets/` in
/// `BEVY_ASSET_ROOT`, the manifest directory or the executable directory.
fn asset_path(scene: &Path) -> PathBuf {
    FileAssetReader::get_base_path()
        .join(app::ASSET_DIR)
        .join(scene)
}

impl CliCommand {
    fn run(self) -> AppExit {
        match self {
            #[cfg(feature = "print-render-graph")]
            Self::Dump => {
                let mut app = app::get_app(Default::default());
                bevy_mod_debugdump::print_render_graph(&mut app);
                AppExit::Success
            }
            #[cfg(not(feature = "print-render-graph"))]
            Self::Dump => {
                eprintln!("Rebuild with the print-render-graph feature to dump the render graph");
                AppExit::error()
            }
            Self::Run {
                scene,
                resolution,
                inspector,
                time_scale,
            } => app::get_app(app::AppSettings {
                resolution: resolution
                    .map(|r| WindowResolution::new(r.width, r.height))
                    .unwrap_or_default(),
                with_inspector: inspector,
                scene,
                time_scale,
            })
            .run(),
            Self::Tree { scene } => {
                let path = asset_path(&scene);
                match SolarSystem::read(&path) {
                    Ok(system) => {
                        print!("{}", system.graph);
                        AppExit::Success
                    }
                    Err(err) => {
                        eprintln!("Cannot read {}: {err}", path.display());
                        AppExit::error()
                    }
                }
            }
        }
    }
}
