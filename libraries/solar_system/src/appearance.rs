use bevy::asset::AssetLoadFailedEvent;
use bevy::math::Affine2;
use bevy::prelude::*;

pub struct AppearancePlugin;

impl Plugin for AppearancePlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<Appearance>()
            .register_type::<Surface>()
            .add_systems(Update, fall_back_to_white);
    }
}

/// Materials whose image failed to load are shown untextured.
fn fall_back_to_white(
    mut failed: EventReader<AssetLoadFailedEvent<Image>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for event in failed.read() {
        let count = strip_texture(&mut materials, event.id);
        if count > 0 {
            warn!(
                "Cannot load {}, {count} material(s) fall back to white: {}",
                event.path, event.error
            );
        }
    }
}

/// Unlit translucent surfaces only exist through their image, like the
/// orbital paths. Without it they are hidden rather than white.
fn is_decal(material: &StandardMaterial) -> bool {
    material.unlit && material.alpha_mode == AlphaMode::Blend
}

fn strip_texture(materials: &mut Assets<StandardMaterial>, image: AssetId<Image>) -> usize {
    let mut count = 0;
    for (_, material) in materials.iter_mut() {
        if material
            .base_color_texture
            .as_ref()
            .is_some_and(|texture| texture.id() == image)
        {
            material.base_color_texture = None;
            if is_decal(material) {
                material.base_color = Color::NONE;
            }
            count += 1;
        }
    }
    count
}

/// Visible appearance of a surface, resolved once at construction.
#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub enum Appearance {
    FlatColor(Color),
    /// Asset path of an image.
    Texture(String),
    /// Plain white.
    #[default]
    Default,
}

impl Appearance {
    /// A flat color wins over an image; with neither the surface is white.
    pub fn resolve(color: Option<Color>, image: Option<String>) -> Self {
        match (color, image) {
            (Some(color), _) => Self::FlatColor(color),
            (None, Some(image)) => Self::Texture(image),
            (None, None) => Self::Default,
        }
    }

    pub fn texture_or_white(image: Option<String>) -> Self {
        Self::resolve(None, image)
    }

    pub fn is_flat_color(&self) -> bool {
        matches!(self, Self::FlatColor(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
pub enum Lighting {
    #[default]
    Lit,
    /// Ignores scene lights.
    Constant,
}

#[derive(Debug, Clone, PartialEq, Default, Reflect)]
pub struct Surface {
    pub appearance: Appearance,
    pub lighting: Lighting,
    pub double_sided: bool,
    /// Blends the image over what lies behind instead of drawing it opaque.
    pub translucent: bool,
    /// Rotation of texture coordinates, in radians.
    pub uv_rotation: f32,
}

impl Surface {
    pub fn lit(appearance: Appearance) -> Self {
        Self {
            appearance,
            ..default()
        }
    }

    pub fn constant(appearance: Appearance) -> Self {
        Self {
            appearance,
            lighting: Lighting::Constant,
            ..default()
        }
    }

    pub fn double_sided(self) -> Self {
        Self {
            double_sided: true,
            ..self
        }
    }

    pub fn translucent(self) -> Self {
        Self {
            translucent: true,
            ..self
        }
    }

    pub fn with_uv_rotation(self, uv_rotation: f32) -> Self {
        Self {
            uv_rotation,
            ..self
        }
    }

    /// Texture path to load, if any.
    pub fn texture(&self) -> Option<&str> {
        match &self.appearance {
            Appearance::Texture(path) => Some(path),
            _ => None,
        }
    }

    pub fn to_material(&self, texture: Option<Handle<Image>>) -> StandardMaterial {
        let base_color = match &self.appearance {
            Appearance::FlatColor(color) => *color,
            Appearance::Texture(_) | Appearance::Default => Color::WHITE,
        };
        let mut material = StandardMaterial {
            base_color,
            base_color_texture: texture,
            unlit: self.lighting == Lighting::Constant,
            alpha_mode: if self.translucent {
                AlphaMode::Blend
            } else {
                AlphaMode::Opaque
            },
            double_sided: self.double_sided,
            cull_mode: (!self.double_sided).then_some(bevy::render::render_resource::Face::Back),
            uv_transform: Affine2::from_angle(self.uv_rotation),
            ..default()
        };
        if is_decal(&material) && material.base_color_texture.is_none() {
            material.base_color = Color::NONE;
        }
        material
    }

    pub fn create_material(&self, asset_server: &AssetServer) -> StandardMaterial {
        let texture = self.texture().map(|path| asset_server.load(path.to_string()));
        self.to_material(texture)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_texture_only_touches_matching_materials() {
        let mut images = Assets::<Image>::default();
        let missing = images.add(Image::default());
        let present = images.add(Image::default());
        let mut materials = Assets::<StandardMaterial>::default();
        let a = materials.add(Surface::lit(Appearance::Default).to_material(Some(missing.clone())));
        let b = materials.add(Surface::lit(Appearance::Default).to_material(Some(present.clone())));

        assert_eq!(strip_texture(&mut materials, missing.id()), 1);
        assert!(materials.get(&a).unwrap().base_color_texture.is_none());
        assert_eq!(
            materials.get(&b).unwrap().base_color_texture.as_ref(),
            Some(&present)
        );
        assert_eq!(materials.get(&a).unwrap().base_color, Color::WHITE);
    }

    #[test]
    fn opaque_unless_translucent() {
        let surface = Surface::lit(Appearance::Texture("earth.jpg".into()));
        assert_eq!(surface.to_material(None).alpha_mode, AlphaMode::Opaque);
        assert_eq!(
            surface.translucent().to_material(None).alpha_mode,
            AlphaMode::Blend
        );
    }

    #[test]
    fn decal_without_image_is_hidden() {
        let mut images = Assets::<Image>::default();
        let missing = images.add(Image::default());
        let decal = Surface::constant(Appearance::Texture("orbit.png".into())).translucent();
        let ring = Surface::lit(Appearance::Texture("ring.png".into())).translucent();
        let mut materials = Assets::<StandardMaterial>::default();
        let decal = materials.add(decal.to_material(Some(missing.clone())));
        let ring = materials.add(ring.to_material(Some(missing.clone())));

        assert_eq!(strip_texture(&mut materials, missing.id()), 2);
        assert_eq!(materials.get(&decal).unwrap().base_color.alpha(), 0.0);
        assert_eq!(materials.get(&ring).unwrap().base_color, Color::WHITE);
    }

    #[test]
    fn color_takes_precedence_over_image() {
        let appearance = Appearance::resolve(Some(Color::srgb(1.0, 0.0, 0.0)), Some("earth".into()));
        assert_eq!(appearance, Appearance::FlatColor(Color::srgb(1.0, 0.0, 0.0)));
    }

    #[test]
    fn image_used_without_color() {
        let appearance = Appearance::resolve(None, Some("textures/earth.jpg".into()));
        assert_eq!(appearance, Appearance::Texture("textures/earth.jpg".into()));
        assert!(!appearance.is_flat_color());
    }

    #[test]
    fn falls_back_to_white() {
        let appearance = Appearance::resolve(None, None);
        assert_eq!(appearance, Appearance::Default);
        let material = Surface::lit(appearance).to_material(None);
        assert_eq!(material.base_color, Color::WHITE);
        assert!(material.base_color_texture.is_none());
    }

    #[test]
    fn constant_double_sided_surface_is_unlit_and_not_culled() {
        let material = Surface::constant(Appearance::Default)
            .double_sided()
            .to_material(None);
        assert!(material.unlit);
        assert!(material.double_sided);
        assert!(material.cull_mode.is_none());
    }

    #[test]
    fn flat_color_has_no_texture_to_load() {
        let surface = Surface::lit(Appearance::FlatColor(Color::srgb(0.2, 0.4, 0.8)));
        assert_eq!(surface.texture(), None);
        assert_eq!(surface.to_material(None).base_color, Color::srgb(0.2, 0.4, 0.8));
    }
}
