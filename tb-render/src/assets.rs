use bevy_app::prelude::*;
use bevy_asset::{RenderAssetUsages, prelude::*};
use bevy_ecs::prelude::*;
use bevy_image::{Image, ImageSampler, TextureAtlas, TextureAtlasLayout};
use bevy_math::prelude::*;
use bevy_render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy_sprite::prelude::*;

pub struct AssetsPlugin;

#[derive(Debug, Resource)]
pub struct AssetHandles {
    pub character: Handle<Image>,
    pub character_layout: Handle<TextureAtlasLayout>,
}

/// The walk-cycle sheet shared by every sheet-animated actor: four rows (down, left, right,
/// up) of four frames, each [`CHARACTER_FRAME`] pixels square.
pub const CHARACTER_FRAME: u32 = 32;
pub const CHARACTER_COLUMNS: u32 = 4;
pub const CHARACTER_ROWS: u32 = 4;

const BODY: [u8; 4] = [226, 226, 226, 255];
const MARKER: [u8; 4] = [70, 70, 70, 255];
const FEET: [u8; 4] = [40, 40, 40, 255];

impl Plugin for AssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreStartup, load);
    }
}

impl AssetHandles {
    pub fn character(&self, index: usize) -> Sprite {
        Sprite::from_atlas_image(
            self.character.clone(),
            TextureAtlas {
                layout: self.character_layout.clone(),
                index,
            },
        )
    }
}

pub fn load(
    mut commands: Commands,
    mut images: ResMut<Assets<Image>>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
) {
    let mut character = Image::new(
        Extent3d {
            width: CHARACTER_FRAME * CHARACTER_COLUMNS,
            height: CHARACTER_FRAME * CHARACTER_ROWS,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        character_sheet(),
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::RENDER_WORLD,
    );
    character.sampler = ImageSampler::nearest();

    commands.insert_resource(AssetHandles {
        character: images.add(character),
        character_layout: layouts.add(TextureAtlasLayout::from_grid(
            UVec2::splat(CHARACTER_FRAME),
            CHARACTER_COLUMNS,
            CHARACTER_ROWS,
            None,
            None,
        )),
    });
}

/// RGBA pixels of the character sheet. Column 0 of each row is the standing pose; the
/// other columns shift the feet to suggest a stride.
pub fn character_sheet() -> Vec<u8> {
    let width = CHARACTER_FRAME * CHARACTER_COLUMNS;
    let height = CHARACTER_FRAME * CHARACTER_ROWS;

    let mut data = vec![0; (width * height * 4) as usize];
    for y in 0..height {
        for x in 0..width {
            let cell = UVec2::new(x / CHARACTER_FRAME, y / CHARACTER_FRAME);
            let local = IVec2::new((x % CHARACTER_FRAME) as i32, (y % CHARACTER_FRAME) as i32);

            if let Some(color) = character_pixel(cell, local) {
                let start = ((y * width + x) * 4) as usize;
                data[start..start + 4].copy_from_slice(&color);
            }
        }
    }
    data
}

fn character_pixel(cell: UVec2, local: IVec2) -> Option<[u8; 4]> {
    let marker = match cell.y {
        0 => IRect::new(12, 22, 20, 27),
        1 => IRect::new(8, 10, 12, 16),
        2 => IRect::new(20, 10, 24, 16),
        _ => IRect::new(12, 5, 20, 10),
    };
    let stride = if cell.x == 0 { 0 } else { cell.x as i32 - 2 };
    let feet = [
        IRect::new(10 + stride, 28, 14 + stride, 31),
        IRect::new(18 - stride, 28, 22 - stride, 31),
    ];

    if contains(marker, local) {
        Some(MARKER)
    } else if contains(IRect::new(8, 4, 24, 28), local) {
        Some(BODY)
    } else if feet.iter().any(|&foot| contains(foot, local)) {
        Some(FEET)
    } else {
        None
    }
}

fn contains(rect: IRect, point: IVec2) -> bool {
    point.cmpge(rect.min).all() && point.cmplt(rect.max).all()
}

#[cfg(test)]
mod tests {
    use bevy_math::prelude::*;

    use crate::assets::{
        CHARACTER_COLUMNS, CHARACTER_FRAME, CHARACTER_ROWS, character_pixel, character_sheet,
    };

    #[test]
    fn sheet_dimensions() {
        let data = character_sheet();
        assert_eq!(
            data.len(),
            (CHARACTER_FRAME * CHARACTER_COLUMNS * CHARACTER_FRAME * CHARACTER_ROWS * 4) as usize
        );
    }

    #[test]
    fn frames_differ() {
        let frame = |cell: UVec2| {
            (0..CHARACTER_FRAME as i32)
                .flat_map(|y| (0..CHARACTER_FRAME as i32).map(move |x| IVec2::new(x, y)))
                .map(|local| character_pixel(cell, local))
                .collect::<Vec<_>>()
        };

        assert_ne!(frame(UVec2::new(0, 1)), frame(UVec2::new(1, 1)));
        assert_ne!(frame(UVec2::new(1, 1)), frame(UVec2::new(3, 1)));
        assert_ne!(frame(UVec2::new(0, 0)), frame(UVec2::new(0, 3)));
    }
}
