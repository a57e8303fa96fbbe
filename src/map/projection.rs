use bevy::prelude::*;
use hexx::{HexLayout, HexOrientation};

use crate::constants::TILE_SIZE;
use crate::map::hex::HexCube;

/// Linear hex-to-pixel layout owned by the rendering side.
///
/// Pointy-top orientation, uniform hex size, and a pixel origin for the cube origin.
/// `to_hex` rounds to the nearest cell, so only nearest-cell round trips are exact.
#[derive(Debug, Clone)]
pub struct Projection {
    layout: HexLayout,
}

impl Projection {
    pub fn new(hex_size: f32, origin: Vec2) -> Self {
        Self {
            layout: HexLayout {
                orientation: HexOrientation::Pointy,
                origin,
                scale: Vec2::splat(hex_size),
                ..default()
            },
        }
    }

    pub fn hex_size(&self) -> f32 {
        self.layout.scale.x
    }

    pub fn origin(&self) -> Vec2 {
        self.layout.origin
    }

    pub fn layout(&self) -> &HexLayout {
        &self.layout
    }

    pub fn to_screen(&self, cube: HexCube) -> Vec2 {
        self.layout.hex_to_world_pos(cube.into())
    }

    pub fn to_hex(&self, position: Vec2) -> HexCube {
        self.layout.world_pos_to_hex(position).into()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::new(TILE_SIZE, Vec2::ZERO)
    }
}
