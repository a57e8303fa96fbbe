use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::map::error::MapError;

/// Base terrain of a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TerrainType {
    /// Provisional marker between the heightmap and biome phases
    #[default]
    Water,
    Ocean,
    Shore,
    Desert,
    Plains,
    Grass,
    Snow,
    Tundra,
}

/// Overlay on top of the terrain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FeatureType {
    #[default]
    None,
    Forest,
    Mountains,
    Ice,
    Oasis,
    Marsh,
    Reef,
    Rainforest,
}

/// Special resource on a tile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ResourceType {
    #[default]
    None,
    Fish,
    Wheat,
    Cattle,
    Horses,
    Iron,
    Gems,
}

/// Climate band, ordered from coldest to warmest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
pub enum ClimateZone {
    #[default]
    Polar,
    SubPolar,
    Temperate,
    SubTropic,
    Tropic,
}

/// Per-cell state of the generated map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tile {
    pub terrain: TerrainType,
    pub feature: FeatureType,
    pub resource: ResourceType,
    pub is_hills: bool,
    pub climate_zone: ClimateZone,
}

impl Tile {
    pub fn is_water(&self) -> bool {
        self.terrain.is_water()
    }

    pub fn is_mountain(&self) -> bool {
        self.feature == FeatureType::Mountains
    }
}

impl TerrainType {
    pub const CATEGORY: &'static str = "terrain";

    pub const ALL: [TerrainType; 8] = [
        TerrainType::Water,
        TerrainType::Ocean,
        TerrainType::Shore,
        TerrainType::Desert,
        TerrainType::Plains,
        TerrainType::Grass,
        TerrainType::Snow,
        TerrainType::Tundra,
    ];

    pub fn is_water(self) -> bool {
        matches!(
            self,
            TerrainType::Water | TerrainType::Ocean | TerrainType::Shore
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            TerrainType::Water => "water",
            TerrainType::Ocean => "ocean",
            TerrainType::Shore => "shore",
            TerrainType::Desert => "desert",
            TerrainType::Plains => "plains",
            TerrainType::Grass => "grass",
            TerrainType::Snow => "snow",
            TerrainType::Tundra => "tundra",
        }
    }

    /// Glyph used by the ASCII preview
    pub fn glyph(self) -> char {
        match self {
            TerrainType::Water | TerrainType::Ocean => '~',
            TerrainType::Shore => '-',
            TerrainType::Desert => 'd',
            TerrainType::Plains => 'p',
            TerrainType::Grass => 'g',
            TerrainType::Snow => 's',
            TerrainType::Tundra => 't',
        }
    }
}

impl FeatureType {
    pub const CATEGORY: &'static str = "feature";

    pub const ALL: [FeatureType; 8] = [
        FeatureType::None,
        FeatureType::Forest,
        FeatureType::Mountains,
        FeatureType::Ice,
        FeatureType::Oasis,
        FeatureType::Marsh,
        FeatureType::Reef,
        FeatureType::Rainforest,
    ];

    pub fn name(self) -> &'static str {
        match self {
            FeatureType::None => "none",
            FeatureType::Forest => "forest",
            FeatureType::Mountains => "mountains",
            FeatureType::Ice => "ice",
            FeatureType::Oasis => "oasis",
            FeatureType::Marsh => "marsh",
            FeatureType::Reef => "reef",
            FeatureType::Rainforest => "rainforest",
        }
    }
}

impl ResourceType {
    pub const CATEGORY: &'static str = "resource";

    pub const ALL: [ResourceType; 7] = [
        ResourceType::None,
        ResourceType::Fish,
        ResourceType::Wheat,
        ResourceType::Cattle,
        ResourceType::Horses,
        ResourceType::Iron,
        ResourceType::Gems,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ResourceType::None => "none",
            ResourceType::Fish => "fish",
            ResourceType::Wheat => "wheat",
            ResourceType::Cattle => "cattle",
            ResourceType::Horses => "horses",
            ResourceType::Iron => "iron",
            ResourceType::Gems => "gems",
        }
    }
}

impl ClimateZone {
    pub const CATEGORY: &'static str = "climate";

    /// Coldest to warmest
    pub const ALL: [ClimateZone; 5] = [
        ClimateZone::Polar,
        ClimateZone::SubPolar,
        ClimateZone::Temperate,
        ClimateZone::SubTropic,
        ClimateZone::Tropic,
    ];

    /// Position on the polar-to-tropic scale
    pub fn band(self) -> usize {
        self as usize
    }

    /// One step warmer; tropic stays tropic
    pub fn warmer(self) -> ClimateZone {
        match self {
            ClimateZone::Polar => ClimateZone::SubPolar,
            ClimateZone::SubPolar => ClimateZone::Temperate,
            ClimateZone::Temperate => ClimateZone::SubTropic,
            ClimateZone::SubTropic | ClimateZone::Tropic => ClimateZone::Tropic,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ClimateZone::Polar => "polar",
            ClimateZone::SubPolar => "sub_polar",
            ClimateZone::Temperate => "temperate",
            ClimateZone::SubTropic => "sub_tropic",
            ClimateZone::Tropic => "tropic",
        }
    }
}

/// Name of the tile category `value` belongs to, if any
fn category_of(value: &str) -> Option<&'static str> {
    if TerrainType::ALL.iter().any(|t| t.name() == value) {
        Some(TerrainType::CATEGORY)
    } else if FeatureType::ALL.iter().any(|f| f.name() == value) {
        Some(FeatureType::CATEGORY)
    } else if ResourceType::ALL.iter().any(|r| r.name() == value) {
        Some(ResourceType::CATEGORY)
    } else if ClimateZone::ALL.iter().any(|c| c.name() == value) {
        Some(ClimateZone::CATEGORY)
    } else {
        None
    }
}

/// Error for a tag that did not match `expected`
fn decode_error(expected: &'static str, value: &str) -> MapError {
    match category_of(value) {
        Some(found) if found != expected => MapError::TypeMismatch {
            expected,
            found,
            value: value.to_string(),
        },
        _ => MapError::UnknownIdentifier {
            category: expected,
            value: value.to_string(),
        },
    }
}

impl FromStr for TerrainType {
    type Err = MapError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "water" => Ok(TerrainType::Water),
            "ocean" => Ok(TerrainType::Ocean),
            "shore" => Ok(TerrainType::Shore),
            "desert" => Ok(TerrainType::Desert),
            "plains" => Ok(TerrainType::Plains),
            "grass" => Ok(TerrainType::Grass),
            "snow" => Ok(TerrainType::Snow),
            "tundra" => Ok(TerrainType::Tundra),
            other => Err(decode_error(Self::CATEGORY, other)),
        }
    }
}

impl FromStr for FeatureType {
    type Err = MapError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(FeatureType::None),
            "forest" => Ok(FeatureType::Forest),
            "mountains" => Ok(FeatureType::Mountains),
            "ice" => Ok(FeatureType::Ice),
            "oasis" => Ok(FeatureType::Oasis),
            "marsh" => Ok(FeatureType::Marsh),
            "reef" => Ok(FeatureType::Reef),
            "rainforest" => Ok(FeatureType::Rainforest),
            other => Err(decode_error(Self::CATEGORY, other)),
        }
    }
}

impl FromStr for ResourceType {
    type Err = MapError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(ResourceType::None),
            "fish" => Ok(ResourceType::Fish),
            "wheat" => Ok(ResourceType::Wheat),
            "cattle" => Ok(ResourceType::Cattle),
            "horses" => Ok(ResourceType::Horses),
            "iron" => Ok(ResourceType::Iron),
            "gems" => Ok(ResourceType::Gems),
            other => Err(decode_error(Self::CATEGORY, other)),
        }
    }
}

impl FromStr for ClimateZone {
    type Err = MapError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "polar" => Ok(ClimateZone::Polar),
            "sub_polar" => Ok(ClimateZone::SubPolar),
            "temperate" => Ok(ClimateZone::Temperate),
            "sub_tropic" => Ok(ClimateZone::SubTropic),
            "tropic" => Ok(ClimateZone::Tropic),
            other => Err(decode_error(Self::CATEGORY, other)),
        }
    }
}

impl fmt::Display for TerrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for FeatureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
