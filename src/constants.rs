//! Generator constants and default configuration values
//!
//! This module centralizes the magic numbers used by the map generation pipeline.

// ============================================================================
// PROJECTION CONSTANTS
// ============================================================================

/// Default hex size (center to corner, in pixels)
pub const TILE_SIZE: f32 = 16.0;

// ============================================================================
// MAP DEFAULTS
// ============================================================================

/// Default map width in tiles
pub const DEFAULT_COLS: u32 = 64;

/// Default map height in tiles
pub const DEFAULT_ROWS: u32 = 40;

/// Default generation seed
pub const DEFAULT_SEED: u64 = 12345;

/// Share of cells that end up as land
pub const DEFAULT_LAND_PERCENTAGE: f64 = 0.4;

/// Share of the land that is covered by mountains
pub const DEFAULT_MOUNTAIN_PERCENTAGE: f64 = 0.08;

/// Share of cells just below sea level that form the shallow shelf
pub const DEFAULT_SHELF_PERCENTAGE: f64 = 0.08;

/// Normalized elevation above which a tile counts as high ground
pub const DEFAULT_HIGH_ELEVATION: f64 = 0.7;

// ============================================================================
// NOISE CONSTANTS
// ============================================================================

/// Noise zoom for continent maps
pub const ZOOM_CONTINENTS: f64 = 0.125;

/// Noise zoom for single-landmass maps (bigger features)
pub const ZOOM_PANGAEA: f64 = 0.07;

/// Noise zoom for island maps (smaller features)
pub const ZOOM_ARCHIPELAGO: f64 = 0.22;

/// Weight of the base-frequency sample
pub const BASE_SAMPLE_WEIGHT: f64 = 1.0;

/// Weight of the neighbour-averaged secondary sample
pub const SECONDARY_SAMPLE_WEIGHT: f64 = 0.25;

/// Keeps samples off the integer lattice, where Perlin noise is always zero
pub const NOISE_SAMPLE_OFFSET: [f64; 2] = [0.37, 0.61];

/// Seed offset for the moisture field
pub const MOISTURE_SEED_OFFSET: u32 = 1000;

/// Salt mixed into the seed for the biome RNG stream
pub const BIOME_RNG_SALT: u64 = 0xB10_3E5;

// ============================================================================
// CLIMATE CONSTANTS
// ============================================================================

/// Upper latitude bound of the tropic band
pub const TROPIC_MAX_LATITUDE: f64 = 0.2;

/// Upper latitude bound of the sub-tropic band
pub const SUB_TROPIC_MAX_LATITUDE: f64 = 0.4;

/// Upper latitude bound of the temperate band
pub const TEMPERATE_MAX_LATITUDE: f64 = 0.65;

/// Upper latitude bound of the sub-polar band
pub const SUB_POLAR_MAX_LATITUDE: f64 = 0.9;

/// Cells closer than this to water get a one-step warmer zone
pub const COASTAL_WARMING_DISTANCE: u32 = 2;

// ============================================================================
// BIOME CONSTANTS
// ============================================================================

/// Normalized elevation of the sub-polar snow line
pub const MID_ELEVATION: f64 = 0.5;

/// Chance of hills on polar land
pub const POLAR_HILLS_CHANCE: f64 = 0.5;

/// Chance that high ground takes the hilly high-ground terrain of its zone
pub const HIGH_GROUND_CHANCE: f64 = 0.3;

/// Chance that sub-polar mid ground is snow rather than tundra
pub const SUB_POLAR_MID_SNOW_CHANCE: f64 = 0.4;

/// Chance of hills on ordinary (not high) ground
pub const LOWLAND_HILLS_CHANCE: f64 = 0.15;

/// Temperate moisture below which grass gives way to plains
pub const TEMPERATE_DRY_MOISTURE: f64 = 0.5;

/// Sub-tropic moisture below which desert may appear
pub const SUB_TROPIC_ARID_MOISTURE: f64 = 0.2;

/// Sub-tropic moisture below which the terrain is plains
pub const SUB_TROPIC_DRY_MOISTURE: f64 = 0.6;

/// Chance of desert on arid sub-tropic ground
pub const SUB_TROPIC_DESERT_CHANCE: f64 = 0.3;

/// Tropic moisture below which desert may appear
pub const TROPIC_ARID_MOISTURE: f64 = 0.3;

/// Chance of desert on arid tropic ground
pub const TROPIC_DESERT_CHANCE: f64 = 0.4;

// ============================================================================
// BLENDING CONSTANTS
// ============================================================================

/// Neighbour slots (out of six) a terrain must hold to absorb an isolated tile
pub const BLEND_MAJORITY: usize = 4;

// ============================================================================
// COAST CONSTANTS
// ============================================================================

/// Number of shelf growth passes over open ocean
pub const COAST_EXPANSION_PASSES: usize = 2;

/// Chance per shore neighbour that an ocean cell turns to shore in one pass
pub const COAST_EXPANSION_CHANCE: f64 = 0.2;

// ============================================================================
// MOUNTAIN CONSTANTS
// ============================================================================

/// Mountain neighbours that flatten a mountain with all six neighbours on the map
pub const MOUNTAIN_CROWD_FULL: usize = 5;

/// Mountain neighbours that flatten a mountain with five neighbours on the map
pub const MOUNTAIN_CROWD_EDGE: usize = 4;

// ============================================================================
// FEATURE CONSTANTS
// ============================================================================

/// Percent of feature candidates that may become reef
pub const REEF_PERCENT: usize = 5;

/// Percent of land candidates that may become oasis
pub const OASIS_PERCENT: usize = 1;

/// Percent of land candidates that may become marsh
pub const MARSH_PERCENT: usize = 3;

/// Percent of land candidates that may become rainforest
pub const RAINFOREST_PERCENT: usize = 15;

/// Percent of land candidates that may become forest
pub const FOREST_PERCENT: usize = 36;
