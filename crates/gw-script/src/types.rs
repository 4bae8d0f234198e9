//! Wire types crossing the script boundary (spec.md §6).
//!
//! These are the host-facing shapes — plain data, no `gw-ecs`/`gw-map`
//! internals leak through them. [`MapStructure`] converts into a
//! `gw_map::MapBuilder` call sequence; [`PlayerView`] is built fresh each
//! tick from ECS component state.

use crate::error::{ScriptError, ScriptResult};
use gw_core::geometry::Direction;
use gw_map::tile::{Area, Portal, Tile};
use gw_map::{Map, MapBuilder};
use serde::{Deserialize, Serialize};

/// A tile map handed in by the host (spec.md §6 `MapStructure`).
///
/// `tiles` is a flat `width * height` array of integer codes: `0` =
/// obstacle, `1` = normal, `2` = fast. spec.md leaves this encoding
/// unspecified beyond "int[]"; this is the one this crate commits to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct MapStructure {
    pub width: u32,
    pub height: u32,
    pub tiles: Vec<i64>,
    #[serde(default)]
    pub spawn_points: Vec<(u32, u32)>,
    #[serde(default)]
    pub portals: Vec<PortalSpec>,
    #[serde(default)]
    pub areas: Vec<AreaSpec>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PortalSpec {
    pub from: (u32, u32),
    pub to: (u32, u32),
    pub direction: PortalDirection,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PortalDirection {
    Up,
    Down,
    Left,
    Right,
    None,
}

impl From<PortalDirection> for Option<Direction> {
    fn from(value: PortalDirection) -> Self {
        match value {
            PortalDirection::Up => Some(Direction::Up),
            PortalDirection::Down => Some(Direction::Down),
            PortalDirection::Left => Some(Direction::Left),
            PortalDirection::Right => Some(Direction::Right),
            PortalDirection::None => None,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AreaSpec {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub cells: Vec<(u32, u32)>,
}

fn tile_from_code(code: i64) -> ScriptResult<Tile> {
    match code {
        0 => Ok(Tile::Obstacle),
        1 => Ok(Tile::Normal),
        2 => Ok(Tile::Fast),
        other => Err(ScriptError::UnknownTileCode(other)),
    }
}

impl MapStructure {
    /// Builds the preprocessed [`Map`] this structure describes.
    pub fn build(&self) -> ScriptResult<Map> {
        let grid = gw_core::geometry::Grid::new(self.width, self.height);
        let mut builder = MapBuilder::new(self.width, self.height);

        let tiles = self
            .tiles
            .iter()
            .map(|&code| tile_from_code(code))
            .collect::<ScriptResult<Vec<Tile>>>()?;
        builder = builder.tiles(tiles);

        for portal in &self.portals {
            let from = grid_index(&grid, portal.from)?;
            let to = grid_index(&grid, portal.to)?;
            let direction: Option<Direction> = portal.direction.into();
            builder = builder.portal(Portal { from, to, direction });
        }

        for area in &self.areas {
            let mut cells = std::collections::HashSet::new();
            for &(x, y) in &area.cells {
                cells.insert(grid_index(&grid, (x, y))?);
            }
            builder = builder.area(Area {
                name: area.name.clone(),
                description: area.description.clone(),
                cells,
            });
        }

        builder.build().map_err(ScriptError::InvalidMap)
    }
}

fn grid_index(grid: &gw_core::geometry::Grid, (x, y): (u32, u32)) -> ScriptResult<gw_core::ids::TileIndex> {
    grid.index_of(x, y)
        .map_err(|_| ScriptError::UnknownTileCode((y as i64) * grid.width as i64 + x as i64))
}

/// Starting state for one player (spec.md §6 `setupPlayers(map<id,init>)`).
///
/// spec.md doesn't spell out `PlayerInit`'s fields beyond the map's key type;
/// this resolves it to the minimum a host needs to place a player — a
/// concrete spawn tile and initial facing — leaving `spawnPoints` in
/// `MapStructure` as data the host consults when it picks that tile.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerInit {
    pub x: u32,
    pub y: u32,
    #[serde(default)]
    pub facing: Option<PortalDirection>,
}

/// Per-player snapshot emitted each tick (spec.md §6 `PlayerView`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub x: u32,
    pub y: u32,
    /// `0..=3`, matching `Direction::ALL`'s `[Up, Down, Left, Right]` order.
    pub direction: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub r#move: Option<MoveView>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveView {
    pub current: i64,
    pub total: u32,
}

pub(crate) fn direction_to_u8(direction: Direction) -> u8 {
    Direction::ALL.iter().position(|&d| d == direction).unwrap_or(0) as u8
}

/// Options the host passes to [`crate::engine::GridScript::new`] (spec.md §6
/// `ScriptInitOptions`).
///
/// `extraOptions` in spec.md is an opaque host-defined blob; this resolves
/// it to the two things an actual host of this engine needs to configure —
/// the RNG seed and whether/how to enable the demo AI loop — rather than
/// carrying a schema-less JSON passthrough nothing here would interpret.
pub struct ScriptInitOptions {
    pub saved_data: Option<Vec<u8>>,
    pub structure: MapStructure,
    pub platform: Box<dyn gw_ai::Platform>,
    pub ai: Option<gw_ai::AiConfig>,
    pub rng_seed: u64,
}

/// A discoverable script module (spec.md §6 `ScriptEntrypoint`).
pub struct ScriptEntrypoint {
    pub name: String,
    pub description: String,
    pub plugins: Vec<String>,
    pub extra: Option<serde_json::Value>,
    pub create: Box<dyn Fn(ScriptInitOptions) -> ScriptResult<Box<dyn crate::ScriptApi>>>,
}
