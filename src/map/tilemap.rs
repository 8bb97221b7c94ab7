//! Map domain: grid passability built from stage rows.

use bevy::prelude::*;

use crate::core::JumpDirection;

const PASS_NORTH: u8 = 1 << 0;
const PASS_SOUTH: u8 = 1 << 1;
const PASS_EAST: u8 = 1 << 2;
const PASS_WEST: u8 = 1 << 3;
const PASS_ALL: u8 = PASS_NORTH | PASS_SOUTH | PASS_EAST | PASS_WEST;
/// Fence: crossable sideways only.
const PASS_FENCE: u8 = PASS_EAST | PASS_WEST;

/// Tile grid with per-direction passability bits.
///
/// A bit set for a direction means a mover may leave the tile that way and
/// may enter it coming from the opposite side. Walls have no bits.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
    width: i32,
    height: i32,
    cells: Vec<u8>,
}

impl TileMap {
    /// Build from text rows: `#` is a wall, `=` a fence, anything else
    /// open floor. Short rows are padded with walls.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Self {
        let height = rows.len();
        let width = rows
            .iter()
            .map(|row| row.as_ref().chars().count())
            .max()
            .unwrap_or(0);

        let mut cells = vec![0; width * height];
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                cells[y * width + x] = match ch {
                    '#' => 0,
                    '=' => PASS_FENCE,
                    _ => PASS_ALL,
                };
            }
        }

        Self {
            width: width as i32,
            height: height as i32,
            cells,
        }
    }

    /// An all-floor map, handy for tests.
    pub fn open(width: i32, height: i32) -> Self {
        let width = width.max(0);
        let height = height.max(0);
        Self {
            width,
            height,
            cells: vec![PASS_ALL; (width * height) as usize],
        }
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn contains(&self, tile: IVec2) -> bool {
        tile.x >= 0 && tile.y >= 0 && tile.x < self.width && tile.y < self.height
    }

    fn bits(&self, tile: IVec2) -> u8 {
        if !self.contains(tile) {
            return 0;
        }
        self.cells[(tile.y * self.width + tile.x) as usize]
    }

    pub fn is_wall(&self, tile: IVec2) -> bool {
        self.bits(tile) == 0
    }

    pub fn is_fence(&self, tile: IVec2) -> bool {
        self.bits(tile) == PASS_FENCE
    }

    /// Whether a mover may leave `tile` heading `direction`. Diagonals
    /// need both of their components open. Out-of-bounds tiles never pass.
    pub fn passable(&self, tile: IVec2, direction: JumpDirection) -> bool {
        let bits = self.bits(tile);
        if direction.is_diagonal() {
            let (horizontal, vertical) = direction.split();
            return bits & direction_bit(horizontal) != 0 && bits & direction_bit(vertical) != 0;
        }
        match direction {
            JumpDirection::None => self.contains(tile) && bits != 0,
            cardinal => bits & direction_bit(cardinal) != 0,
        }
    }

    /// Every tile coordinate, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = IVec2> + '_ {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| IVec2::new(x, y)))
    }
}

fn direction_bit(direction: JumpDirection) -> u8 {
    match direction {
        JumpDirection::North => PASS_NORTH,
        JumpDirection::South => PASS_SOUTH,
        JumpDirection::East => PASS_EAST,
        JumpDirection::West => PASS_WEST,
        _ => 0,
    }
}
