//! Pieces module - shape descriptors, piece geometry and collision
//!
//! Every shape is a fixed table of 4 block offsets plus an optional rotation pivot
//! (an index into those 4 blocks). The square has no pivot and never rotates.
//! Pieces carry absolute block coordinates; rotation turns each block 90° around
//! the pivot block with `(dx, dy) -> (-dy, dx)`.

use crate::grid::Grid;
use crate::types::{ColorId, ShapeKind, GRID_COLS, GRID_ROWS};

/// Absolute (or, inside a descriptor, relative) block position `(x, y)`
pub type Block = (i8, i8);

/// Static description of one shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapeDescriptor {
    pub blocks: [Block; 4],
    pub pivot: Option<usize>,
}

const O_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(0, 0), (1, 0), (0, 1), (1, 1)],
    pivot: None,
};

const S_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(0, 0), (0, 1), (1, 1), (1, 2)],
    pivot: Some(2),
};

const Z_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(1, 0), (0, 1), (1, 1), (0, 2)],
    pivot: Some(1),
};

const I_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(0, 0), (0, 1), (0, 2), (0, 3)],
    pivot: Some(2),
};

const L_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(0, 0), (0, 1), (0, 2), (1, 2)],
    pivot: Some(1),
};

const J_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(1, 0), (1, 1), (0, 2), (1, 2)],
    pivot: Some(1),
};

const T_SHAPE: ShapeDescriptor = ShapeDescriptor {
    blocks: [(0, 0), (0, 1), (1, 1), (0, 2)],
    pivot: Some(1),
};

/// Get the descriptor for a shape kind
pub fn descriptor(kind: ShapeKind) -> &'static ShapeDescriptor {
    match kind {
        ShapeKind::O => &O_SHAPE,
        ShapeKind::S => &S_SHAPE,
        ShapeKind::Z => &Z_SHAPE,
        ShapeKind::I => &I_SHAPE,
        ShapeKind::L => &L_SHAPE,
        ShapeKind::J => &J_SHAPE,
        ShapeKind::T => &T_SHAPE,
    }
}

/// A falling (or queued) piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: ColorId,
    blocks: [Block; 4],
    previous: [Block; 4],
    pivot: Option<usize>,
    hard_drop_distance: i8,
}

impl Piece {
    /// Create a piece in descriptor-local coordinates (top-left at the origin)
    pub fn new(kind: ShapeKind, color: ColorId) -> Self {
        let desc = descriptor(kind);
        Self {
            kind,
            color,
            blocks: desc.blocks,
            previous: desc.blocks,
            pivot: desc.pivot,
            hard_drop_distance: 0,
        }
    }

    pub fn blocks(&self) -> &[Block; 4] {
        &self.blocks
    }

    pub fn previous(&self) -> &[Block; 4] {
        &self.previous
    }

    pub fn pivot(&self) -> Option<usize> {
        self.pivot
    }

    /// Last computed hard-drop distance (advisory)
    pub fn hard_drop_distance(&self) -> i8 {
        self.hard_drop_distance
    }

    /// Record the current blocks in the undo buffer
    pub fn backup(&mut self) {
        self.previous = self.blocks;
    }

    /// Return to the blocks saved by the last [`Piece::backup`]
    pub fn restore(&mut self) {
        self.blocks = self.previous;
    }

    /// Shift every block without touching the undo buffer
    pub fn translate(&mut self, dx: i8, dy: i8) {
        for b in &mut self.blocks {
            b.0 += dx;
            b.1 += dy;
        }
    }

    /// Back up, then shift horizontally
    pub fn shift_x(&mut self, dx: i8) {
        self.backup();
        self.translate(dx, 0);
    }

    /// Back up, then move one row down
    pub fn drop_down(&mut self) {
        self.backup();
        self.translate(0, 1);
    }

    /// Rotate 90° around the pivot block without touching the undo buffer
    ///
    /// Returns false (and leaves the piece untouched) for pivotless shapes.
    pub fn rotate(&mut self) -> bool {
        let Some(pivot) = self.pivot else {
            return false;
        };
        let (px, py) = self.blocks[pivot];
        for b in &mut self.blocks {
            let dx = b.0 - px;
            let dy = b.1 - py;
            *b = (px - dy, py + dx);
        }
        true
    }

    /// Horizontal shift that brings the most out-of-bounds block back inside
    ///
    /// Positive when a block sits left of column 0, negative when one sits past
    /// the last column, zero when the piece is inside the side walls.
    pub fn wall_kick_distance(&self) -> i8 {
        let last = GRID_COLS as i8 - 1;
        let mut dist = 0i8;
        for &(x, _) in &self.blocks {
            if x < 0 {
                dist = dist.max(-x);
            } else if x > last {
                dist = dist.min(last - x);
            }
        }
        dist
    }

    /// Collision predicate against the grid, `offset_y` rows below the current position
    ///
    /// Blocks above row 0 only need to be inside the side walls.
    pub fn fits(&self, grid: &Grid, offset_y: i8) -> bool {
        self.blocks.iter().all(|&(x, y)| {
            let y = y + offset_y;
            if x < 0 || x >= GRID_COLS as i8 || y >= GRID_ROWS as i8 {
                return false;
            }
            y < 0 || !grid.is_occupied(x, y)
        })
    }

    /// Largest block row
    pub fn lowest_y(&self) -> i8 {
        self.blocks.iter().map(|&(_, y)| y).max().unwrap_or(0)
    }

    /// True while any block is still above row 0
    pub fn is_above_board(&self) -> bool {
        self.blocks.iter().any(|&(_, y)| y < 0)
    }

    /// True if any block sits in the top row (or above it)
    pub fn touches_top(&self) -> bool {
        self.blocks.iter().any(|&(_, y)| y <= 0)
    }

    /// Rows the piece can fall before it rests
    ///
    /// The minimum of the distance to the floor and the distance to the first
    /// filled cell under any block, scanned one row at a time. Rows above the
    /// board never obstruct.
    pub fn compute_drop_distance(&self, grid: &Grid) -> i8 {
        let floor_limit = (GRID_ROWS as i8 - 1 - self.lowest_y()).max(0);

        let mut mino_limit = floor_limit;
        for d in 1..=floor_limit {
            let blocked = self
                .blocks
                .iter()
                .any(|&(x, y)| y + d >= 0 && grid.is_occupied(x, y + d));
            if blocked {
                mino_limit = d - 1;
                break;
            }
        }

        floor_limit.min(mino_limit)
    }

    /// Recompute and cache the hard-drop distance
    pub fn refresh_drop_distance(&mut self, grid: &Grid) {
        self.hard_drop_distance = self.compute_drop_distance(grid);
    }

    /// Offsets relative to the top-left of the piece's bounding box
    pub fn normalized(&self) -> [Block; 4] {
        let min_x = self.blocks.iter().map(|b| b.0).min().unwrap_or(0);
        let min_y = self.blocks.iter().map(|b| b.1).min().unwrap_or(0);
        let mut out = self.blocks;
        for b in &mut out {
            b.0 -= min_x;
            b.1 -= min_y;
        }
        out.sort_unstable();
        out
    }

    #[cfg(test)]
    pub(crate) fn with_blocks(mut self, blocks: [Block; 4]) -> Self {
        self.blocks = blocks;
        self.previous = blocks;
        self
    }
}
