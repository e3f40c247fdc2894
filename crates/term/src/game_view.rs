//! GameView: maps a session [`Snapshot`] into a terminal framebuffer.
//!
//! This module is pure (no I/O). It can be unit-tested.

use crate::core::{Block, PieceSnapshot, Snapshot};
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{ColorId, Phase, GRID_COLS, GRID_ROWS};

const BOARD_BG: Rgb = Rgb::new(30, 30, 40);
const PANEL_BG: Rgb = Rgb::new(0, 0, 0);

const HELP: [&str; 7] = [
    "<- ->  move",
    "up     rotate",
    "down   fast drop",
    "space  hard drop",
    "p      pause",
    "s      shadow",
    "q      quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

/// Top-left of the board frame plus its size, in terminal cells
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
}

/// A lightweight terminal renderer for a blockfall session.
#[derive(Debug, Clone)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self {
            cell_w: 2,
            cell_h: 1,
            anchor_y: AnchorY::Center,
        }
    }
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Render a snapshot into an existing framebuffer.
    ///
    /// Callers reuse one framebuffer across frames; it is resized to the viewport.
    pub fn render_into(&self, snap: &Snapshot, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).cell(' '));

        let board_w = (GRID_COLS as u16) * self.cell_w;
        let board_h = (GRID_ROWS as u16) * self.cell_h;
        let frame = Frame {
            x: viewport.width.saturating_sub(board_w + 2) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(board_h + 2) / 2,
                AnchorY::Top => 0,
            },
            w: board_w + 2,
            h: board_h + 2,
        };

        fb.fill_rect(frame.x + 1, frame.y + 1, board_w, board_h, ' ', CellStyle::new(BOARD_BG, BOARD_BG));
        self.draw_border(fb, frame, CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG));

        if snap.phase == Phase::Title {
            self.draw_title(fb, frame);
            return;
        }

        self.draw_settled(fb, frame, snap);

        if let (Some(active), Some(offset)) = (snap.active, snap.shadow_offset) {
            let fg = Rgb::from(active.color).scaled(110);
            let style = CellStyle::new(fg, BOARD_BG).dim();
            for &(x, y) in &active.blocks {
                self.draw_board_cell(fb, frame, x, y + offset, '░', style);
            }
        }

        if let Some(active) = snap.active {
            let style = CellStyle::new(Rgb::from(active.color), BOARD_BG).bold();
            for &(x, y) in &active.blocks {
                self.draw_board_cell(fb, frame, x, y, '█', style);
            }
        }

        for p in &snap.particles {
            let style = CellStyle::new(Rgb::from(p.color), BOARD_BG).bold();
            self.draw_board_cell(fb, frame, p.x.floor() as i8, p.y.floor() as i8, '*', style);
        }

        self.draw_side_panel(fb, snap, viewport, frame);

        match snap.phase {
            Phase::Pause => self.draw_overlay(fb, frame, &["PAUSED", "p to resume"]),
            Phase::GameOver => self.draw_overlay(fb, frame, &["GAME OVER", "space to restart"]),
            _ => {}
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &Snapshot, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, frame: Frame, style: CellStyle) {
        let Frame { x, y, w, h } = frame;
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_settled(&self, fb: &mut FrameBuffer, frame: Frame, snap: &Snapshot) {
        let empty = CellStyle::new(Rgb::new(90, 90, 100), BOARD_BG).dim();
        for (y, row) in snap.board.iter().enumerate() {
            for (x, &id) in row.iter().enumerate() {
                let (x, y) = (x as i8, y as i8);
                match ColorId::from_u8(id).filter(|_| id != 0) {
                    Some(color) => {
                        let style = CellStyle::new(Rgb::from(color), BOARD_BG);
                        self.draw_board_cell(fb, frame, x, y, '█', style);
                    }
                    None => self.draw_board_cell(fb, frame, x, y, '·', empty),
                }
            }
        }
    }

    /// Paint one board cell; cells outside the board (e.g. above row 0) are skipped.
    fn draw_board_cell(&self, fb: &mut FrameBuffer, frame: Frame, x: i8, y: i8, ch: char, style: CellStyle) {
        if x < 0 || x >= GRID_COLS as i8 || y < 0 || y >= GRID_ROWS as i8 {
            return;
        }
        let px = frame.x + 1 + (x as u16) * self.cell_w;
        let py = frame.y + 1 + (y as u16) * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, snap: &Snapshot, viewport: Viewport, frame: Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = CellStyle::new(Rgb::new(220, 220, 220), PANEL_BG).bold();
        let value = CellStyle::new(Rgb::new(200, 200, 200), PANEL_BG);

        let mut y = frame.y;
        for (name, n) in [("SCORE", snap.score), ("HIGH", snap.high_score), ("LEVEL", snap.level)] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        self.draw_preview(fb, panel_x, y, &snap.next);
        y = y.saturating_add(5);

        let end = fb.put_str(panel_x, y, "SHADOW ", label);
        fb.put_str(end, y, if snap.shadow_enabled { "on" } else { "off" }, value);
        y = y.saturating_add(2);

        let help = value.dim();
        for line in HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(panel_x, y, line, help);
            y = y.saturating_add(1);
        }
    }

    /// Lookahead piece drawn at its normalized shape, one board cell per block
    fn draw_preview(&self, fb: &mut FrameBuffer, x: u16, y: u16, piece: &PieceSnapshot) {
        let style = CellStyle::new(Rgb::from(piece.color), PANEL_BG);
        for (bx, by) in normalized(&piece.blocks) {
            let px = x + (bx as u16) * self.cell_w;
            let py = y + (by as u16) * self.cell_h;
            fb.fill_rect(px, py, self.cell_w, self.cell_h, '█', style);
        }
    }

    fn draw_title(&self, fb: &mut FrameBuffer, frame: Frame) {
        self.draw_overlay(fb, frame, &["BLOCKFALL", "", "space to start", "q to quit"]);
    }

    fn draw_overlay(&self, fb: &mut FrameBuffer, frame: Frame, lines: &[&str]) {
        let style = CellStyle::new(Rgb::new(255, 255, 255), PANEL_BG).bold();
        let top = frame
            .y
            .saturating_add(frame.h / 2)
            .saturating_sub(lines.len() as u16 / 2);
        for (i, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            fb.put_str_centered(frame.x, frame.w, top + i as u16, line, style);
        }
    }
}

fn normalized(blocks: &[Block; 4]) -> [Block; 4] {
    let min_x = blocks.iter().map(|b| b.0).min().unwrap_or(0);
    let min_y = blocks.iter().map(|b| b.1).min().unwrap_or(0);
    blocks.map(|(x, y)| (x - min_x, y - min_y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Session;

    fn contains_text(fb: &FrameBuffer, text: &str) -> bool {
        (0..fb.height()).any(|y| {
            let row: String = (0..fb.width())
                .map(|x| fb.get(x, y).map_or(' ', |c| c.ch))
                .collect();
            row.contains(text)
        })
    }

    fn count_char(fb: &FrameBuffer, ch: char) -> usize {
        fb.cells().iter().filter(|c| c.ch == ch).count()
    }

    fn playing_snapshot() -> Snapshot {
        let mut session = Session::new(9);
        session.spawn_piece();
        session.phase = Phase::Playing;
        session.snapshot()
    }

    #[test]
    fn title_screen_has_prompt() {
        let snap = Session::new(9).snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(contains_text(&fb, "BLOCKFALL"));
        assert!(contains_text(&fb, "space to start"));
        assert!(!contains_text(&fb, "SCORE"));
    }

    #[test]
    fn playing_draws_panel_and_empty_board() {
        let snap = playing_snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(contains_text(&fb, "SCORE"));
        assert!(contains_text(&fb, "HIGH"));
        assert!(contains_text(&fb, "LEVEL"));
        assert!(contains_text(&fb, "NEXT"));
        // 200 empty board cells, 2 columns each.
        assert_eq!(count_char(&fb, '·'), 400);
        // Only the lookahead preview is visible; the active piece is above row 0.
        assert_eq!(count_char(&fb, '█'), 8);
    }

    #[test]
    fn settled_cells_use_palette_color() {
        let mut snap = playing_snapshot();
        snap.board[19][0] = ColorId::TOrange.as_u8();
        let fb = GameView::new(1, 1)
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(40, 24));

        let frame_x = (40 - 12) / 2;
        let cell = fb.get(frame_x + 1, 20).unwrap();
        assert_eq!(cell.ch, '█');
        assert_eq!(cell.style.fg, Rgb::from(ColorId::TOrange));
    }

    #[test]
    fn shadow_drawn_below_active_piece() {
        let mut snap = playing_snapshot();
        let active = snap.active.as_mut().unwrap();
        active.blocks = [(4, 0), (5, 0), (4, 1), (5, 1)];
        snap.shadow_offset = Some(18);

        let fb = GameView::new(1, 1)
            .with_anchor_y(AnchorY::Top)
            .render(&snap, Viewport::new(40, 24));
        assert_eq!(count_char(&fb, '░'), 4);
        let frame_x = (40 - 12) / 2;
        assert_eq!(fb.get(frame_x + 1 + 4, 1 + 19).unwrap().ch, '░');
    }

    #[test]
    fn overlays_follow_phase() {
        let mut snap = playing_snapshot();
        snap.phase = Phase::Pause;
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(contains_text(&fb, "PAUSED"));

        snap.phase = Phase::GameOver;
        let fb = GameView::default().render(&snap, Viewport::new(80, 30));
        assert!(contains_text(&fb, "GAME OVER"));
    }

    #[test]
    fn tiny_viewport_does_not_panic() {
        let snap = playing_snapshot();
        let fb = GameView::default().render(&snap, Viewport::new(5, 3));
        assert_eq!(fb.width(), 5);
    }
}
