/// Rendering layer — all terminal I/O lives here.
///
/// Each function receives a mutable writer and the per-tick render list.
/// No game logic is performed; this module only translates render items
/// into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use platformer::entities::FrameId;
use platformer::world::RenderItem;

// ── World-to-cell scale ───────────────────────────────────────────────────────

/// Visible slice of the world in world pixels (the classic 1000×500
/// window); the terminal grid is stretched to cover exactly this much.
const VIEW_WIDTH_PX: f32 = 1000.0;
const VIEW_HEIGHT_PX: f32 = 500.0;

/// Top of the decorative ground band drawn under everything.
const GROUND_BAND_Y: f32 = 475.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TERRAIN: Color = Color::DarkYellow;
const C_POWER_UP: Color = Color::Red;
const C_WALKER: Color = Color::DarkRed;
const C_WALKER_BURNING: Color = Color::Yellow;
const C_PATROLLER: Color = Color::Grey;
const C_PATROLLER_STUNNED: Color = Color::DarkGrey;
const C_PLAYER: Color = Color::Green;
const C_PROJECTILE: Color = Color::Red;
const C_GROUND: Color = Color::DarkGreen;
const C_HINT: Color = Color::DarkGrey;

// ── Grid ──────────────────────────────────────────────────────────────────────

/// Current terminal grid and the world-pixel size of one cell.  The last
/// terminal row is reserved for the controls hint.
struct Grid {
    cols: u16,
    rows: u16,
    px_per_col: f32,
    px_per_row: f32,
}

impl Grid {
    fn current() -> std::io::Result<Grid> {
        let (cols, rows) = terminal::size()?;
        let cols = cols.max(1);
        let rows = rows.saturating_sub(1).max(1);
        Ok(Grid {
            cols,
            rows,
            px_per_col: VIEW_WIDTH_PX / cols as f32,
            px_per_row: VIEW_HEIGHT_PX / rows as f32,
        })
    }

    fn col(&self, world_x: f32) -> i32 {
        (world_x / self.px_per_col).floor() as i32
    }

    fn row(&self, world_y: f32) -> i32 {
        (world_y / self.px_per_row).floor() as i32
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.  `scroll` is the world-x of the left screen
/// edge; items are drawn in list order, so later ones paint over earlier.
pub fn render<W: Write>(out: &mut W, items: &[RenderItem], scroll: f32) -> std::io::Result<()> {
    let grid = Grid::current()?;

    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_ground_band(out, &grid)?;
    for item in items {
        draw_item(out, &grid, item, scroll)?;
    }
    draw_controls_hint(out, &grid)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, grid.rows))?;
    out.flush()?;
    Ok(())
}

// ── Ground band ───────────────────────────────────────────────────────────────

fn draw_ground_band<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_GROUND))?;
    let band: String = "▒".repeat(grid.cols as usize);
    for row in grid.row(GROUND_BAND_Y).max(0)..grid.rows as i32 {
        out.queue(cursor::MoveTo(0, row as u16))?;
        out.queue(Print(&band))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Map a frame handle (plus flip) to the glyph and colour its cells are
/// filled with.  Single-cell glyphs cannot be mirrored, so flip instead
/// selects the facing of the patroller's arrowed poses.
fn appearance(frame: FrameId, flip: bool) -> (char, Color) {
    match frame {
        FrameId::Terrain => ('▓', C_TERRAIN),
        FrameId::PowerUp => ('♦', C_POWER_UP),
        FrameId::Walker => ('◎', C_WALKER),
        FrameId::WalkerBurning => ('✶', C_WALKER_BURNING),
        FrameId::Patroller(n) => {
            if n >= 10 {
                // Collapsed in place while stunned
                ('▬', C_PATROLLER_STUNNED)
            } else {
                // Walk phases alternate hollow/solid, pointing the way
                // the patroller faces
                let glyph = match (flip, n % 2 == 0) {
                    (false, true) => '◁',
                    (false, false) => '◀',
                    (true, true) => '▷',
                    (true, false) => '▶',
                };
                (glyph, C_PATROLLER)
            }
        }
        FrameId::Player(n) => (if n % 2 == 0 { '█' } else { '▓' }, C_PLAYER),
        FrameId::Projectile => ('●', C_PROJECTILE),
    }
}

/// Fill the item's bounding box with its glyph, clipped to the grid.
fn draw_item<W: Write>(
    out: &mut W,
    grid: &Grid,
    item: &RenderItem,
    scroll: f32,
) -> std::io::Result<()> {
    let (glyph, color) = appearance(item.frame, item.flip);

    let col0 = grid.col(item.x - scroll);
    let row0 = grid.row(item.y);
    // Every entity is at least one cell, however small in world pixels
    let cols = ((item.w / grid.px_per_col).round() as i32).max(1);
    let rows = ((item.h / grid.px_per_row).round() as i32).max(1);

    out.queue(style::SetForegroundColor(color))?;
    for row in row0..row0 + rows {
        if row < 0 || row >= grid.rows as i32 {
            continue;
        }
        for col in col0..col0 + cols {
            if col < 0 || col >= grid.cols as i32 {
                continue;
            }
            out.queue(cursor::MoveTo(col as u16, row as u16))?;
            out.queue(Print(glyph))?;
        }
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, grid: &Grid) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, grid.rows))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← → / A D : Move   ↑ / SPACE : Jump   ↓ / F : Fire   Q : Quit"))?;
    Ok(())
}
