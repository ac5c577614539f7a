//! Rendering layer: all terminal output lives here.
//!
//! Each function receives a mutable writer and a read-only `Snapshot`. No
//! game logic is performed; this module only translates the logical
//! 600×700 field onto the terminal grid.
//!
//! Screen layout (rows):
//!   0        score / high score
//!   1        per-player lives and health bars
//!   2        top border
//!   3..h-2   play area
//!   h-2      bottom border
//!   h-1      controls hint

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};

use crate::assets::{Assets, Sprite};
use crate::entities::{Bullet, Enemy, GameState, Player, Tint};
use crate::geometry::{Rect, FIELD_HEIGHT, FIELD_WIDTH};
use crate::state::Snapshot;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_BORDER: Color = Color::DarkBlue;
const C_HUD: Color = Color::White;
const C_BACKGROUND: Color = Color::DarkGrey;
const C_HINT: Color = Color::DarkGrey;

const HEALTH_BAR_CELLS: usize = 10;

pub fn tint_color(tint: Tint) -> Color {
    match tint {
        Tint::Green => Color::Green,
        Tint::Blue => Color::Blue,
        Tint::Red => Color::Red,
        Tint::Yellow => Color::Yellow,
    }
}

/// Fraction of the health bar to fill; 0 when `max_health` is 0.
pub fn health_ratio(health: i32, max_health: i32) -> f32 {
    if max_health <= 0 {
        return 0.0;
    }
    (health.max(0) as f32 / max_health as f32).min(1.0)
}

// ── Field → terminal mapping ──────────────────────────────────────────────────

/// Terminal area the field is scaled into.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
}

impl Viewport {
    const PLAY_TOP: u16 = 3;

    pub fn new(cols: u16, rows: u16) -> Self {
        Self { cols, rows }
    }

    fn play_cols(&self) -> u16 {
        self.cols.saturating_sub(2)
    }

    fn play_rows(&self) -> u16 {
        self.rows.saturating_sub(5)
    }

    /// Terminal cell holding field point `(x, y)`, or `None` outside the
    /// field.
    pub fn to_cell(&self, x: f32, y: f32) -> Option<(u16, u16)> {
        let (pc, pr) = (self.play_cols(), self.play_rows());
        if pc == 0 || pr == 0 {
            return None;
        }
        if !(0.0..FIELD_WIDTH).contains(&x) || !(0.0..FIELD_HEIGHT).contains(&y) {
            return None;
        }
        let col = (x / FIELD_WIDTH * pc as f32) as u16;
        let row = (y / FIELD_HEIGHT * pr as f32) as u16;
        Some((1 + col.min(pc - 1), Self::PLAY_TOP + row.min(pr - 1)))
    }

    /// Inclusive cell range `(col0, row0, col1, row1)` covered by the visible
    /// part of `rect`.
    pub fn span(&self, rect: &Rect) -> Option<(u16, u16, u16, u16)> {
        let x0 = rect.x.max(0.0);
        let y0 = rect.y.max(0.0);
        let x1 = (rect.right() - 0.01).min(FIELD_WIDTH - 0.01);
        let y1 = (rect.bottom() - 0.01).min(FIELD_HEIGHT - 0.01);
        if x1 < x0 || y1 < y0 {
            return None;
        }
        let (c0, r0) = self.to_cell(x0, y0)?;
        let (c1, r1) = self.to_cell(x1, y1)?;
        Some((c0, r0, c1, r1))
    }

    fn last_play_row(&self) -> u16 {
        Self::PLAY_TOP + self.play_rows().saturating_sub(1)
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    snapshot: &Snapshot<'_>,
    assets: &Assets,
    view: Viewport,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    if snapshot.state == GameState::Menu {
        draw_menu(out, snapshot, view)?;
    } else {
        draw_border(out, view)?;
        if let Some(background) = &assets.background {
            draw_sprite(out, background, 0.0, 0.0, C_BACKGROUND, view)?;
        }
        draw_entities(out, snapshot, assets, view)?;
        draw_hud(out, snapshot, view)?;
        draw_controls_hint(out, view)?;
        if snapshot.state == GameState::GameOver {
            draw_game_over(out, snapshot, view)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Border ────────────────────────────────────────────────────────────────────

fn draw_border<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    let w = view.cols as usize;
    let bottom = view.rows.saturating_sub(2);

    out.queue(style::SetForegroundColor(C_BORDER))?;
    out.queue(cursor::MoveTo(0, 2))?;
    out.queue(Print(format!("┌{}┐", "─".repeat(w.saturating_sub(2)))))?;
    out.queue(cursor::MoveTo(0, bottom))?;
    out.queue(Print(format!("└{}┘", "─".repeat(w.saturating_sub(2)))))?;

    for row in Viewport::PLAY_TOP..bottom {
        out.queue(cursor::MoveTo(0, row))?;
        out.queue(Print("│"))?;
        out.queue(cursor::MoveTo(view.cols.saturating_sub(1), row))?;
        out.queue(Print("│"))?;
    }
    Ok(())
}

// ── HUD (rows 0-1) ────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, snapshot: &Snapshot<'_>, view: Viewport) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(Print(format!("Score: {}", snapshot.score)))?;

    let high = format!("High Score: {}", snapshot.high_score);
    out.queue(cursor::MoveTo(
        view.cols.saturating_sub(high.chars().count() as u16 + 1),
        0,
    ))?;
    out.queue(Print(&high))?;

    for (idx, player) in snapshot.players.iter().enumerate() {
        let filled = (health_ratio(player.health, player.max_health) * HEALTH_BAR_CELLS as f32)
            .round() as usize;
        let label = format!(
            "P{} Lives: {} [{}{}]",
            idx + 1,
            player.lives,
            "█".repeat(filled),
            "░".repeat(HEALTH_BAR_CELLS - filled),
        );
        let col = if idx == 0 {
            1
        } else {
            view.cols.saturating_sub(label.chars().count() as u16 + 1)
        };
        out.queue(cursor::MoveTo(col, 1))?;
        out.queue(style::SetForegroundColor(tint_color(player.tint)))?;
        out.queue(Print(label))?;
    }
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_entities<W: Write>(
    out: &mut W,
    snapshot: &Snapshot<'_>,
    assets: &Assets,
    view: Viewport,
) -> std::io::Result<()> {
    for player in snapshot.players.iter().filter(|p| p.is_alive()) {
        draw_player(out, player, assets.player.as_ref(), view)?;
    }
    for enemy in snapshot.enemies {
        draw_enemy(out, enemy, assets.enemy.as_ref(), view)?;
    }
    for bullet in snapshot.player_bullets {
        draw_bullet(out, bullet, "║", view)?;
    }
    for bullet in snapshot.enemy_bullets {
        draw_bullet(out, bullet, "↓", view)?;
    }
    Ok(())
}

fn draw_player<W: Write>(
    out: &mut W,
    player: &Player,
    sprite: Option<&Sprite>,
    view: Viewport,
) -> std::io::Result<()> {
    let color = tint_color(player.tint);
    if let Some(sprite) = sprite {
        return draw_sprite(out, sprite, player.rect.x, player.rect.y, color, view);
    }

    // Fallback ship:
    //   ▲      ← nose
    //  /██\    ← hull, one row per remaining cell
    let Some((c0, r0, c1, r1)) = view.span(&player.rect) else {
        return Ok(());
    };
    out.queue(style::SetForegroundColor(color))?;
    out.queue(cursor::MoveTo(c0 + (c1 - c0) / 2, r0))?;
    out.queue(Print("▲"))?;
    let inner = (c1 - c0).saturating_sub(1) as usize;
    for row in (r0 + 1)..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(format!("/{}\\", "█".repeat(inner))))?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    sprite: Option<&Sprite>,
    view: Viewport,
) -> std::io::Result<()> {
    let color = tint_color(Tint::Red);
    if let Some(sprite) = sprite {
        return draw_sprite(out, sprite, enemy.rect.x, enemy.rect.y, color, view);
    }

    let Some((c0, r0, c1, r1)) = view.span(&enemy.rect) else {
        return Ok(());
    };
    let block = "█".repeat((c1 - c0 + 1) as usize);
    out.queue(style::SetForegroundColor(color))?;
    for row in r0..=r1 {
        out.queue(cursor::MoveTo(c0, row))?;
        out.queue(Print(&block))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    glyph: &str,
    view: Viewport,
) -> std::io::Result<()> {
    let rect = &bullet.rect;
    let Some((col, row)) = view.to_cell(rect.center_x(), rect.y.max(0.0)) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(tint_color(bullet.tint)))?;
    out.queue(Print(glyph))?;
    Ok(())
}

/// Print text art with its top-left corner at field point `(x, y)`, clipped
/// to the play area.
fn draw_sprite<W: Write>(
    out: &mut W,
    sprite: &Sprite,
    x: f32,
    y: f32,
    color: Color,
    view: Viewport,
) -> std::io::Result<()> {
    let Some((col, row)) = view.to_cell(x.max(0.0), y.max(0.0)) else {
        return Ok(());
    };
    let room = view.cols.saturating_sub(1).saturating_sub(col) as usize;
    out.queue(style::SetForegroundColor(color))?;
    for (i, line) in sprite.lines.iter().enumerate() {
        let r = row + i as u16;
        if r > view.last_play_row() {
            break;
        }
        let visible: String = line.chars().take(room).collect();
        out.queue(cursor::MoveTo(col, r))?;
        out.queue(Print(visible))?;
    }
    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, view: Viewport) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "P1 ← → SPACE   P2 A D W   R : Restart   Q / Esc : Quit",
    ))?;
    Ok(())
}

// ── Menu ──────────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, snapshot: &Snapshot<'_>, view: Viewport) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let cy = view.rows / 2;

    let lines: [(&str, Color, u16); 4] = [
        ("★  SPACE  WAR  ★", Color::Cyan, cy.saturating_sub(5)),
        ("Press 1 for Single Player", Color::Green, cy.saturating_sub(2)),
        ("Press 2 for Two Players", Color::Blue, cy.saturating_sub(1)),
        ("Q / Esc to Quit", C_HINT, cy + 4),
    ];
    for (text, color, row) in lines {
        centered(out, text, color, cx, row)?;
    }

    let high = format!("High Score: {}", snapshot.high_score);
    centered(out, &high, Color::Yellow, cx, cy + 1)?;
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    snapshot: &Snapshot<'_>,
    view: Viewport,
) -> std::io::Result<()> {
    let new_best = snapshot.new_high_score;
    let score_line = format!("Final Score: {:>6}", snapshot.score);
    let best_line = if new_best {
        format!("★ NEW BEST: {:>6} ★", snapshot.high_score)
    } else {
        format!("Best Score:  {:>6}", snapshot.high_score)
    };

    let cx = view.cols / 2;
    let start = (view.rows / 2).saturating_sub(3);
    let rows: [(&str, Color); 6] = [
        ("╔════════════════════╗", Color::Red),
        ("║    GAME  OVER      ║", Color::Red),
        ("╚════════════════════╝", Color::Red),
        (score_line.as_str(), Color::Yellow),
        (best_line.as_str(), if new_best { Color::Yellow } else { Color::DarkGrey }),
        ("R - Play Again  Q - Quit", Color::White),
    ];
    for (i, (text, color)) in rows.iter().enumerate() {
        centered(out, text, *color, cx, start + i as u16)?;
    }
    Ok(())
}

fn centered<W: Write>(
    out: &mut W,
    text: &str,
    color: Color,
    cx: u16,
    row: u16,
) -> std::io::Result<()> {
    let col = cx.saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_corners_map_inside_the_border() {
        let view = Viewport::new(62, 25); // 60 × 20 play cells
        assert_eq!(view.to_cell(0.0, 0.0), Some((1, 3)));
        assert_eq!(view.to_cell(599.9, 699.9), Some((60, 22)));
        assert_eq!(view.to_cell(600.0, 10.0), None);
        assert_eq!(view.to_cell(10.0, -1.0), None);
    }

    #[test]
    fn span_clips_rects_entering_from_above() {
        let view = Viewport::new(62, 25);
        let rect = Rect::new(100.0, -30.0, 50.0, 50.0);
        let (c0, r0, c1, r1) = view.span(&rect).unwrap();
        assert_eq!(r0, 3);
        assert_eq!(r1, 3);
        assert!(c1 >= c0);
        assert_eq!(view.span(&Rect::new(100.0, -60.0, 50.0, 50.0)), None);
    }

    #[test]
    fn health_ratio_handles_zero_max() {
        assert_eq!(health_ratio(50, 100), 0.5);
        assert_eq!(health_ratio(-20, 100), 0.0);
        assert_eq!(health_ratio(10, 0), 0.0);
    }

    #[test]
    fn tiny_terminal_draws_nothing() {
        let view = Viewport::new(2, 5);
        assert_eq!(view.to_cell(10.0, 10.0), None);
    }
}
