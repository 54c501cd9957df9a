//! Rendering layer — all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! state into terminal commands, projecting world units through a `Viewport`.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal,
    QueueableCommand,
};
use space_invaders::compute::ship_visible;
use space_invaders::entities::{Bullet, Enemy, GameState, GameStatus, Rect, Star};
use space_invaders::sprites::{alien_frame, rasterize, PLAYER_SHIP};
use space_invaders::view::Viewport;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_TITLE: Color = Color::Green;
const C_TEXT: Color = Color::White;
const C_HUD: Color = Color::White;
const C_HUD_BEST: Color = Color::DarkGrey;
const C_BANNER: Color = Color::Yellow;
const C_SHIP: Color = Color::Cyan;
const C_ENEMY: Color = Color::Green;
const C_BULLET_PLAYER: Color = Color::Yellow;
const C_BULLET_ENEMY: Color = Color::DarkYellow;
const C_GAME_OVER: Color = Color::Red;
const C_FINAL_SCORE: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;

const PIXEL: &str = "█";

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame at game-clock time `now`.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now: u64,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    draw_stars(out, &state.stars, view)?;

    match state.status {
        GameStatus::Menu => draw_menu(out, view)?,
        GameStatus::Playing => {
            if state.level_transition_start.is_none() {
                draw_battlefield(out, state, view)?;
            } else {
                draw_level_banner(out, state, view)?;
            }
            draw_ship(out, state, view, now)?;
            draw_hud(out, state, view)?;
        }
        GameStatus::GameOver => {
            draw_battlefield(out, state, view)?;
            draw_ship(out, state, view, now)?;
            draw_game_over(out, state, view)?;
        }
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, view.rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Primitives ────────────────────────────────────────────────────────────────

fn put<W: Write>(out: &mut W, view: &Viewport, col: i32, row: i32, s: &str) -> std::io::Result<()> {
    if view.contains(col, row) {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(Print(s))?;
    }
    Ok(())
}

/// Blit a string-pattern sprite scaled to the cells covered by `rect`.
fn draw_sprite<W: Write>(
    out: &mut W,
    view: &Viewport,
    pattern: &[&str],
    rect: &Rect,
    color: Color,
) -> std::io::Result<()> {
    let cells = view.project(rect);
    out.queue(style::SetForegroundColor(color))?;
    for (r, line) in rasterize(pattern, cells.cols, cells.rows).iter().enumerate() {
        for (c, _) in line.iter().enumerate().filter(|(_, lit)| **lit) {
            put(out, view, cells.col + c as i32, cells.row + r as i32, PIXEL)?;
        }
    }
    Ok(())
}

fn print_centered<W: Write>(
    out: &mut W,
    view: &Viewport,
    row: u16,
    text: &str,
    color: Color,
) -> std::io::Result<()> {
    let col = (view.cols / 2).saturating_sub(text.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(color))?;
    out.queue(Print(text))?;
    Ok(())
}

// ── Background ────────────────────────────────────────────────────────────────

fn draw_stars<W: Write>(out: &mut W, stars: &[Star], view: &Viewport) -> std::io::Result<()> {
    for star in stars {
        let Some((col, row)) = view.cell(star.x, star.y) else {
            continue;
        };
        // Faster stars are closer, so brighter and bigger
        let (color, glyph) = match star.speed {
            1 => (Color::DarkGrey, "."),
            2 => (Color::Grey, "."),
            _ => (Color::White, "*"),
        };
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(glyph))?;
    }
    Ok(())
}

// ── Screens ───────────────────────────────────────────────────────────────────

fn draw_menu<W: Write>(out: &mut W, view: &Viewport) -> std::io::Result<()> {
    let third = view.rows / 3;
    let half = view.rows / 2;
    print_centered(out, view, third, "S P A C E   I N V A D E R S", C_TITLE)?;
    print_centered(out, view, half, "Press SPACE to Start", C_TEXT)?;
    print_centered(
        out,
        view,
        view.rows.saturating_sub(2),
        "← → / A D : Move   SPACE : Shoot   Q : Quit",
        C_HINT,
    )?;
    Ok(())
}

fn draw_level_banner<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    print_centered(out, view, view.rows / 2, &format!("LEVEL {}", state.level), C_BANNER)
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, view: &Viewport) -> std::io::Result<()> {
    // Score — top left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!("Score: {}", state.score)))?;
    if state.high_score > state.score {
        out.queue(style::SetForegroundColor(C_HUD_BEST))?;
        out.queue(Print(format!("  Best: {}", state.high_score)))?;
    }

    // Level — top right
    let level_str = format!("Level: {}", state.level);
    let lx = view
        .cols
        .saturating_sub(level_str.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&level_str))?;

    // Lives — bottom left
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(Print(format!("Lives: {}", state.ship.lives)))?;

    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

fn draw_battlefield<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    for enemy in state.fleet.alive() {
        draw_enemy(out, enemy, view)?;
    }
    for bullet in &state.enemy_bullets {
        draw_bullet(out, bullet, view, C_BULLET_ENEMY)?;
    }
    Ok(())
}

fn draw_enemy<W: Write>(out: &mut W, enemy: &Enemy, view: &Viewport) -> std::io::Result<()> {
    draw_sprite(out, view, alien_frame(enemy.frame), &enemy.rect, C_ENEMY)
}

fn draw_ship<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
    now: u64,
) -> std::io::Result<()> {
    let ship = &state.ship;
    if ship_visible(ship, now) {
        draw_sprite(out, view, &PLAYER_SHIP, &ship.rect(), C_SHIP)?;
    }
    // Bullets stay visible through the blink
    for bullet in &ship.bullets {
        draw_bullet(out, bullet, view, C_BULLET_PLAYER)?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    view: &Viewport,
    color: Color,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;
    for (col, row) in view.project(&bullet.rect).cells() {
        put(out, view, col, row, "│")?;
    }
    Ok(())
}

// ── Game-over overlay ─────────────────────────────────────────────────────────

fn draw_game_over<W: Write>(
    out: &mut W,
    state: &GameState,
    view: &Viewport,
) -> std::io::Result<()> {
    let lines: &[&str] = &[
        "╔════════════════════╗",
        "║     GAME  OVER     ║",
        "╚════════════════════╝",
    ];
    let score_line = format!("Final Score: {}", state.score);
    let new_best = state.score > 0 && state.score >= state.high_score;
    let best_line = if new_best {
        format!("★ NEW BEST: {} ★", state.score)
    } else {
        format!("Best Score: {}", state.high_score)
    };

    let total_rows = lines.len() as u16 + 3; // box + score + best + hint
    let start_row = (view.rows / 2).saturating_sub(total_rows / 2);

    for (i, msg) in lines.iter().enumerate() {
        print_centered(out, view, start_row + i as u16, msg, C_GAME_OVER)?;
    }
    let score_row = start_row + lines.len() as u16;
    print_centered(out, view, score_row, &score_line, C_FINAL_SCORE)?;
    print_centered(
        out,
        view,
        score_row + 1,
        &best_line,
        if new_best { C_FINAL_SCORE } else { C_HINT },
    )?;
    print_centered(out, view, score_row + 2, "Press R to restart or Q to Quit", C_TEXT)?;

    Ok(())
}
