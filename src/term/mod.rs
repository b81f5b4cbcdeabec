//! Rendering layer - all terminal output lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! world. No game logic is performed; this module only projects the
//! 800x600 logical playfield onto the terminal grid and translates state
//! into queued crossterm commands.

use std::io::Write;

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};
use glam::Vec2;

use crate::consts::*;
use crate::settings::Settings;
use crate::sim::{Enemy, EnemyKind, GamePhase, World};

const C_HUD_SCORE: Color = Color::Yellow;
const C_HUD_LIVES: Color = Color::Red;
const C_PLAYER: Color = Color::Cyan;
const C_BULLET: Color = Color::Cyan;
const C_POWER_UP: Color = Color::Yellow;
const C_RAPID: Color = Color::Yellow;
const C_COOLING: Color = Color::DarkRed;
const C_HINT: Color = Color::DarkGrey;

/// Projection from the logical playfield onto the terminal grid.
///
/// Row 0 carries the HUD, the last row the controls hint; everything in
/// between is playfield.
#[derive(Debug, Clone, Copy)]
pub struct Screen {
    pub width: u16,
    pub height: u16,
}

impl Screen {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width: width.max(20),
            height: height.max(10),
        }
    }

    fn field_rows(&self) -> u16 {
        self.height - 2
    }

    /// Map a logical position to a cell, or None while it is off-screen
    /// (spawns start above the visible area).
    fn cell(&self, pos: Vec2) -> Option<(u16, u16)> {
        if pos.y < 0.0 || pos.y >= SCREEN_HEIGHT || pos.x < 0.0 || pos.x >= SCREEN_WIDTH {
            return None;
        }
        let col = (pos.x / SCREEN_WIDTH * (self.width - 1) as f32) as u16;
        let row = 1 + (pos.y / SCREEN_HEIGHT * (self.field_rows() - 1) as f32) as u16;
        Some((col.min(self.width - 1), row))
    }
}

/// Render one complete frame for the current phase.
pub fn render<W: Write>(
    out: &mut W,
    world: &World,
    screen: Screen,
    settings: &Settings,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match world.phase {
        GamePhase::Menu => draw_menu(out, screen)?,
        GamePhase::Playing => draw_playfield(out, world, screen, settings)?,
        GamePhase::GameOver => draw_game_over(out, world, screen)?,
    }

    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, screen.height.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

fn draw_playfield<W: Write>(
    out: &mut W,
    world: &World,
    screen: Screen,
    settings: &Settings,
) -> std::io::Result<()> {
    draw_hud(out, world, screen, settings)?;

    for enemy in &world.enemies {
        draw_enemy(out, enemy, screen, settings)?;
    }
    for bullet in &world.bullets {
        if let Some((col, row)) = screen.cell(bullet.pos) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_BULLET))?;
            out.queue(Print("║"))?;
        }
    }
    for power_up in &world.power_ups {
        if let Some((col, row)) = screen.cell(power_up.pos) {
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(C_POWER_UP))?;
            out.queue(Print("★"))?;
        }
    }
    for obstacle in &world.obstacles {
        if let Some((col, row)) = screen.cell(obstacle.pos) {
            let (r, g, b) = obstacle.color;
            out.queue(cursor::MoveTo(col, row))?;
            out.queue(style::SetForegroundColor(Color::Rgb { r, g, b }))?;
            out.queue(Print("▓▓"))?;
        }
    }

    draw_player(out, world, screen)?;
    draw_controls_hint(out, screen, "← → / A D : Move   SPACE : Shoot   ESC : Menu")?;
    Ok(())
}

// ── HUD (row 0) ──────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(
    out: &mut W,
    world: &World,
    screen: Screen,
    settings: &Settings,
) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(0, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_SCORE))?;
    out.queue(Print(format!("Score: {:>6}", world.score)))?;

    let level_str = format!("Level {}", world.level);
    let lx = (screen.width / 2).saturating_sub(level_str.len() as u16 / 2);
    out.queue(cursor::MoveTo(lx, 0))?;
    out.queue(style::SetForegroundColor(Color::Green))?;
    out.queue(Print(&level_str))?;

    let hearts: String = "♥".repeat(world.player.lives as usize);
    let lives_text = format!("Lives: {hearts}");
    let rx = screen
        .width
        .saturating_sub(lives_text.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(rx, 0))?;
    out.queue(style::SetForegroundColor(C_HUD_LIVES))?;
    out.queue(Print(&lives_text))?;

    if settings.show_counters {
        let cap = world.bullet_cap();
        let ammo = format!(
            "Enemies: {}   Bullets: {}/{}",
            world.enemies.len(),
            world.bullets.len(),
            cap
        );
        let color = if world.rapid_fire_active() {
            C_RAPID
        } else if world.shoot_cooldown > 0 {
            C_COOLING
        } else {
            Color::White
        };
        out.queue(cursor::MoveTo(0, 1))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(&ammo))?;

        if world.rapid_fire_active() {
            let seconds = world.rapid_fire_ticks / TICK_RATE;
            out.queue(Print(format!("   RAPID FIRE: {seconds}s")))?;
        }
    }

    if settings.show_progress && world.score < world.level_target() {
        let needed = world.points_needed();
        let progress = world.score % needed;
        let text = format!("Next level: {progress}/{needed}");
        let px = screen
            .width
            .saturating_sub(text.chars().count() as u16 + 1);
        out.queue(cursor::MoveTo(px, 1))?;
        out.queue(style::SetForegroundColor(C_RAPID))?;
        out.queue(Print(&text))?;
    }

    Ok(())
}

// ── Entities ─────────────────────────────────────────────────────────────────

fn draw_player<W: Write>(out: &mut W, world: &World, screen: Screen) -> std::io::Result<()> {
    // Anchor the sprite at the ship's horizontal centre
    let centre = world.player.pos + Vec2::new(PLAYER_SIZE.x / 2.0, 0.0);
    if let Some((col, row)) = screen.cell(centre) {
        out.queue(style::SetForegroundColor(C_PLAYER))?;
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("▲"))?;
        if row + 1 < screen.height - 1 {
            out.queue(cursor::MoveTo(col.saturating_sub(1), row + 1))?;
            out.queue(Print("/█\\"))?;
        }
    }
    Ok(())
}

fn enemy_color(kind: EnemyKind, settings: &Settings) -> Color {
    // Fast runs hot, Tank runs green, matching the additive sprite tints of
    // the desktop original
    match (kind, settings.high_contrast) {
        (EnemyKind::Basic, false) => Color::Grey,
        (EnemyKind::Basic, true) => Color::White,
        (EnemyKind::Fast, _) => Color::Red,
        (EnemyKind::Tank, _) => Color::Green,
    }
}

fn draw_enemy<W: Write>(
    out: &mut W,
    enemy: &Enemy,
    screen: Screen,
    settings: &Settings,
) -> std::io::Result<()> {
    let Some((col, row)) = screen.cell(enemy.pos) else {
        return Ok(());
    };

    out.queue(style::SetForegroundColor(enemy_color(enemy.kind, settings)))?;
    out.queue(cursor::MoveTo(col, row))?;
    let sprite = match enemy.kind {
        EnemyKind::Basic => "<W>",
        EnemyKind::Fast => "«V»",
        EnemyKind::Tank => "[M]",
    };
    out.queue(Print(sprite))?;

    // Proportional health bar above anything tougher than one hit
    if enemy.max_health > 1 && row > 1 {
        const BAR: u16 = 4;
        let filled = (enemy.health_ratio() * BAR as f32).round() as u16;
        out.queue(cursor::MoveTo(col, row - 1))?;
        out.queue(style::SetForegroundColor(Color::Green))?;
        out.queue(Print("▪".repeat(filled as usize)))?;
        out.queue(style::SetForegroundColor(Color::Red))?;
        out.queue(Print("▫".repeat((BAR - filled) as usize)))?;
    }
    Ok(())
}

// ── Overlay screens ──────────────────────────────────────────────────────────

fn draw_centered_lines<W: Write>(
    out: &mut W,
    screen: Screen,
    lines: &[(&str, Color)],
) -> std::io::Result<()> {
    let cx = screen.width / 2;
    let start_row = (screen.height / 2).saturating_sub(lines.len() as u16 / 2);
    for (i, (msg, color)) in lines.iter().enumerate() {
        let col = cx.saturating_sub(msg.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(*color))?;
        out.queue(Print(*msg))?;
    }
    Ok(())
}

fn draw_menu<W: Write>(out: &mut W, screen: Screen) -> std::io::Result<()> {
    draw_centered_lines(
        out,
        screen,
        &[
            ("★  S T A R F A L L  ★", Color::Cyan),
            ("", Color::White),
            ("PRESS SPACE TO START", Color::White),
            ("ESC TO QUIT", C_HINT),
        ],
    )
}

fn draw_game_over<W: Write>(out: &mut W, world: &World, screen: Screen) -> std::io::Result<()> {
    let score_line = format!("Final Score: {}", world.score);
    let level_line = format!("Level Reached: {}", world.level);
    draw_centered_lines(
        out,
        screen,
        &[
            ("╔══════════════════╗", Color::Red),
            ("║    GAME  OVER    ║", Color::Red),
            ("╚══════════════════╝", Color::Red),
            (&score_line, Color::White),
            (&level_line, Color::White),
            ("R - Play Again   ESC - Quit", Color::Yellow),
        ],
    )
}

fn draw_controls_hint<W: Write>(out: &mut W, screen: Screen, hint: &str) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, screen.height.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(hint))?;
    Ok(())
}
