use crate::model::{Rgb, Vec2, World};
use crossterm::{
    cursor,
    event::{DisableMouseCapture, EnableMouseCapture},
    execute, queue,
    style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor},
    terminal::{
        self, BeginSynchronizedUpdate, Clear, ClearType, DisableLineWrap, EnableLineWrap,
        EndSynchronizedUpdate, EnterAlternateScreen, LeaveAlternateScreen,
    },
};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f32::consts::PI;
use std::io::{self, Write};

// terminal cells are roughly twice as tall as wide
pub(crate) const Y_SQUASH: f32 = 0.52;

impl Rgb {
    pub(crate) fn to_color(self) -> Color {
        Color::Rgb { r: self.r, g: self.g, b: self.b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cell {
    pub(crate) ch: char,
    pub(crate) fg: Color,
    pub(crate) bg: Color,
}

impl Cell {
    pub(crate) fn blank() -> Self {
        Self { ch: ' ', fg: Color::Reset, bg: Color::Black }
    }
}

pub(crate) struct CellBuffer {
    pub(crate) w: u16,
    pub(crate) h: u16,
    pub(crate) cells: Vec<Cell>,
}

impl CellBuffer {
    pub(crate) fn new(w: u16, h: u16) -> Self {
        Self {
            w,
            h,
            cells: vec![Cell::blank(); (w as usize) * (h as usize)],
        }
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        (y as usize) * (self.w as usize) + (x as usize)
    }

    pub(crate) fn clear(&mut self) {
        self.cells.fill(Cell::blank());
    }

    pub(crate) fn put(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = self.idx(x as u16, y as u16);
        self.cells[i] = Cell { ch, fg, bg: Color::Black };
    }

    /// Like `put`, but keeps whatever is already drawn there. Used for
    /// faint decorations so they never punch holes in bodies or text.
    pub(crate) fn put_under(&mut self, x: i32, y: i32, ch: char, fg: Color) {
        if x < 0 || y < 0 || x >= self.w as i32 || y >= self.h as i32 {
            return;
        }
        let i = self.idx(x as u16, y as u16);
        if self.cells[i].ch == ' ' {
            self.cells[i] = Cell { ch, fg, bg: Color::Black };
        }
    }

    pub(crate) fn text(&mut self, x: i32, y: i32, s: &str, fg: Color) {
        let mut xi = x;
        for ch in s.chars() {
            self.put(xi, y, ch, fg);
            xi += 1;
        }
    }
}

pub(crate) struct Terminal {
    pub(crate) out: io::Stdout,
    pub(crate) cols: u16,
    pub(crate) rows: u16,
    pub(crate) prev: CellBuffer,
    pub(crate) cur: CellBuffer,
}

impl Terminal {
    pub(crate) fn begin() -> anyhow::Result<Self> {
        let mut out = io::stdout();
        execute!(
            out,
            EnterAlternateScreen,
            cursor::Hide,
            DisableLineWrap,
            EnableMouseCapture,
            Clear(ClearType::All)
        )?;
        terminal::enable_raw_mode()?;

        let (cols, rows) = terminal::size()?;
        Ok(Self {
            out,
            cols,
            rows,
            prev: CellBuffer::new(cols, rows),
            cur: CellBuffer::new(cols, rows),
        })
    }

    pub(crate) fn end(&mut self) -> anyhow::Result<()> {
        queue!(
            self.out,
            ResetColor,
            Clear(ClearType::All),
            DisableMouseCapture,
            cursor::Show,
            EnableLineWrap,
            LeaveAlternateScreen
        )?;
        self.out.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    pub(crate) fn resize_if_needed(&mut self) -> anyhow::Result<bool> {
        let (c, r) = terminal::size()?;
        if c == self.cols && r == self.rows {
            return Ok(false);
        }
        self.cols = c;
        self.rows = r;
        self.prev = CellBuffer::new(c, r);
        self.cur = CellBuffer::new(c, r);
        execute!(self.out, Clear(ClearType::All))?;
        Ok(true)
    }

    pub(crate) fn present(&mut self) -> anyhow::Result<()> {
        queue!(self.out, BeginSynchronizedUpdate)?;

        let mut last_fg = None;
        let mut last_bg = None;
        for y in 0..self.rows {
            for x in 0..self.cols {
                let i = self.cur.idx(x, y);
                let c = self.cur.cells[i];
                if c == self.prev.cells[i] {
                    continue;
                }
                queue!(self.out, cursor::MoveTo(x, y))?;
                if last_fg != Some(c.fg) {
                    queue!(self.out, SetForegroundColor(c.fg))?;
                    last_fg = Some(c.fg);
                }
                if last_bg != Some(c.bg) {
                    queue!(self.out, SetBackgroundColor(c.bg))?;
                    last_bg = Some(c.bg);
                }
                queue!(self.out, Print(c.ch))?;
            }
        }

        queue!(self.out, EndSynchronizedUpdate)?;
        self.out.flush()?;
        self.prev.cells.copy_from_slice(&self.cur.cells);
        Ok(())
    }
}

/* -----------------------------
   World <-> cell mapping
------------------------------ */

#[derive(Clone, Copy, Debug)]
pub(crate) struct Camera {
    cx: f32,
    cy: f32,
    scale: f32,
}

impl Camera {
    pub(crate) fn fit(cols: u16, rows: u16, extent: f32) -> Self {
        let cx = cols as f32 * 0.5;
        let cy = rows as f32 * 0.5;
        let sx = (cols.saturating_sub(2) as f32 * 0.5) / extent.max(1.0);
        let sy = (rows.saturating_sub(2) as f32 * 0.5) / (extent.max(1.0) * Y_SQUASH);
        Camera { cx, cy, scale: sx.min(sy).max(1e-3) }
    }

    pub(crate) fn to_cell(&self, p: Vec2) -> (i32, i32) {
        let x = (self.cx + p.x * self.scale).round() as i32;
        let y = (self.cy + p.y * self.scale * Y_SQUASH).round() as i32;
        (x, y)
    }

    pub(crate) fn to_world(&self, col: u16, row: u16) -> Vec2 {
        Vec2::new(
            (col as f32 - self.cx) / self.scale,
            (row as f32 - self.cy) / (self.scale * Y_SQUASH),
        )
    }
}

/* -----------------------------
   Star field
------------------------------ */

#[derive(Clone, Copy)]
pub(crate) struct Star {
    x: u16,
    y: u16,
    phase: f32,
    depth: f32,
}

pub(crate) fn build_stars(w: u16, h: u16, count: usize, seed: u64) -> Vec<Star> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut stars = Vec::with_capacity(count);
    if w < 2 || h < 2 {
        return stars;
    }
    for _ in 0..count {
        stars.push(Star {
            x: rng.gen_range(0..w),
            y: rng.gen_range(0..h),
            phase: rng.gen_range(0.0..(PI * 2.0)),
            depth: rng.gen_range(0.35..1.0),
        });
    }
    stars
}

pub(crate) fn paint_stars(buf: &mut CellBuffer, stars: &[Star], t: f32) {
    for s in stars {
        let tw = (t * 0.65 + s.phase).sin() * 0.5 + 0.5;
        let b = 0.2 + 0.8 * tw * s.depth;
        let c = (40.0 + b * 180.0).clamp(0.0, 255.0) as u8;
        let ch = if b > 0.82 {
            '✦'
        } else if b > 0.62 {
            '•'
        } else {
            '·'
        };
        let fg = Color::Rgb { r: c, g: c, b: (c as u16 + 25).min(255) as u8 };
        buf.put_under(s.x as i32, s.y as i32, ch, fg);
    }
}

/* -----------------------------
   World drawing
------------------------------ */

fn draw_circle(buf: &mut CellBuffer, cam: &Camera, center: Vec2, radius: f32, fg: Color, every: i32) {
    let steps = ((radius * 6.0).max(24.0)) as i32;
    for s in 0..steps {
        if every > 1 && s % every != 0 {
            continue;
        }
        let a = 2.0 * PI * (s as f32 / steps as f32);
        let (x, y) = cam.to_cell(center.add(Vec2::on_circle(radius, a)));
        buf.put_under(x, y, '·', fg);
    }
}

fn planet_glyph(size: f32) -> char {
    if size >= 0.8 {
        '●'
    } else {
        '•'
    }
}

pub(crate) fn draw_world(
    buf: &mut CellBuffer,
    cam: &Camera,
    world: &World,
    show_orbits: bool,
    force_labels: bool,
) {
    let dim = Color::Rgb { r: 70, g: 80, b: 95 };

    if show_orbits {
        for p in &world.planets {
            draw_circle(buf, cam, world.sun, p.radius, dim, 3);
        }
    }

    for (belt, color) in world.belts.iter().zip(&world.belt_colors) {
        for b in belt {
            let (x, y) = cam.to_cell(b.pos);
            buf.put_under(x, y, '·', color.to_color());
        }
    }

    for ring in &world.rings {
        let center = world.planets[ring.parent].pos;
        for &r in &ring.radii {
            draw_circle(buf, cam, center, r, ring.color.to_color(), 1);
        }
    }

    for c in &world.comets {
        let head = cam.to_cell(c.pos);
        buf.put(head.0, head.1, '✦', Color::Rgb { r: 210, g: 235, b: 255 });
        for i in 1..=3 {
            let trail = c.pos.sub(Vec2::new(c.vel.x * i as f32, c.vel.y * i as f32));
            let (x, y) = cam.to_cell(trail);
            let f = 200 - i * 45;
            buf.put_under(x, y, '·', Color::Rgb { r: f as u8, g: f as u8, b: 255u8.min(f as u8 + 40) });
        }
    }

    let (sx, sy) = cam.to_cell(world.sun);
    buf.put(sx, sy, '●', Color::Rgb { r: 255, g: 220, b: 110 });

    for m in &world.moons {
        let (x, y) = cam.to_cell(m.pos);
        buf.put(x, y, '∙', m.color.to_color());
    }

    for p in &world.planets {
        let (x, y) = cam.to_cell(p.pos);
        buf.put(x, y, planet_glyph(p.size), p.color.to_color());
        if p.label_visible || force_labels {
            buf.text(x + 2, y, p.name, Color::Rgb { r: 220, g: 225, b: 235 });
        }
    }
}

/* -----------------------------
   Panels and status line
------------------------------ */

fn box_draw(buf: &mut CellBuffer, x0: i32, y0: i32, bw: i32, bh: i32, fg: Color) {
    if bw < 2 || bh < 2 {
        return;
    }
    let x1 = x0 + bw - 1;
    let y1 = y0 + bh - 1;
    for x in x0 + 1..x1 {
        buf.put(x, y0, '─', fg);
        buf.put(x, y1, '─', fg);
    }
    for y in y0 + 1..y1 {
        buf.put(x0, y, '│', fg);
        buf.put(x1, y, '│', fg);
    }
    buf.put(x0, y0, '┌', fg);
    buf.put(x1, y0, '┐', fg);
    buf.put(x0, y1, '└', fg);
    buf.put(x1, y1, '┘', fg);
}

/// Info panel pinned to the top-left corner.
pub(crate) fn draw_info_panel(buf: &mut CellBuffer, world: &World) {
    let Some(lines) = world.panel_lines() else {
        return;
    };
    let edge = Color::Rgb { r: 90, g: 100, b: 120 };
    let fg = Color::Rgb { r: 220, g: 225, b: 235 };

    let bw = (lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4) as i32;
    let bh = lines.len() as i32 + 2;

    // opaque backing so the field doesn't show through
    for y in 0..bh {
        for x in 0..bw {
            buf.put(x, y, ' ', fg);
        }
    }
    box_draw(buf, 0, 0, bw, bh, edge);
    for (i, line) in lines.iter().enumerate() {
        buf.text(2, 1 + i as i32, line, fg);
    }
}

pub(crate) fn draw_status(buf: &mut CellBuffer, world: &World, paused: bool) {
    let dim = Color::Rgb { r: 130, g: 140, b: 155 };
    let state = if paused { "paused" } else { "running" };
    let line = format!(
        "q quit | space pause | o orbits | l labels | r stars | hover/click a planet   [{state}] tick {}",
        world.ticks
    );
    let y = buf.h.saturating_sub(1) as i32;
    buf.text(1, y, &line, dim);
}
