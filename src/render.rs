use crate::assets::{Assets, Sprite};
use crate::font;
use crate::game::{Game, PipeKind};
use crate::geometry::Rect;
use crossterm::{
    cursor, queue,
    style::{self, Color as CColor},
};
use std::io::{self, Write};

// ── Colors ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    const fn halved(self) -> Rgb {
        Rgb(self.0 / 2, self.1 / 2, self.2 / 2)
    }

    const fn term(self) -> CColor {
        CColor::Rgb {
            r: self.0,
            g: self.1,
            b: self.2,
        }
    }
}

const BORDER: Rgb = Rgb(24, 28, 36);
const WHITE: Rgb = Rgb(255, 255, 255);
const GOLD: Rgb = Rgb(245, 200, 66);
const SHADOW: Rgb = Rgb(30, 30, 30);

// ── Pixel buffer with half-block rendering ──────────────────────────────────

/// Screen-sized pixel grid. Each terminal cell shows two vertically stacked
/// pixels, so `h` is twice the number of rows.
pub struct PixelBuf {
    w: usize,
    h: usize,
    px: Vec<Rgb>,
}

impl PixelBuf {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            px: vec![BORDER; w * h],
        }
    }

    /// Size for a terminal of `cols` x `rows` cells.
    pub fn for_terminal(cols: u16, rows: u16) -> Self {
        Self::new(cols as usize, rows as usize * 2)
    }

    pub fn resize(&mut self, w: usize, h: usize) {
        self.w = w;
        self.h = h;
        self.px.resize(w * h, BORDER);
    }

    pub fn width(&self) -> usize {
        self.w
    }

    pub fn height(&self) -> usize {
        self.h
    }

    pub fn clear(&mut self, c: Rgb) {
        self.px.fill(c);
    }

    /// Out-of-range writes are dropped.
    pub fn set(&mut self, x: i32, y: i32, c: Rgb) {
        if x >= 0 && y >= 0 && (x as usize) < self.w && (y as usize) < self.h {
            self.px[y as usize * self.w + x as usize] = c;
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Rgb {
        self.px[y * self.w + x]
    }

    pub fn render(&self, out: &mut impl Write) -> io::Result<()> {
        queue!(out, cursor::MoveTo(0, 0))?;
        let rows = self.h / 2;

        for row in 0..rows {
            // Colours currently set on the terminal; reset at each line.
            let mut fg: Option<Rgb> = None;
            let mut bg: Option<Rgb> = None;

            for col in 0..self.w {
                let top = self.get(col, row * 2);
                let bot = self.get(col, row * 2 + 1);

                if bg != Some(bot) {
                    queue!(out, style::SetBackgroundColor(bot.term()))?;
                    bg = Some(bot);
                }
                if top == bot {
                    queue!(out, style::Print(' '))?;
                    continue;
                }
                if fg != Some(top) {
                    queue!(out, style::SetForegroundColor(top.term()))?;
                    fg = Some(top);
                }
                queue!(out, style::Print('\u{2580}'))?; // ▀
            }
            if row + 1 < rows {
                queue!(out, style::ResetColor, style::Print("\r\n"))?;
            }
        }
        queue!(out, style::ResetColor)?;
        out.flush()
    }
}

// ── Board to screen mapping ─────────────────────────────────────────────────

/// Places the fixed-size board inside the pixel buffer: uniform scale,
/// centred, the rest left as letterbox.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    scale: f64,
    left: i32,
    top: i32,
    width: i32,
    height: i32,
}

impl Viewport {
    pub fn fit(screen_w: usize, screen_h: usize, board_w: i32, board_h: i32) -> Self {
        let scale = (screen_w as f64 / board_w as f64).min(screen_h as f64 / board_h as f64);
        let width = (board_w as f64 * scale).floor() as i32;
        let height = (board_h as f64 * scale).floor() as i32;
        Viewport {
            scale,
            left: (screen_w as i32 - width) / 2,
            top: (screen_h as i32 - height) / 2,
            width,
            height,
        }
    }

    pub fn x(&self, board_x: i32) -> i32 {
        self.left + (board_x as f64 * self.scale).floor() as i32
    }

    pub fn y(&self, board_y: i32) -> i32 {
        self.top + (board_y as f64 * self.scale).floor() as i32
    }

    /// Screen rectangle covered by the board.
    pub fn area(&self) -> Rect {
        Rect::new(self.left, self.top, self.width, self.height)
    }

    /// Screen rectangle for a board rectangle.
    pub fn map(&self, r: &Rect) -> Rect {
        let x = self.x(r.x);
        let y = self.y(r.y);
        Rect::new(x, y, self.x(r.right()) - x, self.y(r.bottom()) - y)
    }
}

/// Stretch `sprite` over `dst` (screen pixels), nearest neighbour, skipping
/// transparent pixels and anything outside `clip`.
fn blit(buf: &mut PixelBuf, sprite: &Sprite, dst: Rect, clip: Rect) {
    if dst.width <= 0 || dst.height <= 0 {
        return;
    }
    let (sw, sh) = (sprite.width() as i64, sprite.height() as i64);
    for y in dst.y.max(clip.y)..dst.bottom().min(clip.bottom()) {
        let v = ((y - dst.y) as i64 * sh / dst.height as i64) as usize;
        for x in dst.x.max(clip.x)..dst.right().min(clip.right()) {
            let u = ((x - dst.x) as i64 * sw / dst.width as i64) as usize;
            if let Some(c) = sprite.get(u, v) {
                buf.set(x, y, c);
            }
        }
    }
}

fn draw_text(buf: &mut PixelBuf, x: i32, y: i32, text: &str, fg: Rgb) {
    for (dx, dy) in font::pixels(text) {
        buf.set(x + dx + 1, y + dy + 1, SHADOW);
    }
    for (dx, dy) in font::pixels(text) {
        buf.set(x + dx, y + dy, fg);
    }
}

fn draw_text_centered(buf: &mut PixelBuf, cx: i32, y: i32, text: &str, fg: Rgb) {
    draw_text(buf, cx - font::text_width(text) / 2, y, text, fg);
}

// ── Scene ───────────────────────────────────────────────────────────────────

/// Draw one frame. Reads the game, never changes it.
pub fn draw(game: &Game, assets: &Assets, view: &Viewport, buf: &mut PixelBuf) {
    buf.clear(BORDER);
    let area = view.area();
    let board = &game.config().board;

    blit(
        buf,
        &assets.background,
        view.map(&Rect::new(0, 0, board.width, board.height)),
        area,
    );
    blit(buf, &assets.bird, view.map(&game.bird().rect), area);
    for pipe in game.pipes() {
        let sprite = match pipe.kind {
            PipeKind::Top => &assets.top_pipe,
            PipeKind::Bottom => &assets.bottom_pipe,
        };
        blit(buf, sprite, view.map(&pipe.rect), area);
    }

    if game.is_over() {
        draw_game_over(game, buf, area);
    } else {
        draw_text(
            buf,
            view.x(10),
            view.y(10),
            &game.whole_score().to_string(),
            WHITE,
        );
    }
}

fn draw_game_over(game: &Game, buf: &mut PixelBuf, area: Rect) {
    for y in area.y.max(0)..area.bottom().min(buf.height() as i32) {
        for x in area.x.max(0)..area.right().min(buf.width() as i32) {
            let c = buf.get(x as usize, y as usize);
            buf.set(x, y, c.halved());
        }
    }

    let cx = area.x + area.width / 2;
    let line = font::GLYPH_H + 3;
    let top = area.y + area.height / 3;
    draw_text_centered(buf, cx, top, "GAME OVER", WHITE);
    draw_text_centered(buf, cx, top + line, &game.whole_score().to_string(), WHITE);
    draw_text_centered(buf, cx, top + 2 * line, &format!("BEST {}", game.best()), GOLD);
}
