//! Bundled sprites.
//!
//! Sprites are small text files compiled into the binary:
//!
//! ```text
//! # optional comments
//! y = f5c842
//! . = none
//! ---
//! ..yy..
//! .yyyy.
//! ```
//!
//! Palette lines map one glyph to a colour (`none` is transparent), the
//! `---` line ends the palette, and every row after it must have the same
//! width.

use crate::render::Rgb;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AssetError {
    #[error("{asset}: no `---` line between palette and pixels")]
    MissingSeparator { asset: &'static str },

    #[error("{asset}:{line}: bad palette entry `{text}`")]
    BadPalette {
        asset: &'static str,
        line: usize,
        text: String,
    },

    #[error("{asset}:{line}: unknown glyph `{glyph}`")]
    UnknownGlyph {
        asset: &'static str,
        line: usize,
        glyph: char,
    },

    #[error("{asset}:{line}: row is {found} pixels wide, expected {expected}")]
    RaggedRow {
        asset: &'static str,
        line: usize,
        expected: usize,
        found: usize,
    },

    #[error("{asset}: sprite has no pixels")]
    Empty { asset: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sprite {
    width: usize,
    height: usize,
    /// Row-major, `None` is transparent.
    pixels: Vec<Option<Rgb>>,
}

impl Sprite {
    pub fn parse(asset: &'static str, text: &str) -> Result<Sprite, AssetError> {
        let mut palette: HashMap<char, Option<Rgb>> = HashMap::new();
        let mut lines = text.lines().enumerate().map(|(i, l)| (i + 1, l.trim_end()));

        let mut separated = false;
        for (line, raw) in lines.by_ref() {
            let entry = raw.trim();
            if entry.is_empty() || entry.starts_with('#') {
                continue;
            }
            if entry == "---" {
                separated = true;
                break;
            }
            let (glyph, color) = parse_palette_entry(entry).ok_or_else(|| AssetError::BadPalette {
                asset,
                line,
                text: entry.to_string(),
            })?;
            palette.insert(glyph, color);
        }
        if !separated {
            return Err(AssetError::MissingSeparator { asset });
        }

        let mut width = 0;
        let mut height = 0;
        let mut pixels = Vec::new();
        for (line, row) in lines {
            if row.is_empty() {
                continue;
            }
            let found = row.chars().count();
            if height == 0 {
                width = found;
            } else if found != width {
                return Err(AssetError::RaggedRow {
                    asset,
                    line,
                    expected: width,
                    found,
                });
            }
            for glyph in row.chars() {
                let color = palette
                    .get(&glyph)
                    .ok_or(AssetError::UnknownGlyph { asset, line, glyph })?;
                pixels.push(*color);
            }
            height += 1;
        }
        if height == 0 {
            return Err(AssetError::Empty { asset });
        }

        Ok(Sprite {
            width,
            height,
            pixels,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<Rgb> {
        self.pixels[y * self.width + x]
    }
}

/// `g = RRGGBB` or `g = none`.
fn parse_palette_entry(entry: &str) -> Option<(char, Option<Rgb>)> {
    let (glyph, color) = entry.split_once('=')?;
    let mut chars = glyph.trim().chars();
    let glyph = chars.next()?;
    if chars.next().is_some() {
        return None;
    }
    let color = color.trim();
    if color.eq_ignore_ascii_case("none") {
        return Some((glyph, None));
    }
    if color.len() != 6 {
        return None;
    }
    let rgb = u32::from_str_radix(color, 16).ok()?;
    Some((
        glyph,
        Some(Rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)),
    ))
}

/// The four images the board is drawn from.
#[derive(Debug, Clone)]
pub struct Assets {
    pub background: Sprite,
    pub bird: Sprite,
    pub top_pipe: Sprite,
    pub bottom_pipe: Sprite,
}

impl Assets {
    pub fn load() -> Result<Assets, AssetError> {
        let assets = Assets {
            background: Sprite::parse("background", include_str!("../assets/background.txt"))?,
            bird: Sprite::parse("bird", include_str!("../assets/bird.txt"))?,
            top_pipe: Sprite::parse("top_pipe", include_str!("../assets/top_pipe.txt"))?,
            bottom_pipe: Sprite::parse("bottom_pipe", include_str!("../assets/bottom_pipe.txt"))?,
        };
        log::info!(
            "loaded sprites: background {}x{}, bird {}x{}, pipes {}x{}",
            assets.background.width(),
            assets.background.height(),
            assets.bird.width(),
            assets.bird.height(),
            assets.top_pipe.width(),
            assets.top_pipe.height(),
        );
        Ok(assets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bundled_sprites_load() {
        let assets = Assets::load().unwrap();
        assert!(assets.bird.width() > 0);
        assert_eq!(assets.top_pipe.width(), assets.bottom_pipe.width());
        assert_eq!(assets.top_pipe.height(), assets.bottom_pipe.height());
        // The backdrop covers the whole board.
        let bg = &assets.background;
        for y in 0..bg.height() {
            for x in 0..bg.width() {
                assert!(bg.get(x, y).is_some(), "hole at {x},{y}");
            }
        }
    }

    #[test]
    fn parses_palette_and_transparency() {
        let sprite = Sprite::parse(
            "t",
            "# two by two\nr = ff0000\n. = none\n---\nr.\n.r\n",
        )
        .unwrap();
        assert_eq!((sprite.width(), sprite.height()), (2, 2));
        assert_eq!(sprite.get(0, 0), Some(Rgb(255, 0, 0)));
        assert_eq!(sprite.get(1, 0), None);
        assert_eq!(sprite.get(1, 1), Some(Rgb(255, 0, 0)));
    }

    #[test]
    fn reports_where_it_went_wrong() {
        assert_eq!(
            Sprite::parse("t", "r = ff0000\n. = none\n"),
            Err(AssetError::MissingSeparator { asset: "t" })
        );
        assert_eq!(
            Sprite::parse("t", "r = red\n---\nr\n"),
            Err(AssetError::BadPalette {
                asset: "t",
                line: 1,
                text: "r = red".into()
            })
        );
        assert_eq!(
            Sprite::parse("t", "r = ff0000\n---\nrr\nrx\n"),
            Err(AssetError::UnknownGlyph {
                asset: "t",
                line: 4,
                glyph: 'x'
            })
        );
        assert_eq!(
            Sprite::parse("t", "r = ff0000\n---\nrr\nr\n"),
            Err(AssetError::RaggedRow {
                asset: "t",
                line: 4,
                expected: 2,
                found: 1
            })
        );
        assert_eq!(
            Sprite::parse("t", "r = ff0000\n---\n"),
            Err(AssetError::Empty { asset: "t" })
        );
    }
}
