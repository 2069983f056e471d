//! Surface that records draw calls instead of rasterising them

use glam::Vec2;

use super::{Color, Sprite, Surface};

/// Glyph advance as a fraction of font size
const GLYPH_ADVANCE: f32 = 0.5;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    Blit {
        sprite: Sprite,
        pos: Vec2,
        flip_x: bool,
    },
    Text {
        text: String,
        size: f32,
        color: Color,
        pos: Vec2,
    },
}

/// Records one frame at a time; `clear` starts a new frame
#[derive(Debug, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    frames: u64,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Commands of the current frame
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Frames started so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// All text drawn this frame, in draw order
    pub fn texts(&self) -> Vec<&str> {
        self.commands
            .iter()
            .filter_map(|cmd| match cmd {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text command whose string equals `text`
    pub fn find_text(&self, text: &str) -> Option<&DrawCommand> {
        self.commands
            .iter()
            .find(|cmd| matches!(cmd, DrawCommand::Text { text: t, .. } if t == text))
    }

    pub fn blits(&self) -> impl Iterator<Item = (&Sprite, Vec2, bool)> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Blit {
                sprite,
                pos,
                flip_x,
            } => Some((sprite, *pos, *flip_x)),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clear(&mut self, color: Color) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
        self.frames += 1;
    }

    fn blit(&mut self, sprite: Sprite, pos: Vec2, flip_x: bool) {
        self.commands.push(DrawCommand::Blit {
            sprite,
            pos,
            flip_x,
        });
    }

    fn text(&mut self, text: &str, size: f32, color: Color, pos: Vec2) {
        self.commands.push(DrawCommand::Text {
            text: text.to_string(),
            size,
            color,
            pos,
        });
    }

    fn text_width(&self, text: &str, size: f32) -> f32 {
        text.chars().count() as f32 * size * GLYPH_ADVANCE
    }
}
