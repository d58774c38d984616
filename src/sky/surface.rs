//! Drawing surface the sky scene is painted onto.
//!
//! The scene works in virtual pixel space; a [`Surface`] decides how those
//! commands map onto real output (terminal cells in `ui::surface`, a command
//! log in tests).

/// Straight-alpha colour used by every drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    #[must_use]
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self {
            a: if alpha.is_finite() {
                alpha.clamp(0.0, 1.0)
            } else {
                0.0
            },
            ..self
        }
    }
}

pub trait Surface {
    /// Wipe everything drawn during the previous frame.
    fn clear(&mut self);

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba);

    /// Radial gradient from `inner` at the centre to `outer` at `radius`.
    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner: Rgba, outer: Rgba);
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    FillCircle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
    },
    StrokeLine {
        from: (f32, f32),
        to: (f32, f32),
        width: f32,
        color: Rgba,
    },
    RadialGlow {
        cx: f32,
        cy: f32,
        radius: f32,
        inner: Rgba,
        outer: Rgba,
    },
}

/// Surface that only remembers what it was asked to draw.
#[derive(Debug, Default)]
pub struct CommandLog {
    pub commands: Vec<DrawCommand>,
}

impl CommandLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl Surface for CommandLog {
    fn clear(&mut self) {
        self.commands.push(DrawCommand::Clear);
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::FillCircle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn stroke_line(&mut self, from: (f32, f32), to: (f32, f32), width: f32, color: Rgba) {
        self.commands.push(DrawCommand::StrokeLine {
            from,
            to,
            width,
            color,
        });
    }

    fn radial_glow(&mut self, cx: f32, cy: f32, radius: f32, inner: Rgba, outer: Rgba) {
        self.commands.push(DrawCommand::RadialGlow {
            cx,
            cy,
            radius,
            inner,
            outer,
        });
    }
}
