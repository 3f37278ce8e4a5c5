//! Render commands - declarative draw list produced by a game each tick
//!
//! The core never draws. A render sink receives these commands and maps them
//! onto whatever backend it owns.

use crate::Point2;

/// Semantic palette; the render sink chooses actual colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Target,
    Outline,
    Checkpoint,
    CheckpointHit,
    Trail,
    Highlight,
    Idle,
    Success,
    Failure,
    Cursor,
    Text,
}

/// Fill or outline
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Paint {
    Fill(Color),
    Stroke { color: Color, width: f32 },
}

impl Paint {
    pub fn fill(color: Color) -> Self {
        Paint::Fill(color)
    }

    pub fn stroke(color: Color, width: f32) -> Self {
        Paint::Stroke { color, width }
    }
}

/// Single draw command, in canvas pixels
#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
    Circle {
        center: Point2,
        radius: f32,
        paint: Paint,
    },
    Square {
        center: Point2,
        size: f32,
        paint: Paint,
    },
    Polyline {
        points: Vec<Point2>,
        paint: Paint,
    },
    Text {
        position: Point2,
        text: String,
        size: f32,
        color: Color,
    },
}

/// Ordered draw list for one tick
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderList {
    commands: Vec<RenderCommand>,
}

impl RenderList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, command: RenderCommand) {
        self.commands.push(command);
    }

    pub fn circle(&mut self, center: Point2, radius: f32, paint: Paint) {
        self.push(RenderCommand::Circle {
            center,
            radius,
            paint,
        });
    }

    pub fn square(&mut self, center: Point2, size: f32, paint: Paint) {
        self.push(RenderCommand::Square {
            center,
            size,
            paint,
        });
    }

    pub fn polyline(&mut self, points: Vec<Point2>, paint: Paint) {
        if points.len() >= 2 {
            self.push(RenderCommand::Polyline { points, paint });
        }
    }

    pub fn text(&mut self, position: Point2, text: impl Into<String>, size: f32) {
        self.push(RenderCommand::Text {
            position,
            text: text.into(),
            size,
            color: Color::Text,
        });
    }

    /// Fingertip cursor marker
    pub fn cursor(&mut self, at: Point2) {
        self.circle(at, 8.0, Paint::fill(Color::Cursor));
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    pub fn commands(&self) -> &[RenderCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<RenderCommand> {
        self.commands
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_polyline_needs_two_points() {
        let mut list = RenderList::new();
        list.polyline(vec![Point2::zero()], Paint::stroke(Color::Trail, 2.0));
        assert!(list.is_empty());

        list.polyline(
            vec![Point2::zero(), Point2::new(1.0, 1.0)],
            Paint::stroke(Color::Trail, 2.0),
        );
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_text_uses_text_color() {
        let mut list = RenderList::new();
        list.text(Point2::new(10.0, 20.0), "Score", 18.0);

        match &list.commands()[0] {
            RenderCommand::Text { text, color, .. } => {
                assert_eq!(text, "Score");
                assert_eq!(*color, Color::Text);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
