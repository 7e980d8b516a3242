/// Skeleton loader
/// Grey block with a lighter band sweeping across while an image loads
use iced::widget::canvas::{self, Frame};
use iced::{Color, Point, Rectangle, Size};

const BASE: Color = Color::from_rgb(0.18, 0.18, 0.20);
const HIGHLIGHT: Color = Color::from_rgba(1.0, 1.0, 1.0, 0.08);

/// Band width as a fraction of the block width
const BAND_FRACTION: f32 = 0.3;

#[derive(Debug, Clone, Copy, Default)]
pub struct Skeleton {
    /// Sweep position, 0.0..1.0
    pub phase: f32,
}

impl Skeleton {
    /// Advance a sweep phase by `step`, wrapping at 1.0
    pub fn advance(phase: f32, step: f32) -> f32 {
        (phase + step).rem_euclid(1.0)
    }
}

/// Horizontal extent `(x, width)` of the band, clipped to `[0, width]`
pub fn band(phase: f32, width: f32) -> (f32, f32) {
    let band_width = width * BAND_FRACTION;
    let x = -band_width + (width + band_width) * phase.clamp(0.0, 1.0);

    let start = x.max(0.0);
    let end = (x + band_width).min(width);
    (start, (end - start).max(0.0))
}

impl<Message> canvas::Program<Message> for Skeleton {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &iced::Renderer,
        _theme: &iced::Theme,
        bounds: Rectangle,
        _cursor: iced::mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());

        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BASE);

        let (x, w) = band(self.phase, bounds.width);
        if w > 0.0 {
            frame.fill_rectangle(Point::new(x, 0.0), Size::new(w, bounds.height), HIGHLIGHT);
        }

        vec![frame.into_geometry()]
    }
}
