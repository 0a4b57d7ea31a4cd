use dashcore::charts::{ChartKind, ChartState, Rgb};
use iced::{
    mouse,
    widget::canvas::{self, Frame, Geometry, Path, Stroke},
    Color, Point, Rectangle, Renderer, Size, Theme,
};
use std::f32::consts::PI;

const BACKGROUND: Color = Color {
    r: 0.05,
    g: 0.05,
    b: 0.05,
    a: 1.0,
};
const DOUGHNUT_HOLE: f32 = 0.55;
const ARC_STEPS: usize = 48;

pub fn color(rgb: Rgb) -> Color {
    Color::from_rgb8(rgb.0, rgb.1, rgb.2)
}

/// Canvas program drawing one dashboard chart from its series.
#[derive(Clone)]
pub struct ChartCanvas {
    state: ChartState,
}

impl ChartCanvas {
    pub fn new(state: &ChartState) -> Self {
        Self {
            state: state.clone(),
        }
    }

    fn palette(&self) -> &[Rgb] {
        self.state
            .datasets
            .first()
            .map(|dataset| dataset.colors.as_slice())
            .unwrap_or(&[])
    }

    fn color_at(&self, index: usize) -> Color {
        let palette = self.palette();
        if palette.is_empty() {
            Color::from_rgb(0.18, 0.72, 0.89)
        } else {
            color(palette[index % palette.len()])
        }
    }

    fn draw_doughnut(&self, frame: &mut Frame, bounds: Rectangle) {
        let values = self.state.values();
        let total: f64 = values.iter().sum();
        if total <= 0.0 {
            return;
        }
        let center = Point::new(bounds.width / 2.0, bounds.height / 2.0);
        let outer = bounds.width.min(bounds.height) / 2.0 - 8.0;
        let inner = outer * DOUGHNUT_HOLE;
        let mut start = -PI / 2.0;

        for (index, value) in values.iter().enumerate() {
            let sweep = (*value / total) as f32 * 2.0 * PI;
            if sweep <= 0.0 {
                continue;
            }
            let end = start + sweep;
            let wedge = Path::new(|builder| {
                for step in 0..=ARC_STEPS {
                    let angle = start + sweep * step as f32 / ARC_STEPS as f32;
                    let point = Point::new(
                        center.x + outer * angle.cos(),
                        center.y + outer * angle.sin(),
                    );
                    if step == 0 {
                        builder.move_to(point);
                    } else {
                        builder.line_to(point);
                    }
                }
                for step in (0..=ARC_STEPS).rev() {
                    let angle = start + sweep * step as f32 / ARC_STEPS as f32;
                    builder.line_to(Point::new(
                        center.x + inner * angle.cos(),
                        center.y + inner * angle.sin(),
                    ));
                }
                builder.close();
            });
            frame.fill(&wedge, self.color_at(index));
            start = end;
        }
    }

    fn draw_line(&self, frame: &mut Frame, bounds: Rectangle) {
        let values = self.state.values();
        if values.len() < 2 {
            return;
        }
        let max = values.iter().cloned().fold(0.0, f64::max).max(1.0) as f32;
        let step = bounds.width / (values.len() as f32 - 1.0);
        let points: Vec<Point> = values
            .iter()
            .enumerate()
            .map(|(i, value)| {
                let normalized = *value as f32 / max;
                Point::new(i as f32 * step, bounds.height - normalized * (bounds.height - 8.0))
            })
            .collect();
        let stroke_color = self.color_at(0);
        let filled = self
            .state
            .datasets
            .first()
            .map(|dataset| dataset.fill)
            .unwrap_or(false);

        if filled {
            let area = Path::new(|builder| {
                builder.move_to(Point::new(0.0, bounds.height));
                for point in &points {
                    builder.line_to(*point);
                }
                builder.line_to(Point::new(bounds.width, bounds.height));
                builder.close();
            });
            frame.fill(
                &area,
                Color {
                    a: 0.25,
                    ..stroke_color
                },
            );
        }

        let line = Path::new(|builder| {
            for (i, point) in points.iter().enumerate() {
                if i == 0 {
                    builder.move_to(*point);
                } else {
                    builder.line_to(*point);
                }
            }
        });
        frame.stroke(
            &line,
            Stroke::default().with_width(2.5).with_color(stroke_color),
        );
    }

    fn draw_bars(&self, frame: &mut Frame, bounds: Rectangle) {
        let values = self.state.values();
        if values.is_empty() {
            return;
        }
        let max = values.iter().cloned().fold(0.0, f64::max).max(1.0) as f32;
        let slot = bounds.width / values.len() as f32;
        let bar_width = slot * 0.7;

        for (index, value) in values.iter().enumerate() {
            let height = *value as f32 / max * (bounds.height - 8.0);
            let x = index as f32 * slot + (slot - bar_width) / 2.0;
            frame.fill_rectangle(
                Point::new(x, bounds.height - height),
                Size::new(bar_width, height),
                self.color_at(index),
            );
        }
    }
}

impl<Message> canvas::Program<Message> for ChartCanvas {
    type State = ();

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<Geometry> {
        let mut frame = Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), BACKGROUND);

        match self.state.kind {
            ChartKind::Doughnut => self.draw_doughnut(&mut frame, bounds),
            ChartKind::Line => self.draw_line(&mut frame, bounds),
            ChartKind::Bar => self.draw_bars(&mut frame, bounds),
        }

        vec![frame.into_geometry()]
    }
}
