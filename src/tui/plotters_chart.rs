//! Plotters-powered grouped bar chart widget for Ratatui.
//!
//! We render Plotters output into the Ratatui buffer using `plotters-ratatui-backend`.

use plotters::prelude::*;
// Ratatui's `Color` shadows the prelude trait.
use plotters::style::Color as _;
use plotters_ratatui_backend::widget_fn;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    widgets::Widget,
};

/// One filled bar in chart coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bar {
    pub x0: f64,
    pub x1: f64,
    pub value: f64,
    pub color: RGBColor,
}

/// A lightweight, render-only chart description.
///
/// All bars and bounds are computed outside the render call, so `render()`
/// only draws.
pub struct SalesBarChart<'a> {
    pub bars: &'a [Bar],
    /// X bounds: one unit per month group.
    pub x_bounds: [f64; 2],
    /// Y bounds in yen (lower bound is always 0).
    pub y_bounds: [f64; 2],
}

impl<'a> Widget for SalesBarChart<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        // When the available area is too small, Plotters may fail to build a chart.
        // In that case, we render a small hint rather than panicking.
        if area.width < 20 || area.height < 6 {
            buf.set_string(
                area.x,
                area.y,
                "Chart area too small (resize terminal).",
                Style::default().fg(Color::Yellow),
            );
            return;
        }

        let [x0, x1] = self.x_bounds;
        let [y0, y1] = self.y_bounds;
        if !(x0.is_finite() && x1.is_finite() && y0.is_finite() && y1.is_finite()) || x1 <= x0 || y1 <= y0 {
            return;
        }

        let widget = widget_fn(move |root| {
            let mut chart = ChartBuilder::on(&root)
                .margin(1)
                // Tick labels are drawn by Ratatui around the chart rect.
                .set_label_area_size(LabelAreaPosition::Left, 1)
                .set_label_area_size(LabelAreaPosition::Bottom, 1)
                .build_cartesian_2d(x0..x1, y0..y1)?;

            chart
                .configure_mesh()
                .disable_x_mesh()
                .disable_y_mesh()
                .x_labels(0)
                .y_labels(0)
                .axis_style(&WHITE)
                .draw()?;

            chart.draw_series(
                self.bars
                    .iter()
                    .map(|b| Rectangle::new([(b.x0, 0.0), (b.x1, b.value)], b.color.filled())),
            )?;

            Ok(())
        });

        widget.render(area, buf);
    }
}
