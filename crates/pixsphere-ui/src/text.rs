use raylib::prelude::{Color, RaylibDraw, RaylibDrawHandle};

use crate::theme::IRect;

/// Horizontal placement of a label inside its rectangle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    /// Left edge plus an inset.
    Start(i32),
    Center,
    /// Right edge minus an inset.
    End(i32),
}

/// Top-left corner for a label `width` pixels wide, vertically centered in `rect`.
pub fn label_origin(rect: IRect, align: Align, width: i32, font_size: i32) -> (i32, i32) {
    let x = match align {
        Align::Start(inset) => rect.x + inset,
        Align::Center => rect.x + (rect.w - width) / 2,
        Align::End(inset) => rect.x + rect.w - inset - width,
    };
    (x, rect.y + (rect.h - font_size) / 2)
}

/// Text widths for layout. Kept apart from drawing so layout runs without a window.
pub trait TextMetrics {
    fn text_width(&self, text: &str, font_size: i32) -> i32;
}

pub trait LabelPainter: TextMetrics {
    fn paint_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color);

    fn paint_label(&mut self, text: &str, rect: IRect, align: Align, font_size: i32, color: Color) {
        let width = self.text_width(text, font_size);
        let (x, y) = label_origin(rect, align, width, font_size);
        self.paint_text(text, x, y, font_size, color);
    }
}

impl TextMetrics for RaylibDrawHandle<'_> {
    fn text_width(&self, text: &str, font_size: i32) -> i32 {
        self.measure_text(text, font_size)
    }
}

impl LabelPainter for RaylibDrawHandle<'_> {
    fn paint_text(&mut self, text: &str, x: i32, y: i32, font_size: i32, color: Color) {
        self.draw_text(text, x, y, font_size, color);
    }
}
