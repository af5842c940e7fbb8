use raylib::prelude::RaylibDraw;

use crate::text::{Align, LabelPainter, TextMetrics};
use crate::theme::{IRect, PanelTheme};

/// Centered status line over the viewport ("Generating ..." and friends).
pub struct StatusBanner;

impl StatusBanner {
    /// Box around the message, or `None` when hidden.
    pub fn layout<M>(
        measure: &M,
        theme: &PanelTheme,
        message: Option<&str>,
        screen: (i32, i32),
    ) -> Option<IRect>
    where
        M: TextMetrics + ?Sized,
    {
        let message = message.filter(|m| !m.is_empty())?;
        let tw = measure.text_width(message, theme.banner_font);
        let w = tw + theme.padding_x * 4;
        let h = theme.banner_font + theme.padding_y * 4;
        Some(IRect::new((screen.0 - w) / 2, (screen.1 - h) / 2, w, h))
    }

    pub fn draw<D>(d: &mut D, theme: &PanelTheme, message: Option<&str>, screen: (i32, i32))
    where
        D: RaylibDraw + LabelPainter,
    {
        let Some(rect) = Self::layout(&*d, theme, message, screen) else {
            return;
        };
        let Some(message) = message else {
            return;
        };
        d.draw_rectangle(rect.x, rect.y, rect.w, rect.h, theme.banner_background);
        d.draw_rectangle_lines(rect.x, rect.y, rect.w, rect.h, theme.outline);
        d.paint_label(
            message,
            rect,
            Align::Center,
            theme.banner_font,
            theme.banner_text,
        );
    }
}
