use raylib::prelude::{RaylibDraw, Vector2};

use crate::slider::{PointerInput, Slider, SliderEvent};
use crate::text::{Align, LabelPainter};
use crate::theme::{IRect, PanelTheme};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelEvent {
    RadiusChanged(u32),
    RadiusCommitted(u32),
    SliceChanged(u32),
    SliceCommitted(u32),
    ShowFull,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PanelLayout {
    pub header: IRect,
    pub body: IRect,
    pub radius_row: IRect,
    pub radius_track: IRect,
    pub slice_row: IRect,
    pub slice_track: IRect,
    pub full_button: IRect,
}

/// Two-slider panel pinned to the top-right corner. Starts collapsed.
pub struct ControlPanel {
    pub radius: Slider,
    pub slice: Slider,
    pub theme: PanelTheme,
    collapsed: bool,
}

impl ControlPanel {
    pub fn new(radius: u32, radius_min: u32, radius_max: u32) -> Self {
        let slice_max = 2 * radius;
        Self {
            radius: Slider::new("radius", radius_min, radius_max, radius),
            slice: Slider::new("displayedX", 1, slice_max, slice_max),
            theme: PanelTheme::default(),
            collapsed: true,
        }
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    pub fn toggle(&mut self) {
        self.collapsed = !self.collapsed;
        log::debug!(
            "control panel {}",
            if self.collapsed { "closed" } else { "opened" }
        );
    }

    /// After a radius commit the slice range becomes `[1, max]` and the
    /// slider jumps to the top, i.e. the whole sphere.
    pub fn reset_slice(&mut self, max: u32) {
        self.slice.set_max(max);
        self.slice.set_value(max);
    }

    pub fn layout(&self, screen_w: i32) -> PanelLayout {
        let t = &self.theme;
        let x = screen_w - t.width - t.screen_padding;
        let y = t.screen_padding;
        let header = IRect::new(x, y, t.width, t.header_height);
        if self.collapsed {
            return PanelLayout {
                header,
                ..PanelLayout::default()
            };
        }
        let body_y = y + t.header_height;
        let rows = 3;
        let body = IRect::new(x, body_y, t.width, rows * t.row_height + t.padding_y * 2);
        let row = |i: i32| {
            let row_y = body_y + t.padding_y + i * t.row_height;
            IRect::new(x, row_y, t.width, t.row_height)
        };
        // value text sits to the right of the track
        let value_w = 36;
        let track_for = |r: IRect| {
            IRect::new(
                r.x + t.padding_x + t.label_width,
                r.y + (r.h - t.track_height) / 2,
                r.w - t.padding_x * 2 - t.label_width - value_w,
                t.track_height,
            )
        };
        let radius_row = row(0);
        let slice_row = row(1);
        let button_row = row(2);
        PanelLayout {
            header,
            body,
            radius_row,
            radius_track: track_for(radius_row),
            slice_row,
            slice_track: track_for(slice_row),
            full_button: IRect::new(
                button_row.x + t.padding_x,
                button_row.y + 3,
                button_row.w - t.padding_x * 2,
                button_row.h - 6,
            ),
        }
    }

    /// True when the pointer belongs to the panel this frame, so the camera
    /// should ignore it.
    pub fn captures_pointer(&self, pos: Vector2, screen_w: i32) -> bool {
        if self.radius.is_dragging() || self.slice.is_dragging() {
            return true;
        }
        let l = self.layout(screen_w);
        l.header.contains(pos) || (!self.collapsed && l.body.contains(pos))
    }

    pub fn handle_pointer(&mut self, input: &PointerInput, screen_w: i32) -> Vec<PanelEvent> {
        let l = self.layout(screen_w);
        let mut out = Vec::new();
        if self.radius.is_dragging() {
            out.extend(self.radius.pointer(l.radius_track, input).map(radius_event));
            return out;
        }
        if self.slice.is_dragging() {
            out.extend(self.slice.pointer(l.slice_track, input).map(slice_event));
            return out;
        }
        if input.pressed && l.header.contains(input.pos) {
            self.toggle();
            return out;
        }
        if self.collapsed {
            return out;
        }
        out.extend(self.radius.pointer(l.radius_track, input).map(radius_event));
        out.extend(self.slice.pointer(l.slice_track, input).map(slice_event));
        if out.is_empty() && input.pressed && l.full_button.contains(input.pos) {
            out.push(PanelEvent::ShowFull);
        }
        out
    }

    pub fn step_radius(&mut self, delta: i32) -> Option<PanelEvent> {
        self.radius.step(delta).map(radius_event)
    }

    pub fn step_slice(&mut self, delta: i32) -> Option<PanelEvent> {
        self.slice.step(delta).map(slice_event)
    }

    pub fn draw<D>(&self, d: &mut D, screen_w: i32, mouse: Vector2)
    where
        D: RaylibDraw + LabelPainter,
    {
        let t = &self.theme;
        let l = self.layout(screen_w);
        let h = &l.header;
        let outer_h = h.h + if self.collapsed { 0 } else { l.body.h };

        d.draw_rectangle(h.x + 4, h.y + 6, h.w, outer_h, t.frame_shadow);
        let hovered = h.contains(mouse);
        let mid = h.h / 2;
        let top = if hovered { t.header_hover } else { t.header_top };
        d.draw_rectangle(h.x, h.y, h.w, mid, top);
        d.draw_rectangle(h.x, h.y + mid, h.w, h.h - mid, t.header_bottom);
        let title = if self.collapsed { "Open Controls" } else { "Close Controls" };
        d.paint_label(title, *h, Align::Center, t.title_font, t.title_text);

        if !self.collapsed {
            let b = &l.body;
            d.draw_rectangle(b.x, b.y, b.w, b.h, t.body_color);
            let radius_hover = l.radius_track.inflate(4, 8).contains(mouse);
            self.radius.draw(d, t, l.radius_row, l.radius_track, radius_hover);
            let slice_hover = l.slice_track.inflate(4, 8).contains(mouse);
            self.slice.draw(d, t, l.slice_row, l.slice_track, slice_hover);

            let fb = &l.full_button;
            let fill = if fb.contains(mouse) { t.button_hover } else { t.button_normal };
            d.draw_rectangle(fb.x, fb.y, fb.w, fb.h, fill);
            d.paint_label(
                "show full sphere",
                *fb,
                Align::Center,
                t.label_font,
                t.label_text,
            );
        }
        d.draw_rectangle_lines(h.x, h.y, h.w, outer_h, t.outline);
    }
}

fn radius_event(e: SliderEvent) -> PanelEvent {
    match e {
        SliderEvent::Changed(v) => PanelEvent::RadiusChanged(v),
        SliderEvent::Committed(v) => PanelEvent::RadiusCommitted(v),
    }
}

fn slice_event(e: SliderEvent) -> PanelEvent {
    match e {
        SliderEvent::Changed(v) => PanelEvent::SliceChanged(v),
        SliderEvent::Committed(v) => PanelEvent::SliceCommitted(v),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN_W: i32 = 1280;

    fn center(r: IRect) -> Vector2 {
        Vector2::new((r.x + r.w / 2) as f32, (r.y + r.h / 2) as f32)
    }

    fn press(pos: Vector2) -> PointerInput {
        PointerInput {
            pos,
            pressed: true,
            down: true,
            released: false,
        }
    }

    fn hold(pos: Vector2) -> PointerInput {
        PointerInput {
            pos,
            pressed: false,
            down: true,
            released: false,
        }
    }

    fn release(pos: Vector2) -> PointerInput {
        PointerInput {
            pos,
            pressed: false,
            down: false,
            released: true,
        }
    }

    #[test]
    fn starts_collapsed_and_header_click_opens() {
        let mut p = ControlPanel::new(20, 4, 75);
        assert!(p.is_collapsed());
        assert_eq!(p.slice.max(), 40);
        assert_eq!(p.slice.value(), 40);
        let header = p.layout(SCREEN_W).header;
        assert!(p.handle_pointer(&press(center(header)), SCREEN_W).is_empty());
        assert!(!p.is_collapsed());
        assert_eq!(p.layout(SCREEN_W).header, header);
    }

    #[test]
    fn collapsed_panel_ignores_slider_area() {
        let mut p = ControlPanel::new(20, 4, 75);
        p.toggle();
        let track = p.layout(SCREEN_W).radius_track;
        p.toggle();
        let at = Vector2::new(track.x as f32, center(track).y);
        assert!(p.handle_pointer(&press(at), SCREEN_W).is_empty());
        assert!(!p.captures_pointer(at, SCREEN_W));
    }

    #[test]
    fn radius_drag_previews_then_commits() {
        let mut p = ControlPanel::new(20, 4, 75);
        p.toggle();
        let track = p.layout(SCREEN_W).radius_track;
        let y = center(track).y;
        let left = Vector2::new(track.x as f32, y);
        let right = Vector2::new((track.x + track.w) as f32, y);
        assert_eq!(
            p.handle_pointer(&press(left), SCREEN_W),
            vec![PanelEvent::RadiusChanged(4)]
        );
        assert!(p.captures_pointer(Vector2::new(0.0, 700.0), SCREEN_W));
        assert_eq!(
            p.handle_pointer(&hold(right), SCREEN_W),
            vec![PanelEvent::RadiusChanged(75)]
        );
        assert_eq!(
            p.handle_pointer(&release(right), SCREEN_W),
            vec![PanelEvent::RadiusCommitted(75)]
        );
        assert!(!p.radius.is_dragging());
    }

    #[test]
    fn slice_drag_commits_slice() {
        let mut p = ControlPanel::new(4, 4, 75);
        p.toggle();
        let track = p.layout(SCREEN_W).slice_track;
        let y = center(track).y;
        let left = Vector2::new(track.x as f32, y);
        assert_eq!(
            p.handle_pointer(&press(left), SCREEN_W),
            vec![PanelEvent::SliceChanged(1)]
        );
        assert_eq!(
            p.handle_pointer(&release(left), SCREEN_W),
            vec![PanelEvent::SliceCommitted(1)]
        );
    }

    #[test]
    fn full_button_requests_full_view() {
        let mut p = ControlPanel::new(10, 4, 75);
        p.toggle();
        let fb = p.layout(SCREEN_W).full_button;
        assert_eq!(
            p.handle_pointer(&press(center(fb)), SCREEN_W),
            vec![PanelEvent::ShowFull]
        );
    }

    #[test]
    fn reset_slice_tracks_new_radius() {
        let mut p = ControlPanel::new(30, 4, 75);
        p.slice.set_value(7);
        p.reset_slice(16);
        assert_eq!(p.slice.max(), 16);
        assert_eq!(p.slice.value(), 16);
    }

    #[test]
    fn keyboard_steps_commit() {
        let mut p = ControlPanel::new(4, 4, 75);
        assert_eq!(p.step_radius(-1), None);
        assert_eq!(p.step_radius(1), Some(PanelEvent::RadiusCommitted(5)));
        assert_eq!(p.step_slice(1), None);
        assert_eq!(p.step_slice(-1), Some(PanelEvent::SliceCommitted(7)));
    }
}
