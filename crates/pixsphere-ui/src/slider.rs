use raylib::prelude::{RaylibDraw, Vector2};

use crate::text::{Align, LabelPainter};
use crate::theme::{IRect, PanelTheme, blend_color};

/// Mouse state sampled once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerInput {
    pub pos: Vector2,
    pub pressed: bool,
    pub down: bool,
    pub released: bool,
}

impl PointerInput {
    pub fn idle(pos: Vector2) -> Self {
        Self {
            pos,
            pressed: false,
            down: false,
            released: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SliderEvent {
    /// Value moved while the knob is held.
    Changed(u32),
    /// Knob released after a change, or a keyboard step.
    Committed(u32),
}

/// Integer slider over `[min, max]` with step 1.
#[derive(Clone, Debug)]
pub struct Slider {
    label: String,
    min: u32,
    max: u32,
    value: u32,
    dragging: bool,
    moved: bool,
}

impl Slider {
    pub fn new(label: impl Into<String>, min: u32, max: u32, value: u32) -> Self {
        let max = max.max(min);
        Self {
            label: label.into(),
            min,
            max,
            value: value.clamp(min, max),
            dragging: false,
            moved: false,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    #[inline]
    pub fn value(&self) -> u32 {
        self.value
    }

    #[inline]
    pub fn min(&self) -> u32 {
        self.min
    }

    #[inline]
    pub fn max(&self) -> u32 {
        self.max
    }

    #[inline]
    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn set_value(&mut self, value: u32) {
        self.value = value.clamp(self.min, self.max);
    }

    /// Moves the upper bound; the value is clamped into the new range.
    pub fn set_max(&mut self, max: u32) {
        self.max = max.max(self.min);
        self.value = self.value.min(self.max);
    }

    fn value_at(&self, track: IRect, x: f32) -> u32 {
        if track.w <= 0 || self.max == self.min {
            return self.min;
        }
        let t = ((x - track.x as f32) / track.w as f32).clamp(0.0, 1.0);
        let span = (self.max - self.min) as f32;
        self.min + (t * span).round() as u32
    }

    pub fn knob_x(&self, track: IRect) -> i32 {
        if self.max == self.min {
            return track.x;
        }
        let t = (self.value - self.min) as f32 / (self.max - self.min) as f32;
        track.x + (t * track.w as f32).round() as i32
    }

    /// Feeds one frame of pointer input. A press on the (slightly inflated)
    /// track grabs the knob; release commits only if the value moved.
    pub fn pointer(&mut self, track: IRect, input: &PointerInput) -> Option<SliderEvent> {
        if !self.dragging {
            if input.pressed && track.inflate(4, 8).contains(input.pos) {
                self.dragging = true;
                self.moved = false;
            } else {
                return None;
            }
        }
        if input.released || (!input.down && !input.pressed) {
            self.dragging = false;
            let moved = std::mem::take(&mut self.moved);
            return moved.then_some(SliderEvent::Committed(self.value));
        }
        let v = self.value_at(track, input.pos.x);
        if v != self.value {
            self.value = v;
            self.moved = true;
            return Some(SliderEvent::Changed(v));
        }
        None
    }

    /// Keyboard step; commits immediately when the value changes.
    pub fn step(&mut self, delta: i32) -> Option<SliderEvent> {
        let next = (self.value as i64 + delta as i64).clamp(self.min as i64, self.max as i64);
        let next = next as u32;
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(SliderEvent::Committed(next))
    }

    pub fn draw<D>(&self, d: &mut D, theme: &PanelTheme, row: IRect, track: IRect, hovered: bool)
    where
        D: RaylibDraw + LabelPainter,
    {
        d.paint_label(
            &self.label,
            row,
            Align::Start(theme.padding_x),
            theme.label_font,
            theme.label_text,
        );

        d.draw_rectangle(track.x, track.y, track.w, track.h, theme.track);
        let kx = self.knob_x(track);
        d.draw_rectangle(track.x, track.y, kx - track.x, track.h, theme.track_fill);
        let knob = if self.dragging {
            theme.knob_active
        } else if hovered {
            blend_color(theme.knob, theme.knob_active, 0.5)
        } else {
            theme.knob
        };
        let kh = track.h + 8;
        d.draw_rectangle(
            kx - theme.knob_width / 2,
            track.y + (track.h - kh) / 2,
            theme.knob_width,
            kh,
            knob,
        );

        d.paint_label(
            &self.value.to_string(),
            row,
            Align::End(theme.padding_x),
            theme.label_font,
            theme.value_text,
        );
    }
}
