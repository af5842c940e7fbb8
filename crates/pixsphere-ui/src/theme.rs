use raylib::prelude::{Color, Vector2};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IRect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    #[inline]
    pub fn contains(&self, point: Vector2) -> bool {
        point.x >= self.x as f32
            && point.x <= (self.x + self.w) as f32
            && point.y >= self.y as f32
            && point.y <= (self.y + self.h) as f32
    }

    pub fn inflate(&self, dx: i32, dy: i32) -> IRect {
        IRect::new(self.x - dx, self.y - dy, self.w + 2 * dx, self.h + 2 * dy)
    }
}

pub(crate) fn blend_color(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    let inv = 1.0 - t;
    Color::new(
        ((a.r as f32) * inv + (b.r as f32) * t).round() as u8,
        ((a.g as f32) * inv + (b.g as f32) * t).round() as u8,
        ((a.b as f32) * inv + (b.b as f32) * t).round() as u8,
        ((a.a as f32) * inv + (b.a as f32) * t).round() as u8,
    )
}

#[derive(Clone, Debug)]
pub struct PanelTheme {
    pub width: i32,
    pub screen_padding: i32,
    pub padding_x: i32,
    pub padding_y: i32,
    pub header_height: i32,
    pub row_height: i32,
    pub label_width: i32,
    pub track_height: i32,
    pub knob_width: i32,
    pub title_font: i32,
    pub label_font: i32,
    pub banner_font: i32,
    pub frame_shadow: Color,
    pub header_top: Color,
    pub header_bottom: Color,
    pub header_hover: Color,
    pub body_color: Color,
    pub outline: Color,
    pub title_text: Color,
    pub label_text: Color,
    pub value_text: Color,
    pub track: Color,
    pub track_fill: Color,
    pub knob: Color,
    pub knob_active: Color,
    pub button_normal: Color,
    pub button_hover: Color,
    pub banner_background: Color,
    pub banner_text: Color,
}

impl Default for PanelTheme {
    fn default() -> Self {
        Self {
            width: 300,
            screen_padding: 10,
            padding_x: 12,
            padding_y: 8,
            header_height: 28,
            row_height: 30,
            label_width: 88,
            track_height: 8,
            knob_width: 10,
            title_font: 18,
            label_font: 16,
            banner_font: 28,
            frame_shadow: Color::new(6, 10, 18, 145),
            header_top: Color::new(66, 98, 154, 240),
            header_bottom: Color::new(48, 74, 116, 235),
            header_hover: Color::new(82, 132, 198, 240),
            body_color: Color::new(16, 20, 30, 228),
            outline: Color::new(96, 114, 156, 200),
            title_text: Color::new(238, 244, 255, 255),
            label_text: Color::new(188, 196, 214, 255),
            value_text: Color::new(238, 244, 255, 255),
            track: Color::new(28, 36, 54, 228),
            track_fill: Color::new(68, 108, 176, 240),
            knob: Color::new(220, 230, 245, 255),
            knob_active: Color::new(110, 180, 255, 255),
            button_normal: Color::new(24, 34, 52, 230),
            button_hover: Color::new(44, 68, 104, 240),
            banner_background: Color::new(18, 22, 32, 200),
            banner_text: Color::new(238, 244, 255, 255),
        }
    }
}
