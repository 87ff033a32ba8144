use super::model::WheelState;
use super::{
    HUB_RADIUS, LABEL_FONT_SIZE, LABEL_MAX_CHARS, POINTER_DEPTH, POINTER_WIDTH, RIM_INSET,
    SECTOR_BORDER_WIDTH,
};
use crate::gui::theme::ThemeColors;
use cairo::Context;
use palette::{Srgba, WithAlpha};
use placepick::wheel::Sector;
use std::f64::consts::PI;

fn set_source(cr: &Context, color: Srgba<f64>) {
    let (r, g, b, a) = color.into_components();
    cr.set_source_rgba(r, g, b, a);
}

/// Wheel angles start at 12 o'clock; cairo's start at 3 o'clock.
fn to_cairo_angle(degrees: f64) -> f64 {
    degrees.to_radians() - PI / 2.0
}

fn ellipsize(label: &str) -> String {
    if label.chars().count() <= LABEL_MAX_CHARS {
        return label.to_string();
    }
    let mut short: String = label.chars().take(LABEL_MAX_CHARS - 1).collect();
    short.push('…');
    short
}

struct SectorRenderer<'a> {
    sector: &'a Sector,
    radius: f64,
}

impl<'a> SectorRenderer<'a> {
    fn new(sector: &'a Sector, radius: f64) -> Self {
        Self { sector, radius }
    }

    fn draw(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        self.draw_wedge(cr, colors)?;
        self.draw_label(cr, colors)
    }

    fn draw_wedge(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let fill = self.sector.color.into_format::<f64>().with_alpha(1.0);
        set_source(cr, fill);
        cr.move_to(0.0, 0.0);
        if self.sector.sweep >= 360.0 {
            cr.arc(0.0, 0.0, self.radius, 0.0, 2.0 * PI);
        } else {
            cr.arc(
                0.0,
                0.0,
                self.radius,
                to_cairo_angle(self.sector.start),
                to_cairo_angle(self.sector.end()),
            );
        }
        cr.close_path();
        cr.fill_preserve()?;

        set_source(cr, colors.sector_border);
        cr.set_line_width(SECTOR_BORDER_WIDTH);
        cr.stroke()
    }

    fn draw_label(&self, cr: &Context, colors: &ThemeColors) -> Result<(), cairo::Error> {
        let text = ellipsize(&self.sector.label);
        let (x, y) = self.sector.label_anchor(self.radius);

        cr.save()?;
        cr.translate(x, y);
        cr.rotate(self.sector.label_rotation().to_radians());
        set_source(cr, colors.label);
        cr.select_font_face("Sans", cairo::FontSlant::Normal, cairo::FontWeight::Bold);
        cr.set_font_size(LABEL_FONT_SIZE * (self.radius / 190.0).clamp(0.6, 1.5));
        if let Ok(ext) = cr.text_extents(&text) {
            cr.move_to(
                -ext.width() / 2.0 - ext.x_bearing(),
                -ext.height() / 2.0 - ext.y_bearing(),
            );
            cr.show_text(&text)?;
        }
        cr.restore()
    }
}

pub fn draw(
    cr: &Context,
    state: &WheelState,
    colors: &ThemeColors,
    width: f64,
    height: f64,
) -> Result<(), cairo::Error> {
    let radius = (width.min(height) / 2.0 - RIM_INSET).max(0.0);
    if radius <= 0.0 || state.layout.is_empty() {
        return Ok(());
    }
    let (cx, cy) = (width / 2.0, height / 2.0);

    cr.save()?;
    cr.translate(cx, cy);
    cr.rotate(state.rotation.to_radians());
    for sector in &state.layout.sectors {
        SectorRenderer::new(sector, radius).draw(cr, colors)?;
    }
    if state.layout.draft {
        set_source(cr, colors.draft_tint);
        cr.arc(0.0, 0.0, radius, 0.0, 2.0 * PI);
        cr.fill()?;
    }
    cr.restore()?;

    draw_hub(cr, cx, cy, colors)?;
    draw_pointer(cr, cx, cy - radius, colors)
}

fn draw_hub(cr: &Context, cx: f64, cy: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.hub);
    cr.arc(cx, cy, HUB_RADIUS, 0.0, 2.0 * PI);
    cr.fill_preserve()?;
    set_source(cr, colors.pointer);
    cr.set_line_width(SECTOR_BORDER_WIDTH);
    cr.stroke()
}

/// Fixed marker at 12 o'clock, tip pointing into the wheel.
fn draw_pointer(cr: &Context, x: f64, rim_y: f64, colors: &ThemeColors) -> Result<(), cairo::Error> {
    set_source(cr, colors.pointer);
    cr.move_to(x - POINTER_WIDTH / 2.0, rim_y - RIM_INSET);
    cr.line_to(x + POINTER_WIDTH / 2.0, rim_y - RIM_INSET);
    cr.line_to(x, rim_y - RIM_INSET + POINTER_DEPTH);
    cr.close_path();
    cr.fill()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ellipsize() {
        assert_eq!(ellipsize("Taco Town"), "Taco Town");
        let long = ellipsize("The Extremely Long Restaurant Name");
        assert_eq!(long.chars().count(), LABEL_MAX_CHARS);
        assert!(long.ends_with('…'));
    }

    #[test]
    fn test_cairo_angle_starts_at_top() {
        assert!((to_cairo_angle(0.0) + PI / 2.0).abs() < 1e-12);
        assert!(to_cairo_angle(90.0).abs() < 1e-12);
    }
}
