use gdk4 as gdk;
use gtk::prelude::*;
use gtk4 as gtk;
use palette::Srgba;

pub struct ThemeColors {
    pub label: Srgba<f64>,
    pub sector_border: Srgba<f64>,
    pub pointer: Srgba<f64>,
    pub hub: Srgba<f64>,
    pub draft_tint: Srgba<f64>,
}

impl ThemeColors {
    pub fn from_context(context: &gtk::StyleContext) -> Self {
        Self {
            label: Srgba::new(1.0, 1.0, 1.0, 1.0),
            sector_border: Srgba::new(1.0, 1.0, 1.0, 1.0),
            pointer: Self::lookup_color(
                context,
                "theme_fg_color",
                Srgba::new(0.15, 0.15, 0.15, 1.0),
                Some(1.0),
            ),
            hub: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.95, 0.95, 0.95, 1.0),
                Some(1.0),
            ),
            draft_tint: Self::lookup_color(
                context,
                "theme_bg_color",
                Srgba::new(0.9, 0.9, 0.9, 0.45),
                Some(0.45),
            ),
        }
    }

    fn lookup_color(
        context: &gtk::StyleContext,
        name: &str,
        fallback: Srgba<f64>,
        alpha_override: Option<f64>,
    ) -> Srgba<f64> {
        context
            .lookup_color(name)
            .map(|c| {
                let (r, g, b, a) = (
                    c.red() as f64,
                    c.green() as f64,
                    c.blue() as f64,
                    c.alpha() as f64,
                );
                Srgba::new(r, g, b, alpha_override.unwrap_or(a))
            })
            .unwrap_or(fallback)
    }
}

pub fn load_css() {
    let provider = gtk::CssProvider::new();
    let css_data = "
.lunchwheel-alert {
    padding: 6px 12px;
    border-radius: 6px;
}
.lunchwheel-alert.error {
    background-color: alpha(@error_color, 0.2);
}
.lunchwheel-alert.warning {
    background-color: alpha(@warning_color, 0.2);
}
.restaurant-row {
    padding: 6px;
}
.restaurant-row.highlighted {
    background-color: alpha(@theme_selected_bg_color, 0.25);
    border-radius: 4px;
}
.result-backdrop {
    background-color: rgba(0, 0, 0, 0.45);
}
.result-card {
    background-color: @theme_bg_color;
    border-radius: 12px;
    padding: 24px;
}
";
    provider.load_from_data(css_data);

    if let Some(display) = gdk::Display::default() {
        gtk::style_context_add_provider_for_display(
            &display,
            &provider,
            gtk::STYLE_PROVIDER_PRIORITY_APPLICATION,
        );
    }
}
