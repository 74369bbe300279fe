use eframe::egui;

/// The two-valued display theme. Each preset maps to a foreground/background
/// color pair; switching themes swaps the pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemePreset {
    Day,
    Night,
}

impl ThemePreset {
    pub fn label(self) -> &'static str {
        match self {
            ThemePreset::Day => "Day",
            ThemePreset::Night => "Night",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemePalette {
    pub foreground: egui::Color32,
    pub background: egui::Color32,
}

const INK: egui::Color32 = egui::Color32::from_rgb(10, 10, 20);
const PAPER: egui::Color32 = egui::Color32::from_rgb(255, 255, 255);

pub fn palette_for_theme(preset: ThemePreset) -> ThemePalette {
    match preset {
        ThemePreset::Day => ThemePalette {
            foreground: INK,
            background: PAPER,
        },
        ThemePreset::Night => ThemePalette {
            foreground: PAPER,
            background: INK,
        },
    }
}

pub fn visuals_for_theme(preset: ThemePreset) -> egui::Visuals {
    let palette = palette_for_theme(preset);
    let mut visuals = match preset {
        ThemePreset::Day => egui::Visuals::light(),
        ThemePreset::Night => egui::Visuals::dark(),
    };

    visuals.override_text_color = Some(palette.foreground);
    visuals.window_fill = palette.background;
    visuals.panel_fill = palette.background;
    visuals.extreme_bg_color = match preset {
        ThemePreset::Day => egui::Color32::from_rgb(244, 244, 248),
        ThemePreset::Night => egui::Color32::from_rgb(22, 22, 34),
    };
    visuals.faint_bg_color = match preset {
        ThemePreset::Day => egui::Color32::from_rgb(236, 236, 242),
        ThemePreset::Night => egui::Color32::from_rgb(30, 30, 44),
    };

    visuals
}
