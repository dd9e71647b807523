use glowdeck_engine::coords::{Rect, Vec2};
use glowdeck_engine::paint::LinearGradient;
use glowdeck_engine::scene::ImageId;
use glowdeck_engine::text::FontId;
use glowdeck_qrlink::{ColorScheme, FormState, GradientKind, ModuleShape, SubmitPhase};
use glowdeck_ui::widgets::{Button, ColorSwatch, ImageView, Label, RadioGroup, Textbox};
use glowdeck_ui::{Constraints, EventResult, LayoutCtx, Painter, UiEvent, Widget};

use crate::theme::Theme;

/// Panel texture size in pixels; the panel renders at 1:1 scale.
pub const PANEL_WIDTH: u32 = 640;
pub const PANEL_HEIGHT: u32 = 800;

const MARGIN: f32 = 24.0;
const ROW_GAP: f32 = 10.0;
const SECTION_GAP: f32 = 18.0;
const LABEL_SIZE: f32 = 13.0;
const FIELD_HEIGHT: f32 = 36.0;
const RADIO_HEIGHT: f32 = 22.0;
const SWATCH_HEIGHT: f32 = 28.0;
const BUTTON_HEIGHT: f32 = 40.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ColorMode {
    Solid,
    Gradient,
}

const BACK_PALETTE: &[(u32, &str)] = &[
    (0xFFFFFF, "#FFFFFF"),
    (0x06080E, "#06080E"),
    (0xF2F6FA, "#F2F6FA"),
];
const FILL_PALETTE: &[(u32, &str)] = &[
    (0x000000, "#000000"),
    (0x0040FF, "#0040FF"),
    (0x11F4FF, "#11F4FF"),
    (0x101828, "#101828"),
];
const GRAD1_PALETTE: &[(u32, &str)] = &[
    (0x11F4FF, "#11F4FF"),
    (0x0040FF, "#0040FF"),
    (0xFF2E88, "#FF2E88"),
];
const GRAD2_PALETTE: &[(u32, &str)] = &[
    (0x0040FF, "#0040FF"),
    (0x11F4FF, "#11F4FF"),
    (0x101828, "#101828"),
];

/// The QR styling form: one widget tree rendered to the tablet's screen
/// texture. Mirrors the service contract field for field.
pub struct Panel {
    theme: Theme,
    dark: bool,
    font: FontId,

    url: Textbox,
    shape: RadioGroup<ModuleShape>,
    color_mode: RadioGroup<ColorMode>,
    gradient_type: RadioGroup<GradientKind>,
    back_color: ColorSwatch,
    fill_color: ColorSwatch,
    gradient_color1: ColorSwatch,
    gradient_color2: ColorSwatch,
    logo: Textbox,
    generate: Button,
    download: Button,
    theme_toggle: Button,
    status: Label,
    qr: ImageView,
}

struct Rows {
    url: Rect,
    shape: Rect,
    color_mode: Rect,
    back_color: Rect,
    fill_color: Option<Rect>,
    gradient_type: Option<Rect>,
    gradient_color1: Option<Rect>,
    gradient_color2: Option<Rect>,
    gradient_preview: Option<Rect>,
    logo: Rect,
    generate: Rect,
    theme_toggle: Rect,
    status: Rect,
    qr: Rect,
    download: Option<Rect>,
}

impl Panel {
    pub fn new(font: FontId) -> Self {
        let theme = Theme::dark();
        let mut panel = Self {
            theme,
            dark: true,
            font,
            url: Textbox::new(
                "https://example.com",
                font,
                15.0,
                theme.fg,
                theme.field,
                theme.accent,
            ),
            shape: RadioGroup::new(
                vec![
                    (ModuleShape::Square, "square".into()),
                    (ModuleShape::Rounded, "rounded".into()),
                    (ModuleShape::Dots, "dots".into()),
                ],
                font,
                14.0,
                theme.fg,
                theme.accent,
            ),
            color_mode: RadioGroup::new(
                vec![
                    (ColorMode::Solid, "solid".into()),
                    (ColorMode::Gradient, "gradient".into()),
                ],
                font,
                14.0,
                theme.fg,
                theme.accent,
            ),
            gradient_type: RadioGroup::new(
                vec![
                    (GradientKind::Linear, "linear".into()),
                    (GradientKind::Radial, "radial".into()),
                ],
                font,
                14.0,
                theme.fg,
                theme.accent,
            ),
            back_color: ColorSwatch::new(BACK_PALETTE.to_vec(), theme.fg),
            fill_color: ColorSwatch::new(FILL_PALETTE.to_vec(), theme.fg),
            gradient_color1: ColorSwatch::new(GRAD1_PALETTE.to_vec(), theme.fg),
            gradient_color2: ColorSwatch::new(GRAD2_PALETTE.to_vec(), theme.fg),
            logo: Textbox::new(
                "logo path (optional)",
                font,
                15.0,
                theme.fg,
                theme.field,
                theme.accent,
            ),
            generate: Button::new("Generate", font, 15.0, theme.button_fg, theme.button),
            download: Button::new("Download", font, 14.0, theme.button_fg, theme.button),
            theme_toggle: Button::new("Dark", font, 13.0, theme.fg, theme.field),
            status: Label::new("", font, 13.0, theme.muted),
            qr: ImageView::new(220.0),
        };
        panel.apply_theme();
        panel
    }

    /// Snapshot of the form in wire terms. Logo path is taken verbatim;
    /// empty means none.
    pub fn form_state(&self) -> FormState {
        let color = match self.color_mode.selected() {
            ColorMode::Solid => ColorScheme::Solid {
                fill_color: self.fill_color.hex().to_string(),
            },
            ColorMode::Gradient => ColorScheme::Gradient {
                gradient_type: self.gradient_type.selected(),
                gradient_color1: self.gradient_color1.hex().to_string(),
                gradient_color2: self.gradient_color2.hex().to_string(),
            },
        };
        let logo = self.logo.value().trim();
        FormState {
            url: self.url.value().to_string(),
            module_shape: self.shape.selected(),
            back_color: self.back_color.hex().to_string(),
            color,
            logo_path: (!logo.is_empty()).then(|| logo.into()),
        }
    }

    pub fn take_generate(&mut self) -> bool {
        self.generate.take_click()
    }

    pub fn take_download(&mut self) -> bool {
        self.download.take_click()
    }

    pub fn take_theme_toggle(&mut self) -> bool {
        self.theme_toggle.take_click()
    }

    pub fn toggle_theme(&mut self) {
        self.dark = !self.dark;
        self.theme = if self.dark {
            Theme::dark()
        } else {
            Theme::light()
        };
        self.apply_theme();
    }

    /// Reflects the submission phase in the status line and the button.
    pub fn set_phase(&mut self, phase: &SubmitPhase) {
        let (text, busy) = match phase {
            SubmitPhase::Idle => (String::new(), false),
            SubmitPhase::EncodingLogo => ("Encoding logo...".to_string(), true),
            SubmitPhase::Sending => ("Generating...".to_string(), true),
            SubmitPhase::Success { .. } => (String::new(), false),
            SubmitPhase::Failure { message } => (message.clone(), false),
        };
        self.status.set_text(text);
        self.status.set_color(if matches!(phase, SubmitPhase::Failure { .. }) {
            self.theme.accent
        } else {
            self.theme.muted
        });
        self.generate.set_enabled(!busy);
    }

    pub fn set_qr(&mut self, id: ImageId, width: u32, height: u32) {
        self.qr.set_image(id, width, height);
    }

    pub fn qr_image(&self) -> Option<ImageId> {
        self.qr.image()
    }

    fn apply_theme(&mut self) {
        let t = self.theme;
        for tb in [&mut self.url, &mut self.logo] {
            tb.fg = t.fg;
            tb.bg = t.field;
            tb.accent = t.accent;
        }
        self.shape.fg = t.fg;
        self.shape.accent = t.accent;
        self.color_mode.fg = t.fg;
        self.color_mode.accent = t.accent;
        self.gradient_type.fg = t.fg;
        self.gradient_type.accent = t.accent;
        self.back_color.fg = t.fg;
        self.fill_color.fg = t.fg;
        self.gradient_color1.fg = t.fg;
        self.gradient_color2.fg = t.fg;
        self.generate.fg = t.button_fg;
        self.generate.bg = t.button;
        self.generate.bg_hover = t.button.with_alpha(0.8);
        self.download.fg = t.button_fg;
        self.download.bg = t.button;
        self.download.bg_hover = t.button.with_alpha(0.8);
        self.theme_toggle.fg = t.fg;
        self.theme_toggle.bg = t.field;
        self.theme_toggle.bg_hover = t.field.with_alpha(0.8);
        self.theme_toggle
            .set_label(if self.dark { "Dark" } else { "Light" });
        self.status.set_color(t.muted);
    }

    fn rows(&self, bounds: Rect) -> Rows {
        let x = bounds.origin.x + MARGIN;
        let w = bounds.width() - MARGIN * 2.0;
        let mut y = bounds.origin.y + MARGIN;

        // Title row also hosts the theme toggle at the right edge.
        let theme_toggle = Rect::from_xywh(x + w - 70.0, y, 70.0, 28.0);
        y += 34.0 + SECTION_GAP;

        let mut labeled = |height: f32, y: &mut f32| {
            *y += LABEL_SIZE + 6.0;
            let rect = Rect::from_xywh(x, *y, w, height);
            *y += height + ROW_GAP;
            rect
        };

        let url = labeled(FIELD_HEIGHT, &mut y);
        let shape = labeled(RADIO_HEIGHT, &mut y);
        let color_mode = labeled(RADIO_HEIGHT, &mut y);
        let back_color = labeled(SWATCH_HEIGHT, &mut y);

        let gradient = self.color_mode.selected() == ColorMode::Gradient;
        let (fill_color, gradient_type, gradient_color1, gradient_color2, gradient_preview) =
            if gradient {
                let gt = labeled(RADIO_HEIGHT, &mut y);
                // Two swatches plus the preview strip share one row.
                y += LABEL_SIZE + 6.0;
                let g1 = Rect::from_xywh(x, y, 48.0, SWATCH_HEIGHT);
                let g2 = Rect::from_xywh(x + 60.0, y, 48.0, SWATCH_HEIGHT);
                let preview = Rect::from_xywh(x + 120.0, y, w - 120.0, SWATCH_HEIGHT);
                y += SWATCH_HEIGHT + ROW_GAP;
                (None, Some(gt), Some(g1), Some(g2), Some(preview))
            } else {
                let fc = labeled(SWATCH_HEIGHT, &mut y);
                (Some(fc), None, None, None, None)
            };

        let logo = labeled(FIELD_HEIGHT, &mut y);
        y += SECTION_GAP - ROW_GAP;

        let generate = Rect::from_xywh(x, y, w, BUTTON_HEIGHT);
        y += BUTTON_HEIGHT + ROW_GAP;
        let status = Rect::from_xywh(x, y, w, 18.0);
        y += 18.0 + ROW_GAP;

        let qr_bottom = bounds.max().y - MARGIN - BUTTON_HEIGHT - ROW_GAP;
        let qr = Rect::from_xywh(x, y, w, (qr_bottom - y).max(0.0));
        let download = self.qr.image().map(|_| {
            Rect::from_xywh(
                x + (w - 140.0) * 0.5,
                qr_bottom + ROW_GAP,
                140.0,
                BUTTON_HEIGHT,
            )
        });

        Rows {
            url,
            shape,
            color_mode,
            back_color,
            fill_color,
            gradient_type,
            gradient_color1,
            gradient_color2,
            gradient_preview,
            logo,
            generate,
            theme_toggle,
            status,
            qr,
            download,
        }
    }

    fn section_label(&self, painter: &mut Painter<'_>, rect: Rect, text: &str) {
        painter.text(
            Vec2::new(rect.origin.x, rect.origin.y - LABEL_SIZE - 4.0),
            text,
            self.font,
            LABEL_SIZE,
            self.theme.muted,
        );
    }
}

impl Widget for Panel {
    fn measure(&mut self, constraints: Constraints, _ctx: &LayoutCtx<'_>) -> Vec2 {
        constraints.max
    }

    fn paint(&mut self, painter: &mut Painter<'_>, bounds: Rect) {
        painter.fill_rect(bounds, self.theme.panel, 18.0);

        painter.text(
            Vec2::new(bounds.origin.x + MARGIN, bounds.origin.y + MARGIN),
            "QR Studio",
            self.font,
            22.0,
            self.theme.fg,
        );

        let rows = self.rows(bounds);
        self.theme_toggle.paint(painter, rows.theme_toggle);

        self.section_label(painter, rows.url, "URL");
        self.url.paint(painter, rows.url);

        self.section_label(painter, rows.shape, "Module shape");
        self.shape.paint(painter, rows.shape);

        self.section_label(painter, rows.color_mode, "Color mode");
        self.color_mode.paint(painter, rows.color_mode);

        self.section_label(painter, rows.back_color, "Background");
        self.back_color.paint(painter, rows.back_color);

        if let Some(rect) = rows.fill_color {
            self.section_label(painter, rect, "Fill color");
            self.fill_color.paint(painter, rect);
        }
        if let Some(rect) = rows.gradient_type {
            self.section_label(painter, rect, "Gradient type");
            self.gradient_type.paint(painter, rect);
        }
        if let Some(rect) = rows.gradient_color1 {
            self.section_label(painter, rect, "Gradient colors");
            self.gradient_color1.paint(painter, rect);
        }
        if let Some(rect) = rows.gradient_color2 {
            self.gradient_color2.paint(painter, rect);
        }
        if let Some(rect) = rows.gradient_preview {
            let fill = LinearGradient::horizontal(
                self.gradient_color1.color(),
                self.gradient_color2.color(),
            );
            painter.fill(rect, fill, 6.0);
        }

        self.section_label(painter, rows.logo, "Logo");
        self.logo.paint(painter, rows.logo);

        self.generate.paint(painter, rows.generate);
        self.status.paint(painter, rows.status);
        self.qr.paint(painter, rows.qr);
        if let Some(rect) = rows.download {
            self.download.paint(painter, rect);
        }
    }

    fn on_event(&mut self, event: &UiEvent, bounds: Rect, ctx: &LayoutCtx<'_>) -> EventResult {
        let rows = self.rows(bounds);

        if self.theme_toggle.on_event(event, rows.theme_toggle, ctx).consumed() {
            return EventResult::Consumed;
        }
        if self.url.on_event(event, rows.url, ctx).consumed() {
            return EventResult::Consumed;
        }
        if self.shape.on_event(event, rows.shape, ctx).consumed() {
            return EventResult::Consumed;
        }
        if self.color_mode.on_event(event, rows.color_mode, ctx).consumed() {
            return EventResult::Consumed;
        }
        if self.back_color.on_event(event, rows.back_color, ctx).consumed() {
            return EventResult::Consumed;
        }
        if let Some(rect) = rows.fill_color
            && self.fill_color.on_event(event, rect, ctx).consumed()
        {
            return EventResult::Consumed;
        }
        if let Some(rect) = rows.gradient_type
            && self.gradient_type.on_event(event, rect, ctx).consumed()
        {
            return EventResult::Consumed;
        }
        if let Some(rect) = rows.gradient_color1
            && self.gradient_color1.on_event(event, rect, ctx).consumed()
        {
            return EventResult::Consumed;
        }
        if let Some(rect) = rows.gradient_color2
            && self.gradient_color2.on_event(event, rect, ctx).consumed()
        {
            return EventResult::Consumed;
        }
        if self.logo.on_event(event, rows.logo, ctx).consumed() {
            return EventResult::Consumed;
        }
        if self.generate.on_event(event, rows.generate, ctx).consumed() {
            return EventResult::Consumed;
        }
        if let Some(rect) = rows.download
            && self.download.on_event(event, rect, ctx).consumed()
        {
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_state_matches_color_mode() {
        let panel = Panel::new(FontId::invalid());
        let form = panel.form_state();
        assert!(matches!(form.color, ColorScheme::Solid { .. }));
        assert_eq!(form.module_shape, ModuleShape::Square);
        assert_eq!(form.back_color, "#FFFFFF");
        assert!(form.logo_path.is_none());
    }

    #[test]
    fn gradient_rows_replace_fill_row() {
        let mut panel = Panel::new(FontId::invalid());
        let bounds = Rect::from_xywh(0.0, 0.0, PANEL_WIDTH as f32, PANEL_HEIGHT as f32);

        let rows = panel.rows(bounds);
        assert!(rows.fill_color.is_some());
        assert!(rows.gradient_type.is_none());

        panel.color_mode.select(ColorMode::Gradient);
        let rows = panel.rows(bounds);
        assert!(rows.fill_color.is_none());
        assert!(rows.gradient_type.is_some());
        assert!(rows.gradient_preview.is_some());
        assert!(matches!(
            panel.form_state().color,
            ColorScheme::Gradient { .. }
        ));
    }

    #[test]
    fn download_row_appears_with_an_image() {
        let mut panel = Panel::new(FontId::invalid());
        let bounds = Rect::from_xywh(0.0, 0.0, PANEL_WIDTH as f32, PANEL_HEIGHT as f32);
        assert!(panel.rows(bounds).download.is_none());

        panel.set_qr(ImageId(7), 400, 400);
        assert!(panel.rows(bounds).download.is_some());
    }
}
