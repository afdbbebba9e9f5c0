use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::color::Color as AppColor;
use crate::theme::ThemeRecord;

fn to_color(c: AppColor) -> Color {
    Color::Rgb(c.r, c.g, c.b)
}

/// Choose black or white foreground for readable text on the given background.
fn contrast_fg(c: AppColor) -> Color {
    if c.relative_luminance() > 0.4 {
        Color::Black
    } else {
        Color::White
    }
}

/// One labeled swatch: the label centered on the colored background.
fn swatch(label: &str, c: AppColor, width: usize) -> Span<'static> {
    let text = format!("{label:^width$}");
    Span::styled(text, Style::default().bg(to_color(c)).fg(contrast_fg(c)))
}

fn swatch_row(items: &[(&str, AppColor)]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (label, color) in items {
        spans.push(swatch(label, *color, 13));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

fn hex_row(items: &[(&str, AppColor)]) -> Line<'static> {
    let mut spans = vec![Span::raw("  ")];
    for (_, color) in items {
        spans.push(Span::styled(
            format!("{:^13}", color.to_hex()),
            Style::default().fg(Color::DarkGray),
        ));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Renders one theme as labeled swatch rows: the base pair with its tonal
/// variants, the accents, and the semantic slots.
pub struct ThemePreview<'a> {
    theme: &'a ThemeRecord,
}

impl<'a> ThemePreview<'a> {
    pub fn new(theme: &'a ThemeRecord) -> Self {
        Self { theme }
    }
}

impl Widget for ThemePreview<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let theme = self.theme;
        let title = format!(" {} — Tab: next mode, q: quit ", theme.name);
        let block = Block::bordered().title(title);
        let inner = block.inner(area);
        block.render(area, buf);

        let base: Vec<(&str, AppColor)> =
            vec![("primary", theme.primary), ("secondary", theme.secondary)];

        let primary_vars: Vec<(&str, AppColor)> = theme
            .primary_variants
            .iter()
            .map(|(v, c)| (v.as_str(), *c))
            .collect();

        let accents: Vec<(&str, AppColor)> = theme
            .accent_colors
            .iter()
            .map(|c| ("accent", *c))
            .collect();

        let s = &theme.semantic;
        let semantic: Vec<(&str, AppColor)> = vec![
            ("background", s.background),
            ("surface", s.surface),
            ("error", s.error),
            ("warning", s.warning),
            ("success", s.success),
            ("info", s.info),
        ];

        let mut lines = vec![
            Line::from("  Base pair"),
            swatch_row(&base),
            hex_row(&base),
            Line::from(""),
            Line::from("  Primary variants"),
            swatch_row(&primary_vars),
            hex_row(&primary_vars),
            Line::from(""),
        ];
        if !accents.is_empty() {
            lines.push(Line::from("  Accents"));
            lines.push(swatch_row(&accents));
            lines.push(hex_row(&accents));
            lines.push(Line::from(""));
        }
        lines.push(Line::from("  Semantic"));
        lines.push(swatch_row(&semantic));
        lines.push(hex_row(&semantic));

        Paragraph::new(lines).render(inner, buf);
    }
}
