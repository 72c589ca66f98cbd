//! Themed text primitive.
//!
//! Every piece of copy in the UI goes through [`ThemedText`]. The caller
//! hands in the theme and a contrast flag; the primitive picks the copy color
//! and then applies the caller's style on top, so an explicit `fg` in the
//! override always wins and anything else leaves the color alone.

use std::borrow::Cow;

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::ui::theme::Theme;

/// Typographic scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextVariant {
    Headline,
    Title,
    #[default]
    Body,
}

impl TextVariant {
    fn modifier(self) -> Modifier {
        match self {
            TextVariant::Headline => Modifier::BOLD | Modifier::UNDERLINED,
            TextVariant::Title => Modifier::BOLD,
            TextVariant::Body => Modifier::empty(),
        }
    }
}

/// Copy color for the given contrast flag.
///
/// `dark` selects `text_contrast`, used for copy sitting on tinted surfaces.
pub fn resolve_text_color<T: Theme + ?Sized>(theme: &T, dark: bool) -> Color {
    let roles = theme.roles();
    if dark { roles.text_contrast } else { roles.text }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ThemedText<'a> {
    content: Cow<'a, str>,
    variant: TextVariant,
    dark: bool,
    style: Style,
}

impl<'a> ThemedText<'a> {
    pub fn new(content: impl Into<Cow<'a, str>>) -> Self {
        Self {
            content: content.into(),
            variant: TextVariant::default(),
            dark: false,
            style: Style::default(),
        }
    }

    pub fn headline(content: impl Into<Cow<'a, str>>) -> Self {
        Self::new(content).variant(TextVariant::Headline)
    }

    pub fn title(content: impl Into<Cow<'a, str>>) -> Self {
        Self::new(content).variant(TextVariant::Title)
    }

    pub fn body(content: impl Into<Cow<'a, str>>) -> Self {
        Self::new(content)
    }

    pub fn variant(mut self, variant: TextVariant) -> Self {
        self.variant = variant;
        self
    }

    /// Render against the contrast color.
    pub fn dark(mut self, dark: bool) -> Self {
        self.dark = dark;
        self
    }

    /// Caller overrides, applied last.
    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn resolve_style<T: Theme + ?Sized>(&self, theme: &T) -> Style {
        Style::default()
            .fg(resolve_text_color(theme, self.dark))
            .add_modifier(self.variant.modifier())
            .patch(self.style)
    }

    pub fn span<T: Theme + ?Sized>(self, theme: &T) -> Span<'a> {
        let style = self.resolve_style(theme);
        Span::styled(self.content, style)
    }

    pub fn line<T: Theme + ?Sized>(self, theme: &T) -> Line<'a> {
        Line::from(self.span(theme))
    }

    pub fn paragraph<T: Theme + ?Sized>(self, theme: &T) -> Paragraph<'a> {
        Paragraph::new(self.line(theme))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::theme::{DraculaTheme, NordTheme, catalog};

    #[test]
    fn contrast_flag_selects_between_text_and_text_contrast() {
        for definition in catalog::all() {
            let theme = definition.build();
            let roles = theme.roles().clone();

            let plain = ThemedText::body("x").resolve_style(&*theme);
            let contrast = ThemedText::body("x").dark(true).resolve_style(&*theme);
            assert_eq!(plain.fg, Some(roles.text), "{}", definition.id);
            assert_eq!(contrast.fg, Some(roles.text_contrast), "{}", definition.id);
        }
    }

    #[test]
    fn overrides_without_color_keep_resolved_color() {
        let theme = NordTheme::new();
        let override_style = Style::default().add_modifier(Modifier::ITALIC).bg(Color::Black);

        for dark in [false, true] {
            let style = ThemedText::title("Most popular").dark(dark).style(override_style).resolve_style(&theme);
            assert_eq!(style.fg, Some(resolve_text_color(&theme, dark)));
            assert_eq!(style.bg, Some(Color::Black));
            assert!(style.add_modifier.contains(Modifier::ITALIC | Modifier::BOLD));
        }
    }

    #[test]
    fn color_override_wins() {
        let theme = DraculaTheme::new();
        let accent = Color::Rgb(0x89, 0xA7, 0x60);
        let span = ThemedText::body("8.0").dark(true).style(Style::default().fg(accent)).span(&theme);
        assert_eq!(span.style.fg, Some(accent));
        assert_eq!(span.content, "8.0");
    }

    #[test]
    fn defaults_are_body_without_contrast() {
        let text = ThemedText::new("hello");
        assert_eq!(text, ThemedText::body("hello").dark(false).style(Style::default()));
        assert_eq!(text.content(), "hello");
    }

    #[test]
    fn works_through_trait_objects() {
        let theme: Box<dyn Theme> = Box::new(DraculaTheme::new());
        let line = ThemedText::headline("Welcome!").line(&*theme);
        assert_eq!(line.spans[0].style.fg, Some(theme.roles().text));
    }
}
