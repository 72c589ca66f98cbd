use ratatui::{
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders},
};

use super::roles::{Theme, ThemeRoles};
use crate::ui::components::ThemedText;

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(ThemedText::title(t).style(theme.text_secondary_style()).span(theme));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Style for the tinted container that hosts contrast ("dark") copy.
pub fn contrast_panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles {
        surface_muted,
        text_contrast,
        ..
    } = *theme.roles();
    Style::default().bg(surface_muted).fg(text_contrast)
}

/// Style for the modal container.
pub fn modal_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.modal_background_style().fg(theme.roles().text)
}

/// Style for a selected list row.
pub fn list_selected_style<T: Theme + ?Sized>(theme: &T) -> Style {
    theme.selection_style().add_modifier(Modifier::BOLD)
}

/// Build key/description hint spans: keys in accent, descriptions muted.
pub fn build_hint_spans<'a, T: Theme + ?Sized>(theme: &T, hints: &[(&'a str, &'a str)]) -> Vec<Span<'a>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(ThemedText::body(*key).style(theme.accent_emphasis_style()).span(theme));
        spans.push(ThemedText::body(*description).style(theme.text_muted_style()).span(theme));
    }
    spans
}
