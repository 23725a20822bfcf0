pub(crate) mod budgets;
pub(crate) mod dashboard;
pub(crate) mod insights;
pub(crate) mod transactions;

use ratatui::{
    text::Span,
    widgets::{Block, Borders},
};

use super::theme;

/// Bordered panel with the dimmed bold title every screen uses.
pub(crate) fn panel(title: impl Into<String>) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(ratatui::style::Style::default().fg(theme::OVERLAY))
        .title(Span::styled(format!(" {} ", title.into()), theme::title_style()))
}
