use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{List, ListItem, Paragraph},
    Frame,
};

use super::panel;
use crate::analytics::goals::display_fraction;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, progress_bar, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!("Budgets for {}", app.current_month());
    if app.view.budgets.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No budgets set", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(
                "Use :budget <category> <amount> to set a monthly limit",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel(title));
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .view
        .budgets
        .iter()
        .enumerate()
        .map(|(i, line)| {
            let color = theme::budget_color(line.status);
            let style = if i == app.budget_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<16}", truncate(&line.category, 15)), style),
                Span::styled(
                    format!(
                        "{:>13} / {:<13} ",
                        format_amount(line.actual),
                        format_amount(line.budget)
                    ),
                    Style::default().fg(color),
                ),
                Span::styled(
                    progress_bar(display_fraction(line.usage_percent), 20),
                    Style::default().fg(color),
                ),
                Span::styled(
                    format!(" {:>6.1}% ", line.usage_percent),
                    Style::default().fg(color).add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("{} ({} left)", line.status, format_amount(line.remaining)),
                    Style::default().fg(color),
                ),
            ]))
        })
        .collect();

    f.render_widget(List::new(items).block(panel(title)), area);
}
