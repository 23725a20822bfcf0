use ratatui::{
    layout::{Constraint, Rect},
    text::{Line, Span},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let txns = &app.view.transactions;
    if txns.is_empty() {
        let hint = if app.view.total_count > 0 {
            "Nothing matches the current filter. Try :nofilter"
        } else {
            "Import a CSV with :import, add one with :add, or try :sample"
        };
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("No transactions", theme::dim_style())),
            Line::from(""),
            Line::from(Span::styled(hint, theme::dim_style())),
        ];
        f.render_widget(
            Paragraph::new(msg).centered().block(panel("Transactions (0)")),
            area,
        );
        return;
    }

    let header_cells = ["Date", "Description", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = txns
        .iter()
        .enumerate()
        .skip(app.transaction_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let style = if i == app.transaction_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let amount_style = ratatui::style::Style::default()
                .fg(theme::amount_color(txn.amount > Decimal::ZERO));
            let sign = if txn.is_income() { "+" } else { "" };

            Row::new(vec![
                Cell::from(txn.date.to_string()),
                Cell::from(truncate(&txn.description, 40)),
                Cell::from(truncate(&txn.category, 16)),
                Cell::from(format!("{sign}{}", format_amount(txn.amount))).style(amount_style),
            ])
            .style(style)
        })
        .collect();

    let title = format!("Transactions ({} of {})", txns.len(), app.view.total_count);
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Min(20),
            Constraint::Length(17),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(panel(title));

    f.render_widget(table, area);
}
