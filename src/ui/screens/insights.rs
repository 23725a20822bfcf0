use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame,
};

use super::panel;
use crate::ui::app::App;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for insight in &app.view.insights {
        let color = theme::severity_color(insight.severity);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {:<8} ", insight.severity.to_string().to_uppercase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
            Span::styled(insight.message.as_str(), theme::normal_style()),
        ]));
        lines.push(Line::from(""));
    }

    lines.push(Line::from(Span::styled(" Data available", theme::section_style())));
    let months: Vec<String> = app.view.months_present.iter().map(|m| m.to_string()).collect();
    lines.push(coverage_line("Months", &months.join(", ")));
    lines.push(coverage_line("Categories", &app.view.categories_present.join(", ")));

    let title = format!("Insights ({})", app.filter_label);
    let body = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(panel(title));
    f.render_widget(body, area);
}

fn coverage_line(label: &str, values: &str) -> Line<'static> {
    let shown = if values.is_empty() { "none" } else { values };
    Line::from(vec![
        Span::styled(format!(" {label:<11}"), theme::dim_style()),
        Span::styled(shown.to_string(), theme::normal_style()),
    ])
}
