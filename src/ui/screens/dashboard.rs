use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Gauge, Paragraph, Sparkline},
    Frame,
};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::panel;
use crate::analytics::goals;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5), // Summary cards
            Constraint::Min(8),    // Category chart + health
            Constraint::Length(3), // Balance sparkline
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[1]);
    render_spending_chart(f, middle[0], app);
    render_health_and_goals(f, middle[1], app);

    render_balance_sparkline(f, chunks[2], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
            Constraint::Percentage(25),
        ])
        .split(area);

    let view = &app.view;
    render_card(f, cards[0], "Income", format_amount(view.income), theme::GREEN);
    render_card(f, cards[1], "Expenses", format_amount(view.expenses), theme::RED);
    render_card(
        f,
        cards[2],
        "Net Savings",
        format_amount(view.net),
        theme::amount_color(view.net >= Decimal::ZERO),
    );

    let (avg_text, avg_color) = match view.average_monthly_net {
        Some(avg) => (format_amount(avg), theme::amount_color(avg >= Decimal::ZERO)),
        None => ("n/a".to_string(), theme::TEXT_DIM),
    };
    render_card(f, cards[3], "Avg / Month", avg_text, avg_color);
}

fn render_card(f: &mut Frame, area: Rect, title: &str, display: String, color: ratatui::style::Color) {
    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            display,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
    ])
    .centered()
    .block(panel(title));

    f.render_widget(text, area);
}

fn render_spending_chart(f: &mut Frame, area: Rect, app: &App) {
    if app.view.by_category.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled("No expenses to chart", theme::dim_style())),
            Line::from(Span::styled(
                "Import a CSV with :import or try :sample",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(panel("Spending by Category"));
        f.render_widget(msg, area);
        return;
    }

    let bars: Vec<Bar> = app
        .view
        .by_category
        .iter()
        .map(|(name, amt)| {
            Bar::default()
                .value(amt.to_u64().unwrap_or(0))
                .text_value(format_amount(*amt))
                .label(Line::from(truncate(name, 9)))
                .style(Style::default().fg(theme::ACCENT))
        })
        .collect();

    let chart = BarChart::default()
        .block(panel("Spending by Category"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(9)
        .bar_gap(1)
        .value_style(
            Style::default()
                .fg(theme::HEADER_BG)
                .bg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        );

    f.render_widget(chart, area);
}

fn render_health_and_goals(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Health gauge
            Constraint::Min(3),    // Sub-scores
            Constraint::Length(3), // Monthly goal
            Constraint::Length(3), // Annual goal
        ])
        .split(area);

    let health = &app.view.health;
    let gauge = Gauge::default()
        .block(panel("Financial Health"))
        .gauge_style(Style::default().fg(theme::score_color(health.score)).bg(theme::SURFACE))
        .ratio((health.score / 100.0).clamp(0.0, 1.0))
        .label(format!("{:.0}/100 {}", health.score, health.rating()));
    f.render_widget(gauge, rows[0]);

    let details = Paragraph::new(vec![
        sub_score_line("Savings rate", health.savings_rate),
        sub_score_line("Diversity", health.diversity),
        sub_score_line("Consistency", health.consistency),
    ])
    .block(panel("Score Breakdown"));
    f.render_widget(details, rows[1]);

    render_goal(f, rows[2], "Monthly Goal", app.view.goals.monthly_percent);
    render_goal(f, rows[3], "Annual Goal", app.view.goals.annual_percent);
}

fn sub_score_line(label: &str, ratio: f64) -> Line<'static> {
    let percent = ratio * 100.0;
    Line::from(vec![
        Span::styled(format!(" {label:<13}"), theme::normal_style()),
        Span::styled(
            format!("{percent:>5.1}%"),
            Style::default().fg(theme::score_color(percent)),
        ),
    ])
}

fn render_goal(f: &mut Frame, area: Rect, title: &str, percent: f64) {
    let gauge = Gauge::default()
        .block(panel(title))
        .gauge_style(Style::default().fg(theme::amount_color(percent >= 0.0)).bg(theme::SURFACE))
        .ratio(goals::display_fraction(percent))
        // Label keeps the true value, which may exceed 100 or go negative
        .label(format!("{percent:.1}%"));
    f.render_widget(gauge, area);
}

fn render_balance_sparkline(f: &mut Frame, area: Rect, app: &App) {
    let balances: Vec<i64> = app
        .view
        .balance
        .iter()
        .map(|(_, b)| b.to_i64().unwrap_or(0))
        .collect();
    // Sparkline needs non-negative values, so shift by the lowest point
    let floor = balances.iter().copied().min().unwrap_or(0).min(0);
    let data: Vec<u64> = balances
        .iter()
        .map(|b| b.saturating_sub(floor).unsigned_abs())
        .collect();

    let title = match app.view.balance.last() {
        Some((date, b)) => format!("Running Balance ({} on {date})", format_amount(*b)),
        None => "Running Balance".to_string(),
    };

    let sparkline = Sparkline::default()
        .block(panel(title))
        .data(&data)
        .style(Style::default().fg(theme::YELLOW));

    f.render_widget(sparkline, area);
}
