use std::sync::OnceLock;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Section, SUBMIT_ROW};
use crate::audit::{FormField, Step, PROGRESS_DONE};
use crate::config::AppConfig;
use crate::theme::Theme;

static THEME: OnceLock<Theme> = OnceLock::new();

/// Install the theme once, after the config is loaded.
pub fn init_theme(config: &AppConfig) {
    let _ = THEME.set(Theme::load(config));
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn inactive() -> Color { theme().inactive }
fn success() -> Color { theme().success }
fn warning() -> Color { theme().warning }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg_selected() -> Color { theme().bg_selected }
fn header() -> Color { theme().header }

/// Analysis phase checklist: (progress threshold, label). A phase lights up
/// once progress passes its threshold.
const PHASES: &[(u8, &str)] = &[
    (20, "Scraping page content"),
    (40, "Analyzing conversion elements"),
    (60, "Processing competitor data"),
    (80, "Generating recommendations"),
];

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Info line
            Constraint::Min(10),   // Auditor + tasks
            Constraint::Length(1), // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);

    // Narrow terminals drop the task pane rather than squeezing the form
    if area.width < 70 {
        draw_auditor_pane(f, app, chunks[1]);
    } else {
        let panes = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(64), Constraint::Percentage(36)])
            .split(chunks[1]);
        draw_auditor_pane(f, app, panes[0]);
        draw_tasks_pane(f, app, panes[1]);
    }

    draw_footer(f, app, chunks[2]);
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let line = if let Some(ref status) = app.status_message {
        Line::from(Span::styled(status, Style::default().fg(warning())))
    } else {
        let hint = match app.auditor.step() {
            Step::Landing => "Ready",
            Step::Form { .. } => "Fill in the form, Enter on [ Start Analysis ] to run",
            Step::Analysis { .. } => "Analyzing your landing page...",
            Step::Results { .. } => "Analysis complete",
        };
        Line::from(Span::styled(hint, Style::default().fg(text_dim())))
    };

    let info = Paragraph::new(line).alignment(Alignment::Center);
    f.render_widget(info, area);
}

fn draw_auditor_pane(f: &mut Frame, app: &App, area: Rect) {
    match app.auditor.step() {
        Step::Landing => draw_landing(f, app, area),
        Step::Form { form } => draw_form(f, app, form, area),
        Step::Analysis { progress, .. } => draw_analysis(f, app, *progress, area),
        Step::Results { form, report } => draw_results(f, app, form, report, area),
    }
}

fn pane_block(title: &str, active: bool) -> Block<'_> {
    let border_color = if active { accent() } else { inactive() };
    let title_style = if active {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(inactive())
    };
    Block::default()
        .title(Span::styled(title, title_style))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color))
}

fn draw_landing(f: &mut Frame, app: &App, area: Rect) {
    let active = app.section == Section::Auditor;
    let block = pane_block(" Landing Page Auditor ", active);

    let lines = vec![
        Line::default(),
        Line::from(Span::styled(
            "Landing Page Auditor",
            Style::default().fg(header()).add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            "Analyze your landing pages and get actionable recommendations",
            Style::default().fg(text()),
        )),
        Line::from(Span::styled(
            "and competitive analysis in under 60 seconds.",
            Style::default().fg(text()),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("▲ ", Style::default().fg(success())),
            Span::styled("Conversion Optimization", Style::default().fg(text())),
            Span::styled("  headlines, CTAs, forms, social proof", Style::default().fg(text_dim())),
        ]),
        Line::from(vec![
            Span::styled("◆ ", Style::default().fg(warning())),
            Span::styled("Competitive Analysis", Style::default().fg(text())),
            Span::styled("  compare against up to 3 competitors", Style::default().fg(text_dim())),
        ]),
        Line::from(vec![
            Span::styled("● ", Style::default().fg(accent())),
            Span::styled("Detailed Insights", Style::default().fg(text())),
            Span::styled("  scored across four categories", Style::default().fg(text_dim())),
        ]),
        Line::default(),
        Line::from(vec![
            Span::styled("Press ", Style::default().fg(text_dim())),
            Span::styled("Enter", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
            Span::styled(" to start your free analysis", Style::default().fg(text_dim())),
        ]),
    ];

    let content = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(block);
    f.render_widget(content, area);
}

fn draw_form(f: &mut Frame, app: &App, form: &crate::audit::AuditForm, area: Rect) {
    let active = app.section == Section::Auditor;
    let block = pane_block(" Audit Form ", active);

    let mut lines = Vec::new();
    for (i, field) in FormField::ALL.iter().enumerate() {
        let focused = active && app.form_focus == i;
        let value = form.get(*field);

        let marker = if field.required() { "*" } else { " " };
        let label_style = if focused {
            Style::default().fg(accent()).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(header())
        };

        let value_span = if field.choices().is_some() {
            let shown = if value.is_empty() { field.placeholder() } else { value };
            let style = if value.is_empty() {
                Style::default().fg(text_dim())
            } else {
                Style::default().fg(text())
            };
            Span::styled(format!("◂ {} ▸", shown), style)
        } else if value.is_empty() && !focused {
            Span::styled(field.placeholder(), Style::default().fg(text_dim()))
        } else if focused {
            Span::styled(format!("{}_", value), Style::default().fg(text()))
        } else {
            Span::styled(value, Style::default().fg(text()))
        };

        let row_style = if focused {
            Style::default().bg(bg_selected())
        } else {
            Style::default()
        };

        lines.push(
            Line::from(vec![
                Span::styled(format!(" {:<24}{} ", field.label(), marker), label_style),
                value_span,
            ])
            .style(row_style),
        );
        lines.push(Line::default());
    }

    // Submit row
    let submit_focused = active && app.form_focus == SUBMIT_ROW;
    let submit_style = if submit_focused {
        Style::default()
            .fg(success())
            .bg(bg_selected())
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(success())
    };
    lines.push(Line::from(Span::styled(" [ Start Analysis ] ", submit_style)));

    let content = Paragraph::new(lines).block(block);
    f.render_widget(content, area);
}

fn draw_analysis(f: &mut Frame, app: &App, progress: u8, area: Rect) {
    let active = app.section == Section::Auditor;
    let block = pane_block(" Analyzing Your Landing Page ", active);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(3),            // Gauge
            Constraint::Length(1),            // Spacer
            Constraint::Length(PHASES.len() as u16),
            Constraint::Min(0),
        ])
        .split(inner);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(inactive())))
        .gauge_style(Style::default().fg(accent()))
        .percent(progress.min(PROGRESS_DONE) as u16)
        .label(format!("{}%", progress));
    f.render_widget(gauge, chunks[0]);

    let phase_lines: Vec<Line> = PHASES
        .iter()
        .map(|(threshold, label)| {
            let passed = progress > *threshold;
            let (mark, color) = if passed { ("✓", success()) } else { ("·", text_dim()) };
            Line::from(vec![
                Span::styled(format!(" {} ", mark), Style::default().fg(color)),
                Span::styled(*label, Style::default().fg(if passed { text() } else { text_dim() })),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(phase_lines), chunks[2]);
}

fn draw_results(
    f: &mut Frame,
    app: &App,
    form: &crate::audit::AuditForm,
    report: &crate::audit::AuditReport,
    area: Rect,
) {
    let active = app.section == Section::Auditor;
    let block = pane_block(" Audit Results ", active);

    let mut lines = Vec::new();

    let subject = if form.company_name.is_empty() {
        "Analysis Complete".to_string()
    } else {
        format!("{} - Analysis Complete", form.company_name)
    };
    lines.push(Line::from(Span::styled(
        format!(" {}", subject),
        Style::default().fg(text_dim()),
    )));
    lines.push(Line::default());

    lines.push(Line::from(vec![
        Span::styled(" Overall Score  ", Style::default().fg(header())),
        Span::styled(
            format!("{}", report.overall_score),
            Style::default()
                .fg(theme().score_color(report.overall_score))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", report.grade),
            Style::default().fg(text()).add_modifier(Modifier::BOLD),
        ),
    ]));
    lines.push(Line::default());

    for (label, score) in report.scores.entries() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<18}", label), Style::default().fg(text())),
            Span::styled(
                format!("{:>3}/100", score),
                Style::default().fg(theme().score_color(score)),
            ),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        " Top 5 Priority Recommendations",
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    )));
    for (i, recommendation) in report.top_recommendations.iter().enumerate() {
        lines.push(Line::from(vec![
            Span::styled(format!(" {}. ", i + 1), Style::default().fg(warning())),
            Span::styled(recommendation.as_str(), Style::default().fg(text())),
        ]));
    }
    lines.push(Line::default());

    lines.push(Line::from(Span::styled(
        " Competitive Comparison",
        Style::default().fg(header()).add_modifier(Modifier::BOLD),
    )));
    for competitor in &report.competitor_comparison {
        let bar_width = (competitor.score / 4) as usize;
        let is_you = competitor.name == "Your Page";
        let bar_color = if is_you { accent() } else { text_dim() };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:<14}", competitor.name), Style::default().fg(text())),
            Span::styled("█".repeat(bar_width), Style::default().fg(bar_color)),
            Span::styled(format!(" {}", competitor.score), Style::default().fg(bar_color)),
        ]));
    }

    let content = Paragraph::new(lines)
        .wrap(Wrap { trim: false })
        .block(block);
    f.render_widget(content, area);
}

fn draw_tasks_pane(f: &mut Frame, app: &App, area: Rect) {
    let active = app.section == Section::Tasks;
    let block = pane_block(" Tasks ", active);

    let mut lines = Vec::new();

    // Input line
    let input_style = if active {
        Style::default().fg(text())
    } else {
        Style::default().fg(text_dim())
    };
    let input_display = if app.task_input.is_empty() && !active {
        Span::styled("Add a task", Style::default().fg(text_dim()))
    } else if active {
        Span::styled(format!("{}_", app.task_input), input_style)
    } else {
        Span::styled(app.task_input.as_str(), input_style)
    };
    lines.push(Line::from(vec![
        Span::styled(" > ", Style::default().fg(accent())),
        input_display,
    ]));
    lines.push(Line::default());

    if app.tasks.is_empty() {
        lines.push(Line::from(Span::styled(
            "  No tasks yet",
            Style::default().fg(text_dim()),
        )));
    } else {
        for (i, task) in app.tasks.iter().enumerate() {
            let (mark, mark_color) = if task.done {
                ("☑", success())
            } else {
                ("☐", text_dim())
            };
            let mut text_style = Style::default().fg(if task.done { text_dim() } else { text() });
            if task.done {
                text_style = text_style.add_modifier(Modifier::CROSSED_OUT);
            }
            let row_style = if active && i == app.selected_task {
                Style::default().bg(bg_selected())
            } else {
                Style::default()
            };
            lines.push(
                Line::from(vec![
                    Span::styled(format!(" {} ", mark), Style::default().fg(mark_color)),
                    Span::styled(task.text.as_str(), text_style),
                ])
                .style(row_style),
            );
        }
    }

    let content = Paragraph::new(lines).block(block);
    f.render_widget(content, area);
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let hints: Vec<(&str, &str)> = match app.section {
        Section::Auditor => match app.auditor.step() {
            Step::Landing => vec![
                ("Enter", "Start"),
                ("Tab", "Tasks"),
                ("q", "Quit"),
            ],
            Step::Form { .. } => vec![
                ("↑↓", "Field"),
                ("←→", "Choice"),
                ("Enter", "Next/Submit"),
                ("Tab", "Tasks"),
            ],
            Step::Analysis { .. } => vec![
                ("Esc", "Cancel"),
                ("Tab", "Tasks"),
                ("q", "Quit"),
            ],
            Step::Results { .. } => vec![
                ("a", "Analyze another"),
                ("e", "Export report"),
                ("Tab", "Tasks"),
                ("q", "Quit"),
            ],
        },
        Section::Tasks => vec![
            ("↑↓", "Select"),
            ("Enter", "Add/Toggle"),
            ("Del", "Remove"),
            ("Tab", "Auditor"),
        ],
    };

    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 3 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans)).alignment(Alignment::Center);
    f.render_widget(footer, area);
}
