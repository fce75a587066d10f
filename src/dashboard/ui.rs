use super::{App, Country, StatusLevel, Tab};
use crate::dataset::SeriesPoint;
use crate::domain::Domain;
use crate::report::{Recommendation, ReportKind, ReportRenderer};
use ratatui::prelude::*;
use ratatui::symbols;
use ratatui::widgets::*;

const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);
const PUBLICATIONS: Color = Color::Rgb(0x00, 0xcc, 0x96);
const PATENTS: Color = Color::Rgb(0xff, 0x4b, 0x4b);

fn titled(title: &str) -> Block<'_> {
    Block::default().borders(Borders::ALL).title(title)
}

pub fn report_hotkey(kind: ReportKind) -> char {
    match kind {
        ReportKind::TopicCard => 'p',
        ReportKind::DeepDive => 'd',
        ReportKind::Metrics => 'm',
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let banner = if app.renderer().is_available() { 0 } else { 3 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(banner),
            Constraint::Min(12),
            Constraint::Length(4),
        ])
        .split(f.size());

    draw_header(f, chunks[0]);
    if banner > 0 {
        let warn = Paragraph::new(ReportRenderer::GUIDANCE)
            .style(Style::default().fg(Color::Yellow))
            .block(titled("Внимание"));
        f.render_widget(warn, chunks[1]);
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(38), Constraint::Min(40)])
        .split(chunks[2]);
    draw_sidebar(f, body[0], app);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(5),
            Constraint::Length(3),
            Constraint::Min(8),
        ])
        .split(body[1]);
    draw_cards(f, main[0], app);

    let tabs = Tabs::new(Tab::ALL.iter().map(|t| t.title()).collect::<Vec<_>>())
        .select(app.tab.index())
        .highlight_style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
        .block(titled("Разделы (Tab / 1-4)"));
    f.render_widget(tabs, main[1]);

    match app.tab {
        Tab::Trends => draw_trends(f, main[2], app),
        Tab::Subtopics => draw_subtopics(f, main[2], app),
        Tab::Data => draw_data(f, main[2], app),
        Tab::Reports => draw_reports(f, main[2], app),
    }

    draw_footer(f, chunks[3], app);
}

fn draw_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "🚀 Tech Trends Monitor",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  |  "),
        Span::styled(
            "Отслеживание перехода науки в технологии",
            Style::default().add_modifier(Modifier::ITALIC),
        ),
    ]))
    .block(titled("Overview"));
    f.render_widget(header, area);
}

fn draw_sidebar(f: &mut Frame, area: Rect, app: &App) {
    let parts = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(9),
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(6),
            Constraint::Min(0),
        ])
        .split(area);

    let profile = app.domain.profile();
    let mut lines: Vec<Line> = Domain::ALL
        .iter()
        .map(|d| {
            if *d == app.domain {
                Line::styled(
                    format!("▶ {}", d.display_label()),
                    Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
                )
            } else {
                Line::raw(format!("  {}", d.display_label()))
            }
        })
        .collect();
    lines.push(Line::raw(""));
    lines.push(Line::styled("📋 Коды CPC:", Style::default().add_modifier(Modifier::BOLD)));
    lines.push(Line::raw(profile.cpc_codes.join(", ")));
    lines.push(Line::styled("🎯 Topics:", Style::default().add_modifier(Modifier::BOLD)));
    lines.push(Line::raw(profile.topics.join(", ")));
    f.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: true })
            .block(titled("🔬 Технологический домен (←/→)")),
        parts[0],
    );

    f.render_widget(
        Paragraph::new(format!("{} — {}   [ ] / {{ }}", app.years.from, app.years.to))
            .block(titled("📅 Период анализа")),
        parts[1],
    );

    let cell = |c: Country| {
        format!(
            "[{}] {} ({})",
            if app.countries.is_on(c) { "x" } else { " " },
            c.code(),
            c.hotkey()
        )
    };
    let country_lines: Vec<Line> = Country::ALL
        .chunks(2)
        .map(|pair| Line::raw(pair.iter().map(|c| cell(*c)).collect::<Vec<_>>().join("   ")))
        .collect();
    f.render_widget(
        Paragraph::new(country_lines).block(titled("🌍 Страны патентования")),
        parts[2],
    );

    let m = &app.dataset().metrics;
    let status = vec![
        Line::raw(format!("🟢 OpenAlex   ✅ {} статей", m.papers_total)),
        Line::raw(format!("🟡 BigQuery   ⏳ {} патентов", m.patents_total)),
        Line::raw(format!(
            "PDF: {}",
            if app.renderer().is_available() {
                "доступен"
            } else {
                "недоступен"
            }
        )),
        Line::raw("Готовность MVP: 80%"),
    ];
    f.render_widget(
        Paragraph::new(status).block(titled("📊 Статус системы")),
        parts[3],
    );

    let keys = Paragraph::new(vec![
        Line::raw("q/Esc выход"),
        Line::raw("p/d/m отчеты PDF"),
        Line::raw("s/t экспорт CSV"),
    ])
    .block(titled("Клавиши"));
    f.render_widget(keys, parts[4]);
}

fn draw_cards(f: &mut Frame, area: Rect, app: &App) {
    let m = &app.dataset().metrics;
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(25); 4])
        .split(area);

    let cards = [
        (
            "📄 Публикации",
            m.papers_total.to_string(),
            format!("+{}% за год", m.papers_growth),
        ),
        (
            "📃 Патенты",
            m.patents_total.to_string(),
            format!("+{}% за год", m.patents_growth),
        ),
        (
            "⏱ Time Lag",
            format!("{} года", m.time_lag),
            format!("{} vs 2024", m.time_lag_change),
        ),
        (
            "🎯 Trend Score",
            format!("{}/100", m.trend_score),
            m.trend_status().to_string(),
        ),
    ];

    for ((title, value, note), col) in cards.into_iter().zip(cols.iter()) {
        let card = Paragraph::new(vec![
            Line::styled(value, Style::default().add_modifier(Modifier::BOLD)),
            Line::raw(note),
        ])
        .alignment(Alignment::Center)
        .block(titled(title).border_style(Style::default().fg(ACCENT)));
        f.render_widget(card, *col);
    }
}

fn series_bounds(points: &[SeriesPoint]) -> [f64; 2] {
    let lo = points
        .iter()
        .flat_map(|p| [p.publications, p.patents])
        .fold(f64::INFINITY, f64::min);
    let hi = points
        .iter()
        .flat_map(|p| [p.publications, p.patents])
        .fold(f64::NEG_INFINITY, f64::max);
    if lo.is_finite() && hi.is_finite() {
        [lo.floor().min(0.0), hi.ceil().max(1.0)]
    } else {
        [0.0, 1.0]
    }
}

fn draw_trends(f: &mut Frame, area: Rect, app: &App) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let title = format!("{}: Наука vs Технологии", app.domain.label());
    let points = app.visible_points();
    if points.is_empty() {
        f.render_widget(
            Paragraph::new("Нет данных за выбранный период").block(titled(&title)),
            rows[0],
        );
    } else {
        let publications: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.publications))
            .collect();
        let patents: Vec<(f64, f64)> = points
            .iter()
            .enumerate()
            .map(|(i, p)| (i as f64, p.patents))
            .collect();

        let x_max = (points.len() - 1).max(1) as f64;
        let [y_min, y_max] = series_bounds(points);
        let first = points[0].date.format("%Y-%m").to_string();
        let mid = points[points.len() / 2].date.format("%Y-%m").to_string();
        let last = points[points.len() - 1].date.format("%Y-%m").to_string();

        let datasets = vec![
            Dataset::default()
                .name("📄 Научные публикации")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PUBLICATIONS))
                .data(&publications),
            Dataset::default()
                .name("📃 Патенты")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(PATENTS))
                .data(&patents),
        ];
        let chart = Chart::new(datasets)
            .block(titled(&title))
            .x_axis(
                Axis::default()
                    .title("Год")
                    .bounds([0.0, x_max])
                    .labels(vec![Span::raw(first), Span::raw(mid), Span::raw(last)]),
            )
            .y_axis(
                Axis::default()
                    .title("Количество")
                    .bounds([y_min, y_max])
                    .labels(vec![
                        Span::raw(format!("{:.0}", y_min)),
                        Span::raw(format!("{:.0}", (y_min + y_max) / 2.0)),
                        Span::raw(format!("{:.0}", y_max)),
                    ]),
            );
        f.render_widget(chart, rows[0]);
    }

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[1]);

    let m = &app.dataset().metrics;
    let bars: Vec<(&str, u64)> = m
        .top_assignees
        .iter()
        .map(|a| (a.name.as_str(), u64::from(a.patents)))
        .collect();
    let assignees = BarChart::default()
        .block(titled("🏭 Топ заявителей"))
        .data(bars.as_slice())
        .bar_width(9)
        .bar_gap(2)
        .bar_style(Style::default().fg(PUBLICATIONS))
        .value_style(Style::default().fg(Color::Black).bg(PUBLICATIONS));
    f.render_widget(assignees, bottom[0]);

    let geo: Vec<Line> = m
        .countries
        .iter()
        .map(|c| {
            let width = (c.share_pct as usize) / 3;
            Line::from(vec![
                Span::raw(format!("{:<3}", c.code)),
                Span::styled("█".repeat(width.max(1)), Style::default().fg(ACCENT)),
                Span::raw(format!(" {}%", c.share_pct)),
            ])
        })
        .collect();
    f.render_widget(Paragraph::new(geo).block(titled("🌍 География")), bottom[1]);
}

fn draw_subtopics(f: &mut Frame, area: Rect, app: &App) {
    let dataset = app.dataset();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    let bars: Vec<(&str, u64)> = dataset
        .subtopics
        .iter()
        .map(|s| (s.name.as_str(), u64::from(s.growth_pct)))
        .collect();
    let chart = BarChart::default()
        .block(titled("Темпы роста подтехнологий, % за год"))
        .data(bars.as_slice())
        .bar_width(12)
        .bar_gap(2)
        .bar_style(Style::default().fg(ACCENT))
        .value_style(Style::default().fg(Color::White).bg(ACCENT));
    f.render_widget(chart, rows[0]);

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (detail, col) in dataset.subtopic_details.iter().zip(cols.iter()) {
        let title = format!("📌 {} (Рост: +{}%)", detail.name, detail.growth_pct);
        let card = Paragraph::new(vec![
            Line::raw(format!("Публикаций: {}", detail.publications)),
            Line::raw(format!("Патентов: {}", detail.patents)),
            Line::raw(format!("Time Lag: {:.1} года", detail.time_lag)),
            Line::raw(format!("Топ-заявитель: {}", detail.top_assignee)),
            Line::raw(format!("AI-интеграция: {}%", detail.ai_share)),
            Line::raw(format!("Trend Score: {}/100", detail.trend_score)),
        ])
        .wrap(Wrap { trim: true })
        .block(titled(&title));
        f.render_widget(card, *col);
    }
}

fn draw_data(f: &mut Frame, area: Rect, app: &App) {
    let dataset = app.dataset();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(5), Constraint::Length(3)])
        .split(area);

    let header = Row::new(vec![
        "Дата публикации",
        "Название",
        "Цитирований",
        "Авторы",
        "Тип",
    ])
    .style(Style::default().add_modifier(Modifier::BOLD).fg(ACCENT));
    let body: Vec<Row> = dataset
        .publications
        .iter()
        .map(|p| {
            Row::new(vec![
                Cell::from(p.date.format("%d.%m.%Y").to_string()),
                Cell::from(p.title.clone()),
                Cell::from(format!("{} ⭐", p.citations)),
                Cell::from(p.authors.clone()),
                Cell::from(p.kind.clone()),
            ])
        })
        .collect();
    let title = format!("📊 Данные по {}", dataset.domain.label());
    let table = Table::new(
        body,
        [
            Constraint::Length(16),
            Constraint::Min(24),
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Length(16),
        ],
    )
    .header(header)
    .block(titled(&title));
    f.render_widget(table, rows[0]);

    let note = Paragraph::new(format!(
        "📈 AI-интеграция в домене: {}% патентов содержат G06N*   •   [s] 📥 Скачать CSV",
        dataset.metrics.ai_share
    ))
    .block(titled("Экспорт"));
    f.render_widget(note, rows[1]);
}

fn draw_reports(f: &mut Frame, area: Rect, app: &App) {
    let available = app.renderer().is_available();
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(if available { 0 } else { 3 }),
            Constraint::Min(8),
            Constraint::Length(5),
        ])
        .split(area);

    if !available {
        f.render_widget(
            Paragraph::new(ReportRenderer::GUIDANCE)
                .style(Style::default().fg(Color::Red))
                .wrap(Wrap { trim: true })
                .block(titled("📄 Генерация отчетов")),
            rows[0],
        );
    }

    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3); 3])
        .split(rows[1]);
    for (kind, col) in ReportKind::ALL.iter().zip(cols.iter()) {
        let mut lines = vec![
            Line::styled(kind.tagline(), Style::default().fg(Color::Gray)),
            Line::raw(""),
        ];
        lines.extend(kind.highlights().iter().map(|h| Line::raw(format!("✅ {}", h))));
        lines.push(Line::raw(""));
        lines.push(Line::styled(
            format!("[{}] Сгенерировать PDF", report_hotkey(*kind)),
            if available {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            },
        ));
        f.render_widget(
            Paragraph::new(lines)
                .wrap(Wrap { trim: true })
                .block(titled(kind.title())),
            *col,
        );
    }

    let recommendation = Recommendation::for_score(app.dataset().metrics.trend_score);
    let mut quick = vec![Line::raw(format!(
        "{} {}",
        recommendation.icon(),
        recommendation.headline()
    ))];
    quick.push(Line::raw(recommendation.actions().join(" • ")));
    quick.push(Line::raw("[t] 📥 CSV временного ряда"));
    f.render_widget(
        Paragraph::new(quick)
            .wrap(Wrap { trim: true })
            .block(titled("📋 Быстрый экспорт")),
        rows[2],
    );
}

fn draw_footer(f: &mut Frame, area: Rect, app: &App) {
    let status = match &app.status {
        Some(s) => {
            let color = match s.level {
                StatusLevel::Info => Color::Gray,
                StatusLevel::Success => Color::Green,
                StatusLevel::Error => Color::Red,
            };
            Line::styled(s.text.clone(), Style::default().fg(color))
        }
        None => Line::raw(""),
    };
    let footer = Paragraph::new(vec![
        status,
        Line::styled(
            format!(
                "Текущий домен: {} | Данные: OpenAlex, Google Patents | Обновлено: {}",
                app.domain.label(),
                app.last_refresh.format("%d.%m.%Y %H:%M")
            ),
            Style::default().fg(Color::DarkGray),
        ),
    ])
    .block(Block::default().borders(Borders::TOP));
    f.render_widget(footer, area);
}
