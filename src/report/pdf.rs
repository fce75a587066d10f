//! A4 report document assembly.

use super::ReportInput;
use super::chart;
use super::fonts::ReportFonts;
use super::recommendation::Recommendation;
use crate::error::Result;
use crate::domain::Domain;
use crate::metrics::subtopics_for;
use chrono::{DateTime, Local};
use genpdf::elements::{Break, FrameCellDecorator, Image, Paragraph, TableLayout};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Document, Element as _, PaperSize, Scale, SimplePageDecorator};

/// Default number of recent points shown in the embedded chart
pub const CHART_POINTS: usize = 24;

const ACCENT: Color = Color::Rgb(0x66, 0x7e, 0xea);
const GREEN: Color = Color::Rgb(0x00, 0xcc, 0x96);
const RED: Color = Color::Rgb(0xff, 0x4b, 0x4b);
const PURPLE: Color = Color::Rgb(0x76, 0x4b, 0xa2);
const GRAY: Color = Color::Rgb(0x80, 0x80, 0x80);

/// The chart is 800px wide; genpdf assumes 300 dpi, so scale to ~450pt
const CHART_SCALE: f64 = 2.34;

fn heading(text: &str) -> impl genpdf::Element {
    Paragraph::new(text).styled(Style::new().bold().with_font_size(16))
}

/// Table with a colored bold header row and centered cells
fn table(
    weights: Vec<usize>,
    header_color: Color,
    header: &[&str],
    rows: Vec<Vec<String>>,
) -> Result<TableLayout> {
    let mut layout = TableLayout::new(weights);
    layout.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let header_style = Style::new().bold().with_font_size(12).with_color(header_color);
    let mut row = layout.row();
    for cell in header {
        row.push_element(
            Paragraph::new(*cell)
                .aligned(Alignment::Center)
                .styled(header_style)
                .padded(1),
        );
    }
    row.push()?;

    for cells in rows {
        let mut row = layout.row();
        for cell in cells {
            row.push_element(Paragraph::new(cell).aligned(Alignment::Center).padded(1));
        }
        row.push()?;
    }
    Ok(layout)
}

fn metrics_rows(input: &ReportInput<'_>) -> Vec<Vec<String>> {
    let m = input.metrics;
    vec![
        vec![
            "Научные публикации".into(),
            m.papers_total.to_string(),
            format!("+{}%", m.papers_growth),
        ],
        vec![
            "Патенты".into(),
            m.patents_total.to_string(),
            format!("+{}%", m.patents_growth),
        ],
        vec![
            "Time Lag".into(),
            format!("{} года", m.time_lag),
            m.time_lag_change.to_string(),
        ],
        vec![
            "Trend Score".into(),
            format!("{}/100", m.trend_score),
            m.trend_status().name().to_string(),
        ],
        vec![
            "AI-интеграция".into(),
            format!("{}%", m.ai_share),
            "в патентах".into(),
        ],
    ]
}

fn subtopic_rows(domain: Domain) -> Vec<Vec<String>> {
    subtopics_for(domain)
        .into_iter()
        .map(|s| vec![s.name, s.growth_pct.to_string()])
        .collect()
}

/// Build the full document into memory; nothing is returned unless every section rendered
pub(crate) fn render(
    fonts: &ReportFonts,
    input: &ReportInput<'_>,
    chart_points: usize,
    generated_at: DateTime<Local>,
) -> Result<Vec<u8>> {
    let domain = input.domain.label();
    let metrics = input.metrics;

    let mut doc = Document::new(fonts.family.clone());
    doc.set_title(format!("Tech Trends Report: {}", domain));
    doc.set_paper_size(PaperSize::A4);
    doc.set_minimal_conformance();
    let mut decorator = SimplePageDecorator::new();
    decorator.set_margins(20);
    doc.set_page_decorator(decorator);

    doc.push(
        Paragraph::new(format!("Tech Trends Report: {}", domain))
            .aligned(Alignment::Center)
            .styled(Style::new().bold().with_font_size(24).with_color(ACCENT)),
    );
    doc.push(
        Paragraph::new(format!(
            "Сгенерировано: {}",
            generated_at.format("%d.%m.%Y %H:%M")
        ))
        .aligned(Alignment::Center)
        .styled(Style::new().with_font_size(10).with_color(GRAY)),
    );
    doc.push(Break::new(2));

    doc.push(heading("Ключевые метрики"));
    doc.push(Break::new(0.5));
    doc.push(table(
        vec![3, 2, 2],
        ACCENT,
        &["Показатель", "Значение", "Изменение"],
        metrics_rows(input),
    )?);
    doc.push(Break::new(1.5));

    doc.push(heading("Топ-5 заявителей"));
    doc.push(Break::new(0.5));
    doc.push(table(
        vec![2, 1],
        GREEN,
        &["Компания", "Количество патентов"],
        metrics
            .top_assignees
            .iter()
            .map(|a| vec![a.name.clone(), a.patents.to_string()])
            .collect(),
    )?);
    doc.push(Break::new(1.5));

    doc.push(heading("География патентования"));
    doc.push(Break::new(0.5));
    doc.push(table(
        vec![3, 2],
        RED,
        &["Страна", "Доля (%)"],
        metrics
            .countries
            .iter()
            .map(|c| vec![c.code.clone(), c.share_pct.to_string()])
            .collect(),
    )?);
    doc.push(Break::new(1.5));

    doc.push(heading("Динамика развития (последние 2 года)"));
    doc.push(Break::new(0.5));
    let image = chart::render(
        &format!("{}: Динамика за 2 года", domain),
        input.series.tail(chart_points),
    )?;
    doc.push(
        Image::from_dynamic_image(image)?
            .with_alignment(Alignment::Center)
            .with_scale(Scale::new(CHART_SCALE, CHART_SCALE)),
    );
    doc.push(Break::new(1.5));

    doc.push(heading("Быстрорастущие подтехнологии"));
    doc.push(Break::new(0.5));
    doc.push(table(
        vec![5, 2],
        PURPLE,
        &["Подтехнология", "Рост за год (%)"],
        subtopic_rows(input.domain),
    )?);
    doc.push(Break::new(2));

    doc.push(heading("Рекомендации"));
    doc.push(Break::new(0.5));
    for line in Recommendation::for_score(metrics.trend_score).lines() {
        doc.push(Paragraph::new(line));
        doc.push(Break::new(0.2));
    }

    let mut out = Vec::new();
    doc.render(&mut out)?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{SeriesWindow, generate};

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn semiconductor_metrics_rows() {
        let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
        let rows = metrics_rows(&ReportInput::from_dataset(&dataset));
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], row(&["Научные публикации", "1234", "+12%"]));
        assert_eq!(rows[1], row(&["Патенты", "892", "+8%"]));
        assert_eq!(rows[2], row(&["Time Lag", "3.2 года", "-0.5"]));
        assert_eq!(rows[3], row(&["Trend Score", "78/100", "Emerging"]));
        assert_eq!(rows[4], row(&["AI-интеграция", "32%", "в патентах"]));
    }

    #[test]
    fn gene_engineering_metrics_rows() {
        let dataset = generate(Domain::GeneEngineering, &SeriesWindow::default());
        let rows = metrics_rows(&ReportInput::from_dataset(&dataset));
        assert_eq!(rows[2], row(&["Time Lag", "4.8 года", "-1.2"]));
        assert_eq!(rows[3], row(&["Trend Score", "92/100", "Hot"]));
    }

    #[test]
    fn subtopic_rows_use_report_list() {
        let rows = subtopic_rows(Domain::Semiconductors);
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[0], row(&["Квантовые вычисления", "55"]));
        assert_eq!(rows[3], row(&["EUV литография", "42"]));
        assert_eq!(subtopic_rows(Domain::GeneEngineering)[1], row(&["Липидные наночастицы", "73"]));
    }

    #[test]
    fn recommendation_section_follows_score() {
        let lines = Recommendation::for_score(78).lines();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "Стабильный рост. Рекомендуется:");
        assert!(lines[1..].iter().all(|l| l.starts_with("• ")));
    }
}
