use chrono::Local;
use tech_trends::config::Config;
use tech_trends::dataset::{SeriesWindow, generate};
use tech_trends::domain::Domain;
use tech_trends::export::{
    PUBLICATION_COLUMNS, TIMELINE_COLUMNS, csv_columns, export_publications, export_timeline,
    parse_publications_csv, parse_timeline_csv,
};
use tech_trends::report::{ReportInput, ReportKind, ReportRenderer};

#[test]
fn test_timeline_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());

    let path = export_timeline(&dataset, dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "полупроводники_timeline.csv"
    );

    let data = std::fs::read(&path).unwrap();
    assert_eq!(csv_columns(&data).unwrap(), TIMELINE_COLUMNS);
    let rows = parse_timeline_csv(&data).unwrap();
    assert_eq!(rows.len(), dataset.series.len());
    assert_eq!(rows[0].date, dataset.series.points()[0].date);
    assert_eq!(
        rows[10].publications,
        dataset.series.points()[10].publications.trunc() as i64
    );
}

#[test]
fn test_publications_csv_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = generate(Domain::GeneEngineering, &SeriesWindow::default());

    let path = export_publications(&dataset, dir.path()).unwrap();
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "генная_инженерия_data.csv"
    );

    let data = std::fs::read(&path).unwrap();
    assert_eq!(csv_columns(&data).unwrap(), PUBLICATION_COLUMNS);
    let rows = parse_publications_csv(&data).unwrap();
    assert_eq!(rows.len(), 20);
    assert_eq!(rows[5].authors, "Author 5, Author 6");
    assert_eq!(rows[5].title, dataset.publications[5].title);
}

#[test]
fn test_export_creates_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let nested = dir.path().join("reports").join("csv");
    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
    let path = export_timeline(&dataset, &nested).unwrap();
    assert!(path.starts_with(&nested));
    assert!(path.is_file());
}

#[test]
fn test_missing_fonts_disable_reports() {
    let mut config = Config::default();
    let dir = tempfile::tempdir().unwrap();
    config.report.font_dir = Some(dir.path().to_path_buf());
    config.report.font_family = "NoSuchFamilyAnywhere".to_string();

    let renderer = ReportRenderer::detect(&config.report);
    assert!(!renderer.is_available());

    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
    for kind in ReportKind::ALL {
        let artifact = renderer
            .generate(kind, ReportInput::from_dataset(&dataset), Local::now())
            .unwrap();
        assert!(artifact.is_none());
    }
}

fn fixture_renderer() -> ReportRenderer {
    let mut config = Config::default();
    config.report.font_dir = Some(
        std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("tests")
            .join("fixtures")
            .join("fonts"),
    );
    config.report.font_family = "DejaVuSans".to_string();
    ReportRenderer::detect(&config.report)
}

#[test]
fn test_plain_ttf_family_enables_reports() {
    let renderer = fixture_renderer();
    assert!(renderer.is_available());
    assert!(renderer.fonts().unwrap().source().ends_with("DejaVuSans.ttf"));
}

#[test]
fn test_report_renders_pdf_for_every_kind() {
    let renderer = fixture_renderer();
    let now = Local::now();

    for domain in Domain::ALL {
        let dataset = generate(domain, &SeriesWindow::default());
        for kind in ReportKind::ALL {
            let artifact = renderer
                .generate(kind, ReportInput::from_dataset(&dataset), now)
                .unwrap()
                .expect("fixture fonts make the renderer available");
            assert!(artifact.bytes.starts_with(b"%PDF"));
            assert_eq!(artifact.kind, kind);
            assert_eq!(artifact.domain, domain);
            assert_eq!(artifact.file_name, kind.file_name(domain, now.date_naive()));
        }
    }
}

#[test]
fn test_report_written_to_output_dir() {
    let renderer = fixture_renderer();
    let dataset = generate(Domain::GeneEngineering, &SeriesWindow::default());
    let artifact = renderer
        .generate(ReportKind::DeepDive, ReportInput::from_dataset(&dataset), Local::now())
        .unwrap()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = artifact.write_to(dir.path()).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), artifact.bytes);
}

#[test]
fn test_report_size_stays_bounded() {
    // regular + bold fallback + 800x440 RGB chart; italic slots are built-in
    let renderer = fixture_renderer();
    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
    let artifact = renderer
        .generate(ReportKind::Metrics, ReportInput::from_dataset(&dataset), Local::now())
        .unwrap()
        .unwrap();
    assert!(
        artifact.bytes.len() < 3_500_000,
        "report is {} bytes",
        artifact.bytes.len()
    );
}

#[test]
fn test_chart_png_from_fixture_fonts() {
    let renderer = fixture_renderer();
    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
    let png = renderer
        .chart_png(ReportInput::from_dataset(&dataset))
        .unwrap()
        .unwrap();
    assert!(png.starts_with(&[0x89, b'P', b'N', b'G']));
}
