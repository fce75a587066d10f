use ratatui::Terminal;
use ratatui::backend::TestBackend;
use tech_trends::config::Config;
use tech_trends::dashboard::{Action, App, StatusLevel, Tab, ui};
use tech_trends::domain::Domain;
use tech_trends::report::{ReportKind, ReportRenderer};

fn test_app(dir: &std::path::Path) -> App {
    let mut config = Config::default();
    config.report.output_dir = dir.to_path_buf();
    App::new(&config, ReportRenderer::unavailable()).unwrap()
}

fn render(app: &App) -> String {
    let mut terminal = Terminal::new(TestBackend::new(180, 50)).unwrap();
    terminal.draw(|f| ui::draw(f, app)).unwrap();
    terminal
        .backend()
        .buffer()
        .content
        .iter()
        .map(|cell| cell.symbol())
        .collect()
}

#[test]
fn test_every_tab_draws() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(dir.path());

    let expected = [
        (Tab::Trends, "Топ заявителей"),
        (Tab::Subtopics, "Публикаций:"),
        (Tab::Data, "Название"),
        (Tab::Reports, "Topic Card"),
    ];
    for (tab, needle) in expected {
        app.apply(Action::SelectTab(tab));
        let screen = render(&app);
        assert!(screen.contains(needle), "{:?} tab missing {:?}", tab, needle);
        assert!(screen.contains("Текущий домен: Полупроводники"));
    }
}

#[test]
fn test_unavailable_renderer_shows_banner() {
    let dir = tempfile::tempdir().unwrap();
    let app = test_app(dir.path());
    assert!(render(&app).contains("Внимание"));
}

#[test]
fn test_domain_switch_updates_view() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(dir.path());

    app.apply(Action::NextDomain);
    assert_eq!(app.domain, Domain::GeneEngineering);
    assert_eq!(app.dataset().metrics.trend_score, 92);
    assert!(render(&app).contains("Текущий домен: Генная инженерия"));

    app.apply(Action::PreviousDomain);
    assert_eq!(app.domain, Domain::Semiconductors);
    assert_eq!(app.dataset().metrics.papers_total, 1234);
}

#[test]
fn test_single_year_range_still_draws() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(dir.path());
    // series ends in 2025-01; 2025..2025 keeps one point
    app.apply(Action::ShiftRangeStart(10));
    assert_eq!(app.visible_points().len(), 1);
    render(&app);
}

#[test]
fn test_report_without_renderer_leaves_state_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(dir.path());
    let status = app.status.clone();

    for kind in ReportKind::ALL {
        app.apply(Action::GenerateReport(kind));
    }
    assert_eq!(app.status, status);
    assert!(app.last_export.is_none());
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn test_csv_export_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let mut app = test_app(dir.path());

    app.apply(Action::ExportTimeline);
    let path = app.last_export.clone().expect("export written");
    assert!(path.is_file());
    let status = app.status.as_ref().unwrap();
    assert_eq!(status.level, StatusLevel::Success);
    assert!(status.text.contains("полупроводники_timeline.csv"));

    app.apply(Action::NextDomain);
    app.apply(Action::ExportPublications);
    assert!(dir.path().join("генная_инженерия_data.csv").is_file());
}
