use tech_trends::dataset::{SeriesWindow, generate, month_ends};
use tech_trends::domain::Domain;
use tech_trends::metrics::metrics_for;
use tech_trends::report::Recommendation;

#[test]
fn test_generation_is_deterministic_per_domain() {
    let window = SeriesWindow::default();
    for domain in Domain::ALL {
        let first = generate(domain, &window);
        let second = generate(domain, &window);
        assert_eq!(first.series.dates(), second.series.dates());
        assert_eq!(first.series.publications(), second.series.publications());
        assert_eq!(first.series.patents(), second.series.patents());
        assert_eq!(first, second);
    }
}

#[test]
fn test_domains_get_distinct_series() {
    let window = SeriesWindow::default();
    let semi = generate(Domain::Semiconductors, &window);
    let gene = generate(Domain::GeneEngineering, &window);
    assert_eq!(semi.series.dates(), gene.series.dates());
    assert_ne!(semi.series.publications(), gene.series.publications());
}

#[test]
fn test_series_covers_2018_through_2025() {
    let dataset = generate(Domain::GeneEngineering, &SeriesWindow::default());
    assert_eq!(dataset.series.len(), 85);
    assert_eq!(
        dataset.series.dates(),
        month_ends(&SeriesWindow::parse("2018-01", "2025-01").unwrap())
    );
}

#[test]
fn test_walk_drifts_upward() {
    // drift dominates noise over 85 steps
    let dataset = generate(Domain::Semiconductors, &SeriesWindow::default());
    let pubs = dataset.series.publications();
    let patents = dataset.series.patents();
    assert!(pubs[84] > pubs[0]);
    assert!(patents[84] > patents[0]);
}

#[test]
fn test_metric_lists_stay_aligned() {
    for domain in Domain::ALL {
        let m = metrics_for(domain);
        assert_eq!(m.assignee_values().len(), m.top_assignees.len());
        assert_eq!(m.assignee_names().len(), m.top_assignees.len());
        assert_eq!(m.country_values().len(), m.countries.len());
        assert_eq!(m.country_codes().len(), m.countries.len());
    }
}

#[test]
fn test_semiconductors_end_to_end() {
    let domain: Domain = "Полупроводники".parse().unwrap();
    let dataset = generate(domain, &SeriesWindow::default());
    assert_eq!(dataset.metrics.papers_total, 1234);
    assert_eq!(dataset.metrics.patents_total, 892);
    assert_eq!(dataset.metrics.trend_score, 78);
    assert_eq!(
        Recommendation::for_score(dataset.metrics.trend_score),
        Recommendation::StableGrowth
    );
}

#[test]
fn test_gene_engineering_end_to_end() {
    let domain: Domain = "Генная инженерия".parse().unwrap();
    let dataset = generate(domain, &SeriesWindow::default());
    assert_eq!(dataset.metrics.trend_score, 92);
    assert_eq!(
        Recommendation::for_score(dataset.metrics.trend_score),
        Recommendation::ExplosiveGrowth
    );
}

#[test]
fn test_every_score_maps_to_one_branch() {
    for score in 0..=100u8 {
        let rec = Recommendation::for_score(score);
        let expected = if score > 80 {
            Recommendation::ExplosiveGrowth
        } else if score > 60 {
            Recommendation::StableGrowth
        } else {
            Recommendation::Maturing
        };
        assert_eq!(rec, expected, "score {}", score);
    }
}

#[test]
fn test_unknown_domain_is_rejected() {
    let result = "Нанотехнологии".parse::<Domain>();
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Known domains"));
}
