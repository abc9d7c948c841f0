use chrono::{Datelike, NaiveDate};
use lifecycle_chart::{
    build_chart, drupal_chart, drupal_core_releases, format_tick_label, french_month_abbr,
    DRUPAL_CHART_TITLE,
};
use lifecycle_core::{ChartConfig, ChartError, ChartModel, LifecycleStatus, SupportPhase};

fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).expect("date valide")
}

fn reference_chart() -> ChartModel {
    drupal_chart(reference_date(), &ChartConfig::default()).expect("génération du graphique")
}

#[test]
fn bundled_records_are_ordered() {
    let records = drupal_core_releases().expect("jeu de données valide");
    assert_eq!(records.len(), 8);
    for record in &records {
        assert!(record.is_ordered(), "dates inversées pour {}", record.version);
    }
}

#[test]
fn rows_are_sorted_by_release_date() {
    let versions: Vec<String> = reference_chart()
        .rows
        .into_iter()
        .map(|row| row.version)
        .collect();
    assert_eq!(
        versions,
        ["10.3", "11.0", "11.1", "10.4", "10.5", "11.2", "10.6", "11.3"]
    );
}

#[test]
fn statuses_at_reference_date() {
    let chart = reference_chart();
    let expected = [
        ("10.3", LifecycleStatus::Security),
        ("11.0", LifecycleStatus::Security),
        ("11.1", LifecycleStatus::Active),
        ("10.4", LifecycleStatus::Active),
        ("10.5", LifecycleStatus::NotActive),
        ("11.2", LifecycleStatus::NotActive),
        ("10.6", LifecycleStatus::NotActive),
        ("11.3", LifecycleStatus::NotActive),
    ];
    for (row, (version, status)) in chart.rows.iter().zip(expected) {
        assert_eq!(row.version, version);
        assert_eq!(row.status, status, "statut inattendu pour {version}");
        assert_eq!(row.label_color, status.color());
    }
}

#[test]
fn segment_opacities_at_reference_date() {
    let chart = reference_chart();
    let opacities: Vec<(String, Vec<f64>)> = chart
        .rows
        .iter()
        .map(|row| {
            (
                row.version.clone(),
                row.segments.iter().map(|segment| segment.opacity).collect(),
            )
        })
        .collect();

    // 10.3 : support actif écoulé, fenêtre sécurité en cours.
    assert_eq!(opacities[0], ("10.3".to_string(), vec![0.3, 1.0]));
    // 10.4 : support actif en cours, fenêtre sécurité à venir.
    assert_eq!(opacities[3], ("10.4".to_string(), vec![1.0, 0.7]));
    // 10.5 : entièrement dans le futur.
    assert_eq!(opacities[4], ("10.5".to_string(), vec![0.7, 0.7]));
}

#[test]
fn segments_cover_both_phases_and_abut() {
    let chart = reference_chart();
    for row in &chart.rows {
        assert_eq!(row.segments.len(), 2, "deux segments pour {}", row.version);
        assert_eq!(row.segments[0].phase, SupportPhase::Active);
        assert_eq!(row.segments[1].phase, SupportPhase::Security);
        let junction = row.segments[0].x + row.segments[0].width;
        assert!(
            (junction - row.segments[1].x).abs() < 1e-6,
            "segments disjoints pour {}",
            row.version
        );
        assert!(row.segments[0].width > 0.0);
        assert!(row.segments[1].width > 0.0);
    }
}

#[test]
fn rows_descend_from_earliest_release() {
    let chart = reference_chart();
    for pair in chart.rows.windows(2) {
        assert!(pair[0].y < pair[1].y, "l'axe vertical doit être inversé");
    }
}

#[test]
fn today_marker_is_inside_the_plot() {
    let chart = reference_chart();
    assert_eq!(chart.today.date, reference_date());
    assert!(chart.today.x > chart.plot.left);
    assert!(chart.today.x < chart.plot.right);
}

#[test]
fn ticks_fall_on_quarter_months() {
    let chart = reference_chart();
    assert!(!chart.ticks.is_empty());
    for tick in &chart.ticks {
        assert_eq!(tick.date.day(), 1);
        assert_eq!((tick.date.month() - 1) % 3, 0, "mois inattendu {}", tick.date);
        assert_eq!(tick.label, format_tick_label(tick.date));
    }
    for pair in chart.ticks.windows(2) {
        assert!(pair[0].x < pair[1].x);
    }
    let labels: Vec<&str> = chart.ticks.iter().map(|tick| tick.label.as_str()).collect();
    assert_eq!(labels.first(), Some(&"juil. 2024"));
    assert_eq!(labels.last(), Some(&"janv. 2027"));
    assert!(labels.contains(&"janv. 2025"));
}

#[test]
fn french_month_table() {
    assert_eq!(french_month_abbr(1), "janv.");
    assert_eq!(french_month_abbr(12), "déc.");
    assert_eq!(
        format_tick_label(NaiveDate::from_ymd_opt(2025, 1, 1).expect("date valide")),
        "janv. 2025"
    );
}

#[test]
fn legend_has_three_french_entries() {
    let chart = reference_chart();
    let labels: Vec<&str> = chart
        .legend
        .iter()
        .map(|entry| entry.label.as_str())
        .collect();
    assert_eq!(
        labels,
        [
            "Version maintenue",
            "Correctifs de sécurité uniquement",
            "Version non maintenue"
        ]
    );
    assert_eq!(chart.title, DRUPAL_CHART_TITLE);
}

#[test]
fn empty_dataset_is_an_error() {
    let result = build_chart("vide", &[], reference_date(), &ChartConfig::default());
    assert!(matches!(result, Err(ChartError::EmptyDataset)));
}
