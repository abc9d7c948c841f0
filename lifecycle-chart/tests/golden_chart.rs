use std::fs;

use chrono::NaiveDate;
use lifecycle_chart::drupal_chart;
use lifecycle_core::ChartConfig;
use serde_json::Value;

fn fixture_path(name: &str) -> String {
    format!("{}/tests/data/{name}", env!("CARGO_MANIFEST_DIR"))
}

#[test]
fn drupal_chart_matches_golden() {
    let today = NaiveDate::from_ymd_opt(2025, 1, 1).expect("date valide");
    let model = drupal_chart(today, &ChartConfig::default()).expect("génération du graphique");

    let mut actual = serde_json::to_value(&model).expect("sérialisation du modèle");
    normalize_geometry(&mut actual);

    let expected = fs::read_to_string(fixture_path("drupal_chart_model.json"))
        .expect("lecture du golden");
    let mut expected_value: Value = serde_json::from_str(&expected).expect("golden invalide");
    normalize_geometry(&mut expected_value);

    assert_eq!(actual, expected_value);
}

// Les coordonnées en pixels dépendent de la taille du canevas ; le golden
// fige la mise en page sémantique (ordre, statuts, opacités, libellés).
const GEOMETRY_KEYS: [&str; 8] = [
    "x", "y", "width", "height", "left", "right", "top", "bottom",
];

fn normalize_geometry(value: &mut Value) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                if GEOMETRY_KEYS.contains(&key.as_str()) && entry.is_number() {
                    *entry = Value::from(0.0);
                } else {
                    normalize_geometry(entry);
                }
            }
        }
        Value::Array(items) => {
            for item in items {
                normalize_geometry(item);
            }
        }
        _ => {}
    }
}
