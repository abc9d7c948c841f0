//! Construit le graphique mis en page à partir des enregistrements de versions.

use chrono::{Datelike, Duration, Months, NaiveDate};
use lifecycle_core::{
    palette, segment_opacity, AxisTick, BarSegment, ChartConfig, ChartError, ChartModel, DateSpan,
    LegendEntry, PlotArea, ReleaseRecord, SupportPhase, TodayMarker, VersionRow,
};

/// Titre du graphique pour le jeu de données embarqué.
pub const DRUPAL_CHART_TITLE: &str = "Cycle de vie des versions Drupal 10.3 à 11.3";

// Versions de Drupal core.
// "version", "publication", "fin de support actif", "fin de support sécurité"
// Certaines dates sont des estimations.
const DRUPAL_CORE_RELEASES: [(&str, &str, &str, &str); 8] = [
    ("10.3", "20/06/2024", "17/12/2024", "19/06/2025"),
    ("10.4", "17/12/2024", "19/06/2025", "11/12/2025"),
    ("10.5", "19/06/2025", "11/12/2025", "15/06/2026"),
    ("10.6", "11/12/2025", "15/06/2026", "15/12/2026"),
    ("11.0", "02/08/2024", "16/12/2024", "19/06/2025"),
    ("11.1", "16/12/2024", "19/06/2025", "11/12/2025"),
    ("11.2", "19/06/2025", "11/12/2025", "15/06/2026"),
    ("11.3", "11/12/2025", "15/06/2026", "15/12/2026"),
];

/// La table de cycle de vie de Drupal core embarquée dans le binaire.
pub fn drupal_core_releases() -> Result<Vec<ReleaseRecord>, ChartError> {
    DRUPAL_CORE_RELEASES
        .iter()
        .map(|(version, release, active, security)| {
            ReleaseRecord::parse(version, release, active, security)
        })
        .collect()
}

/// Graphique complet du jeu de données embarqué, vu depuis `today`.
pub fn drupal_chart(today: NaiveDate, config: &ChartConfig) -> Result<ChartModel, ChartError> {
    let records = drupal_core_releases()?;
    build_chart(DRUPAL_CHART_TITLE, &records, today, config)
}

/// Met en page le graphique de `records` vu depuis `today`.
///
/// Les lignes sont triées par date de publication croissante, la plus
/// ancienne en haut. Chaque ligne porte deux segments (support actif puis
/// correctifs de sécurité) dont l'opacité dépend de la position de `today`.
pub fn build_chart(
    title: &str,
    records: &[ReleaseRecord],
    today: NaiveDate,
    config: &ChartConfig,
) -> Result<ChartModel, ChartError> {
    if records.is_empty() {
        return Err(ChartError::EmptyDataset);
    }

    let mut sorted: Vec<ReleaseRecord> = records.to_vec();
    sorted.sort_by_key(|record| record.release_date);

    for record in &sorted {
        if !record.is_ordered() {
            tracing::warn!(
                version = %record.version,
                "fenêtres de support non ordonnées, le segment sera dégénéré"
            );
        }
    }

    let domain = padded_domain(&sorted, config);
    let plot = PlotArea {
        left: config.margin.left,
        top: config.margin.top,
        right: config.width - config.margin.right,
        bottom: config.height - config.margin.bottom,
    };
    let scale = DateScale::new(domain, &plot);

    let row_height = plot.height() / sorted.len() as f64;
    let bar_height = row_height * config.bar_height_ratio;

    let rows: Vec<VersionRow> = sorted
        .iter()
        .enumerate()
        .map(|(index, record)| {
            let status = record.status_at(today);
            let spans = [
                (SupportPhase::Active, record.release_date, record.active_until),
                (
                    SupportPhase::Security,
                    record.active_until,
                    record.security_until,
                ),
            ];
            let segments = spans
                .into_iter()
                .map(|(phase, start, end)| BarSegment {
                    phase,
                    x: scale.x(start),
                    width: scale.x(end) - scale.x(start),
                    color: phase.color().to_string(),
                    opacity: segment_opacity(start, end, today),
                })
                .collect();

            VersionRow {
                version: record.version.clone(),
                status,
                label_color: status.color().to_string(),
                y: plot.top + index as f64 * row_height + (row_height - bar_height) / 2.0,
                height: bar_height,
                segments,
            }
        })
        .collect();

    let ticks = month_ticks(domain, config.tick_interval_months, &scale);
    tracing::debug!(rows = rows.len(), ticks = ticks.len(), "mise en page calculée");

    Ok(ChartModel {
        title: title.to_string(),
        width: config.width,
        height: config.height,
        plot,
        domain,
        today: TodayMarker {
            date: today,
            x: scale.x(today),
        },
        rows,
        ticks,
        legend: legend_entries(),
    })
}

/// Abréviations françaises des mois, indexées par mois calendaire (1–12).
pub fn french_month_abbr(month: u32) -> &'static str {
    match month {
        1 => "janv.",
        2 => "févr.",
        3 => "mars",
        4 => "avr.",
        5 => "mai",
        6 => "juin",
        7 => "juil.",
        8 => "août",
        9 => "sept.",
        10 => "oct.",
        11 => "nov.",
        12 => "déc.",
        _ => "?",
    }
}

/// Libellé d'une graduation, par exemple "janv. 2025".
pub fn format_tick_label(date: NaiveDate) -> String {
    format!("{} {}", french_month_abbr(date.month()), date.year())
}

struct DateScale {
    start: NaiveDate,
    span_days: f64,
    left: f64,
    width: f64,
}

impl DateScale {
    fn new(domain: DateSpan, plot: &PlotArea) -> Self {
        Self {
            start: domain.start,
            span_days: (domain.end - domain.start).num_days().max(1) as f64,
            left: plot.left,
            width: plot.width(),
        }
    }

    fn x(&self, date: NaiveDate) -> f64 {
        let elapsed = (date - self.start).num_days() as f64;
        self.left + elapsed / self.span_days * self.width
    }
}

fn padded_domain(records: &[ReleaseRecord], config: &ChartConfig) -> DateSpan {
    let mut start = records[0].release_date;
    let mut end = records[0].release_date;
    for record in records {
        start = start.min(record.release_date);
        // max sur les trois dates : un enregistrement inversé ne doit pas
        // rétrécir le domaine.
        end = end
            .max(record.release_date)
            .max(record.active_until)
            .max(record.security_until);
    }

    let span_days = (end - start).num_days().max(1);
    let pad = Duration::days((span_days as f64 * config.domain_pad_ratio).round() as i64);
    DateSpan {
        start: start - pad,
        end: end + pad,
    }
}

fn month_ticks(domain: DateSpan, interval_months: u32, scale: &DateScale) -> Vec<AxisTick> {
    let interval = interval_months.max(1);
    let mut ticks = Vec::new();
    let mut current = first_of_month(domain.start);

    while current <= domain.end {
        if current >= domain.start && current.month0() % interval == 0 {
            ticks.push(AxisTick {
                date: current,
                x: scale.x(current),
                label: format_tick_label(current),
            });
        }
        let Some(next) = current.checked_add_months(Months::new(1)) else {
            break;
        };
        current = next;
    }

    ticks
}

fn first_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

fn legend_entries() -> Vec<LegendEntry> {
    vec![
        LegendEntry {
            color: palette::ACTIVE.to_string(),
            label: "Version maintenue".to_string(),
        },
        LegendEntry {
            color: palette::SECURITY.to_string(),
            label: "Correctifs de sécurité uniquement".to_string(),
        },
        LegendEntry {
            color: palette::ENDED.to_string(),
            label: "Version non maintenue".to_string(),
        },
    ]
}
