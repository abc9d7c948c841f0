//! Modèle et arithmétique de dates pour les graphiques de cycle de vie.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format jour-premier utilisé par le jeu de données embarqué.
pub const DATE_FORMAT: &str = "%d/%m/%Y";

/// Une ligne de la table : une version publiée et ses fenêtres de support.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReleaseRecord {
    pub version: String,
    pub release_date: NaiveDate,
    pub active_until: NaiveDate,
    pub security_until: NaiveDate,
}

impl ReleaseRecord {
    /// Construit un enregistrement depuis des dates au format `jj/mm/aaaa`.
    pub fn parse(
        version: &str,
        release: &str,
        active: &str,
        security: &str,
    ) -> Result<Self, ChartError> {
        Ok(Self {
            version: version.to_string(),
            release_date: parse_date(release)?,
            active_until: parse_date(active)?,
            security_until: parse_date(security)?,
        })
    }

    /// Vrai quand publication ≤ fin de support actif ≤ fin de support sécurité.
    pub fn is_ordered(&self) -> bool {
        self.release_date <= self.active_until && self.active_until <= self.security_until
    }

    /// Statut de cette version par rapport à la date de référence.
    pub fn status_at(&self, today: NaiveDate) -> LifecycleStatus {
        if today < self.release_date {
            LifecycleStatus::NotActive
        } else if today <= self.active_until {
            LifecycleStatus::Active
        } else if today <= self.security_until {
            LifecycleStatus::Security
        } else {
            LifecycleStatus::Ended
        }
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ChartError> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|source| ChartError::InvalidDate {
        value: value.to_string(),
        source,
    })
}

/// Phase de support dessinée comme un segment de barre horizontale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum SupportPhase {
    Active,
    Security,
}

impl SupportPhase {
    /// Couleur de remplissage du segment.
    pub fn color(self) -> &'static str {
        match self {
            SupportPhase::Active => palette::ACTIVE,
            SupportPhase::Security => palette::SECURITY,
        }
    }
}

/// Statut d'une version par rapport à une date de référence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleStatus {
    NotActive,
    Active,
    Security,
    Ended,
}

impl LifecycleStatus {
    /// Couleur de fond de la pastille portant le numéro de version.
    pub fn color(self) -> &'static str {
        match self {
            LifecycleStatus::NotActive => palette::NOT_ACTIVE,
            LifecycleStatus::Active => palette::ACTIVE,
            LifecycleStatus::Security => palette::SECURITY,
            LifecycleStatus::Ended => palette::ENDED,
        }
    }
}

/// Palette du graphique.
pub mod palette {
    pub const ACTIVE: &str = "#008000";
    pub const SECURITY: &str = "#ffd700";
    pub const ENDED: &str = "#ff0000";
    pub const NOT_ACTIVE: &str = "#808080";
}

/// Opacité d'un segment couvrant `[start, end]`, vu depuis `today`.
///
/// Un segment écoulé est estompé (0.3), un segment futur légèrement
/// atténué (0.7), le segment contenant `today` est pleinement opaque.
pub fn segment_opacity(start: NaiveDate, end: NaiveDate, today: NaiveDate) -> f64 {
    if end < today {
        0.3
    } else if start > today {
        0.7
    } else {
        1.0
    }
}

/// Réglages du rendu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartConfig {
    /// Taille du canevas en pixels.
    pub width: f64,
    pub height: f64,
    pub margin: Margin,
    /// Hauteur d'une barre en fraction de la hauteur de ligne.
    pub bar_height_ratio: f64,
    /// Fraction de l'étendue de dates ajoutée de part et d'autre de l'axe.
    pub domain_pad_ratio: f64,
    /// Nombre de mois entre deux graduations.
    pub tick_interval_months: u32,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: 1400.0,
            height: 800.0,
            margin: Margin::default(),
            bar_height_ratio: 0.8,
            domain_pad_ratio: 0.05,
            tick_interval_months: 3,
        }
    }
}

/// Marges autour de la zone de tracé.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Margin {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Default for Margin {
    fn default() -> Self {
        Self {
            left: 70.0,
            right: 30.0,
            top: 60.0,
            bottom: 70.0,
        }
    }
}

/// Graphique entièrement mis en page, prêt pour un moteur de rendu.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChartModel {
    pub title: String,
    pub width: f64,
    pub height: f64,
    pub plot: PlotArea,
    pub domain: DateSpan,
    pub today: TodayMarker,
    pub rows: Vec<VersionRow>,
    pub ticks: Vec<AxisTick>,
    pub legend: Vec<LegendEntry>,
}

/// Zone de tracé, en coordonnées canevas.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }
}

/// Étendue de dates couverte par l'axe horizontal, marges comprises.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Repère vertical de la date de référence.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TodayMarker {
    pub date: NaiveDate,
    pub x: f64,
}

/// Une ligne du graphique : la pastille de version et ses deux segments.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VersionRow {
    pub version: String,
    pub status: LifecycleStatus,
    pub label_color: String,
    pub y: f64,
    pub height: f64,
    pub segments: Vec<BarSegment>,
}

/// Un segment de barre horizontale.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BarSegment {
    pub phase: SupportPhase,
    pub x: f64,
    pub width: f64,
    pub color: String,
    pub opacity: f64,
}

/// Graduation de l'axe horizontal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AxisTick {
    pub date: NaiveDate,
    pub x: f64,
    pub label: String,
}

/// Entrée de légende.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LegendEntry {
    pub color: String,
    pub label: String,
}

/// Erreurs rencontrées en construisant ou en écrivant un graphique.
#[derive(Debug, thiserror::Error)]
pub enum ChartError {
    #[error("date invalide : {value}")]
    InvalidDate {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
    #[error("aucune version à tracer")]
    EmptyDataset,
    #[error("écriture du fichier impossible : {0}")]
    Io(#[from] std::io::Error),
}
