// File: crates/chart-core/src/data.rs
// Summary: Usage data model (age groups, samples, per-app series) and CSV loading.

use std::fmt;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use skia_safe as skia;

use crate::error::{ChartError, Result};
use crate::theme::Palette;

/// The five fixed ordinal age bins, in ascending order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgeGroup {
    From16To20,
    From21To25,
    From26To30,
    From31To35,
    From36To40,
}

impl AgeGroup {
    pub const ALL: [AgeGroup; 5] = [
        AgeGroup::From16To20,
        AgeGroup::From21To25,
        AgeGroup::From26To30,
        AgeGroup::From31To35,
        AgeGroup::From36To40,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AgeGroup::From16To20 => "16 - 20",
            AgeGroup::From21To25 => "21 - 25",
            AgeGroup::From26To30 => "26 - 30",
            AgeGroup::From31To35 => "31 - 35",
            AgeGroup::From36To40 => "36 - 40",
        }
    }

    /// Marker radius at rest; older groups get larger markers.
    pub fn marker_radius(self) -> f64 {
        match self {
            AgeGroup::From16To20 => 4.0,
            AgeGroup::From21To25 => 6.0,
            AgeGroup::From26To30 => 8.0,
            AgeGroup::From31To35 => 9.0,
            AgeGroup::From36To40 => 10.0,
        }
    }

    /// Parse a label such as `"16 - 20"`; spacing around the dash is ignored.
    pub fn from_label(label: &str) -> Option<Self> {
        let compact: String = label.chars().filter(|c| !c.is_whitespace()).collect();
        Self::ALL
            .into_iter()
            .find(|g| g.label().replace(' ', "") == compact)
    }
}

impl fmt::Display for AgeGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// One (app, age group) observation. Percentages are expected in [0, 100].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Sample {
    pub age_group: AgeGroup,
    pub men: f64,
    pub women: f64,
}

/// Index of a series within its dataset; also the handle used by the chart state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SeriesId(pub usize);

#[derive(Clone, Debug)]
pub struct UsageSeries {
    pub name: String,
    pub color: skia::Color,
    /// Ordered by age group ascending.
    pub samples: Vec<Sample>,
}

/// All series loaded from one source, in order of first appearance.
#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub series: Vec<UsageSeries>,
}

#[derive(Debug, Deserialize)]
struct UsageRecord {
    social_media_app: String,
    age_group: String,
    men_percent: String,
    women_percent: String,
}

const COLUMNS: [&str; 4] = ["social_media_app", "age_group", "men_percent", "women_percent"];

impl Dataset {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| ChartError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let dataset = Self::from_reader(file)?;
        log::info!(
            "loaded {} series ({} samples) from {}",
            dataset.series.len(),
            dataset.sample_count(),
            path.display()
        );
        Ok(dataset)
    }

    /// Parse CSV with columns `social_media_app, age_group, men_percent, women_percent`.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let headers = rdr.headers()?.clone();
        for column in COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(ChartError::MissingColumn(column));
            }
        }

        let mut palette = Palette::apps();
        let mut dataset = Dataset::default();

        for rec in rdr.records() {
            let rec = rec?;
            let row = rec.position().map(|p| p.line() as usize).unwrap_or(0);
            let record: UsageRecord = rec.deserialize(Some(&headers))?;

            let age_group = AgeGroup::from_label(&record.age_group).ok_or_else(|| {
                ChartError::UnknownAgeGroup { row, label: record.age_group.clone() }
            })?;
            let sample = Sample {
                age_group,
                men: parse_percent(row, "men_percent", &record.men_percent)?,
                women: parse_percent(row, "women_percent", &record.women_percent)?,
            };

            match dataset.series.iter_mut().find(|s| s.name == record.social_media_app) {
                Some(series) => series.samples.push(sample),
                None => {
                    let color = palette.color_for(&record.social_media_app);
                    dataset.series.push(UsageSeries {
                        name: record.social_media_app,
                        color,
                        samples: vec![sample],
                    });
                }
            }
        }

        if dataset.series.is_empty() {
            return Err(ChartError::EmptyDataset);
        }
        for series in &mut dataset.series {
            series.samples.sort_by_key(|s| s.age_group);
        }
        Ok(dataset)
    }

    pub fn sample_count(&self) -> usize {
        self.series.iter().map(|s| s.samples.len()).sum()
    }

    pub fn get(&self, id: SeriesId) -> Option<&UsageSeries> {
        self.series.get(id.0)
    }

    pub fn ids(&self) -> impl Iterator<Item = SeriesId> {
        (0..self.series.len()).map(SeriesId)
    }
}

fn parse_percent(row: usize, column: &'static str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ChartError::InvalidPercentage { row, column, value: raw.to_string() })
}
