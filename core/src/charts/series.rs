use crate::charts::buckets::BUCKET_LABELS;

/// Identifies one of the dashboard charts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ChartId {
    ClassDistribution,
    HourlyActivity,
    ConfidenceDistribution,
}

impl ChartId {
    pub const ALL: [ChartId; 3] = [
        ChartId::ClassDistribution,
        ChartId::HourlyActivity,
        ChartId::ConfidenceDistribution,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChartId::ClassDistribution => "classDistribution",
            ChartId::HourlyActivity => "hourlyActivity",
            ChartId::ConfidenceDistribution => "confidenceDistribution",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Doughnut,
    Line,
    Bar,
}

/// 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const fn from_hex(value: u32) -> Self {
        Rgb(
            ((value >> 16) & 0xff) as u8,
            ((value >> 8) & 0xff) as u8,
            (value & 0xff) as u8,
        )
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

const CLASS_PALETTE: [Rgb; 6] = [
    Rgb::from_hex(0xFF6384),
    Rgb::from_hex(0x36A2EB),
    Rgb::from_hex(0xFFCE56),
    Rgb::from_hex(0x4BC0C0),
    Rgb::from_hex(0x9966FF),
    Rgb::from_hex(0xFF9F40),
];

const HOURLY_LINE: Rgb = Rgb::from_hex(0x36A2EB);

const CONFIDENCE_PALETTE: [Rgb; 5] = [
    Rgb::from_hex(0xe74c3c),
    Rgb::from_hex(0xf39c12),
    Rgb::from_hex(0xf1c40f),
    Rgb::from_hex(0x2ecc71),
    Rgb::from_hex(0x27ae60),
];

/// A single data series and its styling.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub label: Option<String>,
    pub data: Vec<f64>,
    /// Per-point colors; a line chart uses the first entry as its stroke.
    pub colors: Vec<Rgb>,
    pub fill: bool,
    pub tension: f32,
}

/// Fixed visual setup of a chart, applied once at creation.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub title: &'static str,
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub labels: Vec<String>,
    pub dataset: Dataset,
}

impl ChartConfig {
    pub fn for_chart(id: ChartId) -> Self {
        match id {
            ChartId::ClassDistribution => Self {
                kind: ChartKind::Doughnut,
                title: "Classifications by class",
                responsive: true,
                maintain_aspect_ratio: false,
                labels: Vec::new(),
                dataset: Dataset {
                    label: None,
                    data: Vec::new(),
                    colors: CLASS_PALETTE.to_vec(),
                    fill: false,
                    tension: 0.0,
                },
            },
            ChartId::HourlyActivity => Self {
                kind: ChartKind::Line,
                title: "Hourly activity",
                responsive: true,
                maintain_aspect_ratio: false,
                labels: Vec::new(),
                dataset: Dataset {
                    label: Some("Classifications per hour".into()),
                    data: Vec::new(),
                    colors: vec![HOURLY_LINE],
                    fill: true,
                    tension: 0.4,
                },
            },
            ChartId::ConfidenceDistribution => Self {
                kind: ChartKind::Bar,
                title: "Confidence distribution",
                responsive: true,
                maintain_aspect_ratio: false,
                labels: BUCKET_LABELS.iter().map(|label| label.to_string()).collect(),
                dataset: Dataset {
                    label: None,
                    data: vec![0.0; BUCKET_LABELS.len()],
                    colors: CONFIDENCE_PALETTE.to_vec(),
                    fill: false,
                    tension: 0.0,
                },
            },
        }
    }
}

/// Mutable series of one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartState {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

impl ChartState {
    pub fn new(config: &ChartConfig) -> Self {
        Self {
            kind: config.kind,
            labels: config.labels.clone(),
            datasets: vec![config.dataset.clone()],
        }
    }

    /// Data of the primary dataset.
    pub fn values(&self) -> &[f64] {
        self.datasets
            .first()
            .map(|dataset| dataset.data.as_slice())
            .unwrap_or(&[])
    }

    pub(crate) fn replace(&mut self, labels: Option<Vec<String>>, data: Vec<f64>) {
        if let Some(labels) = labels {
            self.labels = labels;
        }
        if let Some(dataset) = self.datasets.first_mut() {
            dataset.data = data;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trips_palette_entries() {
        assert_eq!(Rgb::from_hex(0x36A2EB), Rgb(0x36, 0xA2, 0xEB));
        assert_eq!(Rgb(0xe7, 0x4c, 0x3c).to_hex(), "#e74c3c");
    }

    #[test]
    fn confidence_chart_is_seeded_with_five_empty_buckets() {
        let state = ChartState::new(&ChartConfig::for_chart(ChartId::ConfidenceDistribution));
        assert_eq!(state.kind, ChartKind::Bar);
        assert_eq!(state.labels.len(), 5);
        assert_eq!(state.values(), &[0.0; 5]);
    }
}
