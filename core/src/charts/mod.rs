pub mod adapter;
pub mod buckets;
pub mod series;

pub use adapter::ChartAdapter;
pub use buckets::ConfidenceBuckets;
pub use series::{ChartConfig, ChartId, ChartKind, ChartState, Dataset, Rgb};
