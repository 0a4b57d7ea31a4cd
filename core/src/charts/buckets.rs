use crate::model::ClassificationRecord;

pub const BUCKET_COUNT: usize = 5;

pub const BUCKET_LABELS: [&str; BUCKET_COUNT] = ["0-20%", "20-40%", "40-60%", "60-80%", "80-100%"];

const UPPER_BOUNDS: [f64; BUCKET_COUNT - 1] = [0.2, 0.4, 0.6, 0.8];

/// Fixed-width confidence bins over `[0, 1]` with inclusive upper bounds.
pub struct ConfidenceBuckets;

impl ConfidenceBuckets {
    /// Bin index for `confidence`. Boundaries belong to the lower bin; values
    /// above 0.8 (including out-of-range ones) land in the last bin.
    pub fn index_of(confidence: f64) -> usize {
        UPPER_BOUNDS
            .iter()
            .position(|&bound| confidence <= bound)
            .unwrap_or(BUCKET_COUNT - 1)
    }

    pub fn histogram(records: &[ClassificationRecord]) -> [u64; BUCKET_COUNT] {
        let mut counts = [0u64; BUCKET_COUNT];
        for record in records {
            counts[Self::index_of(record.confidence)] += 1;
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(values: &[f64]) -> Vec<ClassificationRecord> {
        values
            .iter()
            .map(|&confidence| ClassificationRecord::new("A", confidence, ""))
            .collect()
    }

    #[test]
    fn boundaries_fall_in_lower_bucket() {
        assert_eq!(ConfidenceBuckets::index_of(0.0), 0);
        assert_eq!(ConfidenceBuckets::index_of(0.2), 0);
        assert_eq!(ConfidenceBuckets::index_of(0.4), 1);
        assert_eq!(ConfidenceBuckets::index_of(0.6), 2);
        assert_eq!(ConfidenceBuckets::index_of(0.8), 3);
        assert_eq!(ConfidenceBuckets::index_of(0.8000001), 4);
        assert_eq!(ConfidenceBuckets::index_of(1.0), 4);
    }

    #[test]
    fn every_unit_value_maps_to_one_bucket() {
        for step in 0..=1000 {
            let value = step as f64 / 1000.0;
            assert!(ConfidenceBuckets::index_of(value) < BUCKET_COUNT);
        }
    }

    #[test]
    fn histogram_counts_sample() {
        assert_eq!(
            ConfidenceBuckets::histogram(&records(&[0.2, 0.55, 0.81])),
            [1, 0, 1, 0, 1]
        );
        assert_eq!(ConfidenceBuckets::histogram(&[]), [0; BUCKET_COUNT]);
    }
}
