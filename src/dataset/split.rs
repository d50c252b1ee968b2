//! Contiguous train/validation/test partitioning by ratio.
//!
//! Split points truncate `len * ratio` towards zero, so for some lengths
//! the same ratios give slices that differ by one element from a rounded
//! split. That behaviour is kept as is.

use super::DatasetError;

/// Train/validation/test ratios used when the caller has no preference.
pub const DEFAULT_SPLIT_RATIO: [f64; 3] = [0.8, 0.1, 0.1];

/// The three contiguous partitions of a dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSplit<T> {
    pub train: Vec<T>,
    pub validation: Vec<T>,
    pub test: Vec<T>,
}

/// Split `data` into contiguous train, validation and test slices.
///
/// `ratio` is `[train, validation, test]`. The ratios, summed left to
/// right, must equal exactly `1.0`; otherwise nothing is sliced and
/// `DatasetError::RatioSum` is returned.
pub fn split_train_val_test<T>(
    mut data: Vec<T>,
    ratio: [f64; 3],
) -> Result<DatasetSplit<T>, DatasetError> {
    if let Some(bad) = ratio.iter().copied().find(|r| !r.is_finite() || *r < 0.0) {
        return Err(DatasetError::InvalidRatio(bad));
    }

    let [train_r, val_r, test_r] = ratio;
    let sum = train_r + val_r + test_r;
    if sum != 1.0 {
        return Err(DatasetError::RatioSum { sum });
    }

    let len = data.len();
    let train_end = ((len as f64 * train_r) as usize).min(len);
    let val_end = ((len as f64 * (train_r + val_r)) as usize).clamp(train_end, len);

    let test = data.split_off(val_end);
    let validation = data.split_off(train_end);
    let train = data;

    tracing::debug!(
        train = train.len(),
        validation = validation.len(),
        test = test.len(),
        "Dataset split"
    );

    Ok(DatasetSplit {
        train,
        validation,
        test,
    })
}
