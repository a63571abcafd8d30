//! Reshaping operations: wide/long conversion, pivoting, gap filling,
//! and histograms.

mod bins;
mod denormalize;
mod homogenize;
mod normalize;
mod pivot;

pub use homogenize::DefaultRow;
pub use pivot::PivotOptions;
