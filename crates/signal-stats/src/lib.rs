//! Numeric building blocks for the Signal analytics crates.
//!
//! This crate provides the small set of statistical tools every derived
//! metric is built from:
//!
//! - **Safe aggregates**: means that tolerate empty and NaN-laden input
//! - **Clamping**: bounding scores into a closed range
//! - **Rolling averages**: trailing-window means with a one-observation minimum
//! - **Descriptive statistics**: min, max, mean, median, variance, standard deviation
//! - **Percentile ranks**: where a value falls within a population
//!
//! Missing observations are represented as `f64::NAN` throughout. No function
//! in this crate panics on empty input.
//!
//! # Modules
//!
//! - [`numeric`]: `safe_mean`, `clamp`, `rolling_average`
//! - [`descriptive`]: Descriptive statistics for summarizing datasets
//! - [`percentiles`]: Percentile rank of a value within a dataset
//!
//! # Examples
//!
//! ## Aggregating a series with gaps
//!
//! ```
//! use signal_stats::numeric::{rolling_average, safe_mean};
//!
//! assert_eq!(safe_mean([2.0, 4.0, f64::NAN]), 3.0);
//! assert_eq!(rolling_average(&[10.0, 20.0, 30.0], 2), vec![10.0, 15.0, 25.0]);
//! ```
//!
//! ## Computing descriptive statistics
//!
//! ```
//! use signal_stats::descriptive::DescriptiveStats;
//!
//! let stats = DescriptiveStats::new([1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
//! assert_eq!(stats.mean, 3.0);
//! ```

pub mod descriptive;
pub mod numeric;
pub mod percentiles;
