//! Roiscope: College Scorecard ROI Analysis Library
//!
//! A library for cleaning College Scorecard field-of-study data, deriving
//! return-on-investment metrics, and reducing multicollinearity in the
//! derived feature set via iterative VIF analysis.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
