//! Resumen - one-shot exploratory analysis of small tabular datasets
//!
//! This library provides the stages of a fixed descriptive-statistics
//! pipeline: dataset loading, categorical recoding, grouped aggregates, a
//! correlation matrix, static charts, an OLS fit with appended predictions,
//! two classical hypothesis tests, and a delimited-text export. The stages
//! are independently usable; [`pipeline::run`] composes them in order over
//! a single [`table::Table`].

pub mod chart;
pub mod cli;
pub mod correlate;
pub mod dataset;
pub mod error;
pub mod export;
pub mod hypothesis;
pub mod json_output;
pub mod model;
pub mod pipeline;
pub mod recode;
pub mod report;
pub mod summary;
pub mod table;
