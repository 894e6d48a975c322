//! Arch Tradeoff - Structural trade-off analysis of candidate architectures
//!
//! This crate computes structural metrics over component graphs, selects the
//! Pareto-optimal architectures, synthesizes pairwise trade-off records and
//! drives the iterative refinement loop that enriches them.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
