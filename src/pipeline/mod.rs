//! Training and evaluation pipeline abstractions
//!
//! This module provides composable pipelines for:
//! - Training learners over repeated exam periods
//! - Simulating and evaluating learned policies
//! - Recording observations during training

pub mod observers;
pub mod simulation;
pub mod training;

pub use observers::{
    JsonlObserver, LogObserver, MetricsObserver, MetricsSummary, Observation, ProgressObserver,
};
pub use simulation::{SimulationReport, evaluate, rollout, simulate};
pub use training::{RECENT_WINDOW, TrainingConfig, TrainingPipeline, TrainingResult};

pub use crate::ports::{Learner, Observer};
