//! Exam stress balancer
//!
//! A tabular SARSA agent that learns how a student should split the days
//! before an exam between studying, revising and taking breaks.
//!
//! This crate provides:
//! - A simulated student environment with fatigue, stress, retention and
//!   exam urgency
//! - A fixed-threshold state discretizer
//! - The SARSA learner, its value table and a read-only frozen policy
//! - Training, simulation and evaluation pipelines with pluggable observers
//! - An advisor mapping coarse self-assessments onto recommendations
//! - Policy persistence and a command-line interface

pub mod adapters;
pub mod advisor;
pub mod app;
pub mod cli;
pub mod discretizer;
pub mod environment;
pub mod error;
pub mod export;
pub mod pipeline;
pub mod ports;
pub mod sarsa;

pub use advisor::{AdviceRequest, Advisor, Recommendation};
pub use discretizer::{DiscreteState, Level, discretize};
pub use environment::{Action, Difficulty, RawState, Step, StudentEnvironment};
pub use error::{Error, Result};
pub use sarsa::{FrozenPolicy, Hyperparameters, SarsaAgent, SavedPolicy, ValueTable};
