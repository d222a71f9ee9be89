//! CLI infrastructure for the exam balancer
//!
//! This module provides the command-line interface for training a policy,
//! evaluating and inspecting it, and asking it for recommendations.

pub mod commands;
pub mod config;
pub mod output;
