//! Black hole route planner CLI library.
//!
//! This crate provides output formatting shared by the `bhroute` command
//! handlers.

pub mod output;
