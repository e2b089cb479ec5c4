//! scicalc - a scientific calculator for the terminal.
//!
//! The library side carries everything testable: the expression
//! evaluator, the reducer-style input state machine, the session history
//! and the advanced-mode engine that forwards free-form queries to a
//! remote multimodal completion service. The binary wires these to a
//! raw-mode terminal frontend.

pub mod advanced;
pub mod calculator;
pub mod cli;
pub mod config;
pub mod history;
pub mod state;
pub mod ui;

// Re-export the main public API
pub use calculator::{AngleUnit, CalcResult, EvalContext, evaluate_expression};
pub use history::{ComputationRecord, HistoryLog, RecordKind};
pub use state::{Action, AppState, reduce};
