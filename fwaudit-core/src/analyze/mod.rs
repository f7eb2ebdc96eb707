//! Rule set analysis.

pub mod conflict;
pub mod engine;

pub use conflict::{ClaimKey, ClaimTable};
pub use engine::{analyze_rules, analyze_scope, analyze_scopes};
