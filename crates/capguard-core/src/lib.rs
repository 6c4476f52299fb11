pub mod allocation;
pub mod error;
pub mod payoff;
pub mod scenario;
pub mod strategy;
pub mod types;

pub use allocation::{compute_allocation, AllocationResult, StrategyParameters};
pub use error::StrategyError;
pub use payoff::evaluate_payoff;
pub use scenario::{build_scenario_table, ScenarioRow, ScenarioTable};
pub use strategy::{evaluate_strategy, StrategyOutput};
pub use types::*;

/// Standard result type for all capguard operations
pub type StrategyResult<T> = Result<T, StrategyError>;
