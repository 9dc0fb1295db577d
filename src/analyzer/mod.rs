// Analyzer module: aggregates submodules for different aspects of analysis.

pub mod levels;
pub mod market_indicators;
pub mod phase;
pub mod price_analysis;

// Re-export the main Analyzer implementation for ease of use.
pub use market_indicators::{RsiProvider, RsiSettings};
pub use price_analysis::{Analyzer, IndicatorEngine};
