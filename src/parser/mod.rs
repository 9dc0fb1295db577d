pub mod alphavantage_parser;

pub use alphavantage_parser::{AlphaVantageParser, Parser};
