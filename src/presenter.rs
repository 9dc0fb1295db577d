// Rendering of analysis results for the console
use crate::model::AnalysisResult;
use crate::utils::format_thousands;
use serde::Deserialize;
use std::fmt::Write;

pub trait ResultPresenter: Send + Sync {
    fn render(&self, result: &AnalysisResult) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl OutputFormat {
    pub fn presenter(self) -> Box<dyn ResultPresenter> {
        match self {
            OutputFormat::Text => Box::new(TextPresenter),
            OutputFormat::Json => Box::new(JsonPresenter),
        }
    }
}

/// Human-readable report, one field per line.
pub struct TextPresenter;

impl ResultPresenter for TextPresenter {
    fn render(&self, r: &AnalysisResult) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = writeln!(out, "Symbol: {} (as of {})", r.symbol, r.as_of);
        let _ = writeln!(out, "Current Price: {:.2}", r.current_price);
        let _ = writeln!(out, "Last Close Price: {:.2}", r.last_close);
        let _ = writeln!(
            out,
            "Price Change from Buy Point: {:.2} ({:.2}%)",
            r.price_change, r.price_change_percent
        );
        let _ = writeln!(out, "Last Volume: {}", format_thousands(r.last_volume));
        let _ = writeln!(out, "Today's High: {:.2}", r.high);
        let _ = writeln!(out, "Today's Low: {:.2}", r.low);
        let _ = writeln!(out, "Recommended Buy Limit: {:.2}", r.buy_limit);
        let _ = writeln!(out, "Recommended Stop Limit: {:.2}", r.stop_limit);
        let _ = writeln!(out, "Relative Strength Index (RSI): {:.2}", r.rsi);
        let _ = writeln!(out, "Fibonacci Retracement Levels:");
        let _ = writeln!(out, "  Level 0%: {:.2}", r.low);
        let _ = writeln!(out, "  Level 23.6%: {:.2}", r.fibonacci.level_23_6);
        let _ = writeln!(out, "  Level 38.2%: {:.2}", r.fibonacci.level_38_2);
        let _ = writeln!(out, "  Level 50%: {:.2}", r.fibonacci.level_50_0);
        let _ = writeln!(out, "  Level 61.8%: {:.2}", r.fibonacci.level_61_8);
        let _ = writeln!(out, "  Level 100%: {:.2}", r.high);
        let _ = write!(out, "Wyckoff Volume Analysis: {}", r.phase);
        out
    }
}

/// Pretty-printed JSON of the whole result.
pub struct JsonPresenter;

impl ResultPresenter for JsonPresenter {
    fn render(&self, result: &AnalysisResult) -> String {
        serde_json::to_string_pretty(result)
            .unwrap_or_else(|e| format!("{{\"error\":\"cannot serialize result: {e}\"}}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Phase, PriceLevels};
    use crate::series::tests::at;

    fn sample() -> AnalysisResult {
        AnalysisResult {
            symbol: "DJT".into(),
            as_of: at(25),
            current_price: 34.05,
            last_close: 34.05,
            price_change: 1.7025,
            price_change_percent: 5.2632,
            last_volume: 41_230.0,
            high: 34.1,
            low: 33.51,
            buy_limit: 32.3475,
            stop_limit: 30.6,
            rsi: 50.0,
            fibonacci: PriceLevels {
                level_23_6: 33.96,
                level_38_2: 33.87,
                level_50_0: 33.805,
                level_61_8: 33.74,
            },
            phase: Phase::Accumulation,
        }
    }

    #[test]
    fn text_report_lists_every_field() {
        let text = TextPresenter.render(&sample());
        for expected in [
            "Symbol: DJT",
            "Current Price: 34.05",
            "Price Change from Buy Point: 1.70 (5.26%)",
            "Last Volume: 41K",
            "Today's High: 34.10",
            "Today's Low: 33.51",
            "Recommended Buy Limit: 32.35",
            "Recommended Stop Limit: 30.60",
            "Relative Strength Index (RSI): 50.00",
            "Level 0%: 33.51",
            "Level 61.8%: 33.74",
            "Level 100%: 34.10",
            "Wyckoff Volume Analysis: Accumulation Phase Detected (Price up with high volume)",
        ] {
            assert!(text.contains(expected), "missing {expected:?} in\n{text}");
        }
    }

    #[test]
    fn json_report_round_trips_key_fields() {
        let json = JsonPresenter.render(&sample());
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["symbol"], "DJT");
        assert_eq!(value["phase"], "accumulation");
        assert_eq!(value["fibonacci"]["level_50_0"], 33.805);
        assert_eq!(value["as_of"], "2024-10-11T09:55:00");
    }

    #[test]
    fn output_format_deserializes() {
        let format: OutputFormat = serde_json::from_str("\"json\"").unwrap();
        assert_eq!(format, OutputFormat::Json);
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }
}
