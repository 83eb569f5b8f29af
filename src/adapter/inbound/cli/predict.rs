//! Handler for `tokenpulse predict`.
//!
//! Drives a [`Dashboard`] through one cycle and renders the outcome: an
//! overview of every token plus the detailed forecast of the selected one.

use std::process::ExitCode;

use serde_json::json;
use tabled::{Table, Tabled};

use super::command::PredictArgs;
use super::output::{self, OutputConfig};
use crate::application::state::{CycleState, Dashboard};
use crate::domain::{TokenDataset, TokenId, TokenRecord};
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::predictor::build_predictor;

#[derive(Tabled)]
struct TokenRow {
    #[tabled(rename = "Token")]
    token: String,
    #[tabled(rename = "Symbol")]
    symbol: String,
    #[tabled(rename = "Current")]
    current: String,
    #[tabled(rename = "24h")]
    day: String,
    #[tabled(rename = "Sentiment")]
    sentiment: String,
}

#[derive(Tabled)]
struct ForecastLine {
    #[tabled(rename = "Horizon")]
    horizon: &'static str,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Change")]
    change: String,
}

/// Run one cycle and print it.
///
/// Returns a failing exit code when the cycle ends in `Failed`.
pub async fn execute(args: &PredictArgs) -> Result<ExitCode> {
    output::configure(OutputConfig { json: args.json });

    let mut config = Config::resolve(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }
    config.init_logging();

    let predictor = build_predictor(&config)?;
    let mut dashboard = Dashboard::new(predictor.tokens().to_vec())?;
    if let Some(token) = &args.token {
        dashboard.select(&TokenId::new(token.as_str()))?;
    }

    let state = dashboard.refresh(&predictor).await?.clone();
    match state {
        CycleState::Ready(dataset) => {
            if args.json {
                output::document(&dataset_json(&dataset, dashboard.selected())?);
            } else {
                render(&dataset, dashboard.selected());
            }
            Ok(ExitCode::SUCCESS)
        }
        CycleState::Failed { message, .. } => {
            output::error(&message);
            Ok(ExitCode::FAILURE)
        }
        other => {
            output::error(&format!("cycle ended while {}", other.name()));
            Ok(ExitCode::FAILURE)
        }
    }
}

fn dataset_json(dataset: &TokenDataset, selected: &TokenId) -> Result<serde_json::Value> {
    Ok(json!({
        "cycleId": dataset.cycle_id().as_str(),
        "generatedAt": dataset.generated_at().to_rfc3339(),
        "selected": selected.as_str(),
        "tokens": serde_json::to_value(dataset)?,
    }))
}

fn render(dataset: &TokenDataset, selected: &TokenId) {
    output::header(env!("CARGO_PKG_VERSION"));

    output::section("Tokens");
    output::table(&Table::new(token_rows(dataset)).to_string());

    let Some(record) = dataset.get(selected) else {
        output::warning(&format!("no record for {selected}"));
        return;
    };

    output::section(&format!("{} forecast", record.token().symbol()));
    output::table(&Table::new(forecast_lines(record)).to_string());
    let sentiment = record.sentiment();
    output::field("Sentiment", output::sentiment(sentiment.label(), sentiment.as_str()));
    output::field("Series", series_line(record));
    if let Some(last) = record.forecast().last() {
        output::field("Outlook", output::change(last.change_pct));
    }

    output::section("Cycle");
    output::field("Id", output::highlight(dataset.cycle_id()));
    output::field("Generated", dataset.generated_at().to_rfc3339());
    output::success(&format!("{} tokens predicted", dataset.len()));
}

fn token_rows(dataset: &TokenDataset) -> Vec<TokenRow> {
    dataset
        .iter()
        .map(|record| TokenRow {
            token: record.token().to_string(),
            symbol: record.token().symbol(),
            current: format!("${:.2}", record.current_price()),
            day: record
                .forecast()
                .last()
                .map(|row| format!("{:+.2}%", row.change_pct))
                .unwrap_or_default(),
            sentiment: record.sentiment().to_string(),
        })
        .collect()
}

fn forecast_lines(record: &TokenRecord) -> Vec<ForecastLine> {
    record
        .forecast()
        .map(|row| ForecastLine {
            horizon: row.horizon.long_label(),
            price: format!("${:.2}", row.price),
            change: format!("{:+.2}%", row.change_pct),
        })
        .collect()
}

fn series_line(record: &TokenRecord) -> String {
    record
        .series()
        .iter()
        .map(|(label, price)| format!("{label} ${price:.2}"))
        .collect::<Vec<_>>()
        .join(" → ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CycleId, DatasetBuilder, Predictions, Sentiment};

    fn dataset() -> TokenDataset {
        let mut builder = DatasetBuilder::new(CycleId::new(), 1);
        builder
            .insert(
                TokenRecord::try_new(
                    TokenId::new("aave"),
                    100.0,
                    Predictions::new([101.0, 99.5, 100.0, 110.0]),
                    Sentiment::parse("Bullish").unwrap(),
                )
                .unwrap(),
            )
            .unwrap();
        builder.finish()
    }

    #[test]
    fn forecast_lines_show_change_against_current_price() {
        let dataset = dataset();
        let record = dataset.get(&TokenId::new("aave")).unwrap();
        let lines = forecast_lines(record);

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0].price, "$101.00");
        assert_eq!(lines[0].change, "+1.00%");
        assert_eq!(lines[1].change, "-0.50%");
        assert_eq!(lines[3].change, "+10.00%");
    }

    #[test]
    fn token_rows_summarize_each_record() {
        let rows = token_rows(&dataset());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].symbol, "AAVE");
        assert_eq!(rows[0].current, "$100.00");
        assert_eq!(rows[0].day, "+10.00%");
        assert_eq!(rows[0].sentiment, "Bullish");
    }

    #[test]
    fn series_starts_at_current_price() {
        let dataset = dataset();
        let line = series_line(dataset.get(&TokenId::new("aave")).unwrap());
        assert!(line.starts_with("Now $100.00 → "), "{line}");
        assert!(line.ends_with("$110.00"), "{line}");
    }

    #[test]
    fn json_document_carries_cycle_and_tokens() {
        let dataset = dataset();
        let value = dataset_json(&dataset, &TokenId::new("aave")).unwrap();

        assert_eq!(value["selected"], "aave");
        assert_eq!(value["cycleId"], dataset.cycle_id().as_str());
        assert_eq!(value["tokens"]["aave"]["currentPrice"], 100.0);
        assert_eq!(value["tokens"]["aave"]["sentiment"], "Bullish");
    }
}
