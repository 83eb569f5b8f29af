//! Chat messages sent to the inference service.

use crate::domain::{Horizon, TokenId};
use crate::port::outbound::llm::ChatMessage;

const PRICE_ANALYST: &str =
    "You are a financial analyst specializing in cryptocurrency price predictions.";

const SENTIMENT_ANALYST: &str =
    "You are a financial analyst specializing in cryptocurrency market sentiment.";

/// Ask for one comma-separated price per horizon, given the current price.
#[must_use]
pub fn prediction_messages(token: &TokenId, current_price: f64) -> Vec<ChatMessage> {
    let labels = Horizon::ALL.map(Horizon::long_label);
    let last = Horizon::COUNT - 1;
    let horizon_list = format!("{}, and {}", labels[..last].join(", "), labels[last]);

    vec![
        ChatMessage::system(PRICE_ANALYST),
        ChatMessage::user(format!(
            "Given the current price of {symbol} is ${current_price:.2}, predict the price for \
             {horizon_list} from now. Respond with only the {count} predicted prices, separated by commas.",
            symbol = token.symbol(),
            count = Horizon::COUNT,
        )),
    ]
}

/// Ask for a single sentiment word.
#[must_use]
pub fn sentiment_messages(token: &TokenId) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(SENTIMENT_ANALYST),
        ChatMessage::user(format!(
            "What is the current market sentiment for {}? Respond with only one word: Bearish, Neutral, or Bullish.",
            token.symbol()
        )),
    ]
}
