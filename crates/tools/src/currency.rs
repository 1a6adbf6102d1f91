//! Currency exchange tool — fixed rate table against a USD baseline.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::require_str;
use crate::mock::{Picker, seed, simulate_latency};

const RATES: [(&str, f64); 11] = [
    ("USD", 1.0),
    ("EUR", 0.92),
    ("GBP", 0.79),
    ("JPY", 149.50),
    ("AED", 3.67),
    ("SGD", 1.34),
    ("AUD", 1.53),
    ("CAD", 1.36),
    ("CHF", 0.88),
    ("INR", 83.12),
    ("THB", 35.50),
];

fn rate_for(code: &str) -> f64 {
    RATES
        .iter()
        .find(|(c, _)| *c == code)
        .map(|(_, r)| *r)
        .unwrap_or(1.0)
}

pub struct CurrencyExchangeTool;

#[async_trait]
impl Tool for CurrencyExchangeTool {
    fn name(&self) -> &str {
        "currency_exchange"
    }

    fn description(&self) -> &str {
        "Get currency exchange rates and convert amounts. Includes money-saving tips."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "from_currency": {
                    "type": "string",
                    "description": "Source currency code (e.g., \"USD\")"
                },
                "to_currency": {
                    "type": "string",
                    "description": "Target currency code (e.g., \"EUR\")"
                },
                "amount": {
                    "type": "number",
                    "description": "Amount to convert"
                }
            },
            "required": ["from_currency", "to_currency", "amount"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let from = require_str(&arguments, "from_currency", self.name())?;
        let to = require_str(&arguments, "to_currency", self.name())?;
        let amount = arguments["amount"]
            .as_f64()
            .ok_or_else(|| ToolError::InvalidArguments {
                tool_name: self.name().to_string(),
                reason: "Missing 'amount' argument".into(),
            })?;

        let mut picker = Picker::new(seed(&[from, to]));
        simulate_latency(&mut picker).await;

        let rate = rate_for(to) / rate_for(from);
        let converted = (amount * rate * 100.0).round() / 100.0;

        let tip = if amount > 1000.0 {
            "For amounts over $1000, consider using a travel debit card for better rates. Avoid airport currency exchanges."
        } else {
            "Use your credit card for purchases abroad - most offer competitive exchange rates with no foreign transaction fees."
        };

        Ok(json!({
            "success": true,
            "from_currency": from,
            "to_currency": to,
            "amount": amount,
            "rate": format!("{rate:.4}"),
            "converted_amount": converted,
            "last_updated": Utc::now().to_rfc3339(),
            "provider": "Wayfarer Exchange",
            "fee": "0% commission",
            "money_saving_tip": tip,
            "rate_trend": if picker.chance(50) {
                "Rate has improved 1.2% this week"
            } else {
                "Rate is stable this week"
            },
        }))
    }
}
