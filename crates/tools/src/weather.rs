//! Weather forecast tool — mock multi-day forecast with packing advice.

use async_trait::async_trait;
use chrono::{Duration, NaiveDate};
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::require_str;
use crate::mock::{Picker, seed, simulate_latency};

const CONDITIONS: [&str; 5] = ["Sunny", "Partly Cloudy", "Cloudy", "Light Rain", "Clear"];

pub struct WeatherForecastTool;

#[async_trait]
impl Tool for WeatherForecastTool {
    fn name(&self) -> &str {
        "get_weather_forecast"
    }

    fn description(&self) -> &str {
        "Get weather forecast for a destination city. Helps plan activities and packing."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name for weather forecast"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date in YYYY-MM-DD format"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in YYYY-MM-DD format"
                }
            },
            "required": ["city", "start_date", "end_date"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let city = require_str(&arguments, "city", self.name())?;
        let start_date = require_str(&arguments, "start_date", self.name())?;
        let end_date = require_str(&arguments, "end_date", self.name())?;

        let mut picker = Picker::new(seed(&[city, start_date, end_date]));
        simulate_latency(&mut picker).await;

        let start = NaiveDate::parse_from_str(start_date, "%Y-%m-%d").map_err(|e| {
            ToolError::InvalidArguments {
                tool_name: self.name().to_string(),
                reason: format!("Bad start_date: {e}"),
            }
        })?;
        let end = NaiveDate::parse_from_str(end_date, "%Y-%m-%d").map_err(|e| {
            ToolError::InvalidArguments {
                tool_name: self.name().to_string(),
                reason: format!("Bad end_date: {e}"),
            }
        })?;

        // Forecasts cap at a week out
        let days = ((end - start).num_days() + 1).clamp(1, 7);

        let mut forecast = Vec::with_capacity(days as usize);
        let mut high_sum: i64 = 0;
        for i in 0..days {
            let date = start + Duration::days(i);
            let high_f = picker.range(68, 93) as i64;
            let low_f = high_f - 10 - picker.range(0, 10) as i64;
            high_sum += high_f;

            forecast.push(json!({
                "date": date.format("%Y-%m-%d").to_string(),
                "condition": picker.pick(&CONDITIONS),
                "temp_high_f": high_f,
                "temp_low_f": low_f,
                "temp_high_c": (high_f - 32) * 5 / 9,
                "temp_low_c": (low_f - 32) * 5 / 9,
                "humidity": picker.range(40, 80),
                "uv_index": picker.range(3, 10),
                "precipitation_chance": picker.range(0, 40),
            }));
        }

        let avg_high = high_sum / days;
        let (packing, activities) = if avg_high > 75 {
            (
                "Pack light, breathable clothing. Sunscreen and sunglasses essential. Consider a hat for sun protection.",
                json!(["Beach", "Water sports", "Outdoor dining"]),
            )
        } else if avg_high > 60 {
            (
                "Pack layers for variable temperatures. Light jacket recommended for evenings.",
                json!(["Museums", "City tours", "Local cuisine"]),
            )
        } else {
            (
                "Pack warm layers and a good jacket. Consider waterproof footwear.",
                json!(["Museums", "City tours", "Local cuisine"]),
            )
        };

        Ok(json!({
            "success": true,
            "city": city,
            "period": format!("{start_date} to {end_date}"),
            "forecast": forecast,
            "packing_recommendation": packing,
            "best_activities": activities,
        }))
    }
}
