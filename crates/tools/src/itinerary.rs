//! Itinerary creation tool — assembles selections into a confirmed booking.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::require_str;
use crate::mock::{Picker, seed, simulate_latency};

pub struct CreateItineraryTool;

#[async_trait]
impl Tool for CreateItineraryTool {
    fn name(&self) -> &str {
        "create_itinerary"
    }

    fn description(&self) -> &str {
        "Create a complete travel itinerary with flights, hotels, and activities. Returns booking confirmation."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "traveler_name": {
                    "type": "string",
                    "description": "Name of the primary traveler"
                },
                "destination": {
                    "type": "string",
                    "description": "Trip destination"
                },
                "flight_ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Array of selected flight IDs"
                },
                "hotel_ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Array of selected hotel IDs"
                },
                "activity_ids": {
                    "type": "array",
                    "items": { "type": "string" },
                    "description": "Array of selected activity IDs"
                }
            },
            "required": ["traveler_name", "destination"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let traveler_name = require_str(&arguments, "traveler_name", self.name())?;
        let destination = require_str(&arguments, "destination", self.name())?;
        let count = |key: &str| arguments[key].as_array().map(Vec::len).unwrap_or(0);

        let mut picker = Picker::new(seed(&[traveler_name, destination]));
        simulate_latency(&mut picker).await;

        let itinerary_id = format!("ITN-{:06X}", picker.next() as u32 & 0xFF_FFFF);
        let pnr = format!("{:06X}", picker.next() as u32 & 0xFF_FFFF);

        Ok(json!({
            "success": true,
            "itinerary_id": itinerary_id,
            "pnr": pnr,
            "traveler_name": traveler_name,
            "destination": destination,
            "status": "CONFIRMED",
            "created_at": Utc::now().to_rfc3339(),
            "components": {
                "flights": count("flight_ids"),
                "hotels": count("hotel_ids"),
                "activities": count("activity_ids"),
            },
            "total_cost": 2500 + picker.range(0, 3000),
            "currency": "USD",
            "payment_status": "PENDING",
            "confirmation_email": "Sent to registered email",
            "next_steps": [
                "Complete payment within 24 hours",
                "Download your travel documents",
                "Check visa requirements",
                "Add travel insurance (recommended)",
            ],
            "support": {
                "phone": "+1-800-WAYFARER",
                "email": "support@wayfarer-ai.com",
                "live_chat": "Available 24/7",
            },
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn counts_components() {
        let tool = CreateItineraryTool;
        let result = tool
            .execute(json!({
                "traveler_name": "Ada Lovelace",
                "destination": "Dubai",
                "flight_ids": ["FL-1", "FL-2"],
                "hotel_ids": ["HTL-1"],
            }))
            .await
            .unwrap();

        assert_eq!(result["status"], "CONFIRMED");
        assert_eq!(result["components"]["flights"], 2);
        assert_eq!(result["components"]["hotels"], 1);
        assert_eq!(result["components"]["activities"], 0);
        assert!(result["itinerary_id"].as_str().unwrap().starts_with("ITN-"));
        assert_eq!(result["pnr"].as_str().unwrap().len(), 6);
    }

    #[tokio::test(start_paused = true)]
    async fn requires_traveler_name() {
        let tool = CreateItineraryTool;
        let err = tool
            .execute(json!({"destination": "Dubai"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }
}
