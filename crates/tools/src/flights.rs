//! Flight search tool — returns mock flight inventory.
//!
//! Results are seeded from the search parameters so the same query
//! always yields the same three options, cheapest first.

use async_trait::async_trait;
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::{opt_str, opt_u64, require_str};
use crate::mock::{Picker, clock_time, seed, simulate_latency};

const AIRLINES: [(&str, &str); 10] = [
    ("Emirates", "EK"),
    ("Singapore Airlines", "SQ"),
    ("Qatar Airways", "QR"),
    ("Lufthansa", "LH"),
    ("British Airways", "BA"),
    ("Delta", "DL"),
    ("United", "UA"),
    ("JAL", "JL"),
    ("ANA", "NH"),
    ("Air France", "AF"),
];

pub struct SearchFlightsTool;

#[async_trait]
impl Tool for SearchFlightsTool {
    fn name(&self) -> &str {
        "search_flights"
    }

    fn description(&self) -> &str {
        "Search for available flights between two cities. Returns flight options with prices, times, and availability."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "origin": {
                    "type": "string",
                    "description": "Origin airport code or city (e.g., \"NYC\", \"JFK\", \"New York\")"
                },
                "destination": {
                    "type": "string",
                    "description": "Destination airport code or city (e.g., \"DXB\", \"Dubai\")"
                },
                "date": {
                    "type": "string",
                    "description": "Departure date in YYYY-MM-DD format"
                },
                "passengers": {
                    "type": "number",
                    "description": "Number of passengers (default: 1)"
                },
                "cabin_class": {
                    "type": "string",
                    "enum": ["economy", "business", "first"],
                    "description": "Cabin class preference"
                }
            },
            "required": ["origin", "destination", "date"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let origin = require_str(&arguments, "origin", self.name())?;
        let destination = require_str(&arguments, "destination", self.name())?;
        let date = require_str(&arguments, "date", self.name())?;
        let passengers = opt_u64(&arguments, "passengers", 1);
        let cabin_class = opt_str(&arguments, "cabin_class", "economy");

        let mut picker = Picker::new(seed(&[origin, destination, date, cabin_class]));
        simulate_latency(&mut picker).await;

        let base_price: u64 = match cabin_class {
            "business" => 2500,
            "first" => 8000,
            _ => 450,
        };

        let mut flights = Vec::with_capacity(3);
        for _ in 0..3 {
            let (airline, code) = *picker.pick(&AIRLINES);
            let depart = clock_time(&mut picker);
            let duration_hours = picker.range(2, 16);
            let stops = if picker.chance(40) { picker.range(1, 3) } else { 0 };

            let depart_hour: u64 = depart[..2].parse().unwrap_or(0);
            let arrival = format!("{:02}:{}", (depart_hour + duration_hours) % 24, &depart[3..]);

            flights.push(json!({
                "flight_id": picker.short_id("FL"),
                "airline": airline,
                "flight_number": format!("{code}{}", picker.range(100, 1000)),
                "origin": origin,
                "destination": destination,
                "date": date,
                "departure_time": depart,
                "arrival_time": arrival,
                "duration": format!("{duration_hours}h {}m", picker.range(0, 60)),
                "stops": match stops {
                    0 => "Non-stop".to_string(),
                    1 => "1 stop".to_string(),
                    n => format!("{n} stops"),
                },
                "cabin_class": capitalize(cabin_class),
                "price": (base_price + picker.range(0, base_price / 2 + 1)) * passengers,
                "currency": "USD",
                "seats_left": picker.range(2, 10),
                "amenities": if cabin_class == "economy" {
                    json!(["Wi-Fi", "Entertainment"])
                } else {
                    json!(["Lie-flat seat", "Lounge access", "Priority boarding", "Wi-Fi", "Gourmet dining"])
                },
            }));
        }

        flights.sort_by_key(|f| f["price"].as_u64().unwrap_or(u64::MAX));

        Ok(json!({
            "success": true,
            "search_id": picker.short_id("SRCH"),
            "route": format!("{origin} → {destination}"),
            "date": date,
            "passengers": passengers,
            "cabin_class": cabin_class,
            "results_count": flights.len(),
            "flights": flights,
        }))
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn returns_three_flights_sorted_by_price() {
        let tool = SearchFlightsTool;
        let result = tool
            .execute(json!({"origin": "NYC", "destination": "DXB", "date": "2025-06-01"}))
            .await
            .unwrap();

        assert_eq!(result["success"], true);
        assert_eq!(result["results_count"], 3);
        let flights = result["flights"].as_array().unwrap();
        let prices: Vec<u64> = flights.iter().map(|f| f["price"].as_u64().unwrap()).collect();
        assert!(prices.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(result["route"], "NYC → DXB");
    }

    #[tokio::test(start_paused = true)]
    async fn deterministic_for_same_query() {
        let tool = SearchFlightsTool;
        let args = json!({"origin": "LHR", "destination": "SIN", "date": "2025-07-10"});
        let r1 = tool.execute(args.clone()).await.unwrap();
        let r2 = tool.execute(args).await.unwrap();
        assert_eq!(r1, r2);
    }

    #[tokio::test(start_paused = true)]
    async fn business_class_costs_more() {
        let tool = SearchFlightsTool;
        let result = tool
            .execute(json!({
                "origin": "NYC", "destination": "DXB", "date": "2025-06-01",
                "cabin_class": "business"
            }))
            .await
            .unwrap();
        for flight in result["flights"].as_array().unwrap() {
            assert!(flight["price"].as_u64().unwrap() >= 2500);
            assert_eq!(flight["cabin_class"], "Business");
        }
    }

    #[tokio::test(start_paused = true)]
    async fn missing_destination_is_rejected() {
        let tool = SearchFlightsTool;
        let err = tool
            .execute(json!({"origin": "NYC", "date": "2025-06-01"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ToolError::InvalidArguments { .. }));
    }

    #[test]
    fn definition_carries_schema() {
        let def = SearchFlightsTool.to_definition();
        assert_eq!(def.name, "search_flights");
        assert_eq!(def.parameters["required"][0], "origin");
    }
}
