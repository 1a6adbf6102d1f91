//! Hotel search tool — mock inventory across luxury chains.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::{opt_u64, require_str};
use crate::mock::{Picker, seed, simulate_latency};

const HOTEL_CHAINS: [&str; 10] = [
    "The Ritz-Carlton",
    "Four Seasons",
    "Mandarin Oriental",
    "St. Regis",
    "Park Hyatt",
    "Waldorf Astoria",
    "Aman",
    "Belmond",
    "Rosewood",
    "Peninsula",
];

const NEIGHBORHOODS: [&str; 5] = [
    "Downtown",
    "City Center",
    "Waterfront",
    "Historic District",
    "Business District",
];

pub struct SearchHotelsTool;

#[async_trait]
impl Tool for SearchHotelsTool {
    fn name(&self) -> &str {
        "search_hotels"
    }

    fn description(&self) -> &str {
        "Search for available hotels in a city. Returns hotel options with prices, ratings, and amenities."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "City name to search hotels in"
                },
                "check_in": {
                    "type": "string",
                    "description": "Check-in date in YYYY-MM-DD format"
                },
                "check_out": {
                    "type": "string",
                    "description": "Check-out date in YYYY-MM-DD format"
                },
                "guests": {
                    "type": "number",
                    "description": "Number of guests (default: 2)"
                },
                "star_rating": {
                    "type": "number",
                    "description": "Minimum star rating (1-5)"
                }
            },
            "required": ["city", "check_in", "check_out"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let city = require_str(&arguments, "city", self.name())?;
        let check_in = require_str(&arguments, "check_in", self.name())?;
        let check_out = require_str(&arguments, "check_out", self.name())?;
        let guests = opt_u64(&arguments, "guests", 2);
        let star_rating = opt_u64(&arguments, "star_rating", 4).clamp(1, 5);

        let mut picker = Picker::new(seed(&[city, check_in, check_out]));
        simulate_latency(&mut picker).await;

        let nights = stay_nights(check_in, check_out);

        let mut hotels = Vec::with_capacity(3);
        for _ in 0..3 {
            let chain = *picker.pick(&HOTEL_CHAINS);
            let stars = (star_rating + picker.range(0, 2)).min(5);
            let price_per_night = 150 + stars * 80 + picker.range(0, 200);

            hotels.push(json!({
                "hotel_id": picker.short_id("HTL"),
                "name": format!("{chain} {city}"),
                "chain": chain,
                "stars": stars,
                "location": format!("{}, {city}", picker.pick(&NEIGHBORHOODS)),
                "check_in": check_in,
                "check_out": check_out,
                "nights": nights,
                "price_per_night": price_per_night,
                "total_price": price_per_night * nights,
                "currency": "USD",
                "rating": format!("{:.1}", 4.2 + picker.range(0, 8) as f64 / 10.0),
                "reviews_count": picker.range(500, 2500),
                "amenities": ["Free Wi-Fi", "Pool", "Spa", "Fitness Center", "Restaurant", "Room Service", "Concierge"],
                "room_type": if guests > 2 { "Suite" } else { "Deluxe Room" },
                "cancellation": "Free cancellation until 24h before check-in",
            }));
        }

        hotels.sort_by_key(|h| h["total_price"].as_u64().unwrap_or(u64::MAX));

        Ok(json!({
            "success": true,
            "search_id": picker.short_id("SRCH"),
            "city": city,
            "check_in": check_in,
            "check_out": check_out,
            "guests": guests,
            "nights": nights,
            "results_count": hotels.len(),
            "hotels": hotels,
        }))
    }
}

/// Length of stay in nights, at least one even for malformed dates.
fn stay_nights(check_in: &str, check_out: &str) -> u64 {
    let parsed = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok();
    match (parsed(check_in), parsed(check_out)) {
        (Some(start), Some(end)) => (end - start).num_days().max(1) as u64,
        _ => 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn computes_nights_and_total() {
        let tool = SearchHotelsTool;
        let result = tool
            .execute(json!({
                "city": "Dubai",
                "check_in": "2025-06-01",
                "check_out": "2025-06-05"
            }))
            .await
            .unwrap();

        assert_eq!(result["nights"], 4);
        for hotel in result["hotels"].as_array().unwrap() {
            let per_night = hotel["price_per_night"].as_u64().unwrap();
            assert_eq!(hotel["total_price"].as_u64().unwrap(), per_night * 4);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn large_party_gets_suite() {
        let tool = SearchHotelsTool;
        let result = tool
            .execute(json!({
                "city": "Tokyo",
                "check_in": "2025-06-01",
                "check_out": "2025-06-03",
                "guests": 4
            }))
            .await
            .unwrap();
        assert_eq!(result["hotels"][0]["room_type"], "Suite");
    }

    #[test]
    fn malformed_dates_fall_back_to_one_night() {
        assert_eq!(stay_nights("soon", "later"), 1);
        assert_eq!(stay_nights("2025-06-05", "2025-06-01"), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn sorted_cheapest_first() {
        let tool = SearchHotelsTool;
        let result = tool
            .execute(json!({
                "city": "Paris",
                "check_in": "2025-09-10",
                "check_out": "2025-09-14"
            }))
            .await
            .unwrap();
        let totals: Vec<u64> = result["hotels"]
            .as_array()
            .unwrap()
            .iter()
            .map(|h| h["total_price"].as_u64().unwrap())
            .collect();
        assert!(totals.windows(2).all(|w| w[0] <= w[1]));
    }
}
