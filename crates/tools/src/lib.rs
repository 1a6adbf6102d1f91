//! Built-in travel tools for Wayfarer.
//!
//! Each tool simulates a real travel service (flight/hotel/activity
//! search, weather, visas, currency, itinerary booking) with seeded
//! mock data and realistic latency, so the orchestration loop can be
//! exercised end-to-end without upstream accounts or network access.

pub mod activities;
pub mod currency;
pub mod flights;
pub mod hotels;
pub mod itinerary;
pub mod mock;
pub mod visa;
pub mod weather;

mod args;

use wayfarer_core::error::ToolError;
use wayfarer_core::tool::ToolRegistry;

pub use activities::SearchActivitiesTool;
pub use currency::CurrencyExchangeTool;
pub use flights::SearchFlightsTool;
pub use hotels::SearchHotelsTool;
pub use itinerary::CreateItineraryTool;
pub use visa::VisaRequirementsTool;
pub use weather::WeatherForecastTool;

/// Create a registry with the full travel tool catalog, in the order
/// the concierge presents them to the model.
pub fn default_registry() -> Result<ToolRegistry, ToolError> {
    let mut registry = ToolRegistry::new();
    registry.register(Box::new(SearchFlightsTool))?;
    registry.register(Box::new(SearchHotelsTool))?;
    registry.register(Box::new(WeatherForecastTool))?;
    registry.register(Box::new(SearchActivitiesTool))?;
    registry.register(Box::new(CreateItineraryTool))?;
    registry.register(Box::new(VisaRequirementsTool))?;
    registry.register(Box::new(CurrencyExchangeTool))?;
    Ok(registry)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_has_expected_catalog() {
        let registry = default_registry().unwrap();
        assert_eq!(
            registry.names(),
            vec![
                "search_flights",
                "search_hotels",
                "get_weather_forecast",
                "search_activities",
                "create_itinerary",
                "get_visa_requirements",
                "currency_exchange",
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn registry_dispatch_reaches_tools() {
        let registry = default_registry().unwrap();
        let result = registry
            .invoke(
                "currency_exchange",
                serde_json::json!({"from_currency": "USD", "to_currency": "EUR", "amount": 10}),
            )
            .await
            .unwrap();
        assert_eq!(result["success"], true);
        let usage = registry.usage();
        assert_eq!(usage.iter().find(|u| u.name == "currency_exchange").unwrap().count, 1);
    }
}
