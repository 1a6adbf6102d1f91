//! Visa requirements tool — simplified bilateral visa lookup.

use async_trait::async_trait;
use serde_json::{Value, json};
use wayfarer_core::error::ToolError;
use wayfarer_core::tool::Tool;

use crate::args::require_str;
use crate::mock::{Picker, seed, simulate_latency};

/// Passport → destinations with visa-free tourist entry.
const VISA_FREE: [(&str, [&str; 10]); 2] = [
    (
        "US",
        [
            "Canada",
            "UK",
            "France",
            "Germany",
            "Japan",
            "South Korea",
            "Italy",
            "Spain",
            "Australia",
            "Singapore",
        ],
    ),
    (
        "UK",
        [
            "US",
            "Canada",
            "France",
            "Germany",
            "Japan",
            "Italy",
            "Spain",
            "Australia",
            "Singapore",
            "UAE",
        ],
    ),
];

pub struct VisaRequirementsTool;

#[async_trait]
impl Tool for VisaRequirementsTool {
    fn name(&self) -> &str {
        "get_visa_requirements"
    }

    fn description(&self) -> &str {
        "Get visa requirements for traveling to a country. Includes required documents and processing info."
    }

    fn parameters_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "destination_country": {
                    "type": "string",
                    "description": "Country you are traveling to"
                },
                "passport_country": {
                    "type": "string",
                    "description": "Country that issued your passport (e.g., \"US\", \"UK\")"
                }
            },
            "required": ["destination_country", "passport_country"]
        })
    }

    async fn execute(&self, arguments: Value) -> Result<Value, ToolError> {
        let destination = require_str(&arguments, "destination_country", self.name())?;
        let passport = require_str(&arguments, "passport_country", self.name())?;

        let mut picker = Picker::new(seed(&[destination, passport]));
        simulate_latency(&mut picker).await;

        let visa_free = VISA_FREE
            .iter()
            .any(|(p, dests)| *p == passport && dests.contains(&destination));

        if visa_free {
            Ok(json!({
                "success": true,
                "destination_country": destination,
                "passport_country": passport,
                "visa_required": false,
                "visa_type": "Visa-free entry",
                "max_stay": "90 days",
                "processing_time": "N/A",
                "fee": 0,
                "currency": "USD",
                "required_documents": [
                    "Valid passport (6+ months validity)",
                    "Return/onward ticket",
                    "Proof of accommodation",
                    "Proof of sufficient funds",
                ],
                "notes": format!("{passport} passport holders can enter {destination} visa-free for tourism purposes."),
                "entry_requirements": [
                    "Complete arrival card",
                    "May need to show proof of funds",
                    "COVID-19 requirements may apply - check latest updates",
                ],
            }))
        } else {
            Ok(json!({
                "success": true,
                "destination_country": destination,
                "passport_country": passport,
                "visa_required": true,
                "visa_type": "Tourist Visa / eVisa",
                "max_stay": "30-90 days",
                "processing_time": "3-15 business days",
                "fee": picker.range(40, 160),
                "currency": "USD",
                "required_documents": [
                    "Valid passport (6+ months validity)",
                    "Completed visa application form",
                    "Passport-sized photos (2)",
                    "Proof of accommodation",
                    "Return ticket",
                    "Bank statements (last 3 months)",
                    "Travel insurance",
                ],
                "notes": format!("Apply online or at the {destination} embassy/consulate. eVisa available for most nationalities."),
                "application_links": [
                    format!("https://visa.{}.gov/apply", destination.to_lowercase()),
                ],
            }))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn us_to_japan_is_visa_free() {
        let tool = VisaRequirementsTool;
        let result = tool
            .execute(json!({"destination_country": "Japan", "passport_country": "US"}))
            .await
            .unwrap();
        assert_eq!(result["visa_required"], false);
        assert_eq!(result["fee"], 0);
        assert_eq!(result["max_stay"], "90 days");
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_passport_requires_visa() {
        let tool = VisaRequirementsTool;
        let result = tool
            .execute(json!({"destination_country": "Japan", "passport_country": "Atlantis"}))
            .await
            .unwrap();
        assert_eq!(result["visa_required"], true);
        let fee = result["fee"].as_u64().unwrap();
        assert!((40..160).contains(&fee));
        assert!(result["application_links"][0]
            .as_str()
            .unwrap()
            .contains("visa.japan.gov"));
    }
}
