use anyhow::Result;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{Tool, ToolResult};

/// Stub weather lookup. Always reports the same conditions.
pub struct WeatherTool;

#[derive(Deserialize)]
struct WeatherInput {
    city: String,
}

/// The fixed forecast sentence for `city`.
pub fn forecast(city: &str) -> String {
    format!("The weather in {city} is sunny and 25°C.")
}

#[async_trait::async_trait]
impl Tool for WeatherTool {
    fn name(&self) -> &str { "get_weather" }

    fn description(&self) -> &str {
        "Fake weather lookup for the given city."
    }

    fn schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "city": {
                    "type": "string",
                    "description": "Name of the city to look up"
                }
            },
            "required": ["city"]
        })
    }

    async fn execute(&self, input: Value) -> Result<ToolResult> {
        let input: WeatherInput = serde_json::from_value(input)?;
        Ok(ToolResult::success(forecast(&input.city)))
    }
}
