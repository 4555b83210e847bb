use serde_json::json;

/// Returns the JSON schema for menu plan LLM responses
pub fn get_menu_plan_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "planTitle": { "type": "string", "description": "A creative and fitting title for the menu plan." },
            "summary": { "type": "string", "description": "A brief, enticing summary of the overall menu." },
            "estimatedCost": { "type": "string", "description": "Estimated total cost in the requested currency." },
            "categories": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "categoryName": { "type": "string" },
                        "estimatedCost": { "type": "string" },
                        "items": {
                            "type": "array",
                            "items": {
                                "type": "object",
                                "properties": {
                                    "name": { "type": "string" },
                                    "description": { "type": "string" },
                                    "estimatedCost": { "type": "string" }
                                },
                                "required": ["name", "description", "estimatedCost"]
                            }
                        }
                    },
                    "required": ["categoryName", "items", "estimatedCost"]
                }
            },
            "planOfAction": {
                "type": "array",
                "description": "Practical preparation and serving tips.",
                "items": { "type": "string" }
            }
        },
        "required": ["planTitle", "summary", "estimatedCost", "categories"]
    })
}
