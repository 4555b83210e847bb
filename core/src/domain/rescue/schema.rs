use serde_json::json;

/// Returns the JSON schema for rescue plan LLM responses
pub fn get_recipe_fix_schema() -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string" },
            "summary": { "type": "string" },
            "steps": {
                "type": "array",
                "items": { "type": "string" }
            }
        },
        "required": ["title", "summary", "steps"]
    })
}
