use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct SchemaViolation {
    pub path: String,
    pub reason: String,
}

fn violation(path: &str, reason: impl Into<String>) -> SchemaViolation {
    SchemaViolation {
        path: path.to_string(),
        reason: reason.into(),
    }
}

/// Checks `value` against the subset of JSON schema used for structured
/// output: `type`, `properties`, `required`, `items` and `enum`.
///
/// Type names are compared case-insensitively so both `"object"` and the
/// provider's `"OBJECT"` spelling are accepted. Optional properties that are
/// `null` are treated as absent.
pub fn validate_against_schema(value: &Value, schema: &Value) -> Result<(), SchemaViolation> {
    validate_at(value, schema, "$")
}

fn validate_at(value: &Value, schema: &Value, path: &str) -> Result<(), SchemaViolation> {
    let expected = schema
        .get("type")
        .and_then(Value::as_str)
        .map(str::to_ascii_lowercase);

    match expected.as_deref() {
        Some("object") => {
            let object = value
                .as_object()
                .ok_or_else(|| violation(path, "expected object"))?;

            let required: Vec<&str> = schema
                .get("required")
                .and_then(Value::as_array)
                .map(|fields| fields.iter().filter_map(Value::as_str).collect())
                .unwrap_or_default();

            for field in &required {
                match object.get(*field) {
                    None | Some(Value::Null) => {
                        return Err(violation(
                            &format!("{}.{}", path, field),
                            "required field is missing",
                        ));
                    }
                    Some(_) => {}
                }
            }

            if let Some(properties) = schema.get("properties").and_then(Value::as_object) {
                for (name, property_schema) in properties {
                    match object.get(name) {
                        None | Some(Value::Null) => continue,
                        Some(property) => {
                            validate_at(property, property_schema, &format!("{}.{}", path, name))?
                        }
                    }
                }
            }
        }
        Some("array") => {
            let items = value
                .as_array()
                .ok_or_else(|| violation(path, "expected array"))?;

            if let Some(item_schema) = schema.get("items") {
                for (index, item) in items.iter().enumerate() {
                    validate_at(item, item_schema, &format!("{}[{}]", path, index))?;
                }
            }
        }
        Some("string") => {
            let text = value
                .as_str()
                .ok_or_else(|| violation(path, "expected string"))?;

            if let Some(allowed) = schema.get("enum").and_then(Value::as_array) {
                if !allowed.iter().any(|v| v.as_str() == Some(text)) {
                    return Err(violation(path, format!("'{}' is not an allowed value", text)));
                }
            }
        }
        Some("boolean") if !value.is_boolean() => return Err(violation(path, "expected boolean")),
        Some("integer") if !(value.is_i64() || value.is_u64()) => {
            return Err(violation(path, "expected integer"));
        }
        Some("number") if !value.is_number() => return Err(violation(path, "expected number")),
        _ => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        menu::schema::get_menu_plan_schema, recipe::schema::get_recipe_list_schema,
    };
    use serde_json::json;

    fn recipe_json() -> Value {
        json!({
            "name": "Dal",
            "description": "Comfort food",
            "prepTime": "10 mins",
            "cookTime": "25 mins",
            "servings": "2 servings",
            "ingredients": [{ "name": "lentils", "quantity": "1 cup", "isProvided": true }],
            "instructions": ["Boil", "Temper"]
        })
    }

    #[test]
    fn test_accepts_matching_recipe_list() {
        let value = json!([recipe_json()]);
        assert!(validate_against_schema(&value, &get_recipe_list_schema(false)).is_ok());
    }

    #[test]
    fn test_reports_missing_required_field_with_path() {
        let mut recipe = recipe_json();
        recipe.as_object_mut().unwrap().remove("instructions");

        let err = validate_against_schema(&json!([recipe]), &get_recipe_list_schema(false))
            .unwrap_err();
        assert_eq!(err.path, "$[0].instructions");
    }

    #[test]
    fn test_rejects_wrong_type() {
        let value = json!({ "planTitle": 3 });
        let err = validate_against_schema(&value, &get_menu_plan_schema()).unwrap_err();
        assert!(err.path.starts_with("$."));
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        let schema = json!({ "type": "ARRAY", "items": { "type": "STRING" } });
        assert!(validate_against_schema(&json!(["a", "b"]), &schema).is_ok());
        assert!(validate_against_schema(&json!(["a", 1]), &schema).is_err());
    }

    #[test]
    fn test_enum_and_null_optional() {
        let schema = json!({
            "type": "object",
            "properties": {
                "level": { "type": "string", "enum": ["low", "high"] },
                "note": { "type": "string" }
            },
            "required": ["level"]
        });

        assert!(validate_against_schema(&json!({ "level": "low", "note": null }), &schema).is_ok());
        assert!(validate_against_schema(&json!({ "level": "medium" }), &schema).is_err());
        assert!(validate_against_schema(&json!({ "level": null }), &schema).is_err());
    }
}
