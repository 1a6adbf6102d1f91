//! Minimal JSON-Schema validation for tool arguments.
//!
//! The model backend is an untrusted producer of tool arguments, so the
//! registry checks them against the tool's declared schema before any
//! handler runs: required fields, declared primitive types, and enum
//! membership. This is deliberately not a full JSON-Schema implementation —
//! tool schemas here are flat object schemas.

use serde_json::Value;

/// Check that `schema` is a usable object schema for tool parameters.
///
/// Called once at registration time.
pub fn check_schema(schema: &Value) -> std::result::Result<(), String> {
    let obj = schema
        .as_object()
        .ok_or_else(|| "schema must be a JSON object".to_string())?;
    match obj.get("type").and_then(Value::as_str) {
        Some("object") => {}
        Some(other) => return Err(format!("schema type must be \"object\", got \"{other}\"")),
        None => return Err("schema is missing \"type\": \"object\"".to_string()),
    }
    if let Some(required) = obj.get("required") {
        if !required.is_array() {
            return Err("\"required\" must be an array of field names".to_string());
        }
    }
    Ok(())
}

/// Validate model-supplied `arguments` against a declared parameter schema.
pub fn validate_arguments(schema: &Value, arguments: &Value) -> std::result::Result<(), String> {
    let args = arguments
        .as_object()
        .ok_or_else(|| "arguments must be a JSON object".to_string())?;

    // Required fields
    if let Some(required) = schema.get("required").and_then(Value::as_array) {
        for field in required.iter().filter_map(Value::as_str) {
            if !args.contains_key(field) {
                return Err(format!("missing required field '{field}'"));
            }
        }
    }

    // Declared types and enum membership for fields that are present
    let Some(properties) = schema.get("properties").and_then(Value::as_object) else {
        return Ok(());
    };
    for (name, prop) in properties {
        let Some(value) = args.get(name) else {
            continue;
        };
        if let Some(expected) = prop.get("type").and_then(Value::as_str) {
            if !type_matches(expected, value) {
                return Err(format!(
                    "field '{name}' should be of type {expected}, got {}",
                    type_name(value)
                ));
            }
        }
        if let Some(allowed) = prop.get("enum").and_then(Value::as_array) {
            if !allowed.contains(value) {
                return Err(format!("field '{name}' is not one of the allowed values"));
            }
        }
    }

    Ok(())
}

fn type_matches(expected: &str, value: &Value) -> bool {
    match expected {
        "string" => value.is_string(),
        "number" => value.is_number(),
        "integer" => value.is_i64() || value.is_u64(),
        "boolean" => value.is_boolean(),
        "array" => value.is_array(),
        "object" => value.is_object(),
        // Unknown declared type: don't reject what we can't check
        _ => true,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
