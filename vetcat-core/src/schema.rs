use serde_json::{json, Value};

/// JSON Schema every catalog bundle file must satisfy
pub fn bundle_json_schema() -> Value {
    let item = json!({
        "type": "object",
        "required": ["id", "name"],
        "properties": {
            "id": {"type": "string"},
            "name": {"type": "string"},
            "brand": {"type": ["string", "null"]},
            "subcategories": {"type": ["string", "null"]},
            "clinicName": {"type": ["string", "null"]},
            "price": {"type": ["number", "null"]}
        }
    });

    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "$id": "vetcat-catalog-bundle",
        "title": "Veterinary clinic catalog bundle",
        "type": "object",
        "properties": {
            "products": {"type": "array", "items": item.clone()},
            "services": {"type": "array", "items": item},
            "categories": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["categoryName", "subcategories"],
                    "properties": {
                        "categoryName": {"type": "string"},
                        "subcategories": {"type": "array", "items": {"type": "string"}}
                    }
                }
            }
        }
    })
}
