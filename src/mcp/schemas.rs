//! JSON schema builders for MCP tools.

use serde_json::{Map, Value};

use crate::memegen::ImageExtension;

/// Build the schema describing the `list_templates` tool input.
pub(crate) fn list_templates_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "filter".into(),
        string_schema("Optional search filter for template names"),
    );

    let mut animated_schema = Map::new();
    animated_schema.insert("type".into(), Value::String("boolean".into()));
    animated_schema.insert(
        "description".into(),
        Value::String("Filter for animated templates only".into()),
    );
    properties.insert("animated".into(), Value::Object(animated_schema));

    finalize_object_schema(properties, &[])
}

/// Build the schema describing the `search_templates` tool input.
pub(crate) fn search_templates_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "query".into(),
        string_schema("Search query for finding templates"),
    );
    finalize_object_schema(properties, &["query"])
}

/// Build the schema describing the `get_template_info` tool input.
pub(crate) fn get_template_info_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "template_id".into(),
        string_schema("The ID of the template to get information about"),
    );
    finalize_object_schema(properties, &["template_id"])
}

/// Build the schema describing the `create_meme` tool input.
pub(crate) fn create_meme_input_schema() -> Map<String, Value> {
    let mut properties = Map::new();
    properties.insert(
        "template_id".into(),
        string_schema("The ID of the meme template to use"),
    );
    properties.insert(
        "top_text".into(),
        string_schema("Text for the top of the meme"),
    );
    properties.insert(
        "bottom_text".into(),
        string_schema("Text for the bottom of the meme"),
    );

    let mut line_item_schema = Map::new();
    line_item_schema.insert("type".into(), Value::String("string".into()));
    let mut lines_schema = Map::new();
    lines_schema.insert("type".into(), Value::String("array".into()));
    lines_schema.insert("items".into(), Value::Object(line_item_schema));
    lines_schema.insert(
        "description".into(),
        Value::String(
            "Array of text lines for multi-line memes (use this OR top_text/bottom_text)".into(),
        ),
    );
    properties.insert("text_lines".into(), Value::Object(lines_schema));

    properties.insert("style".into(), string_schema("Style variant to use"));
    properties.insert("font".into(), string_schema("Font to use for the text"));

    let mut extension_schema = Map::new();
    extension_schema.insert("type".into(), Value::String("string".into()));
    extension_schema.insert(
        "enum".into(),
        Value::Array(
            ImageExtension::ALL
                .into_iter()
                .map(|extension| Value::String(extension.as_str().into()))
                .collect(),
        ),
    );
    extension_schema.insert(
        "default".into(),
        Value::String(ImageExtension::default().as_str().into()),
    );
    extension_schema.insert(
        "description".into(),
        Value::String("Image format (default: png)".into()),
    );
    properties.insert("extension".into(), Value::Object(extension_schema));

    finalize_object_schema(properties, &["template_id"])
}

fn string_schema(description: &str) -> Value {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("string".into()));
    schema.insert("description".into(), Value::String(description.into()));
    Value::Object(schema)
}

fn finalize_object_schema(properties: Map<String, Value>, required: &[&str]) -> Map<String, Value> {
    let mut schema = Map::new();
    schema.insert("type".into(), Value::String("object".into()));
    schema.insert("properties".into(), Value::Object(properties));
    if !required.is_empty() {
        schema.insert(
            "required".into(),
            Value::Array(
                required
                    .iter()
                    .map(|&key| Value::String(key.into()))
                    .collect(),
            ),
        );
    }
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn create_meme_schema_lists_extensions() {
        let schema = create_meme_input_schema();
        assert_eq!(schema["required"], json!(["template_id"]));
        assert_eq!(
            schema["properties"]["extension"]["enum"],
            json!(["png", "jpg", "gif", "webp"])
        );
        assert_eq!(schema["properties"]["extension"]["default"], "png");
        assert_eq!(schema["properties"]["text_lines"]["items"]["type"], "string");
    }

    #[test]
    fn list_templates_schema_has_no_required_fields() {
        let schema = list_templates_input_schema();
        assert!(schema.get("required").is_none());
        assert_eq!(schema["properties"]["animated"]["type"], "boolean");
        assert_eq!(search_templates_input_schema()["required"], json!(["query"]));
        assert_eq!(
            get_template_info_input_schema()["required"],
            json!(["template_id"])
        );
    }
}
