//! Read-only MCP resources listing the PDS4 context type enumerations.

use pds_registry::ContextCategory;
use rmcp::model::{
    AnnotateAble, ErrorData, ListResourcesResult, RawResource, ReadResourceResult, ResourceContents,
};

const INVESTIGATION_TYPES_URI: &str = "pds://context/investigation-types";
const TARGET_TYPES_URI: &str = "pds://context/target-types";
const INSTRUMENT_TYPES_URI: &str = "pds://context/instrument-types";
const INSTRUMENT_HOST_TYPES_URI: &str = "pds://context/instrument-host-types";

/// Build the server resource list: one enumeration per context category.
pub fn list_resources() -> ListResourcesResult {
    let resources = vec![
        resource(
            INVESTIGATION_TYPES_URI,
            "context.investigation_types",
            Some("Investigation types"),
            Some("Valid pds:Investigation.pds:type values"),
        ),
        resource(
            TARGET_TYPES_URI,
            "context.target_types",
            Some("Target types"),
            Some("Valid pds:Target.pds:type values"),
        ),
        resource(
            INSTRUMENT_TYPES_URI,
            "context.instrument_types",
            Some("Instrument types"),
            Some("Valid pds:Instrument.pds:type values"),
        ),
        resource(
            INSTRUMENT_HOST_TYPES_URI,
            "context.instrument_host_types",
            Some("Instrument host types"),
            Some("Valid pds:Instrument_Host.pds:type values"),
        ),
    ];
    ListResourcesResult::with_all_items(resources)
}

/// Read one enumeration resource as a JSON array.
pub fn read_resource(uri: &str) -> Result<ReadResourceResult, ErrorData> {
    let category = match uri {
        INVESTIGATION_TYPES_URI => ContextCategory::Investigation,
        TARGET_TYPES_URI => ContextCategory::Target,
        INSTRUMENT_TYPES_URI => ContextCategory::Instrument,
        INSTRUMENT_HOST_TYPES_URI => ContextCategory::InstrumentHost,
        _ => {
            return Err(ErrorData::resource_not_found(
                format!("resource '{uri}' was not found"),
                Some(serde_json::json!({ "uri": uri })),
            ));
        }
    };
    let payload = serde_json::to_string_pretty(category.valid_types()).unwrap_or_else(|_| "[]".to_string());
    Ok(text_resource(uri, "application/json", payload))
}

fn resource(uri: &str, name: &str, title: Option<&str>, description: Option<&str>) -> rmcp::model::Resource {
    RawResource {
        uri: uri.to_string(),
        name: name.to_string(),
        title: title.map(ToString::to_string),
        description: description.map(ToString::to_string),
        mime_type: Some("application/json".to_string()),
        size: None,
        icons: None,
        meta: None,
    }
    .no_annotation()
}

fn text_resource(uri: &str, mime_type: &str, text: String) -> ReadResourceResult {
    ReadResourceResult {
        contents: vec![ResourceContents::TextResourceContents {
            uri: uri.to_string(),
            mime_type: Some(mime_type.to_string()),
            text,
            meta: None,
        }],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_one_resource_per_category() {
        let listed = list_resources();
        assert_eq!(listed.resources.len(), 4);
    }

    #[test]
    fn reads_target_types_as_json_array() {
        let result = read_resource(TARGET_TYPES_URI).unwrap();
        let [ResourceContents::TextResourceContents { text, .. }] = result.contents.as_slice() else {
            panic!("expected one text content");
        };
        let values: Vec<String> = serde_json::from_str(text).unwrap();
        assert!(values.iter().any(|value| value == "Planet"));
    }

    #[test]
    fn unknown_uri_is_not_found() {
        assert!(read_resource("pds://context/unknown").is_err());
    }
}
