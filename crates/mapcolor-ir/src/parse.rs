use crate::types::MapDocument;

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}

pub fn parse_map(json: &str) -> Result<MapDocument, ParseError> {
    Ok(serde_json::from_str(json)?)
}

pub fn to_json(document: &MapDocument) -> Result<String, ParseError> {
    Ok(serde_json::to_string_pretty(document)?)
}
