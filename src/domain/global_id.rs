use base64::{Engine as _, engine::general_purpose};
use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GlobalIdError {
    #[error("Couldn't resolve id: {0}.")]
    Malformed(String),
    #[error("Must receive a {expected} id, got {found}.")]
    WrongType { expected: String, found: String },
}

/// Encodes an object id the way it is exposed to API clients: `base64("Type:uuid")`.
pub fn to_global_id(type_name: &str, id: Uuid) -> String {
    general_purpose::STANDARD.encode(format!("{type_name}:{id}"))
}

/// Decodes a global id, checking it points at an object of `type_name`.
pub fn from_global_id(type_name: &str, value: &str) -> Result<Uuid, GlobalIdError> {
    let malformed = || GlobalIdError::Malformed(value.to_string());

    let bytes = general_purpose::STANDARD
        .decode(value)
        .map_err(|_| malformed())?;
    let decoded = String::from_utf8(bytes).map_err(|_| malformed())?;
    let (found, raw_id) = decoded.split_once(':').ok_or_else(malformed)?;

    if found != type_name {
        return Err(GlobalIdError::WrongType {
            expected: type_name.to_string(),
            found: found.to_string(),
        });
    }

    Uuid::parse_str(raw_id).map_err(|_| malformed())
}
