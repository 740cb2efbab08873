use thiserror::Error;

/// Failures while driving plugins over a request.
///
/// Descriptor shapes a plugin does not handle are skipped, not reported here.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum GenerateError {
    #[error("{0} is listed in file_to_generate but missing from proto_file")]
    UnknownFile(String),

    #[error("plugin {0} is already registered")]
    DuplicatePlugin(&'static str),

    #[error("plugins={0}: no plugin with that name is registered")]
    UnknownPlugin(String),

    #[error("parameter {key}: expected a boolean, got {value:?}")]
    InvalidBool { key: String, value: String },
}
