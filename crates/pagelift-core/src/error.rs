use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("unrecognized page shape: {0}")]
    UnrecognizedShape(String),

    #[error("import conflict: `{name}` is exposed by both `{first}` and `{second}`")]
    ImportConflict {
        name: String,
        first: String,
        second: String,
    },

    #[error("parse error: {0}")]
    Parse(String),
}
