use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("invalid profile '{spec}': {reason}")]
    InvalidProfile { spec: String, reason: String },

    #[error("duplicate profile name: {0}")]
    DuplicateProfile(String),
}
