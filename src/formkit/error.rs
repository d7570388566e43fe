use crate::resolve::ResolutionTrail;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormError {
    #[error("Malformed attribute path \"{path}\": {reason}")]
    MalformedPath { path: String, reason: &'static str },

    #[error("Undefined attribute \"{segment}\" on {trail}")]
    UndefinedAttribute {
        segment: String,
        trail: ResolutionTrail,
    },

    #[error("Cannot read \"{segment}\" from {trail}: value is not nestable")]
    NotNestable {
        segment: String,
        trail: ResolutionTrail,
    },

    #[error("Invalid model: {0}")]
    InvalidModel(String),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, FormError>;
