use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Errors produced while converting an image
#[derive(Error, Diagnostic, Debug)]
pub enum ConvertError {
    #[error("Failed to decode {path}: {message}")]
    #[diagnostic(
        code(glyphcast::decode),
        help("check that the input exists and is a JPEG, PNG, BMP, GIF or other supported image")
    )]
    Decode { path: PathBuf, message: String },

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(glyphcast::invalid_argument))]
    InvalidArgument {
        message: String,
        #[help]
        help: Option<String>,
    },

    #[error("Failed to write {path}: {message}")]
    #[diagnostic(code(glyphcast::write))]
    Write { path: PathBuf, message: String },
}

impl ConvertError {
    pub(crate) fn invalid(message: impl Into<String>, help: Option<&str>) -> Self {
        ConvertError::InvalidArgument {
            message: message.into(),
            help: help.map(str::to_owned),
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
