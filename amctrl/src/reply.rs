use http::StatusCode;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::CtrlError;

/// The short confirmation reported for a successful mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum Confirmation {
    #[serde(rename = "Ok")]
    Ok,
    #[serde(rename = "created")]
    Created,
    #[serde(rename = "removed")]
    Removed,
}

/// Rendering of a [`CtrlError`] for the boundary.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ErrorReply {
    pub code: u16,
    pub kind: String,
    pub message: String,
}

impl Confirmation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confirmation::Ok => "Ok",
            Confirmation::Created => "created",
            Confirmation::Removed => "removed",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Confirmation::Created => StatusCode::CREATED,
            Confirmation::Ok | Confirmation::Removed => StatusCode::OK,
        }
    }
}

impl fmt::Display for Confirmation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&CtrlError> for ErrorReply {
    fn from(e: &CtrlError) -> Self {
        Self {
            code: e.status_code().as_u16(),
            kind: e.kind().to_string(),
            message: e.to_string(),
        }
    }
}

impl From<CtrlError> for ErrorReply {
    fn from(e: CtrlError) -> Self {
        (&e).into()
    }
}
