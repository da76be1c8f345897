//! Validated project names

use std::fmt;

use crate::template::error::TemplateError;

/// Name of the project directory to create
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName(String);

impl ProjectName {
    /// Accepts names made of ASCII letters, digits, `-`, `_` and `.`,
    /// excluding `.` and `..`.
    pub fn parse(name: &str) -> Result<Self, TemplateError> {
        let valid = !name.is_empty()
            && name != "."
            && name != ".."
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));

        if valid {
            Ok(Self(name.to_string()))
        } else {
            Err(TemplateError::InvalidProjectName(name.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
