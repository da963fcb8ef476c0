// Shared error type for the bas2c pipeline.
//
// Syntax covers everything recovered at a statement boundary (unexpected
// token, type mismatch, nesting mismatch); Namespace covers redefinitions,
// which pass 1 reports while syntax errors are skipped silently.

#[derive(Debug, Clone, PartialEq)]
pub enum Bas2cError {
    Syntax(String),
    Namespace(String),
}

impl std::fmt::Display for Bas2cError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Bas2cError::Syntax(m) => write!(f, "{}", m),
            Bas2cError::Namespace(m) => write!(f, "{}", m),
        }
    }
}

impl std::error::Error for Bas2cError {}

pub type Result<T> = std::result::Result<T, Bas2cError>;
