use std::fmt;

/// The main error type for props.txt parsing and lexing.
#[derive(Debug, Clone, PartialEq)]
pub enum PropsError {
    SyntaxError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    InvalidToken {
        token: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    UnexpectedEof {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when a string literal is not closed before end of input.
    UnclosedString {
        quote: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised for characters that match no terminal of the active dialect.
    UnexpectedCharacter {
        character: char,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    /// Raised when brace-shape lookahead and the committed parse disagree.
    /// This is an internal invariant violation, not a malformed-input error.
    AmbiguityError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    TypeError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    ValidationError {
        message: String,
        line: usize,
        column: usize,
        hint: Option<String>,
        code: Option<u32>,
    },
    FileError {
        message: String,
        path: String,
        hint: Option<String>,
        code: Option<u32>,
    },
}

impl fmt::Display for PropsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropsError::SyntaxError { message, line, column, hint, code } =>
                write!(f, "[ueprops] Syntax Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::InvalidToken { token, line, column, hint, code } =>
                write!(f, "[ueprops] Invalid Token '{}' at {}:{}{}{}",
                    token, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::UnexpectedEof { message, line, column, hint, code } =>
                write!(f, "[ueprops] Unexpected EOF at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::UnclosedString { quote, line, column, hint, code } =>
                write!(f, "[ueprops] Unclosed string starting with {} at {}:{}{}{}",
                    quote, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::UnexpectedCharacter { character, line, column, hint, code } =>
                write!(f, "[ueprops] Unexpected character '{}' at {}:{}{}{}",
                    character, line, column,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::AmbiguityError { message, line, column, hint, code } =>
                write!(f, "[ueprops] Ambiguity Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::TypeError { message, line, column, hint, code } =>
                write!(f, "[ueprops] Type Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::ValidationError { message, line, column, hint, code } =>
                write!(f, "[ueprops] Validation Error at {}:{}: {}{}{}",
                    line, column, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
            PropsError::FileError { message, path, hint, code } =>
                write!(f, "[ueprops] File Error '{}': {}{}{}",
                    path, message,
                    hint.as_ref().map_or(String::new(), |h| format!(" Hint: {}", h)),
                    code.map_or(String::new(), |c| format!(" Code: {}", c))
                ),
        }
    }
}

impl std::error::Error for PropsError {}
