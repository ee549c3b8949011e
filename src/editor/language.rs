//! Best-effort content-type detection keyed on file extension.

use std::path::Path;

/// Language used for keyword highlighting in the editor pane.
///
/// Detection never fails: anything unrecognized is rendered as plain text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Python,
    Rust,
    C,
    Json,
    Plain,
}

impl Language {
    /// Detect a language from a file path's extension.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("py") => Language::Python,
            Some("rs") => Language::Rust,
            Some("c") | Some("h") => Language::C,
            Some("json") => Language::Json,
            _ => Language::Plain,
        }
    }

    /// Keywords rendered bold in the theme's keyword color.
    pub fn keywords(self) -> &'static [&'static str] {
        match self {
            Language::Python => &[
                "def", "class", "return", "if", "elif", "else", "while", "for", "in", "not",
                "and", "or", "import", "from", "as", "with", "try", "except", "finally",
                "raise", "pass", "break", "continue", "lambda", "yield", "global", "del",
                "assert", "is",
            ],
            Language::Rust => &[
                "fn", "let", "mut", "pub", "struct", "enum", "impl", "trait", "return", "if",
                "else", "while", "for", "in", "loop", "match", "mod", "use", "crate", "self",
                "super", "where", "move", "ref", "const", "static", "unsafe", "async", "await",
                "dyn", "break", "continue",
            ],
            Language::C => &[
                "struct", "return", "if", "else", "while", "for", "do", "switch", "case",
                "default", "break", "continue", "goto", "sizeof", "typedef", "static", "const",
                "extern",
            ],
            Language::Json => &[],
            Language::Plain => &[],
        }
    }

    /// Type names and built-in constants rendered in the type color.
    pub fn types(self) -> &'static [&'static str] {
        match self {
            Language::Python => &[
                "int", "str", "float", "bool", "list", "dict", "tuple", "set", "None", "True",
                "False", "self",
            ],
            Language::Rust => &[
                "i8", "i16", "i32", "i64", "u8", "u16", "u32", "u64", "usize", "isize", "f32",
                "f64", "bool", "char", "str", "String", "Vec", "Option", "Result", "Box", "Some",
                "None", "Ok", "Err", "true", "false",
            ],
            Language::C => &[
                "int", "char", "void", "bool", "float", "double", "long", "short", "unsigned",
                "signed", "NULL",
            ],
            Language::Json => &["true", "false", "null"],
            Language::Plain => &[],
        }
    }

    /// The line-comment leader, if the language has one.
    pub fn line_comment(self) -> Option<&'static str> {
        match self {
            Language::Python => Some("#"),
            Language::Rust | Language::C => Some("//"),
            Language::Json | Language::Plain => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn detects_by_extension() {
        assert_eq!(Language::from_path(&PathBuf::from("a.py")), Language::Python);
        assert_eq!(Language::from_path(&PathBuf::from("a.rs")), Language::Rust);
        assert_eq!(Language::from_path(&PathBuf::from("a.h")), Language::C);
        assert_eq!(Language::from_path(&PathBuf::from("a.json")), Language::Json);
    }

    #[test]
    fn unknown_extension_is_plain() {
        assert_eq!(Language::from_path(&PathBuf::from("a.xyz")), Language::Plain);
        assert_eq!(Language::from_path(&PathBuf::from("Makefile")), Language::Plain);
    }
}
