//! Schema type tokens to Rust types
//!
//! Schema documents describe parameter types with loose tokens such as
//! `number` or `boolean`. [`TypeNormalizer`] maps the known ones to Rust
//! spellings and passes everything else through verbatim; whether an unknown
//! token is a usable Rust type is checked later, when the generated code is
//! validated. Non-primitive types are spelled with their full path so a
//! generated struct can never shadow them.

/// Known schema tokens and their Rust types
const TYPE_MAP: &[(&str, &str)] = &[
    ("number", "i64"),
    ("int", "i64"),
    ("boolean", "bool"),
    ("string map", "::std::string::String"),
    ("string", "::std::string::String"),
];

pub struct TypeNormalizer;

impl TypeNormalizer {
    /// Rust type for a schema token
    ///
    /// Never fails. Applying it to its own output returns the output
    /// unchanged, since every mapped type is itself an unmapped token.
    pub fn normalize(token: &str) -> String {
        TYPE_MAP
            .iter()
            .find(|(schema, _)| *schema == token)
            .map(|(_, rust)| rust.to_string())
            .unwrap_or_else(|| token.to_string())
    }
}
