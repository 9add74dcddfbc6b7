//! Identifier style conversion
//!
//! SPDK method and parameter names are written in snake style
//! (`bdev_get_bdevs`), while generated Rust types use title style
//! (`BdevGetBdevs`). This module converts between the two.
//!
//! # Asymmetry
//!
//! The conversions are not inverses of each other. [`to_title_style`] lower-cases
//! its input before splitting, so casing information is lost, and doubled or
//! leading separators disappear:
//!
//! ```rust
//! use spdk_rpc_core::naming::{to_snake_style, to_title_style};
//!
//! assert_eq!(to_snake_style(&to_title_style("bdev_get_bdevs")), "bdev_get_bdevs");
//! assert_eq!(to_snake_style(&to_title_style("_bdev__get")), "bdev_get");
//! ```
//!
//! Callers that need the original wire name must keep it rather than
//! re-deriving it; [`round_trips`] tells whether re-deriving is safe.

/// Separator between words in snake style identifiers
pub const SEPARATOR: char = '_';

/// Convert a title or camel style identifier to snake style
///
/// Every uppercase character except the first gets a separator inserted
/// before it, and all characters are lower-cased.
///
/// ```rust
/// use spdk_rpc_core::to_snake_style;
///
/// assert_eq!(to_snake_style("BdevGetBdevs"), "bdev_get_bdevs");
/// assert_eq!(to_snake_style("testSnakeCase"), "test_snake_case");
/// assert_eq!(to_snake_style(""), "");
/// ```
pub fn to_snake_style(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);

    for (index, ch) in identifier.chars().enumerate() {
        if index > 0 && ch.is_uppercase() {
            result.push(SEPARATOR);
        }
        result.extend(ch.to_lowercase());
    }

    result
}

/// Convert a snake style identifier to title style
///
/// The input is lower-cased, split on `_`, and every non-empty segment gets
/// its first character upper-cased. Separators are dropped.
///
/// ```rust
/// use spdk_rpc_core::to_title_style;
///
/// assert_eq!(to_title_style("bdev_get_bdevs"), "BdevGetBdevs");
/// assert_eq!(to_title_style("TEST_SNAKE_CASE"), "TestSnakeCase");
/// assert_eq!(to_title_style("_test_snake_case_"), "TestSnakeCase");
/// ```
pub fn to_title_style(identifier: &str) -> String {
    let lowered = identifier.to_lowercase();
    let mut result = String::with_capacity(lowered.len());

    for segment in lowered.split(SEPARATOR) {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }

    result
}

/// Whether a snake style name survives a title style round trip unchanged
pub fn round_trips(snake: &str) -> bool {
    to_snake_style(&to_title_style(snake)) == snake
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_identifiers() {
        assert_eq!(to_snake_style(""), "");
        assert_eq!(to_title_style(""), "");
    }

    #[test]
    fn test_title_style_cases() {
        let cases = [
            ("_test_snake_case_", "TestSnakeCase"),
            ("Test_Snake_case", "TestSnakeCase"),
            ("TEST_SNAKE_CASE", "TestSnakeCase"),
            ("test_snake_case", "TestSnakeCase"),
            ("bdev_get_bdevs", "BdevGetBdevs"),
        ];

        for (input, expected) in cases {
            assert_eq!(to_title_style(input), expected, "input: {input}");
        }
    }

    #[test]
    fn test_snake_style_cases() {
        assert_eq!(to_snake_style("TestSnakeCase"), "test_snake_case");
        assert_eq!(to_snake_style("testSnakeCase"), "test_snake_case");
        assert_eq!(to_snake_style("BdevGetBdevs"), "bdev_get_bdevs");
    }

    #[test]
    fn test_snake_style_keeps_digits_and_separators() {
        assert_eq!(to_snake_style("Nvme2Ctrlr"), "nvme2_ctrlr");
        assert_eq!(to_snake_style("already_snake"), "already_snake");
    }

    #[test]
    fn test_title_style_collapses_separators() {
        assert_eq!(to_title_style("a__b"), "AB");
        assert_eq!(to_title_style("___"), "");
    }

    #[test]
    fn test_title_style_digit_segments() {
        assert_eq!(to_title_style("nvmf_3rd_party"), "Nvmf3rdParty");
    }

    #[test]
    fn test_round_trips() {
        assert!(round_trips("bdev_get_bdevs"));
        assert!(round_trips("spdk_get_version"));
        assert!(!round_trips("_leading"));
        assert!(!round_trips("double__separator"));
        assert!(!round_trips("Capitalized"));
    }

    #[test]
    fn test_conversions_are_not_inverses() {
        // Casing is discarded before title casing.
        let title = to_title_style("BDEV_get");
        assert_eq!(title, "BdevGet");
        assert_eq!(to_snake_style(&title), "bdev_get");
    }
}
