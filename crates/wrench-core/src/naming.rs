//! Identifier case conversion between C++ and Torque conventions.
//!
//! Only ASCII letters are case-mapped; every other character is copied
//! through unchanged. The two conversions are not inverses of each other.

/// `FooBarBaz` -> `foo_bar_baz`.
///
/// An underscore is inserted before every uppercase letter except a leading
/// one, and every uppercase letter is lower-cased.
pub fn to_snake_case(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len() + 4);
    for c in identifier.chars() {
        if c.is_ascii_uppercase() {
            if !result.is_empty() {
                result.push('_');
            }
            result.push(c.to_ascii_lowercase());
        } else {
            result.push(c);
        }
    }
    result
}

/// `foo_bar` -> `fooBar`, `GenerateCppClass` -> `generateCppClass`.
///
/// A leading uppercase letter is lower-cased. Underscores are dropped and
/// the lowercase letter following one is upper-cased.
pub fn to_camel_case(identifier: &str) -> String {
    let mut result = String::with_capacity(identifier.len());
    let mut next_capital = false;
    for (i, c) in identifier.chars().enumerate() {
        if i == 0 && c.is_ascii_uppercase() {
            result.push(c.to_ascii_lowercase());
        } else if c == '_' {
            next_capital = true;
        } else if next_capital && c.is_ascii_lowercase() {
            result.push(c.to_ascii_uppercase());
            next_capital = false;
        } else {
            result.push(c);
            next_capital = false;
        }
    }
    result
}
