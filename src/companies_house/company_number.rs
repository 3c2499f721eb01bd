//! Company number handling
//!
//! Companies House numbers are eight characters: either eight digits, or a
//! two-letter register prefix (Scotland, Northern Ireland, LLPs, ...) plus
//! six digits. Users routinely drop the leading zeros.

/// Register prefixes that replace the first two digits
const PREFIXES: [&str; 28] = [
    "SC", "NI", "NC", "NF", "OC", "SO", "LP", "SL", "FC", "SF", "NL", "GE", "IP", "SP", "IC",
    "SI", "NP", "NO", "RC", "SR", "AC", "SA", "NA", "NZ", "CE", "CS", "PC", "RS",
];

fn split_prefix(number: &str) -> Option<(&str, &str)> {
    let prefix = number.get(..2)?;
    PREFIXES
        .contains(&prefix)
        .then(|| (prefix, &number[2..]))
}

/// Normalize a company number to 8 characters with leading zeros
///
/// Input that is neither all digits nor prefix-plus-digits is returned
/// trimmed and upper-cased, and left for the API to reject.
pub fn normalize_company_number(number: &str) -> String {
    let number = number.trim().to_uppercase();

    if let Some((prefix, digits)) = split_prefix(&number) {
        if number.len() < 8 && !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()) {
            return format!("{}{:0>6}", prefix, digits);
        }
        return number;
    }

    if !number.is_empty() && number.chars().all(|c| c.is_ascii_digit()) {
        return format!("{:0>8}", number);
    }

    number
}

/// True if `number` is, or pads out to, a well-formed company number
pub fn is_valid_company_number(number: &str) -> bool {
    let number = number.trim().to_uppercase();

    if number.is_empty() || number.len() > 8 {
        return false;
    }

    match split_prefix(&number) {
        Some((_, digits)) => !digits.is_empty() && digits.chars().all(|c| c.is_ascii_digit()),
        None => number.chars().all(|c| c.is_ascii_digit()),
    }
}
