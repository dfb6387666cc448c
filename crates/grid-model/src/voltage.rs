//! Voltage derivation from ETYS node naming.
//!
//! The fifth character of an ETYS node name encodes the voltage level.
//! OFTO sheets are known to deviate from this convention, so a missing
//! derivation is not an error.

/// Derive the voltage in kV from the digit in the fifth character of a node
/// name. Returns `None` when the name is too short or the character is not a
/// recognised voltage digit.
pub fn derive_voltage(node: &str) -> Option<&'static str> {
    match node.chars().nth(4)? {
        '1' => Some("132"),
        '2' => Some("275"),
        '3' => Some("33"),
        '4' => Some("400"),
        '5' => Some("11"),
        '6' => Some("66"),
        '7' => Some("25"),
        '8' => Some("22"),
        _ => None,
    }
}

/// True when the node's fifth character marks a 275 kV or 400 kV busbar.
pub fn is_transmission_voltage(node: &str) -> bool {
    matches!(node.chars().nth(4), Some('2') | Some('4'))
}

/// First `len` characters of a string, character-safe.
pub fn prefix(value: &str, len: usize) -> &str {
    match value.char_indices().nth(len) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

/// Site code of a node: the first four characters of its name.
pub fn site_code(node: &str) -> &str {
    prefix(node, 4)
}
