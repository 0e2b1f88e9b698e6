//! # Byte Units
//!
//! Conversion between raw byte counts and the compact display strings used in
//! the report (`"1.00G"`, `"512.00b"`).
//!
//! The conversion is lossy: display strings keep two decimals, so
//! `parse_bytes(&format_bytes(n))` is only guaranteed to land within 1% of `n`.

use crate::error::StatsError;

const KIB: f64 = 1024.0;
const MIB: f64 = KIB * 1024.0;
const GIB: f64 = MIB * 1024.0;
const TIB: f64 = GIB * 1024.0;

/// Units in descending order, checked first to last.
const UNITS: [(char, f64); 4] = [('T', TIB), ('G', GIB), ('M', MIB), ('K', KIB)];

/// Suffix used for values below one kibibyte.
pub const RAW_SUFFIX: char = 'b';

/// Format a byte count with the largest unit its magnitude reaches.
///
/// The sign is kept, so a negative memory headroom renders as e.g. `"-1.50G"`.
pub fn format_bytes(bytes: f64) -> String {
    let magnitude = bytes.abs();
    for (suffix, size) in UNITS {
        if magnitude >= size {
            return format!("{:.2}{}", bytes / size, suffix);
        }
    }
    format!("{:.2}{}", bytes, RAW_SUFFIX)
}

/// Inverse of [`format_bytes`].
///
/// The last character is read as the unit. `T`, `G`, `M` and `K` scale the
/// numeric prefix; any other suffix means the prefix already counts bytes.
pub fn parse_bytes(formatted: &str) -> Result<f64, StatsError> {
    let trimmed = formatted.trim();
    let Some(suffix) = trimmed.chars().last() else {
        return Err(StatsError::format("byte size", formatted));
    };
    let number = &trimmed[..trimmed.len() - suffix.len_utf8()];
    let value: f64 = number
        .parse()
        .map_err(|_| StatsError::format("byte size", formatted))?;

    let scale = UNITS
        .iter()
        .find(|(unit, _)| *unit == suffix)
        .map(|(_, size)| *size)
        .unwrap_or(1.0);

    Ok(value * scale)
}

/// Returns true when `c` is one of the suffixes [`format_bytes`] can emit.
pub fn is_unit_suffix(c: char) -> bool {
    c == RAW_SUFFIX || UNITS.iter().any(|(unit, _)| *unit == c)
}
