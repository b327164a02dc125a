//! SOL <-> lamport fixed-point conversion.
//!
//! One SOL is 10^9 lamports. Amounts typed by a user are decimal strings
//! (`"1.5"`, `".25"`, `"3"`) and are parsed exactly, without going through
//! floating point. Display formatting is intentionally lossy: dust amounts
//! are shown in lamports and large amounts keep only two decimals.

use std::fmt;

use crate::error::AmountError;

/// An amount of lamports (the smallest unit of SOL).
pub type Lamports = u64;

/// Number of lamports in one SOL.
pub const LAMPORTS_PER_SOL: Lamports = 1_000_000_000;

/// Decimal places between SOL and lamports.
const SOL_DECIMALS: usize = 9;

/// Below this, amounts are rendered as a bare lamport count.
const DUST_LIMIT: Lamports = 100_000;

/// At or above this, amounts are rendered with two decimals of SOL.
const LARGE_LIMIT: Lamports = 50_000_000;

/// Lamports per digit of the 4-decimal small-amount rendering (10^-4 SOL).
const SMALL_FRACTION_UNIT: Lamports = 100_000;

/// Lamports per digit of the 2-decimal large-amount rendering (10^-2 SOL).
const LARGE_FRACTION_UNIT: Lamports = 10_000_000;

/// Parse a decimal SOL string into lamports.
///
/// Accepts `[digits]["." [digits]]` with surrounding whitespace. At most nine
/// fractional digits are allowed once trailing zeros of the significant part
/// are accounted for; anything finer than one lamport is rejected with
/// [`AmountError::PrecisionOverflow`]. Results that do not fit in a `u64`
/// are rejected with [`AmountError::Overflow`].
pub fn parse_sol(input: &str) -> Result<Lamports, AmountError> {
    let s = input.trim();
    if s.is_empty() {
        return Err(AmountError::EmptyInput);
    }

    let mut parts = s.split('.');
    let whole_part = parts.next().unwrap_or_default();
    let fraction_part = parts.next();
    if parts.next().is_some() {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }

    let Some(fraction_part) = fraction_part else {
        let whole = parse_digits(whole_part, s)?;
        return scale_whole(whole, s);
    };

    if whole_part.is_empty() && fraction_part.is_empty() {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }

    let whole = if whole_part.is_empty() {
        0
    } else {
        parse_digits(whole_part, s)?
    };
    let base = scale_whole(whole, s)?;

    if fraction_part.is_empty() {
        return Ok(base);
    }
    if !fraction_part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidFormat(s.to_string()));
    }

    let left_zeroes = count_left_zeroes(fraction_part);
    let significant = &fraction_part[left_zeroes..];
    if significant.is_empty() {
        // All-zero fraction.
        return Ok(base);
    }

    let fraction_width = significant.len();
    if left_zeroes + fraction_width > SOL_DECIMALS {
        return Err(AmountError::PrecisionOverflow(s.to_string()));
    }

    // At most nine digits here, so neither the parse nor the scaling can overflow.
    let fraction: Lamports = significant
        .parse()
        .map_err(|_| AmountError::InvalidFormat(s.to_string()))?;
    let padding = (SOL_DECIMALS - left_zeroes - fraction_width) as u32;
    let fraction = fraction * 10u64.pow(padding);

    base.checked_add(fraction)
        .ok_or_else(|| AmountError::Overflow(s.to_string()))
}

/// Render lamports for humans, e.g. `"1.5 SOL"`, `"0.0499 SOL"` or
/// `"42 LAMPORTS"`.
pub fn format_lamports(lamports: Lamports) -> String {
    if lamports < LARGE_LIMIT {
        if lamports == 0 {
            return "0 SOL".to_string();
        }
        if lamports < DUST_LIMIT {
            return format!("{lamports} LAMPORTS");
        }
        let fraction = format!("{:04}", lamports / SMALL_FRACTION_UNIT);
        return format!("0.{} SOL", trim_zeroes(&fraction));
    }

    let whole = lamports / LAMPORTS_PER_SOL;
    let fraction = (lamports % LAMPORTS_PER_SOL) / LARGE_FRACTION_UNIT;
    if fraction == 0 {
        return format!("{whole} SOL");
    }
    let fraction = format!("{fraction:02}");
    format!("{whole}.{} SOL", trim_zeroes(&fraction))
}

/// Display wrapper that renders an amount with [`format_lamports`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Sol(pub Lamports);

impl fmt::Display for Sol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_lamports(self.0))
    }
}

/// Parse an all-digit string. Signs, spaces and other characters are
/// rejected; digit strings too large for a `u64` are an overflow.
fn parse_digits(digits: &str, input: &str) -> Result<Lamports, AmountError> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AmountError::InvalidFormat(input.to_string()));
    }
    digits
        .parse()
        .map_err(|_| AmountError::Overflow(input.to_string()))
}

fn scale_whole(whole: Lamports, input: &str) -> Result<Lamports, AmountError> {
    whole
        .checked_mul(LAMPORTS_PER_SOL)
        .ok_or_else(|| AmountError::Overflow(input.to_string()))
}

fn count_left_zeroes(s: &str) -> usize {
    s.bytes().take_while(|&b| b == b'0').count()
}

/// Strip trailing `'0'` characters. An all-zero string becomes empty.
fn trim_zeroes(s: &str) -> &str {
    s.trim_end_matches('0')
}

#[cfg(test)]
mod tests {
    use super::*;

    // -- parse_sol ----------------------------------------------------------

    #[test]
    fn parse_whole_number() {
        assert_eq!(parse_sol("3").unwrap(), 3_000_000_000);
        assert_eq!(parse_sol("0").unwrap(), 0);
    }

    #[test]
    fn parse_decimal() {
        assert_eq!(parse_sol("1.5").unwrap(), 1_500_000_000);
        assert_eq!(parse_sol("2.25").unwrap(), 2_250_000_000);
        assert_eq!(parse_sol("0.12").unwrap(), 120_000_000);
    }

    #[test]
    fn parse_one_lamport() {
        assert_eq!(parse_sol("0.000000001").unwrap(), 1);
    }

    #[test]
    fn parse_empty_whole_part() {
        assert_eq!(parse_sol(".5").unwrap(), 500_000_000);
    }

    #[test]
    fn parse_empty_fraction_part() {
        assert_eq!(parse_sol("7.").unwrap(), 7_000_000_000);
    }

    #[test]
    fn parse_all_zero_fraction() {
        assert_eq!(parse_sol("4.000").unwrap(), 4_000_000_000);
        // More zeros than decimals is still exact.
        assert_eq!(parse_sol("4.0000000000000").unwrap(), 4_000_000_000);
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_sol("  1.5\n").unwrap(), 1_500_000_000);
    }

    #[test]
    fn parse_leading_zeroes_in_fraction() {
        assert_eq!(parse_sol("0.05").unwrap(), 50_000_000);
        assert_eq!(parse_sol("1.0012").unwrap(), 1_001_200_000);
    }

    #[test]
    fn parse_full_precision() {
        assert_eq!(parse_sol("0.123456789").unwrap(), 123_456_789);
    }

    #[test]
    fn parse_too_much_precision() {
        assert_eq!(
            parse_sol("0.1234567891"),
            Err(AmountError::PrecisionOverflow("0.1234567891".into()))
        );
        assert!(matches!(
            parse_sol("0.0000000001"),
            Err(AmountError::PrecisionOverflow(_))
        ));
    }

    #[test]
    fn parse_empty_input() {
        assert_eq!(parse_sol(""), Err(AmountError::EmptyInput));
        assert_eq!(parse_sol("   "), Err(AmountError::EmptyInput));
    }

    #[test]
    fn parse_invalid_format() {
        for input in ["1.2.3", "abc", ".", "1.x", "x.5", "-1", "+1", "1 .5", "1e9"] {
            assert!(
                matches!(parse_sol(input), Err(AmountError::InvalidFormat(_))),
                "expected InvalidFormat for {input:?}"
            );
        }
    }

    #[test]
    fn parse_largest_representable() {
        // u64::MAX = 18_446_744_073_709_551_615
        assert_eq!(parse_sol("18446744073.709551615").unwrap(), u64::MAX);
        assert_eq!(parse_sol("18446744073").unwrap(), 18_446_744_073_000_000_000);
    }

    #[test]
    fn parse_overflow() {
        assert!(matches!(
            parse_sol("18446744074"),
            Err(AmountError::Overflow(_))
        ));
        assert!(matches!(
            parse_sol("18446744073.709551616"),
            Err(AmountError::Overflow(_))
        ));
        assert!(matches!(
            parse_sol("99999999999999999999999"),
            Err(AmountError::Overflow(_))
        ));
    }

    // -- format_lamports ----------------------------------------------------

    #[test]
    fn format_zero() {
        assert_eq!(format_lamports(0), "0 SOL");
    }

    #[test]
    fn format_dust_in_lamports() {
        assert_eq!(format_lamports(42), "42 LAMPORTS");
        assert_eq!(format_lamports(99_999), "99999 LAMPORTS");
    }

    #[test]
    fn format_small_amounts() {
        assert_eq!(format_lamports(100_000), "0.0001 SOL");
        assert_eq!(format_lamports(150_000), "0.0001 SOL");
        assert_eq!(format_lamports(1_500_000), "0.0015 SOL");
        assert_eq!(format_lamports(10_000_000), "0.01 SOL");
        assert_eq!(format_lamports(49_999_999), "0.0499 SOL");
    }

    #[test]
    fn format_large_amounts() {
        assert_eq!(format_lamports(50_000_000), "0.05 SOL");
        assert_eq!(format_lamports(1_000_000_000), "1 SOL");
        assert_eq!(format_lamports(1_500_000_000), "1.5 SOL");
        assert_eq!(format_lamports(1_010_000_000), "1.01 SOL");
        // Precision below 10^-2 SOL is dropped.
        assert_eq!(format_lamports(2_009_999_999), "2 SOL");
    }

    #[test]
    fn format_is_lossy() {
        let lamports = parse_sol("1.23456").unwrap();
        assert_eq!(format_lamports(lamports), "1.23 SOL");
    }

    #[test]
    fn sol_display() {
        assert_eq!(Sol(1_500_000_000).to_string(), "1.5 SOL");
        assert_eq!(format!("{}", Sol(7)), "7 LAMPORTS");
    }

    #[test]
    fn trim_zeroes_cases() {
        assert_eq!(trim_zeroes("0100"), "01");
        assert_eq!(trim_zeroes("0000"), "");
        assert_eq!(trim_zeroes("15"), "15");
    }
}
