//! Display formatting for prices, currency amounts and large numbers
//!
//! All functions are pure and never fail. A missing value (`None`) renders
//! as a zero string instead of an error.
//!
//! Fixed-decimal rounding follows the usual "to N places" semantics: the
//! exact binary value is rounded, ties go away from zero, and the result is
//! then normalized back to its shortest decimal form (`"0.500000"` becomes
//! `"0.5"`, `"2.00"` becomes `"2"`).

use std::iter;

/// Prefix used by `format_currency`
pub const DEFAULT_CURRENCY_PREFIX: &str = "$";

const BILLION: f64 = 1e9;
const MILLION: f64 = 1e6;
const THOUSAND: f64 = 1e3;

/// Formats a USD amount with `k`/`M`/`B` abbreviations
///
/// ```
/// use coin_market_sdk::format::format_currency;
///
/// assert_eq!(format_currency(Some(0.5)), "$0.5");
/// assert_eq!(format_currency(Some(2_500_000.0)), "$2.5M");
/// assert_eq!(format_currency(None), "$0");
/// ```
pub fn format_currency(value: Option<f64>) -> String {
    format_currency_with(value, DEFAULT_CURRENCY_PREFIX)
}

/// Formats a currency amount with a custom symbol prefix
///
/// Values below 1 keep 6 decimals and values below 10 keep 4, before any
/// abbreviation is considered. Thousands use a lowercase `k`.
pub fn format_currency_with(value: Option<f64>, prefix: &str) -> String {
    let Some(value) = value else {
        return format!("{}0", prefix);
    };

    if value < 1.0 {
        return format!("{}{}", prefix, normalize_fixed(value, 6));
    } else if value < 10.0 {
        return format!("{}{}", prefix, normalize_fixed(value, 4));
    }

    if value >= BILLION {
        format!("{}{}B", prefix, normalize_fixed(value / BILLION, 2))
    } else if value >= MILLION {
        format!("{}{}M", prefix, normalize_fixed(value / MILLION, 2))
    } else if value >= THOUSAND {
        format!("{}{}k", prefix, normalize_fixed(value / THOUSAND, 2))
    } else {
        format!("{}{}", prefix, grouped(value))
    }
}

/// Formats a plain quantity with `K`/`M`/`B` abbreviations
///
/// Below one thousand the number is printed as-is.
pub fn format_large_number(value: Option<f64>) -> String {
    let Some(value) = value else {
        return "0".to_string();
    };

    if value >= BILLION {
        format!("{}B", normalize_fixed(value / BILLION, 2))
    } else if value >= MILLION {
        format!("{}M", normalize_fixed(value / MILLION, 2))
    } else if value >= THOUSAND {
        format!("{}K", normalize_fixed(value / THOUSAND, 2))
    } else {
        number_string(value)
    }
}

/// Formats a coin price with precision depending on its magnitude
///
/// Sub-cent prices keep 6 decimals, sub-dollar prices 4, and everything
/// else is grouped with at most 2 decimals.
pub fn format_price(value: Option<f64>) -> String {
    let Some(price) = value else {
        return "0".to_string();
    };

    if price < 0.01 {
        normalize_fixed(price, 6)
    } else if price < 1.0 {
        normalize_fixed(price, 4)
    } else {
        grouped(price)
    }
}

/// Rounds to `digits` decimals, then renders the shortest form of the result
fn normalize_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return number_string(value);
    }

    let fixed = to_fixed(value, digits);
    match fixed.parse::<f64>() {
        Ok(parsed) => number_string(parsed),
        Err(_) => fixed,
    }
}

/// Fixed-decimal rendering with ties rounded away from zero
fn to_fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() || value.abs() >= 1e21 {
        return number_string(value);
    }

    // An exact tie is a multiple of 2^-(digits + 1), so its decimal expansion
    // ends at digit `digits + 1`. Rust rounds those half to even.
    let scale = 2f64.powi(digits as i32 + 1);
    if (value * scale).fract() == 0.0 {
        let exact = format!("{:.*}", digits + 1, value);
        if exact.ends_with('5') {
            return match exact.strip_prefix('-') {
                Some(magnitude) => format!("-{}", round_half_up(magnitude, digits)),
                None => round_half_up(&exact, digits),
            };
        }
    }

    format!("{:.*}", digits, value)
}

/// Shortest decimal rendering of a number
///
/// Exponent notation is used only for magnitudes of 1e21 and above or
/// non-zero magnitudes below 1e-6. Negative zero renders as `0`.
fn number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs();
    if magnitude >= 1e21 || magnitude < 1e-6 {
        let exp = format!("{:e}", value);
        return match exp.split_once('e') {
            Some((mantissa, power)) if !power.starts_with('-') => {
                format!("{}e+{}", mantissa, power)
            }
            _ => exp,
        };
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}", sign, shortest_decimal(magnitude))
}

/// Shortest round-trip digits of a positive finite number
///
/// When two shortest forms are equally close to the value, the one with the
/// even final digit wins. `f64::to_string` may pick either.
fn shortest_decimal(magnitude: f64) -> String {
    let repr = magnitude.to_string();
    let places = repr.split_once('.').map_or(0, |(_, frac)| frac.len());
    if places == 0 {
        return repr;
    }

    // Equally close means the exact value sits halfway, one digit further out.
    let scale = 2f64.powi(places as i32 + 1);
    if (magnitude * scale).fract() == 0.0 {
        let exact = format!("{:.*}", places + 1, magnitude);
        if exact.ends_with('5') {
            let even = round_half_even(&exact, places);
            return even.trim_end_matches('0').trim_end_matches('.').to_string();
        }
    }

    repr
}

/// en-US style rendering: thousands separators, 0 to 2 fraction digits
fn grouped(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let sign = if value < 0.0 { "-" } else { "" };
    let rounded = round_half_up(&shortest_decimal(value.abs()), 2);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');

    let (int_part, frac_part) = trimmed.split_once('.').unwrap_or((trimmed, ""));
    let mut out = format!("{}{}", sign, group_thousands(int_part));
    if !frac_part.is_empty() {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

/// Rounds a plain non-negative decimal string half-up to `places` decimals
fn round_half_up(repr: &str, places: usize) -> String {
    round_decimal(repr, places, false)
}

/// Rounds a plain non-negative decimal string half-to-even
fn round_half_even(repr: &str, places: usize) -> String {
    round_decimal(repr, places, true)
}

fn round_decimal(repr: &str, places: usize, ties_to_even: bool) -> String {
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr, ""));

    if frac_part.len() <= places {
        let mut out = int_part.to_string();
        if places > 0 {
            out.push('.');
            out.push_str(frac_part);
            out.extend(iter::repeat('0').take(places - frac_part.len()));
        }
        return out;
    }

    let mut digits = int_part
        .bytes()
        .chain(frac_part[..places].bytes())
        .collect::<Vec<_>>();

    let dropped = &frac_part.as_bytes()[places..];
    let round_up = match dropped[0] {
        b'6'..=b'9' => true,
        b'5' if ties_to_even => {
            let past_half = dropped[1..].iter().any(|&d| d != b'0');
            let odd = digits.last().is_some_and(|&d| (d - b'0') % 2 == 1);
            past_half || odd
        }
        b'5' => true,
        _ => false,
    };

    if round_up {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, b'1');
                break;
            }
            i -= 1;
            if digits[i] == b'9' {
                digits[i] = b'0';
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - places;
    let mut out = digits[..split].iter().map(|&b| b as char).collect::<String>();
    if places > 0 {
        out.push('.');
        out.extend(digits[split..].iter().map(|&b| b as char));
    }
    out
}

fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_missing_value() {
        assert_eq!(format_currency(None), "$0");
        assert_eq!(format_currency_with(None, "€"), "€0");
    }

    #[test]
    fn currency_small_values_keep_precision() {
        assert_eq!(format_currency(Some(0.0)), "$0");
        assert_eq!(format_currency(Some(0.5)), "$0.5");
        assert_eq!(format_currency(Some(0.00012345678)), "$0.000123");
        assert_eq!(format_currency(Some(0.0000004)), "$0");
        assert_eq!(format_currency(Some(5.123456)), "$5.1235");
        assert_eq!(format_currency(Some(9.99999)), "$10");
        assert_eq!(format_currency_with(Some(0.25), "€"), "€0.25");
    }

    #[test]
    fn currency_sub_one_matches_six_place_rounding() {
        for v in [0.1, 0.123_456_7, 0.999_999_4, 0.042, 0.000_001] {
            let expected = format!("${}", format!("{:.6}", v).parse::<f64>().unwrap());
            assert_eq!(format_currency(Some(v)), expected);
        }
    }

    #[test]
    fn currency_abbreviations() {
        assert_eq!(format_currency(Some(1234.0)), "$1.23k");
        assert_eq!(format_currency(Some(999_999.0)), "$1000k");
        assert_eq!(format_currency(Some(2_500_000.0)), "$2.5M");
        assert_eq!(format_currency(Some(1_260_000_000_000.0)), "$1260B");
        assert_eq!(format_currency(Some(1_125_000_000.0)), "$1.13B");
    }

    #[test]
    fn currency_mid_range_is_grouped() {
        assert_eq!(format_currency(Some(12.5)), "$12.5");
        assert_eq!(format_currency(Some(145.678)), "$145.68");
        assert_eq!(format_currency(Some(999.999)), "$1,000");
    }

    #[test]
    fn thousands_suffix_case_differs() {
        for v in [1_000.0, 45_300.0, 999_000.0] {
            assert!(format_currency(Some(v)).ends_with('k'));
            assert!(format_large_number(Some(v)).ends_with('K'));
        }
    }

    #[test]
    fn currency_negative_values_take_small_branch() {
        assert_eq!(format_currency(Some(-3.0)), "$-3");
        assert_eq!(format_currency(Some(-0.0000001)), "$0");
    }

    #[test]
    fn large_numbers() {
        assert_eq!(format_large_number(None), "0");
        assert_eq!(format_large_number(Some(1_500_000.0)), "1.5M");
        assert_eq!(format_large_number(Some(2_000_000_000.0)), "2B");
        assert_eq!(format_large_number(Some(1500.0)), "1.5K");
        assert_eq!(format_large_number(Some(999.0)), "999");
        assert_eq!(format_large_number(Some(12.5)), "12.5");
        assert_eq!(format_large_number(Some(0.0000001)), "1e-7");
        assert_eq!(format_large_number(Some(-0.0)), "0");
    }

    #[test]
    fn prices() {
        assert_eq!(format_price(None), "0");
        assert_eq!(format_price(Some(0.005)), "0.005");
        assert_eq!(format_price(Some(0.0000123456)), "0.000012");
        assert_eq!(format_price(Some(0.5)), "0.5");
        assert_eq!(format_price(Some(0.123456)), "0.1235");
        assert_eq!(format_price(Some(1.0)), "1");
        assert_eq!(format_price(Some(1.005)), "1.01");
        assert_eq!(format_price(Some(64_123.456)), "64,123.46");
        assert_eq!(format_price(Some(1_000_000.0)), "1,000,000");
    }

    #[test]
    fn non_finite_values() {
        assert_eq!(format_currency(Some(f64::NAN)), "$NaN");
        assert_eq!(format_currency(Some(f64::INFINITY)), "$InfinityB");
        assert_eq!(format_large_number(Some(f64::NAN)), "NaN");
        assert_eq!(format_price(Some(f64::INFINITY)), "∞");
    }

    #[test]
    fn exact_ties_round_away_from_zero() {
        assert_eq!(to_fixed(1.125, 2), "1.13");
        assert_eq!(to_fixed(-1.125, 2), "-1.13");
        assert_eq!(to_fixed(2.5, 0), "3");
        assert_eq!(to_fixed(0.15, 1), "0.1");
    }

    #[test]
    fn half_up_carries() {
        assert_eq!(round_half_up("9.995", 2), "10.00");
        assert_eq!(round_half_up("12", 2), "12.00");
        assert_eq!(round_half_up("0.125", 2), "0.13");
        assert_eq!(round_half_up("99.5", 0), "100");
    }

    #[test]
    fn half_even_ties() {
        assert_eq!(round_half_even("0.125", 2), "0.12");
        assert_eq!(round_half_even("0.135", 2), "0.14");
        assert_eq!(round_half_even("0.1251", 2), "0.13");
        assert_eq!(round_half_even("2.5", 0), "2");
    }

    #[test]
    fn shortest_form_picks_even_digit_when_equally_close() {
        assert_eq!(shortest_decimal(89_392_721_652_984.625), "89392721652984.62");
        assert_eq!(format_price(Some(89_392_721_652_984.625)), "89,392,721,652,984.62");
        assert_eq!(shortest_decimal(0.375), "0.375");
        assert_eq!(shortest_decimal(1.5), "1.5");
        assert_eq!(shortest_decimal(0.1), "0.1");
    }

    #[test]
    fn number_string_exponents() {
        assert_eq!(number_string(1.5e21), "1.5e+21");
        assert_eq!(number_string(2e-7), "2e-7");
        assert_eq!(number_string(0.000001), "0.000001");
        assert_eq!(number_string(123456.75), "123456.75");
    }
}
