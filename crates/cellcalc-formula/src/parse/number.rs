//! Culture-aware number parsing

use cellcalc_core::Culture;

/// Parse numeric text in the given culture
///
/// Accepts an optional sign, the culture's decimal separator, digit groups
/// in the integer part (every group after the first must have exactly three
/// digits), an exponent and a trailing `%`. Empty text is not a number.
pub fn parse_number(text: &str, culture: &Culture) -> Option<f64> {
    let mut s = text.trim();
    if s.is_empty() {
        return None;
    }

    let percent = match s.strip_suffix('%') {
        Some(rest) => {
            s = rest.trim_end();
            true
        }
        None => false,
    };

    let negative = match s.chars().next() {
        Some('-') => {
            s = &s[1..];
            true
        }
        Some('+') => {
            s = &s[1..];
            false
        }
        _ => false,
    };

    let (mantissa, exponent) = match s.find(['e', 'E']) {
        Some(i) => (&s[..i], Some(&s[i + 1..])),
        None => (s, None),
    };

    let decimal = culture.decimal_separator();
    let (int_part, frac_part) = match mantissa.find(decimal) {
        Some(i) => (&mantissa[..i], Some(&mantissa[i + decimal.len_utf8()..])),
        None => (mantissa, None),
    };

    let digits = integer_digits(int_part, culture)?;
    let frac = frac_part.unwrap_or_default();
    if !frac.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    if digits.is_empty() && frac.is_empty() {
        return None;
    }

    let mut canonical = if digits.is_empty() {
        String::from("0")
    } else {
        digits
    };
    if !frac.is_empty() {
        canonical.push('.');
        canonical.push_str(frac);
    }
    if let Some(exp) = exponent {
        let unsigned = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        if unsigned.is_empty() || !unsigned.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        canonical.push('e');
        canonical.push_str(exp);
    }

    let mut value: f64 = canonical.parse().ok()?;
    if negative {
        value = -value;
    }
    if percent {
        value /= 100.0;
    }
    value.is_finite().then_some(value)
}

/// Digits of the integer part with group separators removed
fn integer_digits(part: &str, culture: &Culture) -> Option<String> {
    let groups: Vec<&str> = part.split(|c| culture.is_group_separator(c)).collect();
    let all_digits = |g: &str| g.chars().all(|c| c.is_ascii_digit());

    if groups.len() == 1 {
        return all_digits(part).then(|| part.to_string());
    }

    let (first, rest) = groups.split_first()?;
    if first.is_empty() || first.len() > 3 || !all_digits(first) {
        return None;
    }
    if rest.iter().any(|g| g.len() != 3 || !all_digits(g)) {
        return None;
    }
    Some(groups.concat())
}
