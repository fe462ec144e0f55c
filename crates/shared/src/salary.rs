//! Salary rendering in Indian conventions (lakhs per annum, thousands).

pub const CURRENCY_SYMBOL: char = '₹';

const LAKH: f64 = 100_000.0;
const THOUSAND: f64 = 1_000.0;

/// Formats a predicted salary for display.
///
/// Amounts of at least one lakh render as `₹12.50 LPA`, amounts of at least
/// one thousand as `₹5.0K`, anything smaller as a whole number.
pub fn format_salary(amount: f64) -> String {
    if amount >= LAKH {
        format!("{CURRENCY_SYMBOL}{} LPA", fixed(amount / LAKH, 2))
    } else if amount >= THOUSAND {
        format!("{CURRENCY_SYMBOL}{}K", fixed(amount / THOUSAND, 1))
    } else {
        format!("{CURRENCY_SYMBOL}{}", fixed(amount, 0))
    }
}

/// Enough fractional digits to tell any double in salary range from a tie.
const EXACT_DIGITS: usize = 40;

/// Renders `value` with `digits` decimals, rounding its exact binary value
/// half up. `1.45` is stored below the tie and so becomes `1.4`; `1.25` is an
/// exact tie and becomes `1.3`.
fn fixed(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return value.to_string();
    }

    let exact = format!("{:.*}", EXACT_DIGITS, value.abs());
    let (int_part, frac_part) = exact.split_once('.').unwrap_or((exact.as_str(), ""));
    let mut kept: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().take(digits))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(digits).is_some_and(|next| *next >= b'5') {
        let mut carry = true;
        for digit in kept.iter_mut().rev() {
            if *digit == 9 {
                *digit = 0;
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            kept.insert(0, 1);
        }
    }

    let int_len = kept.len() - digits;
    let mut out = String::with_capacity(kept.len() + 2);
    if value < 0.0 {
        out.push('-');
    }
    for (index, digit) in kept.into_iter().enumerate() {
        if index == int_len {
            out.push('.');
        }
        out.push(char::from(b'0' + digit));
    }
    out
}
