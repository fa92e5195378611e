//! Classifier for the text of a numeric literal.
//!
//! The number reader collects a run of bytes and hands it to
//! [`match_number`], which tries the integer, float and ratio grammars in
//! that order. The first grammar that matches decides the outcome, even if
//! converting the matched text then fails.

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::Zero;

use super::error::ErrorCode;
use crate::Number;

type Matched = Option<Result<Number, ErrorCode>>;

pub(crate) fn match_number(s: &str) -> Result<Number, ErrorCode> {
    match_integer(s)
        .or_else(|| match_float(s))
        .or_else(|| match_ratio(s))
        .unwrap_or(Err(ErrorCode::InvalidNumber))
}

fn split_sign(s: &str) -> (bool, &str) {
    match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    }
}

fn all_digits(s: &str, radix: u32) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_digit(radix))
}

fn match_integer(s: &str) -> Matched {
    let (negative, unsigned) = split_sign(s);
    let (body, big) = match unsigned.strip_suffix('N') {
        Some(body) => (body, true),
        None => (unsigned, false),
    };
    let (radix, digits) = match integer_body(body)? {
        Ok(parts) => parts,
        Err(code) => return Some(Err(code)),
    };
    Some(if big {
        big_integer(negative, digits, radix)
    } else {
        integer(negative, digits, radix)
    })
}

/// Splits an unsigned integer body into radix and digits.
fn integer_body(body: &str) -> Option<Result<(u32, &str), ErrorCode>> {
    let bytes = body.as_bytes();
    match bytes {
        [b'0'] => Some(Ok((10, body))),
        [b'0', b'x', ..] | [b'0', b'X', ..] => {
            let digits = &body[2..];
            if all_digits(digits, 16) {
                Some(Ok((16, digits)))
            } else {
                None
            }
        }
        [b'0', ..] => {
            let digits = &body[1..];
            // Anything else, `08` included, is left to the float grammar.
            if all_digits(digits, 8) {
                Some(Ok((8, digits)))
            } else {
                None
            }
        }
        [b'1'..=b'9', ..] => match body.find(|c| c == 'r' || c == 'R') {
            Some(pos @ 1..=2) => {
                let (prefix, digits) = (&body[..pos], &body[pos + 1..]);
                if !all_digits(prefix, 10)
                    || digits.is_empty()
                    || !digits.bytes().all(|b| b.is_ascii_alphanumeric())
                {
                    return None;
                }
                let radix = prefix.parse::<u32>().ok()?;
                if !(2..=36).contains(&radix) {
                    Some(Err(ErrorCode::RadixOutOfRange(radix)))
                } else if !all_digits(digits, radix) {
                    Some(Err(ErrorCode::InvalidNumber))
                } else {
                    Some(Ok((radix, digits)))
                }
            }
            Some(_) => None,
            None => {
                if all_digits(body, 10) {
                    Some(Ok((10, body)))
                } else {
                    None
                }
            }
        },
        _ => None,
    }
}

fn integer(negative: bool, digits: &str, radix: u32) -> Result<Number, ErrorCode> {
    // The digits are validated already, so the only possible failure is
    // overflow.
    let magnitude =
        u64::from_str_radix(digits, radix).map_err(|_| ErrorCode::NumberOutOfRange)?;
    let n = if negative {
        -i128::from(magnitude)
    } else {
        i128::from(magnitude)
    };
    i64::try_from(n)
        .map(Number::from)
        .map_err(|_| ErrorCode::NumberOutOfRange)
}

fn big_integer(negative: bool, digits: &str, radix: u32) -> Result<Number, ErrorCode> {
    let magnitude =
        BigInt::parse_bytes(digits.as_bytes(), radix).ok_or(ErrorCode::InvalidNumber)?;
    Ok(Number::from(if negative { -magnitude } else { magnitude }))
}

fn match_float(s: &str) -> Matched {
    let bytes = s.as_bytes();
    let mut i = match bytes.first() {
        Some(b'-') | Some(b'+') => 1,
        _ => 0,
    };
    let skip_digits = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let start = i;
    i = skip_digits(i);
    if i == start {
        return None;
    }
    if bytes.get(i) == Some(&b'.') {
        i = skip_digits(i + 1);
    }
    if let Some(b'e') | Some(b'E') = bytes.get(i) {
        i += 1;
        if let Some(b'-') | Some(b'+') = bytes.get(i) {
            i += 1;
        }
        let exponent = i;
        i = skip_digits(i);
        if i == exponent {
            return None;
        }
    }
    let text = &s[..i];
    match &s[i..] {
        "" => {}
        "M" => return Some(Err(ErrorCode::BigDecimal)),
        _ => return None,
    }

    Some(match text.parse::<f64>() {
        Ok(f) if f.is_finite() => Ok(Number::from(f)),
        Ok(_) => Err(ErrorCode::NumberOutOfRange),
        Err(_) => Err(ErrorCode::InvalidNumber),
    })
}

fn match_ratio(s: &str) -> Matched {
    let (negative, unsigned) = split_sign(s);
    let (numer, denom) = unsigned.split_once('/')?;
    if !all_digits(numer, 10) || !all_digits(denom, 10) {
        return None;
    }
    let numer = BigInt::parse_bytes(numer.as_bytes(), 10)?;
    let denom = BigInt::parse_bytes(denom.as_bytes(), 10)?;
    if denom.is_zero() {
        return Some(Err(ErrorCode::InvalidNumber));
    }
    let numer = if negative { -numer } else { numer };
    Some(Ok(Number::from(BigRational::new(numer, denom))))
}
