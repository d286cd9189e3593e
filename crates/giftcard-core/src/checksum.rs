//! Luhn (modulo-10 double-and-reduce) check digits
//!
//! The check digit is always computed over "all but the last digit, padded
//! with a placeholder", so generation and verification share one routine.

/// Shortest number that [`verify`] will check
pub const MIN_CHECKED_LENGTH: usize = 15;

/// Luhn check digit over `digits`, whose final position is a placeholder
/// that does not take part in doubling.
fn luhn_digit(digits: &[u32]) -> u32 {
    let len = digits.len();
    let sum: u32 = digits
        .iter()
        .enumerate()
        .map(|(i, &d)| {
            // Every second digit counting leftward from the second-to-last
            if (len - 1 - i) % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    (10 - sum % 10) % 10
}

fn parse_digits(number: &str) -> Option<Vec<u32>> {
    number
        .chars()
        .map(|c| c.to_digit(10))
        .collect()
}

/// Compute the digit to append to `partial` so the result passes Luhn.
///
/// Returns `None` when `partial` contains anything other than ASCII digits.
pub fn check_digit(partial: &str) -> Option<u8> {
    let mut digits = parse_digits(partial)?;
    digits.push(0);
    Some(luhn_digit(&digits) as u8)
}

/// Verify the trailing check digit of a complete number.
///
/// Numbers shorter than [`MIN_CHECKED_LENGTH`] or containing non-digits
/// never verify.
pub fn verify(full: &str) -> bool {
    if full.len() < MIN_CHECKED_LENGTH {
        return false;
    }

    let Some((body, last)) = split_last_digit(full) else {
        return false;
    };

    check_digit(body) == Some(last)
}

/// `partial` with its check digit appended
pub fn append_check_digit(partial: &str) -> Option<String> {
    let digit = check_digit(partial)?;
    let mut full = String::with_capacity(partial.len() + 1);
    full.push_str(partial);
    full.push(char::from(b'0' + digit));
    Some(full)
}

fn split_last_digit(full: &str) -> Option<(&str, u8)> {
    let last = full.chars().next_back()?;
    let digit = last.to_digit(10)?;
    Some((&full[..full.len() - last.len_utf8()], digit as u8))
}
