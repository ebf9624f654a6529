use regex::Regex;
use std::sync::OnceLock;

const MAX_DIGITS: usize = 11;

fn landline() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})(\d{4})(\d{0,4})").expect("valid landline pattern"))
}

fn mobile() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^(\d{2})(\d{5})(\d{0,4})").expect("valid mobile pattern"))
}

/// Brazilian phone mask: `(DD) NNNN-NNNN` up to ten digits, `(DD)
/// NNNNN-NNNN` for eleven. Non-digits are dropped and extra digits cut off.
/// Inputs too short to carry an area code and prefix come back as bare digits.
pub fn format_phone(input: &str) -> String {
    let digits: String = input
        .chars()
        .filter(char::is_ascii_digit)
        .take(MAX_DIGITS)
        .collect();

    let pattern = if digits.len() <= 10 { landline() } else { mobile() };
    let masked = pattern.replace(&digits, "($1) $2-$3");
    masked.strip_suffix('-').unwrap_or(&masked).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_digits() {
        assert_eq!(format_phone("1632217569"), "(16) 3221-7569");
    }

    #[test]
    fn eleven_digits() {
        assert_eq!(format_phone("16982217569"), "(16) 98221-7569");
    }

    #[test]
    fn strips_non_digits_first() {
        assert_eq!(format_phone("+(16) 98221-7569"), "(16) 98221-7569");
        assert_eq!(format_phone("16 3221.7569"), "(16) 3221-7569");
    }

    #[test]
    fn already_masked_input_is_stable() {
        let once = format_phone("16982217569");
        assert_eq!(format_phone(&once), once);
    }

    #[test]
    fn extra_digits_are_cut() {
        assert_eq!(format_phone("1698221756999"), "(16) 98221-7569");
    }

    #[test]
    fn partial_input() {
        assert_eq!(format_phone(""), "");
        assert_eq!(format_phone("16"), "16");
        assert_eq!(format_phone("16322"), "16322");
        assert_eq!(format_phone("163221"), "(16) 3221");
        assert_eq!(format_phone("1632217"), "(16) 3221-7");
    }

    #[test]
    fn every_full_length_input_matches_its_mask() {
        for len in [10usize, 11] {
            let digits: String = (0..len).map(|i| char::from(b'0' + (i % 10) as u8)).collect();
            let masked = format_phone(&digits);
            let expected = if len == 10 {
                format!("({}) {}-{}", &digits[..2], &digits[2..6], &digits[6..])
            } else {
                format!("({}) {}-{}", &digits[..2], &digits[2..7], &digits[7..])
            };
            assert_eq!(masked, expected);
        }
    }
}
