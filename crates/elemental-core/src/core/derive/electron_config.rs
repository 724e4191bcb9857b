/// Shell letters whose trailing digit run is an electron count.
const SHELL_LETTERS: [char; 4] = ['s', 'p', 'd', 'f'];

const SUPERSCRIPT_DIGITS: [char; 10] = ['⁰', '¹', '²', '³', '⁴', '⁵', '⁶', '⁷', '⁸', '⁹'];

/// Renders a raw configuration such as `"[Xe] 4f14 5d10 6s2"` for display.
///
/// Every digit run immediately following a shell letter is converted to superscript,
/// digit by digit, so multi-digit counts stay intact (`4f14` becomes `4f¹⁴`). Digits
/// before a shell letter are shell indices and are left untouched.
pub fn format_electron_config(raw: &str) -> String {
    let mut formatted = String::with_capacity(raw.len() * 2);
    let mut after_shell_letter = false;

    for c in raw.chars() {
        match c.to_digit(10) {
            Some(digit) if after_shell_letter => {
                formatted.push(SUPERSCRIPT_DIGITS[digit as usize]);
            }
            _ => {
                after_shell_letter = SHELL_LETTERS.contains(&c);
                formatted.push(c);
            }
        }
    }

    formatted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn superscripts_only_the_electron_counts() {
        assert_eq!(format_electron_config("1s2 2s2 2p6"), "1s² 2s² 2p⁶");
    }

    #[test]
    fn multi_digit_counts_are_converted_digit_by_digit() {
        assert_eq!(format_electron_config("[Kr] 4d10 5s2"), "[Kr] 4d¹⁰ 5s²");
        assert_eq!(
            format_electron_config("[Xe] 4f14 5d10 6s2 6p2"),
            "[Xe] 4f¹⁴ 5d¹⁰ 6s² 6p²"
        );
    }

    #[test]
    fn unspaced_configurations_take_the_whole_digit_run_as_the_count() {
        assert_eq!(format_electron_config("1s22s22p6"), "1s²²s²²p⁶");
        assert_eq!(format_electron_config("1s2"), "1s²");
    }

    #[test]
    fn text_without_shell_counts_is_unchanged() {
        assert_eq!(format_electron_config(""), "");
        assert_eq!(format_electron_config("[He]"), "[He]");
        assert_eq!(format_electron_config("1s² 2s¹"), "1s² 2s¹");
    }
}
