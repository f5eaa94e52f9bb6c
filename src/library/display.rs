use std::path::Path;

/// Build the display name for a sound file.
///
/// The extension is dropped, `_`, `-` and `.` become spaces and the result is
/// title-cased: the first letter of every alphabetic run is upper-cased and
/// the rest lower-cased, so `coffee_shop.ogg` reads `Coffee Shop`.
pub fn display_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    let spaced: String = stem
        .chars()
        .map(|c| if matches!(c, '_' | '-' | '.') { ' ' } else { c })
        .collect();

    title_case(&spaced)
}

fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_restarts_after_non_letters() {
        assert_eq!(title_case("coffee shop"), "Coffee Shop");
        assert_eq!(title_case("STORM"), "Storm");
        assert_eq!(title_case("rain2night"), "Rain2Night");
        assert_eq!(title_case(""), "");
    }
}
