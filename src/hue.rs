/// Reads an accent hue from a computed custom-property value.
///
/// Accepts what the page writes (`"210"`, `" 152"`) and, like CSS number
/// parsing in script land, the longest numeric prefix of anything else
/// (`"268deg"` reads as 268). Empty, non-numeric or non-finite input yields
/// `default`.
pub fn parse_hue(raw: &str, default: f32) -> f32 {
    let s = raw.trim_start();
    let end = numeric_prefix_len(s);
    s[..end]
        .parse::<f32>()
        .ok()
        .filter(|h| h.is_finite())
        .unwrap_or(default)
}

fn numeric_prefix_len(s: &str) -> usize {
    let b = s.as_bytes();
    let mut i = 0;
    if matches!(b.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while b.get(i).is_some_and(u8::is_ascii_digit) {
        i += 1;
    }
    let mut digits = i - int_start;
    if b.get(i) == Some(&b'.') {
        let frac_start = i + 1;
        let mut j = frac_start;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if digits > 0 || j > frac_start {
            digits += j - frac_start;
            i = j;
        }
    }
    if digits == 0 {
        return 0;
    }
    if matches!(b.get(i), Some(b'e' | b'E')) {
        let mut j = i + 1;
        if matches!(b.get(j), Some(b'+' | b'-')) {
            j += 1;
        }
        let exp_start = j;
        while b.get(j).is_some_and(u8::is_ascii_digit) {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }
    i
}
