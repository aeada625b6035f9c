/// Accent hues offered by the palette button: blue, green, purple, orange, pink.
pub const HUES: [u16; 5] = [210, 152, 268, 12, 328];

/// Cycling selection over [`HUES`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Palette {
    index: usize,
}

impl Palette {
    /// Restores the selection from a stored index string.
    ///
    /// The leading integer is used (`"2.7"` reads as 2, `"3abc"` as 3) and
    /// wraps modulo the palette length, negatives included. Without a leading
    /// integer the first hue is selected.
    pub fn restore(saved: Option<&str>) -> Self {
        let index = saved
            .and_then(leading_integer)
            .map(|i| i.rem_euclid(HUES.len() as i64) as usize)
            .unwrap_or(0);
        Self { index }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn hue(&self) -> u16 {
        HUES[self.index]
    }

    /// Moves to the next hue and returns it.
    pub fn advance(&mut self) -> u16 {
        self.index = (self.index + 1) % HUES.len();
        self.hue()
    }

    /// Value written to the hue custom property.
    pub fn css_value(&self) -> String {
        self.hue().to_string()
    }

    /// Value written to storage.
    pub fn stored_value(&self) -> String {
        self.index.to_string()
    }
}

fn leading_integer(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let b = s.as_bytes();
    let sign = usize::from(matches!(b.first(), Some(b'+' | b'-')));
    let digits = b[sign..].iter().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }
    s[..sign + digits].parse().ok()
}
