// Maidenhead grid square handling
//
// A locator is usable when its first four characters are two letters
// followed by two digits. Scoring only ever looks at that 4-character
// prefix, uppercased.

/// True when the code is at least four characters and starts with two
/// letters followed by two digits
pub fn is_valid_grid(grid: &str) -> bool {
    let b = grid.as_bytes();
    b.len() >= 4
        && b[0].is_ascii_alphabetic()
        && b[1].is_ascii_alphabetic()
        && b[2].is_ascii_digit()
        && b[3].is_ascii_digit()
}

/// First four characters, uppercased. Shorter input comes back as-is
/// (still uppercased); validity is the caller's concern.
pub fn normalize_grid(grid: &str) -> String {
    grid.chars()
        .take(4)
        .collect::<String>()
        .to_ascii_uppercase()
}
