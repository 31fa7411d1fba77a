use pinyin::ToPinyin;

const PUNCTUATION: &[(char, char)] = &[('：', ':'), ('（', '('), ('）', ')'), ('，', ',')];

fn is_han(ch: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&ch)
}

pub fn contains_han(text: &str) -> bool {
    text.chars().any(is_han)
}

pub fn is_localized_sort_title(value: Option<&str>) -> bool {
    match value {
        Some(value) => !value.is_empty() && !contains_han(value),
        None => false,
    }
}

/// Uppercase syllable initials for Han characters; anything else is kept
/// as written (then uppercased), full-width punctuation folded to ASCII.
pub fn sort_key(title: &str) -> String {
    fold_initials(title, |ch| ch.to_pinyin().map(|pinyin| pinyin.first_letter()))
}

// Ideographs without a reading are dropped so the key never contains Han.
fn fold_initials<F>(title: &str, initial: F) -> String
where
    F: Fn(char) -> Option<&'static str>,
{
    let mut out = String::with_capacity(title.len());
    for ch in title.chars() {
        match initial(ch) {
            Some(letter) => out.push_str(letter),
            None if is_han(ch) => {}
            None => out.push(ch),
        }
    }
    normalize_punctuation(&out.to_uppercase())
}

pub fn normalize_punctuation(text: &str) -> String {
    text.chars()
        .map(|ch| {
            PUNCTUATION
                .iter()
                .find(|(full, _)| *full == ch)
                .map(|(_, ascii)| *ascii)
                .unwrap_or(ch)
        })
        .collect()
}
