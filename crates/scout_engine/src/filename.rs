use sha2::{Digest, Sha256};
use url::Url;

const MAX_STEM_LEN: usize = 120;

/// File name for a downloaded asset: the URL's last path segment made
/// filesystem-safe, or `asset--{short_hash}` when the URL has none.
pub fn asset_filename(url: &str) -> String {
    let segment = Url::parse(url).ok().and_then(|parsed| {
        parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back().map(str::to_string))
            .filter(|last| !last.is_empty())
    });

    match segment.map(|s| sanitize(&s)).filter(|s| !s.is_empty()) {
        Some(name) => name,
        None => format!("asset--{}", short_hash(url)),
    }
}

fn sanitize(input: &str) -> String {
    let cleaned: String = input
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let mut name = cleaned.trim_matches(&['_', ' ', '.'][..]).to_string();
    if name.len() > MAX_STEM_LEN {
        let mut cut = MAX_STEM_LEN;
        while !name.is_char_boundary(cut) {
            cut -= 1;
        }
        name.truncate(cut);
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '%' | '\0'..='\u{1F}'
    )
}

fn short_hash(input: &str) -> String {
    let digest = Sha256::digest(input.as_bytes());
    digest.iter().take(4).map(|byte| format!("{byte:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uses_last_path_segment() {
        assert_eq!(
            asset_filename("https://dl.example.com/common/Local/SG/config/TW1_CobraTabSG_en.jpg"),
            "TW1_CobraTabSG_en.jpg"
        );
    }

    #[test]
    fn query_strings_are_not_part_of_the_name() {
        assert_eq!(asset_filename("https://cdn.example.com/a/b.png?v=3"), "b.png");
    }

    #[test]
    fn falls_back_to_hash_without_a_segment() {
        let name = asset_filename("https://cdn.example.com/");
        assert!(name.starts_with("asset--"));
        assert_eq!(name.len(), "asset--".len() + 8);
        assert_eq!(name, asset_filename("https://cdn.example.com/"));
    }

    #[test]
    fn encoded_characters_are_replaced() {
        assert_eq!(
            asset_filename("https://cdn.example.com/Ring%20One.png"),
            "Ring_20One.png"
        );
    }
}
