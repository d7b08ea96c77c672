//! Keyword highlighting.
//!
//! Splits text into plain and highlighted segments for every occurrence of
//! any keyword. Matching ignores ASCII case, so segment boundaries always fall
//! on character boundaries of the original text.

/// A run of text and whether it matched a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    /// The text of this run.
    pub text: &'a str,
    /// True if the run is a keyword match.
    pub highlighted: bool,
}

/// Splits `text` into segments, highlighting keyword matches.
///
/// At each position the longest matching keyword wins. Blank keywords are
/// ignored. Adjacent plain text is merged into one segment.
pub fn highlight<'a>(text: &'a str, keywords: &[String]) -> Vec<Segment<'a>> {
    let keywords: Vec<&[u8]> = keywords
        .iter()
        .map(|k| k.as_bytes())
        .filter(|k| !k.is_empty())
        .collect();

    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut plain_start = 0;
    let mut pos = 0;

    while pos < bytes.len() {
        let longest = keywords
            .iter()
            .filter(|kw| {
                bytes.len() - pos >= kw.len() && bytes[pos..pos + kw.len()].eq_ignore_ascii_case(kw)
            })
            .map(|kw| kw.len())
            .max();

        match longest {
            Some(len) if text.is_char_boundary(pos) => {
                if plain_start < pos {
                    segments.push(Segment {
                        text: &text[plain_start..pos],
                        highlighted: false,
                    });
                }
                segments.push(Segment {
                    text: &text[pos..pos + len],
                    highlighted: true,
                });
                pos += len;
                plain_start = pos;
            }
            _ => pos += 1,
        }
    }

    if plain_start < bytes.len() {
        segments.push(Segment {
            text: &text[plain_start..],
            highlighted: false,
        });
    }

    segments
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kws(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn highlighted(segments: &[Segment<'_>]) -> Vec<String> {
        segments
            .iter()
            .filter(|s| s.highlighted)
            .map(|s| s.text.to_string())
            .collect()
    }

    #[test]
    fn test_no_keywords_returns_whole_text() {
        let segments = highlight("Cloud Migration", &[]);
        assert_eq!(
            segments,
            vec![Segment {
                text: "Cloud Migration",
                highlighted: false
            }]
        );
    }

    #[test]
    fn test_case_insensitive_matches_keep_original_case() {
        let segments = highlight("Cloud migration to the CLOUD", &kws(&["cloud"]));
        assert_eq!(highlighted(&segments), vec!["Cloud", "CLOUD"]);
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "Cloud migration to the CLOUD");
    }

    #[test]
    fn test_longest_keyword_wins() {
        let segments = highlight("Data Center Consolidation", &kws(&["data", "data center"]));
        assert_eq!(highlighted(&segments), vec!["Data Center"]);
    }

    #[test]
    fn test_non_ascii_text_is_safe() {
        let segments = highlight("Café AI résumé", &kws(&["ai", "é"]));
        let rebuilt: String = segments.iter().map(|s| s.text).collect();
        assert_eq!(rebuilt, "Café AI résumé");
        assert!(highlighted(&segments).contains(&"AI".to_string()));
    }

    #[test]
    fn test_empty_text() {
        assert!(highlight("", &kws(&["x"])).is_empty());
    }
}
