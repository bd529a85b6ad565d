use once_cell::sync::Lazy;
use regex::Regex;

/// `<bookmark mark='name'/>` with either quote style and loose whitespace
static BOOKMARK_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"<bookmark\s*mark\s*=\s*['"](\w*)['"]\s*/>"#).expect("bookmark pattern is valid")
});

/// Strip bookmark markup, leaving the spoken text
pub fn remove_bookmarks(text: &str) -> String {
    BOOKMARK_RE.replace_all(text, "").into_owned()
}

/// Bookmark names in the order they appear
pub fn bookmark_names(text: &str) -> Vec<String> {
    BOOKMARK_RE
        .captures_iter(text)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str().to_string()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_remove_bookmarks() {
        let text = "This is <bookmark mark='A'/>a circle and <bookmark mark=\"B\" />a square.";
        assert_eq!(remove_bookmarks(text), "This is a circle and a square.");
    }

    #[test]
    fn test_text_without_bookmarks_is_untouched() {
        let text = "Plain <b>markup</b> stays as is.";
        assert_eq!(remove_bookmarks(text), text);
    }

    #[test]
    fn test_bookmark_names() {
        let text = "<bookmark mark='intro'/>Hello <bookmark  mark = 'second_1'/>world";
        assert_eq!(bookmark_names(text), vec!["intro", "second_1"]);
        assert!(bookmark_names("no marks here").is_empty());
    }
}
