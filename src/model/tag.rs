use regex::Regex;
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use std::sync::OnceLock;

/// A hashtag-style label written in a transaction description, e.g. `#holiday`. The `#` is not
/// part of the stored name.
#[derive(Default, Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag(String);

impl Tag {
    /// Creates a tag from a name. A single leading `#`, if present, is dropped so that both
    /// `holiday` and `#holiday` name the same tag.
    pub fn new(name: impl AsRef<str>) -> Self {
        let name = name.as_ref().trim();
        Self(name.strip_prefix('#').unwrap_or(name).to_string())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    /// Finds every tag in `description` and returns the description with the tags removed along
    /// with the tags in order of appearance. Repeated tags are kept once per occurrence and the
    /// whitespace around removed tags is left as it is.
    pub fn extract(description: &str) -> (String, Vec<Tag>) {
        let re = tag_re();
        let tags = re
            .captures_iter(description)
            .map(|caps| Tag(caps[1].to_string()))
            .collect();
        let stripped = re.replace_all(description, "").into_owned();
        (stripped, tags)
    }
}

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"#([A-Za-z0-9_-]+)").expect("tag regex"))
}

impl AsRef<str> for Tag {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for Tag {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for Tag {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Tag::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(tags: &[Tag]) -> Vec<&str> {
        tags.iter().map(Tag::name).collect()
    }

    #[test]
    fn test_extract_tags() {
        let (description, tags) = Tag::extract("rent #home #jan");
        assert_eq!(description, "rent  ");
        assert_eq!(names(&tags), vec!["home", "jan"]);
    }

    #[test]
    fn test_extract_keeps_duplicates_and_case() {
        let (description, tags) = Tag::extract("#Trip dinner #trip #Trip");
        assert_eq!(description, " dinner  ");
        assert_eq!(names(&tags), vec!["Trip", "trip", "Trip"]);
    }

    #[test]
    fn test_extract_allowed_characters() {
        let (description, tags) = Tag::extract("a #x_1-y! b #é c # d");
        assert_eq!(names(&tags), vec!["x_1-y"]);
        assert_eq!(description, "a ! b #é c # d");
    }

    #[test]
    fn test_extract_without_tags() {
        let (description, tags) = Tag::extract("groceries");
        assert_eq!(description, "groceries");
        assert!(tags.is_empty());
    }

    #[test]
    fn test_extract_is_deterministic() {
        let first = Tag::extract("bus #work #commute");
        let second = Tag::extract("bus #work #commute");
        assert_eq!(first, second);
    }

    #[test]
    fn test_tag_new_strips_hash() {
        assert_eq!(Tag::new("#home"), Tag::new("home"));
        assert_eq!(Tag::new("#home").to_string(), "#home");
        assert_eq!("holiday".parse::<Tag>().unwrap().name(), "holiday");
    }

    #[test]
    fn test_tag_serializes_without_hash() {
        let json = serde_json::to_string(&Tag::new("#home")).unwrap();
        assert_eq!(json, r#""home""#);
    }
}
