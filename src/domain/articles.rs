//! Article payloads as delivered by the content API, and the presence
//! predicate that gates every conditional render.

use serde::Deserialize;

/// Upper bound on the "More Articles" list shown under an article.
pub const MAX_MORE_ARTICLES: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Article {
    pub title: String,
    pub category: Option<String>,
    pub date: Option<String>,
    /// Tags arrive as a single comma-separated string.
    pub tag: Option<String>,
    pub content: Vec<ContentSection>,
}

/// One renderable unit of an article body. The fields are additive, not
/// mutually exclusive: a section may carry a subtitle and a table at once.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentSection {
    pub subtitle: Option<String>,
    pub paragraph: Option<String>,
    pub image: Option<SectionImage>,
    pub video: Option<SectionVideo>,
    pub table: Option<SectionTable>,
    pub cta: Option<CallToAction>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionImage {
    pub url: Option<String>,
    pub alt: Option<String>,
    pub caption: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionVideo {
    pub embed_url: Option<String>,
    pub url: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct SectionTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct CallToAction {
    pub text: Option<String>,
    pub link: Option<String>,
    pub target: Option<String>,
}

/// Non-emptiness predicate for optional content.
///
/// A value is present when it holds something worth rendering: strings must
/// be non-blank after trimming, sequences non-empty, and records must have at
/// least one present member. `Option::None` is never present.
pub trait Presence {
    fn is_present(&self) -> bool;
}

impl Presence for String {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl Presence for str {
    fn is_present(&self) -> bool {
        !self.trim().is_empty()
    }
}

impl<T: Presence> Presence for Option<T> {
    fn is_present(&self) -> bool {
        self.as_ref().is_some_and(Presence::is_present)
    }
}

impl<T> Presence for Vec<T> {
    fn is_present(&self) -> bool {
        !self.is_empty()
    }
}

impl Presence for SectionImage {
    fn is_present(&self) -> bool {
        self.url.is_present() || self.alt.is_present() || self.caption.is_present()
    }
}

impl Presence for SectionVideo {
    fn is_present(&self) -> bool {
        self.embed_url.is_present() || self.url.is_present()
    }
}

impl Presence for SectionTable {
    fn is_present(&self) -> bool {
        self.headers.is_present() || self.rows.is_present()
    }
}

impl Presence for CallToAction {
    fn is_present(&self) -> bool {
        self.text.is_present() || self.link.is_present() || self.target.is_present()
    }
}

impl ContentSection {
    /// A section is skipped entirely unless at least one of its fields is
    /// present. Field-level render requirements (an image needs a `url`, a
    /// CTA needs text and link) are checked again where each field maps to
    /// its view.
    pub fn has_renderable_content(&self) -> bool {
        self.subtitle.is_present()
            || self.paragraph.is_present()
            || self.image.is_present()
            || self.video.is_present()
            || self.table.is_present()
            || self.cta.is_present()
    }
}

/// Split a comma-separated tag string into display tags: trim each entry,
/// drop the empty ones, keep input order.
pub fn parse_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(str::to_string)
        .collect()
}

/// Derive the "More Articles" list: drop every entry whose title equals the
/// current title exactly, reverse the remainder, keep at most
/// [`MAX_MORE_ARTICLES`].
///
/// The reversal is a product decision: the API returns oldest-first, so the
/// reversed list leads with the most recently added articles.
pub fn more_articles(articles: Vec<Article>, current_title: &str) -> Vec<Article> {
    let mut remaining: Vec<Article> = articles
        .into_iter()
        .filter(|article| article.title != current_title)
        .collect();
    remaining.reverse();
    remaining.truncate(MAX_MORE_ARTICLES);
    remaining
}

#[cfg(test)]
mod tests {
    use super::*;

    fn titled(title: &str) -> Article {
        Article {
            title: title.to_string(),
            ..Article::default()
        }
    }

    #[test]
    fn blank_strings_are_not_present() {
        assert!(!"".is_present());
        assert!(!"   \t".is_present());
        assert!("x".is_present());
        assert!(!Option::<String>::None.is_present());
        assert!(!Some(String::from("  ")).is_present());
    }

    #[test]
    fn record_presence_recurses_into_members() {
        let empty = SectionImage::default();
        assert!(!empty.is_present());

        let caption_only = SectionImage {
            caption: Some("ribbon cutting".to_string()),
            ..SectionImage::default()
        };
        assert!(caption_only.is_present());

        let blank_members = SectionImage {
            url: Some("  ".to_string()),
            alt: Some(String::new()),
            caption: None,
        };
        assert!(!blank_members.is_present());
    }

    #[test]
    fn section_with_all_fields_absent_is_skipped() {
        assert!(!ContentSection::default().has_renderable_content());

        let blank = ContentSection {
            subtitle: Some("  ".to_string()),
            paragraph: Some(String::new()),
            image: Some(SectionImage::default()),
            ..ContentSection::default()
        };
        assert!(!blank.has_renderable_content());
    }

    #[test]
    fn section_with_one_present_field_renders() {
        let section = ContentSection {
            subtitle: Some("S1".to_string()),
            ..ContentSection::default()
        };
        assert!(section.has_renderable_content());
    }

    #[test]
    fn tags_split_trim_and_drop_empties() {
        assert_eq!(parse_tags(" a, b ,,c "), vec!["a", "b", "c"]);
        assert_eq!(parse_tags(",,,"), Vec::<String>::new());
        assert_eq!(parse_tags("solo"), vec!["solo"]);
    }

    #[test]
    fn more_articles_excludes_current_and_reverses() {
        let input = vec![titled("a"), titled("b"), titled("current"), titled("c")];
        let more = more_articles(input, "current");
        let titles: Vec<&str> = more.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["c", "b", "a"]);
    }

    #[test]
    fn more_articles_exclusion_is_exact_match() {
        let input = vec![titled("Current"), titled("current ")];
        let more = more_articles(input, "current");
        assert_eq!(more.len(), 2);
    }

    #[test]
    fn more_articles_caps_at_four() {
        let input = (0..7).map(|i| titled(&format!("t{i}"))).collect();
        let more = more_articles(input, "t3");
        let titles: Vec<&str> = more.iter().map(|a| a.title.as_str()).collect();
        assert_eq!(titles, vec!["t6", "t5", "t4", "t2"]);
    }

    #[test]
    fn article_deserializes_with_missing_fields() {
        let article: Article = serde_json::from_str(r#"{"title":"T"}"#).expect("valid payload");
        assert_eq!(article.title, "T");
        assert!(article.content.is_empty());
        assert!(article.category.is_none());
    }

    #[test]
    fn section_deserializes_null_members_as_absent() {
        let section: ContentSection =
            serde_json::from_str(r#"{"subtitle":null,"image":{"url":"https://x/y.jpg"}}"#)
                .expect("valid payload");
        assert!(section.subtitle.is_none());
        assert!(section.image.is_present());
    }
}
