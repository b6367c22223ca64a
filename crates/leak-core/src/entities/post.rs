use chrono::{NaiveDateTime, TimeDelta};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// The complete current set of posts for one entity.
pub type Snapshot = Vec<Post>;

/// A single leak announcement published by a group or leak site.
///
/// Scrapers may attach arbitrary extra attributes (links, screenshots,
/// magnets); they are kept in [`Post::extra`] and written back verbatim.
///
/// Older scrapers emit the title as `post_title`. When a record carries both
/// keys, `title` wins and `post_title` is kept in [`Post::extra`].
#[derive(Debug, Clone, Serialize, JsonSchema, PartialEq)]
pub struct Post {
    pub title: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Discovery time, naive local time.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "crate::timefmt::option"
    )]
    #[schemars(with = "Option<String>")]
    pub discovered: Option<NaiveDateTime>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Wire shape accepted on read, before the title keys are reconciled.
#[derive(Deserialize)]
struct RawPost {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    post_title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, with = "crate::timefmt::option")]
    discovered: Option<NaiveDateTime>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

impl<'de> Deserialize<'de> for Post {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let RawPost {
            title,
            post_title,
            description,
            discovered,
            mut extra,
        } = RawPost::deserialize(deserializer)?;

        let title = match (title, post_title) {
            (Some(title), Some(legacy)) => {
                extra.insert("post_title".to_string(), Value::String(legacy));
                title
            }
            (Some(title), None) | (None, Some(title)) => title,
            (None, None) => return Err(serde::de::Error::missing_field("title")),
        };
        Ok(Self {
            title,
            description,
            discovered,
            extra,
        })
    }
}

impl Post {
    /// Create a post with only a title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            discovered: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn discovered_at(mut self, discovered: NaiveDateTime) -> Self {
        self.discovered = Some(discovered);
        self
    }

    /// Whether the post was discovered strictly less than `window` before `now`.
    ///
    /// Posts without a discovery time are never recent. Posts stamped in the
    /// future relative to `now` count as recent.
    #[must_use]
    pub fn discovered_within(&self, now: NaiveDateTime, window: TimeDelta) -> bool {
        self.discovered
            .is_some_and(|discovered| now.signed_duration_since(discovered) < window)
    }
}
