//! Article records served by the content API.

use crate::utils::date::Timestamp;
use academy_richtext::Document;
use serde::Deserialize;
use serde_json::Value;

/// One academy article.
///
/// Everything except `slug` is optional on the wire; absent or `null` fields
/// decode to their empty value so a sparse record still renders.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(rename = "_id", default, deserialize_with = "null_as_default")]
    pub id: String,

    pub slug: String,

    #[serde(default, deserialize_with = "null_as_default")]
    pub post_heading: String,

    #[serde(default)]
    pub image_link: Option<String>,

    #[serde(default)]
    pub timestamp: Option<Timestamp>,

    /// Rich-text body. `None` renders "Content is not available."
    #[serde(default)]
    pub content: Option<Document>,

    /// Either a plain name or an object with a `name` field.
    #[serde(default)]
    pub author: Option<Value>,

    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: Vec<String>,

    /// Category used to group related articles.
    #[serde(default)]
    pub track: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl Article {
    /// Thumbnail url, ignoring empty strings.
    pub fn image(&self) -> Option<&str> {
        self.image_link.as_deref().filter(|link| !link.is_empty())
    }

    pub fn author_name(&self) -> Option<&str> {
        let name = match self.author.as_ref()? {
            Value::String(name) => name.as_str(),
            Value::Object(fields) => fields.get("name")?.as_str()?,
            _ => return None,
        };
        Some(name).filter(|name| !name.is_empty())
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
