use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::num::NonZeroU32;

/// A `{name, url}` reference to a resource served by the upstream API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }

    /// Trailing numeric path segment of the URL, e.g. `.../ability/9/` -> `9`.
    pub fn resource_id(&self) -> Option<u32> {
        resource_id_from_url(&self.url)
    }
}

pub(crate) fn resource_id_from_url(url: &str) -> Option<u32> {
    url.trim_end_matches('/')
        .rsplit('/')
        .next()
        .and_then(|segment| segment.parse().ok())
}

/// Ability summary stored inline on a favorite.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FavoriteAbility {
    pub name: String,
    pub is_hidden: bool,
}

impl From<&Abilities> for FavoriteAbility {
    fn from(entry: &Abilities) -> Self {
        Self {
            name: entry.ability.name.clone(),
            is_hidden: entry.is_hidden,
        }
    }
}

/// A pokemon saved by the user. `id` is assigned by the favorites store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokemonFavorite {
    pub pokemon_name: String,
    pub id: u64,
    #[serde(deserialize_with = "iso8601")]
    pub created_at: DateTime<Utc>,
    #[serde(deserialize_with = "iso8601")]
    pub updated_at: DateTime<Utc>,
    pub abilities: Vec<FavoriteAbility>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Pokemon {
    pub name: String,
    pub url: String,
}

impl Pokemon {
    pub fn resource_id(&self) -> Option<u32> {
        resource_id_from_url(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Ability {
    pub name: String,
    pub url: String,
}

impl Ability {
    pub fn resource_id(&self) -> Option<u32> {
        resource_id_from_url(&self.url)
    }
}

/// Sprite image URLs. Every slot must be present in the payload, `null` when
/// the upstream has no image for it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Sprites {
    #[serde(deserialize_with = "nullable")]
    pub back_default: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub back_female: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub back_shiny: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub back_shiny_female: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub front_default: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub front_female: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub front_shiny: Option<String>,
    #[serde(deserialize_with = "nullable")]
    pub front_shiny_female: Option<String>,
}

impl Sprites {
    /// Slot names paired with their values, in declaration order.
    pub fn slots(&self) -> [(&'static str, Option<&str>); 8] {
        [
            ("back_default", self.back_default.as_deref()),
            ("back_female", self.back_female.as_deref()),
            ("back_shiny", self.back_shiny.as_deref()),
            ("back_shiny_female", self.back_shiny_female.as_deref()),
            ("front_default", self.front_default.as_deref()),
            ("front_female", self.front_female.as_deref()),
            ("front_shiny", self.front_shiny.as_deref()),
            ("front_shiny_female", self.front_shiny_female.as_deref()),
        ]
    }

    pub fn available(&self) -> Vec<(&'static str, &str)> {
        self.slots()
            .into_iter()
            .filter_map(|(slot, value)| value.map(|url| (slot, url)))
            .collect()
    }

    /// `front_default`, or the first slot that has an image.
    pub fn preferred(&self) -> Option<&str> {
        self.front_default
            .as_deref()
            .or_else(|| self.available().first().map(|(_, url)| *url))
    }
}

/// RFC 3339 with an offset, or a naive ISO-8601 date-time read as UTC.
fn iso8601<'de, D>(deserializer: D) -> std::result::Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    if let Ok(stamp) = DateTime::parse_from_rfc3339(&raw) {
        return Ok(stamp.with_timezone(&Utc));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&raw, format).ok())
        .map(|naive| naive.and_utc())
        .ok_or_else(|| {
            <D::Error as serde::de::Error>::custom(format!("invalid ISO-8601 timestamp: {:?}", raw))
        })
}

// A plain `Option<String>` field would accept a missing key as `None`.
fn nullable<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(deserializer)
}

/// A pokemon's association with one of its abilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Abilities {
    pub is_hidden: bool,
    pub slot: NonZeroU32,
    pub ability: NamedResource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokemonType {
    pub slot: NonZeroU32,
    pub r#type: NamedResource,
}

/// An ability's association with a pokemon that has it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PokemonFromAbility {
    pub is_hidden: bool,
    pub slot: NonZeroU32,
    pub pokemon: Pokemon,
}
