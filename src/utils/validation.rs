use crate::domain::model::{
    Abilities, Ability, FavoriteAbility, Pokemon, PokemonFavorite,
    PokemonFromAbility, PokemonType, Sprites,
};
use crate::utils::error::{PokedexError, Result};
use chrono::{DateTime, Utc};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// URL-valued fields of a record, as `(field, url)` pairs.
pub trait ResourceLinks {
    fn resource_urls(&self) -> Vec<(&'static str, &str)>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(PokedexError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(PokedexError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_non_empty_string(record: &str, field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(PokedexError::validation(
            record,
            field_name,
            "value cannot be empty or whitespace-only",
        ));
    }
    Ok(())
}

pub fn validate_timestamp_order(
    record: &str,
    created_at: &DateTime<Utc>,
    updated_at: &DateTime<Utc>,
) -> Result<()> {
    if updated_at < created_at {
        return Err(PokedexError::validation(
            record,
            "updated_at",
            format!("{} is earlier than created_at {}", updated_at, created_at),
        ));
    }
    Ok(())
}

/// Record-level URL check: same rules as `validate_url`, reported as a data error.
pub fn validate_resource_url(record: &str, field_name: &str, url_str: &str) -> Result<()> {
    validate_url(field_name, url_str).map_err(|e| match e {
        PokedexError::InvalidConfigValueError { reason, .. } => {
            PokedexError::validation(record, field_name, reason)
        }
        other => other,
    })
}

/// Same scheme, host and port as `base`, and a path below the base path at a
/// segment boundary.
pub fn validate_under_base(record: &str, field_name: &str, url_str: &str, base: &str) -> Result<()> {
    let outside = || {
        PokedexError::validation(
            record,
            field_name,
            format!("{} is not under {}", url_str, base),
        )
    };
    let base_url = Url::parse(base).map_err(|e| PokedexError::InvalidConfigValueError {
        field: "api_base_url".to_string(),
        value: base.to_string(),
        reason: format!("Invalid URL format: {}", e),
    })?;
    let url = Url::parse(url_str).map_err(|_| outside())?;

    let same_origin = url.scheme() == base_url.scheme()
        && url.host_str() == base_url.host_str()
        && url.port_or_known_default() == base_url.port_or_known_default();
    if !same_origin {
        return Err(outside());
    }

    let base_path = base_url.path().trim_end_matches('/');
    let path = url.path();
    let below = match path.strip_prefix(base_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    };
    if !below {
        return Err(outside());
    }
    Ok(())
}

fn validate_reference(record: &str, prefix: &str, name: &str, url: &str) -> Result<()> {
    validate_non_empty_string(record, &format!("{}name", prefix), name)?;
    validate_resource_url(record, &format!("{}url", prefix), url)
}

impl Validate for FavoriteAbility {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("favorite", "abilities.name", &self.name)
    }
}

impl Validate for PokemonFavorite {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("favorite", "pokemon_name", &self.pokemon_name)?;
        validate_timestamp_order("favorite", &self.created_at, &self.updated_at)?;
        for ability in &self.abilities {
            ability.validate()?;
        }
        Ok(())
    }
}

impl Validate for Pokemon {
    fn validate(&self) -> Result<()> {
        validate_reference("pokemon", "", &self.name, &self.url)
    }
}

impl Validate for Ability {
    fn validate(&self) -> Result<()> {
        validate_reference("ability", "", &self.name, &self.url)
    }
}

impl Validate for Sprites {
    fn validate(&self) -> Result<()> {
        for (slot, url) in self.available() {
            validate_resource_url("sprites", slot, url)?;
        }
        Ok(())
    }
}

impl Validate for Abilities {
    fn validate(&self) -> Result<()> {
        validate_reference("abilities", "ability.", &self.ability.name, &self.ability.url)
    }
}

impl Validate for PokemonType {
    fn validate(&self) -> Result<()> {
        validate_reference("pokemon_type", "type.", &self.r#type.name, &self.r#type.url)
    }
}

impl Validate for PokemonFromAbility {
    fn validate(&self) -> Result<()> {
        validate_reference(
            "pokemon_from_ability",
            "pokemon.",
            &self.pokemon.name,
            &self.pokemon.url,
        )
    }
}

impl ResourceLinks for PokemonFavorite {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
}

impl ResourceLinks for Pokemon {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        vec![("url", self.url.as_str())]
    }
}

impl ResourceLinks for Ability {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        vec![("url", self.url.as_str())]
    }
}

// Sprite images are served from a CDN, not from the API itself.
impl ResourceLinks for Sprites {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        Vec::new()
    }
}

impl ResourceLinks for Abilities {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        vec![("ability.url", self.ability.url.as_str())]
    }
}

impl ResourceLinks for PokemonType {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        vec![("type.url", self.r#type.url.as_str())]
    }
}

impl ResourceLinks for PokemonFromAbility {
    fn resource_urls(&self) -> Vec<(&'static str, &str)> {
        vec![("pokemon.url", self.pokemon.url.as_str())]
    }
}
