//! The boundary where untyped JSON becomes typed records.
//!
//! Structural problems (missing or extra fields, wrong types) abort decoding
//! with [`PokedexError::Conformance`]. Records that decode cleanly are then
//! validated, and validation failures are collected into a report instead.

use crate::domain::model::{
    Abilities, Ability, Pokemon, PokemonFavorite, PokemonFromAbility, PokemonType, Sprites,
};
use crate::domain::ports::ConfigProvider;
use crate::utils::error::{PokedexError, Result};
use crate::utils::validation::{validate_under_base, ResourceLinks, Validate};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum RecordKind {
    Favorite,
    Pokemon,
    Ability,
    Sprites,
    Abilities,
    PokemonType,
    PokemonFromAbility,
}

impl RecordKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Favorite => "favorite",
            Self::Pokemon => "pokemon",
            Self::Ability => "ability",
            Self::Sprites => "sprites",
            Self::Abilities => "abilities",
            Self::PokemonType => "pokemon_type",
            Self::PokemonFromAbility => "pokemon_from_ability",
        }
    }
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub index: usize,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConformanceReport {
    pub kind: RecordKind,
    pub records: usize,
    pub violations: Vec<Violation>,
}

impl ConformanceReport {
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }
}

pub fn decode_record<T: DeserializeOwned>(kind: RecordKind, json: &str) -> Result<T> {
    serde_json::from_str(json).map_err(|e| {
        tracing::debug!("Failed to decode {}: {}", kind, e);
        PokedexError::Conformance {
            record: kind.to_string(),
            message: e.to_string(),
        }
    })
}

pub fn decode_value<T: DeserializeOwned>(kind: RecordKind, value: serde_json::Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| PokedexError::Conformance {
        record: kind.to_string(),
        message: e.to_string(),
    })
}

pub fn encode_record<T: Serialize>(record: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}

pub struct ConformanceChecker<C: ConfigProvider> {
    config: C,
}

impl<C: ConfigProvider> ConformanceChecker<C> {
    pub fn new(config: C) -> Self {
        Self { config }
    }

    /// A document is a single record object or an array of them.
    pub fn check_document(&self, kind: RecordKind, json: &str) -> Result<ConformanceReport> {
        let document: serde_json::Value = serde_json::from_str(json)?;
        let (items, from_array) = match document {
            serde_json::Value::Array(items) => (items, true),
            single => (vec![single], false),
        };
        tracing::debug!("Checking {} {} record(s)", items.len(), kind);

        match kind {
            RecordKind::Favorite => self.check_items::<PokemonFavorite>(kind, items, from_array),
            RecordKind::Pokemon => self.check_items::<Pokemon>(kind, items, from_array),
            RecordKind::Ability => self.check_items::<Ability>(kind, items, from_array),
            RecordKind::Sprites => self.check_items::<Sprites>(kind, items, from_array),
            RecordKind::Abilities => self.check_items::<Abilities>(kind, items, from_array),
            RecordKind::PokemonType => self.check_items::<PokemonType>(kind, items, from_array),
            RecordKind::PokemonFromAbility => {
                self.check_items::<PokemonFromAbility>(kind, items, from_array)
            }
        }
    }

    fn check_items<T>(
        &self,
        kind: RecordKind,
        items: Vec<serde_json::Value>,
        from_array: bool,
    ) -> Result<ConformanceReport>
    where
        T: DeserializeOwned + Validate + ResourceLinks,
    {
        let records = items.len();
        let mut violations = Vec::new();

        for (index, item) in items.into_iter().enumerate() {
            let record: T = decode_value(kind, item).map_err(|e| match e {
                PokedexError::Conformance { record, message } if from_array => PokedexError::Conformance {
                    record,
                    message: format!("element {}: {}", index, message),
                },
                other => other,
            })?;

            if let Err(e) = self.check_record(kind, &record) {
                tracing::warn!("{} #{} failed validation: {}", kind, index, e);
                violations.push(Violation {
                    index,
                    message: e.to_string(),
                });
            }
        }

        tracing::info!(
            "Checked {} {} record(s), {} violation(s)",
            records,
            kind,
            violations.len()
        );

        Ok(ConformanceReport {
            kind,
            records,
            violations,
        })
    }

    pub fn check_record<T: Validate + ResourceLinks>(&self, kind: RecordKind, record: &T) -> Result<()> {
        record.validate()?;

        if self.config.enforce_origin() {
            for (field, url) in record.resource_urls() {
                validate_under_base(kind.as_str(), field, url, self.config.api_base_url())?;
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContractConfig;

    fn checker(enforce_origin: bool) -> ConformanceChecker<ContractConfig> {
        ConformanceChecker::new(ContractConfig {
            enforce_origin,
            ..ContractConfig::default()
        })
    }

    #[test]
    fn test_decode_record_names_the_kind() {
        let err = decode_record::<Pokemon>(RecordKind::Pokemon, r#"{"name": "pikachu"}"#)
            .unwrap_err();
        match err {
            PokedexError::Conformance { record, message } => {
                assert_eq!(record, "pokemon");
                assert!(message.contains("url"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_pokemon_and_ability_are_distinct_but_same_shape() {
        let json = r#"{"name": "static", "url": "https://pokeapi.co/api/v2/ability/9/"}"#;
        let ability: Ability = decode_record(RecordKind::Ability, json).unwrap();
        let pokemon: Pokemon = decode_record(RecordKind::Pokemon, json).unwrap();
        assert_eq!(ability.name, pokemon.name);
    }

    #[test]
    fn test_encode_then_decode_favorite() {
        let json = r#"{
            "pokemon_name": "pikachu",
            "id": 1,
            "created_at": "2024-01-01T00:00:00Z",
            "updated_at": "2024-01-01T00:00:00Z",
            "abilities": [{"name": "static", "is_hidden": false}]
        }"#;
        let favorite: PokemonFavorite = decode_record(RecordKind::Favorite, json).unwrap();
        let encoded = encode_record(&favorite).unwrap();
        let again: PokemonFavorite = decode_record(RecordKind::Favorite, &encoded).unwrap();
        assert_eq!(again, favorite);
    }

    #[test]
    fn test_check_document_single_object() {
        let report = checker(false)
            .check_document(
                RecordKind::PokemonType,
                r#"{"slot": 1, "type": {"name": "fire", "url": "https://pokeapi.co/api/v2/type/10/"}}"#,
            )
            .unwrap();
        assert_eq!(report.records, 1);
        assert!(report.is_clean());
    }

    #[test]
    fn test_check_document_empty_array() {
        let report = checker(true).check_document(RecordKind::Abilities, "[]").unwrap();
        assert_eq!(report.records, 0);
        assert!(report.is_clean());
    }

    #[test]
    fn test_structural_error_names_element() {
        let err = checker(false)
            .check_document(
                RecordKind::Pokemon,
                r#"[{"name": "a", "url": "https://pokeapi.co/api/v2/pokemon/1/"}, {"name": "b"}]"#,
            )
            .unwrap_err();
        assert!(err.to_string().contains("element 1"));
    }

    #[test]
    fn test_structural_error_on_single_object_has_no_element_prefix() {
        let err = checker(false)
            .check_document(RecordKind::Pokemon, r#"{"name": "x"}"#)
            .unwrap_err();
        let text = err.to_string();
        assert!(!text.contains("element"));
        assert!(text.contains("missing field `url`"));
    }

    #[test]
    fn test_origin_check_collects_violation() {
        let doc = r#"[
            {"is_hidden": false, "slot": 1, "pokemon": {"name": "pikachu", "url": "https://pokeapi.co/api/v2/pokemon/25/"}},
            {"is_hidden": true, "slot": 3, "pokemon": {"name": "raichu", "url": "https://elsewhere.example/pokemon/26/"}}
        ]"#;

        let lenient = checker(false)
            .check_document(RecordKind::PokemonFromAbility, doc)
            .unwrap();
        assert!(lenient.is_clean());

        let strict = checker(true)
            .check_document(RecordKind::PokemonFromAbility, doc)
            .unwrap();
        assert_eq!(strict.records, 2);
        assert_eq!(strict.violations.len(), 1);
        assert_eq!(strict.violations[0].index, 1);
        assert!(strict.violations[0].message.contains("pokemon.url"));
    }

    #[test]
    fn test_malformed_json_is_serialization_error() {
        let err = checker(false)
            .check_document(RecordKind::Sprites, "{not json")
            .unwrap_err();
        assert!(matches!(err, PokedexError::SerializationError(_)));
    }
}
