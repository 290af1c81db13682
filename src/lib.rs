pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{toml_config::TomlConfig, ContractConfig};
pub use core::conformance::{ConformanceChecker, ConformanceReport, RecordKind, Violation};
pub use domain::model::{
    Abilities, Ability, FavoriteAbility, NamedResource, Pokemon, PokemonFavorite,
    PokemonFromAbility, PokemonType, Sprites,
};
pub use utils::error::{PokedexError, Result};
