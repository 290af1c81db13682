pub mod conformance;

pub use crate::domain::model::{
    Abilities, Ability, FavoriteAbility, NamedResource, Pokemon, PokemonFavorite,
    PokemonFromAbility, PokemonType, Sprites,
};
pub use crate::domain::ports::ConfigProvider;
pub use crate::utils::error::Result;
