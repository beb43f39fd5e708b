use serde::{Deserialize, Serialize};

use dex_core::{CatalogEntry, DetailRecord, Stat};

use crate::error::IntegrationError;

/// `{ name, url }` pair used throughout the API for links to other resources
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

impl NamedResource {
    /// Numeric id from the trailing path segment, e.g. `.../pokemon/25/` -> 25
    pub fn id(&self) -> Result<u32, IntegrationError> {
        parse_trailing_id(&self.url)
    }

    pub fn into_entry(self) -> Result<CatalogEntry, IntegrationError> {
        let id = self.id()?;
        Ok(CatalogEntry {
            id,
            name: self.name,
            reference: self.url,
        })
    }
}

/// Parse the last non-empty path segment of `url` as an id
pub fn parse_trailing_id(url: &str) -> Result<u32, IntegrationError> {
    let segment = url
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or_default();
    segment
        .parse()
        .map_err(|_| IntegrationError::Format(format!("No numeric id at the end of {url:?}")))
}

/// Paginated listing: `/pokemon`, `/type`, `/generation`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub count: u32,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// `/type/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeResponse {
    pub name: String,
    #[serde(default)]
    pub pokemon: Vec<TypeMember>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeMember {
    pub pokemon: NamedResource,
    #[serde(default)]
    pub slot: u32,
}

/// `/generation/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    pub name: String,
    #[serde(default)]
    pub pokemon_species: Vec<NamedResource>,
}

/// `/pokemon/{id}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub weight: u32,
    #[serde(default)]
    pub types: Vec<PokemonType>,
    #[serde(default)]
    pub abilities: Vec<PokemonAbility>,
    #[serde(default)]
    pub stats: Vec<PokemonStat>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u32,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonAbility {
    pub ability: NamedResource,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub slot: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    #[serde(default)]
    pub effort: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

impl From<PokemonResponse> for DetailRecord {
    fn from(p: PokemonResponse) -> Self {
        let mut types = p.types;
        types.sort_by_key(|t| t.slot);

        DetailRecord {
            id: p.id,
            name: p.name,
            height: p.height,
            weight: p.weight,
            categories: types.into_iter().map(|t| t.kind.name).collect(),
            abilities: p.abilities.into_iter().map(|a| a.ability.name).collect(),
            stats: p
                .stats
                .into_iter()
                .map(|s| Stat {
                    name: s.stat.name,
                    value: s.base_stat,
                })
                .collect(),
            sprite: p.sprites.front_default,
        }
    }
}
