//! PokeAPI response models and client
//!
//! This module contains the subset of PokeAPI response shapes the REPL needs,
//! and the `PokeApiClient` that fetches them through the response cache.

pub mod client;

pub use client::{ApiError, PokeApiClient, DEFAULT_BASE_URL};

use serde::{Deserialize, Serialize};

/// A name/URL pair, the common reference shape used throughout PokeAPI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

/// One page of location areas, with links to the neighbouring pages
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaPage {
    /// Total number of location areas across all pages
    pub count: u32,
    /// URL of the next page, absent on the last page
    pub next: Option<String>,
    /// URL of the previous page, absent on the first page
    pub previous: Option<String>,
    pub results: Vec<NamedResource>,
}

/// A single location area and the Pokemon that can be encountered there
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationAreaDetail {
    pub name: String,
    pub pokemon_encounters: Vec<Encounter>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Encounter {
    pub pokemon: NamedResource,
}

/// A Pokemon species as returned by `/pokemon/{name}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Pokemon {
    pub name: String,
    /// Height in decimetres
    pub height: u32,
    /// Weight in hectograms
    pub weight: u32,
    /// Experience gained for defeating this Pokemon; null for some forms
    #[serde(default, deserialize_with = "null_as_zero")]
    pub base_experience: u32,
    pub stats: Vec<PokemonStat>,
    pub types: Vec<PokemonType>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonStat {
    pub base_stat: u32,
    pub stat: NamedResource,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PokemonType {
    pub slot: u8,
    #[serde(rename = "type")]
    pub kind: NamedResource,
}

fn null_as_zero<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<u32>::deserialize(deserializer)?.unwrap_or(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_area_page_parses_first_page() {
        let json = r#"{
            "count": 1089,
            "next": "https://pokeapi.co/api/v2/location-area?offset=20&limit=20",
            "previous": null,
            "results": [
                {"name": "canalave-city-area", "url": "https://pokeapi.co/api/v2/location-area/1/"},
                {"name": "eterna-city-area", "url": "https://pokeapi.co/api/v2/location-area/2/"}
            ]
        }"#;

        let page: LocationAreaPage = serde_json::from_str(json).expect("Should parse page");

        assert_eq!(page.count, 1089);
        assert!(page.next.is_some());
        assert!(page.previous.is_none());
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].name, "canalave-city-area");
    }

    #[test]
    fn test_location_area_detail_ignores_unknown_fields() {
        let json = r#"{
            "id": 1,
            "name": "canalave-city-area",
            "game_index": 1,
            "pokemon_encounters": [
                {"pokemon": {"name": "tentacool", "url": "https://pokeapi.co/api/v2/pokemon/72/"}, "version_details": []}
            ]
        }"#;

        let detail: LocationAreaDetail = serde_json::from_str(json).expect("Should parse detail");

        assert_eq!(detail.name, "canalave-city-area");
        assert_eq!(detail.pokemon_encounters[0].pokemon.name, "tentacool");
    }

    #[test]
    fn test_pokemon_parses_stats_and_types() {
        let json = r#"{
            "name": "pidgey",
            "height": 3,
            "weight": 18,
            "base_experience": 50,
            "stats": [{"base_stat": 40, "effort": 0, "stat": {"name": "hp", "url": ""}}],
            "types": [{"slot": 1, "type": {"name": "normal", "url": ""}}]
        }"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Should parse pokemon");

        assert_eq!(pokemon.name, "pidgey");
        assert_eq!(pokemon.base_experience, 50);
        assert_eq!(pokemon.stats[0].base_stat, 40);
        assert_eq!(pokemon.stats[0].stat.name, "hp");
        assert_eq!(pokemon.types[0].kind.name, "normal");
    }

    #[test]
    fn test_pokemon_null_base_experience_defaults_to_zero() {
        let json = r#"{
            "name": "pikachu-cosplay",
            "height": 4,
            "weight": 60,
            "base_experience": null,
            "stats": [],
            "types": []
        }"#;

        let pokemon: Pokemon = serde_json::from_str(json).expect("Should parse pokemon");
        assert_eq!(pokemon.base_experience, 0);
    }
}
