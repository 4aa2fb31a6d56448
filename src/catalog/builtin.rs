//! Built-in catalog for the campaign world schema.

use super::{TableCatalog, TableSpec};
use crate::error::GeneratorResult;

/// Tables whose metadata predates the catalog. They stay in the index unless
/// the catalog now defines them.
pub const LEGACY_TABLES: &[&str] = &[
    "npcs",
    "locations",
    "location_npcs",
    "quest_hooks",
    "encounters",
];

struct RawTable {
    name: &'static str,
    object: &'static [&'static [&'static str]],
    array: &'static [&'static [&'static str]],
}

const BUILTIN_TABLES: &[RawTable] = &[
    // Core World Systems
    RawTable {
        name: "historical_periods",
        object: &[&["campaign", "campaign_id"]],
        array: &[],
    },
    RawTable {
        name: "economic_systems",
        object: &[
            &["campaign", "campaign_id"],
            &["region", "region_id", "geography_regions"],
        ],
        array: &[],
    },
    RawTable {
        name: "legal_systems",
        object: &[
            &["campaign", "campaign_id"],
            &["region", "region_id", "geography_regions"],
        ],
        array: &[],
    },
    RawTable {
        name: "celestial_bodies",
        object: &[&["campaign", "campaign_id"]],
        array: &[],
    },
    // Character Building
    RawTable {
        name: "races",
        object: &[
            &["campaign", "campaign_id"],
            &["parent_race", "parent_race_id"],
        ],
        array: &[
            &["subraces", "parent_race_id", "races"],
            &["entities", "race_id", "entities"],
            &["race_cultures", "race_id", "race_cultures"],
        ],
    },
    RawTable {
        name: "character_classes",
        object: &[
            &["campaign", "campaign_id"],
            &["parent_class", "parent_class_id"],
        ],
        array: &[
            &["subclasses", "parent_class_id", "character_classes"],
            &["entities", "class_id", "entities"],
        ],
    },
    RawTable {
        name: "feats",
        object: &[&["campaign", "campaign_id"]],
        array: &[],
    },
    RawTable {
        name: "backgrounds",
        object: &[&["campaign", "campaign_id"]],
        array: &[&["entities", "background_id", "entities"]],
    },
    // Social Framework
    RawTable {
        name: "languages",
        object: &[&["campaign", "campaign_id"]],
        array: &[],
    },
    RawTable {
        name: "cultures",
        object: &[
            &["campaign", "campaign_id"],
            &["primary_race", "primary_race_id", "races"],
            &["geography_region", "geography_region_id", "geography_regions"],
        ],
        array: &[&["race_cultures", "culture_id", "race_cultures"]],
    },
    RawTable {
        name: "factions",
        object: &[&["campaign", "campaign_id"]],
        array: &[
            &["entity_factions", "faction_id", "entity_factions"],
            &["faction_relationships_as_faction1", "faction1_id", "faction_relationships"],
            &["faction_relationships_as_faction2", "faction2_id", "faction_relationships"],
        ],
    },
    RawTable {
        name: "pantheons",
        object: &[&["campaign", "campaign_id"]],
        array: &[&["deities", "pantheon_id", "deities"]],
    },
    RawTable {
        name: "deities",
        object: &[
            &["campaign", "campaign_id"],
            &["pantheon", "pantheon_id", "pantheons"],
        ],
        array: &[&["temples", "deity_id", "temples"]],
    },
    // Entities
    RawTable {
        name: "entities",
        object: &[
            &["campaign", "campaign_id"],
            &["race", "race_id", "races"],
            &["class", "class_id", "character_classes"],
            &["background", "background_id", "backgrounds"],
        ],
        array: &[
            &["entity_relationships_as_entity1", "entity1_id", "entity_relationships"],
            &["entity_relationships_as_entity2", "entity2_id", "entity_relationships"],
            &["entity_locations", "entity_id", "entity_locations"],
            &["entity_factions", "entity_id", "entity_factions"],
            &["entity_items", "entity_id", "entity_items"],
            &["owned_shops", "owner_entity_id", "shops"],
            &["owned_taverns", "owner_entity_id", "taverns"],
            &["temples_as_high_priest", "high_priest_entity_id", "temples"],
            &["quest_entities", "entity_id", "quest_entities"],
        ],
    },
    // Locations
    RawTable {
        name: "locations",
        object: &[
            &["campaign", "campaign_id"],
            &["parent_location", "parent_location_id"],
            &["geography_region", "geography_region_id", "geography_regions"],
        ],
        array: &[
            &["child_locations", "parent_location_id", "locations"],
            &["entity_locations", "location_id", "entity_locations"],
            &["location_items", "location_id", "location_items"],
            &["encounters", "location_id", "encounters"],
            &["quest_locations", "location_id", "quest_locations"],
            &["dungeons", "location_id", "dungeons"],
            &["buildings", "location_id", "buildings"],
        ],
    },
    RawTable {
        name: "dungeons",
        object: &[&["location", "location_id", "locations"]],
        array: &[],
    },
    RawTable {
        name: "buildings",
        object: &[&["location", "location_id", "locations"]],
        array: &[
            &["shops", "building_id", "shops"],
            &["taverns", "building_id", "taverns"],
            &["temples", "building_id", "temples"],
        ],
    },
    RawTable {
        name: "shops",
        object: &[
            &["building", "building_id", "buildings"],
            &["owner", "owner_entity_id", "entities"],
        ],
        array: &[],
    },
    RawTable {
        name: "taverns",
        object: &[
            &["building", "building_id", "buildings"],
            &["owner", "owner_entity_id", "entities"],
        ],
        array: &[],
    },
    RawTable {
        name: "temples",
        object: &[
            &["building", "building_id", "buildings"],
            &["deity", "deity_id", "deities"],
            &["high_priest", "high_priest_entity_id", "entities"],
        ],
        array: &[],
    },
    // Items
    RawTable {
        name: "items",
        object: &[&["campaign", "campaign_id"]],
        array: &[
            &["item_effects", "item_id", "item_effects"],
            &["sentient_properties", "item_id", "sentient_item_properties"],
            &["entity_items", "item_id", "entity_items"],
            &["location_items", "item_id", "location_items"],
        ],
    },
    RawTable {
        name: "item_effects",
        object: &[&["item", "item_id", "items"]],
        array: &[],
    },
    RawTable {
        name: "sentient_item_properties",
        object: &[&["item", "item_id", "items"]],
        array: &[],
    },
    // Quests & Encounters
    RawTable {
        name: "quest_hooks",
        object: &[&["campaign", "campaign_id"]],
        array: &[
            &["quest_entities", "quest_hook_id", "quest_entities"],
            &["quest_locations", "quest_hook_id", "quest_locations"],
        ],
    },
    RawTable {
        name: "encounters",
        object: &[
            &["campaign", "campaign_id"],
            &["location", "location_id", "locations"],
        ],
        array: &[],
    },
    // Join tables
    RawTable {
        name: "entity_relationships",
        object: &[
            &["entity1", "entity1_id", "entities"],
            &["entity2", "entity2_id", "entities"],
        ],
        array: &[],
    },
    RawTable {
        name: "entity_locations",
        object: &[
            &["entity", "entity_id", "entities"],
            &["location", "location_id", "locations"],
        ],
        array: &[],
    },
    RawTable {
        name: "entity_factions",
        object: &[
            &["entity", "entity_id", "entities"],
            &["faction", "faction_id", "factions"],
        ],
        array: &[],
    },
    RawTable {
        name: "entity_items",
        object: &[
            &["entity", "entity_id", "entities"],
            &["item", "item_id", "items"],
        ],
        array: &[],
    },
    RawTable {
        name: "location_items",
        object: &[
            &["location", "location_id", "locations"],
            &["item", "item_id", "items"],
        ],
        array: &[],
    },
    RawTable {
        name: "quest_entities",
        object: &[
            &["quest_hook", "quest_hook_id", "quest_hooks"],
            &["entity", "entity_id", "entities"],
        ],
        array: &[],
    },
    RawTable {
        name: "quest_locations",
        object: &[
            &["quest_hook", "quest_hook_id", "quest_hooks"],
            &["location", "location_id", "locations"],
        ],
        array: &[],
    },
    RawTable {
        name: "faction_relationships",
        object: &[
            &["faction1", "faction1_id", "factions"],
            &["faction2", "faction2_id", "factions"],
        ],
        array: &[],
    },
    RawTable {
        name: "race_cultures",
        object: &[
            &["race", "race_id", "races"],
            &["culture", "culture_id", "cultures"],
        ],
        array: &[],
    },
];

/// Validates the built-in table into a catalog, in declaration order.
pub fn builtin_catalog() -> GeneratorResult<TableCatalog> {
    let mut catalog = TableCatalog::new();
    for table in BUILTIN_TABLES {
        let spec = TableSpec::from_tuples::<_, &str>(table.name, table.object, table.array)?;
        catalog.insert(table.name, spec)?;
    }
    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::{BUILTIN_TABLES, LEGACY_TABLES, builtin_catalog};

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = builtin_catalog().expect("built-in catalog should validate");
        assert_eq!(catalog.len(), BUILTIN_TABLES.len());
        assert_eq!(catalog.len(), 34);
    }

    #[test]
    fn races_carry_self_reference_and_children() {
        let catalog = builtin_catalog().expect("built-in catalog should validate");
        let races = catalog.get("races").expect("races should be defined");

        let parent = &races.object_relationships[1];
        assert_eq!(parent.name, "parent_race");
        assert_eq!(parent.target_table, None);

        let subraces = &races.array_relationships[0];
        assert_eq!(subraces.column, "parent_race_id");
        assert_eq!(subraces.table, "races");
    }

    #[test]
    fn catalog_redefines_some_legacy_tables() {
        let catalog = builtin_catalog().expect("built-in catalog should validate");
        let redefined: Vec<&str> = LEGACY_TABLES
            .iter()
            .copied()
            .filter(|name| catalog.contains(name))
            .collect();

        assert_eq!(redefined, vec!["locations", "quest_hooks", "encounters"]);
    }
}
