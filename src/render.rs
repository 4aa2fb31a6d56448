//! YAML rendering for table metadata and the `tables.yaml` index.
//!
//! Output is assembled as text rather than through a YAML serializer so the
//! layout stays byte-stable for the metadata already committed alongside it.

use crate::catalog::{ArrayRelationship, ObjectRelationship, TableCatalog, TableSpec};

pub const PUBLIC_SCHEMA: &str = "public";
pub const INDEX_FILE_NAME: &str = "tables.yaml";
/// Always the first include. Its metadata lives outside the catalog.
pub const PINNED_TABLE: &str = "campaigns";

// Placeholder policy: role `public` gets every column with no row filter.
const PERMISSIONS: &str = "
select_permissions:
  - role: public
    permission:
      columns: '*'
      filter: {}
insert_permissions:
  - role: public
    permission:
      check: {}
      columns: '*'
update_permissions:
  - role: public
    permission:
      columns: '*'
      filter: {}
      check: {}";

pub fn table_file_name(table: &str) -> String {
    format!("{PUBLIC_SCHEMA}_{table}.yaml")
}

/// Renders the metadata document for one table. The result has no trailing
/// newline.
pub fn render_table_document(table: &str, spec: &TableSpec) -> String {
    let mut doc = format!("table:\n  name: {table}\n  schema: {PUBLIC_SCHEMA}");

    if !spec.object_relationships.is_empty() {
        doc.push_str("\nobject_relationships:");
        for rel in &spec.object_relationships {
            doc.push_str(&render_object_relationship(rel));
        }
    }

    if !spec.array_relationships.is_empty() {
        doc.push_str("\narray_relationships:");
        for rel in &spec.array_relationships {
            doc.push_str(&render_array_relationship(rel));
        }
    }

    doc.push_str(PERMISSIONS);
    doc
}

// target_table is intentionally dropped here.
fn render_object_relationship(rel: &ObjectRelationship) -> String {
    format!(
        "\n  - name: {}\n    using:\n      foreign_key_constraint_on: {}",
        rel.name, rel.column
    )
}

fn render_array_relationship(rel: &ArrayRelationship) -> String {
    format!(
        "\n  - name: {}\n    using:\n      foreign_key_constraint_on:\n        column: {}\n        table:\n          name: {}\n          schema: {PUBLIC_SCHEMA}",
        rel.name, rel.column, rel.table
    )
}

/// Table names in the order they appear in the index: the pinned table,
/// legacy tables the catalog does not define, then catalog tables sorted.
pub fn index_entries<'a>(catalog: &'a TableCatalog, legacy_tables: &[&'a str]) -> Vec<&'a str> {
    let mut entries = vec![PINNED_TABLE];
    entries.extend(
        legacy_tables
            .iter()
            .copied()
            .filter(|name| !catalog.contains(name)),
    );
    entries.extend(catalog.sorted_names());
    entries
}

pub fn render_index(catalog: &TableCatalog, legacy_tables: &[&str]) -> String {
    index_entries(catalog, legacy_tables)
        .into_iter()
        .map(|table| format!("- \"!include {}\"\n", table_file_name(table)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{index_entries, render_index, render_table_document, table_file_name};
    use crate::catalog::{TableCatalog, TableSpec};

    fn spec(object: &[&[&str]], array: &[&[&str]]) -> TableSpec {
        TableSpec::from_tuples::<&[&str], &str>("test", object, array).expect("valid spec")
    }

    #[test]
    fn bare_table_has_only_header_and_permissions() {
        let doc = render_table_document("feats", &TableSpec::default());

        let expected = "table:
  name: feats
  schema: public
select_permissions:
  - role: public
    permission:
      columns: '*'
      filter: {}
insert_permissions:
  - role: public
    permission:
      check: {}
      columns: '*'
update_permissions:
  - role: public
    permission:
      columns: '*'
      filter: {}
      check: {}";
        assert_eq!(doc, expected);
        assert!(!doc.contains("relationships"));
    }

    #[test]
    fn object_relationship_ignores_target_table() {
        let short = render_table_document("shops", &spec(&[&["owner", "owner_entity_id"]], &[]));
        let long = render_table_document(
            "shops",
            &spec(&[&["owner", "owner_entity_id", "entities"]], &[]),
        );

        assert_eq!(short, long);
        assert!(!long.contains("entities"));
        assert!(long.contains(
            "object_relationships:\n  - name: owner\n    using:\n      foreign_key_constraint_on: owner_entity_id\n"
        ));
    }

    #[test]
    fn array_relationship_nests_column_and_table() {
        let doc = render_table_document(
            "pantheons",
            &spec(&[], &[&["deities", "pantheon_id", "deities"]]),
        );

        assert!(doc.contains(
            "array_relationships:
  - name: deities
    using:
      foreign_key_constraint_on:
        column: pantheon_id
        table:
          name: deities
          schema: public
select_permissions:"
        ));
        assert!(!doc.contains("object_relationships"));
    }

    #[test]
    fn sections_follow_fixed_order() {
        let doc = render_table_document(
            "races",
            &spec(
                &[&["campaign", "campaign_id"]],
                &[&["entities", "race_id", "entities"]],
            ),
        );

        let positions: Vec<usize> = [
            "table:",
            "object_relationships:",
            "array_relationships:",
            "select_permissions:",
            "insert_permissions:",
            "update_permissions:",
        ]
        .iter()
        .map(|section| doc.find(section).expect("section should be present"))
        .collect();

        assert!(positions.windows(2).all(|pair| pair[0] < pair[1]));
        assert!(!doc.ends_with('\n'));
    }

    #[test]
    fn index_pins_campaigns_then_legacy_then_sorted_catalog() {
        let catalog = TableCatalog::new()
            .with_table("zebra", TableSpec::default())
            .and_then(|c| c.with_table("apple", TableSpec::default()))
            .expect("catalog should build");

        assert_eq!(
            index_entries(&catalog, &["npcs"]),
            vec!["campaigns", "npcs", "apple", "zebra"]
        );
        assert_eq!(
            render_index(&catalog, &["npcs"]),
            "- \"!include public_campaigns.yaml\"
- \"!include public_npcs.yaml\"
- \"!include public_apple.yaml\"
- \"!include public_zebra.yaml\"
"
        );
    }

    #[test]
    fn index_skips_legacy_tables_defined_by_catalog() {
        let catalog = TableCatalog::new()
            .with_table("encounters", TableSpec::default())
            .expect("catalog should build");

        let index = render_index(&catalog, &["npcs", "encounters"]);
        let include = format!("!include {}", table_file_name("encounters"));
        assert_eq!(index.matches(&include).count(), 1);
        assert_eq!(
            index_entries(&catalog, &["npcs", "encounters"]),
            vec!["campaigns", "npcs", "encounters"]
        );
    }
}
