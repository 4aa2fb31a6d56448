pub mod builtin;
pub mod file;

pub use builtin::{LEGACY_TABLES, builtin_catalog};
pub use file::{load_tables_file, parse_tables_json};

use serde::Deserialize;

use crate::error::{GeneratorError, GeneratorResult, RelationshipKind};

/// Many-to-one link through a foreign key column on the owning table.
///
/// `target_table` is carried for documentation only; Hasura infers the
/// target from the constraint, so it never reaches the rendered YAML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectRelationship {
    pub name: String,
    pub column: String,
    pub target_table: Option<String>,
}

/// One-to-many link where the foreign key column lives on `table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArrayRelationship {
    pub name: String,
    pub column: String,
    pub table: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TableSpec {
    pub object_relationships: Vec<ObjectRelationship>,
    pub array_relationships: Vec<ArrayRelationship>,
}

impl TableSpec {
    /// Builds a spec from untyped relationship tuples, checking the shape of
    /// every entry. Object entries take 2 or 3 elements, array entries
    /// exactly 3.
    pub fn from_tuples<E, S>(table: &str, object: &[E], array: &[E]) -> GeneratorResult<Self>
    where
        E: AsRef<[S]>,
        S: AsRef<str>,
    {
        let object_relationships = object
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let parts = checked_parts(table, RelationshipKind::Object, index, entry.as_ref())?;
                match parts.as_slice() {
                    [name, column] => Ok(ObjectRelationship {
                        name: name.to_string(),
                        column: column.to_string(),
                        target_table: None,
                    }),
                    [name, column, target] => Ok(ObjectRelationship {
                        name: name.to_string(),
                        column: column.to_string(),
                        target_table: Some(target.to_string()),
                    }),
                    _ => Err(invalid_arity(table, RelationshipKind::Object, index, parts.len())),
                }
            })
            .collect::<GeneratorResult<Vec<_>>>()?;

        let array_relationships = array
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                let parts = checked_parts(table, RelationshipKind::Array, index, entry.as_ref())?;
                match parts.as_slice() {
                    [name, column, target] => Ok(ArrayRelationship {
                        name: name.to_string(),
                        column: column.to_string(),
                        table: target.to_string(),
                    }),
                    _ => Err(invalid_arity(table, RelationshipKind::Array, index, parts.len())),
                }
            })
            .collect::<GeneratorResult<Vec<_>>>()?;

        Ok(Self {
            object_relationships,
            array_relationships,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.object_relationships.is_empty() && self.array_relationships.is_empty()
    }
}

fn checked_parts<'a, S: AsRef<str>>(
    table: &str,
    kind: RelationshipKind,
    index: usize,
    entry: &'a [S],
) -> GeneratorResult<Vec<&'a str>> {
    let parts: Vec<&str> = entry.iter().map(|part| part.as_ref()).collect();
    if !(2..=3).contains(&parts.len()) {
        return Err(invalid_arity(table, kind, index, parts.len()));
    }
    if parts.iter().any(|part| part.trim().is_empty()) {
        return Err(GeneratorError::EmptyName {
            table: table.to_string(),
            kind,
            index,
        });
    }
    Ok(parts)
}

fn invalid_arity(table: &str, kind: RelationshipKind, index: usize, arity: usize) -> GeneratorError {
    GeneratorError::InvalidRelationship {
        table: table.to_string(),
        kind,
        index,
        arity,
    }
}

/// Table definition as it appears in a tables file, before shape checks.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RawTableSpec {
    pub object_relationships: Vec<Vec<String>>,
    pub array_relationships: Vec<Vec<String>>,
}

impl RawTableSpec {
    pub fn into_spec(self, table: &str) -> GeneratorResult<TableSpec> {
        TableSpec::from_tuples::<_, String>(
            table,
            &self.object_relationships,
            &self.array_relationships,
        )
    }
}

/// Table name to spec mapping, kept in declaration order.
///
/// Names are unique and non-empty. Declaration order drives the order table
/// files are written in; the index file sorts names independently.
#[derive(Debug, Clone, Default)]
pub struct TableCatalog {
    tables: Vec<(String, TableSpec)>,
}

impl TableCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, spec: TableSpec) -> GeneratorResult<()> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GeneratorError::EmptyTableName);
        }
        if self.contains(&name) {
            return Err(GeneratorError::DuplicateTable { table: name });
        }
        self.tables.push((name, spec));
        Ok(())
    }

    pub fn with_table(mut self, name: impl Into<String>, spec: TableSpec) -> GeneratorResult<Self> {
        self.insert(name, spec)?;
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tables.iter().any(|(existing, _)| existing == name)
    }

    pub fn get(&self, name: &str) -> Option<&TableSpec> {
        self.tables
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, spec)| spec)
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &TableSpec)> {
        self.tables.iter().map(|(name, spec)| (name.as_str(), spec))
    }

    pub fn sorted_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.tables.iter().map(|(name, _)| name.as_str()).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::{RawTableSpec, TableCatalog, TableSpec};
    use crate::error::{GeneratorError, RelationshipKind};

    #[test]
    fn parses_two_and_three_element_object_relationships() {
        let spec = TableSpec::from_tuples::<&[&str], &str>(
            "cultures",
            &[
                &["campaign", "campaign_id"],
                &["primary_race", "primary_race_id", "races"],
            ],
            &[],
        )
        .expect("valid spec");

        assert_eq!(spec.object_relationships.len(), 2);
        assert_eq!(spec.object_relationships[0].target_table, None);
        assert_eq!(
            spec.object_relationships[1].target_table.as_deref(),
            Some("races")
        );
    }

    #[test]
    fn rejects_array_relationship_without_target_table() {
        let err = TableSpec::from_tuples::<&[&str], &str>(
            "races",
            &[],
            &[&["entities", "race_id", "entities"], &["subraces", "parent_race_id"]],
        )
        .expect_err("two-element array relationship must fail");

        match err {
            GeneratorError::InvalidRelationship {
                table,
                kind,
                index,
                arity,
            } => {
                assert_eq!(table, "races");
                assert_eq!(kind, RelationshipKind::Array);
                assert_eq!(index, 1);
                assert_eq!(arity, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_oversized_object_relationship_with_clear_message() {
        let err = TableSpec::from_tuples::<&[&str], &str>(
            "shops",
            &[&["owner", "owner_entity_id", "entities", "extra"]],
            &[],
        )
        .expect_err("four-element object relationship must fail");

        assert_eq!(
            err.to_string(),
            "table 'shops': object_relationships[0] has 4 elements, expected 2 or 3"
        );
    }

    #[test]
    fn rejects_blank_relationship_names() {
        let raw = RawTableSpec {
            object_relationships: vec![vec!["campaign".to_string(), " ".to_string()]],
            array_relationships: Vec::new(),
        };

        let err = raw.into_spec("feats").expect_err("blank column must fail");
        assert!(matches!(err, GeneratorError::EmptyName { index: 0, .. }));
    }

    #[test]
    fn catalog_rejects_duplicate_and_empty_names() {
        let mut catalog = TableCatalog::new();
        catalog
            .insert("feats", TableSpec::default())
            .expect("first insert should succeed");

        let err = catalog
            .insert("feats", TableSpec::default())
            .expect_err("duplicate insert should fail");
        assert!(err.to_string().contains("declared more than once"));

        let err = catalog
            .insert("", TableSpec::default())
            .expect_err("empty name should fail");
        assert!(matches!(err, GeneratorError::EmptyTableName));
    }

    #[test]
    fn sorted_names_ignore_declaration_order() {
        let catalog = TableCatalog::new()
            .with_table("zebra", TableSpec::default())
            .and_then(|c| c.with_table("apple", TableSpec::default()))
            .expect("catalog should build");

        assert_eq!(catalog.sorted_names(), vec!["apple", "zebra"]);
        let declared: Vec<&str> = catalog.iter().map(|(name, _)| name).collect();
        assert_eq!(declared, vec!["zebra", "apple"]);
    }
}
