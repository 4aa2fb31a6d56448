use std::{fmt, fs, path::Path};

use serde::{
    Deserialize, Deserializer,
    de::{MapAccess, Visitor},
};

use super::{RawTableSpec, TableCatalog};
use crate::error::{GeneratorError, GeneratorResult};

/// Loads a catalog from a JSON tables file.
///
/// The file is an object keyed by table name; each value may carry
/// `object_relationships` and `array_relationships` as arrays of string
/// tuples. Key order is kept.
pub fn load_tables_file(path: &Path) -> GeneratorResult<TableCatalog> {
    let contents = fs::read_to_string(path).map_err(|source| GeneratorError::io(path, source))?;
    let catalog = parse_tables_json(&contents, path)?;
    tracing::debug!(
        tables = catalog.len(),
        "loaded tables file {}",
        path.display()
    );
    Ok(catalog)
}

/// `origin` is only used to label errors.
pub fn parse_tables_json(contents: &str, origin: &Path) -> GeneratorResult<TableCatalog> {
    let tables_file_error = |source| GeneratorError::TablesFile {
        path: origin.to_path_buf(),
        source,
    };

    let TableEntries(entries) = serde_json::from_str(contents).map_err(tables_file_error)?;

    let mut catalog = TableCatalog::new();
    for (name, raw) in entries {
        let spec = raw.into_spec(&name)?;
        catalog.insert(name, spec)?;
    }
    Ok(catalog)
}

/// Every `name: spec` pair of the top-level object, repeats included, in file
/// order. A plain map would let a repeated name replace the earlier one.
struct TableEntries(Vec<(String, RawTableSpec)>);

impl<'de> Deserialize<'de> for TableEntries {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = TableEntries;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object keyed by table name")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
                while let Some((name, spec)) = map.next_entry::<String, RawTableSpec>()? {
                    entries.push((name, spec));
                }
                Ok(TableEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}
