use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::{
    catalog::TableCatalog,
    error::{GeneratorError, GeneratorResult},
    render::{INDEX_FILE_NAME, render_index, render_table_document, table_file_name},
};

/// Destination for rendered metadata files.
pub trait OutputSink {
    fn emit(&mut self, file_name: &str, contents: &str) -> GeneratorResult<()>;

    /// Verb used in per-table progress messages.
    fn action(&self) -> &'static str {
        "Generated"
    }

    /// Verb used in the index summary.
    fn index_action(&self) -> &'static str {
        "Updated"
    }
}

/// Writes files into a directory, overwriting existing ones.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
    root_ready: bool,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            root_ready: false,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl OutputSink for DirectorySink {
    fn emit(&mut self, file_name: &str, contents: &str) -> GeneratorResult<()> {
        if !self.root_ready {
            fs::create_dir_all(&self.root)
                .map_err(|source| GeneratorError::io(&self.root, source))?;
            self.root_ready = true;
        }
        let path = self.root.join(file_name);
        fs::write(&path, contents).map_err(|source| GeneratorError::io(path, source))
    }
}

/// Records what would be written without touching the filesystem.
#[derive(Debug, Clone, Default)]
pub struct DryRunSink {
    planned: Vec<(String, usize)>,
}

impl DryRunSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// File names with their rendered size in bytes.
    pub fn planned(&self) -> &[(String, usize)] {
        &self.planned
    }
}

impl OutputSink for DryRunSink {
    fn emit(&mut self, file_name: &str, contents: &str) -> GeneratorResult<()> {
        tracing::debug!(bytes = contents.len(), "would write {file_name}");
        self.planned.push((file_name.to_string(), contents.len()));
        Ok(())
    }

    fn action(&self) -> &'static str {
        "Would generate"
    }

    fn index_action(&self) -> &'static str {
        "Would update"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaleReason {
    Missing,
    Differs,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaleFile {
    pub file_name: String,
    pub reason: StaleReason,
}

/// Compares rendered output against the files already on disk.
#[derive(Debug, Clone)]
pub struct CheckSink {
    root: PathBuf,
    stale: Vec<StaleFile>,
}

impl CheckSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            stale: Vec::new(),
        }
    }

    pub fn stale(&self) -> &[StaleFile] {
        &self.stale
    }

    pub fn is_up_to_date(&self) -> bool {
        self.stale.is_empty()
    }
}

impl OutputSink for CheckSink {
    fn emit(&mut self, file_name: &str, contents: &str) -> GeneratorResult<()> {
        let path = self.root.join(file_name);
        let reason = match fs::read(&path) {
            Ok(existing) if existing == contents.as_bytes() => return Ok(()),
            Ok(_) => StaleReason::Differs,
            Err(err) if err.kind() == io::ErrorKind::NotFound => StaleReason::Missing,
            Err(source) => return Err(GeneratorError::io(path, source)),
        };
        tracing::warn!(reason = ?reason, "stale metadata file {}", path.display());
        self.stale.push(StaleFile {
            file_name: file_name.to_string(),
            reason,
        });
        Ok(())
    }

    fn action(&self) -> &'static str {
        "Checked"
    }

    fn index_action(&self) -> &'static str {
        "Checked"
    }
}

/// Keeps rendered files in memory, in emit order.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    files: Vec<(String, String)>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn files(&self) -> &[(String, String)] {
        &self.files
    }

    pub fn get(&self, file_name: &str) -> Option<&str> {
        self.files
            .iter()
            .rev()
            .find(|(name, _)| name == file_name)
            .map(|(_, contents)| contents.as_str())
    }
}

impl OutputSink for MemorySink {
    fn emit(&mut self, file_name: &str, contents: &str) -> GeneratorResult<()> {
        self.files.push((file_name.to_string(), contents.to_string()));
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationReport {
    pub table_files: Vec<String>,
    /// Catalog tables listed in the index; pinned and legacy entries excluded.
    pub indexed_tables: usize,
}

/// Renders and emits one file per catalog table, in declaration order.
///
/// Stops at the first failed write; files emitted before it are left as they
/// are.
pub fn write_all_tables<S: OutputSink>(
    catalog: &TableCatalog,
    sink: &mut S,
) -> GeneratorResult<Vec<String>> {
    let mut written = Vec::with_capacity(catalog.len());
    for (table, spec) in catalog.iter() {
        let file_name = table_file_name(table);
        let document = render_table_document(table, spec);
        sink.emit(&file_name, &document)?;
        tracing::info!("{} {file_name}", sink.action());
        written.push(file_name);
    }
    Ok(written)
}

/// Emits `tables.yaml` and returns how many catalog tables it lists.
pub fn write_index<S: OutputSink>(
    catalog: &TableCatalog,
    legacy_tables: &[&str],
    sink: &mut S,
) -> GeneratorResult<usize> {
    let index = render_index(catalog, legacy_tables);
    sink.emit(INDEX_FILE_NAME, &index)?;
    let count = catalog.len();
    tracing::info!("{}", index_summary(sink, count));
    Ok(count)
}

fn index_summary<S: OutputSink>(sink: &S, count: usize) -> String {
    format!("{} {INDEX_FILE_NAME} with {count} new tables", sink.index_action())
}

/// Table files first, then the index, so the index never points at a file
/// that failed to write.
pub fn generate<S: OutputSink>(
    catalog: &TableCatalog,
    legacy_tables: &[&str],
    sink: &mut S,
) -> GeneratorResult<GenerationReport> {
    let table_files = write_all_tables(catalog, sink)?;
    let indexed_tables = write_index(catalog, legacy_tables, sink)?;
    Ok(GenerationReport {
        table_files,
        indexed_tables,
    })
}
