//! Hasura table metadata generator.
//!
//! Turns a catalog of tables and their foreign-key relationships into one
//! `public_<table>.yaml` document per table plus the `tables.yaml` include
//! list consumed by the Hasura metadata tooling.

pub mod catalog;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod render;

pub use catalog::{LEGACY_TABLES, TableCatalog, TableSpec, builtin_catalog, load_tables_file};
pub use error::{GeneratorError, GeneratorResult};
pub use generator::{
    CheckSink, DirectorySink, DryRunSink, GenerationReport, MemorySink, OutputSink, StaleFile,
    StaleReason, generate, write_all_tables, write_index,
};
pub use render::{render_index, render_table_document};
