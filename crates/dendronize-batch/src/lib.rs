//! # Import Orchestration
//!
//! Runs one Obsidian-to-Dendron import: scan the source vault, convert every
//! note, relocate assets, optionally write hierarchy stubs, and return the
//! run's [`RunStats`](dendronize_core::RunStats).
//!
//! Runs are sequential and cooperative. A
//! [`CancellationToken`](tokio_util::sync::CancellationToken) is checked
//! before each file, and progress is reported through a
//! [`ProgressReporter`].
//!
//! ```no_run
//! use dendronize_batch::{LogReporter, VaultImporter};
//! use dendronize_core::TransformOptions;
//!
//! # async fn example() {
//! let importer = VaultImporter::new("/notes/obsidian", "/notes/dendron")
//!     .with_options(TransformOptions::new().create_hierarchy_stubs(true))
//!     .with_progress(LogReporter);
//!
//! match importer.run().await {
//!     Ok(stats) => println!("{} files imported", stats.processed_files),
//!     Err(failure) => eprintln!("{}: {}", failure, failure.error),
//! }
//! # }
//! ```

pub mod importer;
pub mod progress;
pub mod stubs;

pub use importer::{RunFailure, VaultImporter, transform_vault};
pub use progress::{LogReporter, NoopReporter, Phase, ProgressEvent, ProgressReporter};
pub use stubs::{SCHEMA_SUFFIX, SchemaDocument, StubWriter, collect_hierarchies, schema_file_name};
pub use tokio_util::sync::CancellationToken;

pub mod prelude {
    pub use crate::importer::*;
    pub use crate::progress::*;
    pub use crate::stubs::*;
    pub use dendronize_core::prelude::*;
}
