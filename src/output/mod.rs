pub mod metadata;

pub use metadata::{load_metadata, run_dir, save_metadata, MetadataRecord, METADATA_FILE};
