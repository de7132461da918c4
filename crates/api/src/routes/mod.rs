pub mod export;
pub mod generate;
pub mod schemas;

pub use export::export_docx;
pub use generate::{generate, generate_stream};
pub use schemas::doc_schemas;
