// Humanizer Core Services

pub mod text_processor;
pub mod config_store;
pub mod classifier;
pub mod document_loader;
pub mod humanize;

pub use text_processor::*;
pub use config_store::*;
pub use classifier::{analyze_text, ClassifierClient, ClassifierError, TextClassifier};
pub use document_loader::{extract_text, DocumentError, DocumentKind};

pub use humanize::{humanize, HumanizeError, Humanizer, RewriteStrategy};
