use crate::card::{Card, CardError, CardGenerator};
use crate::record::{Record, RecordError, read_records};
use crate::template::{Template, TemplateError};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum IoError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid output directory: {0}")]
    InvalidOutputDir(String),
    #[error(transparent)]
    Template(#[from] TemplateError),
    #[error(transparent)]
    Records(#[from] RecordError),
    #[error(transparent)]
    Card(#[from] CardError),
}

/// Load a template file; its extension becomes the extension of every card
pub fn load_template(path: &Path) -> Result<Template, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let source = fs::read_to_string(path)?;
    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_else(|| Template::DEFAULT_EXTENSION.to_string());
    Ok(Template::new(source, extension)?)
}

/// Read every record from a CSV file
pub fn load_records(path: &Path) -> Result<Vec<Record>, IoError> {
    if !path.exists() {
        return Err(IoError::NotFound(path.to_path_buf()));
    }
    let file = fs::File::open(path)?;
    Ok(read_records(file)?)
}

/// Write a card into the output directory, returning its path
pub fn write_card(output_dir: &Path, card: &Card) -> Result<PathBuf, IoError> {
    // Create the output directory if it doesn't exist
    fs::create_dir_all(output_dir)?;

    let path = output_dir.join(&card.file_name);
    fs::write(&path, card.document.to_string())?;
    Ok(path)
}

pub fn validate_output_dir(path: &Path) -> Result<(), IoError> {
    if path.exists() && !path.is_dir() {
        return Err(IoError::InvalidOutputDir(format!(
            "{} exists and is not a directory",
            path.display()
        )));
    }

    Ok(())
}

/// Outcome of a batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub written: Vec<PathBuf>,
    /// Zero-based indexes of records skipped for lacking a title
    pub skipped: Vec<usize>,
}

/// Generate and write a card for every record.
///
/// Records without a title are skipped with a warning. Any other failure
/// aborts the batch.
pub fn generate_batch(
    generator: &CardGenerator,
    records: &[Record],
    output_dir: &Path,
) -> Result<BatchSummary, IoError> {
    validate_output_dir(output_dir)?;

    let mut summary = BatchSummary::default();
    let mut seen = HashSet::new();

    for (index, record) in records.iter().enumerate() {
        let card = match generator.generate(record) {
            Ok(card) => card,
            Err(CardError::MissingTitle) => {
                log::warn!("Skipping record {}: no title", index + 1);
                summary.skipped.push(index);
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        if !seen.insert(card.file_name.clone()) {
            log::warn!(
                "Record {} overwrites {} written earlier in this batch",
                index + 1,
                card.file_name
            );
        }

        let path = write_card(output_dir, &card)?;
        log::info!("Wrote {}", path.display());
        summary.written.push(path);
    }

    Ok(summary)
}
