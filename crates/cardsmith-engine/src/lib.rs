pub mod card;
pub mod io;
pub mod layout;
pub mod markup;
pub mod record;
pub mod settings;
pub mod template;

#[cfg(test)]
pub mod tests;

// Re-export key types for easier usage
pub use card::{Card, CardError, CardGenerator, output_file_name};
pub use io::*;
pub use layout::{Anchor, Geometry, Line, Run, layout};
pub use markup::{Block, BlockKind, Segment, parse, split_emphasis};
pub use record::{Record, RecordError, read_records};
pub use settings::{CardStyle, LayoutSettings, Selectors};
pub use template::{SvgDocument, Template, TemplateBinder, TemplateError};
