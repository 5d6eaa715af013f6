//! Vocabulary and value objects shared by the codec and the domain objects.

mod colors;
mod ids;
mod parent;
mod rich_text;
mod values;
mod vocabulary;

pub use colors::*;
pub use ids::*;
pub use parent::*;
pub use rich_text::*;
pub use values::*;
pub use vocabulary::*;
