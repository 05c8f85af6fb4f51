pub mod fixed_width;
pub mod section;
pub mod traits;

pub mod prelude {
    pub use super::fixed_width::{FixedWidthParser, Layout, Record};
    pub use super::section::{DisputeSectionExtractor, MainSectionExtractor, Table};
    pub use super::traits::SectionExtractor;
}
