pub mod content;
pub mod error;
pub mod gradient;
pub mod legacy;
pub mod prelude;

pub use content::{SectionContent, SectionId};
pub use error::StoreError;
pub use gradient::{ColorStop, GradientSpec, compose, extract_alpha};
pub use legacy::LegacyTwoStopView;
