pub use crate::content::{SectionContent, SectionId};
pub use crate::error::StoreError;
pub use crate::gradient::{
    ColorStop, DEFAULT_DEGREE, FALLBACK_STOPS, GradientSpec, compose, extract_alpha,
};
pub use crate::legacy::LegacyTwoStopView;
