use serde::{Deserialize, Serialize};

use crate::gradient::{FALLBACK_STOPS, GradientSpec};
use crate::legacy::LegacyTwoStopView;

/// The fixed set of sections on the impact-report page. Slugs double as
/// storage keys in whatever document store backs the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SectionId {
    Hero,
    Mission,
    Stats,
    Stories,
    Gallery,
    Partners,
}

impl SectionId {
    pub const ALL: [SectionId; 6] = [
        SectionId::Hero,
        SectionId::Mission,
        SectionId::Stats,
        SectionId::Stories,
        SectionId::Gallery,
        SectionId::Partners,
    ];

    pub fn slug(&self) -> &'static str {
        match self {
            SectionId::Hero => "hero",
            SectionId::Mission => "mission",
            SectionId::Stats => "stats",
            SectionId::Stories => "stories",
            SectionId::Gallery => "gallery",
            SectionId::Partners => "partners",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            SectionId::Hero => "Hero",
            SectionId::Mission => "Our Mission",
            SectionId::Stats => "Impact by the Numbers",
            SectionId::Stories => "Stories",
            SectionId::Gallery => "Gallery",
            SectionId::Partners => "Partners",
        }
    }
}

/// One section's stored document. The full `background` string is the
/// single source of truth for the gradient; the legacy degree/color/opacity
/// fields only exist for older consumers and are recomputed from it before
/// every save (never the reverse).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionContent {
    pub title: String,
    pub body: String,
    pub background: Option<String>,
    pub degree: Option<f32>,
    pub color1: Option<String>,
    pub color2: Option<String>,
    pub opacity: Option<f32>,
    pub image_url: Option<String>,
    pub position: u32,
}

impl Default for SectionContent {
    fn default() -> Self {
        Self {
            title: String::new(),
            body: String::new(),
            background: None,
            degree: None,
            color1: None,
            color2: None,
            opacity: None,
            image_url: None,
            position: 0,
        }
    }
}

impl SectionContent {
    /// The authoritative gradient string. The full string wins whenever it
    /// exists; legacy fields only fill in for documents written before the
    /// full string was stored.
    pub fn background_css(&self) -> String {
        if let Some(css) = &self.background {
            return css.clone();
        }

        if self.degree.is_some()
            || self.color1.is_some()
            || self.color2.is_some()
            || self.opacity.is_some()
        {
            let view = LegacyTwoStopView {
                degree: self.degree.unwrap_or(crate::gradient::DEFAULT_DEGREE),
                color1: self
                    .color1
                    .clone()
                    .unwrap_or_else(|| FALLBACK_STOPS[0].hex()),
                color2: self
                    .color2
                    .clone()
                    .unwrap_or_else(|| FALLBACK_STOPS[1].hex()),
                opacity: self.opacity.unwrap_or(1.0),
            };
            return view.to_css();
        }

        GradientSpec::default().to_css()
    }

    pub fn background_spec(&self) -> GradientSpec {
        GradientSpec::parse(&self.background_css())
    }

    /// Recomputes the legacy fields from the authoritative string, so the
    /// two representations cannot drift in the stored document.
    pub fn sync_legacy_fields(&mut self) {
        let css = self.background_css();
        let view = LegacyTwoStopView::from_css(&css);

        self.background = Some(css);
        self.degree = Some(view.degree);
        self.color1 = Some(view.color1);
        self.color2 = Some(view.color2);
        self.opacity = Some(view.opacity);
    }
}
