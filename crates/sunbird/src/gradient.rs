use serde::{Deserialize, Serialize};

pub const DEFAULT_DEGREE: f32 = 180.0;

/// House fallback rendered whenever a stored gradient is absent or beyond
/// repair. A plausible brand gradient beats a black slab on the public page.
pub const FALLBACK_STOPS: [ColorStop; 2] = [
    ColorStop {
        rgb: [0x50, 0x38, 0xa0],
        alpha: 1.0,
    },
    ColorStop {
        rgb: [0x12, 0x12, 0x42],
        alpha: 1.0,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorStop {
    pub rgb: [u8; 3],
    pub alpha: f32,
}

impl ColorStop {
    pub fn opaque(rgb: [u8; 3]) -> Self {
        Self { rgb, alpha: 1.0 }
    }

    pub fn with_alpha(rgb: [u8; 3], alpha: f32) -> Self {
        Self {
            rgb,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }

    /// Normalized 6-digit form, alpha dropped.
    pub fn hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.rgb[0], self.rgb[1], self.rgb[2])
    }

    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');

        match hex.len() {
            6 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                Some(Self::opaque([r, g, b]))
            }
            8 => {
                let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
                let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
                let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
                let a = u8::from_str_radix(&hex[6..8], 16).ok()?;
                Some(Self::with_alpha([r, g, b], a as f32 / 255.0))
            }
            _ => None,
        }
    }
}

impl Default for ColorStop {
    fn default() -> Self {
        Self::opaque([0, 0, 0])
    }
}

/// Structured form of a CSS `linear-gradient(..)` string. Stop order is
/// meaningful: the first stop renders first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradientSpec {
    pub degree: f32,
    pub stops: Vec<ColorStop>,
}

impl Default for GradientSpec {
    fn default() -> Self {
        Self {
            degree: DEFAULT_DEGREE,
            stops: FALLBACK_STOPS.to_vec(),
        }
    }
}

impl GradientSpec {
    /// Total parse: empty, absent, or malformed input yields the default
    /// spec so the editor can always render something. The degree is kept
    /// as written, even when outside `[1, 360]`: older normalization rules
    /// produced such values and they must keep loading.
    pub fn parse(css: &str) -> Self {
        let Some(body) = css
            .trim()
            .strip_prefix("linear-gradient(")
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Self::default();
        };

        let mut degree = DEFAULT_DEGREE;
        let mut stops = Vec::new();

        for (i, segment) in split_top_level(body).enumerate() {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            if i == 0 {
                if let Some(parsed) = parse_degree(segment) {
                    degree = parsed;
                    continue;
                }
            }

            // unrecognized stop syntax coerces to opaque black, not an error
            stops.push(parse_stop(segment).unwrap_or_default());
        }

        if stops.is_empty() {
            return Self::default();
        }

        Self { degree, stops }
    }

    pub fn to_css(&self) -> String {
        compose(self.degree, &self.stops, None)
    }
}

/// Serialize a gradient back to CSS. Total: the degree is clamped into
/// `[1, 360]` and per-stop alphas into `[0, 1]`, never rejected. When
/// `opacity` is supplied it overrides every stop's own alpha; stops whose
/// effective alpha is 1 are emitted as bare hex to keep the string minimal.
pub fn compose(degree: f32, stops: &[ColorStop], opacity: Option<f32>) -> String {
    let degree = degree.clamp(1.0, 360.0);
    let stops = if stops.is_empty() {
        &FALLBACK_STOPS[..]
    } else {
        stops
    };

    let mut out = format!("linear-gradient({}deg", format_number(degree));
    for stop in stops {
        let alpha = opacity.unwrap_or(stop.alpha).clamp(0.0, 1.0);
        if alpha < 1.0 {
            out.push_str(&format!(
                ", rgba({}, {}, {}, {})",
                stop.rgb[0],
                stop.rgb[1],
                stop.rgb[2],
                format_number(alpha)
            ));
        } else {
            out.push_str(&format!(", {}", stop.hex()));
        }
    }
    out.push(')');
    out
}

/// Pulls the alpha the legacy opacity field stores separately from color:
/// the last numeric group of the last `rgba(...)` in the raw string,
/// clamped into `[0, 1]`. Without an rgba match the alpha is 1; when the
/// string holds no color at all the caller-supplied fallback is returned,
/// a documented special case rather than an error.
pub fn extract_alpha(css: &str, missing_color_fallback: f32) -> f32 {
    if let Some(start) = css.rfind("rgba(") {
        let tail = &css[start + "rgba(".len()..];
        let inner = tail.split(')').next().unwrap_or(tail);
        if let Some(last) = inner.split(',').next_back() {
            if let Ok(alpha) = last.trim().parse::<f32>() {
                return alpha.clamp(0.0, 1.0);
            }
        }
        return 1.0;
    }

    if css.contains('#') || css.contains("rgb(") {
        1.0
    } else {
        missing_color_fallback
    }
}

fn parse_degree(segment: &str) -> Option<f32> {
    segment.strip_suffix("deg")?.trim().parse::<f32>().ok()
}

fn parse_stop(segment: &str) -> Option<ColorStop> {
    if segment.starts_with('#') {
        return ColorStop::from_hex(segment);
    }

    if let Some(inner) = segment
        .strip_prefix("rgba(")
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
        if parts.len() < 3 {
            return None;
        }

        let mut rgb = [0u8; 3];
        for (slot, part) in rgb.iter_mut().zip(&parts[0..3]) {
            let channel = part.parse::<f32>().ok()?;
            *slot = channel.clamp(0.0, 255.0).round() as u8;
        }

        let alpha = match parts.get(3) {
            Some(raw) => raw.parse::<f32>().ok()?,
            None => 1.0,
        };

        return Some(ColorStop::with_alpha(rgb, alpha));
    }

    None
}

// splits on commas outside parentheses, so rgba(..) groups stay whole
fn split_top_level(body: &str) -> impl Iterator<Item = &str> {
    let mut depth = 0usize;
    body.split(move |c: char| {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            _ => {}
        }
        c == ',' && depth == 0
    })
}

fn format_number(value: f32) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}
