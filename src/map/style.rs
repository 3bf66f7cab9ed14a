/// Fill opacity of eclipse bands
pub const FILL_OPACITY: f64 = 0.5;
pub const REGION_FILL: &str = "white";
pub const REGION_STROKE: &str = "#5C6C70";
pub const REGION_STROKE_WIDTH: &str = "2px";
pub const MARKER_COLOR: &str = "#2E3638";
pub const MARKER_INNER: &str = "white";
pub const LABEL_FONT_SIZE: f64 = 12.0;
pub const LABEL_FONT_FAMILY: &str = r#""ABCSans","Interval Sans Pro",Arial,Helvetica,sans-serif"#;

/// Legend swatches: (caption, fill)
pub const LEGEND: [(&str, &str); 2] = [
    ("Within the next 50 years", "rgba(226, 122, 59, 0.5)"),
    ("Within the next 100 years", "rgba(59, 195, 226, 0.5)"),
];

/// Linear RGB interpolation over a numeric domain
pub struct ColorScale {
    pub domain: [f64; 2],
    pub range: [[u8; 3]; 2],
}

/// Years 2017..2117 from mediumseagreen to slateblue
pub const YEAR_SCALE: ColorScale = ColorScale {
    domain: [2017.0, 2117.0],
    range: [[60, 179, 113], [106, 90, 205]],
};

impl ColorScale {
    /// Unclamped like d3's linear scale; channels saturate at 0 and 255
    pub fn rgb(&self, value: f64) -> [u8; 3] {
        let t = (value - self.domain[0]) / (self.domain[1] - self.domain[0]);
        let [a, b] = self.range;
        let mut out = [0u8; 3];
        for i in 0..3 {
            let c = a[i] as f64 + (b[i] as f64 - a[i] as f64) * t;
            out[i] = c.round().clamp(0.0, 255.0) as u8;
        }
        out
    }

    pub fn css(&self, value: f64) -> String {
        let [r, g, b] = self.rgb(value);
        format!("rgb({r}, {g}, {b})")
    }
}

/// Parse the CSS colors the datasets use: `#rgb`, `#rrggbb`,
/// `rgb(...)`/`rgba(...)` and a handful of names
pub fn parse_css_color(color: &str) -> Option<[u8; 3]> {
    let c = color.trim().to_ascii_lowercase();

    if let Some(hex) = c.strip_prefix('#') {
        let digits: Vec<u8> = hex
            .chars()
            .map(|ch| ch.to_digit(16).map(|d| d as u8))
            .collect::<Option<_>>()?;
        return match digits.len() {
            3 => Some([digits[0] * 17, digits[1] * 17, digits[2] * 17]),
            6 => Some([
                digits[0] * 16 + digits[1],
                digits[2] * 16 + digits[3],
                digits[4] * 16 + digits[5],
            ]),
            _ => None,
        };
    }

    if let Some(args) = c
        .strip_prefix("rgba(")
        .or_else(|| c.strip_prefix("rgb("))
        .and_then(|rest| rest.strip_suffix(')'))
    {
        let channels: Vec<u8> = args
            .split(',')
            .take(3)
            .map(|part| part.trim().parse::<f64>().ok().map(|v| v.round().clamp(0.0, 255.0) as u8))
            .collect::<Option<_>>()?;
        return (channels.len() == 3).then(|| [channels[0], channels[1], channels[2]]);
    }

    match c.as_str() {
        "white" => Some([255, 255, 255]),
        "black" => Some([0, 0, 0]),
        "red" => Some([255, 0, 0]),
        "blue" => Some([0, 0, 255]),
        "orange" => Some([255, 165, 0]),
        "mediumseagreen" => Some([60, 179, 113]),
        "slateblue" => Some([106, 90, 205]),
        _ => None,
    }
}
