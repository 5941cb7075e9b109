/// One of the 16 points of the compass rose, clockwise from north.
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompassPoint {
    N,
    NNE,
    NE,
    ENE,
    E,
    ESE,
    SE,
    SSE,
    S,
    SSW,
    SW,
    WSW,
    W,
    WNW,
    NW,
    NNW,
}

const POINTS: [CompassPoint; 16] = [
    CompassPoint::N,
    CompassPoint::NNE,
    CompassPoint::NE,
    CompassPoint::ENE,
    CompassPoint::E,
    CompassPoint::ESE,
    CompassPoint::SE,
    CompassPoint::SSE,
    CompassPoint::S,
    CompassPoint::SSW,
    CompassPoint::SW,
    CompassPoint::WSW,
    CompassPoint::W,
    CompassPoint::WNW,
    CompassPoint::NW,
    CompassPoint::NNW,
];

const SECTOR_DEGREES: f64 = 360.0 / 16.0;

impl CompassPoint {
    /// Map a bearing in degrees to the sector centred on each point.
    ///
    /// Any finite bearing is accepted and normalised into `[0, 360)`, so
    /// `-10.0` is "N" and `370.0` is "N". Returns `None` for NaN or infinity.
    pub fn from_bearing(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }

        let normalized = degrees.rem_euclid(360.0);
        let sector = ((normalized + SECTOR_DEGREES / 2.0) / SECTOR_DEGREES) as usize;
        Some(POINTS[sector % POINTS.len()])
    }

    pub fn label(&self) -> &'static str {
        match self {
            CompassPoint::N => "N",
            CompassPoint::NNE => "NNE",
            CompassPoint::NE => "NE",
            CompassPoint::ENE => "ENE",
            CompassPoint::E => "E",
            CompassPoint::ESE => "ESE",
            CompassPoint::SE => "SE",
            CompassPoint::SSE => "SSE",
            CompassPoint::S => "S",
            CompassPoint::SSW => "SSW",
            CompassPoint::SW => "SW",
            CompassPoint::WSW => "WSW",
            CompassPoint::W => "W",
            CompassPoint::WNW => "WNW",
            CompassPoint::NW => "NW",
            CompassPoint::NNW => "NNW",
        }
    }

    pub const fn all() -> &'static [CompassPoint] {
        &POINTS
    }
}

impl std::fmt::Display for CompassPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Convert a wind bearing to its compass label, e.g. `225.0` to `"SW"`.
pub fn convert_wind_direction(degrees: f64) -> Option<&'static str> {
    CompassPoint::from_bearing(degrees).map(|p| p.label())
}
