use serde::Serialize;

/// Weather category derived from a WMO weather code as reported by Open-Meteo.
///
/// The code vocabulary is fixed by the provider, so the membership of each
/// category is a fixed table rather than anything derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCategory {
    /// Codes 0, 1, 2 - clear or partly cloudy skies.
    Clear,
    /// Codes 3, 45, 48 - overcast or fog.
    Overcast,
    /// Codes 51-55, 61-65, 80-82 - drizzle, rain and rain showers.
    Rain,
    /// Codes 71-77, 85, 86 - snowfall, snow grains and snow showers.
    Snow,
    /// Codes 95, 96, 99.
    Thunderstorm,
    /// Any code outside the fixed vocabulary.
    Unknown,
}

/// Classifies a weather code into its category.
///
/// Total over all inputs; codes the table does not know map to `Unknown`.
///
/// # Arguments
///
/// * 'code' - WMO weather code from the daily series
pub fn categorize(code: u16) -> WeatherCategory {
    match code {
        0 | 1 | 2 => WeatherCategory::Clear,
        3 | 45 | 48 => WeatherCategory::Overcast,
        51 | 53 | 55 | 61 | 63 | 65 | 80 | 81 | 82 => WeatherCategory::Rain,
        71 | 73 | 75 | 77 | 85 | 86 => WeatherCategory::Snow,
        95 | 96 | 99 => WeatherCategory::Thunderstorm,
        _ => WeatherCategory::Unknown,
    }
}

/// Human readable description for a weather code, finer grained than the
/// category. The site is in Spanish, so the strings are too.
///
/// # Arguments
///
/// * 'code' - WMO weather code from the daily series
pub fn describe(code: u16) -> &'static str {
    match code {
        0 => "Cielo despejado",
        1 | 2 => "Parcialmente nublado",
        3 => "Nublado",
        45 | 48 => "Niebla",
        51 | 53 | 55 => "Llovizna",
        61 | 63 | 65 => "Lluvia moderada",
        80 | 81 | 82 => "Lluvia intensa",
        71 | 73 | 75 | 77 => "Nieve ligera",
        85 | 86 => "Nieve fuerte",
        95 | 96 | 99 => "Tormenta eléctrica",
        _ => "Condición desconocida",
    }
}

/// Intensity label for the forecasted precipitation of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RainIntensity {
    Low,
    Moderate,
    High,
    VeryHigh,
}

/// Upper bounds of the intensity buckets, in mm. Each bucket is half open,
/// `[previous, bound)`; at or above the last bound the intensity is `VeryHigh`.
const INTENSITY_BOUNDS: [(f64, RainIntensity); 3] = [
    (2.0, RainIntensity::Low),
    (5.0, RainIntensity::Moderate),
    (10.0, RainIntensity::High),
];

/// Derives the precipitation intensity label for a day.
///
/// Days without precipitation carry no label at all.
///
/// # Arguments
///
/// * 'precipitation_mm' - precipitation sum for the day in millimeters
pub fn rain_intensity(precipitation_mm: f64) -> Option<RainIntensity> {
    if precipitation_mm <= 0.0 {
        return None;
    }

    for (bound, intensity) in INTENSITY_BOUNDS {
        if precipitation_mm < bound {
            return Some(intensity);
        }
    }

    Some(RainIntensity::VeryHigh)
}

impl RainIntensity {
    /// Short user facing phrase for the label.
    pub fn phrase(self) -> &'static str {
        match self {
            RainIntensity::Low => "Baja probabilidad de lluvia",
            RainIntensity::Moderate => "Probabilidad moderada de lluvia",
            RainIntensity::High => "Alta probabilidad de lluvia",
            RainIntensity::VeryHigh => "Muy alta probabilidad de lluvia",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_known_code_keeps_its_bucket() {
        for code in [0, 1, 2] {
            assert_eq!(categorize(code), WeatherCategory::Clear, "code {}", code);
        }
        for code in [3, 45, 48] {
            assert_eq!(categorize(code), WeatherCategory::Overcast, "code {}", code);
        }
        for code in [51, 53, 55, 61, 63, 65, 80, 81, 82] {
            assert_eq!(categorize(code), WeatherCategory::Rain, "code {}", code);
        }
        for code in [71, 73, 75, 77, 85, 86] {
            assert_eq!(categorize(code), WeatherCategory::Snow, "code {}", code);
        }
        for code in [95, 96, 99] {
            assert_eq!(
                categorize(code),
                WeatherCategory::Thunderstorm,
                "code {}",
                code
            );
        }
    }

    #[test]
    fn unlisted_codes_are_unknown() {
        for code in [4, 50, 66, 70, 87, 94, 100, 999] {
            assert_eq!(categorize(code), WeatherCategory::Unknown, "code {}", code);
        }
    }

    #[test]
    fn descriptions_follow_the_code() {
        assert_eq!(describe(0), "Cielo despejado");
        assert_eq!(describe(55), "Llovizna");
        assert_eq!(describe(82), "Lluvia intensa");
        assert_eq!(describe(999), "Condición desconocida");
    }

    #[test]
    fn intensity_boundaries_are_half_open() {
        assert_eq!(rain_intensity(1.9), Some(RainIntensity::Low));
        assert_eq!(rain_intensity(2.0), Some(RainIntensity::Moderate));
        assert_eq!(rain_intensity(4.999), Some(RainIntensity::Moderate));
        assert_eq!(rain_intensity(5.0), Some(RainIntensity::High));
        assert_eq!(rain_intensity(9.999), Some(RainIntensity::High));
        assert_eq!(rain_intensity(10.0), Some(RainIntensity::VeryHigh));
    }

    #[test]
    fn dry_days_have_no_label() {
        assert_eq!(rain_intensity(0.0), None);
    }
}
