use crate::element::Element;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display, strum::EnumIter)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Sun,
    Sandstorm,
    Hail,
}

impl Weather {
    /// Unscaled damage multiplier for attacks of `element`.
    pub fn raw_multiplier(self, element: Element) -> f64 {
        match (self, element) {
            (Weather::Rain, Element::Water) | (Weather::Sun, Element::Fire) => 1.5,
            (Weather::Rain, Element::Fire) | (Weather::Sun, Element::Water) => 0.5,
            (Weather::Sandstorm, Element::Rock) | (Weather::Hail, Element::Ice) => 1.2,
            _ => 1.0,
        }
    }

    /// Whether `element` attacks get the player-only synergy bonus.
    pub fn has_synergy(self, element: Element) -> bool {
        match self {
            Weather::Clear => false,
            Weather::Rain => element == Element::Water,
            Weather::Sun => element == Element::Fire,
            Weather::Sandstorm => {
                matches!(element, Element::Rock | Element::Ground | Element::Steel)
            }
            Weather::Hail => element == Element::Ice,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum WeatherIntensity {
    Mild,
    #[default]
    Normal,
    Severe,
}

impl WeatherIntensity {
    pub const fn factor(self) -> f64 {
        match self {
            WeatherIntensity::Mild => 0.5,
            WeatherIntensity::Normal => 1.0,
            WeatherIntensity::Severe => 1.5,
        }
    }

    /// `1 + (raw - 1) * factor`
    pub fn scale(self, raw: f64) -> f64 {
        1.0 + (raw - 1.0) * self.factor()
    }
}

/// Floor-wide rule change.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FloorEvent {
    #[default]
    None,
    InvertedEffectiveness,
    Frenzy,
}

/// Battle-wide conditions shared by every resolution on the floor.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FieldConditions {
    pub weather: Weather,
    pub intensity: WeatherIntensity,
    pub floor_event: FloorEvent,
}

impl FieldConditions {
    pub fn new(weather: Weather, intensity: WeatherIntensity, floor_event: FloorEvent) -> Self {
        Self {
            weather,
            intensity,
            floor_event,
        }
    }

    /// Weather multiplier for `element` after intensity scaling.
    pub fn weather_multiplier(&self, element: Element) -> f64 {
        self.intensity.scale(self.weather.raw_multiplier(element))
    }
}
