//! Per-archetype body configuration records and their presets.
//!
//! A [`BodySetting`] is plain data: every behavioral difference between a
//! rocky moon and an ocean world is expressed through these numbers and the
//! biome table, never through dispatch on the archetype.

use std::fmt;
use std::str::FromStr;

use orrery_mesh::Rgba;

use crate::biome::BiomeTable;

/// Errors for body configurations that cannot produce a valid body.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingError {
    /// Diameter is zero, negative, or not finite.
    #[error("diameter must be positive and finite, got {0}")]
    InvalidDiameter(f64),

    /// `max_height` does not exceed `min_height`.
    #[error("height range is empty: min {min} >= max {max}")]
    InvertedHeightRange { min: f64, max: f64 },

    /// Island size range has `max < min`, or a non-positive lower bound.
    #[error("island size range [{min}, {max}] is inverted or non-positive")]
    InvalidIslandSize { min: f64, max: f64 },

    /// Island count range has `max < min`.
    #[error("island count range [{min}, {max}] is inverted")]
    InvertedIslandCount { min: u32, max: u32 },

    /// Elevation or moisture level count is zero.
    #[error("{0} level count must be at least 1")]
    ZeroLevels(&'static str),

    /// A noise period is zero, negative, or not finite.
    #[error("{name} noise period must be positive, got {value}")]
    InvalidPeriod { name: &'static str, value: f64 },

    /// No archetype matches the given name.
    #[error("unknown body archetype: {0}")]
    UnknownArchetype(String),
}

/// One value per terrain octave.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Octaves {
    pub large: f64,
    pub medium: f64,
    pub small: f64,
}

impl Octaves {
    pub fn new(large: f64, medium: f64, small: f64) -> Self {
        Self {
            large,
            medium,
            small,
        }
    }

    pub fn sum(&self) -> f64 {
        self.large + self.medium + self.small
    }
}

/// An inclusive `[min, max]` range.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpanRange<T> {
    pub min: T,
    pub max: T,
}

impl<T> SpanRange<T> {
    pub fn new(min: T, max: T) -> Self {
        Self { min, max }
    }
}

/// Translucent cloud shell parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CloudSetting {
    /// RGBA color; alpha below 255 makes the shell translucent.
    pub color: Rgba,
    /// Radius at which cloud faces are drawn.
    pub shell_radius: f64,
    /// Spatial period of the coverage noise.
    pub period: f64,
    /// Faces whose coverage noise exceeds this value (in `[0, 1]`) get a cloud.
    pub cutoff: f64,
}

/// Immutable configuration for one body archetype at one diameter.
#[derive(Clone, Debug)]
pub struct BodySetting {
    /// Archetype label, for logs.
    pub kind: &'static str,
    pub diameter: f64,
    /// Number of islands, drawn uniformly from this inclusive range.
    pub island_count: SpanRange<u32>,
    /// Island influence radius, drawn uniformly from this inclusive range.
    pub island_size: SpanRange<f64>,
    pub octave_weights: Octaves,
    pub octave_periods: Octaves,
    /// Lowest terrain radius (the base sphere).
    pub min_height: f64,
    /// Highest terrain radius reachable by displacement.
    pub max_height: f64,
    pub elevation_levels: u32,
    pub moisture_levels: u32,
    pub moisture_period: f64,
    pub biomes: BiomeTable,
    /// Absent for airless bodies.
    pub clouds: Option<CloudSetting>,
}

impl BodySetting {
    /// Base sphere radius.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }

    pub fn height_range(&self) -> f64 {
        self.max_height - self.min_height
    }

    /// Shared octave amplitude, chosen so that the fully weighted noise sum
    /// lifts the base radius exactly to `max_height`.
    pub fn amplitude(&self) -> f64 {
        self.height_range() / (self.radius() * self.octave_weights.sum())
    }

    /// Check the record for values that would break generation.
    pub fn validate(&self) -> Result<(), SettingError> {
        if !(self.diameter > 0.0 && self.diameter.is_finite()) {
            return Err(SettingError::InvalidDiameter(self.diameter));
        }
        if !(self.max_height > self.min_height) {
            return Err(SettingError::InvertedHeightRange {
                min: self.min_height,
                max: self.max_height,
            });
        }
        let size = self.island_size;
        if !(size.min > 0.0 && size.max >= size.min) {
            return Err(SettingError::InvalidIslandSize {
                min: size.min,
                max: size.max,
            });
        }
        let count = self.island_count;
        if count.max < count.min {
            return Err(SettingError::InvertedIslandCount {
                min: count.min,
                max: count.max,
            });
        }
        if self.elevation_levels == 0 {
            return Err(SettingError::ZeroLevels("elevation"));
        }
        if self.moisture_levels == 0 {
            return Err(SettingError::ZeroLevels("moisture"));
        }

        let mut periods = vec![
            ("large", self.octave_periods.large),
            ("medium", self.octave_periods.medium),
            ("small", self.octave_periods.small),
            ("moisture", self.moisture_period),
        ];
        if let Some(clouds) = &self.clouds {
            periods.push(("cloud", clouds.period));
        }
        for (name, value) in periods {
            if !(value > 0.0 && value.is_finite()) {
                return Err(SettingError::InvalidPeriod { name, value });
            }
        }
        Ok(())
    }

    /// Temperate world with oceans, fourteen land biomes and a cloud shell.
    pub fn terrestrial_oceans(diameter: f64) -> Self {
        let mut biomes = BiomeTable::new("OCEAN", [63, 156, 255, 255]);
        let snow = biomes.register("SNOW", [248, 248, 248, 255]);
        let tundra = biomes.register("TUNDRA", [221, 221, 187, 255]);
        let bare = biomes.register("BARE", [187, 187, 187, 255]);
        let scorched = biomes.register("SCORCHED", [153, 153, 153, 255]);
        let taiga = biomes.register("TAIGA", [204, 212, 187, 255]);
        let shrubland = biomes.register("SHRUBLAND", [196, 204, 187, 255]);
        let temperate_desert = biomes.register("TEMPERATE DESERT", [228, 232, 202, 255]);
        let temperate_rain = biomes.register("TEMPERATE RAIN FOREST", [164, 196, 168, 255]);
        let deciduous = biomes.register("TEMPERATE DECIDUOUS FOREST", [180, 196, 169, 255]);
        let grassland = biomes.register("GRASSLAND", [196, 212, 170, 255]);
        let tropical_rain = biomes.register("TROPICAL RAIN FOREST", [156, 187, 169, 255]);
        let seasonal = biomes.register("TROPICAL SEASONAL FOREST", [169, 204, 164, 255]);
        let subtropical = biomes.register("SUBTROPICAL DESERT", [233, 221, 199, 255]);

        for (elevation, moisture, biome) in [
            (4, 6, snow),
            (4, 5, snow),
            (4, 4, snow),
            (4, 3, tundra),
            (4, 2, bare),
            (4, 1, scorched),
            (3, 6, taiga),
            (3, 5, taiga),
            (3, 4, shrubland),
            (3, 3, shrubland),
            (3, 2, temperate_desert),
            (3, 1, temperate_desert),
            (2, 6, temperate_rain),
            (2, 5, deciduous),
            (2, 4, deciduous),
            (2, 3, grassland),
            (2, 2, grassland),
            (2, 1, temperate_desert),
            (1, 6, tropical_rain),
            (1, 5, tropical_rain),
            (1, 4, seasonal),
            (1, 3, seasonal),
            (1, 2, grassland),
            (1, 1, subtropical),
        ] {
            biomes.assign(elevation, moisture, biome);
        }

        let max_height = 0.58 * diameter;
        Self {
            kind: "terrestrial oceans",
            diameter,
            island_count: SpanRange::new(7, 14),
            island_size: SpanRange::new(diameter / 5.0, diameter * 2.0 / 3.0),
            octave_weights: Octaves::new(1.0, 0.9, 0.5),
            octave_periods: Octaves::new(diameter / 5.0, diameter / 10.0, diameter / 20.0),
            min_height: 0.5 * diameter,
            max_height,
            elevation_levels: 4,
            moisture_levels: 6,
            moisture_period: diameter / 5.0,
            biomes,
            clouds: Some(CloudSetting {
                color: [255, 255, 255, 185],
                shell_radius: max_height * 0.95,
                period: diameter / 5.0,
                cutoff: 0.5,
            }),
        }
    }

    /// Dry, rust-colored world with polar ice and no clouds.
    pub fn terrestrial_iron_oxide(diameter: f64) -> Self {
        let mut biomes = BiomeTable::new("BASE TERRAIN", [168, 121, 103, 255]);
        let soot = biomes.register("SOOT", [130, 107, 70, 255]);
        let high_iron = biomes.register("HIGH IRON", [138, 94, 69, 255]);
        let medium_iron = biomes.register("MEDIUM IRON", [197, 127, 91, 255]);
        let low_iron = biomes.register("LOW IRON", [203, 145, 124, 255]);
        let ice = biomes.register("ICE", [224, 255, 255, 255]);
        let snow = biomes.register("SNOW", [255, 255, 255, 255]);

        for (elevation, moisture, biome) in [
            (3, 4, ice),
            (3, 3, snow),
            (3, 2, high_iron),
            (3, 1, medium_iron),
            (2, 4, high_iron),
            (2, 3, medium_iron),
            (2, 2, low_iron),
            (2, 1, low_iron),
            (1, 4, medium_iron),
            (1, 3, medium_iron),
            (1, 2, low_iron),
            (1, 1, soot),
        ] {
            biomes.assign(elevation, moisture, biome);
        }

        Self {
            kind: "terrestrial iron oxide",
            diameter,
            island_count: SpanRange::new(11, 18),
            island_size: SpanRange::new(diameter / 5.0, diameter * 2.0 / 3.0),
            octave_weights: Octaves::new(1.0, 0.4, 0.1),
            octave_periods: Octaves::new(diameter / 5.0, diameter / 10.0, diameter / 20.0),
            min_height: 0.5 * diameter,
            max_height: 0.56 * diameter,
            elevation_levels: 3,
            moisture_levels: 4,
            moisture_period: diameter / 5.0,
            biomes,
            clouds: None,
        }
    }

    /// Grey, cratered, airless satellite.
    pub fn classic_moon(diameter: f64) -> Self {
        let mut biomes = BiomeTable::new("GREY5", [204, 212, 187, 255]);
        let grey1 = biomes.register("GREY1", [200, 200, 200, 255]);
        let grey2 = biomes.register("GREY2", [180, 180, 180, 255]);
        let grey3 = biomes.register("GREY3", [187, 180, 160, 255]);
        let grey4 = biomes.register("GREY4", [153, 153, 153, 255]);
        biomes.assign(2, 2, grey1);
        biomes.assign(1, 2, grey2);
        biomes.assign(2, 1, grey3);
        biomes.assign(1, 1, grey4);

        Self {
            kind: "classic moon",
            diameter,
            island_count: SpanRange::new(30, 35),
            island_size: SpanRange::new(diameter / 10.0, diameter * 3.0 / 5.0),
            octave_weights: Octaves::new(1.0, 0.4, 0.3),
            octave_periods: Octaves::new(diameter / 5.0, diameter / 10.0, diameter / 20.0),
            min_height: 0.5 * diameter,
            max_height: 0.51 * diameter,
            elevation_levels: 2,
            moisture_levels: 2,
            moisture_period: diameter / 3.0,
            biomes,
            clouds: None,
        }
    }
}

/// Named body presets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    TerrestrialOceans,
    TerrestrialIronOxide,
    ClassicMoon,
}

impl Archetype {
    pub const ALL: [Archetype; 3] = [
        Archetype::TerrestrialOceans,
        Archetype::TerrestrialIronOxide,
        Archetype::ClassicMoon,
    ];

    /// Build and validate the preset at `diameter`.
    pub fn setting(self, diameter: f64) -> Result<BodySetting, SettingError> {
        let setting = match self {
            Archetype::TerrestrialOceans => BodySetting::terrestrial_oceans(diameter),
            Archetype::TerrestrialIronOxide => BodySetting::terrestrial_iron_oxide(diameter),
            Archetype::ClassicMoon => BodySetting::classic_moon(diameter),
        };
        setting.validate()?;
        Ok(setting)
    }

    fn as_str(self) -> &'static str {
        match self {
            Archetype::TerrestrialOceans => "terrestrial_oceans",
            Archetype::TerrestrialIronOxide => "terrestrial_iron_oxide",
            Archetype::ClassicMoon => "classic_moon",
        }
    }
}

impl fmt::Display for Archetype {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Archetype {
    type Err = SettingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        Archetype::ALL
            .into_iter()
            .find(|a| a.as_str() == normalized)
            .ok_or_else(|| SettingError::UnknownArchetype(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_validate() {
        for archetype in Archetype::ALL {
            for diameter in [10.0, 100.0, 375.0] {
                assert!(
                    archetype.setting(diameter).is_ok(),
                    "{archetype} at {diameter} should validate"
                );
            }
        }
    }

    #[test]
    fn test_amplitude_reaches_max_height() {
        let setting = BodySetting::terrestrial_oceans(375.0);
        let peak = setting.radius() * (1.0 + setting.amplitude() * setting.octave_weights.sum());
        assert!(
            (peak - setting.max_height).abs() < 1e-9,
            "full noise should lift the surface to max height: {peak}"
        );
    }

    #[test]
    fn test_zero_diameter_rejected() {
        assert_eq!(
            Archetype::ClassicMoon.setting(0.0).unwrap_err(),
            SettingError::InvalidDiameter(0.0)
        );
        assert!(matches!(
            Archetype::TerrestrialOceans.setting(-4.0),
            Err(SettingError::InvalidDiameter(_))
        ));
    }

    #[test]
    fn test_inverted_height_rejected() {
        let mut setting = BodySetting::classic_moon(50.0);
        setting.max_height = setting.min_height;
        assert!(matches!(
            setting.validate(),
            Err(SettingError::InvertedHeightRange { .. })
        ));
    }

    #[test]
    fn test_inverted_island_size_rejected() {
        let mut setting = BodySetting::terrestrial_iron_oxide(50.0);
        setting.island_size = SpanRange::new(20.0, 10.0);
        assert!(matches!(
            setting.validate(),
            Err(SettingError::InvalidIslandSize { .. })
        ));
    }

    #[test]
    fn test_inverted_island_count_rejected() {
        let mut setting = BodySetting::terrestrial_iron_oxide(50.0);
        setting.island_count = SpanRange::new(9, 3);
        assert_eq!(
            setting.validate(),
            Err(SettingError::InvertedIslandCount { min: 9, max: 3 })
        );
    }

    #[test]
    fn test_zero_levels_rejected() {
        let mut setting = BodySetting::classic_moon(50.0);
        setting.moisture_levels = 0;
        assert_eq!(setting.validate(), Err(SettingError::ZeroLevels("moisture")));
    }

    #[test]
    fn test_only_oceans_have_clouds() {
        assert!(BodySetting::terrestrial_oceans(100.0).clouds.is_some());
        assert!(BodySetting::terrestrial_iron_oxide(100.0).clouds.is_none());
        assert!(BodySetting::classic_moon(100.0).clouds.is_none());
    }

    #[test]
    fn test_cloud_shell_below_peaks() {
        let setting = BodySetting::terrestrial_oceans(200.0);
        let clouds = setting.clouds.unwrap();
        assert!(clouds.shell_radius > setting.min_height);
        assert!(clouds.shell_radius < setting.max_height);
    }

    #[test]
    fn test_archetype_parse() {
        assert_eq!(
            "terrestrial_oceans".parse::<Archetype>().unwrap(),
            Archetype::TerrestrialOceans
        );
        assert_eq!(
            "Classic Moon".parse::<Archetype>().unwrap(),
            Archetype::ClassicMoon
        );
        assert_eq!(
            "terrestrial-iron-oxide".parse::<Archetype>().unwrap(),
            Archetype::TerrestrialIronOxide
        );
        assert!(matches!(
            "gas_giant".parse::<Archetype>(),
            Err(SettingError::UnknownArchetype(_))
        ));
        for archetype in Archetype::ALL {
            assert_eq!(archetype.to_string().parse::<Archetype>().unwrap(), archetype);
        }
    }

    #[test]
    fn test_oceans_table_shape() {
        let setting = BodySetting::terrestrial_oceans(100.0);
        assert_eq!(setting.biomes.assignment_count(), 24);
        assert_eq!(setting.biomes.fallback().name, "OCEAN");
        assert_eq!(setting.biomes.lookup(4, 6).name, "SNOW");
        assert_eq!(setting.biomes.lookup(1, 1).name, "SUBTROPICAL DESERT");
    }
}
