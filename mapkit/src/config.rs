//! Configuration of the map controls.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::control::{
    CompassConfig, CompassControl, ContinuousZoomConfig, MapControls, ZoomControl,
};
use crate::error::MapkitError;

/// Corner of the map the controls are shown in.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum ControlsPosition {
    /// Top left corner.
    TopLeft,
    /// Top right corner.
    TopRight,
    /// Bottom left corner.
    BottomLeft,
    /// Bottom right corner.
    #[default]
    BottomRight,
}

impl ControlsPosition {
    /// All positions.
    pub const ALL: [ControlsPosition; 4] = [
        ControlsPosition::TopLeft,
        ControlsPosition::TopRight,
        ControlsPosition::BottomLeft,
        ControlsPosition::BottomRight,
    ];

    /// Name of the position, e.g. `top-left`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ControlsPosition::TopLeft => "top-left",
            ControlsPosition::TopRight => "top-right",
            ControlsPosition::BottomLeft => "bottom-left",
            ControlsPosition::BottomRight => "bottom-right",
        }
    }

    /// Whether the controls are at the top edge of the map.
    pub fn is_top(&self) -> bool {
        matches!(self, ControlsPosition::TopLeft | ControlsPosition::TopRight)
    }

    /// Whether the controls are at the left edge of the map.
    pub fn is_left(&self) -> bool {
        matches!(self, ControlsPosition::TopLeft | ControlsPosition::BottomLeft)
    }
}

impl Display for ControlsPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ControlsPosition {
    type Err = MapkitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|position| position.as_str() == s)
            .ok_or_else(|| MapkitError::UnknownPosition(s.to_string()))
    }
}

/// Configuration of the full set of map controls.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControlsConfig {
    position: ControlsPosition,
    zoom: ContinuousZoomConfig,
    compass: CompassConfig,
    show_compass: bool,
}

impl Default for ControlsConfig {
    fn default() -> Self {
        Self {
            position: ControlsPosition::default(),
            zoom: ContinuousZoomConfig::default(),
            compass: CompassConfig::default(),
            show_compass: true,
        }
    }
}

impl ControlsConfig {
    /// Parses and validates configuration from a JSON string. Missing fields get default values.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, MapkitError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that all parts of the configuration are valid.
    pub fn validate(&self) -> Result<(), MapkitError> {
        self.zoom.validate().inspect_err(|err| {
            log::warn!("Invalid zoom configuration: {err}");
        })?;
        self.compass.validate().inspect_err(|err| {
            log::warn!("Invalid compass configuration: {err}");
        })
    }

    /// Creates controls with this configuration.
    pub fn build_controls(&self) -> Result<MapControls, MapkitError> {
        Ok(MapControls::new(
            ZoomControl::new(self.zoom)?,
            CompassControl::new(self.compass)?,
        ))
    }

    /// Corner the controls are shown in.
    pub fn position(&self) -> ControlsPosition {
        self.position
    }

    /// Sets the corner the controls are shown in.
    pub fn with_position(mut self, position: ControlsPosition) -> Self {
        self.position = position;
        self
    }

    /// Sets the corner the controls are shown in.
    pub fn set_position(&mut self, position: ControlsPosition) {
        self.position = position;
    }

    /// Configuration of the zoom buttons.
    pub fn zoom(&self) -> ContinuousZoomConfig {
        self.zoom
    }

    /// Sets configuration of the zoom buttons.
    pub fn with_zoom(mut self, zoom: ContinuousZoomConfig) -> Self {
        self.zoom = zoom;
        self
    }

    /// Configuration of the compass.
    pub fn compass(&self) -> CompassConfig {
        self.compass
    }

    /// Sets configuration of the compass.
    pub fn with_compass(mut self, compass: CompassConfig) -> Self {
        self.compass = compass;
        self
    }

    /// Whether the compass is shown next to the zoom buttons.
    pub fn show_compass(&self) -> bool {
        self.show_compass
    }

    /// Sets whether the compass is shown next to the zoom buttons.
    pub fn with_show_compass(mut self, show: bool) -> Self {
        self.show_compass = show;
        self
    }
}

/// Serializes durations as a whole number of milliseconds.
#[cfg(feature = "serde")]
pub(crate) mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_millis().min(u64::MAX as u128) as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_millis)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn position_names() {
        for position in ControlsPosition::ALL {
            assert_eq!(position.as_str().parse::<ControlsPosition>().unwrap(), position);
        }

        assert_eq!(ControlsPosition::default(), ControlsPosition::BottomRight);
        assert!(ControlsPosition::TopLeft.is_top());
        assert!(ControlsPosition::TopLeft.is_left());
        assert!(!ControlsPosition::BottomRight.is_top());
        assert!(!ControlsPosition::TopRight.is_left());
        assert_matches!(
            "middle".parse::<ControlsPosition>(),
            Err(MapkitError::UnknownPosition(name)) if name == "middle"
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn default_config_json() {
        let json = serde_json::to_string_pretty(&ControlsConfig::default()).unwrap();
        insta::assert_snapshot!(json, @r#"
        {
          "position": "bottom-right",
          "zoom": {
            "step": 0.5,
            "interval_ms": 100
          },
          "compass": {
            "rotation_step": 0.39269908169872414
          },
          "show_compass": true
        }
        "#);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_config_from_json() {
        let config = ControlsConfig::from_json(
            r#"{ "position": "top-left", "zoom": { "interval_ms": 250 } }"#,
        )
        .unwrap();

        assert_eq!(config.position(), ControlsPosition::TopLeft);
        assert_eq!(config.zoom().interval(), Duration::from_millis(250));
        assert_eq!(config.zoom().step(), 0.5);
        assert!(config.show_compass());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn invalid_config_from_json() {
        assert_matches!(
            ControlsConfig::from_json(r#"{ "zoom": { "step": -1.0 } }"#),
            Err(MapkitError::InvalidStep(_))
        );
        assert_matches!(
            ControlsConfig::from_json(r#"{ "zoom": { "interval_ms": 0 } }"#),
            Err(MapkitError::InvalidInterval)
        );
        assert_matches!(
            ControlsConfig::from_json(r#"{ "position": "center" }"#),
            Err(MapkitError::Config(_))
        );
    }

    #[test]
    fn build_controls_from_config() {
        let config = ControlsConfig::default()
            .with_zoom(ContinuousZoomConfig::default().with_step(1.0))
            .with_show_compass(false);
        let controls = config.build_controls().unwrap();

        assert_eq!(controls.zoom().config().step(), 1.0);
        assert!(!config.show_compass());

        let invalid = config.with_zoom(ContinuousZoomConfig::default().with_step(0.0));
        assert!(invalid.build_controls().is_err());
    }
}
