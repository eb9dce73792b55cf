//! Signal slots and render hints of an actor class.

use hearth_core::{Actor, Color, Param, ParamType};
use serde::Deserialize;

/// One named input or output event slot.
///
/// ```toml
/// [outputs.opened]
/// description = "Fires when the door finishes opening"
/// type = "none"
/// ```
///
/// A missing `type` means a bare event.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SignalDefinition {
    /// Editor description
    #[serde(default)]
    pub description: String,
    /// Type of the payload carried by the signal (`none` for bare events)
    #[serde(
        rename = "type",
        default = "bare_event",
        deserialize_with = "crate::fields::param_type"
    )]
    pub value_type: ParamType,
}

const fn bare_event() -> ParamType {
    ParamType::None
}

impl SignalDefinition {
    /// Returns true if `param` can travel on this signal.
    ///
    /// An empty payload is always allowed.
    #[must_use]
    pub fn accepts(&self, param: &Param) -> bool {
        param.param_type() == ParamType::None || param.param_type() == self.value_type
    }
}

/// How editors and previews draw an actor, from the `[display]` table.
///
/// The `*_param` fields name an actor param that overrides the fixed value
/// per instance.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct RenderDefinition {
    /// Model asset path
    pub model: String,
    /// Texture asset path
    pub texture: String,
    /// Tint color
    #[serde(deserialize_with = "crate::fields::color")]
    pub color: Color,
    /// Param holding a per-instance model
    pub model_param: String,
    /// Param holding a per-instance tint
    pub color_param: String,
    /// Param holding a per-instance texture
    pub texture_param: String,
    /// Whether the actor has a facing direction
    pub directional: bool,
}

impl Default for RenderDefinition {
    fn default() -> Self {
        Self {
            model: String::new(),
            texture: String::new(),
            color: Color::WHITE,
            model_param: String::new(),
            color_param: String::new(),
            texture_param: String::new(),
            directional: false,
        }
    }
}

fn override_str<'a>(actor: &'a Actor, param: &str, fallback: &'a str) -> &'a str {
    if param.is_empty() {
        return fallback;
    }
    actor
        .param(param)
        .and_then(Param::as_str)
        .unwrap_or(fallback)
}

impl RenderDefinition {
    /// Model for `actor`, honouring `model_param`.
    #[must_use]
    pub fn model_for<'a>(&'a self, actor: &'a Actor) -> &'a str {
        override_str(actor, &self.model_param, &self.model)
    }

    /// Tint for `actor`, honouring `color_param`.
    #[must_use]
    pub fn color_for(&self, actor: &Actor) -> Color {
        if self.color_param.is_empty() {
            return self.color;
        }
        actor
            .param(&self.color_param)
            .map_or(self.color, |param| param.get(self.color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_types() {
        let bare: SignalDefinition = toml::from_str("").unwrap();
        assert_eq!(bare.value_type, ParamType::None);
        assert!(bare.accepts(&Param::None));
        assert!(!bare.accepts(&Param::Int(1)));

        let amount: SignalDefinition =
            toml::from_str("type = \"int\"\ndescription = \"Amount\"").unwrap();
        assert_eq!(amount.description, "Amount");
        assert!(amount.accepts(&Param::Int(3)));
        assert!(amount.accepts(&Param::None));
        assert!(!amount.accepts(&Param::Float(3.0)));

        assert!(toml::from_str::<SignalDefinition>("type = \"vector\"").is_err());
    }

    #[test]
    fn test_display_overrides() {
        let display: RenderDefinition = toml::from_str(
            r##"
model = "models/lamp.obj"
color = "#ffcc00"
model_param = "mesh"
color_param = "tint"
directional = true
"##,
        )
        .unwrap();
        assert!(display.directional);
        assert_eq!(display.texture, "");

        let mut actor = Actor::new("lamp", "lamp_1");
        assert_eq!(display.model_for(&actor), "models/lamp.obj");
        assert_eq!(display.color_for(&actor), display.color);

        actor.set_param("mesh", "models/broken_lamp.obj");
        actor.set_param("tint", Color::BLACK);
        assert_eq!(display.model_for(&actor), "models/broken_lamp.obj");
        assert_eq!(display.color_for(&actor), Color::BLACK);

        // wrong type falls back to the fixed tint
        actor.set_param("tint", 5i32);
        assert_eq!(display.color_for(&actor), display.color);

        let plain = toml::from_str::<RenderDefinition>("").unwrap();
        assert_eq!(plain, RenderDefinition::default());
        assert!(toml::from_str::<RenderDefinition>("color = \"teal\"").is_err());
    }
}
