use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Wire color used when the record does not carry one.
pub const DEFAULT_WIRE_COLOR: &str = "#000";
/// Wire thickness used when the record does not carry one.
pub const DEFAULT_WIRE_THICKNESS: f64 = 2.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Schematic {
    pub components: Vec<Component>,
    pub wires: Vec<Wire>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    #[serde(deserialize_with = "required_id")]
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    pub x: f64,
    pub y: f64,
    #[serde(default)]
    pub rotation: Rotation,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub label: Label,
}

impl Component {
    pub fn position(&self) -> Position {
        Position { x: self.x, y: self.y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Component type. Each variant carries its body size and drawing data as
/// static properties instead of being compared by name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ComponentKind {
    Resistor,
    VoltageSource,
    CurrentSource,
    /// Any type the converter has no dedicated symbol for. Keeps the raw name.
    Generic(String),
}

impl ComponentKind {
    /// Body half-extent in drawing units (one drawing unit is one grid unit
    /// of the editor).
    pub fn half_extent(&self) -> f64 {
        match self {
            ComponentKind::Resistor => 0.65,
            _ => 0.5,
        }
    }

    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "resistor" => ComponentKind::Resistor,
            "voltage" | "vsource" | "voltage-source" => ComponentKind::VoltageSource,
            "current" | "isource" | "current-source" => ComponentKind::CurrentSource,
            _ => ComponentKind::Generic(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            ComponentKind::Resistor => "resistor",
            ComponentKind::VoltageSource => "voltage",
            ComponentKind::CurrentSource => "current",
            ComponentKind::Generic(name) => name,
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl Serialize for ComponentKind {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

impl<'de> Deserialize<'de> for ComponentKind {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(ComponentKind::from_name(&name))
    }
}

/// Rotation in quarter turns. The editor only produces right angles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Reduce an angle in degrees to a right-angle rotation. Negative angles
    /// wrap around; anything that is not a multiple of 90 is rejected.
    pub fn from_degrees(degrees: f64) -> Option<Self> {
        if !degrees.is_finite() {
            return None;
        }
        let reduced = degrees.rem_euclid(360.0);
        if reduced == 0.0 {
            Some(Rotation::Deg0)
        } else if reduced == 90.0 {
            Some(Rotation::Deg90)
        } else if reduced == 180.0 {
            Some(Rotation::Deg180)
        } else if reduced == 270.0 {
            Some(Rotation::Deg270)
        } else {
            None
        }
    }

    pub fn degrees(&self) -> u16 {
        match self {
            Rotation::Deg0 => 0,
            Rotation::Deg90 => 90,
            Rotation::Deg180 => 180,
            Rotation::Deg270 => 270,
        }
    }

    /// True when the body lies along its unrotated axis (0 or 180 degrees).
    pub fn is_upright(&self) -> bool {
        self.degrees() % 180 == 0
    }

    /// Half turn or more: sources drawn with inverted polarity.
    pub fn is_flipped(&self) -> bool {
        matches!(self, Rotation::Deg180 | Rotation::Deg270)
    }
}

impl Serialize for Rotation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u16(self.degrees())
    }
}

impl<'de> Deserialize<'de> for Rotation {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let degrees = f64::deserialize(deserializer)?;
        Rotation::from_degrees(degrees).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "invalid rotation {}: expected a multiple of 90 degrees",
                degrees
            ))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Label {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub pos: LabelPosition,
    #[serde(default, rename = "offsetX")]
    pub offset_x: f64,
    #[serde(default, rename = "offsetY")]
    pub offset_y: f64,
}

impl Label {
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelPosition {
    #[default]
    Above,
    Below,
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wire {
    #[serde(default, deserialize_with = "id_from_str_or_number")]
    pub id: String,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    #[serde(default = "default_wire_color")]
    pub color: String,
    #[serde(default = "default_wire_thickness")]
    pub thickness: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// `x1 == x2`. Zero-length wires fall here too.
    Vertical,
    /// `y1 == y2`.
    Horizontal,
    Diagonal,
}

impl Wire {
    pub fn new(id: impl Into<String>, x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            id: id.into(),
            x1,
            y1,
            x2,
            y2,
            color: default_wire_color(),
            thickness: default_wire_thickness(),
        }
    }

    /// Same styling as `self`, new id and endpoints.
    pub fn derive(&self, id: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            id: id.into(),
            x1: start.x,
            y1: start.y,
            x2: end.x,
            y2: end.y,
            color: self.color.clone(),
            thickness: self.thickness,
        }
    }

    pub fn start(&self) -> Position {
        Position::new(self.x1, self.y1)
    }

    pub fn end(&self) -> Position {
        Position::new(self.x2, self.y2)
    }

    pub fn orientation(&self) -> Orientation {
        if self.x1 == self.x2 {
            Orientation::Vertical
        } else if self.y1 == self.y2 {
            Orientation::Horizontal
        } else {
            Orientation::Diagonal
        }
    }

    /// Endpoints equal, in either direction.
    pub fn same_span(&self, other: &Wire) -> bool {
        (self.start() == other.start() && self.end() == other.end())
            || (self.start() == other.end() && self.end() == other.start())
    }
}

fn default_wire_color() -> String {
    DEFAULT_WIRE_COLOR.to_string()
}

fn default_wire_thickness() -> f64 {
    DEFAULT_WIRE_THICKNESS
}

/// The editor stores ids in DOM data attributes (strings) but hand-written
/// records often use numbers.
/// A `null` id is left empty for the parser to fill in.
fn id_from_str_or_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::Null => Ok(String::new()),
        other => id_from_value(other),
    }
}

/// Component ids have no fallback, so `null` is an error.
fn required_id<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    id_from_value(serde_json::Value::deserialize(deserializer)?)
}

fn id_from_value<E: serde::de::Error>(value: serde_json::Value) -> Result<String, E> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(E::custom(format!(
            "invalid id {}: expected a string or a number",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_reduces_modulo_360() {
        assert_eq!(Rotation::from_degrees(0.0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(450.0), Some(Rotation::Deg90));
        assert_eq!(Rotation::from_degrees(-90.0), Some(Rotation::Deg270));
        assert_eq!(Rotation::from_degrees(720.0), Some(Rotation::Deg0));
        assert_eq!(Rotation::from_degrees(45.0), None);
        assert_eq!(Rotation::from_degrees(f64::NAN), None);
    }

    #[test]
    fn test_rotation_axes() {
        assert!(Rotation::Deg0.is_upright());
        assert!(Rotation::Deg180.is_upright());
        assert!(!Rotation::Deg90.is_upright());
        assert!(Rotation::Deg270.is_flipped());
        assert!(!Rotation::Deg90.is_flipped());
    }

    #[test]
    fn test_component_kind_names() {
        assert_eq!(ComponentKind::from_name("resistor"), ComponentKind::Resistor);
        assert_eq!(ComponentKind::from_name("Voltage"), ComponentKind::VoltageSource);
        assert_eq!(ComponentKind::from_name("isource"), ComponentKind::CurrentSource);
        assert_eq!(
            ComponentKind::from_name("capacitor"),
            ComponentKind::Generic("capacitor".to_string())
        );
        assert_eq!(ComponentKind::Resistor.half_extent(), 0.65);
        assert_eq!(ComponentKind::Generic("x".into()).half_extent(), 0.5);
    }

    #[test]
    fn test_wire_orientation() {
        assert_eq!(Wire::new("a", 0.0, 0.0, 0.0, 10.0).orientation(), Orientation::Vertical);
        assert_eq!(Wire::new("b", 0.0, 5.0, 10.0, 5.0).orientation(), Orientation::Horizontal);
        assert_eq!(Wire::new("c", 0.0, 0.0, 10.0, 10.0).orientation(), Orientation::Diagonal);
        assert_eq!(Wire::new("d", 3.0, 3.0, 3.0, 3.0).orientation(), Orientation::Vertical);
    }

    #[test]
    fn test_deserialize_component_without_label() {
        let json = r##"{"id": 7, "type": "voltage", "x": 40, "y": 80, "rotation": 180, "color": "#eef"}"##;
        let c: Component = serde_json::from_str(json).unwrap();
        assert_eq!(c.id, "7");
        assert_eq!(c.kind, ComponentKind::VoltageSource);
        assert_eq!(c.rotation, Rotation::Deg180);
        assert!(c.label.is_empty());
        assert_eq!(c.label.pos, LabelPosition::Above);
    }

    #[test]
    fn test_component_id_is_required() {
        let json = r#"{"id": null, "type": "resistor", "x": 0, "y": 0}"#;
        let err = serde_json::from_str::<Component>(json).unwrap_err();
        assert!(err.to_string().contains("invalid id"));

        let json = r#"{"type": "resistor", "x": 0, "y": 0}"#;
        assert!(serde_json::from_str::<Component>(json).is_err());
    }

    #[test]
    fn test_null_wire_id_left_empty() {
        let json = r#"{"id": null, "x1": 0, "y1": 0, "x2": 40, "y2": 0}"#;
        let w: Wire = serde_json::from_str(json).unwrap();
        assert_eq!(w.id, "");
    }

    #[test]
    fn test_deserialize_wire_defaults() {
        let json = r#"{"x1": 0, "y1": 0, "x2": 0, "y2": 40}"#;
        let w: Wire = serde_json::from_str(json).unwrap();
        assert_eq!(w.id, "");
        assert_eq!(w.color, DEFAULT_WIRE_COLOR);
        assert_eq!(w.thickness, DEFAULT_WIRE_THICKNESS);
    }

    #[test]
    fn test_same_span_either_direction() {
        let a = Wire::new("a", 0.0, 0.0, 40.0, 0.0);
        let b = Wire::new("b", 40.0, 0.0, 0.0, 0.0);
        assert!(a.same_span(&b));
        assert!(!a.same_span(&Wire::new("c", 0.0, 0.0, 80.0, 0.0)));
    }
}
