//! CircuiTikZ `to[...]` option strings for components.

use std::fmt;

use crate::parser::schema::{Component, ComponentKind, LabelPosition};

/// CircuiTikZ bipole drawn for a component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    VoltageSource,
    CurrentSource,
    /// Box symbol rather than the American zig-zag.
    Resistor,
    Generic,
}

impl Primitive {
    pub fn for_kind(kind: &ComponentKind) -> Self {
        match kind {
            ComponentKind::VoltageSource => Primitive::VoltageSource,
            ComponentKind::CurrentSource => Primitive::CurrentSource,
            ComponentKind::Resistor => Primitive::Resistor,
            ComponentKind::Generic(_) => Primitive::Generic,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Primitive::VoltageSource => "vsource",
            Primitive::CurrentSource => "isource",
            Primitive::Resistor => "resistor, european",
            Primitive::Generic => "generic",
        }
    }

    /// Unit appended to label values. Generic parts have none.
    pub fn unit(&self) -> Option<Unit> {
        match self {
            Primitive::VoltageSource => Some(Unit::Volt),
            Primitive::CurrentSource => Some(Unit::Ampere),
            Primitive::Resistor => Some(Unit::Ohm),
            Primitive::Generic => None,
        }
    }

    pub fn has_polarity(&self) -> bool {
        matches!(self, Primitive::VoltageSource | Primitive::CurrentSource)
    }
}

/// siunitx unit macro.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Unit {
    Volt,
    Ampere,
    Ohm,
}

impl Unit {
    pub fn macro_name(&self) -> &'static str {
        match self {
            Unit::Volt => "\\volt",
            Unit::Ampere => "\\ampere",
            Unit::Ohm => "\\ohm",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelSide {
    Above,
    Below,
}

impl From<LabelPosition> for LabelSide {
    fn from(pos: LabelPosition) -> Self {
        match pos {
            LabelPosition::Above | LabelPosition::Left => LabelSide::Above,
            LabelPosition::Below | LabelPosition::Right => LabelSide::Below,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelClause {
    pub side: LabelSide,
    pub text: String,
    pub unit: Option<Unit>,
}

impl fmt::Display for LabelClause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self.side {
            LabelSide::Above => "l^=",
            LabelSide::Below => "l_=",
        };
        write!(f, "{}{}", key, self.text)?;
        if let Some(unit) = self.unit {
            write!(f, "<{}>", unit.macro_name())?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ComponentStyle {
    pub primitive: Primitive,
    pub invert: bool,
    pub label: Option<LabelClause>,
}

impl ComponentStyle {
    pub fn for_component(component: &Component) -> Self {
        let primitive = Primitive::for_kind(&component.kind);
        let label = (!component.label.is_empty()).then(|| LabelClause {
            side: component.label.pos.into(),
            text: component.label.text.clone(),
            unit: primitive.unit(),
        });

        Self {
            primitive,
            invert: primitive.has_polarity() && component.rotation.is_flipped(),
            label,
        }
    }
}

impl fmt::Display for ComponentStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.primitive.name())?;
        if self.invert {
            f.write_str(", invert")?;
        }
        if let Some(label) = &self.label {
            write!(f, ", {}", label)?;
        }
        Ok(())
    }
}
