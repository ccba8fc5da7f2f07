use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::UnknownUnit, format::format_decimal};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LengthUnit {
    Meters,
    Feet,
    Inches,
    Centimeters,
}

impl LengthUnit {
    /// Every supported unit, in the order the unit pickers list them.
    pub const ALL: [LengthUnit; 4] = [
        LengthUnit::Meters,
        LengthUnit::Feet,
        LengthUnit::Inches,
        LengthUnit::Centimeters,
    ];

    pub fn name(self) -> &'static str {
        match self {
            LengthUnit::Meters => "Meters",
            LengthUnit::Feet => "Feet",
            LengthUnit::Inches => "Inches",
            LengthUnit::Centimeters => "Centimeters",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LengthUnit {
    type Err = UnknownUnit;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        LengthUnit::ALL
            .into_iter()
            .find(|unit| unit.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownUnit(trimmed.to_string()))
    }
}

/// The single persisted entity: one completed conversion.
///
/// Serialized field order is `inputValue`, `fromUnit`, `convertedValue`,
/// `toUnit`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionRecord {
    pub input_value: f64,
    pub from_unit: LengthUnit,
    pub converted_value: f64,
    pub to_unit: LengthUnit,
}

impl ConversionRecord {
    pub fn new(
        input_value: f64,
        from_unit: LengthUnit,
        converted_value: f64,
        to_unit: LengthUnit,
    ) -> Self {
        Self {
            input_value,
            from_unit,
            converted_value,
            to_unit,
        }
    }

    /// History line, e.g. `1.0 Meters = 3.28 Feet`.
    pub fn formatted(&self) -> String {
        format!(
            "{} {} = {} {}",
            display_input(self.input_value),
            self.from_unit,
            format_decimal(self.converted_value),
            self.to_unit
        )
    }
}

impl fmt::Display for ConversionRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.formatted())
    }
}

// Entered values are shown unrounded; integral ones keep a single decimal.
fn display_input(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 1e16 {
        format!("{value:.1}")
    } else {
        format!("{value}")
    }
}
