use shared::domain::LengthUnit;
use thiserror::Error;

/// Meters per unit for the standard length table.
const STANDARD_RATES: [(LengthUnit, f64); 4] = [
    (LengthUnit::Meters, 1.0),
    (LengthUnit::Feet, 0.3048),
    (LengthUnit::Inches, 0.0254),
    (LengthUnit::Centimeters, 0.01),
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error("unit {0} is not in the unit table")]
    InvalidUnit(LengthUnit),
    #[error("rate for {unit} must be finite and positive, got {rate}")]
    InvalidRate { unit: LengthUnit, rate: f64 },
    #[error("converting {value} {from} to {to} does not produce a finite value")]
    NonFiniteResult {
        value: f64,
        from: LengthUnit,
        to: LengthUnit,
    },
}

/// Immutable unit -> meters-per-unit table.
#[derive(Debug, Clone, PartialEq)]
pub struct UnitTable {
    rates: Vec<(LengthUnit, f64)>,
}

impl UnitTable {
    /// Later entries for the same unit replace earlier ones; table order
    /// follows first appearance.
    pub fn new(rates: impl IntoIterator<Item = (LengthUnit, f64)>) -> Result<Self, EngineError> {
        let mut table: Vec<(LengthUnit, f64)> = Vec::new();
        for (unit, rate) in rates {
            if !rate.is_finite() || rate <= 0.0 {
                return Err(EngineError::InvalidRate { unit, rate });
            }
            match table.iter_mut().find(|(existing, _)| *existing == unit) {
                Some(entry) => entry.1 = rate,
                None => table.push((unit, rate)),
            }
        }
        Ok(Self { rates: table })
    }

    pub fn rate(&self, unit: LengthUnit) -> Option<f64> {
        self.rates
            .iter()
            .find(|(candidate, _)| *candidate == unit)
            .map(|(_, rate)| *rate)
    }

    pub fn units(&self) -> Vec<LengthUnit> {
        self.rates.iter().map(|(unit, _)| *unit).collect()
    }
}

impl Default for UnitTable {
    fn default() -> Self {
        Self {
            rates: STANDARD_RATES.to_vec(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversionEngine {
    table: UnitTable,
}

impl ConversionEngine {
    pub fn new(table: UnitTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &UnitTable {
        &self.table
    }

    /// `value * rate(from) / rate(to)`.
    pub fn convert(&self, value: f64, from: LengthUnit, to: LengthUnit) -> Result<f64, EngineError> {
        let from_rate = self
            .table
            .rate(from)
            .ok_or(EngineError::InvalidUnit(from))?;
        let to_rate = self.table.rate(to).ok_or(EngineError::InvalidUnit(to))?;

        let converted = value * from_rate / to_rate;
        if !converted.is_finite() {
            return Err(EngineError::NonFiniteResult { value, from, to });
        }
        Ok(converted)
    }
}
