pub mod controller;
pub mod engine;

pub use controller::{ControllerEvent, ConversionController, ConvertError, ConverterState};
pub use engine::{ConversionEngine, EngineError, UnitTable};

/// Destination for the copy-to-clipboard action.
pub trait Clipboard: Send + Sync {
    fn copy(&self, text: &str) -> anyhow::Result<()>;
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
