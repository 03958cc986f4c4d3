//! Reusable model fixtures.
//!
//! - [`DoubleIndexModel`]: writes twice the phase-level element index.
//! - [`ConstantModel`]: writes one value everywhere, reads nothing.
//! - [`CountingModel`]: writes how many times it has been evaluated.
//! - [`FailingModel`]: fails deterministically after N calls.
//! - [`ScaleModel`]: scales a phase property by a `factor` parameter.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use porenet_core::{Array, ModelError};
use porenet_model::{Model, ModelContext};

/// `value[i] = 2 * index[i]` over the bound subset.
///
/// Handy for checking which elements a model actually saw.
#[derive(Clone, Copy, Debug, Default)]
pub struct DoubleIndexModel;

impl Model for DoubleIndexModel {
    fn name(&self) -> &str {
        "double_index"
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        Ok(Array::Float(
            ctx.elements().iter().map(|&i| 2.0 * i as f64).collect(),
        ))
    }
}

/// Writes a constant to every bound element.
#[derive(Clone, Debug)]
pub struct ConstantModel {
    pub value: f64,
}

impl ConstantModel {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

impl Model for ConstantModel {
    fn name(&self) -> &str {
        "constant"
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        Ok(Array::Float(vec![self.value; ctx.elements().len()]))
    }
}

/// Writes its own call index (starting at 1) to every bound element.
///
/// The counter is shared, so a clone kept by the test observes calls
/// made through the copy handed to the session.
#[derive(Clone, Debug, Default)]
pub struct CountingModel {
    calls: Arc<AtomicUsize>,
}

impl CountingModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times `evaluate()` has been called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::Relaxed)
    }
}

impl Model for CountingModel {
    fn name(&self) -> &str {
        "counting"
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        let n = self.calls.fetch_add(1, Ordering::Relaxed) + 1;
        Ok(Array::Float(vec![n as f64; ctx.elements().len()]))
    }
}

/// Succeeds `succeed_count` times, then fails every call.
///
/// Successful calls write the call index for traceability.
#[derive(Debug)]
pub struct FailingModel {
    pub succeed_count: usize,
    call_count: AtomicUsize,
}

impl FailingModel {
    pub fn new(succeed_count: usize) -> Self {
        Self {
            succeed_count,
            call_count: AtomicUsize::new(0),
        }
    }

    /// How many times `evaluate()` has been called.
    pub fn calls(&self) -> usize {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Model for FailingModel {
    fn name(&self) -> &str {
        "failing"
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        let n = self.call_count.fetch_add(1, Ordering::Relaxed);
        if n >= self.succeed_count {
            return Err(ModelError::ExecutionFailed {
                reason: format!(
                    "deliberate failure after {} successful calls",
                    self.succeed_count
                ),
            });
        }
        Ok(Array::Float(vec![n as f64; ctx.elements().len()]))
    }
}

/// `value = factor * phase[source]` over the bound subset.
///
/// Parameters: `source` (text, a phase property key) and `factor`
/// (float, defaults to 1).
#[derive(Clone, Copy, Debug, Default)]
pub struct ScaleModel;

impl Model for ScaleModel {
    fn name(&self) -> &str {
        "scale"
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        let params = ctx.params();
        let source = params.text("source")?;
        let factor = params.float_or("factor", 1.0)?;
        let values = ctx.phase_values(source)?.to_f64_vec();
        Ok(Array::Float(values.into_iter().map(|v| v * factor).collect()))
    }
}
