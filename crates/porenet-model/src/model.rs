//! The [`Model`] trait and the closure adapter [`FnModel`].

use std::fmt;
use std::sync::Arc;

use porenet_core::{Array, ModelError};

use crate::context::ModelContext;

/// A property model: computes one array from network, phase, element
/// subset, and bound parameters.
///
/// # Contract
///
/// - The returned array must have one entry per element of the kind
///   named by the target property (`ctx.elements().len()`); the owning
///   store rejects anything else.
/// - `evaluate()` takes `&self`. Models that keep internal state (e.g.
///   counters) must use interior mutability.
///
/// # Examples
///
/// ```
/// use porenet_core::{Array, ModelError};
/// use porenet_model::{Model, ModelContext};
///
/// struct Constant(f64);
///
/// impl Model for Constant {
///     fn name(&self) -> &str { "constant" }
///
///     fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
///         Ok(Array::Float(vec![self.0; ctx.elements().len()]))
///     }
/// }
///
/// assert_eq!(Constant(1.0).name(), "constant");
/// ```
pub trait Model: Send + Sync + 'static {
    /// Human-readable name for logging and error reporting.
    fn name(&self) -> &str;

    /// Compute the property array.
    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError>;
}

impl<M: Model + ?Sized> Model for Arc<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        (**self).evaluate(ctx)
    }
}

impl<M: Model + ?Sized> Model for Box<M> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        (**self).evaluate(ctx)
    }
}

/// A [`Model`] backed by a closure. Build one with [`model_fn`].
pub struct FnModel<F> {
    name: String,
    f: F,
}

impl<F> fmt::Debug for FnModel<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnModel").field("name", &self.name).finish()
    }
}

impl<F> Model for FnModel<F>
where
    F: Fn(&ModelContext<'_>) -> Result<Array, ModelError> + Send + Sync + 'static,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, ctx: &ModelContext<'_>) -> Result<Array, ModelError> {
        (self.f)(ctx)
    }
}

/// Wrap a closure as a named [`Model`].
///
/// ```
/// use porenet_core::Array;
/// use porenet_model::{model_fn, Model};
///
/// let double = model_fn("double", |ctx| {
///     Ok(Array::Int(ctx.pores().iter().map(|&p| 2 * p as i64).collect()))
/// });
/// assert_eq!(double.name(), "double");
/// ```
pub fn model_fn<F>(name: impl Into<String>, f: F) -> FnModel<F>
where
    F: Fn(&ModelContext<'_>) -> Result<Array, ModelError> + Send + Sync + 'static,
{
    FnModel {
        name: name.into(),
        f,
    }
}
