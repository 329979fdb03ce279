//! Lattice methods for option pricing.
//!
//! # Overview
//!
//! * [`Lattice`] - triangular node storage indexed by `(step, up-moves)`
//! * [`BinomialModel`] - Cox-Ross-Rubinstein asset model with its price lattice
//! * [`snell_envelope`] - backward induction with early exercise at every node
//! * [`european_value`] - backward induction without early exercise

pub mod binomial_lattice;
pub mod binomial_model;

pub use binomial_lattice::Lattice;
pub use binomial_model::{BinomialModel, BinomialParams, MAX_STEPS};

use tracing::debug;

use crr_core::{Real, Result, Size};
use crr_math::close_enough;

// ─── Snell envelope ───────────────────────────────────────────────────────────

/// Output of [`snell_envelope`]: the time-zero value, the value at every
/// node, and where early exercise is strictly optimal.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SnellEnvelope {
    value: Real,
    values: Lattice<Real>,
    exercise: Lattice<bool>,
}

impl SnellEnvelope {
    /// Value at the root node `(0, 0)`.
    pub fn value(&self) -> Real {
        self.value
    }

    /// Option value at every node.
    pub fn values(&self) -> &Lattice<Real> {
        &self.values
    }

    /// Consume the result, keeping only the value lattice.
    pub fn into_values(self) -> Lattice<Real> {
        self.values
    }

    /// `true` if immediate exercise strictly beats continuation at `(n, i)`.
    ///
    /// Always `false` on the terminal layer, where there is nothing to
    /// continue into.
    pub fn exercised(&self, n: Size, i: Size) -> Result<bool> {
        self.exercise.get(n, i)
    }

    /// All nodes where early exercise is strictly optimal, in layer order.
    pub fn early_exercise_nodes(&self) -> Vec<(Size, Size)> {
        self.exercise
            .nodes()
            .filter(|&(n, i)| self.exercise.get(n, i).unwrap_or(false))
            .collect()
    }
}

/// Price an American-style claim by backward induction on `model`.
///
/// Terminal nodes take the payoff; every earlier node takes
/// `max(payoff(S), (p · V_up + q · V_down) / (1 + R))`.  The value lattice
/// is always allocated with the model's own step count.
///
/// `payoff` is called exactly once per node.
pub fn snell_envelope(
    model: &BinomialModel,
    payoff: &dyn Fn(Real) -> Real,
) -> Result<SnellEnvelope> {
    let n_steps = model.steps();
    let p = model.risk_neutral_probability();
    let q = 1.0 - p;
    let growth = 1.0 + model.rate();

    let mut values = Lattice::new(n_steps);
    let mut exercise = Lattice::new(n_steps);

    for i in 0..=n_steps {
        values.set(n_steps, i, payoff(model.asset_price(n_steps, i)?))?;
        exercise.set(n_steps, i, false)?;
    }

    for n in (0..n_steps).rev() {
        for i in 0..=n {
            let immediate = payoff(model.asset_price(n, i)?);
            let continuation =
                (p * values.get(n + 1, i + 1)? + q * values.get(n + 1, i)?) / growth;
            values.set(n, i, immediate.max(continuation))?;
            exercise.set(
                n,
                i,
                immediate > continuation && !close_enough(immediate, continuation, 100),
            )?;
        }
    }

    let value = values.get(0, 0)?;
    let envelope = SnellEnvelope {
        value,
        values,
        exercise,
    };
    debug!(
        steps = n_steps,
        value,
        early_exercise_nodes = envelope.early_exercise_nodes().len(),
        "priced american claim"
    );
    Ok(envelope)
}

// ─── European counterpart ─────────────────────────────────────────────────────

/// Value a European-style claim (exercise at expiry only) on `model`.
///
/// Same recursion as [`snell_envelope`] without the early-exercise max, so
/// it is a lower bound for the American value.
#[allow(clippy::needless_range_loop)]
pub fn european_value(model: &BinomialModel, payoff: &dyn Fn(Real) -> Real) -> Result<Real> {
    let n_steps = model.steps();
    let p = model.risk_neutral_probability();
    let q = 1.0 - p;
    let discount = 1.0 / (1.0 + model.rate());

    let mut values: Vec<Real> = (0..=n_steps)
        .map(|i| model.asset_price(n_steps, i).map(payoff))
        .collect::<Result<_>>()?;

    // Layer n overwrites slots 0..=n in place; slot i + 1 is read before
    // it is overwritten.
    for n in (0..n_steps).rev() {
        for i in 0..=n {
            values[i] = discount * (p * values[i + 1] + q * values[i]);
        }
    }

    Ok(values[0])
}

// ─── Tests ────────────────────────────────────────────────────────────────────
