//! American option on a single underlying.
//!
//! The holder may exercise at any node of the lattice.  The fair value is
//! the Snell envelope of the payoff: at each node, the larger of immediate
//! exercise and the discounted risk-neutral continuation value.

use tracing::info;

use crr_core::{Real, Result, Size};
use crr_methods::{european_value, snell_envelope, BinomialModel, Lattice, SnellEnvelope};

use crate::payoff::{Payoff, PlainVanillaPayoff};

/// An American option defined by its payoff.
#[derive(Debug, Clone)]
pub struct AmericanOption<P> {
    payoff: P,
}

impl AmericanOption<PlainVanillaPayoff> {
    /// American call struck at `strike`.
    pub fn call(strike: Real) -> Self {
        Self::new(PlainVanillaPayoff::call(strike))
    }

    /// American put struck at `strike`.
    pub fn put(strike: Real) -> Self {
        Self::new(PlainVanillaPayoff::put(strike))
    }
}

impl<P: Payoff> AmericanOption<P> {
    /// Create an option exercising into `payoff`.
    pub fn new(payoff: P) -> Self {
        Self { payoff }
    }

    /// The payoff received on exercise.
    pub fn payoff(&self) -> &P {
        &self.payoff
    }

    /// Price the option on `model` by backward induction.
    ///
    /// Neither the model nor its asset lattice is modified; the returned
    /// value lattice is freshly allocated with the model's step count.
    pub fn price(&self, model: &BinomialModel) -> Result<OptionResults> {
        let envelope = snell_envelope(model, &|s: Real| self.payoff.value(s))?;
        info!(
            payoff = %self.payoff.description(),
            steps = model.steps(),
            npv = envelope.value(),
            "american option priced"
        );
        Ok(OptionResults { envelope })
    }

    /// Value of the same payoff exercisable only at expiry.
    pub fn european_price(&self, model: &BinomialModel) -> Result<Real> {
        european_value(model, &|s: Real| self.payoff.value(s))
    }
}

/// Results of [`AmericanOption::price`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct OptionResults {
    envelope: SnellEnvelope,
}

impl OptionResults {
    /// Fair value at time zero.
    pub fn npv(&self) -> Real {
        self.envelope.value()
    }

    /// Option value at every node.
    pub fn value_tree(&self) -> &Lattice<Real> {
        self.envelope.values()
    }

    /// `true` where exercising immediately is strictly better than holding.
    pub fn exercised(&self, n: Size, i: Size) -> Result<bool> {
        self.envelope.exercised(n, i)
    }

    /// Nodes where early exercise is strictly optimal.
    pub fn early_exercise_nodes(&self) -> Vec<(Size, Size)> {
        self.envelope.early_exercise_nodes()
    }

    /// Split into the time-zero value and the full value lattice.
    pub fn into_parts(self) -> (Real, Lattice<Real>) {
        let npv = self.envelope.value();
        (npv, self.envelope.into_values())
    }
}
