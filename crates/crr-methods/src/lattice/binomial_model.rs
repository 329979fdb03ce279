//! Cox-Ross-Rubinstein model of the underlying asset.
//!
//! Over each period the asset price moves up by factor `U` or down by
//! factor `D`, and cash grows by `1 + R`.  After `i` up-moves out of `n`
//! periods the price is `S0 · U^i · D^(n−i)` whatever the order of the
//! moves, which is why the lattice recombines into `O(N²)` nodes.

use num_traits::ToPrimitive;
use tracing::{debug, warn};

use crr_core::{ensure, Error, Price, Rate, Real, Result, Size};

use super::Lattice;

/// Largest step count a model accepts.
///
/// The model and a pricing pass hold about `3 · (N + 1)(N + 2) / 2` nodes
/// between them, roughly 0.5 GB at this bound.
pub const MAX_STEPS: Size = 5_000;

/// Market and process parameters of a binomial model.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BinomialParams {
    /// Multiplicative up factor `U`.
    pub up: Real,
    /// Multiplicative down factor `D`.
    pub down: Real,
    /// Risk-free rate per period `R`.
    pub rate: Rate,
    /// Initial asset price `S0`.
    pub spot: Price,
    /// Number of time steps `N`.
    pub steps: Size,
}

impl BinomialParams {
    /// Bundle the five model parameters.
    pub fn new(up: Real, down: Real, rate: Rate, spot: Price, steps: Size) -> Self {
        Self {
            up,
            down,
            rate,
            spot,
            steps,
        }
    }

    /// `true` when `D < 1 + R < U`, i.e. the model admits no arbitrage and
    /// the risk-neutral probability lies strictly inside `(0, 1)`.
    pub fn is_arbitrage_free(&self) -> bool {
        let growth = 1.0 + self.rate;
        self.down < growth && growth < self.up
    }

    /// Check every precondition of a financially meaningful model.
    ///
    /// # Errors
    /// Returns [`Error::Precondition`] naming the first violated relation.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.steps <= MAX_STEPS,
            "step count N must be at most {}, got {}",
            MAX_STEPS,
            self.steps
        );
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "initial price S0 must be positive, got {}",
            self.spot
        );
        ensure!(
            self.up.is_finite() && self.down.is_finite() && self.rate.is_finite(),
            "U, D and R must be finite, got U={}, D={}, R={}",
            self.up,
            self.down,
            self.rate
        );
        ensure!(
            self.down > 0.0,
            "down factor D must be positive, got {}",
            self.down
        );
        ensure!(
            self.up > self.down,
            "up factor U ({}) must exceed down factor D ({})",
            self.up,
            self.down
        );
        ensure!(
            self.is_arbitrage_free(),
            "no-arbitrage requires D < 1 + R < U, got D={}, 1+R={}, U={}",
            self.down,
            1.0 + self.rate,
            self.up
        );
        Ok(())
    }
}

/// A binomial model together with its fully populated asset-price lattice.
///
/// Immutable once constructed.
#[derive(Debug, Clone)]
pub struct BinomialModel {
    params: BinomialParams,
    asset_tree: Lattice<Real>,
}

impl BinomialModel {
    /// Build a model after validating `D < 1 + R < U`, `D > 0` and `S0 > 0`.
    ///
    /// # Errors
    /// Returns [`Error::Precondition`] if the parameters are not a valid
    /// arbitrage-free model.
    pub fn new(params: BinomialParams) -> Result<Self> {
        params.validate()?;
        Self::build(params)
    }

    /// Build a model without checking the financial preconditions.
    ///
    /// If `D < 1 + R < U` does not hold, [`risk_neutral_probability`]
    /// falls outside `[0, 1]` and option values computed on the model have
    /// no optimal-stopping meaning.
    ///
    /// [`risk_neutral_probability`]: BinomialModel::risk_neutral_probability
    ///
    /// # Errors
    /// Only fails if `steps` exceeds [`MAX_STEPS`].
    pub fn new_unchecked(params: BinomialParams) -> Result<Self> {
        if !params.is_arbitrage_free() {
            warn!(
                up = params.up,
                down = params.down,
                rate = params.rate,
                "binomial model violates D < 1 + R < U; risk-neutral probability is not in (0, 1)"
            );
        }
        Self::build(params)
    }

    fn build(params: BinomialParams) -> Result<Self> {
        ensure!(
            params.steps <= MAX_STEPS,
            "step count N must be at most {}, got {}",
            MAX_STEPS,
            params.steps
        );
        let asset_tree = Lattice::try_from_fn(params.steps, |n, i| node_price(&params, n, i))?;
        let model = Self { params, asset_tree };
        debug!(
            steps = params.steps,
            p = model.risk_neutral_probability(),
            "built binomial asset lattice"
        );
        Ok(model)
    }

    /// Closed-form asset price `S0 · U^i · D^(n−i)` at node `(n, i)`.
    ///
    /// # Errors
    /// Returns [`Error::NodeOutOfRange`] unless `0 <= i <= n <= N`.
    pub fn compute_s(&self, n: Size, i: Size) -> Result<Price> {
        node_price(&self.params, n, i)
    }

    /// Risk-neutral probability of an up-move, `(1 + R − D) / (U − D)`.
    pub fn risk_neutral_probability(&self) -> Real {
        (1.0 + self.params.rate - self.params.down) / (self.params.up - self.params.down)
    }

    /// Asset price stored at node `(n, i)` of the asset lattice.
    pub fn asset_price(&self, n: Size, i: Size) -> Result<Price> {
        self.asset_tree.get(n, i)
    }

    /// The fully populated asset-price lattice.
    pub fn asset_tree(&self) -> &Lattice<Real> {
        &self.asset_tree
    }

    /// Risk-free rate per period `R`.
    pub fn rate(&self) -> Rate {
        self.params.rate
    }

    /// Number of time steps `N`.
    pub fn steps(&self) -> Size {
        self.params.steps
    }

    /// Up factor `U`.
    pub fn up(&self) -> Real {
        self.params.up
    }

    /// Down factor `D`.
    pub fn down(&self) -> Real {
        self.params.down
    }

    /// Initial asset price `S0`.
    pub fn spot(&self) -> Price {
        self.params.spot
    }

    /// The parameters the model was built from.
    pub fn params(&self) -> &BinomialParams {
        &self.params
    }
}

fn node_price(params: &BinomialParams, n: Size, i: Size) -> Result<Price> {
    let out_of_range = Error::NodeOutOfRange {
        step: n,
        index: i,
        steps: params.steps,
    };
    if i > n || n > params.steps {
        return Err(out_of_range);
    }
    let ups = i.to_i32().ok_or_else(|| out_of_range.clone())?;
    let downs = (n - i).to_i32().ok_or(out_of_range)?;
    Ok(params.spot * params.up.powi(ups) * params.down.powi(downs))
}
