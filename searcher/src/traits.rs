use std::fmt::Debug;
use std::hash::Hash;
use std::ops::Add;

use num::Zero;

/// Costs which can be accumulated along a path.
///
/// Any numeric type will do. Costs are compared with [PartialOrd], so
/// floating point costs are allowed, but a `NaN` cost is treated the
/// same as a negative one and stops the search.
pub trait Cost: Debug + Copy + PartialOrd + Add<Output = Self> + Zero {}

impl<T> Cost for T where T: Debug + Copy + PartialOrd + Add<Output = T> + Zero {}

/// Identity of a search state, used for the visited set and path table.
pub trait SearchKey: Debug + Clone + Eq + Hash {}

impl<T> SearchKey for T where T: Debug + Clone + Eq + Hash {}
