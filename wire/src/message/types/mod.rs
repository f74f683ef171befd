mod units;
pub use self::units::*;

mod hash;
pub use self::hash::*;

mod public_key;
pub use self::public_key::*;

pub use crate::feature::{Feature, FeatureBit, FeatureError, RawFeatureVector};
