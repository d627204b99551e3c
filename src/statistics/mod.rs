pub mod normality;

pub use normality::{
    is_normally_distributed, KsNormalityTest, KsOutcome, DEFAULT_SIGNIFICANCE_LEVEL,
};
