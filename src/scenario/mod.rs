//! Traffic-mix modes, the URL router used by the load driver, and the
//! per-mode performance requirements.
mod mode;
mod requirements;
mod router;


pub use mode::ScenarioMode;
pub use requirements::{
    ModeRequirements, Requirement, RequirementMetric, RequirementOverrides, RequirementViolation,
};
pub use router::{DEFAULT_SYMBOL, Endpoint, Router};
