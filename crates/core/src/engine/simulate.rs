use crate::domain::build::Build;
use crate::domain::upgrade::UpgradeStep;

/// The hypothetical build after `steps`, applied in order. `build` is left as it was.
pub fn apply_steps(build: &Build, steps: &[UpgradeStep]) -> Build {
    steps
        .iter()
        .fold(build.clone(), |sim, step| sim.with_part(step.proposed_part.clone()))
}
