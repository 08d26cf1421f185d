/// Behavior that differs between airframes.
pub trait FrameCapabilities {
    /// Returns true if the yaw target should be moved to the current heading
    /// whenever the vehicle is held on the ground.
    fn resets_yaw_target_on_disengage(&self) -> bool {
        false
    }
}

/// Supported airframes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FrameClass {
    #[default]
    MultiCopter,
    /// Traditional helicopter, the rotor keeps spinning on the ground.
    Heli,
}

impl FrameCapabilities for FrameClass {
    fn resets_yaw_target_on_disengage(&self) -> bool {
        matches!(self, FrameClass::Heli)
    }
}

#[cfg(test)]
mod tests {
    use super::{FrameCapabilities, FrameClass};

    #[test]
    fn only_heli_resets_yaw_target() {
        assert!(!FrameClass::MultiCopter.resets_yaw_target_on_disengage());
        assert!(FrameClass::Heli.resets_yaw_target_on_disengage());
    }
}
