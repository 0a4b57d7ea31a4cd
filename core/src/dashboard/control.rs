use crate::prelude::TriggerControl;

pub const BUSY_LABEL: &str = "Processing...";

/// Plain button model for front ends without a widget handle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }
}

impl TriggerControl for ButtonState {
    fn label(&self) -> String {
        self.label.clone()
    }

    fn set_label(&mut self, label: &str) {
        self.label = label.to_string();
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// Holds a control disabled with a busy label; dropping the guard restores
/// the original label and re-enables it on every exit path.
pub struct BusyGuard<'a, C: TriggerControl + ?Sized> {
    control: &'a mut C,
    original_label: String,
}

impl<'a, C: TriggerControl + ?Sized> BusyGuard<'a, C> {
    /// Returns `None` when the control is already disabled, i.e. an action
    /// is in flight.
    pub fn engage(control: &'a mut C, busy_label: &str) -> Option<Self> {
        if !control.is_enabled() {
            return None;
        }
        let original_label = control.label();
        control.set_enabled(false);
        control.set_label(busy_label);
        Some(Self {
            control,
            original_label,
        })
    }
}

impl<C: TriggerControl + ?Sized> Drop for BusyGuard<'_, C> {
    fn drop(&mut self) {
        self.control.set_label(&self.original_label);
        self.control.set_enabled(true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_restores_on_drop() {
        let mut button = ButtonState::new("Classify now");
        {
            let guard = BusyGuard::engage(&mut button, BUSY_LABEL);
            assert!(guard.is_some());
        }
        assert_eq!(button, ButtonState::new("Classify now"));
    }

    #[test]
    fn disabled_control_is_not_engaged() {
        let mut button = ButtonState::new("Classify now");
        button.enabled = false;
        assert!(BusyGuard::engage(&mut button, BUSY_LABEL).is_none());
        assert_eq!(button.label, "Classify now");
        assert!(!button.enabled);
    }
}
