#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    List,
    Register,
    Compare,
}

impl View {
    pub const ALL: [View; 3] = [View::List, View::Register, View::Compare];

    pub fn label(self) -> &'static str {
        match self {
            View::List => "Companies",
            View::Register => "Register",
            View::Compare => "Compare",
        }
    }
}

/// Side effect owed when a view becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryEffect {
    RefreshList,
    ResetForm,
}

/// Exactly one view is active at a time. Navigation is never guarded.
#[derive(Debug, Clone)]
pub struct ViewRouter {
    active: View,
}

impl Default for ViewRouter {
    fn default() -> Self {
        Self { active: View::List }
    }
}

impl ViewRouter {
    pub fn active(&self) -> View {
        self.active
    }

    pub fn is_active(&self, view: View) -> bool {
        self.active == view
    }

    /// User navigation: switches views and reports the entry effect.
    pub fn activate(&mut self, view: View) -> Option<EntryEffect> {
        self.active = view;
        match view {
            View::List => Some(EntryEffect::RefreshList),
            View::Register => Some(EntryEffect::ResetForm),
            View::Compare => None,
        }
    }

    /// Switches views without entry effects, for transitions whose caller
    /// has already prepared the target (edit load, comparison results).
    pub fn show(&mut self, view: View) {
        self.active = view;
    }
}
