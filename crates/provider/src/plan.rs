use std::fmt;

/// What applying a declaration against prior state will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlanAction {
    /// No prior state.
    Create,
    /// Declaration already matches state.
    NoOp,
    /// In-place update.
    Update,
    /// Destroy then create; lists the attributes that forced it.
    Replace(Vec<&'static str>),
}

impl PlanAction {
    pub fn is_noop(&self) -> bool {
        matches!(self, PlanAction::NoOp)
    }
}

impl fmt::Display for PlanAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanAction::Create => write!(f, "create"),
            PlanAction::NoOp => write!(f, "no changes"),
            PlanAction::Update => write!(f, "update in-place"),
            PlanAction::Replace(attrs) => write!(f, "replace (forced by {})", attrs.join(", ")),
        }
    }
}
