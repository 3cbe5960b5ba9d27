//! Load configuration.

/// What to do with a persisted component whose tag this build does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownComponentPolicy {
    /// Log a warning, step over the payload and keep loading.
    #[default]
    Skip,
    /// Abort the load with [`ObjectError::UnknownComponent`](crate::ObjectError::UnknownComponent).
    Fail,
}

/// Options for loading objects.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    pub unknown_components: UnknownComponentPolicy,
}

impl LoadOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the unknown-tag policy.
    #[must_use]
    pub fn with_unknown_components(mut self, policy: UnknownComponentPolicy) -> Self {
        self.unknown_components = policy;
        self
    }

    /// Fail on anything this build cannot interpret.
    #[must_use]
    pub fn strict() -> Self {
        Self::new().with_unknown_components(UnknownComponentPolicy::Fail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_skips_unknown() {
        assert_eq!(
            LoadOptions::default().unknown_components,
            UnknownComponentPolicy::Skip
        );
    }

    #[test]
    fn test_strict_fails_unknown() {
        assert_eq!(
            LoadOptions::strict().unknown_components,
            UnknownComponentPolicy::Fail
        );
    }
}
