//! Wizard steps and the outcome of a companion run.

use crate::core::proc::{InvokeError, Summary};

/// The steps of the wizard, in the order the user walks through them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
    BrowsingDirectory,
    NamingOutput,
    LabelEntry,
    ReviewingConfig,
    Processing,
    Finished,
}

impl Step {
    /// Step reached by confirming the output name.
    pub fn after_naming(label_step: bool) -> Step {
        if label_step {
            Step::LabelEntry
        } else {
            Step::ReviewingConfig
        }
    }

    /// Step reached by going back from the review.
    pub fn before_review(label_step: bool) -> Step {
        if label_step {
            Step::LabelEntry
        } else {
            Step::NamingOutput
        }
    }

    /// 1-based position shown in the header.
    pub fn number(self) -> usize {
        match self {
            Step::BrowsingDirectory => 1,
            Step::NamingOutput => 2,
            Step::LabelEntry => 3,
            Step::ReviewingConfig => 4,
            Step::Processing => 5,
            Step::Finished => 6,
        }
    }
}

/// Result of the last companion run, shown on the finished step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success(Summary),
    Failure(InvokeError),
}

impl From<Result<Summary, InvokeError>> for Outcome {
    fn from(result: Result<Summary, InvokeError>) -> Self {
        match result {
            Ok(summary) => Outcome::Success(summary),
            Err(err) => Outcome::Failure(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_step_can_be_skipped() {
        assert_eq!(Step::after_naming(true), Step::LabelEntry);
        assert_eq!(Step::after_naming(false), Step::ReviewingConfig);
        assert_eq!(Step::before_review(true), Step::LabelEntry);
        assert_eq!(Step::before_review(false), Step::NamingOutput);
    }
}
