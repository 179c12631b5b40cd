use std::fmt;

/// Describes why a captured request did not match what a test expected.
///
/// Both sides are kept as pretty `Debug` renderings so the report stays
/// readable after the messages themselves are gone.
#[derive(Debug, Clone, PartialEq)]
pub struct Mismatch {
    /// What was being checked, usually the expectation name
    pub subject: String,
    pub actual: String,
    pub expected: String,
    /// Line diff of `expected` against `actual`; empty when there is no
    /// meaningful expected value to diff against
    pub diff: String,
}

impl Mismatch {
    pub fn new(
        subject: impl Into<String>,
        actual: impl Into<String>,
        expected: impl Into<String>,
        diff: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            actual: actual.into(),
            expected: expected.into(),
            diff: diff.into(),
        }
    }

    /// A mismatch without a diff, for checks that reject a request outright.
    pub fn rejected(
        subject: impl Into<String>,
        actual: &impl fmt::Debug,
        reason: impl Into<String>,
    ) -> Self {
        Self::new(subject, format!("{actual:#?}"), reason, "")
    }
}

impl fmt::Display for Mismatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} is not expected, got {}", self.subject, self.actual)?;
        write!(f, "want {}", self.expected)?;
        if !self.diff.is_empty() {
            write!(f, "\ndiff:\n{}", self.diff)?;
        }
        Ok(())
    }
}
