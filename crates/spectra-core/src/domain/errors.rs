use crate::numerics::NumericError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type SpectraResult<T> = Result<T, SpectraError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpectraErrorCategory {
    Success,
    InputValidationError,
    IoSystemError,
    ComputationError,
    InternalError,
}

impl SpectraErrorCategory {
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::InputValidationError => 2,
            Self::IoSystemError => 3,
            Self::ComputationError => 4,
            Self::InternalError => 5,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::InputValidationError => "InputValidationError",
            Self::IoSystemError => "IoSystemError",
            Self::ComputationError => "ComputationError",
            Self::InternalError => "InternalError",
        }
    }

    pub const fn is_fatal(self) -> bool {
        !matches!(self, Self::Success)
    }
}

/// Error surfaced at the crate boundary: a category with a stable exit code,
/// a dotted placeholder identifying the failing check, and a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpectraError {
    category: SpectraErrorCategory,
    placeholder: &'static str,
    message: String,
}

impl SpectraError {
    pub fn new(
        category: SpectraErrorCategory,
        placeholder: &'static str,
        message: impl Into<String>,
    ) -> Self {
        Self {
            category,
            placeholder,
            message: message.into(),
        }
    }

    pub fn input_validation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(
            SpectraErrorCategory::InputValidationError,
            placeholder,
            message,
        )
    }

    pub fn io_system(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectraErrorCategory::IoSystemError, placeholder, message)
    }

    pub fn computation(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectraErrorCategory::ComputationError, placeholder, message)
    }

    pub fn internal(placeholder: &'static str, message: impl Into<String>) -> Self {
        Self::new(SpectraErrorCategory::InternalError, placeholder, message)
    }

    pub const fn category(&self) -> SpectraErrorCategory {
        self.category
    }

    pub const fn placeholder(&self) -> &'static str {
        self.placeholder
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn exit_code(&self) -> i32 {
        self.category.exit_code()
    }

    pub fn diagnostic_line(&self) -> String {
        let severity = if self.category.is_fatal() {
            "ERROR"
        } else {
            "INFO"
        };
        format!("{}: [{}] {}", severity, self.placeholder, self.message)
    }

    pub fn fatal_exit_line(&self) -> Option<String> {
        self.category
            .is_fatal()
            .then(|| format!("FATAL EXIT CODE: {}", self.exit_code()))
    }
}

impl Display for SpectraError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} [{}] {}",
            self.category.as_str(),
            self.placeholder,
            self.message
        )
    }
}

impl Error for SpectraError {}

impl From<NumericError> for SpectraError {
    fn from(error: NumericError) -> Self {
        let placeholder = match &error {
            NumericError::LengthMismatch { .. } => "INPUT.LENGTH_MISMATCH",
            NumericError::DegenerateInput { .. } => "INPUT.DEGENERATE",
            NumericError::InvalidParameter { .. } => "INPUT.INVALID_PARAMETER",
            NumericError::DivisionSingularity { .. } => "INPUT.DIVISION_SINGULARITY",
        };
        Self::input_validation(placeholder, error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::{SpectraError, SpectraErrorCategory};
    use crate::numerics::NumericError;

    #[test]
    fn exit_mapping_is_stable() {
        let cases = [
            (SpectraErrorCategory::Success, 0, "Success"),
            (
                SpectraErrorCategory::InputValidationError,
                2,
                "InputValidationError",
            ),
            (SpectraErrorCategory::IoSystemError, 3, "IoSystemError"),
            (SpectraErrorCategory::ComputationError, 4, "ComputationError"),
            (SpectraErrorCategory::InternalError, 5, "InternalError"),
        ];

        for (category, exit_code, name) in cases {
            assert_eq!(category.exit_code(), exit_code);
            assert_eq!(category.as_str(), name);
        }
        assert!(!SpectraErrorCategory::Success.is_fatal());
    }

    #[test]
    fn fatal_error_renders_diagnostic_lines() {
        let error = SpectraError::io_system("IO.CSV_WRITE", "failed to write 'out.csv'");

        assert_eq!(error.exit_code(), 3);
        assert_eq!(
            error.diagnostic_line(),
            "ERROR: [IO.CSV_WRITE] failed to write 'out.csv'"
        );
        assert_eq!(
            error.fatal_exit_line().as_deref(),
            Some("FATAL EXIT CODE: 3")
        );
    }

    #[test]
    fn numeric_errors_map_to_input_validation_placeholders() {
        let error = SpectraError::from(NumericError::DivisionSingularity { index: 4 });
        assert_eq!(
            error.category(),
            SpectraErrorCategory::InputValidationError
        );
        assert_eq!(error.placeholder(), "INPUT.DIVISION_SINGULARITY");
        assert!(error.message().contains("index 4"));

        let error = SpectraError::from(NumericError::LengthMismatch { left: 3, right: 2 });
        assert_eq!(error.placeholder(), "INPUT.LENGTH_MISMATCH");
        assert_eq!(error.exit_code(), 2);
    }
}
