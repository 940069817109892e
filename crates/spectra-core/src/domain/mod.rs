pub mod errors;

pub use errors::{SpectraError, SpectraErrorCategory, SpectraResult};

use std::fmt::{Display, Formatter};

/// Named analyses the workspace can run; used for report keys and log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Analysis {
    Counts,
    Compare,
    TraceFormula,
    Kernels,
    Plot,
    Report,
}

impl Analysis {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Counts => "COUNTS",
            Self::Compare => "COMPARE",
            Self::TraceFormula => "TRACE_FORMULA",
            Self::Kernels => "KERNELS",
            Self::Plot => "PLOT",
            Self::Report => "REPORT",
        }
    }
}

impl Display for Analysis {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str((*self).as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::Analysis;

    #[test]
    fn analysis_names_are_upper_snake_case() {
        assert_eq!(Analysis::TraceFormula.to_string(), "TRACE_FORMULA");
        assert_eq!(Analysis::Counts.as_str(), "COUNTS");
    }
}
