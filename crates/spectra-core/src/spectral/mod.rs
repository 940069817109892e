pub mod compare;
pub mod counting;
pub mod operator;
pub mod reference;
pub mod test_function;
pub mod trace_formula;

pub use compare::{CountComparison, ErrorComparison, compare_counts, compare_sequences};
pub use counting::{estimate_count, riemann_von_mangoldt};
pub use operator::{DEFAULT_ALPHA, ScalingOperator};
pub use reference::{REFERENCE_ZETA_ORDINATES, reference_ordinates};
pub use test_function::TestFunction;
pub use trace_formula::{
    ComplexTraceFormulaTerms, POLE, TraceFormulaTerms, critical_line_zeros,
    evaluate_trace_formula, generate_trivial_zeros, trace_formula_terms,
    trace_formula_terms_complex,
};
