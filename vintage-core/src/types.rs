/// Numeric type for all probability and score arithmetic.
///
/// Log-probabilities accumulate over many small terms, so the wider
/// `f64` is used throughout.
pub type Float = f64;

/// Occurrence count of a single token within one document.
pub type Count = u32;
