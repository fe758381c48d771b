// Extraction pipeline: document bytes → plain text → structured fields.
// Every rule degrades to a documented default on no-match; only the PDF
// decode step can fail, and it degrades to empty text rather than erroring.

pub mod fields;
pub mod normalize;
pub mod patterns;
