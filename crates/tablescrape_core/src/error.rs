/// Failures raised by the table session model.
///
/// `EmptyResult` is an expected outcome of a fetch that found nothing; the
/// other variants mean the caller broke the session contract.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("no tables found")]
    EmptyResult,
    #[error("no tables are loaded")]
    EmptyCollection,
    #[error("table index {index} is out of range (0..{len})")]
    IndexOutOfRange { index: usize, len: usize },
}
