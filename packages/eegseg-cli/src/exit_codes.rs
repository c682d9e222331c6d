/// Every subject or file was processed.
pub const SUCCESS: i32 = 0;
/// Some subjects failed, others succeeded.
pub const PARTIAL_FAILURE: i32 = 1;
/// Bad arguments, config or input paths.
pub const INPUT_ERROR: i32 = 2;
/// Nothing succeeded, or output could not be written.
pub const EXECUTION_ERROR: i32 = 3;

/// Exit code for a batch that ran `succeeded + failed` units of work.
pub fn for_batch(succeeded: usize, failed: usize) -> i32 {
    if failed == 0 {
        SUCCESS
    } else if succeeded > 0 {
        PARTIAL_FAILURE
    } else {
        EXECUTION_ERROR
    }
}
