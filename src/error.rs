/// Errors reported when backing storage cannot grow.
///
/// Duplicate keys and missing keys are not errors; they are reported through `bool` and
/// `Option` results. Every fallible operation leaves the collection exactly as it was.
#[derive(Clone, Copy, Debug, Eq, PartialEq, thiserror::Error)]
pub enum Error {
    /// The allocator refused to provide storage for `requested` slots.
    #[error("allocation failed while growing storage to {requested} slots")]
    AllocFailed {
        /// Total slot count that was requested.
        requested: usize,
    },

    /// More slots were requested than the collection can address.
    #[error("requested capacity {requested} exceeds the maximum of {max} slots")]
    CapacityOverflow {
        /// Total slot count that was requested.
        requested: usize,
        /// Largest slot count the collection supports.
        max: usize,
    },
}

/// Result type returned by the fallible operations of this crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn display_messages() {
        let err = Error::AllocFailed {
            requested: 64,
        };
        assert_eq!(err.to_string(), "allocation failed while growing storage to 64 slots");

        let err = Error::CapacityOverflow {
            requested: 10,
            max: 4,
        };
        assert_eq!(err.to_string(), "requested capacity 10 exceeds the maximum of 4 slots");
    }
}
