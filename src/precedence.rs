// Precedence chains: ordered candidate sources, first valid value wins
use tracing::trace;

// One place a value may live in a source record
pub trait Candidate: Copy + std::fmt::Debug {
    type Source: ?Sized;
    type Value;

    // The value at this location, if present and of the right type
    fn read(self, source: &Self::Source) -> Option<Self::Value>;

    // Dotted field path, for logs and tests
    fn path(self) -> &'static str;
}

// A resolved value and the candidate that produced it
#[derive(Debug, Clone, PartialEq)]
pub struct Hit<C, T> {
    pub candidate: C,
    pub value: T,
}

// Try each candidate in order and stop at the first one that reads a value
pub fn first_valid<C: Candidate>(source: &C::Source, chain: &[C]) -> Option<Hit<C, C::Value>> {
    chain.iter().copied().find_map(|candidate| {
        let value = candidate.read(source)?;
        trace!(path = candidate.path(), "precedence chain resolved");
        Some(Hit { candidate, value })
    })
}
