use thiserror::Error;

/// Everything that can go wrong while turning a board into a network.
#[derive(Error, Debug)]
pub enum ModelError {
    /// The board's rows or layers disagree on their length, or a cell holds a
    /// value that is not a valid hint.
    #[error("malformed board: {0}")]
    MalformedBoard(String),

    /// A revealed cell asks for more mines than its neighbourhood can hold.
    #[error(
        "unsatisfiable hint at {constraint}: {hint} mines required but only \
         {eligible} of {neighbors} neighbours can hold one"
    )]
    UnsatisfiableHint {
        constraint: String,
        anchor: Vec<usize>,
        hint: u8,
        neighbors: usize,
        eligible: usize,
    },

    /// Enumerating a constraint's table would exceed the configured ceiling.
    #[error("{constraint} would enumerate {candidates} candidate tuples (limit {limit})")]
    CombinatorialBlowup {
        constraint: String,
        candidates: u128,
        limit: u64,
    },

    /// A satisfying tuple does not line up with its constraint's scope.
    #[error("tuple of length {found} added to {constraint} whose scope has length {expected}")]
    TupleArity {
        constraint: String,
        expected: usize,
        found: usize,
    },

    /// A constraint names a variable the network does not own.
    #[error("{constraint} refers to unknown variable {variable}")]
    UnknownVariable { constraint: String, variable: usize },

    /// A variable's declared domain is empty, or its working domain holds a
    /// value the declared domain does not.
    #[error("variable {0} has an inconsistent domain")]
    InvalidDomain(String),

    #[error("cannot place {mines} mines on a board of {cells} cells")]
    TooManyMines { mines: usize, cells: usize },

    #[error("reveal probability {0} is outside [0, 1]")]
    InvalidProbability(f64),

    #[error("network encoding failed: {0}")]
    Codec(#[from] bcs::Error),
}

pub type Result<T> = std::result::Result<T, ModelError>;
