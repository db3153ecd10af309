//! Error types.
//!
//! Level errors are authoring-time failures and carry 1-based line numbers.
//! Binding errors are gameplay refusals that the engine absorbs.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum LevelError {
    #[error("line {line}: expected `TypeName(arg, ...)`, got `{text}`")]
    Syntax { line: usize, text: String },
    #[error("line {line}: unknown entity type `{name}`")]
    UnknownType { line: usize, name: String },
    #[error("line {line}: argument {index} of {name} is not valid: `{value}`")]
    BadArgument {
        line: usize,
        name: String,
        index: usize,
        value: String,
    },
    #[error("line {line}: {name} takes {min}..={max} arguments, got {got}")]
    ArgumentCount {
        line: usize,
        name: String,
        min: usize,
        max: usize,
        got: usize,
    },
    #[error("{name} has no argument named `{arg}`")]
    UnknownArgument { name: String, arg: String },
    #[error("`{value}` is not a valid {arg} for {name}")]
    InvalidValue {
        name: String,
        arg: String,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindError {
    #[error("entity is not a controller")]
    NotAController,
    #[error("entity has no cockpit")]
    NotBoardable,
    #[error("no vehicle in boarding range")]
    NoVehicleInRange,
    #[error("vehicle is already occupied")]
    Occupied,
    #[error("controller is not inside a vehicle")]
    NotBoarded,
    #[error("controller is already inside a vehicle")]
    AlreadyBoarded,
}
