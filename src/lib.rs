/// Handles argument parsing and the command runner.
pub mod cli;

/// Survey definition files.
pub mod config;

/// Shared constants: file names, reserved answers and messages.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// The four prompt kinds and the prompters that ask them.
pub mod prompt;

/// Template rendering for labels, defaults and validation expressions.
pub mod renderer;

/// Question stacks with branching, undo and an end card.
pub mod survey;

/// Raw mode and key decoding.
pub mod terminal;
