//! Constants used throughout parley

/// Survey definition file names in order of preference
pub const CONFIG_FILENAMES: &[&str] = &["survey.json", "survey.yaml", "survey.yml"];

/// Branch target that ends the survey
pub const END_TARGET: &str = "@end";

/// Answer text that asks an enclosing survey to undo the previous question
pub const BACK_ANSWER: &str = "back";

/// Lines that finish a line-mode multi-select
pub const FINISH_WORDS: &[&str] = &["done", "finish", "q"];

/// Label of the virtual row that submits a multi-select
pub const DEFAULT_CONTINUE_TEXT: &str = "Continue";

/// User-facing prompt messages
pub mod messages {
    pub const CONFIRM_HINT_YES: &str = "(Y/n)";
    pub const CONFIRM_HINT_NO: &str = "(y/N)";
    pub const CONFIRM_INVALID: &str = "Please answer y or n";
    pub const NO_SELECTION: &str = "Select at least one option";
    pub const NO_MATCH: &str = "No option matches";
    pub const END_CARD_TITLE: &str = "Summary of your answers:";
    pub const END_CARD_QUESTION: &str = "Are you satisfied with your answers?";
    pub const MULTI_SELECT_HINT: &str =
        "Toggle by number or name, 'done' to finish";
}

/// Validation defaults for survey definition files
pub mod validation {
    pub const INVALID_ANSWER: &str = "Invalid answer";
    pub const DEFAULT_CONDITION: &str = "true";
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
    pub const CANCELLED: i32 = 130;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
