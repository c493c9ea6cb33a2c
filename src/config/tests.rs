//! Tests for the config module

#[cfg(test)]
mod tests {
    use crate::config::{Config, ConfigV1};
    use crate::error::Error;
    use crate::prompt::{Console, ScriptedPrompter, Theme};
    use std::fs;

    const SURVEY: &str = r#"
schemaVersion: v1
questions:
  name:
    help: "What is your name?"
    validation: { condition: "value|length > 0", error_message: "Name required" }
    next: lang
  lang:
    help: "Favourite language, {{ name }}?"
    choices: ["Rust", { label: "Go", value: "go", description: "gophers" }]
    branches: { Rust: [why_rust, years], "": "@end" }
  why_rust:
    help: "Why Rust?"
  years:
    help: "Years of experience with {{ lang }}?"
    default: 1
"#;

    fn parse(yaml: &str) -> ConfigV1 {
        match serde_yaml::from_str::<Config>(yaml).unwrap() {
            Config::V1(config) => config,
        }
    }

    #[test]
    fn it_defaults_undo_on_and_end_card_off() {
        let config = parse(SURVEY);
        assert!(config.undo);
        assert!(!config.end_card);
        assert_eq!(config.start_id(), Some("name"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn it_rejects_unknown_schema_version() {
        let result = serde_yaml::from_str::<Config>("schemaVersion: v2\nquestions: {}\n");
        assert!(result.is_err());
    }

    #[test]
    fn it_rejects_empty_questions() {
        let config = parse("schemaVersion: v1\n");
        assert!(matches!(config.validate(), Err(Error::ConfigValidation(_))));
    }

    #[test]
    fn it_rejects_undefined_start() {
        let config = parse("schemaVersion: v1\nstart: nope\nquestions: { a: {} }\n");
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation(msg)) if msg.contains("nope")
        ));
    }

    #[test]
    fn it_rejects_undefined_targets() {
        let config = parse("schemaVersion: v1\nquestions: { a: { next: [b, c] }, b: {} }\n");
        assert!(matches!(
            config.validate(),
            Err(Error::ConfigValidation(msg)) if msg.contains("'c'")
        ));
    }

    #[test]
    fn it_rejects_end_inside_a_list() {
        let config = parse("schemaVersion: v1\nquestions: { a: { next: [b, '@end'] }, b: {} }\n");
        assert!(matches!(config.validate(), Err(Error::ConfigValidation(_))));
    }

    #[test]
    fn it_runs_list_targets_in_listed_order() {
        let config = parse(SURVEY);
        let prompter = ScriptedPrompter::new().answers(["Ada", "Rust", "safety", "5"]);
        let mut survey = config.into_survey(prompter, &Theme::plain()).unwrap();
        survey.run().unwrap();

        assert_eq!(
            survey.answer_pairs(),
            vec![
                ("name".to_string(), "Ada".to_string()),
                ("lang".to_string(), "Rust".to_string()),
                ("why_rust".to_string(), "safety".to_string()),
                ("years".to_string(), "5".to_string()),
            ]
        );
        assert_eq!(
            survey.prompter().asked(),
            [
                "What is your name?",
                "Favourite language, Ada?",
                "Why Rust?",
                "Years of experience with Rust?",
            ]
        );
    }

    #[test]
    fn it_ends_on_the_end_target() {
        let config = parse(SURVEY);
        let prompter = ScriptedPrompter::new().answers(["Ada", "go"]);
        let mut survey = config.into_survey(prompter, &Theme::plain()).unwrap();
        survey.run().unwrap();
        assert_eq!(survey.answers(), vec!["Ada", "go"]);
    }

    #[test]
    fn it_reprompts_on_failed_validation_in_line_mode() {
        let config = parse(SURVEY);
        let console = Console::new("\nAda\n2\n".as_bytes(), Vec::<u8>::new());
        let mut survey = config.into_survey(console, &Theme::plain()).unwrap();
        survey.run().unwrap();
        assert_eq!(survey.answers(), vec!["Ada", "go"]);

        let (_, output) = survey.into_prompter().into_inner();
        let output = String::from_utf8(output).unwrap();
        assert!(output.contains("Name required"));
        assert!(output.contains("Favourite language, Ada?"));
    }

    #[test]
    fn it_loads_from_directory_in_preference_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("survey.yaml"), SURVEY).unwrap();
        fs::write(
            dir.path().join("survey.json"),
            r#"{"schemaVersion": "v1", "end_card": true, "questions": {"only": {}}}"#,
        )
        .unwrap();

        let config = Config::load_config(dir.path()).unwrap();
        assert!(config.v1().end_card);
        assert_eq!(config.v1().questions.len(), 1);
    }

    #[test]
    fn it_loads_a_file_directly() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yml");
        fs::write(&path, SURVEY).unwrap();

        let config = Config::load_config(&path).unwrap();
        assert_eq!(config.v1().questions.len(), 4);
    }

    #[test]
    fn it_reports_missing_survey_files() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load_config(dir.path()).unwrap_err();
        match err {
            Error::ConfigNotFound { config_files, .. } => {
                assert_eq!(config_files, "survey.json, survey.yaml, survey.yml")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn it_surfaces_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("survey.json"), "{ not json").unwrap();
        let err = Config::load_config(dir.path()).unwrap_err();
        assert!(matches!(err, Error::JSONParseError(_)));
    }
}
