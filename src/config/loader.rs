//! Survey file loading and validation

use crate::config::question::QuestionConfig;
use crate::constants::{CONFIG_FILENAMES, END_TARGET};
use crate::error::{Error, Result};
use crate::prompt::{Prompter, Theme};
use crate::renderer::MiniJinjaRenderer;
use crate::survey::Survey;
use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;
use std::path::Path;
use std::rc::Rc;

/// Main configuration structure holding all questions
#[derive(Debug, Deserialize)]
pub struct ConfigV1 {
    /// First question to ask; the first one listed when omitted
    #[serde(default)]
    pub start: Option<String>,
    #[serde(default = "get_default_undo")]
    pub undo: bool,
    #[serde(default)]
    pub end_card: bool,
    #[serde(default)]
    pub questions: IndexMap<String, QuestionConfig>,
}

impl ConfigV1 {
    pub fn validate(&self) -> Result<(), Error> {
        if self.questions.is_empty() {
            return Err(Error::ConfigValidation("questions must not be empty".into()));
        }
        if let Some(start) = &self.start {
            if !self.questions.contains_key(start) {
                return Err(Error::ConfigValidation(format!(
                    "start question '{start}' is not defined"
                )));
            }
        }
        for (id, question) in &self.questions {
            for target in question.targets() {
                for target_id in target.ids() {
                    if target_id == END_TARGET {
                        return Err(Error::ConfigValidation(format!(
                            "question '{id}' lists '{END_TARGET}' among other targets"
                        )));
                    }
                    if !self.questions.contains_key(target_id) {
                        return Err(Error::ConfigValidation(format!(
                            "question '{id}' branches to undefined question '{target_id}'"
                        )));
                    }
                }
            }
        }
        Ok(())
    }

    /// The id of the first question.
    pub fn start_id(&self) -> Option<&str> {
        self.start.as_deref().or_else(|| self.questions.keys().next().map(String::as_str))
    }

    /// Build a ready-to-run survey over `prompter`.
    pub fn into_survey<P: Prompter>(&self, prompter: P, theme: &Theme) -> Result<Survey<P>> {
        self.validate()?;
        let mut survey = Survey::new(prompter)
            .with_undo(self.undo)
            .with_end_card(self.end_card)
            .with_theme(theme.clone())
            .with_renderer(Rc::new(MiniJinjaRenderer::new()));
        for (id, question) in &self.questions {
            survey.add_question(question.into_question(id, theme));
        }
        if let Some(start) = self.start_id() {
            debug!("starting survey at '{start}'");
            survey.start(start)?;
        }
        Ok(survey)
    }
}

#[derive(Debug, Deserialize)]
#[serde(tag = "schemaVersion")]
pub enum Config {
    #[serde(rename = "v1")]
    V1(ConfigV1),
}

impl Config {
    /// Load a survey from a file, or from the first of [`CONFIG_FILENAMES`]
    /// found in a directory.
    pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.is_file() {
            return Self::load_file(path);
        }

        for config_file_name in CONFIG_FILENAMES.iter() {
            let config_file_path = path.join(config_file_name);
            if config_file_path.exists() {
                return Self::load_file(&config_file_path);
            }
        }

        Err(Error::ConfigNotFound {
            survey_dir: path.display().to_string(),
            config_files: CONFIG_FILENAMES.join(", "),
        })
    }

    fn load_file(path: &Path) -> Result<Self> {
        debug!("loading survey from '{}'", path.display());
        let content = std::fs::read_to_string(path)?;
        let config: Config = match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => serde_json::from_str(&content)?,
            _ => serde_yaml::from_str(&content)?,
        };
        Ok(config)
    }

    pub fn v1(&self) -> &ConfigV1 {
        match self {
            Config::V1(config) => config,
        }
    }

    pub fn into_survey<P: Prompter>(&self, prompter: P, theme: &Theme) -> Result<Survey<P>> {
        self.v1().into_survey(prompter, theme)
    }
}

fn get_default_undo() -> bool {
    true
}
