//! Portfolio content loaded from the site's JSON data file.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::skills::SkillCategory;

/// Errors raised while loading portfolio content.
#[derive(Error, Debug)]
pub enum ContentError {
    /// The data file exists but could not be read.
    #[error("failed to read portfolio data: {0}")]
    Io(#[from] io::Error),

    /// The data file is not valid portfolio JSON.
    #[error("failed to parse portfolio data: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A showcased project.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

/// Everything the home page renders from the data file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Portfolio {
    #[serde(default)]
    pub projects: Vec<Project>,
    /// `None` when the data file carries no skills collection at all.
    #[serde(default)]
    pub skills: Option<Vec<SkillCategory>>,
}

impl Portfolio {
    /// Parse portfolio JSON.
    pub fn from_json(raw: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// Load the data file, treating a missing file as an empty portfolio.
    ///
    /// The file is read on every call so edits show up without a restart.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ContentError> {
        let path = path.as_ref();
        match tokio::fs::read_to_string(path).await {
            Ok(raw) => {
                let portfolio = Self::from_json(&raw)?;
                debug!(
                    name: "content.loaded",
                    path = %path.display(),
                    projects = portfolio.projects.len(),
                    "Portfolio data loaded"
                );
                Ok(portfolio)
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                warn!(
                    name: "content.missing",
                    path = %path.display(),
                    "Portfolio data file not found, rendering empty portfolio"
                );
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Skills collection as a slice, if one was supplied.
    pub fn skills(&self) -> Option<&[SkillCategory]> {
        self.skills.as_deref()
    }
}
