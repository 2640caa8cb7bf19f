//! Portfolio content: sections, skills, projects and contact details.
//!
//! Content is plain TOML. A copy is compiled into the crate so the page
//! works without any files on disk.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ScrollConfig;
use crate::error::{FolioError, Result};
use crate::ui::{Project, ScrollTracker, Section, Skill};

const BUILTIN: &str = include_str!("../../../content/portfolio.toml");

/// A named strip of skill cards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

/// A copyable line in the contact panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactDetail {
    pub label: String,
    pub value: String,
}

/// Everything the page shows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    pub owner: String,
    pub sections: Vec<Section>,
    #[serde(default)]
    pub skill_categories: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    #[serde(default)]
    pub contact_details: Vec<ContactDetail>,
}

impl Portfolio {
    /// The bundled content.
    pub fn builtin() -> Result<Self> {
        Self::from_toml_str(BUILTIN)
    }

    /// Parse and validate a TOML document.
    ///
    /// Unknown skill levels or kinds fail during parsing.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let portfolio: Self = toml::from_str(s)?;
        portfolio.validate()?;
        Ok(portfolio)
    }

    pub fn from_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        let portfolio = Self::from_toml_str(&text)?;
        log::info!("Loaded portfolio content from {}", path.display());
        Ok(portfolio)
    }

    pub fn validate(&self) -> Result<()> {
        // Section ordering and anchor rules are the tracker's.
        ScrollTracker::new(self.sections.clone(), ScrollConfig::default())?;

        if self.projects.is_empty() {
            return Err(FolioError::Content("at least one project is required".into()));
        }
        let mut titles = HashSet::new();
        for project in &self.projects {
            if !titles.insert(project.title.as_str()) {
                return Err(FolioError::Content(format!(
                    "duplicate project '{}'",
                    project.title
                )));
            }
        }

        let mut names = HashSet::new();
        for category in &self.skill_categories {
            if !names.insert(category.name.as_str()) {
                return Err(FolioError::Content(format!(
                    "duplicate skill category '{}'",
                    category.name
                )));
            }
            let mut ids = HashSet::new();
            for skill in &category.skills {
                if !ids.insert(skill.id.as_str()) {
                    return Err(FolioError::Content(format!(
                        "duplicate skill id '{}' in '{}'",
                        skill.id, category.name
                    )));
                }
                if !(0.0..=100.0).contains(&skill.stability) {
                    return Err(FolioError::Content(format!(
                        "skill '{}' stability {} outside 0..=100",
                        skill.id, skill.stability
                    )));
                }
            }
        }

        let mut labels = HashSet::new();
        for detail in &self.contact_details {
            if !labels.insert(detail.label.as_str()) {
                return Err(FolioError::Content(format!(
                    "duplicate contact detail '{}'",
                    detail.label
                )));
            }
        }
        Ok(())
    }

    pub fn contact_detail(&self, label: &str) -> Option<&ContactDetail> {
        self.contact_details.iter().find(|d| d.label == label)
    }
}
