//! Project showcase: one featured project plus a tabbed archive.

use std::collections::HashSet;

use folio_types::config::{CarouselConfig, SwipeConfig};
use folio_types::error::{FolioError, Result};
use serde::{Deserialize, Serialize};

use crate::carousel::{Carousel, CarouselItem};

/// Shown in place of an archive project image that failed to load.
pub const IMAGE_FALLBACK: &str = "https://placehold.co/600x400/000000/ef4444?text=IMAGE+N/A";

/// Larger placeholder for the featured project's hero image.
pub const FEATURED_IMAGE_FALLBACK: &str =
    "https://placehold.co/800x600/000000/ef4444?text=IMAGE+N/A";

fn placeholder_link() -> String {
    "#".to_string()
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub tech: Vec<String>,
    pub image: String,
    #[serde(default = "placeholder_link")]
    pub github: String,
    #[serde(default = "placeholder_link")]
    pub live: String,
}

impl CarouselItem for Project {
    fn id(&self) -> &str {
        &self.title
    }
}

/// Featured project card plus archive tabs over the rest.
pub struct ProjectShowcase {
    featured: Project,
    archive: Carousel<Project>,
    broken_images: HashSet<String>,
}

impl ProjectShowcase {
    /// The first project is featured; the others become archive tabs.
    pub fn new(
        mut projects: Vec<Project>,
        config: &CarouselConfig,
        swipe: &SwipeConfig,
    ) -> Result<Self> {
        if projects.is_empty() {
            return Err(FolioError::Content("no projects to showcase".into()));
        }
        let featured = projects.remove(0);
        if projects.iter().any(|p| p.title == featured.title) {
            return Err(FolioError::Content(format!(
                "duplicate project '{}'",
                featured.title
            )));
        }
        let archive = Carousel::new(projects, config, swipe)?;
        Ok(Self {
            featured,
            archive,
            broken_images: HashSet::new(),
        })
    }

    pub fn featured(&self) -> &Project {
        &self.featured
    }

    pub fn archive(&self) -> &Carousel<Project> {
        &self.archive
    }

    pub fn archive_mut(&mut self) -> &mut Carousel<Project> {
        &mut self.archive
    }

    /// The archive tab currently shown, if the archive is not empty.
    pub fn selected(&self) -> Option<&Project> {
        self.archive.selected()
    }

    /// Record that a project's image failed to load.
    pub fn image_failed(&mut self, title: &str) {
        if self.broken_images.insert(title.to_string()) {
            log::debug!("image for '{title}' failed, using placeholder");
        }
    }

    /// Image URL to render for `project`.
    pub fn image_src<'a>(&self, project: &'a Project) -> &'a str {
        if !self.broken_images.contains(&project.title) {
            &project.image
        } else if project.title == self.featured().title {
            FEATURED_IMAGE_FALLBACK
        } else {
            IMAGE_FALLBACK
        }
    }
}
