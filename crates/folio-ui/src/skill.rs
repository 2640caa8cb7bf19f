//! Skill kinds, proficiency levels and their display descriptors.
//!
//! Both sets are closed: a name outside them is rejected with
//! [`FolioError::UnknownSkillKind`] instead of falling back to a default
//! glyph.

use std::fmt;
use std::str::FromStr;

use folio_types::color::Color;
use folio_types::error::FolioError;
use serde::{Deserialize, Serialize};

use crate::carousel::CarouselItem;

/// Lowercase and keep only alphanumerics and `#`, so
/// "Three.js / R3F" and "threejs r3f" compare equal.
fn normalize(name: &str) -> String {
    name.chars()
        .filter(|c| c.is_alphanumeric() || *c == '#')
        .flat_map(char::to_lowercase)
        .collect()
}

/// 3D glyph rendered for a proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Glyph {
    Icosahedron,
    Dodecahedron,
    Octahedron,
    Cube,
}

/// How a level is drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelDescriptor {
    pub glyph: Glyph,
    pub color: Color,
    pub tier: &'static str,
}

/// Proficiency level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkillLevel {
    Basic,
    Proficient,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const ALL: [Self; 4] = [Self::Expert, Self::Advanced, Self::Proficient, Self::Basic];

    pub fn name(self) -> &'static str {
        match self {
            Self::Expert => "Expert",
            Self::Advanced => "Advanced",
            Self::Proficient => "Proficient",
            Self::Basic => "Basic",
        }
    }

    pub fn descriptor(self) -> LevelDescriptor {
        match self {
            Self::Expert => LevelDescriptor {
                glyph: Glyph::Icosahedron,
                color: Color::rgb(0xef, 0x44, 0x44),
                tier: "Tier-IV",
            },
            Self::Advanced => LevelDescriptor {
                glyph: Glyph::Dodecahedron,
                color: Color::rgb(0xf8, 0x71, 0x71),
                tier: "Tier-III",
            },
            Self::Proficient => LevelDescriptor {
                glyph: Glyph::Octahedron,
                color: Color::rgb(0xfc, 0xa5, 0xa5),
                tier: "Tier-II",
            },
            Self::Basic => LevelDescriptor {
                glyph: Glyph::Cube,
                color: Color::rgb(0xfe, 0xca, 0xca),
                tier: "Tier-I",
            },
        }
    }
}

impl FromStr for SkillLevel {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        Self::ALL
            .into_iter()
            .find(|level| normalize(level.name()) == key)
            .ok_or_else(|| FolioError::UnknownSkillKind(s.to_string()))
    }
}

impl TryFrom<String> for SkillLevel {
    type Error = FolioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SkillLevel> for String {
    fn from(level: SkillLevel) -> Self {
        level.name().to_string()
    }
}

impl fmt::Display for SkillLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The technologies the skills section knows how to draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SkillKind {
    UnrealEngine,
    Unity,
    CSharp,
    React,
    ThreeJs,
    NodeJs,
    TypeScript,
    Blender,
    Git,
}

impl SkillKind {
    pub const ALL: [Self; 9] = [
        Self::UnrealEngine,
        Self::Unity,
        Self::CSharp,
        Self::React,
        Self::ThreeJs,
        Self::NodeJs,
        Self::TypeScript,
        Self::Blender,
        Self::Git,
    ];

    /// Display name.
    pub fn name(self) -> &'static str {
        match self {
            Self::UnrealEngine => "Unreal Engine",
            Self::Unity => "Unity",
            Self::CSharp => "C#",
            Self::React => "React",
            Self::ThreeJs => "Three.js / R3F",
            Self::NodeJs => "Node.js",
            Self::TypeScript => "TypeScript",
            Self::Blender => "Blender",
            Self::Git => "Git & GitHub",
        }
    }

    /// Icon identifier in the page's icon set.
    pub fn icon(self) -> &'static str {
        match self {
            Self::UnrealEngine => "gamepad-2",
            Self::Unity => "box",
            Self::CSharp => "hash",
            Self::React => "atom",
            Self::ThreeJs => "cuboid",
            Self::NodeJs => "server",
            Self::TypeScript => "file-code",
            Self::Blender => "shapes",
            Self::Git => "git-branch",
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::UnrealEngine => &["unreal", "ue5", "ue"],
            Self::Unity => &["unity3d"],
            Self::CSharp => &["csharp", "cs"],
            Self::React => &["reactjs"],
            Self::ThreeJs => &["three.js", "threejs", "r3f"],
            Self::NodeJs => &["node", "nodejs"],
            Self::TypeScript => &["ts"],
            Self::Blender => &[],
            Self::Git => &["git", "git & github", "github"],
        }
    }
}

impl FromStr for SkillKind {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = normalize(s);
        if key.is_empty() {
            return Err(FolioError::UnknownSkillKind(s.to_string()));
        }
        Self::ALL
            .into_iter()
            .find(|kind| {
                normalize(kind.name()) == key || kind.aliases().iter().any(|a| normalize(a) == key)
            })
            .ok_or_else(|| FolioError::UnknownSkillKind(s.to_string()))
    }
}

impl TryFrom<String> for SkillKind {
    type Error = FolioError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SkillKind> for String {
    fn from(kind: SkillKind) -> Self {
        kind.name().to_string()
    }
}

impl fmt::Display for SkillKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One card in a skill category strip.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Skill {
    #[serde(rename = "name")]
    pub kind: SkillKind,
    pub level: SkillLevel,
    pub description: String,
    /// Catalogue id shown on the card, e.g. `#UE5-EXP`.
    pub id: String,
    /// Percentage shown as the "stability" readout.
    pub stability: f32,
}

impl Skill {
    pub fn tier(&self) -> &'static str {
        self.level.descriptor().tier
    }
}

impl CarouselItem for Skill {
    fn id(&self) -> &str {
        &self.id
    }
}
