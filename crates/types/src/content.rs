//! The portfolio content model.
//!
//! This is the read-only data the exporter consumes: profile, skills, projects,
//! engineering exposure, education and interests. Every field is optional on
//! the wire so a partially filled file degrades to a shorter document instead
//! of failing to load.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("I/O error reading content: {0}")]
    Io(#[from] std::io::Error),
    #[error("Content JSON is malformed: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Handles {
    pub primary: String,
    pub secondary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Links {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Skill {
    pub name: String,
    /// Self-assessed proficiency, nominally 0-100.
    pub percent: u32,
}

/// A named group of skills. Category and item order follow the source file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkillCategory {
    pub name: String,
    pub skills: Vec<Skill>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Project {
    pub title: String,
    pub subtitle: Option<String>,
    pub status: String,
    pub stack: Vec<String>,
    #[serde(alias = "highlights")]
    pub bullets: Vec<String>,
}

/// One engineering discipline with the concrete areas worked in.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ExposureArea {
    pub title: String,
    pub points: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub track: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct ContentModel {
    pub name: String,
    pub handles: Handles,
    pub title: String,
    pub tagline: String,
    pub email: String,
    pub links: Links,
    pub summary: String,
    #[serde(deserialize_with = "ordered_skills")]
    pub skills: Vec<SkillCategory>,
    pub projects: Vec<Project>,
    pub exposure: Vec<ExposureArea>,
    pub education: Option<Education>,
    pub interests: Vec<String>,
    pub cv_filename: Option<String>,
}

impl ContentModel {
    pub fn from_json_str(json: &str) -> Result<Self, ContentError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, ContentError> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json_str(&raw)
    }
}

/// `skills` is written as `{ "Category": { "Skill": 90 } }`. A plain map would
/// lose the author's ordering, so the visitor collects entries as they appear.
fn ordered_skills<'de, D>(deserializer: D) -> Result<Vec<SkillCategory>, D::Error>
where
    D: Deserializer<'de>,
{
    struct CategoriesVisitor;

    impl<'de> Visitor<'de> for CategoriesVisitor {
        type Value = Vec<SkillCategory>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a map of skill category to skill percentages")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut categories = Vec::new();
            while let Some((name, skills)) = map.next_entry::<String, OrderedSkills>()? {
                categories.push(SkillCategory {
                    name,
                    skills: skills.0,
                });
            }
            Ok(categories)
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }
    }

    deserializer.deserialize_any(CategoriesVisitor)
}

struct OrderedSkills(Vec<Skill>);

impl<'de> Deserialize<'de> for OrderedSkills {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct SkillsVisitor;

        impl<'de> Visitor<'de> for SkillsVisitor {
            type Value = OrderedSkills;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of skill name to percentage")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut skills = Vec::new();
                while let Some((name, percent)) = map.next_entry::<String, u32>()? {
                    skills.push(Skill { name, percent });
                }
                Ok(OrderedSkills(skills))
            }
        }

        deserializer.deserialize_map(SkillsVisitor)
    }
}
