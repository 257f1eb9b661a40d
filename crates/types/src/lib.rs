pub mod color;
pub mod content;
pub mod font;
pub mod geometry;

pub use color::Color;
pub use content::{
    ContentError, ContentModel, Education, ExposureArea, Handles, Links, Project, Skill,
    SkillCategory,
};
pub use font::FontWeight;
pub use geometry::{Rect, Size};
