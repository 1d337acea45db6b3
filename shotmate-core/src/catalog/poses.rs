use std::collections::HashSet;

use crate::{
    catalog::model::{CategoryDescriptor, Pose, PoseCategory},
    foundation::error::{ShotmateError, ShotmateResult},
};

const BUILTIN_JSON: &str = include_str!("../../data/poses.json");

/// Which poses a browse view shows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    /// Every pose.
    #[default]
    All,
    /// Poses of one category.
    Only(PoseCategory),
}

impl CategoryFilter {
    /// Parse `"all"` or a category id.
    pub fn parse(s: &str) -> ShotmateResult<Self> {
        if s.trim().eq_ignore_ascii_case("all") {
            return Ok(Self::All);
        }
        PoseCategory::from_id(s)
            .map(Self::Only)
            .ok_or_else(|| ShotmateError::validation(format!("unknown pose category '{s}'")))
    }

    /// Whether `category` passes the filter.
    pub fn accepts(self, category: PoseCategory) -> bool {
        match self {
            Self::All => true,
            Self::Only(c) => c == category,
        }
    }
}

/// Read-only, ordered pose catalog.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct PoseCatalog {
    poses: Vec<Pose>,
    categories: Vec<CategoryDescriptor>,
}

impl PoseCatalog {
    /// The catalog shipped with the app.
    pub fn builtin() -> ShotmateResult<Self> {
        Self::from_json_str(BUILTIN_JSON)
    }

    /// Parse and validate a catalog document.
    pub fn from_json_str(s: &str) -> ShotmateResult<Self> {
        let catalog: Self = serde_json::from_str(s)
            .map_err(|e| ShotmateError::serde(format!("parse pose catalog json: {e}")))?;
        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> ShotmateResult<()> {
        let mut seen = HashSet::new();
        for p in &self.poses {
            if p.id.trim().is_empty() {
                return Err(ShotmateError::validation("pose id must be non-empty"));
            }
            if !seen.insert(p.id.as_str()) {
                return Err(ShotmateError::validation(format!(
                    "duplicate pose id '{}'",
                    p.id
                )));
            }
            if p.category == PoseCategory::Custom {
                return Err(ShotmateError::validation(format!(
                    "catalog pose '{}' cannot use the custom category",
                    p.id
                )));
            }
        }
        Ok(())
    }

    /// All poses, in catalog order.
    pub fn poses(&self) -> &[Pose] {
        &self.poses
    }

    /// Category chips, in display order.
    pub fn categories(&self) -> &[CategoryDescriptor] {
        &self.categories
    }

    /// Lookup by id.
    pub fn get(&self, id: &str) -> Option<&Pose> {
        self.poses.iter().find(|p| p.id == id)
    }

    /// Poses passing `filter`, in catalog order.
    pub fn filter(&self, filter: CategoryFilter) -> impl Iterator<Item = &Pose> + '_ {
        self.poses
            .iter()
            .filter(move |p| filter.accepts(p.category))
    }

    /// Display name of `category`, if it has a chip.
    pub fn category_name(&self, category: PoseCategory) -> Option<&str> {
        self.categories
            .iter()
            .find(|c| c.id == category)
            .map(|c| c.name.as_str())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/poses.rs"]
mod tests;
