use crate::silhouette::data::SilhouetteData;

/// How hard a pose is to hold or frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Difficulty {
    /// Beginner friendly.
    Easy,
    /// Needs some practice.
    Medium,
    /// Expressive or unusual.
    Hard,
}

/// Pose grouping used for browsing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoseCategory {
    /// Standing poses.
    Standing,
    /// Seated poses.
    Sitting,
    /// Relaxed poses.
    Casual,
    /// Strong, assertive poses.
    Confident,
    /// Playful or expressive poses.
    Creative,
    /// User-imported poses.
    Custom,
}

impl PoseCategory {
    /// Stable identifier (`"standing"`, `"custom"`, ...).
    pub fn id(self) -> &'static str {
        match self {
            Self::Standing => "standing",
            Self::Sitting => "sitting",
            Self::Casual => "casual",
            Self::Confident => "confident",
            Self::Creative => "creative",
            Self::Custom => "custom",
        }
    }

    /// Parse a stable identifier.
    pub fn from_id(id: &str) -> Option<Self> {
        match id.trim().to_ascii_lowercase().as_str() {
            "standing" => Some(Self::Standing),
            "sitting" => Some(Self::Sitting),
            "casual" => Some(Self::Casual),
            "confident" => Some(Self::Confident),
            "creative" => Some(Self::Creative),
            "custom" => Some(Self::Custom),
            _ => None,
        }
    }
}

/// A browsable category chip.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CategoryDescriptor {
    /// Category this chip selects.
    pub id: PoseCategory,
    /// Display name.
    pub name: String,
    /// Icon identifier understood by the UI layer.
    pub icon: String,
}

/// A built-in catalog pose.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pose {
    /// Stable id.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Browsing category.
    pub category: PoseCategory,
    /// One-line description.
    pub description: String,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// Reference silhouette image.
    pub silhouette_url: String,
    /// Dedicated overlay image, preferred over the silhouette when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_image: Option<String>,
    /// Coaching tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

/// A pose imported from the user's own photo.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomPose {
    /// Stable id (`custom-<ms>`).
    pub id: String,
    /// Display name.
    pub name: String,
    /// One-line description.
    pub description: String,
    /// Difficulty rating.
    pub difficulty: Difficulty,
    /// The photo the pose was imported from.
    pub original_image: String,
    /// Dedicated overlay image, preferred over everything else when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overlay_image: Option<String>,
    /// Generated skeleton, if synthesis ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub silhouette_data: Option<SilhouetteData>,
    /// Coaching tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

impl CustomPose {
    /// Category of every custom pose.
    pub const CATEGORY: PoseCategory = PoseCategory::Custom;
}

/// Borrowed view over either kind of pose.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PoseRef<'a> {
    /// Catalog pose.
    Standard(&'a Pose),
    /// Imported pose.
    Custom(&'a CustomPose),
}

impl<'a> PoseRef<'a> {
    /// Stable id.
    pub fn id(self) -> &'a str {
        match self {
            Self::Standard(p) => &p.id,
            Self::Custom(p) => &p.id,
        }
    }

    /// Display name.
    pub fn name(self) -> &'a str {
        match self {
            Self::Standard(p) => &p.name,
            Self::Custom(p) => &p.name,
        }
    }

    /// Browsing category.
    pub fn category(self) -> PoseCategory {
        match self {
            Self::Standard(p) => p.category,
            Self::Custom(_) => CustomPose::CATEGORY,
        }
    }

    /// Coaching tips.
    pub fn tips(self) -> &'a [String] {
        match self {
            Self::Standard(p) => &p.tips,
            Self::Custom(p) => &p.tips,
        }
    }
}

/// Owned selection held by the state store.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "pose", rename_all = "lowercase")]
pub enum SelectedPose {
    /// Catalog pose.
    Standard(Pose),
    /// Imported pose.
    Custom(CustomPose),
}

impl SelectedPose {
    /// Borrow as a [`PoseRef`].
    pub fn as_ref(&self) -> PoseRef<'_> {
        match self {
            Self::Standard(p) => PoseRef::Standard(p),
            Self::Custom(p) => PoseRef::Custom(p),
        }
    }

    /// Stable id.
    pub fn id(&self) -> &str {
        self.as_ref().id()
    }
}

impl From<Pose> for SelectedPose {
    fn from(p: Pose) -> Self {
        Self::Standard(p)
    }
}

impl From<CustomPose> for SelectedPose {
    fn from(p: CustomPose) -> Self {
        Self::Custom(p)
    }
}
