use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Upper bound of every normalized category score.
pub const MAX_NORMALIZED_SCORE: f64 = 3.0;

/// One of the six fixed dimensions of managerial behavior the quiz measures.
///
/// Higher normalized scores mean the behavior is more pronounced (more
/// delegation trouble, more organizational drag, and so on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    Delegation,
    OrgDrag,
    CommGap,
    UpdatePower,
    GenGap,
    HarassmentAwareness,
}

impl Category {
    /// All categories in their canonical order.
    pub const ALL: [Category; 6] = [
        Category::Delegation,
        Category::OrgDrag,
        Category::CommGap,
        Category::UpdatePower,
        Category::GenGap,
        Category::HarassmentAwareness,
    ];

    /// Stable key used in configuration files and serialized output.
    pub fn key(&self) -> &'static str {
        match self {
            Category::Delegation => "delegation",
            Category::OrgDrag => "org-drag",
            Category::CommGap => "comm-gap",
            Category::UpdatePower => "update-power",
            Category::GenGap => "gen-gap",
            Category::HarassmentAwareness => "harassment-awareness",
        }
    }

    /// Label for display
    pub fn label(&self) -> &'static str {
        match self {
            Category::Delegation => "Delegation",
            Category::OrgDrag => "Organizational drag",
            Category::CommGap => "Communication gap",
            Category::UpdatePower => "Update power",
            Category::GenGap => "Generation gap",
            Category::HarassmentAwareness => "Harassment awareness",
        }
    }

    /// Position in [`Category::ALL`].
    pub const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.key() == s)
            .ok_or_else(|| format!("unknown category '{}'", s))
    }
}

/// Normalized category vector.
///
/// Always carries all six categories; values are kept inside
/// `[0, MAX_NORMALIZED_SCORE]` by every constructor and setter.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CategoryScores {
    values: [f64; 6],
}

impl CategoryScores {
    /// Build a vector from values in [`Category::ALL`] order, clamping each.
    pub fn new(values: [f64; 6]) -> Self {
        let mut scores = Self::default();
        for (category, value) in Category::ALL.into_iter().zip(values) {
            scores.set(category, value);
        }
        scores
    }

    /// Vector with every category at the same value.
    pub fn uniform(value: f64) -> Self {
        Self::new([value; 6])
    }

    pub fn get(&self, category: Category) -> f64 {
        self.values[category.index()]
    }

    /// Set a category, clamping into the valid range. NaN becomes 0.
    pub fn set(&mut self, category: Category, value: f64) {
        self.values[category.index()] = clamp_score(value);
    }

    /// Copy with one category replaced.
    pub fn with(mut self, category: Category, value: f64) -> Self {
        self.set(category, value);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Category, f64)> + '_ {
        Category::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Values in [`Category::ALL`] order.
    pub fn to_array(&self) -> [f64; 6] {
        self.values
    }
}

fn clamp_score(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, MAX_NORMALIZED_SCORE)
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// Serialized as a map keyed by category so the stored shape is
// `{"delegation": 1.5, "org-drag": 0.0, ...}`.
impl Serialize for CategoryScores {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;
        let mut map = serializer.serialize_map(Some(Category::ALL.len()))?;
        for (category, value) in self.iter() {
            map.serialize_entry(category.key(), &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryScores {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = std::collections::BTreeMap::<Category, f64>::deserialize(deserializer)?;
        let mut scores = CategoryScores::default();
        for (category, value) in raw {
            scores.set(category, value);
        }
        Ok(scores)
    }
}

/// One question's answer: the question id and the labels the respondent picked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerSubmission {
    pub question_id: u32,
    pub selected_labels: Vec<String>,
}

impl AnswerSubmission {
    pub fn new<I, S>(question_id: u32, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            question_id,
            selected_labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Convenience constructor for single-select answers.
    pub fn single(question_id: u32, label: impl Into<String>) -> Self {
        Self::new(question_id, [label.into()])
    }
}
