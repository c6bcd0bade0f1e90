//! Keyword-based classification of user input into challenge categories.

/// The challenge domains the bot knows how to coach.
///
/// `PersonalDevelopment` is the fallback used when no keyword matches; it is a
/// full member of the type so every consumer (prompt building included) treats
/// it like any other category, but it has no keywords of its own and cannot be
/// selected directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChallengeCategory {
    Coding,
    Fitness,
    Learning,
    Productivity,
    Mindfulness,
    PersonalDevelopment,
}

impl ChallengeCategory {
    /// Human-readable label, also used in prompts and JSON payloads.
    pub fn label(&self) -> &'static str {
        match self {
            ChallengeCategory::Coding => "coding",
            ChallengeCategory::Fitness => "fitness",
            ChallengeCategory::Learning => "learning",
            ChallengeCategory::Productivity => "productivity",
            ChallengeCategory::Mindfulness => "mindfulness",
            ChallengeCategory::PersonalDevelopment => "personal development",
        }
    }

    /// Parse one of the five selectable category labels (case-insensitive).
    ///
    /// The fallback category is deliberately not parseable: users pick from
    /// the five advertised domains, the bot alone decides when to fall back.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.to_lowercase().as_str() {
            "coding" => Some(ChallengeCategory::Coding),
            "fitness" => Some(ChallengeCategory::Fitness),
            "learning" => Some(ChallengeCategory::Learning),
            "productivity" => Some(ChallengeCategory::Productivity),
            "mindfulness" => Some(ChallengeCategory::Mindfulness),
            _ => None,
        }
    }
}

impl std::fmt::Display for ChallengeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// Iteration order is a contract: the first category with a keyword hit wins,
// so e.g. "workout" is fitness even though it contains productivity's "work".
const CATEGORY_KEYWORDS: &[(ChallengeCategory, &[&str])] = &[
    (
        ChallengeCategory::Coding,
        &["coding", "program", "developer", "programming", "code"],
    ),
    (
        ChallengeCategory::Fitness,
        &["fitness", "exercise", "workout", "gym", "health"],
    ),
    (
        ChallengeCategory::Learning,
        &["learn", "study", "education", "knowledge", "skill"],
    ),
    (
        ChallengeCategory::Productivity,
        &["productivity", "work", "efficient", "task", "organize"],
    ),
    (
        ChallengeCategory::Mindfulness,
        &["mindful", "meditate", "relax", "peace", "calm"],
    ),
];

/// Map free-text input to a challenge category.
///
/// Comparison is case-insensitive substring containment. Every input maps to
/// exactly one category; no keyword hit falls back to
/// [`ChallengeCategory::PersonalDevelopment`].
pub fn match_category(input: &str) -> ChallengeCategory {
    let lowered = input.to_lowercase();
    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|keyword| lowered.contains(keyword)) {
            return *category;
        }
    }
    ChallengeCategory::PersonalDevelopment
}
