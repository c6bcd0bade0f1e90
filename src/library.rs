//! Built-in challenge library: a static fallback source of curated one-line
//! challenges, independent of the generation API.

use chrono::NaiveDate;
use rand::seq::IndexedRandom;
use sha2::{Digest, Sha256};

use crate::category::ChallengeCategory;

const LIBRARY: &[(ChallengeCategory, &[&str])] = &[
    (
        ChallengeCategory::Coding,
        &[
            "Implement a simple calculator CLI in your favorite language.",
            "Write a program to reverse a string using recursion.",
            "Build a basic stack from scratch and test push/pop edge cases.",
            "Refactor one function in a side project until it needs no comments.",
            "Solve one algorithm puzzle without looking at the hints.",
        ],
    ),
    (
        ChallengeCategory::Fitness,
        &[
            "Do a 15-minute full-body workout.",
            "Take a 20-minute walk after dinner.",
            "Try a 7-minute HIIT session.",
            "Do 30 squats, 20 push-ups, and 10 burpees.",
            "Stretch for 10 minutes before bed.",
        ],
    ),
    (
        ChallengeCategory::Learning,
        &[
            "Read 10 pages of a book on a topic you know nothing about.",
            "Watch one lecture from a free online course and take notes.",
            "Summarize something you learned today in three sentences.",
            "Learn five new words in a language you're studying.",
            "Teach a concept you recently learned to someone else.",
        ],
    ),
    (
        ChallengeCategory::Productivity,
        &[
            "Plan your day the night before.",
            "Work in three 25-minute focus blocks with short breaks.",
            "Clear your inbox to zero before lunch.",
            "Write down your top three priorities and finish the first one.",
            "Avoid social media for 2 hours.",
        ],
    ),
    (
        ChallengeCategory::Mindfulness,
        &[
            "Write in a gratitude journal.",
            "Meditate for 10 minutes without your phone nearby.",
            "Take five deep breaths before every meeting today.",
            "Spend 15 minutes outside without headphones.",
            "Do one routine task in complete silence, paying full attention.",
        ],
    ),
];

/// The curated challenges for a category, or `None` for the fallback
/// category, which has no library entries.
pub fn challenges_for(category: ChallengeCategory) -> Option<&'static [&'static str]> {
    LIBRARY
        .iter()
        .find(|(c, _)| *c == category)
        .map(|(_, challenges)| *challenges)
}

/// A uniformly random challenge from the category's list.
pub fn random_challenge(category: ChallengeCategory) -> Option<&'static str> {
    challenges_for(category)?.choose(&mut rand::rng()).copied()
}

/// Today's challenge of the day. Deterministic: everyone gets the same
/// challenge on the same date, across processes and restarts.
pub fn daily_challenge() -> &'static str {
    daily_challenge_on(chrono::Local::now().date_naive())
}

/// Challenge of the day for a specific date.
pub fn daily_challenge_on(date: NaiveDate) -> &'static str {
    let all: Vec<&'static str> = LIBRARY
        .iter()
        .flat_map(|(_, challenges)| challenges.iter().copied())
        .collect();
    let digest = Sha256::digest(date.format("%Y-%m-%d").to_string().as_bytes());
    // Digest as a big-endian integer modulo the table length, reduced
    // byte-by-byte to avoid big-integer arithmetic.
    let index = digest
        .iter()
        .fold(0usize, |acc, byte| (acc * 256 + *byte as usize) % all.len());
    all[index]
}
