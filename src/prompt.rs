//! Construction of the instruction prompt sent to the generation API.

use crate::category::ChallengeCategory;

/// Render the coach-persona instruction for one user turn.
///
/// The user's text is embedded verbatim; any escaping needed for transport is
/// the HTTP client's concern. Output is deterministic for a given input and
/// category.
pub fn build_prompt(input: &str, category: ChallengeCategory) -> String {
    format!(
        r#"Act as an enthusiastic {} coach/mentor. Based on the user's request: "{}", create an exciting and personalized challenge that:
1. Is specific and actionable
2. Can be completed in a reasonable timeframe
3. Includes clear steps or instructions
4. Provides helpful tips or resources
5. Adds an optional bonus challenge

Make it engaging and motivating, using appropriate emojis and clear formatting. Consider the user's interests and skill level based on their request.

If they mention specific interests or constraints, incorporate those into the challenge.
If they don't specify details, create a balanced challenge suitable for an intermediate level.

Start with an encouraging intro and end with a motivational closing!"#,
        category.label(),
        input
    )
}
