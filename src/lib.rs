pub mod category;
pub mod chat;
pub mod constants;
pub mod gemini;
pub mod library;
pub mod prompt;
pub mod web_server;

use chrono::Local;

/// Seeded assistant greeting shown before any user interaction.
pub const WELCOME_MESSAGE: &str = "👋 Welcome to LPU Challenge Bot! Ready to level up your life? 🚀

I'm your personal growth companion, and I've got some exciting challenges for you:

🧠 Coding - Sharpen your programming skills
💪 Fitness - Get moving and feel amazing
📚 Learning - Expand your knowledge
⏰ Productivity - Boost your efficiency
🧘 Mindfulness - Find your inner peace

Just tell me what interests you, and I'll create a personalized challenge to help you grow! What would you like to tackle today?";

/// Appended in place of a reply whenever a turn fails, regardless of why.
pub const FALLBACK_MESSAGE: &str =
    "I'm having trouble generating a challenge right now. Please try again later.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    User,
    Assistant,
}

impl Origin {
    pub fn as_str(&self) -> &'static str {
        match self {
            Origin::User => "user",
            Origin::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConversationEntry {
    pub timestamp: String,
    pub text: String,
    pub origin: Origin,
}

/// The rendered transcript: an append-only sequence of entries.
///
/// Entries are never reordered or mutated once appended; the sequence is the
/// entire conversation state and lives only as long as the session.
#[derive(Debug)]
pub struct Conversation {
    entries: Vec<ConversationEntry>,
}

impl Conversation {
    /// A fresh conversation, pre-seeded with the welcome message.
    pub fn new() -> Self {
        let mut conversation = Self { entries: Vec::new() };
        conversation.append(Origin::Assistant, WELCOME_MESSAGE.to_string());
        conversation
    }

    pub fn append(&mut self, origin: Origin, text: String) {
        let timestamp = Local::now().format("%H:%M:%S").to_string();
        self.entries.push(ConversationEntry {
            timestamp,
            text,
            origin,
        });
    }

    pub fn entries(&self) -> &[ConversationEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
