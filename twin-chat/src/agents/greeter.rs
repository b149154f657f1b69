// Greeter Agent: canned replies for bare greetings

use rand::seq::SliceRandom;
use rand::Rng;

const GREETINGS: [&str; 5] = ["hi", "hello", "hey", "hola", "greetings"];

pub const GREETING_REPLIES: [&str; 5] = [
    "Hello! Catherine's having a productive day working on her digital twin project. She's been fine-tuning the RAG architecture and optimizing the vector database queries. How can I help you learn more about her?",
    "Hi there! Catherine spent her morning debugging some Python code and attending a JPCS meeting this afternoon. She's always excited to talk about AI and web development. What would you like to know?",
    "Hey! Catherine's been busy today with her coursework and student government duties. She just finished optimizing the chatbot's response time. Feel free to ask about her skills, projects, or experience!",
    "Hello! It's been a great day for Catherine - she's been working on enhancing this AI assistant and practicing for upcoming interviews. What can I tell you about her background?",
    "Hi! Catherine's day has been filled with coding and collaboration. She's been exploring new features for CatheTwin while balancing her leadership roles at SPUP. What would you like to know about her?",
];

pub struct GreeterAgent;

impl GreeterAgent {
    pub fn new() -> Self {
        Self
    }

    /// Exact match after trimming and lower-casing; "hi there" is not a greeting.
    pub fn is_greeting(&self, message: &str) -> bool {
        let normalized = message.trim().to_lowercase();
        GREETINGS.contains(&normalized.as_str())
    }

    pub fn reply<R: Rng + ?Sized>(&self, rng: &mut R) -> &'static str {
        GREETING_REPLIES
            .choose(rng)
            .copied()
            .unwrap_or(GREETING_REPLIES[0])
    }
}
