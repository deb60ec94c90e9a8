//! System prompt assembly for support turns.

use crate::types::Topic;

/// Restriction appended when a turn is scoped to education support.
const EDUCATION_CLAUSE: &str =
    "You must only answer questions and provide support related to education, \
     learning, courses, studying, or academic help. \
     If a user asks about anything else, politely redirect them to stay on education topics.";

/// Restriction appended when a turn is scoped to e-commerce support.
const ECOMMERCE_CLAUSE: &str =
    "You must only answer questions and provide support related to e-commerce, \
     shopping, orders, products, account info, or delivery. \
     If a user asks about anything else, politely redirect them to stay on shopping/delivery topics.";

/// Builds the system prompt for each turn from base instructions and topic.
#[derive(Debug, Clone)]
pub struct PromptBuilder {
    /// Persona instructions sent on every turn.
    base_instructions: String,
}

impl PromptBuilder {
    /// Create a prompt builder over the configured base instructions.
    pub fn new(base_instructions: impl Into<String>) -> Self {
        Self {
            base_instructions: base_instructions.into(),
        }
    }

    /// Build the system prompt for a single turn.
    ///
    /// A topic appends its restriction clause on a new line; without one the
    /// base instructions go out unchanged.
    pub fn system_prompt(&self, topic: Option<Topic>) -> String {
        match topic {
            Some(topic) => format!("{}\n{}", self.base_instructions, clause_for(topic)),
            None => self.base_instructions.clone(),
        }
    }
}

/// Restriction clause text for a topic.
fn clause_for(topic: Topic) -> &'static str {
    match topic {
        Topic::Education => EDUCATION_CLAUSE,
        Topic::Ecommerce => ECOMMERCE_CLAUSE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Without a topic the base instructions go out untouched.
    #[test]
    fn bare_prompt_is_base_instructions() {
        let builder = PromptBuilder::new("Be helpful.");
        assert_eq!(builder.system_prompt(None), "Be helpful.");
    }

    /// An education turn appends the education clause on its own line.
    #[test]
    fn education_topic_appends_clause() {
        let builder = PromptBuilder::new("Be helpful.");
        let prompt = builder.system_prompt(Some(Topic::Education));
        assert_eq!(prompt, format!("Be helpful.\n{EDUCATION_CLAUSE}"));
        assert!(prompt.ends_with("stay on education topics."));
    }

    /// An e-commerce turn appends the shopping clause on its own line.
    #[test]
    fn ecommerce_topic_appends_clause() {
        let builder = PromptBuilder::new("Be helpful.");
        let prompt = builder.system_prompt(Some(Topic::Ecommerce));
        assert_eq!(prompt, format!("Be helpful.\n{ECOMMERCE_CLAUSE}"));
        assert!(prompt.ends_with("stay on shopping/delivery topics."));
    }
}
