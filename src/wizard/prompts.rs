//! Prompt templates for the wizard.
//!
//! The product speaks Portuguese; the templates are fixed strings and the
//! relay forwards them untouched.

/// First-step prompt: write a message about the given subject.
pub fn subject_prompt(subject: &str) -> String {
    format!("Escreva uma mensagem sobre {}", subject)
}

/// Follow-up prompt: refine a previous completion according to the user's
/// instruction. The instruction continues the sentence "para que ...", so
/// no punctuation is added between template and instruction.
pub fn refine_prompt(instruction: &str, content: &str) -> String {
    format!("Refine a mensagem abaixo para que {}\n\n{}", instruction, content)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_prompt() {
        assert_eq!(
            subject_prompt("curso de programação"),
            "Escreva uma mensagem sobre curso de programação"
        );
    }

    #[test]
    fn test_refine_prompt() {
        assert_eq!(
            refine_prompt("seja mais agressiva", "Venha fazer o curso!"),
            "Refine a mensagem abaixo para que seja mais agressiva\n\nVenha fazer o curso!"
        );
    }
}
