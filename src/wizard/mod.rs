//! # Wizard workflow
//!
//! The linear copywriting workflow: collect a subject, show the generated
//! message, and iteratively refine it. The whole thing is a small state
//! machine over ephemeral, in-memory state:
//!
//! ```text
//! subject → submit_subject → messages[0] → reveal_refine → submit_refine → messages[1] → ...
//! ```
//!
//! Generation goes through the [`Generator`] seam so the workflow can be
//! driven without a network. Failures during generation are logged and
//! otherwise swallowed: the user only ever observes the absence of a new
//! message and the loading flag clearing.

pub mod prompts;

use async_trait::async_trait;
use tracing::error;

/// One in-flight-capable generation backend.
#[async_trait]
pub trait Generator: Send + Sync {
    /// Sends a prompt and returns the generated text, or `None` when the
    /// backend produced no usable text.
    async fn generate(&self, prompt: &str) -> anyhow::Result<Option<String>>;
}

/// A generated message. `content` is immutable once appended; the list of
/// messages only ever grows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub content: String,
}

/// Coarse wizard progress. Monotonically non-decreasing within a session:
/// once `Reviewing`, never back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    CollectingSubject,
    Reviewing,
}

/// Which input field currently has keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputField {
    Subject,
    Refine,
}

pub struct Wizard<G> {
    generator: G,
    subject: String,
    refine_instruction: String,
    loading: bool,
    messages: Vec<Message>,
    // At most one refine panel is open at a time; an optional index makes
    // the exclusivity structural instead of a per-message flag to re-clear.
    active_refine: Option<usize>,
    step: Step,
}

impl<G: Generator> Wizard<G> {
    pub fn new(generator: G) -> Self {
        Self {
            generator,
            subject: String::new(),
            refine_instruction: String::new(),
            loading: false,
            messages: Vec::new(),
            active_refine: None,
            step: Step::CollectingSubject,
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Whether message `ix`'s refine panel is open.
    pub fn shows_refine(&self, ix: usize) -> bool {
        self.active_refine == Some(ix)
    }

    /// Mirrors the subject input; editable only while collecting.
    pub fn set_subject(&mut self, subject: impl Into<String>) {
        if self.step == Step::CollectingSubject {
            self.subject = subject.into();
        }
    }

    /// Mirrors the refine instruction input.
    pub fn set_refine_instruction(&mut self, instruction: impl Into<String>) {
        self.refine_instruction = instruction.into();
    }

    /// Transition 1: submit the subject and generate the first message.
    ///
    /// A no-op unless collecting, the subject is non-empty and nothing is
    /// in flight. On success the wizard advances to `Reviewing`, locking
    /// the subject for the rest of the session.
    pub async fn submit_subject(&mut self) {
        if self.step != Step::CollectingSubject || self.subject.is_empty() || self.loading {
            return;
        }

        let prompt = prompts::subject_prompt(&self.subject);
        if self.generate(prompt).await {
            self.step = Step::Reviewing;
        }
    }

    /// Transition 2: open the refine panel on message `ix`, closing every
    /// other panel.
    pub fn reveal_refine(&mut self, ix: usize) {
        if ix < self.messages.len() {
            self.active_refine = Some(ix);
        }
    }

    /// Transition 3: close all refine panels.
    pub fn cancel_refine(&mut self) {
        self.active_refine = None;
    }

    /// Transition 4: refine message `ix` according to the current
    /// instruction. The original message is retained; the refined text is
    /// appended as a new message. Clears the instruction and closes the
    /// panels whether or not generation produced anything.
    pub async fn submit_refine(&mut self, ix: usize) {
        if self.refine_instruction.is_empty() || self.loading {
            return;
        }
        let Some(content) = self.messages.get(ix).map(|m| m.content.clone()) else {
            return;
        };

        let prompt = prompts::refine_prompt(&self.refine_instruction, &content);
        self.generate(prompt).await;
        self.refine_instruction.clear();
        self.cancel_refine();
    }

    /// Transition 5: the primary activation key without a modifier held
    /// dispatches to the submit matching the focused field. Not a separate
    /// code path, just a dispatcher.
    pub async fn key_submit(&mut self, field: InputField, modifier_held: bool) {
        if modifier_held {
            return;
        }
        match field {
            InputField::Subject => self.submit_subject().await,
            InputField::Refine => {
                if let Some(ix) = self.active_refine {
                    self.submit_refine(ix).await;
                }
            }
        }
    }

    /// Runs one generation, appending the result when it is non-empty.
    /// Returns whether a message was appended. `loading` is raised for the
    /// duration of the call and cleared on every path.
    async fn generate(&mut self, prompt: String) -> bool {
        self.loading = true;
        let appended = match self.generator.generate(&prompt).await {
            Ok(Some(text)) if !text.is_empty() => {
                self.messages.push(Message { content: text });
                true
            }
            // An empty completion is not an error; the list is simply not
            // appended to.
            Ok(_) => false,
            Err(err) => {
                error!("generation failed: {:#}", err);
                false
            }
        };
        self.loading = false;
        appended
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockGenerator {
        calls: AtomicUsize,
        prompts: Mutex<Vec<String>>,
        response: Option<String>,
        fail: bool,
    }

    impl MockGenerator {
        fn returning(text: &str) -> Self {
            Self { response: Some(text.to_string()), ..Self::default() }
        }

        fn failing() -> Self {
            Self { fail: true, ..Self::default() }
        }
    }

    #[async_trait]
    impl Generator for &MockGenerator {
        async fn generate(&self, prompt: &str) -> anyhow::Result<Option<String>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                anyhow::bail!("connection refused");
            }
            Ok(self.response.clone())
        }
    }

    #[tokio::test]
    async fn subject_submit_synthesizes_prompt_and_advances() {
        let generator = MockGenerator::returning("Aprenda a programar hoje!");
        let mut wizard = Wizard::new(&generator);

        wizard.set_subject("curso de programação");
        wizard.submit_subject().await;

        assert_eq!(
            generator.prompts.lock().unwrap().as_slice(),
            ["Escreva uma mensagem sobre curso de programação"]
        );
        assert_eq!(wizard.messages(), [Message { content: "Aprenda a programar hoje!".into() }]);
        assert_eq!(wizard.step(), Step::Reviewing);
        assert!(!wizard.is_loading());
    }

    #[tokio::test]
    async fn step_never_reverts_and_subject_is_locked() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);

        wizard.set_subject("café");
        wizard.submit_subject().await;
        assert_eq!(wizard.step(), Step::Reviewing);

        // Subject edits and re-submits are dead after the first success.
        wizard.set_subject("chá");
        wizard.submit_subject().await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert_eq!(wizard.step(), Step::Reviewing);
    }

    #[tokio::test]
    async fn empty_subject_is_a_noop() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);

        wizard.submit_subject().await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(wizard.step(), Step::CollectingSubject);
    }

    #[tokio::test]
    async fn in_flight_guard_blocks_both_submits() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);
        wizard.set_subject("café");
        wizard.set_refine_instruction("seja curta");
        wizard.messages.push(Message { content: "prévia".into() });

        wizard.loading = true;
        wizard.submit_subject().await;
        wizard.submit_refine(0).await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn generation_failure_is_swallowed() {
        let generator = MockGenerator::failing();
        let mut wizard = Wizard::new(&generator);

        wizard.set_subject("café");
        wizard.submit_subject().await;

        assert!(wizard.messages().is_empty());
        assert!(!wizard.is_loading());
        // No message appeared, so the wizard is still collecting.
        assert_eq!(wizard.step(), Step::CollectingSubject);
    }

    #[tokio::test]
    async fn empty_completion_is_not_appended() {
        let generator = MockGenerator::returning("");
        let mut wizard = Wizard::new(&generator);

        wizard.set_subject("café");
        wizard.submit_subject().await;

        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
        assert!(wizard.messages().is_empty());
        assert!(!wizard.is_loading());
    }

    #[tokio::test]
    async fn reveal_refine_is_exclusive() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);
        wizard.messages.push(Message { content: "a".into() });
        wizard.messages.push(Message { content: "b".into() });

        wizard.reveal_refine(0);
        assert!(wizard.shows_refine(0));

        wizard.reveal_refine(1);
        assert!(!wizard.shows_refine(0));
        assert!(wizard.shows_refine(1));

        wizard.cancel_refine();
        assert!(!wizard.shows_refine(0));
        assert!(!wizard.shows_refine(1));
    }

    #[tokio::test]
    async fn refine_appends_and_retains_the_original() {
        let generator = MockGenerator::returning("versão refinada");
        let mut wizard = Wizard::new(&generator);
        wizard.messages.push(Message { content: "versão original".into() });
        wizard.reveal_refine(0);
        wizard.set_refine_instruction("seja mais agressiva");

        wizard.submit_refine(0).await;

        assert_eq!(
            generator.prompts.lock().unwrap().as_slice(),
            ["Refine a mensagem abaixo para que seja mais agressiva\n\nversão original"]
        );
        assert_eq!(
            wizard.messages(),
            [
                Message { content: "versão original".into() },
                Message { content: "versão refinada".into() },
            ]
        );
        assert!(wizard.refine_instruction.is_empty());
        assert!(!wizard.shows_refine(0));
        assert!(!wizard.shows_refine(1));
    }

    #[tokio::test]
    async fn refine_without_instruction_is_a_noop() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);
        wizard.messages.push(Message { content: "a".into() });

        wizard.submit_refine(0).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);
        assert_eq!(wizard.messages().len(), 1);
    }

    #[tokio::test]
    async fn key_submit_dispatches_by_focused_field() {
        let generator = MockGenerator::returning("ok");
        let mut wizard = Wizard::new(&generator);
        wizard.set_subject("café");

        // A modifier-held activation does nothing.
        wizard.key_submit(InputField::Subject, true).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 0);

        wizard.key_submit(InputField::Subject, false).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);

        wizard.reveal_refine(0);
        wizard.set_refine_instruction("inclua uma oferta");
        wizard.key_submit(InputField::Refine, false).await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), 2);
        assert_eq!(wizard.messages().len(), 2);
    }
}
