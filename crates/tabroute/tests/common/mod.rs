//! Shared fakes and builders for integration tests.

#![allow(dead_code)]

pub mod builders;

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use tabroute::{ModelClient, ModelError, Prompt, PromptStore, PromptStoreError};

enum FakeBehavior {
    Respond(String),
    Fail(String),
}

/// Model client fake that records every call and returns a canned
/// response or a transport failure.
pub struct FakeModelClient {
    behavior: FakeBehavior,
    calls: AtomicUsize,
    last_prompt: Mutex<Option<String>>,
}

impl FakeModelClient {
    pub fn responding(response: &str) -> Self {
        Self {
            behavior: FakeBehavior::Respond(response.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn failing(message: &str) -> Self {
        Self {
            behavior: FakeBehavior::Fail(message.to_string()),
            calls: AtomicUsize::new(0),
            last_prompt: Mutex::new(None),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.last_prompt.lock().unwrap().clone()
    }
}

impl ModelClient for FakeModelClient {
    fn complete(&self, prompt: &str) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_prompt.lock().unwrap() = Some(prompt.to_string());
        match &self.behavior {
            FakeBehavior::Respond(r) => Ok(r.clone()),
            FakeBehavior::Fail(m) => Err(ModelError::Transport(m.clone())),
        }
    }
}

/// Prompt store fake holding active prompts in a map.
pub struct InMemoryPromptStore {
    prompts: HashMap<(String, String), Prompt>,
}

impl InMemoryPromptStore {
    pub fn empty() -> Self {
        Self {
            prompts: HashMap::new(),
        }
    }

    pub fn with_ingestion_prompt(text: &str) -> Self {
        let mut store = Self::empty();
        store.set_active("ingestion", "system", text);
        store
    }

    pub fn set_active(&mut self, role: &str, prompt_type: &str, text: &str) {
        self.prompts.insert(
            (role.to_string(), prompt_type.to_string()),
            Prompt {
                agent_role: role.to_string(),
                prompt_type: prompt_type.to_string(),
                prompt_text: text.to_string(),
                version: 1,
                is_active: true,
                created_at: "2026-01-01T00:00:00Z".to_string(),
            },
        );
    }
}

impl PromptStore for InMemoryPromptStore {
    fn get_active(
        &self,
        agent_role: &str,
        prompt_type: &str,
    ) -> Result<Option<Prompt>, PromptStoreError> {
        Ok(self
            .prompts
            .get(&(agent_role.to_string(), prompt_type.to_string()))
            .cloned())
    }
}
