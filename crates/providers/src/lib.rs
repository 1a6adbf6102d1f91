//! Model backend gateway implementations for Wayfarer.
//!
//! All providers implement the `wayfarer_core::Provider` trait. The only
//! shipped backend is Ollama's native chat API; the orchestration loop
//! never knows which implementation sits behind the trait.

pub mod ollama;

pub use ollama::OllamaProvider;
