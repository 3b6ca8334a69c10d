pub mod cleaner;
pub mod core;
pub mod instructions;
pub mod openrouter;
pub mod prompter;
