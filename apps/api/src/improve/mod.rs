// Resume improvement: validates the submitted resume, builds a tool-specific
// prompt pair and relays the generation backend's stream to the client.
// All backend calls go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod tools;
