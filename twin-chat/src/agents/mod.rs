pub mod greeter;
pub mod responder;
pub mod retriever;
