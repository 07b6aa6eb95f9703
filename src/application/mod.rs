// Application layer - Use cases and the ports they depend on
pub mod page_transport;
pub mod publish_service;
pub mod sample_source;
pub mod site;
