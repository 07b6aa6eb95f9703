// Domain layer - Pages, cards and the data they plot
pub mod card;
pub mod data_buffer;
pub mod error;
pub mod page;
pub mod plot;
pub mod sample;
