// Page domain model
use super::card::Card;
use super::data_buffer::DataBuffer;
use super::error::PageError;
use super::sample::DataPoint;

/// Handle to a card on a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardRef {
    pub key: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    pub route: String,
    cards: Vec<(String, Card)>,
}

impl Page {
    pub fn new(route: impl Into<String>) -> Result<Self, PageError> {
        let route = route.into();
        if !route.starts_with('/') {
            return Err(PageError::InvalidRoute(route));
        }
        Ok(Self {
            route,
            cards: Vec::new(),
        })
    }

    pub fn add(&mut self, key: impl Into<String>, card: Card) -> Result<CardRef, PageError> {
        let key = key.into();
        if self.card(&key).is_some() {
            return Err(PageError::DuplicateKey(key));
        }
        self.cards.push((key.clone(), card));
        Ok(CardRef { key })
    }

    pub fn remove(&mut self, key: &str) -> Result<Card, PageError> {
        let idx = self
            .cards
            .iter()
            .position(|(k, _)| k == key)
            .ok_or_else(|| PageError::UnknownCard(key.to_string()))?;
        Ok(self.cards.remove(idx).1)
    }

    pub fn card(&self, key: &str) -> Option<&Card> {
        self.cards.iter().find(|(k, _)| k == key).map(|(_, c)| c)
    }

    /// Cards in insertion order
    pub fn cards(&self) -> impl Iterator<Item = (&str, &Card)> {
        self.cards.iter().map(|(k, c)| (k.as_str(), c))
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Replace the card's data buffer contents
    pub fn set_data(&mut self, card: &CardRef, rows: Vec<DataPoint>) -> Result<(), PageError> {
        self.buffer_mut(&card.key)?.replace(rows)
    }

    pub fn push_data(&mut self, card: &CardRef, row: DataPoint) -> Result<(), PageError> {
        self.buffer_mut(&card.key)?.push(row)
    }

    fn buffer_mut(&mut self, key: &str) -> Result<&mut DataBuffer, PageError> {
        let card = self
            .cards
            .iter_mut()
            .find(|(k, _)| k == key)
            .map(|(_, c)| c)
            .ok_or_else(|| PageError::UnknownCard(key.to_string()))?;

        card.data_mut()
            .ok_or_else(|| PageError::NoDataBuffer(key.to_string()))
    }
}
