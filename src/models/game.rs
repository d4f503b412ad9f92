//! Game round and persisted-state models

use serde::Serialize;

use super::food::ProductInfo;

/// The two games, each with its own high score slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameKind {
    Trends,
    Food,
}

impl GameKind {
    /// Storage key of the high score
    pub fn high_score_key(&self) -> &'static str {
        match self {
            GameKind::Trends => "trendsHighScore",
            GameKind::Food => "foodGameHighScore",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            GameKind::Trends => "Google Trends Guessing Game",
            GameKind::Food => "Food Guessing Game",
        }
    }
}

/// One round of the trends game: whose chart is shown, and the two buttons
#[derive(Debug, Clone, PartialEq)]
pub struct TrendsRound {
    pub correct: String,
    pub wrong: String,
    /// Both words in random order
    pub options: [String; 2],
}

impl TrendsRound {
    pub fn is_correct(&self, guess: &str) -> bool {
        guess == self.correct
    }
}

/// One round of the food game
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FoodRound {
    pub options: [ProductInfo; 2],
}

impl FoodRound {
    /// Barcode of the healthier product; a tie goes to the second option
    pub fn healthier_barcode(&self) -> &str {
        let [a, b] = &self.options;
        if a.eco_score > b.eco_score {
            &a.product.barcode
        } else {
            &b.product.barcode
        }
    }

    pub fn is_correct(&self, guess_barcode: &str) -> bool {
        guess_barcode == self.healthier_barcode()
    }
}
