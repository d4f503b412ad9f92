//! Round building for both guessing games, plus score keeping.
//!
//! The HTTP routes only use the round builders. [`GameSession`] is for
//! embedding clients that run the game loop themselves, backed by any
//! [`ScoreStore`].

use rand::seq::{index, SliceRandom};
use rand::Rng;
use tracing::info;

use crate::api::open_food_facts::OpenFoodFactsClient;
use crate::models::{FoodRound, GameKind, Product, TrendsRound};
use crate::services::food_service;
use crate::utils::errors::GameError;
use crate::utils::score_store::ScoreStore;

/// Two items at distinct positions of `items`
pub fn pick_two_distinct<'a, T, R: Rng + ?Sized>(
    items: &'a [T],
    rng: &mut R,
) -> Result<(&'a T, &'a T), GameError> {
    if items.len() < 2 {
        return Err(GameError::NotEnoughItems(items.len()));
    }
    let picked = index::sample(rng, items.len(), 2);
    Ok((&items[picked.index(0)], &items[picked.index(1)]))
}

/// The first picked word is the one whose chart is shown
pub fn new_trends_round<R: Rng + ?Sized>(words: &[String], rng: &mut R) -> Result<TrendsRound, GameError> {
    let (correct, wrong) = pick_two_distinct(words, rng)?;

    let mut options = [correct.clone(), wrong.clone()];
    options.shuffle(rng);

    Ok(TrendsRound {
        correct: correct.clone(),
        wrong: wrong.clone(),
        options,
    })
}

pub fn pick_food_pair<R: Rng + ?Sized>(products: &[Product], rng: &mut R) -> Result<[Product; 2], GameError> {
    let (a, b) = pick_two_distinct(products, rng)?;
    Ok([a.clone(), b.clone()])
}

/// Resolve both EcoScores concurrently
pub async fn resolve_food_round(client: &OpenFoodFactsClient, pair: [Product; 2], user_id: &str) -> FoodRound {
    let [a, b] = pair;
    let (a, b) = futures::join!(
        food_service::resolve_product(client, a, user_id),
        food_service::resolve_product(client, b, user_id)
    );
    FoodRound { options: [a, b] }
}

/// What a guess did to the session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessOutcome {
    /// Score went up, play the next round
    Continue,
    /// Wrong guess, the session is over
    GameOver,
}

/// Score keeping for one player of one game
pub struct GameSession<S: ScoreStore> {
    kind: GameKind,
    store: S,
    score: u32,
    high_score: u32,
    game_over: bool,
}

impl<S: ScoreStore> GameSession<S> {
    pub fn new(kind: GameKind, store: S) -> Self {
        let high_score = store.high_score(kind);
        Self {
            kind,
            store,
            score: 0,
            high_score,
            game_over: false,
        }
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn high_score(&self) -> u32 {
        self.high_score
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Guesses after game over are ignored until [`restart`](Self::restart)
    pub fn record_guess(&mut self, correct: bool) -> GuessOutcome {
        if self.game_over {
            return GuessOutcome::GameOver;
        }

        if correct {
            self.score += 1;
            GuessOutcome::Continue
        } else {
            self.end_game();
            GuessOutcome::GameOver
        }
    }

    fn end_game(&mut self) {
        self.game_over = true;

        if self.score > self.high_score {
            info!("New {:?} high score: {}", self.kind, self.score);
            self.high_score = self.score;
            self.store.set_high_score(self.kind, self.score);
        }
    }

    pub fn restart(&mut self) {
        self.score = 0;
        self.game_over = false;
    }

    pub fn share_text(&self) -> String {
        format!(
            "I scored {} points in the {}! Can you beat me?",
            self.score,
            self.kind.title()
        )
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
