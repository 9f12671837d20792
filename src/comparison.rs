//! Head-to-head quiz: which of two players has the higher season stat.

use crate::enrich::{ActivePlayer, SeasonStats};
use crate::error::GameError;
use crate::game_state::Progress;
use crate::{debug_log, info_log};
use rand::Rng;
use rand::seq::index;
use std::fmt;

pub const DEFAULT_QUESTIONS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatKind {
    Avg,
    HomeRuns,
    Rbi,
    Runs,
    Hits,
    StolenBases,
    Ops,
    Doubles,
}

impl StatKind {
    pub const ALL: [Self; 8] = [
        Self::Avg,
        Self::HomeRuns,
        Self::Rbi,
        Self::Runs,
        Self::Hits,
        Self::StolenBases,
        Self::Ops,
        Self::Doubles,
    ];

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Avg => "Batting Average",
            Self::HomeRuns => "Home Runs",
            Self::Rbi => "RBIs",
            Self::Runs => "Runs Scored",
            Self::Hits => "Hits",
            Self::StolenBases => "Stolen Bases",
            Self::Ops => "OPS",
            Self::Doubles => "Doubles",
        }
    }

    #[must_use]
    pub fn value(self, stats: &SeasonStats) -> f64 {
        match self {
            Self::Avg => stats.avg,
            Self::HomeRuns => f64::from(stats.home_runs),
            Self::Rbi => f64::from(stats.rbi),
            Self::Runs => f64::from(stats.runs),
            Self::Hits => f64::from(stats.hits),
            Self::StolenBases => f64::from(stats.stolen_bases),
            Self::Ops => stats.ops,
            Self::Doubles => f64::from(stats.doubles),
        }
    }

    /// Rate stats to three places, counting stats as whole numbers.
    #[must_use]
    pub fn format(self, value: f64) -> String {
        match self {
            Self::Avg | Self::Ops => format!("{value:.3}"),
            _ => format!("{value:.0}"),
        }
    }
}

impl fmt::Display for StatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Question {
    pub a: ActivePlayer,
    pub b: ActivePlayer,
    pub stat: StatKind,
}

impl Question {
    #[must_use]
    pub fn values(&self) -> (f64, f64) {
        (self.stat.value(&self.a.stats), self.stat.value(&self.b.stats))
    }

    /// Ties go to A.
    #[must_use]
    pub fn correct_side(&self) -> Side {
        let (a, b) = self.values();
        if a >= b { Side::A } else { Side::B }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Answer {
    pub chosen: Side,
    pub correct: Side,
    pub stat: StatKind,
    pub value_a: String,
    pub value_b: String,
}

impl Answer {
    #[must_use]
    pub fn is_correct(&self) -> bool {
        self.chosen == self.correct
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Performance {
    Excellent,
    Good,
    NotBad,
    RoomForImprovement,
}

impl Performance {
    #[must_use]
    pub fn from_percentage(percentage: u32) -> Self {
        match percentage {
            80.. => Self::Excellent,
            60..=79 => Self::Good,
            40..=59 => Self::NotBad,
            _ => Self::RoomForImprovement,
        }
    }

    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            Self::Excellent => "Excellent work! You really know your baseball stats!",
            Self::Good => "Good job! You have solid knowledge of player stats!",
            Self::NotBad => "Not bad! Keep following the stats to improve!",
            Self::RoomForImprovement => "Room for improvement! Try watching more games!",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ComparisonGame {
    players: Vec<ActivePlayer>,
    max_questions: usize,
    number: usize,
    score: usize,
    question: Option<Question>,
    answered: bool,
    over: bool,
}

impl ComparisonGame {
    /// Start a game and draw the first question.
    ///
    /// # Errors
    /// `GameError::NoPlayers` with fewer than two players.
    pub fn new<R: Rng + ?Sized>(
        players: Vec<ActivePlayer>,
        max_questions: usize,
        rng: &mut R,
    ) -> Result<Self, GameError> {
        if players.len() < 2 {
            return Err(GameError::NoPlayers);
        }
        let mut game = Self {
            players,
            max_questions: max_questions.max(1),
            number: 0,
            score: 0,
            question: None,
            answered: false,
            over: false,
        };
        game.reset(rng);
        Ok(game)
    }

    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.number = 1;
        self.score = 0;
        self.over = false;
        self.draw_question(rng);
    }

    fn draw_question<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let picks = index::sample(rng, self.players.len(), 2);
        let stat = StatKind::ALL[rng.gen_range(0..StatKind::ALL.len())];
        let question = Question {
            a: self.players[picks.index(0)].clone(),
            b: self.players[picks.index(1)].clone(),
            stat,
        };
        debug_log!(
            "Question {}: {} vs {} on {}",
            self.number,
            question.a.name,
            question.b.name,
            stat
        );
        self.question = Some(question);
        self.answered = false;
    }

    /// Answer the current question.
    ///
    /// # Errors
    /// `GameError::GameOver` after the last question and
    /// `GameError::AlreadyAnswered` for a second answer to the same question.
    pub fn answer(&mut self, chosen: Side) -> Result<Answer, GameError> {
        if self.over {
            return Err(GameError::GameOver);
        }
        if self.answered {
            return Err(GameError::AlreadyAnswered);
        }
        let question = self.question.as_ref().ok_or(GameError::GameOver)?;
        let (a, b) = question.values();
        let answer = Answer {
            chosen,
            correct: question.correct_side(),
            stat: question.stat,
            value_a: question.stat.format(a),
            value_b: question.stat.format(b),
        };

        self.answered = true;
        if answer.is_correct() {
            self.score += 1;
        }
        Ok(answer)
    }

    /// Move on. Returns `false` once the last question has been passed.
    pub fn next_question<R: Rng + ?Sized>(&mut self, rng: &mut R) -> bool {
        if self.over {
            return false;
        }
        self.number += 1;
        if self.number > self.max_questions {
            self.over = true;
            self.question = None;
            info_log!("Comparison finished: {}/{}", self.score, self.max_questions);
            return false;
        }
        self.draw_question(rng);
        true
    }

    #[must_use]
    pub fn question(&self) -> Option<&Question> {
        self.question.as_ref()
    }

    #[must_use]
    pub fn progress(&self) -> Progress {
        Progress {
            made: self.number.min(self.max_questions),
            max: self.max_questions,
        }
    }

    #[must_use]
    pub fn score(&self) -> usize {
        self.score
    }

    #[must_use]
    pub fn max_questions(&self) -> usize {
        self.max_questions
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.over
    }

    #[must_use]
    pub fn percentage(&self) -> u32 {
        let pct = (self.score as f64 / self.max_questions as f64 * 100.0).round();
        pct as u32
    }

    #[must_use]
    pub fn performance(&self) -> Performance {
        Performance::from_percentage(self.percentage())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonAction {
    Choose(Side),
    NewGame,
    Exit,
}

pub trait ComparisonInterface {
    fn display_question(&mut self, question: &Question, progress: Progress, score: usize);
    /// `None` means the input was not understood.
    fn read_choice(&mut self) -> Option<ComparisonAction>;
    fn display_answer(&mut self, question: &Question, answer: &Answer);
    fn display_summary(&mut self, score: usize, max: usize, percentage: u32, performance: Performance);
    fn display_error(&mut self, error: &GameError);
    fn display_exit_message(&mut self);
}

fn show_current<I: ComparisonInterface>(game: &ComparisonGame, interface: &mut I) {
    match game.question() {
        Some(question) => interface.display_question(question, game.progress(), game.score()),
        None => interface.display_summary(
            game.score(),
            game.max_questions(),
            game.percentage(),
            game.performance(),
        ),
    }
}

/// Drive a comparison game until the player exits.
pub fn comparison_loop<I: ComparisonInterface, R: Rng + ?Sized>(
    game: &mut ComparisonGame,
    interface: &mut I,
    rng: &mut R,
) {
    show_current(game, interface);
    loop {
        match interface.read_choice() {
            None => {}
            Some(ComparisonAction::Exit) => {
                interface.display_exit_message();
                break;
            }
            Some(ComparisonAction::NewGame) => {
                game.reset(rng);
                show_current(game, interface);
            }
            Some(ComparisonAction::Choose(side)) => match game.answer(side) {
                Ok(answer) => {
                    if let Some(question) = game.question() {
                        interface.display_answer(question, &answer);
                    }
                    game.next_question(rng);
                    show_current(game, interface);
                }
                Err(e) => interface.display_error(&e),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn player(name: &str, home_runs: u32, avg: f64) -> ActivePlayer {
        ActivePlayer {
            id: 0,
            name: name.to_string(),
            team: "NYY".to_string(),
            league: "AL".to_string(),
            stats: SeasonStats {
                avg,
                home_runs,
                ..SeasonStats::default()
            },
        }
    }

    fn players() -> Vec<ActivePlayer> {
        vec![
            player("Aaron Judge", 53, 0.331),
            player("Juan Soto", 41, 0.288),
            player("Cal Raleigh", 60, 0.247),
        ]
    }

    fn rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    #[test]
    fn test_requires_two_players() {
        let one = vec![player("Aaron Judge", 53, 0.331)];
        assert!(matches!(
            ComparisonGame::new(one, 10, &mut rng()),
            Err(GameError::NoPlayers)
        ));
    }

    #[test]
    fn test_questions_use_distinct_players() {
        let mut r = rng();
        let mut game = ComparisonGame::new(players(), 50, &mut r).unwrap();
        loop {
            let q = game.question().unwrap();
            assert_ne!(q.a.name, q.b.name);
            game.answer(Side::A).unwrap();
            if !game.next_question(&mut r) {
                break;
            }
        }
        assert!(game.is_over());
    }

    #[test]
    fn test_correct_side_ties_go_to_a() {
        let q = Question {
            a: player("A", 30, 0.250),
            b: player("B", 30, 0.300),
            stat: StatKind::HomeRuns,
        };
        assert_eq!(q.correct_side(), Side::A);
        let q = Question {
            stat: StatKind::Avg,
            ..q
        };
        assert_eq!(q.correct_side(), Side::B);
    }

    #[test]
    fn test_answer_once_per_question() {
        let mut game = ComparisonGame::new(players(), 10, &mut rng()).unwrap();
        let correct = game.question().unwrap().correct_side();
        let answer = game.answer(correct).unwrap();
        assert!(answer.is_correct());
        assert_eq!(game.score(), 1);
        assert_eq!(game.answer(correct), Err(GameError::AlreadyAnswered));
        assert_eq!(game.score(), 1);
    }

    #[test]
    fn test_game_ends_after_max_questions() {
        let mut r = rng();
        let mut game = ComparisonGame::new(players(), 3, &mut r).unwrap();
        assert_eq!(game.progress().made, 1);
        game.answer(Side::A).unwrap();
        assert!(game.next_question(&mut r));
        game.answer(Side::B).unwrap();
        assert!(game.next_question(&mut r));
        assert_eq!(game.progress().made, 3);
        game.answer(Side::A).unwrap();
        assert!(!game.next_question(&mut r));
        assert!(game.is_over());
        assert!(game.question().is_none());
        assert_eq!(game.answer(Side::A), Err(GameError::GameOver));
    }

    #[test]
    fn test_reset_restarts_score() {
        let mut r = rng();
        let mut game = ComparisonGame::new(players(), 1, &mut r).unwrap();
        let correct = game.question().unwrap().correct_side();
        game.answer(correct).unwrap();
        game.next_question(&mut r);
        assert_eq!(game.percentage(), 100);
        assert_eq!(game.performance(), Performance::Excellent);

        game.reset(&mut r);
        assert_eq!(game.score(), 0);
        assert!(!game.is_over());
        assert!(!game.is_answered());
        assert!(game.question().is_some());
    }

    #[test]
    fn test_stat_formatting() {
        assert_eq!(StatKind::Avg.format(0.3312), "0.331");
        assert_eq!(StatKind::Ops.format(1.0), "1.000");
        assert_eq!(StatKind::HomeRuns.format(53.0), "53");
    }

    #[test]
    fn test_performance_bands() {
        assert_eq!(Performance::from_percentage(80), Performance::Excellent);
        assert_eq!(Performance::from_percentage(60), Performance::Good);
        assert_eq!(Performance::from_percentage(59), Performance::NotBad);
        assert_eq!(Performance::from_percentage(39), Performance::RoomForImprovement);
    }

    #[derive(Default)]
    struct ScriptedChoices {
        actions: Vec<ComparisonAction>,
        events: Vec<String>,
    }

    impl ComparisonInterface for ScriptedChoices {
        fn display_question(&mut self, _question: &Question, progress: Progress, score: usize) {
            self.events.push(format!("q {}/{} score {score}", progress.made, progress.max));
        }

        fn read_choice(&mut self) -> Option<ComparisonAction> {
            if self.actions.is_empty() {
                Some(ComparisonAction::Exit)
            } else {
                Some(self.actions.remove(0))
            }
        }

        fn display_answer(&mut self, _question: &Question, _answer: &Answer) {
            self.events.push("answer".to_string());
        }

        fn display_summary(&mut self, _score: usize, max: usize, _pct: u32, _perf: Performance) {
            self.events.push(format!("summary of {max}"));
        }

        fn display_error(&mut self, error: &GameError) {
            self.events.push(format!("error {error}"));
        }

        fn display_exit_message(&mut self) {
            self.events.push("exit".to_string());
        }
    }

    #[test]
    fn test_loop_runs_to_summary() {
        let mut r = rng();
        let mut game = ComparisonGame::new(players(), 2, &mut r).unwrap();
        let mut ui = ScriptedChoices {
            actions: vec![
                ComparisonAction::Choose(Side::A),
                ComparisonAction::Choose(Side::B),
                ComparisonAction::Choose(Side::A),
            ],
            ..Default::default()
        };
        comparison_loop(&mut game, &mut ui, &mut r);
        assert_eq!(ui.events[0], "q 1/2 score 0");
        assert_eq!(ui.events[1], "answer");
        assert_eq!(ui.events[3], "answer");
        assert_eq!(ui.events[4], "summary of 2");
        assert_eq!(ui.events[5], "error the game is already over");
        assert_eq!(ui.events[6], "exit");
    }
}
