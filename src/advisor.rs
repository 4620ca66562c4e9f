//! Advice for a live table: what to do with the hand in front of the player,
//! and how to size the wagers given the latest EV report.
//!
//! Play advice starts from [`BasicStrategy`] and adds pair splitting,
//! insurance and true-count index plays on top of it.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

use crate::card::{Card, Rank};
use crate::hand::{evaluate, HandValue};
use crate::simulation::dealer_outcome::{DealerFinal, DealerOutcomes};
use crate::simulation::EvReport;
use crate::strategy::{BasicStrategy, Decision, Strategy};

/// Hard-total deviations from basic strategy. Each one stands once the true
/// count reaches its threshold and hits below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(Display, EnumIter, Serialize, Deserialize)]
pub enum IndexPlay {
    #[serde(rename = "16v10")]
    #[strum(serialize = "16v10")]
    SixteenVsTen,
    #[serde(rename = "15v10")]
    #[strum(serialize = "15v10")]
    FifteenVsTen,
    #[serde(rename = "13v2")]
    #[strum(serialize = "13v2")]
    ThirteenVsTwo,
    #[serde(rename = "12v2")]
    #[strum(serialize = "12v2")]
    TwelveVsTwo,
    #[serde(rename = "12v3")]
    #[strum(serialize = "12v3")]
    TwelveVsThree,
}

impl IndexPlay {
    fn from_situation(value: HandValue, dealer_up_value: u8) -> Option<IndexPlay> {
        if value.soft {
            return None;
        }
        match (value.total, dealer_up_value) {
            (16, 10) => Some(IndexPlay::SixteenVsTen),
            (15, 10) => Some(IndexPlay::FifteenVsTen),
            (13, 2) => Some(IndexPlay::ThirteenVsTwo),
            (12, 2) => Some(IndexPlay::TwelveVsTwo),
            (12, 3) => Some(IndexPlay::TwelveVsThree),
            _ => None,
        }
    }
}

/// True-count thresholds per index play. A play missing from the map falls
/// back to basic strategy.
pub type IndexPlays = BTreeMap<IndexPlay, f64>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    pub insurance_threshold: f64,
    pub index_plays: IndexPlays,
    /// The main bet is worth raising once its EV is above this.
    pub main_ev_threshold: f64,
    pub side_bet_threshold: f64,
    pub dealer_bust_alert: f64,
    pub dealer_bust_floor: f64,
    pub kelly_enabled: bool,
    pub kelly_risk: f64,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        use IndexPlay as I;

        AdvisorConfig {
            insurance_threshold: 3.0,
            index_plays: BTreeMap::from([
                (I::SixteenVsTen, 0.0),
                (I::FifteenVsTen, 4.0),
                (I::ThirteenVsTwo, -1.0),
                (I::TwelveVsTwo, 3.0),
                (I::TwelveVsThree, 3.0),
            ]),
            main_ev_threshold: 0.0,
            side_bet_threshold: 0.0,
            dealer_bust_alert: 0.35,
            dealer_bust_floor: 0.15,
            kelly_enabled: false,
            kelly_risk: 1.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advice {
    /// Fewer than two player cards.
    AwaitingInput,
    Blackjack,
    Insurance { take: bool },
    Split,
    Play(Decision),
    /// A count-driven deviation from basic strategy.
    IndexPlay(IndexPlay, Decision),
}

fn decision_label(decision: Decision) -> &'static str {
    match decision {
        Decision::Hit => "Hit",
        Decision::Stand => "Stand",
        Decision::Double => "Double",
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advice::AwaitingInput => write!(f, "Awaiting full input"),
            Advice::Blackjack => write!(f, "Blackjack!"),
            Advice::Insurance { take: true } => write!(f, "Insurance: Take it"),
            Advice::Insurance { take: false } => write!(f, "Insurance: Decline"),
            Advice::Split => write!(f, "Split"),
            Advice::Play(decision) => write!(f, "{}", decision_label(*decision)),
            Advice::IndexPlay(play, decision) => {
                write!(f, "{} (index play {})", decision_label(*decision), play)
            }
        }
    }
}

fn should_split(rank: Rank, dealer_up_value: u8) -> bool {
    match rank {
        Rank::Ace | Rank::Eight => true,
        Rank::Nine => !matches!(dealer_up_value, 7 | 10 | 11),
        Rank::Seven | Rank::Three | Rank::Two => dealer_up_value <= 7,
        Rank::Six => dealer_up_value <= 6,
        Rank::Four => matches!(dealer_up_value, 5 | 6),
        _ => false,
    }
}

/// Recommends an action for the player's `hand` against `up_card`.
///
/// Checks run in order: natural, insurance against an ace, pair splitting,
/// index plays, then basic strategy. Insurance, splits and doubles are only
/// offered on the initial two cards.
pub fn recommend_action(
    hand: &[Card],
    up_card: Card,
    true_count: f64,
    config: &AdvisorConfig,
) -> Advice {
    if hand.len() < 2 {
        return Advice::AwaitingInput;
    }

    let value = evaluate(hand);
    let first_decision = hand.len() == 2;
    let dealer_up_value = up_card.blackjack_value();

    if first_decision {
        if value.total == 21 {
            return Advice::Blackjack;
        }
        if up_card.rank == Rank::Ace {
            return Advice::Insurance {
                take: true_count >= config.insurance_threshold,
            };
        }
        if hand[0].rank == hand[1].rank && should_split(hand[0].rank, dealer_up_value) {
            return Advice::Split;
        }
    }

    if let Some(play) = IndexPlay::from_situation(value, dealer_up_value) {
        if let Some(&threshold) = config.index_plays.get(&play) {
            let decision = if true_count >= threshold {
                Decision::Stand
            } else {
                Decision::Hit
            };
            return Advice::IndexPlay(play, decision);
        }
    }

    let decision = BasicStrategy::new().make_decision(value, dealer_up_value, first_decision);
    Advice::Play(decision)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum SideBet {
    #[strum(serialize = "21+3")]
    TwentyOnePlusThree,
    #[strum(serialize = "Perfect Pair")]
    PerfectPair,
    #[strum(serialize = "Hot 3")]
    HotThree,
    #[strum(serialize = "Bust-O-Rama")]
    BustORama,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SideBetAdvice {
    pub bet: SideBet,
    pub ev: f64,
    pub profitable: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BustAlert {
    High,
    Low,
}

/// Betting advice drawn from one EV report.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    pub main_ev: f64,
    pub increase_bet: bool,
    /// Fraction of the bankroll to wager, when Kelly sizing is enabled and
    /// the main bet has an edge.
    pub kelly_fraction: Option<f64>,
    pub side_bets: Vec<SideBetAdvice>,
    /// Insurance is worth taking if the dealer shows an ace.
    pub take_insurance: bool,
    pub dealer_bust_probability: Option<f64>,
    pub dealer_bust_alert: Option<BustAlert>,
}

pub fn recommend(
    report: &EvReport,
    true_count: f64,
    outcomes: Option<&DealerOutcomes>,
    config: &AdvisorConfig,
) -> Recommendation {
    let main_ev = report.main_ev;
    let kelly_fraction = if config.kelly_enabled && main_ev > 0.0 {
        Some(main_ev / (config.kelly_risk * config.kelly_risk))
    } else {
        None
    };

    let side_bets = [
        (SideBet::TwentyOnePlusThree, report.twenty_one_plus_three_ev),
        (SideBet::PerfectPair, report.pair_ev),
        (SideBet::HotThree, report.hot_three_ev),
        (SideBet::BustORama, report.bust_ev),
    ]
    .into_iter()
    .map(|(bet, ev)| SideBetAdvice {
        bet,
        ev,
        profitable: ev > config.side_bet_threshold,
    })
    .collect();

    let dealer_bust_probability = outcomes
        .filter(|outcomes| !outcomes.is_empty())
        .map(|outcomes| outcomes.get(&DealerFinal::Bust).copied().unwrap_or(0.0));
    let dealer_bust_alert = dealer_bust_probability.and_then(|bust| {
        if bust >= config.dealer_bust_alert {
            Some(BustAlert::High)
        } else if bust <= config.dealer_bust_floor {
            Some(BustAlert::Low)
        } else {
            None
        }
    });

    Recommendation {
        main_ev,
        increase_bet: main_ev > config.main_ev_threshold,
        kelly_fraction,
        side_bets,
        take_insurance: true_count >= config.insurance_threshold,
        dealer_bust_probability,
        dealer_bust_alert,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cards(codes: &[&str]) -> Vec<Card> {
        codes.iter().map(|c| c.parse().unwrap()).collect()
    }

    fn card(code: &str) -> Card {
        code.parse().unwrap()
    }

    fn advise(hand: &[&str], up: &str, true_count: f64) -> Advice {
        recommend_action(&cards(hand), card(up), true_count, &AdvisorConfig::default())
    }

    #[test]
    fn sixteen_against_ten_stands_from_zero() {
        let stand = Advice::IndexPlay(IndexPlay::SixteenVsTen, Decision::Stand);
        let hit = Advice::IndexPlay(IndexPlay::SixteenVsTen, Decision::Hit);
        assert_eq!(advise(&["10S", "6H"], "KD", 0.0), stand);
        assert_eq!(advise(&["10S", "6H"], "KD", -0.5), hit);
        assert_eq!(advise(&["5S", "5H", "6C"], "10D", 1.0), stand);
    }

    #[test]
    fn fifteen_against_ten_stands_from_four() {
        let play = IndexPlay::FifteenVsTen;
        assert_eq!(advise(&["9S", "6H"], "QD", 4.0), Advice::IndexPlay(play, Decision::Stand));
        assert_eq!(advise(&["9S", "6H"], "QD", 3.9), Advice::IndexPlay(play, Decision::Hit));
    }

    #[test]
    fn thirteen_against_two_hits_below_minus_one() {
        let play = IndexPlay::ThirteenVsTwo;
        assert_eq!(advise(&["10S", "3H"], "2D", -1.0), Advice::IndexPlay(play, Decision::Stand));
        assert_eq!(advise(&["10S", "3H"], "2D", -1.5), Advice::IndexPlay(play, Decision::Hit));
    }

    #[test]
    fn twelve_against_two_and_three_stand_from_three() {
        for (up, play) in [("2D", IndexPlay::TwelveVsTwo), ("3D", IndexPlay::TwelveVsThree)] {
            assert_eq!(advise(&["10S", "2H"], up, 3.0), Advice::IndexPlay(play, Decision::Stand));
            assert_eq!(advise(&["10S", "2H"], up, 2.9), Advice::IndexPlay(play, Decision::Hit));
        }
        assert_eq!(advise(&["10S", "2H"], "4D", -5.0), Advice::Play(Decision::Stand));
    }

    #[test]
    fn missing_index_play_falls_back_to_basic_strategy() {
        let mut config = AdvisorConfig::default();
        config.index_plays.remove(&IndexPlay::SixteenVsTen);
        let advice = recommend_action(&cards(&["10S", "6H"]), card("10D"), 10.0, &config);
        assert_eq!(advice, Advice::Play(Decision::Hit));
    }

    #[test]
    fn soft_totals_ignore_index_plays() {
        // Soft 16 against a ten is not 16v10.
        assert_eq!(advise(&["AS", "5H"], "10D", 5.0), Advice::Play(Decision::Hit));
    }

    #[test]
    fn insurance_follows_the_true_count() {
        assert_eq!(advise(&["10S", "6H"], "AD", 3.0), Advice::Insurance { take: true });
        assert_eq!(advise(&["10S", "6H"], "AD", 2.5), Advice::Insurance { take: false });
        // Only offered on the initial two cards.
        assert_eq!(advise(&["10S", "2H", "4C"], "AD", 5.0), Advice::Play(Decision::Hit));
    }

    #[test]
    fn pairs_split_by_rank_and_up_card() {
        assert_eq!(advise(&["8S", "8H"], "10D", 0.0), Advice::Split);
        assert_eq!(advise(&["AS", "AH"], "6D", 0.0), Advice::Split);
        assert_eq!(advise(&["9S", "9H"], "6D", 0.0), Advice::Split);
        assert_eq!(advise(&["9S", "9H"], "7D", 0.0), Advice::Play(Decision::Stand));
        assert_eq!(advise(&["4S", "4H"], "5D", 0.0), Advice::Split);
        assert_eq!(advise(&["4S", "4H"], "4D", 0.0), Advice::Play(Decision::Hit));
        assert_eq!(advise(&["5S", "5H"], "6D", 0.0), Advice::Play(Decision::Double));
        assert_eq!(advise(&["KS", "KH"], "6D", 0.0), Advice::Play(Decision::Stand));
    }

    #[test]
    fn basic_strategy_after_the_first_decision() {
        assert_eq!(advise(&["AS", "KH"], "6D", 0.0), Advice::Blackjack);
        assert_eq!(advise(&["5S", "6H"], "6D", 0.0), Advice::Play(Decision::Double));
        assert_eq!(advise(&["2S", "3H", "6C"], "6D", 0.0), Advice::Play(Decision::Hit));
        assert_eq!(advise(&["AS", "3H", "4C"], "4D", 0.0), Advice::Play(Decision::Stand));
        assert_eq!(advise(&["AS"], "4D", 0.0), Advice::AwaitingInput);
    }

    #[test]
    fn labels() {
        assert_eq!(Advice::Insurance { take: true }.to_string(), "Insurance: Take it");
        assert_eq!(
            Advice::IndexPlay(IndexPlay::TwelveVsThree, Decision::Stand).to_string(),
            "Stand (index play 12v3)"
        );
        assert_eq!(SideBet::BustORama.to_string(), "Bust-O-Rama");
    }

    fn report(main_ev: f64, pair_ev: f64) -> EvReport {
        EvReport {
            main_ev,
            bust_ev: 0.9,
            twenty_one_plus_three_ev: 0.95,
            pair_ev,
            hot_three_ev: 0.8,
            workers: 1,
            rounds: 100,
        }
    }

    #[test]
    fn main_bet_advice_and_kelly_sizing() {
        let mut config = AdvisorConfig::default();
        let recommendation = recommend(&report(-0.01, 0.9), 0.0, None, &config);
        assert!(!recommendation.increase_bet);
        assert_eq!(recommendation.kelly_fraction, None);

        config.kelly_enabled = true;
        let recommendation = recommend(&report(0.0225, 0.9), 0.0, None, &config);
        assert!(recommendation.increase_bet);
        let kelly = recommendation.kelly_fraction.unwrap();
        assert!((kelly - 0.01).abs() < 1e-12);

        let recommendation = recommend(&report(-0.0225, 0.9), 0.0, None, &config);
        assert_eq!(recommendation.kelly_fraction, None);
    }

    #[test]
    fn side_bets_are_flagged_against_the_threshold() {
        let config = AdvisorConfig {
            side_bet_threshold: 1.0,
            ..Default::default()
        };
        let recommendation = recommend(&report(0.0, 1.2), 0.0, None, &config);
        let flagged: Vec<SideBet> = recommendation
            .side_bets
            .iter()
            .filter(|advice| advice.profitable)
            .map(|advice| advice.bet)
            .collect();
        assert_eq!(flagged, [SideBet::PerfectPair]);
        assert_eq!(recommendation.side_bets.len(), 4);
    }

    #[test]
    fn insurance_and_dealer_bust_alerts() {
        let config = AdvisorConfig::default();
        let bust_rate = |bust: f64| {
            DealerOutcomes::from([(DealerFinal::Bust, bust), (DealerFinal::Total(17), 1.0 - bust)])
        };
        let high = bust_rate(0.42);
        let low = bust_rate(0.1);
        let middle = bust_rate(0.25);
        let no_bust = DealerOutcomes::from([(DealerFinal::Total(17), 1.0)]);

        let recommendation = recommend(&report(0.0, 0.9), 3.5, Some(&high), &config);
        assert!(recommendation.take_insurance);
        assert_eq!(recommendation.dealer_bust_probability, Some(0.42));
        assert_eq!(recommendation.dealer_bust_alert, Some(BustAlert::High));

        let recommendation = recommend(&report(0.0, 0.9), 1.0, Some(&low), &config);
        assert!(!recommendation.take_insurance);
        assert_eq!(recommendation.dealer_bust_alert, Some(BustAlert::Low));

        let recommendation = recommend(&report(0.0, 0.9), 1.0, Some(&middle), &config);
        assert_eq!(recommendation.dealer_bust_alert, None);

        let recommendation = recommend(&report(0.0, 0.9), 1.0, Some(&no_bust), &config);
        assert_eq!(recommendation.dealer_bust_probability, Some(0.0));
        assert_eq!(recommendation.dealer_bust_alert, Some(BustAlert::Low));

        let empty = DealerOutcomes::new();
        let recommendation = recommend(&report(0.0, 0.9), 1.0, Some(&empty), &config);
        assert_eq!(recommendation.dealer_bust_probability, None);
        assert_eq!(recommendation.dealer_bust_alert, None);
    }
}
