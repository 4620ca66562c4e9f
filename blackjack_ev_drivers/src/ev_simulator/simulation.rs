use std::error::Error;

use blackjack_ev::advisor::BustAlert;
use blackjack_ev::{
    recommend, recommend_action, sample_dealer_outcomes, simulate_with_config, Card,
    CountingSystem, DealerOutcomes, EvReport, Recommendation, RunningCount, Shoe,
};
use blackjack_ev_drivers::Config;
use tracing::info;

/// Cards on the table for the current request.
pub struct Table {
    pub seen: Vec<Card>,
    pub hand: Vec<Card>,
    pub upcard: Option<Card>,
}

/// Removes every card on the table from a fresh shoe, prints the EV report
/// for the next round and the advice that follows from it.
pub fn run(config: &Config, table: &Table) -> Result<(), Box<dyn Error>> {
    let system: CountingSystem = (&config.simulator).try_into()?;
    let mut shoe = Shoe::new(config.shoe.number_of_decks)?;
    let mut count = RunningCount::new(system);

    for &card in table.seen.iter().chain(&table.hand) {
        shoe.remove_card(card)?;
        count.update(card);
    }

    let mut outcomes = None;
    if let Some(card) = table.upcard {
        let samples = config.simulator.dealer_samples;
        if samples > 0 {
            let sampled = sample_dealer_outcomes(card, &shoe.snapshot(), samples);
            print_dealer_outcomes(card, &sampled);
            outcomes = Some(sampled);
        }
        shoe.remove_card(card)?;
        count.update(card);
    }

    info!(
        remaining = shoe.total_cards(),
        penetration = shoe.penetration(),
        "shoe prepared"
    );

    let report = simulate_with_config(&shoe.snapshot(), &config.simulation_config());
    print_report(&report);

    let true_count = count.true_count(shoe.decks_remaining());
    println!(
        "Running count ({:?}): {:.1}   True count: {:.2}",
        count.system(),
        count.running_count(),
        true_count
    );

    if let Some(upcard) = table.upcard {
        let advice = recommend_action(&table.hand, upcard, true_count, &config.advisor);
        println!("Action: {}", advice);
    }

    let recommendation = recommend(&report, true_count, outcomes.as_ref(), &config.advisor);
    print_recommendation(&recommendation);

    Ok(())
}

fn print_report(report: &EvReport) {
    println!(
        "Simulated {} rounds on {} threads",
        report.rounds, report.workers
    );
    println!("Main:         {:+.6}", report.main_ev);
    println!("Bust-O-Rama:  {:.6}", report.bust_ev);
    println!("21+3:         {:.6}", report.twenty_one_plus_three_ev);
    println!("Perfect Pair: {:.6}", report.pair_ev);
    println!("Hot 3:        {:.6}", report.hot_three_ev);
}

fn print_dealer_outcomes(upcard: Card, outcomes: &DealerOutcomes) {
    print!("Dealer showing {}:", upcard);
    for (outcome, probability) in outcomes {
        print!(" {}={:.4}", outcome, probability);
    }
    println!();
}

fn print_recommendation(recommendation: &Recommendation) {
    let advantage = recommendation.main_ev * 100.0;
    if recommendation.increase_bet {
        println!("Main bet advantage: {:+.2}%. Recommend increasing bet.", advantage);
    } else {
        println!("Main bet advantage: {:.2}%. No advantage, bet minimum.", advantage);
    }
    if let Some(fraction) = recommendation.kelly_fraction {
        println!("Recommended Kelly bet size: {:.2}% of bankroll", fraction * 100.0);
    }

    for side_bet in &recommendation.side_bets {
        let verdict = if side_bet.profitable {
            "+EV! Consider betting."
        } else {
            "Not profitable to bet."
        };
        println!("{} side bet EV = {:.3}. {}", side_bet.bet, side_bet.ev, verdict);
    }

    if recommendation.take_insurance {
        println!("Insurance is +EV against an ace at this count.");
    }

    match recommendation.dealer_bust_alert {
        Some(BustAlert::High) => println!(
            "High dealer bust likelihood. Consider conservative plays or the bust side bet."
        ),
        Some(BustAlert::Low) => {
            println!("Low dealer bust likelihood. Consider avoiding bust-based side bets.")
        }
        None => {}
    }
}
