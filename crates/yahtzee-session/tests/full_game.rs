//! Whole games played through a table with scripted dice.

use yahtzee_core::Category;
use yahtzee_session::{
    IgnoreReason, LogEntry, Phase, Player, ScriptedRenderer, SessionConfig, Standing, Table,
    Transition,
};

/// One hand per category, totalling 63 upper (bonus) and 102 lower.
fn even_hands() -> Vec<(Category, Vec<u8>)> {
    vec![
        (Category::Aces, vec![1, 1, 1, 2, 3]),
        (Category::Twos, vec![2, 2, 2, 1, 3]),
        (Category::Threes, vec![3, 3, 3, 1, 2]),
        (Category::Fours, vec![4, 4, 4, 1, 2]),
        (Category::Fives, vec![5, 5, 5, 1, 2]),
        (Category::Sixes, vec![6, 6, 6, 1, 2]),
        (Category::ThreeOfAKind, vec![3, 3, 3, 2, 1]),
        (Category::FourOfAKind, vec![4, 4, 4, 4, 1]),
        (Category::FullHouse, vec![2, 2, 3, 3, 3]),
        (Category::SmallStraight, vec![1, 2, 3, 4, 6]),
        (Category::LargeStraight, vec![1, 1, 1, 1, 2]),
        (Category::Yahtzee, vec![1, 1, 2, 3, 4]),
        (Category::Chance, vec![6, 6, 3, 2, 1]),
    ]
}

fn scripted_table(hands: Vec<Vec<u8>>) -> Table<ScriptedRenderer> {
    let mut table = Table::new(SessionConfig::default(), ScriptedRenderer::new(hands));
    table.pump();
    table
}

fn roll_and_score(table: &mut Table<ScriptedRenderer>, category: Category) {
    assert_eq!(table.roll(), Transition::Applied);
    table.pump();
    assert_eq!(table.score(category), Transition::Applied);
}

#[test]
fn identical_games_end_in_a_tie() {
    let plan = even_hands();
    let hands = plan
        .iter()
        .flat_map(|(_, hand)| [hand.clone(), hand.clone()])
        .collect();
    let mut table = scripted_table(hands);

    for (category, _) in &plan {
        roll_and_score(&mut table, *category);
        roll_and_score(&mut table, *category);
    }

    let session = table.session();
    assert_eq!(session.phase(), Phase::GameOver);
    assert_eq!(session.rounds_completed(), 13);
    for player in Player::BOTH {
        let totals = session.totals(player);
        assert!(session.sheet(player).is_complete());
        assert_eq!(totals.upper, 63);
        assert_eq!(totals.bonus, 35);
        assert_eq!(totals.lower, 102);
        assert_eq!(totals.grand, 200);
    }
    assert_eq!(session.winner(), Some(Standing::Tie));
    assert!(matches!(
        session.log().last(),
        Some(LogEntry::GameOver { winner: None, totals: [200, 200], .. })
    ));

    assert_eq!(
        table.roll(),
        Transition::Ignored(IgnoreReason::GameOver)
    );
    assert!(table.view().winner.is_some());
}

#[test]
fn better_second_player_wins() {
    let plan = even_hands();
    let hands = plan
        .iter()
        .flat_map(|(category, hand)| {
            let better = match category {
                Category::Yahtzee => vec![6, 6, 6, 6, 6],
                _ => hand.clone(),
            };
            [hand.clone(), better]
        })
        .collect();
    let mut table = scripted_table(hands);

    for (category, _) in &plan {
        roll_and_score(&mut table, *category);
        roll_and_score(&mut table, *category);
    }

    let session = table.session();
    assert_eq!(session.totals(Player::One).grand, 200);
    assert_eq!(session.totals(Player::Two).grand, 250);
    assert_eq!(session.winner(), Some(Standing::Leader(Player::Two)));
}

#[test]
fn lock_reroll_and_score_yahtzee() {
    let mut table = scripted_table(vec![
        vec![4, 4, 1, 4, 2],
        vec![4, 3],
        vec![4],
    ]);

    table.roll();
    table.pump();
    for position in [0, 1, 3] {
        assert!(table.toggle_lock_at(position).is_applied());
    }

    table.roll();
    table.pump();
    assert_eq!(table.session().turn().faces(), vec![4, 4, 4, 4, 3]);

    // Keep the new four as well.
    assert!(table.toggle_lock_at(2).is_applied());
    table.roll();
    table.pump();
    assert_eq!(table.session().turn().faces(), vec![4, 4, 4, 4, 4]);
    assert_eq!(table.session().turn().rolls_remaining(), 0);
    assert_eq!(table.session().preview(Category::Yahtzee), Some(50));

    assert!(table.score(Category::Yahtzee).is_applied());
    let session = table.session();
    assert_eq!(session.sheet(Player::One).get(Category::Yahtzee), Some(50));
    assert_eq!(session.turn().active_player(), Player::Two);
    assert_eq!(session.leader(), Standing::Leader(Player::One));
}

#[test]
fn short_game_over_text_commands() {
    let mut table = Table::new(
        SessionConfig::default().with_rounds(1),
        ScriptedRenderer::new([vec![2, 3, 4, 5, 6], vec![1, 1, 2, 2, 3]]),
    );

    assert!(table.process("roll").unwrap().starts_with("Dice:"));
    assert_eq!(
        table.process("score large straight").unwrap(),
        "Player 1 scored 40 in Large Straight.\nPlayer 2's turn."
    );
    table.process("roll").unwrap();
    assert_eq!(
        table.process("s chance").unwrap(),
        "Player 2 scored 9 in Chance.\nGame over! Player 1 wins."
    );
    assert_eq!(table.process("roll").unwrap(), "The game is over.");
    assert!(table.process("status").unwrap().starts_with("Game over."));
}
