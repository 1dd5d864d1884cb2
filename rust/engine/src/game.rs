use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::cards::Card;
use crate::deck::Deck;
use crate::errors::GameError;
use crate::hand::{compare_hands, evaluate_hand, HandEvaluation};
use crate::logger::{ActionRecord, HandRecord, MoveLogEntry, ShowdownInfo};
use crate::player::{Player, PlayerAction, Seat, STARTING_STACK};
use crate::pot::Pot;
use crate::rules::{validate_action, BettingContext, ValidatedAction};
use crate::snapshot::TableSnapshot;

/// Stage of the current hand. Variants are declared in dealing order.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Phase {
    /// No hand dealt yet this session
    Waiting,
    /// Hole cards dealt, blinds posted
    PreFlop,
    /// Three community cards
    Flop,
    /// Fourth community card
    Turn,
    /// Fifth community card
    River,
    /// Hand settled; a new one may be dealt
    Showdown,
}

impl Phase {
    pub fn is_betting(self) -> bool {
        matches!(
            self,
            Phase::PreFlop | Phase::Flop | Phase::Turn | Phase::River
        )
    }

    pub fn name(self) -> &'static str {
        match self {
            Phase::Waiting => "Waiting",
            Phase::PreFlop => "Pre-flop",
            Phase::Flop => "Flop",
            Phase::Turn => "Turn",
            Phase::River => "River",
            Phase::Showdown => "Showdown",
        }
    }
}

/// Stakes and seat names for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConfig {
    pub starting_stack: u32,
    pub small_blind: u32,
    /// Also the minimum raise total
    pub big_blind: u32,
    pub player_name: String,
    pub opponent_name: String,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            starting_stack: STARTING_STACK,
            small_blind: 10,
            big_blind: 20,
            player_name: "Player".into(),
            opponent_name: "AI Opponent".into(),
        }
    }
}

impl TableConfig {
    pub fn validate(&self) -> Result<(), GameError> {
        if self.starting_stack == 0 {
            return Err(GameError::InvalidConfig(
                "starting_stack must be >0".into(),
            ));
        }
        if self.small_blind == 0 || self.big_blind == 0 {
            return Err(GameError::InvalidConfig("blinds must be >0".into()));
        }
        if self.small_blind > self.big_blind {
            return Err(GameError::InvalidConfig(
                "small_blind must not exceed big_blind".into(),
            ));
        }
        Ok(())
    }
}

/// Who took the last pot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Winner {
    Seat(Seat),
    /// Exact tie at showdown
    Split,
}

/// Descriptor of how the last pot was won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WinningHand {
    /// The other seat folded; no hand was evaluated
    Folded { seat: Seat, label: String },
    /// Best five cards at showdown (the player's hand on a split)
    Made(HandEvaluation),
}

impl WinningHand {
    pub fn name(&self) -> &str {
        match self {
            WinningHand::Folded { label, .. } => label,
            WinningHand::Made(eval) => eval.name(),
        }
    }
}

/// A betting round's legal moves for one seat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LegalActions {
    pub check: bool,
    /// Chips a call would move
    pub call: Option<u32>,
    /// Inclusive range of raise totals
    pub raise: Option<(u32, u32)>,
    /// Chips an all-in would move
    pub all_in: Option<u32>,
}

/// Heads-up betting engine: chips, cards, pot and phase for one session.
///
/// All mutation goes through [`GameState::start_new_hand`],
/// [`GameState::submit_action`] and [`GameState::reset_session`]. A rejected
/// action leaves the state untouched.
///
/// # Examples
///
/// ```
/// use headsup_engine::game::{GameState, Phase};
/// use headsup_engine::player::{PlayerAction, Seat};
///
/// let mut game = GameState::with_seed(7);
/// game.start_new_hand().unwrap();
/// assert_eq!(game.phase(), Phase::PreFlop);
/// assert_eq!(game.pot(), 30);
///
/// // the dealer acts first pre-flop
/// let dealer = game.dealer();
/// game.submit_action(dealer, PlayerAction::Call).unwrap();
/// game.submit_action(dealer.other(), PlayerAction::Check).unwrap();
/// assert_eq!(game.phase(), Phase::Flop);
/// assert_eq!(game.community().len(), 3);
/// ```
#[derive(Debug, Clone)]
pub struct GameState {
    config: TableConfig,
    seed: u64,
    deck: Deck,
    phase: Phase,
    pot: Pot,
    last_pot: u32,
    /// Amount each seat must match this round
    current_bet: u32,
    dealer: Seat,
    to_act: Option<Seat>,
    community: Vec<Card>,
    players: [Player; 2],
    winner: Option<Winner>,
    winning_hand: Option<WinningHand>,
    moves: Vec<MoveLogEntry>,
    actions: Vec<ActionRecord>,
    round_actions: u32,
    hand_number: u32,
    hand_start_chips: [u32; 2],
}

impl GameState {
    pub fn new(config: TableConfig, seed: u64) -> Result<Self, GameError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    /// Default 1000-chip, 10/20 table.
    pub fn with_seed(seed: u64) -> Self {
        Self::build(TableConfig::default(), seed)
    }

    fn build(config: TableConfig, seed: u64) -> Self {
        let mut deck = Deck::new_with_seed(seed);
        deck.reset();
        let players = [
            Player::new(config.player_name.clone(), config.starting_stack),
            Player::new(config.opponent_name.clone(), config.starting_stack),
        ];
        Self {
            seed,
            deck,
            phase: Phase::Waiting,
            pot: Pot::new(),
            last_pot: 0,
            current_bet: 0,
            // flipped before the first hand, so the opponent deals first
            dealer: Seat::Player,
            to_act: None,
            community: Vec::with_capacity(5),
            hand_start_chips: [config.starting_stack; 2],
            players,
            winner: None,
            winning_hand: None,
            moves: Vec::new(),
            actions: Vec::new(),
            round_actions: 0,
            hand_number: 0,
            config,
        }
    }

    pub fn config(&self) -> &TableConfig {
        &self.config
    }
    pub fn seed(&self) -> u64 {
        self.seed
    }
    pub fn phase(&self) -> Phase {
        self.phase
    }
    pub fn pot(&self) -> u32 {
        self.pot.amount()
    }
    /// Pot size at the last settlement.
    pub fn last_pot(&self) -> u32 {
        self.last_pot
    }
    pub fn current_bet(&self) -> u32 {
        self.current_bet
    }
    pub fn min_raise(&self) -> u32 {
        self.config.big_blind
    }
    pub fn dealer(&self) -> Seat {
        self.dealer
    }
    /// Seat allowed to act, if any.
    pub fn to_act(&self) -> Option<Seat> {
        self.to_act
    }
    pub fn community(&self) -> &[Card] {
        &self.community
    }
    pub fn player(&self, seat: Seat) -> &Player {
        &self.players[seat.index()]
    }
    pub fn players(&self) -> &[Player; 2] {
        &self.players
    }
    pub fn winner(&self) -> Option<Winner> {
        self.winner
    }
    pub fn winning_hand(&self) -> Option<&WinningHand> {
        self.winning_hand.as_ref()
    }
    pub fn moves(&self) -> &[MoveLogEntry] {
        &self.moves
    }
    pub fn actions(&self) -> &[ActionRecord] {
        &self.actions
    }
    pub fn hand_number(&self) -> u32 {
        self.hand_number
    }
    /// Undealt cards left in the deck.
    pub fn deck_remaining(&self) -> usize {
        self.deck.remaining()
    }

    /// Both stacks plus the pot; constant within a hand.
    pub fn total_chips(&self) -> u32 {
        self.players.iter().map(Player::chips).sum::<u32>() + self.pot.amount()
    }

    pub fn to_call(&self, seat: Seat) -> u32 {
        self.current_bet
            .saturating_sub(self.player(seat).current_bet())
    }

    /// A stack is empty and no hand is running.
    pub fn is_game_over(&self) -> bool {
        !self.phase.is_betting() && self.players.iter().any(|p| p.chips() == 0)
    }

    pub fn is_hand_complete(&self) -> bool {
        self.phase == Phase::Showdown
    }

    pub fn snapshot(&self) -> TableSnapshot {
        TableSnapshot {
            phase: self.phase,
            pot: self.pot.amount(),
            last_pot: self.last_pot,
            current_bet: self.current_bet,
            min_raise: self.min_raise(),
            dealer: self.dealer,
            community: self.community.clone(),
            players: self.players.clone(),
            to_act: self.to_act,
            winner: self.winner,
            winning_hand: self.winning_hand.clone(),
            moves: self.moves.clone(),
            hand_number: self.hand_number,
            game_over: self.is_game_over(),
        }
    }

    /// Back to initial stacks and `Waiting`.
    pub fn reset_session(&mut self) {
        self.deck.return_all_cards();
        self.deck.reset();
        for (player, name) in self
            .players
            .iter_mut()
            .zip([&self.config.player_name, &self.config.opponent_name])
        {
            *player = Player::new(name.clone(), self.config.starting_stack);
        }
        self.phase = Phase::Waiting;
        self.pot = Pot::new();
        self.last_pot = 0;
        self.current_bet = 0;
        self.dealer = Seat::Player;
        self.to_act = None;
        self.community.clear();
        self.winner = None;
        self.winning_hand = None;
        self.moves.clear();
        self.actions.clear();
        self.round_actions = 0;
        self.hand_start_chips = [self.config.starting_stack; 2];
        tracing::info!(stack = self.config.starting_stack, "session reset");
    }

    /// Deals a new hand: rotates the dealer, reshuffles, posts blinds and
    /// deals hole cards.
    ///
    /// # Errors
    ///
    /// - [`GameError::HandInProgress`] - the current hand is not settled
    /// - [`GameError::StackEmpty`] - a player has no chips; see [`GameState::is_game_over`]
    pub fn start_new_hand(&mut self) -> Result<(), GameError> {
        if self.phase.is_betting() {
            return Err(GameError::HandInProgress);
        }
        if self.players.iter().any(|p| p.chips() == 0) {
            return Err(GameError::StackEmpty);
        }

        self.deck.return_all_cards();
        self.deck.reset();

        self.phase = Phase::PreFlop;
        self.pot = Pot::new();
        self.current_bet = 0;
        self.community.clear();
        self.winner = None;
        self.winning_hand = None;
        self.moves.clear();
        self.actions.clear();
        self.round_actions = 0;
        self.hand_number += 1;
        self.dealer = self.dealer.other();
        for p in &mut self.players {
            p.reset_for_hand();
        }
        self.hand_start_chips = [self.players[0].chips(), self.players[1].chips()];

        tracing::info!(
            hand = self.hand_number,
            dealer = %self.dealer,
            "starting new hand"
        );

        self.post_blinds()?;
        self.deal_hole_cards()?;

        self.to_act = [self.dealer, self.dealer.other()]
            .into_iter()
            .find(|&s| self.player(s).can_act());
        // short stacks may leave nothing to bet
        if self.round_complete() {
            self.complete_round()?;
        }
        Ok(())
    }

    fn post_blinds(&mut self) -> Result<(), GameError> {
        let posts = [
            (self.dealer, self.config.small_blind, "small"),
            (self.dealer.other(), self.config.big_blind, "big"),
        ];
        for (seat, blind, kind) in posts {
            let player = &mut self.players[seat.index()];
            let amount = blind.min(player.chips());
            player.commit(amount)?;
            self.pot.add(amount);
            self.current_bet = self.current_bet.max(amount);
            let entry = MoveLogEntry::now(
                player.name(),
                format!("Posted {} blind {}", kind, amount),
                self.phase,
            );
            self.moves.push(entry);
            tracing::debug!(seat = %seat, amount, kind, "blind posted");
        }
        Ok(())
    }

    fn deal_hole_cards(&mut self) -> Result<(), GameError> {
        for seat in Seat::BOTH {
            for mut card in self.deck.deal_cards(2)? {
                if seat == Seat::Player {
                    card.reveal();
                }
                self.players[seat.index()].give_card(card)?;
            }
        }
        Ok(())
    }

    pub fn legal_actions(&self, seat: Seat) -> Option<LegalActions> {
        if self.to_act != Some(seat) {
            return None;
        }
        let p = self.player(seat);
        let to_call = self.to_call(seat);
        let raise_min = self.min_raise().max(self.current_bet + 1);
        Some(LegalActions {
            check: to_call == 0,
            call: (to_call > 0).then(|| to_call.min(p.chips())),
            raise: (raise_min <= p.chips()).then_some((raise_min, p.chips())),
            all_in: (p.chips() > 0).then_some(p.chips()),
        })
    }

    /// Pure transition: the state after `seat` plays `action`.
    pub fn apply(&self, seat: Seat, action: PlayerAction) -> Result<GameState, GameError> {
        let mut next = self.clone();
        next.submit_action(seat, action)?;
        Ok(next)
    }

    /// Applies an action for the seat holding the turn.
    ///
    /// Validation happens before any effect: on `Err` nothing changed and
    /// the same seat keeps the turn.
    ///
    /// # Errors
    ///
    /// - [`GameError::NoHandInProgress`] - outside a betting round
    /// - [`GameError::PlayerCannotAct`] - the seat folded or is all-in
    /// - [`GameError::NotPlayersTurn`] - the other seat holds the turn
    /// - any rejection from [`validate_action`]
    pub fn submit_action(&mut self, seat: Seat, action: PlayerAction) -> Result<(), GameError> {
        if !self.phase.is_betting() {
            return Err(GameError::NoHandInProgress);
        }
        if !self.player(seat).can_act() {
            return Err(GameError::PlayerCannotAct { seat });
        }
        let expected = self.to_act.ok_or(GameError::NoHandInProgress)?;
        if expected != seat {
            return Err(GameError::NotPlayersTurn {
                expected,
                actual: seat,
            });
        }

        let p = self.player(seat);
        let ctx = BettingContext {
            stack: p.chips(),
            contribution: p.current_bet(),
            table_bet: self.current_bet,
            min_raise: self.min_raise(),
        };
        let validated = match validate_action(&ctx, action) {
            Ok(v) => v,
            Err(e) => {
                tracing::debug!(seat = %seat, ?action, error = %e, "action rejected");
                return Err(e);
            }
        };

        let player = &mut self.players[seat.index()];
        let label = match validated {
            ValidatedAction::Fold => {
                player.fold();
                "Fold".to_string()
            }
            ValidatedAction::Check => "Check".to_string(),
            ValidatedAction::Call(amount) => {
                player.commit(amount)?;
                self.pot.add(amount);
                format!("Call {}", amount)
            }
            ValidatedAction::Raise { total, added } => {
                player.commit(added)?;
                self.pot.add(added);
                self.current_bet = total;
                format!("Raise to {}", total)
            }
            ValidatedAction::AllIn(amount) => {
                player.commit(amount)?;
                self.pot.add(amount);
                self.current_bet = self.current_bet.max(player.current_bet());
                format!("All in {}", amount)
            }
        };
        player.set_last_action(label.clone());
        let entry = MoveLogEntry::now(player.name(), label, self.phase);
        self.moves.push(entry);
        self.actions.push(ActionRecord {
            seat,
            phase: self.phase,
            action,
        });
        self.round_actions += 1;

        tracing::debug!(
            seat = %seat,
            ?action,
            pot = self.pot.amount(),
            table_bet = self.current_bet,
            "action applied"
        );

        if validated == ValidatedAction::Fold {
            self.resolve_fold(seat);
            return Ok(());
        }

        if self.round_complete() {
            self.complete_round()
        } else {
            self.to_act = Some(seat.other());
            Ok(())
        }
    }

    // Every seat that can still bet has matched the table bet, and when both
    // can bet each has had a say.
    fn round_complete(&self) -> bool {
        if self.players.iter().any(Player::has_folded) {
            return true;
        }
        let open: Vec<&Player> = self.players.iter().filter(|p| p.can_act()).collect();
        if open.iter().any(|p| p.current_bet() != self.current_bet) {
            return false;
        }
        open.len() < 2 || self.round_actions >= 2
    }

    fn complete_round(&mut self) -> Result<(), GameError> {
        self.return_uncalled_bet();

        if !self.players.iter().all(Player::can_act) {
            // nobody left to bet against: run the board out
            self.to_act = None;
            while self.phase < Phase::River {
                self.advance_street()?;
            }
            return self.showdown();
        }
        if self.phase == Phase::River {
            return self.showdown();
        }
        self.advance_street()
    }

    fn return_uncalled_bet(&mut self) {
        let [a, b] = [self.players[0].current_bet(), self.players[1].current_bet()];
        let (over, excess) = match a.cmp(&b) {
            Ordering::Greater => (Seat::Player, a - b),
            Ordering::Less => (Seat::Opponent, b - a),
            Ordering::Equal => return,
        };
        let refunded = self.pot.remove(excess);
        let player = &mut self.players[over.index()];
        player.refund(refunded);
        self.current_bet = self.current_bet.saturating_sub(refunded);
        let entry = MoveLogEntry::now(
            player.name(),
            format!("Uncalled {} returned", refunded),
            self.phase,
        );
        self.moves.push(entry);
        tracing::debug!(seat = %over, refunded, "uncalled bet returned");
    }

    fn advance_street(&mut self) -> Result<(), GameError> {
        let (next, count, label) = match self.phase {
            Phase::PreFlop => (Phase::Flop, 3, "Dealt the Flop"),
            Phase::Flop => (Phase::Turn, 1, "Dealt the Turn"),
            Phase::Turn => (Phase::River, 1, "Dealt the River"),
            _ => return Err(GameError::NoHandInProgress),
        };
        self.phase = next;
        for mut card in self.deck.deal_cards(count)? {
            card.reveal();
            self.community.push(card);
        }
        let entry = MoveLogEntry::now("Dealer", label, self.phase);
        self.moves.push(entry);

        self.current_bet = 0;
        self.round_actions = 0;
        for p in &mut self.players {
            p.reset_round();
        }
        self.to_act = self
            .players
            .iter()
            .all(Player::can_act)
            .then_some(self.dealer.other());

        tracing::debug!(phase = ?self.phase, board = self.community.len(), "street dealt");
        Ok(())
    }

    fn resolve_fold(&mut self, folder: Seat) {
        let winner = folder.other();
        self.last_pot = self.pot.amount();
        let won = self.pot.take();
        self.players[winner.index()].add_chips(won);
        let label = format!("{} folded", self.player(folder).name());
        let entry = MoveLogEntry::now(
            self.player(winner).name(),
            format!("Wins {} ({})", won, label),
            self.phase,
        );
        self.moves.push(entry);
        self.phase = Phase::Showdown;
        self.to_act = None;
        self.winner = Some(Winner::Seat(winner));
        self.winning_hand = Some(WinningHand::Folded {
            seat: folder,
            label,
        });
        tracing::info!(hand = self.hand_number, winner = %winner, pot = won, "hand won by fold");
    }

    fn showdown(&mut self) -> Result<(), GameError> {
        self.phase = Phase::Showdown;
        self.to_act = None;
        for p in &mut self.players {
            p.reveal_hand();
        }

        let mut evals: Vec<HandEvaluation> = Vec::with_capacity(2);
        for p in &self.players {
            let mut cards = p.hand().to_vec();
            cards.extend_from_slice(&self.community);
            evals.push(evaluate_hand(&cards)?);
        }
        let (mine, theirs) = (&evals[0], &evals[1]);

        self.last_pot = self.pot.amount();
        let (winner, made) = match compare_hands(mine, theirs) {
            Ordering::Greater => (Winner::Seat(Seat::Player), mine.clone()),
            Ordering::Less => (Winner::Seat(Seat::Opponent), theirs.clone()),
            Ordering::Equal => (Winner::Split, mine.clone()),
        };
        let summary = match winner {
            Winner::Seat(seat) => {
                let won = self.pot.take();
                self.players[seat.index()].add_chips(won);
                format!("{} wins {} with {}", self.player(seat).name(), won, made.name())
            }
            Winner::Split => {
                // odd chip to the seat out of position
                let shares = self.pot.split(self.dealer.other());
                for (p, share) in self.players.iter_mut().zip(shares) {
                    p.add_chips(share);
                }
                format!("Split pot {}/{} with {}", shares[0], shares[1], made.name())
            }
        };
        let entry = MoveLogEntry::now("Dealer", summary, self.phase);
        self.moves.push(entry);

        tracing::info!(
            hand = self.hand_number,
            winner = ?winner,
            category = %made.category,
            pot = self.last_pot,
            "showdown"
        );
        self.winner = Some(winner);
        self.winning_hand = Some(WinningHand::Made(made));
        Ok(())
    }

    /// Record of the hand just settled; `None` while a hand is running or
    /// before the first hand.
    pub fn hand_record(&self, hand_id: impl Into<String>) -> Option<HandRecord> {
        if self.phase != Phase::Showdown {
            return None;
        }
        let winner = self.winner?;
        let mut net_result = BTreeMap::new();
        for seat in Seat::BOTH {
            let delta =
                i64::from(self.player(seat).chips()) - i64::from(self.hand_start_chips[seat.index()]);
            net_result.insert(seat.id().to_string(), delta);
        }
        let showdown = match &self.winning_hand {
            Some(WinningHand::Made(eval)) => Some(ShowdownInfo {
                winners: match winner {
                    Winner::Seat(s) => vec![s],
                    Winner::Split => Seat::BOTH.to_vec(),
                },
                notes: Some(eval.name().to_string()),
            }),
            _ => None,
        };
        Some(HandRecord {
            hand_id: hand_id.into(),
            seed: Some(self.seed),
            dealer: self.dealer,
            actions: self.actions.clone(),
            board: self.community.clone(),
            result: Some(match winner {
                Winner::Seat(s) => s.id().to_string(),
                Winner::Split => "split".to_string(),
            }),
            ts: None,
            showdown,
            net_result,
        })
    }
}
