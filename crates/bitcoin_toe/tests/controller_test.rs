//! Controller tests against a recording chain notifier and a paused clock.

use async_trait::async_trait;
use bitcoin_toe::{
    AppConfig, ChainError, ChainErrorKind, ChainNotifier, ControllerHandle, GameController,
    GameEvent, GameSnapshot, TimingConfig, TxHandle,
};
use bitcoin_toe_game::{Board, Cell, Mark, Opponent, Persona, Phase, Position};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};
use tokio::time::Instant;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    CreateGame(Persona, u64),
    ReportWinner(u64, bool),
}

/// Notifier that records every call instead of talking to a wallet.
#[derive(Default)]
struct RecordingNotifier {
    calls: Mutex<Vec<Call>>,
    fail: bool,
    delay: Option<Duration>,
}

impl RecordingNotifier {
    fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn slow(delay: Duration) -> Self {
        Self {
            delay: Some(delay),
            ..Self::default()
        }
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    async fn record(&self, call: Call) -> Result<TxHandle, ChainError> {
        self.calls.lock().unwrap().push(call);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail {
            Err(ChainError::new(ChainErrorKind::Rejected(
                "User rejected the request".to_string(),
            )))
        } else {
            Ok(TxHandle::new("0xabc"))
        }
    }
}

#[async_trait]
impl ChainNotifier for RecordingNotifier {
    async fn create_game(&self, persona: Persona, game_id: u64) -> Result<TxHandle, ChainError> {
        self.record(Call::CreateGame(persona, game_id)).await
    }

    async fn report_winner(&self, game_id: u64, player_won: bool) -> Result<TxHandle, ChainError> {
        self.record(Call::ReportWinner(game_id, player_won)).await
    }
}

/// Opponent replaying a fixed list of cells.
struct Scripted(Vec<Position>);

impl Scripted {
    fn new(moves: &[Position]) -> Box<Self> {
        Box::new(Self(moves.iter().rev().copied().collect()))
    }
}

impl Opponent for Scripted {
    fn pick(&mut self, _board: &Board) -> Option<Position> {
        self.0.pop()
    }

    fn name(&self) -> &str {
        "Scripted"
    }
}

struct Harness {
    handle: ControllerHandle,
    events: UnboundedReceiver<GameEvent>,
    notifier: Arc<RecordingNotifier>,
    marks: usize,
}

impl Harness {
    fn start(notifier: RecordingNotifier, opponent: Box<dyn Opponent>) -> Self {
        Self::with_config(&AppConfig::default(), notifier, opponent)
    }

    fn with_config(
        config: &AppConfig,
        notifier: RecordingNotifier,
        opponent: Box<dyn Opponent>,
    ) -> Self {
        let notifier = Arc::new(notifier);
        let (tx, events) = unbounded_channel();
        let (controller, handle) = GameController::new(config, notifier.clone(), opponent, tx);
        controller.spawn();
        Self {
            handle,
            events,
            notifier,
            marks: 0,
        }
    }

    async fn next(&mut self) -> GameEvent {
        let event = tokio::time::timeout(Duration::from_secs(60), self.events.recv())
            .await
            .expect("controller went quiet")
            .expect("controller stopped");
        if let GameEvent::StateChanged(s) = &event {
            self.marks = s.board.marks();
        }
        event
    }

    async fn snapshot_where(&mut self, pred: impl Fn(&GameSnapshot) -> bool) -> GameSnapshot {
        loop {
            if let GameEvent::StateChanged(s) = self.next().await
                && pred(&s)
            {
                return s;
            }
        }
    }

    async fn notice_where(&mut self, pred: impl Fn(&str) -> bool) -> String {
        loop {
            if let GameEvent::Notice(text) = self.next().await
                && pred(&text)
            {
                return text;
            }
        }
    }

    /// Clicks a cell and waits until the opponent has replied.
    async fn play(&mut self, index: usize) -> GameSnapshot {
        let before = self.marks;
        self.handle.click(index).unwrap();
        self.snapshot_where(|s| !s.opponent_pending && s.board.marks() == before + 2)
            .await
    }
}

#[tokio::test(start_paused = true)]
async fn test_select_character_submits_create_game() {
    let mut h = Harness::start(RecordingNotifier::default(), Scripted::new(&[]));
    h.handle.select_character(Persona::KamalaHarris).unwrap();

    let playing = h.snapshot_where(|s| s.phase == Phase::InProgress).await;
    assert_eq!(playing.game_id, Some(1006));
    assert_eq!(playing.persona, Some(Persona::KamalaHarris));
    assert!(playing.transaction_in_flight);

    let notice = h.notice_where(|_| true).await;
    assert_eq!(notice, "Game created successfully!");
    h.snapshot_where(|s| !s.transaction_in_flight).await;

    assert_eq!(
        h.notifier.calls(),
        vec![Call::CreateGame(Persona::KamalaHarris, 1006)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_transaction_flag_stays_up_while_wallet_is_slow() {
    let mut h = Harness::start(
        RecordingNotifier::slow(Duration::from_secs(5)),
        Scripted::new(&[Position::TopRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    // The board stays playable while the transaction is pending.
    let after = h.play(4).await;
    assert!(after.transaction_in_flight);

    let start = Instant::now();
    h.snapshot_where(|s| !s.transaction_in_flight).await;
    assert!(start.elapsed() >= Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_opponent_replies_after_delay() {
    let mut h = Harness::start(
        RecordingNotifier::default(),
        Scripted::new(&[Position::TopRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    h.handle.click(4).unwrap();
    let pending = h.snapshot_where(|s| s.opponent_pending).await;
    assert_eq!(pending.board.get(Position::Center), Cell::Marked(Mark::Player));
    let start = Instant::now();

    let replied = h.snapshot_where(|s| s.board.marks() == 2).await;
    assert!(start.elapsed() >= Duration::from_millis(500));
    assert_eq!(
        replied.board.get(Position::TopRight),
        Cell::Marked(Mark::Opponent)
    );
}

#[tokio::test(start_paused = true)]
async fn test_configured_delays_are_used() {
    let config = AppConfig::default().with_timing(TimingConfig::new(100, 300));
    let mut h = Harness::with_config(
        &config,
        RecordingNotifier::default(),
        Scripted::new(&[Position::MiddleLeft, Position::MiddleRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    let start = Instant::now();
    h.play(0).await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(100));
    assert!(elapsed < Duration::from_millis(500));

    h.play(1).await;
    h.handle.click(2).unwrap();
    h.snapshot_where(|s| matches!(s.phase, Phase::Won(_))).await;
    let start = Instant::now();

    h.snapshot_where(|s| s.phase == Phase::SelectingCharacter)
        .await;
    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(300));
    assert!(elapsed < Duration::from_millis(2000));
}

#[tokio::test(start_paused = true)]
async fn test_click_while_opponent_pending_is_ignored() {
    let mut h = Harness::start(
        RecordingNotifier::default(),
        Scripted::new(&[Position::TopRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    h.handle.click(4).unwrap();
    h.handle.click(0).unwrap();

    let replied = h.snapshot_where(|s| s.board.marks() == 2).await;
    assert_eq!(replied.board.get(Position::TopLeft), Cell::Empty);
    assert_eq!(replied.board.get(Position::Center), Cell::Marked(Mark::Player));
}

#[tokio::test(start_paused = true)]
async fn test_player_win_reports_once_and_reloads() {
    let mut h = Harness::start(
        RecordingNotifier::default(),
        Scripted::new(&[Position::MiddleLeft, Position::MiddleRight]),
    );
    h.handle.select_character(Persona::KamalaHarris).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    h.play(0).await;
    h.play(1).await;
    h.handle.click(2).unwrap();

    let notice = h.notice_where(|n| n.contains("wins!")).await;
    assert_eq!(notice, "Kamala Harris wins! BTC price will decrease.");

    let won = h.snapshot_where(|s| matches!(s.phase, Phase::Won(_))).await;
    assert_eq!(won.phase, Phase::Won(Mark::Player));
    assert_eq!(won.winner, Some(Persona::KamalaHarris));
    let start = Instant::now();

    // Further clicks are ignored once the game is decided.
    h.handle.click(8).unwrap();

    let reloaded = h
        .snapshot_where(|s| s.phase == Phase::SelectingCharacter)
        .await;
    assert!(start.elapsed() >= Duration::from_millis(2000));
    assert_eq!(reloaded.game_id, None);

    assert_eq!(
        h.notifier.calls(),
        vec![
            Call::CreateGame(Persona::KamalaHarris, 1006),
            Call::ReportWinner(1006, true),
        ]
    );

    // The next game gets a fresh id.
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    let next = h.snapshot_where(|s| s.phase == Phase::InProgress).await;
    assert_eq!(next.game_id, Some(1007));
}

#[tokio::test(start_paused = true)]
async fn test_opponent_win_reports_player_lost() {
    let mut h = Harness::start(
        RecordingNotifier::default(),
        Scripted::new(&[Position::TopLeft, Position::TopCenter, Position::TopRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    h.play(3).await;
    h.play(4).await;
    h.handle.click(8).unwrap();

    let notice = h.notice_where(|n| n.contains("wins!")).await;
    assert_eq!(notice, "Kamala Harris wins! BTC price will decrease.");

    let won = h.snapshot_where(|s| matches!(s.phase, Phase::Won(_))).await;
    assert_eq!(won.phase, Phase::Won(Mark::Opponent));
    assert_eq!(won.winner, Some(Persona::KamalaHarris));
    h.snapshot_where(|s| s.phase == Phase::SelectingCharacter)
        .await;

    assert!(h.notifier.calls().contains(&Call::ReportWinner(1006, false)));
}

#[tokio::test(start_paused = true)]
async fn test_failed_transactions_do_not_block_play() {
    let mut h = Harness::start(
        RecordingNotifier::failing(),
        Scripted::new(&[Position::TopRight]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress && !s.transaction_in_flight)
        .await;

    let after = h.play(4).await;
    assert_eq!(after.phase, Phase::InProgress);
    assert_eq!(after.board.marks(), 2);
    assert_eq!(
        h.notifier.calls(),
        vec![Call::CreateGame(Persona::DonaldTrump, 1006)]
    );
}

#[tokio::test(start_paused = true)]
async fn test_draw_resets_board_and_keeps_game_id() {
    let mut h = Harness::start(
        RecordingNotifier::default(),
        Scripted::new(&[
            Position::TopCenter,
            Position::Center,
            Position::MiddleRight,
            Position::BottomLeft,
        ]),
    );
    h.handle.select_character(Persona::DonaldTrump).unwrap();
    h.snapshot_where(|s| s.phase == Phase::InProgress).await;

    h.play(0).await;
    h.play(2).await;
    h.play(3).await;
    h.play(7).await;
    h.handle.click(8).unwrap();

    let drawn = h.snapshot_where(|s| s.phase == Phase::Drawn).await;
    assert_eq!(drawn.board.marks(), 9);
    let start = Instant::now();

    let notice = h.notice_where(|n| n.contains("draw")).await;
    assert_eq!(notice, "It's a draw! Starting a new game.");
    assert!(start.elapsed() >= Duration::from_millis(2000));

    let fresh = h
        .snapshot_where(|s| s.phase == Phase::InProgress && s.board.marks() == 0)
        .await;
    assert_eq!(fresh.game_id, Some(1006));
    assert_eq!(
        h.notifier.calls(),
        vec![Call::CreateGame(Persona::DonaldTrump, 1006)]
    );
}

#[tokio::test]
async fn test_controller_stops_on_shutdown() {
    let notifier = Arc::new(RecordingNotifier::default());
    let (tx, _events) = unbounded_channel();
    let (controller, handle) = GameController::new(
        &AppConfig::default(),
        notifier,
        Scripted::new(&[]),
        tx,
    );
    let task = controller.spawn();

    handle.shutdown().unwrap();
    task.await.unwrap();
    assert!(handle.click(0).is_err());
}
