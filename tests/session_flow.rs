use gomoku::board::{Board, Pos, Stone};
use gomoku::eval::PatternScore;
use gomoku::search::{SearchMode, Searcher};
use gomoku::{Config, GameError, GameSession, SearchType};

#[test]
fn test_first_ai_move_is_center() {
    for depth in [2, 3, 4] {
        let mut game = GameSession::new_game(15, Stone::Black, &Config::default()).unwrap();
        let outcome = game.request_ai_move(depth).unwrap();
        assert_eq!(outcome.history[0].pos, Pos::new(7, 7), "depth {depth}");
        assert_eq!(outcome.history[0].stone, Stone::Black);
    }
}

#[test]
fn test_open_four_scores_and_wins() {
    let config = Config::default();
    let mut board = Board::with_config(15, Stone::Black, &config).unwrap();
    for c in 5..9 {
        board.put_as(Pos::new(7, c), Stone::Black).unwrap();
    }
    board.put_as(Pos::new(0, 0), Stone::White).unwrap();

    let eval = board.evaluator();
    assert!(eval.total_score(Stone::Black) - eval.total_score(Stone::White) >= PatternScore::FOUR);

    let mut searcher = Searcher::new(&config);
    let result = searcher.search(&mut board, Stone::Black, 2, SearchMode::ThreesAndFours);
    assert!(result.score >= PatternScore::FIVE);
    let mv = result.best_move.unwrap();
    assert!(mv == Pos::new(7, 4) || mv == Pos::new(7, 9), "got {mv}");
}

#[test]
fn test_engine_completes_five_in_game() {
    let mut game = GameSession::new_game(15, Stone::Black, &Config::default()).unwrap();
    // Black: row 3, White: scattered far away
    for (b, w) in [((3, 3), (10, 0)), ((3, 4), (12, 2)), ((3, 5), (10, 4)), ((3, 6), (12, 6))] {
        game.apply_human_move(b.0, b.1).unwrap();
        game.apply_human_move(w.0, w.1).unwrap();
    }
    let outcome = game.request_ai_move(2).unwrap();
    assert_eq!(outcome.winner, Some(Stone::Black));
    assert_eq!(outcome.search_type, Some(SearchType::ForcedWin));
    assert_eq!(outcome.winning_line.as_ref().map(Vec::len), Some(5));
    assert_eq!(game.apply_human_move(0, 0), Err(GameError::GameOver));

    // Taking the winning move back reopens the game
    let outcome = game.undo_last_ply().unwrap();
    assert_eq!(outcome.winner, None);
    assert_eq!(outcome.to_move, Stone::Black);
}

#[test]
fn test_engine_defends_open_three_threat() {
    let config = Config::default();
    let mut game = GameSession::new_game(15, Stone::Black, &config).unwrap();
    // White (human) builds an open three; the engine must answer it
    for (b, w) in [((0, 0), (7, 4)), ((0, 14), (7, 5)), ((14, 0), (7, 6))] {
        game.apply_human_move(b.0, b.1).unwrap();
        game.apply_human_move(w.0, w.1).unwrap();
    }
    let outcome = game.request_ai_move(2).unwrap();
    let reply = outcome.history.last().unwrap().pos;
    assert!(
        [Pos::new(7, 3), Pos::new(7, 7), Pos::new(7, 2), Pos::new(7, 8)].contains(&reply),
        "engine ignored the open three, played {reply}"
    );
}
