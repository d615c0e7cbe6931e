mod common;

use common::Board;
use system::euclid::point2;
use system::{ChatLine, ClientEvent, Presence, ServerEvent, UserDirectory};

#[test]
fn it_converges_presence_on_join() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("Bob"), 400.0, 300.0);

    let mut expected = UserDirectory::new();
    expected.insert(alice, Presence { name: "Alice".into() });
    expected.insert(bob, Presence { name: "Bob".into() });

    for id in &[alice, bob] {
        assert_eq!(
            board.received(id).last(),
            Some(&ServerEvent::UpdateUsers(expected.clone()))
        );
    }
    assert_eq!(board.client(&alice).cursors()[&bob].name, "Bob");
    assert_eq!(board.client(&bob).cursors()[&alice].name, "Alice");
    assert!(!board.client(&alice).cursors().contains_key(&alice));
}

#[test]
fn it_replays_strokes_proportionally_on_smaller_canvas() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("Bob"), 400.0, 300.0);

    let client = board.client_mut(&alice);
    client.press(point2(400.0, 300.0));
    let event = client.move_to(point2(480.0, 300.0)).expect("");
    client.release();
    board.send(alice, event);

    assert_eq!(board.client(&alice).canvas().marks, vec!["Draw 400,300-480,300"]);
    assert_eq!(board.client(&bob).canvas().marks, vec!["Draw 200,150-240,150"]);
    // sender never hears its own stroke
    assert!(!board
        .received(&alice)
        .iter()
        .any(|e| matches!(e, ServerEvent::Drawing(_))));
}

#[test]
fn it_mirrors_clear_and_undo_signals_against_local_history() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("Bob"), 800.0, 600.0);

    let event = board.client_mut(&alice).stamp(point2(100.0, 150.0), "star");
    board.send(alice, event);
    assert_eq!(board.client(&bob).canvas().marks, vec!["star 100,150"]);

    let event = board.client_mut(&alice).clear();
    board.send(alice, event);
    assert!(board.client(&bob).canvas().marks.is_empty());
    assert_eq!(board.client(&bob).history().len(), 2);

    let event = board.client_mut(&alice).undo().expect("");
    board.send(alice, event);
    assert_eq!(board.client(&alice).canvas().marks, vec!["star 100,150"]);
    // bob never snapshotted the remote stamp, so his undo lands on the blank
    // canvas: peers' histories are independent
    assert!(board.client(&bob).canvas().marks.is_empty());
    assert_eq!(board.client(&bob).history().index(), 0);
}

#[test]
fn it_tracks_cursors_and_drops_them_on_leave() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("Bob"), 800.0, 600.0);
    let carol = board.join(None, 800.0, 600.0);

    let event = board.client(&bob).cursor_moved(point2(15.0, 25.0));
    board.send(bob, event);
    assert_eq!(
        board.client(&alice).cursors()[&bob].position,
        Some(point2(15.0, 25.0))
    );
    assert_eq!(board.client(&carol).cursors()[&bob].position, Some(point2(15.0, 25.0)));

    board.leave(&bob);
    for id in &[alice, carol] {
        let notices = board
            .received(id)
            .iter()
            .filter(|e| **e == ServerEvent::UserDisconnected(bob))
            .count();
        assert_eq!(notices, 1);
        assert!(!board.client(id).cursors().contains_key(&bob));
    }
    assert!(!board.relay.registry().contains(&bob));
}

#[test]
fn it_names_chat_senders() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("  "), 800.0, 600.0);

    let event = board.client_mut(&bob).send_chat("hi all").expect("");
    board.send(bob, event);
    assert_eq!(
        board.client(&alice).chat_log(),
        &[ChatLine {
            name: "Anonymous".into(),
            message: "hi all".into()
        }]
    );

    board.send(alice, ClientEvent::ChatMessage("hey".into()));
    assert_eq!(board.client(&bob).chat_log()[1].name, "Alice");
}

#[test]
fn it_shows_blank_canvas_to_late_joiner() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);

    let client = board.client_mut(&alice);
    client.press(point2(0.0, 0.0));
    let event = client.move_to(point2(10.0, 10.0)).expect("");
    board.send(alice, event);

    let bob = board.join(Some("Bob"), 800.0, 600.0);
    assert!(board.client(&bob).canvas().marks.is_empty());
}

#[test]
fn it_relays_frames_with_null_and_mistyped_fields() {
    let mut board = Board::new();
    let alice = board.join(Some("Alice"), 800.0, 600.0);
    let bob = board.join(Some("Bob"), 400.0, 300.0);

    board.send_raw(
        alice,
        r#"{"event":"drawing","data":{"x0":null,"y0":"0.5","x1":0.25,"y1":true,"color":0,"size":"wide","op":null}}"#,
    );
    assert_eq!(board.client(&bob).canvas().marks, vec!["Draw 0,150-100,0"]);

    board.send_raw(alice, r#"{"event":"doodle","data":{"x":0.5,"y":null,"doodle":3}}"#);
    assert_eq!(board.client(&bob).canvas().marks[1], "? 200,0");

    board.send_raw(bob, r#"{"event":"cursorMove","data":{"x":null,"y":20}}"#);
    assert_eq!(
        board.client(&alice).cursors()[&bob].position,
        Some(point2(0.0, 20.0))
    );

    board.send_raw(bob, r#"{"event":"chatMessage","data":42}"#);
    assert_eq!(
        board.client(&alice).chat_log(),
        &[ChatLine {
            name: "Bob".into(),
            message: "42".into()
        }]
    );
}
