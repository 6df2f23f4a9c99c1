//! Tests for firmware::graphtec::session

use proptest::prelude::*;
use stencilcut_communication::firmware::graphtec::*;
use stencilcut_core::{Error, PassConfig, Point, ProtocolStateError, ValidationError};

fn started() -> DeviceSession {
    let mut session = DeviceSession::new();
    session.start().unwrap();
    session
}

fn cuts(block: &Block) -> Vec<DevicePoint> {
    block
        .commands
        .iter()
        .filter_map(|c| match c {
            Command::Move(p) | Command::Draw(p) => Some(*p),
            _ => None,
        })
        .collect()
}

#[test]
fn test_line_before_start_is_rejected() {
    let mut session = DeviceSession::new();
    let err = session
        .line(Point::new(0.0, 0.0), Point::new(1.0, 1.0))
        .unwrap_err();
    assert_eq!(
        err,
        ProtocolStateError::InvalidOperation {
            operation: "line".to_string(),
            state: "Uninitialized".to_string(),
        }
    );
}

#[test]
fn test_closed_path_before_start_is_rejected() {
    let mut session = DeviceSession::new();
    let err = session.closed_path(&[Point::new(0.0, 0.0)]).unwrap_err();
    assert!(err.is_protocol_error());
}

#[test]
fn test_draw_after_end_is_rejected() {
    let mut session = started();
    session.end().unwrap();

    assert!(session
        .line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
        .is_err());
    assert!(session
        .closed_path(&[Point::new(0.0, 0.0), Point::new(1.0, 0.0)])
        .unwrap_err()
        .is_protocol_error());
    assert!(session.end().is_err());
}

#[test]
fn test_start_twice_is_rejected() {
    let mut session = started();
    assert!(matches!(
        session.start(),
        Err(ProtocolStateError::InvalidOperation { .. })
    ));
    assert_eq!(session.state(), SessionState::Started);
}

#[test]
fn test_start_then_end_emits_only_init_and_finalize() {
    let mut session = started();
    session.end().unwrap();

    let kinds: Vec<BlockKind> = session.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(kinds, vec![BlockKind::Initialize, BlockKind::Finalize]);
    assert!(!session.commands().any(Command::is_cut));

    let bytes = session.into_bytes().unwrap();
    let text = String::from_utf8(bytes).unwrap();
    assert!(text.starts_with("\x1b\x04TT\x03"));
    assert!(text.ends_with("&1,1,1\x03FO0\x03H\x03"));
}

#[test]
fn test_empty_closed_path_is_validation_error() {
    let mut session = started();
    let err = session.closed_path(&[]).unwrap_err();
    assert!(matches!(err, Error::Validation(ValidationError::EmptyPath)));
}

#[test]
fn test_single_point_closed_path_is_zero_length_cut() {
    let mut session = started();
    session.closed_path(&[Point::new(1.0, 1.0)]).unwrap();

    let p = DevicePoint::new(508.0, 508.0);
    assert_eq!(
        session.blocks()[1].commands,
        vec![Command::Move(p), Command::Draw(p), Command::Move(p)]
    );
}

#[test]
fn test_line_applies_matrix_then_offset() {
    let mut session = DeviceSession::new();
    session
        .configure(
            SessionConfig::new()
                .matrix([2.0, 0.0, 0.0, 1.0])
                .offset(Point::new(1.0, 0.5)),
        )
        .unwrap();
    session.start().unwrap();
    session
        .line(Point::new(1.0, 1.0), Point::new(2.0, 0.0))
        .unwrap();

    let line = &session.blocks()[1];
    assert_eq!(line.kind, BlockKind::Line);
    assert_eq!(
        cuts(line),
        vec![
            DevicePoint::new(3.0 * 508.0, 1.5 * 508.0),
            DevicePoint::new(5.0 * 508.0, 0.5 * 508.0),
            DevicePoint::new(5.0 * 508.0, 0.5 * 508.0),
        ]
    );
}

#[test]
fn test_configure_only_affects_later_draws() {
    let mut session = started();
    session
        .line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
        .unwrap();
    session
        .configure(SessionConfig::new().offset(Point::new(1.0, 0.0)))
        .unwrap();
    session
        .line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
        .unwrap();

    let first = cuts(&session.blocks()[1]);
    let second = cuts(&session.blocks()[2]);
    assert_eq!(first[0], DevicePoint::new(0.0, 0.0));
    assert_eq!(second[0], DevicePoint::new(508.0, 0.0));
}

#[test]
fn test_configure_merges_unspecified_fields() {
    let mut session = started();
    session.configure(PassConfig::new(3, 10).into()).unwrap();
    session.configure(SessionConfig::new().force(20)).unwrap();
    assert_eq!(session.pass(), Some(PassConfig::new(3, 20)));
}

#[test]
fn test_parameters_written_at_end_without_cuts() {
    let mut session = started();
    session.configure(PassConfig::new(2, 8).into()).unwrap();
    session.end().unwrap();

    let kinds: Vec<BlockKind> = session.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![BlockKind::Initialize, BlockKind::Parameters, BlockKind::Finalize]
    );
    assert_eq!(
        session.blocks()[1].commands,
        vec![Command::Speed(2), Command::Force(8)]
    );
}

#[test]
fn test_every_pass_keeps_its_parameter_block_without_cuts() {
    let mut session = started();
    session.configure(PassConfig::new(2, 8).into()).unwrap();
    session.configure(PassConfig::new(2, 30).into()).unwrap();
    session.end().unwrap();

    let params: Vec<&Vec<Command>> = session
        .blocks()
        .iter()
        .filter(|b| b.kind == BlockKind::Parameters)
        .map(|b| &b.commands)
        .collect();
    assert_eq!(
        params,
        vec![
            &vec![Command::Speed(2), Command::Force(8)],
            &vec![Command::Speed(2), Command::Force(30)],
        ]
    );
}

#[test]
fn test_configure_after_end_is_rejected() {
    let mut session = started();
    session.end().unwrap();

    let err = session
        .configure(SessionConfig::new().offset(Point::new(1.0, 1.0)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::ProtocolState(ProtocolStateError::InvalidOperation { ref operation, ref state })
            if operation == "configure" && state == "Ended"
    ));
    assert!(session
        .configure(PassConfig::new(2, 8).into())
        .unwrap_err()
        .is_protocol_error());
    assert_eq!(session.transform().offset(), Point::new(0.0, 0.0));
}

#[test]
fn test_two_pass_job_shares_one_session() {
    let mut session = DeviceSession::new();
    session
        .configure(SessionConfig::new().offset(Point::new(5.5, 2.0)))
        .unwrap();
    session.start().unwrap();

    let border = [
        Point::new(-1.0, -1.0),
        Point::new(2.0, -1.0),
        Point::new(2.0, 1.0),
        Point::new(-1.0, 1.0),
    ];
    for pass in [PassConfig::new(2, 8), PassConfig::new(2, 30)] {
        session.configure(pass.into()).unwrap();
        session
            .line(Point::new(0.0, 0.0), Point::new(1.0, 0.0))
            .unwrap();
        session.closed_path(&border).unwrap();
    }
    session.end().unwrap();

    let kinds: Vec<BlockKind> = session.blocks().iter().map(|b| b.kind).collect();
    assert_eq!(
        kinds,
        vec![
            BlockKind::Initialize,
            BlockKind::Parameters,
            BlockKind::Line,
            BlockKind::ClosedPath,
            BlockKind::Parameters,
            BlockKind::Line,
            BlockKind::ClosedPath,
            BlockKind::Finalize,
        ]
    );
    assert_eq!(
        session.blocks()[4].commands,
        vec![Command::Speed(2), Command::Force(30)]
    );
}

proptest! {
    #[test]
    fn prop_closed_path_ends_where_it_started(
        raw in prop::collection::vec((-20.0f64..20.0, -20.0f64..20.0), 1..30),
        a in 0.5f64..2.0,
        d in 0.5f64..2.0,
        ox in -5.0f64..5.0,
        oy in -5.0f64..5.0,
    ) {
        let points: Vec<Point> = raw.into_iter().map(Point::from).collect();
        let mut session = DeviceSession::new();
        session
            .configure(
                SessionConfig::new()
                    .matrix([a, 0.1, -0.1, d])
                    .offset(Point::new(ox, oy)),
            )
            .unwrap();
        session.start().unwrap();
        session.closed_path(&points).unwrap();

        let block = &session.blocks()[1];
        let first = block.commands.first().copied();
        let last_cut = block.commands.iter().rev().find(|c| c.is_cut()).copied();
        match (first, last_cut) {
            (Some(Command::Move(start)), Some(Command::Draw(end))) => prop_assert_eq!(start, end),
            other => prop_assert!(false, "unexpected block shape: {:?}", other),
        }
        prop_assert_eq!(block.commands.len(), points.len() + 2);
    }
}
