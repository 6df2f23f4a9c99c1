//! Byte-level checks of the encoded GP-GL stream

use stencilcut_communication::firmware::graphtec::*;
use stencilcut_core::{PassConfig, Point};

#[test]
fn test_full_stream_for_single_line() {
    let mut session = DeviceSession::new();
    session
        .configure(SessionConfig::new().media_size(Point::new(12.0, 11.0)))
        .unwrap();
    session.start().unwrap();
    session.configure(PassConfig::new(2, 8).into()).unwrap();
    session
        .line(Point::new(0.0, 0.0), Point::new(1.0, 0.5))
        .unwrap();
    session.end().unwrap();

    let text = String::from_utf8(session.into_bytes().unwrap()).unwrap();
    let expected = concat!(
        "\x1b\x04",
        "TT\x03",
        "FN0\x03",
        "\\0.000,0.000\x03",
        "Z6096.000,5588.000\x03",
        "L0\x03",
        "!2\x03",
        "FX8\x03",
        "M0.000,0.000\x03",
        "D508.000,254.000\x03",
        "M508.000,254.000\x03",
        "&1,1,1\x03",
        "FO0\x03",
        "H\x03",
    );
    assert_eq!(text, expected);
}

#[test]
fn test_closed_path_stream_returns_to_start() {
    let mut session = DeviceSession::new();
    session.start().unwrap();
    session
        .closed_path(&[
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 1.0),
        ])
        .unwrap();

    let block = session.blocks()[1].encode();
    assert_eq!(
        block,
        "M0.000,0.000\x03D508.000,0.000\x03D508.000,508.000\x03D0.000,0.000\x03M0.000,0.000\x03"
    );
}

#[test]
fn test_custom_capabilities_scale_coordinates() {
    let caps = CutterCapabilities {
        name: "Test".to_string(),
        steps_per_inch: 100.0,
        ..CutterCapabilities::default()
    };
    let mut session = DeviceSession::with_capabilities(caps);
    session.start().unwrap();
    session
        .line(Point::new(0.25, 0.0), Point::new(0.5, 0.0))
        .unwrap();

    assert_eq!(
        session.blocks()[1].encode(),
        "M25.000,0.000\x03D50.000,0.000\x03M50.000,0.000\x03"
    );
}
