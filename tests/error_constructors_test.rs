use selene::error::SeleneError;

#[test]
fn error_constructors_group_1() {
    assert!(matches!(
        SeleneError::config("x"),
        SeleneError::Config { .. }
    ));
    assert!(matches!(SeleneError::io("x"), SeleneError::Io { .. }));
    assert!(matches!(
        SeleneError::network("x"),
        SeleneError::Network { .. }
    ));
    assert!(matches!(SeleneError::feed("x"), SeleneError::Feed { .. }));
}

#[test]
fn error_constructors_group_2() {
    let ser = SeleneError::Serialization {
        message: "s".into(),
    };
    assert!(matches!(ser, SeleneError::Serialization { .. }));
    assert!(matches!(
        SeleneError::validation("f", "m"),
        SeleneError::Validation { .. }
    ));
    assert!(matches!(
        SeleneError::timeout("x"),
        SeleneError::Timeout { .. }
    ));
    assert!(matches!(
        SeleneError::generic("x"),
        SeleneError::Generic { .. }
    ));
}

#[test]
fn display_messages() {
    let e = SeleneError::validation("field", "bad");
    let s = format!("{}", e);
    assert!(s.contains("Validation error"));

    let e = SeleneError::feed("no usable index timestamp");
    assert_eq!(format!("{}", e), "Feed error: no usable index timestamp");
}

#[test]
fn io_errors_convert() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
    let err: SeleneError = io_err.into();
    assert!(matches!(err, SeleneError::Io { .. }));
}
